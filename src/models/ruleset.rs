use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Mapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleProviderType {
    Http,
    File,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleBehavior {
    Domain,
    Ipcidr,
    Classical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFormat {
    Yaml,
    Text,
    Mrs,
}

/// One entry of `rule-providers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: RuleProviderType,
    pub behavior: RuleBehavior,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RuleFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Rule matcher kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Domain,
    DomainSuffix,
    DomainKeyword,
    RuleSet,
    GeoIp,
    Match,
    Other(String),
}

impl RuleKind {
    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Domain => "DOMAIN",
            RuleKind::DomainSuffix => "DOMAIN-SUFFIX",
            RuleKind::DomainKeyword => "DOMAIN-KEYWORD",
            RuleKind::RuleSet => "RULE-SET",
            RuleKind::GeoIp => "GEOIP",
            RuleKind::Match => "MATCH",
            RuleKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for RuleKind {
    fn from(kind: &str) -> Self {
        match kind {
            "DOMAIN" => RuleKind::Domain,
            "DOMAIN-SUFFIX" => RuleKind::DomainSuffix,
            "DOMAIN-KEYWORD" => RuleKind::DomainKeyword,
            "RULE-SET" => RuleKind::RuleSet,
            "GEOIP" => RuleKind::GeoIp,
            "MATCH" => RuleKind::Match,
            other => RuleKind::Other(other.to_string()),
        }
    }
}

/// A routing rule, written as `KIND,payload,target[,no-resolve]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub payload: Option<String>,
    pub target: String,
    pub no_resolve: bool,
}

impl Rule {
    pub fn new(kind: RuleKind, payload: &str, target: &str) -> Self {
        Self {
            kind,
            payload: Some(payload.to_string()),
            target: target.to_string(),
            no_resolve: false,
        }
    }

    /// The terminal `MATCH` rule.
    pub fn final_match(target: &str) -> Self {
        Self {
            kind: RuleKind::Match,
            payload: None,
            target: target.to_string(),
            no_resolve: false,
        }
    }

    pub fn no_resolve(mut self) -> Self {
        self.no_resolve = true;
        self
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if let Some(payload) = &self.payload {
            write!(f, ",{}", payload)?;
        }
        write!(f, ",{}", self.target)?;
        if self.no_resolve {
            write!(f, ",no-resolve")?;
        }
        Ok(())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split(',').map(str::trim).collect();

        let no_resolve = parts.len() > 2 && parts.last() == Some(&"no-resolve");
        if no_resolve {
            parts.pop();
        }
        if parts.len() < 2 || parts.iter().any(|part| part.is_empty()) {
            return Err(format!("invalid rule: {}", s));
        }

        let kind = RuleKind::from(parts[0]);
        let target = parts[parts.len() - 1].to_string();
        let payload = if parts.len() > 2 {
            Some(parts[1..parts.len() - 1].join(","))
        } else {
            None
        };

        Ok(Rule {
            kind,
            payload,
            target,
            no_resolve,
        })
    }
}

impl Serialize for Rule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
