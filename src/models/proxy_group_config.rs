use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use super::proxy::deserialize_string_or_number;

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyGroupType {
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "url-test")]
    URLTest,
    #[serde(rename = "fallback")]
    Fallback,
    #[serde(rename = "load-balance")]
    LoadBalance,
    #[serde(rename = "relay")]
    Relay,
    #[serde(rename = "smart")]
    Smart,
}

/// Load balancing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStrategy {
    ConsistentHashing,
    RoundRobin,
    StickySessions,
}

/// One entry of `proxy-groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: ProxyGroupType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number", skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failed_times: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<BalanceStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ProxyGroup {
    /// Create a new proxy group
    pub fn new(name: &str, group_type: ProxyGroupType) -> Self {
        Self {
            name: name.to_string(),
            group_type,
            proxies: None,
            include_all: None,
            filter: None,
            url: None,
            expected_status: None,
            interval: None,
            timeout: None,
            tolerance: None,
            lazy: None,
            max_failed_times: None,
            hidden: None,
            strategy: None,
            icon: None,
            extra: Mapping::new(),
        }
    }

    /// Apply a health-check template: probe url, interval and timeout,
    /// laziness, failure threshold and visibility.
    pub fn health_check(mut self, check: &HealthCheck) -> Self {
        self.url = Some(check.url.to_string());
        self.interval = Some(check.interval);
        self.timeout = Some(check.timeout);
        self.lazy = Some(check.lazy);
        self.max_failed_times = Some(check.max_failed_times);
        self.hidden = Some(check.hidden);
        self
    }

    pub fn proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = Some(proxies.into_iter().map(Into::into).collect());
        self
    }

    pub fn include_all(mut self) -> Self {
        self.include_all = Some(true);
        self
    }

    pub fn filter(mut self, filter: String) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Override the probe url set by the health-check template.
    pub fn probe_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn expected_status(mut self, status: &str) -> Self {
        self.expected_status = Some(status.to_string());
        self
    }

    pub fn tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn icon(mut self, icon: String) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Health-check options shared by a family of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    pub url: &'static str,
    pub interval: u32,
    pub timeout: u32,
    pub lazy: bool,
    pub max_failed_times: u32,
    pub hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_serializes_kebab_case() {
        let group = ProxyGroup::new("lb", ProxyGroupType::LoadBalance)
            .strategy(BalanceStrategy::RoundRobin)
            .include_all()
            .expected_status("200");
        let yaml = serde_yaml::to_string(&group).unwrap();
        assert!(yaml.contains("type: load-balance"));
        assert!(yaml.contains("strategy: round-robin"));
        assert!(yaml.contains("include-all: true"));
        assert!(yaml.contains("expected-status: '200'"));
        assert!(!yaml.contains("filter"));
    }

    #[test]
    fn test_group_reads_numeric_expected_status() {
        let group: ProxyGroup =
            serde_yaml::from_str("name: g\ntype: url-test\nexpected-status: 204\nuse: [p1]\n")
                .unwrap();
        assert_eq!(group.expected_status.as_deref(), Some("204"));
        assert_eq!(group.group_type, ProxyGroupType::URLTest);
        assert!(group.extra.contains_key("use"));
    }
}
