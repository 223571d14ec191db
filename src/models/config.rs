use linked_hash_map::LinkedHashMap;
use log::warn;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::proxy::ClashProxy;
use super::proxy_group_config::ProxyGroup;
use super::ruleset::{Rule, RuleProvider};

/// Read a field the synthesizer overwrites anyway. A value that does not fit
/// its typed form is dropped with a warning instead of failing the document.
fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match serde_yaml::from_value(value) {
            Ok(typed) => Ok(Some(typed)),
            Err(e) => {
                warn!("Dropping unreadable field from source configuration: {}", e);
                Ok(None)
            }
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancedMode {
    FakeIp,
    RedirHost,
    Normal,
}

/// The `dns` block of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DnsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_system_hosts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_mode: Option<EnhancedMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_ip_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_ip_filter: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_nameserver: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameserver: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_server_nameserver: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameserver_policy: Option<LinkedHashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A complete client configuration document.
///
/// Fields the synthesizer does not touch are kept exactly as read, including
/// top-level keys this struct does not name (collected in `extra`). They are
/// held as raw values so an unexpected type never rejects the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redir_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tproxy_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_port: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_lan: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_controller: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ui: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_mark: Option<Value>,

    #[serde(flatten)]
    pub extra: Mapping,

    #[serde(default, deserialize_with = "deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<ClashProxy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_providers: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub proxy_groups: Option<Vec<ProxyGroup>>,
    #[serde(default, deserialize_with = "deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub rule_providers: Option<LinkedHashMap<String, RuleProvider>>,
    #[serde(default, deserialize_with = "deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

impl ClashConfig {
    /// Configuration holding only a proxy list, as built from a link list.
    pub fn with_proxies(proxies: Vec<ClashProxy>) -> Self {
        Self {
            proxies: Some(proxies),
            ..Default::default()
        }
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.as_ref().map_or(0, Vec::len)
    }

    /// Number of entries under `proxy-providers`.
    pub fn proxy_provider_count(&self) -> usize {
        match &self.proxy_providers {
            Some(Value::Mapping(map)) => map.len(),
            Some(Value::Sequence(seq)) => seq.len(),
            _ => 0,
        }
    }

    /// Whether the configuration has any source of proxies at all.
    pub fn has_proxy_source(&self) -> bool {
        self.proxy_count() > 0 || self.proxy_provider_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_fields_survive() {
        let yaml = r#"
mixed-port: "7890"
allow-lan: true
tun:
  enable: true
  stack: system
hosts:
  router.lan: 192.168.1.1
proxies:
  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p}
"#;
        let config: ClashConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mixed_port, Some(Value::from("7890")));
        assert_eq!(config.proxy_count(), 1);
        assert!(config.extra.contains_key("tun"));

        let out: Value = serde_yaml::to_value(&config).unwrap();
        assert_eq!(out["mixed-port"], Value::from("7890"));
        assert_eq!(out["allow-lan"], Value::from(true));
        assert_eq!(out["tun"]["stack"], Value::from("system"));
        assert_eq!(out["hosts"]["router.lan"], Value::from("192.168.1.1"));
    }

    #[test]
    fn test_mistyped_scalars_are_kept_verbatim() {
        let yaml = r#"
secret: 123456
allow-lan: "true"
routing-mark: "6666"
log-level: 1
port: not-a-port
proxies:
  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p}
"#;
        let config: ClashConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.proxy_count(), 1);
        assert_eq!(config.secret, Some(Value::from(123456)));
        assert_eq!(config.allow_lan, Some(Value::from("true")));
        assert_eq!(config.routing_mark, Some(Value::from("6666")));
        assert_eq!(config.log_level, Some(Value::from(1)));
        assert_eq!(config.port, Some(Value::from("not-a-port")));
    }

    #[test]
    fn test_unreadable_overwritten_fields_are_dropped() {
        let yaml = r#"
proxies: []
dns: "not a mapping"
rules: {oops: 1}
proxy-groups:
  - name: broken
    type: select
    proxies: 7
"#;
        let config: ClashConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.dns.is_none());
        assert!(config.rules.is_none());
        assert!(config.proxy_groups.is_none());
        assert_eq!(config.proxy_count(), 0);
    }

    #[test]
    fn test_proxy_provider_count() {
        let yaml = "proxy-providers:\n  airport:\n    type: http\n    url: https://a.example/sub\n";
        let config: ClashConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.proxy_provider_count(), 1);
        assert!(config.has_proxy_source());
    }
}
