use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;
use serde_yaml::Mapping;

use crate::models::{DnsConfig, EnhancedMode};

pub const DOMESTIC_NAMESERVERS: &[&str] = &[
    "https://dns.alidns.com/dns-query",
    "https://doh.pub/dns-query",
    "https://doh.360.cn/dns-query",
];

pub const FOREIGN_NAMESERVERS: &[&str] = &[
    "https://1.1.1.1/dns-query",
    "https://1.0.0.1/dns-query",
    "https://208.67.222.222/dns-query",
    "https://208.67.220.220/dns-query",
    "https://194.242.2.2/dns-query",
    "https://194.242.2.3/dns-query",
];

pub const DEFAULT_NAMESERVERS: &[&str] = &["223.5.5.5", "119.29.29.29", "1.1.1.1", "8.8.8.8"];

pub const FAKE_IP_FILTER: &[&str] = &[
    // local hosts and devices
    "+.lan",
    "+.local",
    // windows connectivity probes
    "+.msftconnecttest.com",
    "+.msftncsi.com",
    // qq / wechat quick login
    "localhost.ptlogin2.qq.com",
    "localhost.sec.qq.com",
    "localhost.work.weixin.qq.com",
];

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub static DNS_CONFIG: Lazy<DnsConfig> = Lazy::new(|| {
    let all_nameservers: Vec<String> = DOMESTIC_NAMESERVERS
        .iter()
        .chain(FOREIGN_NAMESERVERS)
        .map(|s| s.to_string())
        .collect();

    let mut policy = LinkedHashMap::new();
    policy.insert(
        "geosite:private,cn,geolocation-cn".to_string(),
        to_owned_list(DOMESTIC_NAMESERVERS),
    );
    policy.insert(
        "geosite:google,youtube,telegram,gfw,geolocation-!cn".to_string(),
        to_owned_list(FOREIGN_NAMESERVERS),
    );

    DnsConfig {
        enable: Some(true),
        listen: Some("0.0.0.0:1053".to_string()),
        ipv6: Some(true),
        use_system_hosts: Some(false),
        cache_algorithm: Some("arc".to_string()),
        enhanced_mode: Some(EnhancedMode::FakeIp),
        fake_ip_range: Some("198.18.0.1/16".to_string()),
        fake_ip_filter: Some(to_owned_list(FAKE_IP_FILTER)),
        default_nameserver: Some(to_owned_list(DEFAULT_NAMESERVERS)),
        nameserver: Some(all_nameservers.clone()),
        proxy_server_nameserver: Some(all_nameservers),
        nameserver_policy: Some(policy),
        extra: Mapping::new(),
    }
});
