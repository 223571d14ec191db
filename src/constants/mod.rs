//! Fixed catalogs written into every generated configuration.
//!
//! Each catalog is built once per process on first use and only read
//! afterwards.

pub mod dns;
pub mod proxy_groups;
pub mod regions;
pub mod rule_providers;
pub mod rules;

pub use dns::DNS_CONFIG;
pub use proxy_groups::PROXY_GROUPS;
pub use regions::{region_filter, Region};
pub use rule_providers::RULE_PROVIDERS;
pub use rules::RULES;

/// Proxy group names referenced by both the group catalog and the rules.
pub mod group_names {
    pub const NODE_SELECT: &str = "节点选择";
    pub const HONG_KONG: &str = "香港节点";
    pub const TAIWAN: &str = "台湾节点";
    pub const JAPAN: &str = "日本节点";
    pub const SINGAPORE: &str = "新加坡节点";
    pub const UNITED_STATES: &str = "美国节点";
    pub const URL_TEST: &str = "延迟选优";
    pub const FALLBACK: &str = "故障转移";
    pub const LOAD_BALANCE_HASH: &str = "负载均衡(散列)";
    pub const LOAD_BALANCE_ROUND_ROBIN: &str = "负载均衡(轮询)";
    pub const GOOGLE: &str = "谷歌服务";
    pub const FOREIGN_MEDIA: &str = "国外媒体";
    pub const TELEGRAM: &str = "电报消息";
    pub const CHATGPT: &str = "ChatGPT";
    pub const GOOGLE_AI: &str = "GoogleAI";
    pub const MICROSOFT: &str = "微软服务";
    pub const APPLE: &str = "苹果服务";
    pub const AD_BLOCK: &str = "广告过滤";
    pub const GLOBAL_DIRECT: &str = "全局直连";
    pub const GLOBAL_REJECT: &str = "全局拦截";
    pub const FINAL: &str = "漏网之鱼";

    pub const DIRECT: &str = "DIRECT";
    pub const REJECT: &str = "REJECT";
}
