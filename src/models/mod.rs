//! Core data models for the application
//!
//! This module contains the typed configuration tree that is read from a
//! subscription, extended, and rendered back to YAML.
//!
//! # Usage
//!
//! ```rust
//! use clash_subconverter::models::{ClashConfig, ClashProxy};
//!
//! let config: ClashConfig = serde_yaml::from_str(
//!     "proxies:\n  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p}\n",
//! )
//! .unwrap();
//! assert!(matches!(config.proxies.unwrap()[0], ClashProxy::Shadowsocks(_)));
//! ```

pub mod config;
pub mod proxy;
pub mod proxy_group_config;
pub mod ruleset;

pub use config::{ClashConfig, DnsConfig, EnhancedMode};
pub use proxy::*;
pub use proxy_group_config::{BalanceStrategy, HealthCheck, ProxyGroup, ProxyGroupType};
pub use ruleset::{Rule, RuleBehavior, RuleFormat, RuleKind, RuleProvider, RuleProviderType};
