use serde::{Deserialize, Serialize};

use super::settings_struct::{
    default_listen_address, default_listen_port, default_log_level, default_max_concur_threads,
    default_user_agent,
};

fn default_none() -> String {
    "NONE".to_string()
}

/// Common settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    /// Outbound proxy used when fetching subscriptions, `NONE` for direct
    pub proxy_subscription: String,
    /// `User-Agent` sent to subscription providers
    pub user_agent: String,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            proxy_subscription: default_none(),
            user_agent: default_user_agent(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen_address(),
            port: default_listen_port(),
        }
    }
}

/// Advanced settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    pub log_level: String,
    pub max_concurrent_threads: usize,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_concurrent_threads: default_max_concur_threads(),
        }
    }
}

/// Settings file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlSettings {
    pub common: CommonSettings,
    pub server: ServerSettings,
    pub advanced: AdvancedSettings,
}
