use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockWriteGuard};

use log::info;

use super::toml_settings::TomlSettings;
use crate::error::SettingsError;

/// Settings file looked up when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "pref.toml";

/// Settings structure to hold global configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pref_path: String,

    // Outbound
    pub user_agent: String,
    pub proxy_subscription: String,

    // Server
    pub listen_address: String,
    pub listen_port: u16,
    pub max_concur_threads: usize,

    pub log_level: String,
}

// Default value functions for serde
pub fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

pub fn default_listen_port() -> u16 {
    25500
}

pub fn default_max_concur_threads() -> usize {
    4
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_user_agent() -> String {
    "clash-verge/v2.3.2".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            pref_path: String::new(),
            user_agent: default_user_agent(),
            proxy_subscription: "NONE".to_string(),
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_concur_threads: default_max_concur_threads(),
            log_level: default_log_level(),
        }
    }
}

impl From<TomlSettings> for Settings {
    fn from(toml: TomlSettings) -> Self {
        let mut settings = Settings {
            pref_path: String::new(),
            user_agent: toml.common.user_agent,
            proxy_subscription: toml.common.proxy_subscription,
            listen_address: toml.server.listen,
            listen_port: toml.server.port,
            max_concur_threads: toml.advanced.max_concurrent_threads,
            log_level: toml.advanced.log_level,
        };

        if settings.listen_address.trim().is_empty() {
            settings.listen_address = default_listen_address();
        }
        if settings.user_agent.trim().is_empty() {
            settings.user_agent = default_user_agent();
        }
        if settings.max_concur_threads == 0 {
            settings.max_concur_threads = default_max_concur_threads();
        }
        settings
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current() -> Arc<Settings> {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_mut() -> RwLockWriteGuard<'static, Arc<Settings>> {
        GLOBAL.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: TomlSettings = toml::from_str(content)?;
        Ok(Settings::from(toml_settings))
    }

    pub fn load_from_file(path: &str) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Settings::load_from_content(&content)?;
        settings.pref_path = path.to_owned();
        Ok(settings)
    }

    /// `host:port` the server binds to. An address that already carries a
    /// port is used as-is; a bare IPv6 address is bracketed.
    pub fn bind_address(&self) -> String {
        let address = self.listen_address.trim();
        if address.parse::<SocketAddr>().is_ok() {
            return address.to_string();
        }
        match address.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.listen_port),
            _ if address.contains(':') && !address.ends_with(']') => address.to_string(),
            _ => format!("{}:{}", address, self.listen_port),
        }
    }
}

// Global settings instance
static GLOBAL: LazyLock<RwLock<Arc<Settings>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Settings::new())));

/// Load settings into the global instance.
///
/// An empty `path` loads `pref.toml` from the working directory when present
/// and otherwise keeps the defaults.
pub fn init_settings(path: &str) -> Result<(), SettingsError> {
    let path = if path.is_empty() {
        if !Path::new(DEFAULT_SETTINGS_FILE).exists() {
            info!("No settings file found, using defaults");
            return Ok(());
        }
        DEFAULT_SETTINGS_FILE
    } else {
        path
    };

    let settings = Settings::load_from_file(path)?;
    info!("Loaded settings from {}", path);
    *Settings::current_mut() = Arc::new(settings);
    Ok(())
}
