pub mod settings_struct;
pub mod toml_settings;

pub use settings_struct::{init_settings, Settings};
pub use toml_settings::TomlSettings;
