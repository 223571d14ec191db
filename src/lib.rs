pub mod constants;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main types for easier access
pub use error::{ConvertError, ParseError, SettingsError};
pub use interfaces::{ConversionResult, SubscriptionConverter};
pub use models::{ClashConfig, ClashProxy};
pub use settings::Settings;
