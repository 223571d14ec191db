pub mod base64;
pub mod http;
pub mod locator;
pub mod url;

// Re-export common utilities
pub use self::locator::{encode_locator, resolve_locator};
pub use self::url::{url_decode, url_encode};
