//! Opaque subscription locators.
//!
//! A locator is the standard Base64 encoding of a percent-encoded absolute
//! URL. It lets a subscription URL, query string and all, travel as a single
//! path segment.

use log::debug;
use url::Url;

use crate::error::ConvertError;
use crate::utils::base64::{base64_decode, base64_encode};
use crate::utils::url::{url_decode_strict, url_encode};

/// Decode a locator token into the subscription URL it carries.
///
/// The decoded string is returned as-is once it has been checked to be an
/// absolute URL with a scheme and a non-empty host.
pub fn resolve_locator(token: &str) -> Result<String, ConvertError> {
    let encoded = base64_decode(token.trim(), false)
        .ok_or_else(|| ConvertError::Decode("token is not valid base64 text".to_string()))?;

    let decoded = url_decode_strict(&encoded)
        .ok_or_else(|| ConvertError::Decode("malformed percent-encoding".to_string()))?;

    let url = Url::parse(&decoded).map_err(|e| ConvertError::Decode(e.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConvertError::Decode(format!("url has no host: {}", decoded)));
    }

    debug!("Resolved locator to {}", decoded);
    Ok(decoded)
}

/// Build the locator token for a subscription URL.
pub fn encode_locator(url: &str) -> String {
    base64_encode(&url_encode(url))
}
