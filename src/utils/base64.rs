use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input)
}

/// Decodes a Base64 string into UTF-8 text.
///
/// Whitespace anywhere in the input is ignored and padding is optional. With
/// `accept_urlsafe` the URL-safe alphabet is tried when the standard one
/// fails. Returns `None` when the input is not Base64 or does not decode to
/// valid UTF-8.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> Option<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let bytes = match STANDARD_LENIENT.decode(&compact) {
        Ok(bytes) => bytes,
        Err(_) if accept_urlsafe => URL_SAFE_LENIENT.decode(&compact).ok()?,
        Err(_) => return None,
    };

    String::from_utf8(bytes).ok()
}
