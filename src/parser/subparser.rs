use log::{debug, info, warn};
use serde_yaml::Value;

use crate::models::ClashConfig;
use crate::parser::explodes::explode;
use crate::utils::base64::base64_decode;

pub use crate::parser::explodes::LinkScheme;

/// Read subscription text into a configuration.
///
/// A YAML mapping that reads as a configuration is returned as-is. Anything
/// else falls back to the line-oriented link parser, so this never fails.
pub fn parse_clash_config(data: &str) -> ClashConfig {
    match parse_structured(data) {
        Some(config) => {
            debug!(
                "Subscription is a structured document with {} proxies",
                config.proxy_count()
            );
            config
        }
        None => parse_proxies(data),
    }
}

fn parse_structured(data: &str) -> Option<ClashConfig> {
    let value: Value = match serde_yaml::from_str(data) {
        Ok(value) => value,
        Err(e) => {
            debug!("Subscription is not YAML: {}", e);
            return None;
        }
    };
    if !value.is_mapping() {
        return None;
    }

    let config: ClashConfig = match serde_yaml::from_value(value) {
        Ok(config) => config,
        Err(e) => {
            debug!("Subscription YAML is not a configuration: {}", e);
            return None;
        }
    };

    // A single link containing ": " reads as a one-key mapping.
    let looks_like_link = config
        .extra
        .keys()
        .any(|key| key.as_str().is_some_and(|key| key.contains("://")));
    if looks_like_link {
        return None;
    }

    Some(config)
}

/// Parse a newline-delimited list of proxy links.
///
/// A body without any `://` that decodes as Base64 is decoded first. Lines
/// that are blank are ignored; lines with an unknown scheme or bad content
/// are skipped with a warning.
pub fn parse_proxies(data: &str) -> ClashConfig {
    let decoded;
    let mut text = data;
    if !data.contains("://") {
        if let Some(body) = base64_decode(data, true) {
            debug!("Decoded base64 subscription body");
            decoded = body;
            text = &decoded;
        }
    }

    let mut proxies = Vec::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match explode(line) {
            Ok(proxy) => proxies.push(proxy),
            Err(e) => {
                let preview: String = line.chars().take(50).collect();
                warn!("Skipping invalid link {}...: {}", preview, e);
            }
        }
    }

    info!("Parsed {} proxies from link list", proxies.len());
    ClashConfig::with_proxies(proxies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClashProxy;
    use crate::utils::base64::base64_encode;

    #[test]
    fn test_link_with_colon_space_in_name_is_not_yaml() {
        let config = parse_clash_config("trojan://pw@h.com:443#My Node: HK");
        assert_eq!(config.proxy_count(), 1);
        assert_eq!(config.proxies.unwrap()[0].name(), Some("My Node: HK"));
    }

    #[test]
    fn test_scalar_and_list_documents_fall_back() {
        assert_eq!(parse_clash_config("just some text").proxy_count(), 0);
        assert_eq!(parse_clash_config("- a\n- b\n").proxy_count(), 0);
        assert_eq!(parse_clash_config("").proxy_count(), 0);
    }

    #[test]
    fn test_base64_body() {
        let ss = format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"));
        let body = base64_encode(&format!("{}\nnot-a-link\n", ss));
        let config = parse_clash_config(&body);
        assert_eq!(config.proxy_count(), 1);
        assert!(matches!(
            config.proxies.unwrap()[0],
            ClashProxy::Shadowsocks(_)
        ));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let ss = format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"));
        let text = format!("\r\n  {}  \r\n\r\n{}\r\n", ss, ss);
        assert_eq!(parse_proxies(&text).proxy_count(), 2);
    }
}
