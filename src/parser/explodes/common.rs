use std::collections::HashMap;

use url::Url;

use crate::error::ParseError;
use crate::models::ClashProxy;
use crate::utils::url::url_decode;

use super::{hysteria2, ss, ssr, trojan, vmess};

/// URI schemes with a link decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScheme {
    VMess,
    Trojan,
    Shadowsocks,
    ShadowsocksR,
    Hysteria2,
}

/// Scheme prefix to decoder table.
const SCHEMES: &[(&str, LinkScheme)] = &[
    ("vmess://", LinkScheme::VMess),
    ("trojan://", LinkScheme::Trojan),
    ("ss://", LinkScheme::Shadowsocks),
    ("ssr://", LinkScheme::ShadowsocksR),
    ("hysteria2://", LinkScheme::Hysteria2),
    ("hy2://", LinkScheme::Hysteria2),
];

impl LinkScheme {
    pub fn from_link(link: &str) -> Option<Self> {
        SCHEMES
            .iter()
            .find(|(prefix, _)| link.starts_with(prefix))
            .map(|(_, scheme)| *scheme)
    }

    pub fn decoder(&self) -> fn(&str) -> Result<ClashProxy, ParseError> {
        match self {
            LinkScheme::VMess => vmess::explode_vmess,
            LinkScheme::Trojan => trojan::explode_trojan,
            LinkScheme::Shadowsocks => ss::explode_ss,
            LinkScheme::ShadowsocksR => ssr::explode_ssr,
            LinkScheme::Hysteria2 => hysteria2::explode_hysteria2,
        }
    }
}

/// Explode a proxy link into a node, dispatching on its scheme.
pub fn explode(link: &str) -> Result<ClashProxy, ParseError> {
    let link = link.trim();
    match LinkScheme::from_link(link) {
        Some(scheme) => scheme.decoder()(link),
        None => {
            let scheme = link.split("://").next().unwrap_or(link);
            Err(ParseError::UnsupportedScheme(scheme.chars().take(16).collect()))
        }
    }
}

/// Percent-decoded fragment of a link, or `default` when there is none.
pub(crate) fn fragment_name(url: &Url, default: &str) -> String {
    url.fragment()
        .map(url_decode)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Host part of a link, required.
pub(crate) fn host(url: &Url) -> Result<String, ParseError> {
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or(ParseError::MissingField("server"))
}

/// Decoded query parameters. The first occurrence of a key wins.
pub(crate) fn query_params(url: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

pub(crate) fn parse_port(value: &str) -> Result<u16, ParseError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidPort(value.to_string()))
}

pub(crate) fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_table() {
        assert_eq!(LinkScheme::from_link("hy2://p@h:1"), Some(LinkScheme::Hysteria2));
        assert_eq!(LinkScheme::from_link("ssr://abc"), Some(LinkScheme::ShadowsocksR));
        assert_eq!(LinkScheme::from_link("ss://abc"), Some(LinkScheme::Shadowsocks));
        assert_eq!(LinkScheme::from_link("vless://abc"), None);
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = explode("vless://uuid@host:443").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedScheme(s) if s == "vless"));
    }
}
