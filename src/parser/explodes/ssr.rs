use super::common::parse_port;
use crate::error::ParseError;
use crate::models::{ClashProxy, ShadowsocksRProxy};
use crate::utils::base64::base64_decode;

/// Parse an `ssr://BASE64(server:port:protocol:method:obfs:BASE64(password)/?params)` link.
///
/// Everything after `/?` is ignored and the node is always named `ShadowsocksR`.
pub fn explode_ssr(ssr: &str) -> Result<ClashProxy, ParseError> {
    let encoded = ssr
        .strip_prefix("ssr://")
        .ok_or_else(|| ParseError::UnsupportedScheme(ssr.chars().take(16).collect()))?;
    let decoded = base64_decode(encoded, true).ok_or(ParseError::Base64)?;

    let parts: Vec<&str> = decoded.splitn(6, ':').collect();
    let &[server, port, protocol, method, obfs, password] = parts.as_slice() else {
        return Err(ParseError::Malformed(format!(
            "expected 6 fields, found {}",
            parts.len()
        )));
    };

    let password = password.split("/?").next().unwrap_or_default();
    let password = base64_decode(password, true).ok_or(ParseError::Base64)?;

    Ok(ClashProxy::ShadowsocksR(ShadowsocksRProxy {
        name: "ShadowsocksR".to_string(),
        server: Some(server.to_string()),
        port: Some(parse_port(port)?),
        cipher: Some(method.to_string()),
        password: Some(password),
        protocol: Some(protocol.to_string()),
        obfs: Some(obfs.to_string()),
        ..Default::default()
    }))
}
