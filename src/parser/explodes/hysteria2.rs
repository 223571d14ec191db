use url::Url;

use super::common::{fragment_name, host, is_truthy, query_params};
use crate::error::ParseError;
use crate::models::{ClashProxy, Hysteria2Proxy};
use crate::utils::url::url_decode;

/// Parse a `hysteria2://` (or `hy2://`) link.
pub fn explode_hysteria2(hysteria2: &str) -> Result<ClashProxy, ParseError> {
    let url = Url::parse(hysteria2)?;
    let server = host(&url)?;
    let params = query_params(&url);

    // `auth` may be written as user:pass
    let password = match url.password() {
        Some(pass) => format!("{}:{}", url_decode(url.username()), url_decode(pass)),
        None => url_decode(url.username()),
    };

    let non_empty = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    Ok(ClashProxy::Hysteria2(Hysteria2Proxy {
        name: fragment_name(&url, "Hysteria2"),
        server: Some(server),
        port: Some(url.port().unwrap_or(443)),
        ports: non_empty("mport").or_else(|| non_empty("ports")),
        password: Some(password).filter(|p| !p.is_empty()),
        up: non_empty("up"),
        down: non_empty("down"),
        obfs: non_empty("obfs"),
        obfs_password: non_empty("obfs-password"),
        sni: non_empty("sni"),
        skip_cert_verify: params.get("insecure").map(|v| is_truthy(v)),
        fingerprint: non_empty("pinSHA256"),
        alpn: non_empty("alpn").map(|alpn| alpn.split(',').map(str::to_string).collect()),
        ..Default::default()
    }))
}
