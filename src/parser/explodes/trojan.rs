use url::Url;

use super::common::{fragment_name, host, query_params};
use crate::error::ParseError;
use crate::models::{ClashProxy, GrpcOptions, TrojanProxy, WsOptions};
use crate::utils::url::url_decode;

/// Parse a `trojan://password@host:port?params#name` link.
pub fn explode_trojan(trojan: &str) -> Result<ClashProxy, ParseError> {
    let url = Url::parse(trojan)?;
    let server = host(&url)?;
    let params = query_params(&url);

    let password = url_decode(url.username());
    if password.is_empty() {
        return Err(ParseError::MissingField("password"));
    }

    let sni = params
        .get("sni")
        .or_else(|| params.get("peer"))
        .filter(|sni| !sni.is_empty())
        .cloned()
        .unwrap_or_else(|| server.clone());

    let mut node = TrojanProxy {
        name: fragment_name(&url, "Trojan"),
        port: Some(url.port().unwrap_or(443)),
        password: Some(password),
        sni: Some(sni),
        skip_cert_verify: Some(params.get("allowInsecure").map(String::as_str) == Some("1")),
        server: Some(server),
        ..Default::default()
    };

    match params.get("type").map(String::as_str) {
        Some("ws") => {
            let path = params
                .get("path")
                .filter(|path| !path.is_empty())
                .cloned()
                .unwrap_or_else(|| "/".to_string());
            let host = params.get("host").filter(|host| !host.is_empty()).cloned();
            node.network = Some("ws".to_string());
            node.ws_opts = Some(WsOptions::with_host(path, host));
        }
        Some("grpc") => {
            node.network = Some("grpc".to_string());
            node.grpc_opts = Some(GrpcOptions {
                grpc_service_name: params.get("serviceName").cloned(),
            });
        }
        _ => {}
    }

    Ok(ClashProxy::Trojan(node))
}
