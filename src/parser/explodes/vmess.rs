use serde_json::Value;

use super::common::parse_port;
use crate::error::ParseError;
use crate::models::{ClashProxy, GrpcOptions, H2Options, VmessProxy, WsOptions};
use crate::utils::base64::base64_decode;

/// First non-empty value among `keys`, with numbers rendered as text.
fn json_str(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match &json[*key] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    }
}

/// Parse a `vmess://BASE64(JSON)` link.
pub fn explode_vmess(vmess: &str) -> Result<ClashProxy, ParseError> {
    let encoded = vmess
        .strip_prefix("vmess://")
        .ok_or_else(|| ParseError::UnsupportedScheme(vmess.chars().take(16).collect()))?;

    let decoded = base64_decode(encoded, true).ok_or(ParseError::Base64)?;
    let json: Value = serde_json::from_str(&decoded)?;

    let server = json_str(&json, &["add", "address"]).ok_or(ParseError::MissingField("server"))?;
    let port = json_str(&json, &["port"]).ok_or(ParseError::MissingField("port"))?;
    let port = parse_port(&port)?;

    let alter_id = json_str(&json, &["aid"])
        .and_then(|aid| aid.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let network = json_str(&json, &["net"]).unwrap_or_else(|| "tcp".to_string());
    let host = json_str(&json, &["host"]);
    let path = json_str(&json, &["path"]);
    let tls = match &json["tls"] {
        Value::String(s) => s == "tls",
        Value::Bool(b) => *b,
        _ => false,
    };

    let mut node = VmessProxy {
        name: json_str(&json, &["ps", "remarks"]).unwrap_or_else(|| "VMess".to_string()),
        server: Some(server),
        port: Some(port),
        uuid: json_str(&json, &["id"]),
        alter_id: Some(alter_id),
        cipher: Some(json_str(&json, &["scy"]).unwrap_or_else(|| "auto".to_string())),
        tls: Some(tls),
        ..Default::default()
    };

    match network.as_str() {
        "ws" => {
            node.ws_opts = Some(WsOptions::with_host(
                path.unwrap_or_else(|| "/".to_string()),
                host.clone(),
            ));
        }
        "h2" => {
            node.h2_opts = Some(H2Options {
                path: Some(path.unwrap_or_else(|| "/".to_string())),
                host: host.clone(),
            });
        }
        "grpc" => {
            node.grpc_opts = Some(GrpcOptions {
                grpc_service_name: Some(path.unwrap_or_default()),
            });
        }
        _ => {}
    }
    node.network = Some(network);

    if tls {
        node.servername = json_str(&json, &["sni"]).or(host);
        node.skip_cert_verify = Some(json_truthy(&json["allowInsecure"]));
    }

    Ok(ClashProxy::VMess(node))
}
