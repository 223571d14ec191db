use url::Url;

use super::common::{fragment_name, host, parse_port, query_params};
use crate::error::ParseError;
use crate::models::{ClashProxy, PluginOptions, ShadowsocksProxy};
use crate::utils::base64::base64_decode;
use crate::utils::url::url_decode;
use serde_yaml::Value;

/// Split `method:password` at the first colon.
fn split_user_info(user_info: &str) -> Result<(String, String), ParseError> {
    user_info
        .split_once(':')
        .map(|(method, password)| (method.to_string(), password.to_string()))
        .ok_or_else(|| ParseError::Malformed("expected method:password".to_string()))
}

/// Map a SIP002 `plugin` parameter onto the client's `plugin` / `plugin-opts`.
fn parse_plugin(plugin: &str) -> (String, PluginOptions) {
    let mut parts = plugin.split(';');
    let name = parts.next().unwrap_or_default();
    let mut opts = PluginOptions::default();

    let name = match name {
        "obfs-local" | "simple-obfs" => "obfs",
        other => other,
    };

    for part in parts.filter(|part| !part.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        match (name, key) {
            ("obfs", "obfs") => opts.mode = Some(value.to_string()),
            ("obfs", "obfs-host") => opts.host = Some(value.to_string()),
            (_, "mode") => opts.mode = Some(value.to_string()),
            (_, "host") => opts.host = Some(value.to_string()),
            (_, "path") => opts.path = Some(value.to_string()),
            (_, "tls") => opts.tls = Some(true),
            (_, "mux") => opts.mux = Some(value != "0" && value != "false"),
            _ => {
                opts.extra
                    .insert(Value::from(key), Value::from(value.to_string()));
            }
        }
    }

    if name == "v2ray-plugin" && opts.mode.is_none() {
        opts.mode = Some("websocket".to_string());
    }

    (name.to_string(), opts)
}

/// `ss://BASE64(method:password@host:port)#name`
fn explode_legacy(body: &str, name: String) -> Result<ShadowsocksProxy, ParseError> {
    let decoded = base64_decode(&url_decode(body), true).ok_or(ParseError::Base64)?;
    let (user_info, address) = decoded
        .rsplit_once('@')
        .ok_or_else(|| ParseError::Malformed("missing server address".to_string()))?;
    let (method, password) = split_user_info(user_info)?;
    let (server, port) = address
        .rsplit_once(':')
        .ok_or(ParseError::MissingField("port"))?;
    let server = server.trim_start_matches('[').trim_end_matches(']');
    if server.is_empty() {
        return Err(ParseError::MissingField("server"));
    }

    Ok(ShadowsocksProxy {
        name,
        server: Some(server.to_string()),
        port: Some(parse_port(port)?),
        cipher: Some(method),
        password: Some(password),
        ..Default::default()
    })
}

/// Parse an `ss://` link in SIP002 form (plain or Base64 user info) or in the
/// legacy whole-Base64 form.
pub fn explode_ss(ss: &str) -> Result<ClashProxy, ParseError> {
    let body = ss
        .strip_prefix("ss://")
        .ok_or_else(|| ParseError::UnsupportedScheme(ss.chars().take(16).collect()))?;
    let authority = body
        .split(&['#', '?'][..])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if !authority.contains('@') {
        let name = body
            .split_once('#')
            .map(|(_, fragment)| url_decode(fragment))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Shadowsocks".to_string());
        return explode_legacy(authority, name).map(ClashProxy::Shadowsocks);
    }

    let url = Url::parse(ss)?;
    let server = host(&url)?;
    let port = url.port().ok_or(ParseError::MissingField("port"))?;

    let username = url_decode(url.username());
    let (method, password) = match url.password() {
        Some(password) if !username.is_empty() => (username, url_decode(password)),
        _ => {
            let user_info = base64_decode(&username, true).ok_or(ParseError::Base64)?;
            split_user_info(&user_info)?
        }
    };

    let mut node = ShadowsocksProxy {
        name: fragment_name(&url, "Shadowsocks"),
        server: Some(server),
        port: Some(port),
        cipher: Some(method),
        password: Some(password),
        ..Default::default()
    };

    if let Some(plugin) = query_params(&url).get("plugin").filter(|p| !p.is_empty()) {
        let (plugin, opts) = parse_plugin(plugin);
        node.plugin = Some(plugin);
        node.plugin_opts = Some(opts);
    }

    Ok(ClashProxy::Shadowsocks(node))
}
