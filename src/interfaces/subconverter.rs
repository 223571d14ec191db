use std::future::Future;

use linked_hash_map::LinkedHashMap;
use log::{error, info};
use serde::Serialize;

use crate::error::ConvertError;
use crate::generator::{extend_common_config, render_yaml};
use crate::parser::parse_clash_config;
use crate::settings::Settings;
use crate::utils::http::{parse_proxy, web_get_async, FetchedSubscription, ProxyConfig};
use crate::utils::locator::resolve_locator;

/// Source of raw subscription text.
pub trait SubscriptionFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<FetchedSubscription, ConvertError>>;
}

/// Fetches subscriptions over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    pub user_agent: String,
    pub proxy: ProxyConfig,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, proxy: ProxyConfig) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            proxy,
        }
    }

    /// Fetcher configured from the current global settings.
    pub fn from_settings() -> Self {
        let settings = Settings::current();
        Self::new(
            &settings.user_agent,
            parse_proxy(&settings.proxy_subscription),
        )
    }
}

impl SubscriptionFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedSubscription, ConvertError> {
        web_get_async(url, &self.proxy, &self.user_agent).await
    }
}

/// Outcome of one conversion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "LinkedHashMap::is_empty")]
    pub headers: LinkedHashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConversionResult {
    pub fn ok(data: String, headers: LinkedHashMap<String, String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            headers,
            ..Default::default()
        }
    }

    pub fn failed(err: &ConvertError) -> Self {
        Self {
            success: false,
            error: Some(err.code().to_string()),
            message: Some(err.to_string()),
            ..Default::default()
        }
    }
}

impl From<Result<(String, LinkedHashMap<String, String>), ConvertError>> for ConversionResult {
    fn from(result: Result<(String, LinkedHashMap<String, String>), ConvertError>) -> Self {
        match result {
            Ok((data, headers)) => ConversionResult::ok(data, headers),
            Err(e) => ConversionResult::failed(&e),
        }
    }
}

/// Description of the service returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConverterInfo {
    pub version: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

/// Parse, extend and render subscription text.
pub fn convert_subscription_text(text: &str) -> Result<String, ConvertError> {
    let mut config = parse_clash_config(text);
    extend_common_config(&mut config)?;
    render_yaml(&config)
}

/// Runs the whole conversion pipeline for one request.
#[derive(Debug, Clone)]
pub struct SubscriptionConverter<F> {
    fetcher: F,
}

impl SubscriptionConverter<HttpFetcher> {
    pub fn from_settings() -> Self {
        Self::new(HttpFetcher::from_settings())
    }
}

impl<F: SubscriptionFetcher> SubscriptionConverter<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Convert the subscription carried by a locator token.
    pub async fn convert(&self, token: &str) -> ConversionResult {
        let result = match resolve_locator(token) {
            Ok(url) => self.try_convert_url(&url).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!("Conversion failed: {}", e);
        }
        result.into()
    }

    /// Convert the subscription at a plain URL.
    pub async fn convert_url(&self, url: &str) -> ConversionResult {
        let result = self.try_convert_url(url).await;
        if let Err(e) = &result {
            error!("Conversion of {} failed: {}", url, e);
        }
        result.into()
    }

    async fn try_convert_url(
        &self,
        url: &str,
    ) -> Result<(String, LinkedHashMap<String, String>), ConvertError> {
        info!("Converting subscription {}", url);
        let fetched = self.fetcher.fetch(url).await?;
        let yaml = convert_subscription_text(&fetched.body)?;
        Ok((yaml, fetched.headers))
    }

    pub fn info(&self) -> ConverterInfo {
        ConverterInfo {
            version: env!("CARGO_PKG_VERSION"),
            description: "Convert a subscription into a complete Clash configuration",
            usage: "GET /clash/{token}, where token is base64(percent-encoded subscription url)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    #[test]
    fn test_convert_subscription_text() {
        let ss = format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"));
        let yaml = convert_subscription_text(&format!("{}\ngarbage\n", ss)).unwrap();
        assert!(yaml.contains("name: N"));
        assert!(yaml.contains("MATCH,漏网之鱼"));
    }

    #[test]
    fn test_failed_result_shape() {
        let result = ConversionResult::failed(&ConvertError::NoProxies);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("NO_PROXIES"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert!(json.get("data").is_none());
    }
}
