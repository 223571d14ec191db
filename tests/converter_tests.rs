use linked_hash_map::LinkedHashMap;
use serde_yaml::Value;

use clash_subconverter::interfaces::{SubscriptionConverter, SubscriptionFetcher};
use clash_subconverter::utils::base64::base64_encode;
use clash_subconverter::utils::http::FetchedSubscription;
use clash_subconverter::utils::locator::encode_locator;
use clash_subconverter::ConvertError;

/// Serves a fixed body for every URL.
struct CannedFetcher {
    body: Option<String>,
}

impl SubscriptionFetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedSubscription, ConvertError> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| ConvertError::Fetch(format!("404 Not Found ({})", url)))?;
        let mut headers = LinkedHashMap::new();
        headers.insert(
            "subscription-userinfo".to_string(),
            "upload=1; download=2; total=3".to_string(),
        );
        Ok(FetchedSubscription { body, headers })
    }
}

fn converter(body: Option<&str>) -> SubscriptionConverter<CannedFetcher> {
    SubscriptionConverter::new(CannedFetcher {
        body: body.map(str::to_string),
    })
}

fn ss_link() -> String {
    format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"))
}

#[cfg(test)]
mod converter_tests {
    use super::*;

    #[actix_web::test]
    async fn test_convert_link_list() {
        let token = encode_locator("https://sub.example.com/api?token=abc");
        let result = converter(Some(&ss_link())).convert(&token).await;

        assert!(result.success, "{:?}", result.message);
        assert_eq!(
            result.headers.get("subscription-userinfo").map(String::as_str),
            Some("upload=1; download=2; total=3")
        );

        let doc: Value = serde_yaml::from_str(result.data.as_deref().unwrap()).unwrap();
        assert_eq!(doc["proxies"][0]["name"], Value::from("N"));
        assert_eq!(doc["proxies"][0]["type"], Value::from("ss"));
        assert_eq!(doc["proxy-groups"].as_sequence().unwrap().len(), 21);
        assert_eq!(doc["rule-providers"].as_mapping().unwrap().len(), 14);
        assert_eq!(doc["dns"]["fake-ip-range"], Value::from("198.18.0.1/16"));
    }

    #[actix_web::test]
    async fn test_structured_document_passthrough() {
        let yaml = r#"
mixed-port: 7890
external-controller: 127.0.0.1:9090
sniffer:
  enable: true
proxies:
  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p, smux: {enabled: true}}
rules:
  - MATCH,DIRECT
"#;
        let token = encode_locator("https://sub.example.com/clash.yaml");
        let result = converter(Some(yaml)).convert(&token).await;
        assert!(result.success);

        let doc: Value = serde_yaml::from_str(result.data.as_deref().unwrap()).unwrap();
        assert_eq!(doc["mixed-port"], Value::from(7890));
        assert_eq!(doc["external-controller"], Value::from("127.0.0.1:9090"));
        assert_eq!(doc["sniffer"]["enable"], Value::from(true));
        assert_eq!(doc["proxies"][0]["smux"]["enabled"], Value::from(true));
        let rules = doc["rules"].as_sequence().unwrap();
        assert_eq!(rules.last(), Some(&Value::from("MATCH,漏网之鱼")));
        assert!(!rules.contains(&Value::from("MATCH,DIRECT")));
    }

    #[actix_web::test]
    async fn test_empty_proxies_fails() {
        let token = encode_locator("https://sub.example.com/empty.yaml");
        let result = converter(Some("proxies: []\n")).convert(&token).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("NO_PROXIES"));
        assert_eq!(
            result.message.as_deref(),
            Some("no proxies found in the configuration")
        );
        assert!(result.data.is_none());
    }

    #[actix_web::test]
    async fn test_proxy_providers_satisfy_precondition() {
        let yaml = "proxy-providers:\n  airport:\n    type: http\n    url: https://a.example/sub\n    path: ./airport.yaml\n";
        let token = encode_locator("https://sub.example.com/providers.yaml");
        let result = converter(Some(yaml)).convert(&token).await;
        assert!(result.success, "{:?}", result.message);
    }

    #[actix_web::test]
    async fn test_bad_token() {
        let result = converter(Some(&ss_link())).convert("!!not-base64!!").await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("DECODE_ERROR"));
    }

    #[actix_web::test]
    async fn test_fetch_failure() {
        let token = encode_locator("https://sub.example.com/missing");
        let result = converter(None).convert(&token).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("FETCH_ERROR"));
        assert!(result.message.unwrap().contains("404"));
    }

    #[actix_web::test]
    async fn test_convert_url_skips_locator() {
        let result = converter(Some(&ss_link()))
            .convert_url("https://sub.example.com/raw")
            .await;
        assert!(result.success);
    }

    #[test]
    fn test_info() {
        let info = converter(None).info();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.usage.contains("/clash/"));
    }
}
