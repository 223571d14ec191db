#![cfg(feature = "web-api")]

use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{test, App};
use linked_hash_map::LinkedHashMap;

use clash_subconverter::interfaces::{SubscriptionConverter, SubscriptionFetcher};
use clash_subconverter::utils::base64::base64_encode;
use clash_subconverter::utils::http::FetchedSubscription;
use clash_subconverter::utils::locator::encode_locator;
use clash_subconverter::web_handlers::interfaces::register;
use clash_subconverter::ConvertError;

#[derive(Clone)]
struct CannedFetcher {
    body: String,
}

impl SubscriptionFetcher for CannedFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedSubscription, ConvertError> {
        let mut headers = LinkedHashMap::new();
        headers.insert(
            "subscription-userinfo".to_string(),
            "upload=0; download=0; total=10".to_string(),
        );
        Ok(FetchedSubscription {
            body: self.body.clone(),
            headers,
        })
    }
}

fn canned(body: &str) -> SubscriptionConverter<CannedFetcher> {
    SubscriptionConverter::new(CannedFetcher {
        body: body.to_string(),
    })
}

#[cfg(test)]
mod web_handler_tests {
    use super::*;

    #[actix_web::test]
    async fn test_clash_endpoint_returns_yaml() {
        let body = format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"));
        let converter = canned(&body);
        let app = test::init_service(App::new().configure(|cfg| register(cfg, converter))).await;

        let token = encode_locator("https://sub.example.com/api?token=abc");
        let req = test::TestRequest::get()
            .uri(&format!("/clash/{}", token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let headers = resp.headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "text/yaml; charset=utf-8"
        );
        assert!(headers
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("attachment"));
        assert_eq!(
            headers.get("subscription-userinfo").unwrap(),
            "upload=0; download=0; total=10"
        );

        let bytes = test::read_body(resp).await;
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("name: N"));
        assert!(text.contains("MATCH,漏网之鱼"));
    }

    #[actix_web::test]
    async fn test_percent_encoded_token_is_accepted() {
        let body = format!("ss://{}@1.2.3.4:8388#N", base64_encode("aes-256-gcm:pass"));
        let converter = canned(&body);
        let app = test::init_service(App::new().configure(|cfg| register(cfg, converter))).await;

        let token = encode_locator("https://sub.example.com/api?token=abc")
            .replace('/', "%2F")
            .replace('=', "%3D");
        let req = test::TestRequest::get()
            .uri(&format!("/clash/{}", token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let content_type = resp.headers().get(CONTENT_TYPE).unwrap().clone();
        assert_eq!(content_type, "text/yaml; charset=utf-8");
    }

    #[actix_web::test]
    async fn test_failure_is_plain_text() {
        let converter = canned("proxies: []\n");
        let app = test::init_service(App::new().configure(|cfg| register(cfg, converter))).await;

        let token = encode_locator("https://sub.example.com/empty");
        let req = test::TestRequest::get()
            .uri(&format!("/clash/{}", token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..], b"no proxies found in the configuration");
    }

    #[actix_web::test]
    async fn test_hello_endpoint() {
        let converter = canned("");
        let app = test::init_service(App::new().configure(|cfg| register(cfg, converter))).await;

        let req = test::TestRequest::get().uri("/clash/hello").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["message"], "Hello from clash-subconverter!");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
