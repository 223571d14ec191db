use actix_web::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, EXPIRES, PRAGMA};
use actix_web::{web, HttpResponse};
use log::debug;
use serde::Serialize;

use crate::interfaces::subconverter::{
    ConversionResult, ConverterInfo, SubscriptionConverter, SubscriptionFetcher,
};
use crate::utils::url::url_decode;

/// File name offered to clients downloading a generated configuration.
pub const DOWNLOAD_FILENAME: &str = "clash-config.yaml";

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub info: ConverterInfo,
}

/// Health probe
pub async fn hello_handler<F: SubscriptionFetcher + 'static>(
    converter: web::Data<SubscriptionConverter<F>>,
) -> HttpResponse {
    HttpResponse::Ok().json(HelloResponse {
        message: "Hello from clash-subconverter!",
        info: converter.info(),
    })
}

/// Convert the subscription carried by the locator in the path.
pub async fn clash_handler<F: SubscriptionFetcher + 'static>(
    path: web::Path<String>,
    converter: web::Data<SubscriptionConverter<F>>,
) -> HttpResponse {
    // %2F and %3D survive routing undecoded
    let token = url_decode(&path.into_inner());
    debug!("Conversion requested for token {}", token);

    into_response(converter.convert(&token).await)
}

/// Turn a conversion result into the download response.
pub fn into_response(result: ConversionResult) -> HttpResponse {
    let data = match (result.success, result.data) {
        (true, Some(data)) => data,
        _ => {
            let message = result
                .message
                .unwrap_or_else(|| "conversion failed".to_string());
            return HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(message);
        }
    };

    let mut resp = HttpResponse::Ok();
    resp.content_type("text/yaml; charset=utf-8")
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
        ))
        .insert_header((CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .insert_header((PRAGMA, "no-cache"))
        .insert_header((EXPIRES, "0"));

    // Add headers forwarded from the subscription provider
    for (name, value) in result.headers {
        resp.append_header((name, value));
    }

    resp.body(data)
}

/// Register the API endpoints with a given converter.
pub fn register<F: SubscriptionFetcher + 'static>(
    cfg: &mut web::ServiceConfig,
    converter: SubscriptionConverter<F>,
) {
    cfg.app_data(web::Data::new(converter))
        .route("/clash/hello", web::get().to(hello_handler::<F>))
        .route("/clash/{token:.*}", web::get().to(clash_handler::<F>));
}

/// Register the API endpoints with Actix Web
pub fn config(cfg: &mut web::ServiceConfig) {
    register(cfg, SubscriptionConverter::from_settings());
}
