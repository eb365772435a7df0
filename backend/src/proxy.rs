//! `/predict` forwarding and the gateway's own endpoints.

use crate::models::{ApiResponse, HealthInfo};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse, Responder};
use awc::Client;
use log::{error, info};
use std::time::Instant;

pub const PREDICT_PATH: &str = "/predict";

/// Largest request or response body the gateway relays.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Where `/predict` is forwarded to.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub base_url: String,
    pub predict_url: String,
}

impl Upstream {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let predict_url = format!("{}{}", base_url, PREDICT_PATH);
        Self {
            base_url,
            predict_url,
        }
    }
}

/// Routes shared by the server and the tests. Expects `web::Data<Upstream>`
/// and `web::Data<Client>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/api/health", web::get().to(health_check))
        .service(web::resource(PREDICT_PATH).route(web::post().to(forward_predict)));
}

/// CORS policy: only `allowed_origin` may call the gateway from a browser.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .max_age(3600)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff"))
}

/// Fallback for every unmatched route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Endpoint not found"))
}

pub fn http_client() -> Client {
    Client::builder().disable_timeout().finish()
}

async fn health_check(upstream: web::Data<Upstream>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(HealthInfo {
        service: "risk-gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: upstream.base_url.clone(),
    }))
}

/// Relays the request body to the prediction service and hands back its
/// status and body untouched. Only a transport failure is answered locally.
async fn forward_predict(
    body: web::Bytes,
    client: web::Data<Client>,
    upstream: web::Data<Upstream>,
) -> HttpResponse {
    let start_time = Instant::now();
    info!(
        "Forwarding prediction request ({} bytes) to {}",
        body.len(),
        upstream.predict_url
    );

    let mut response = match client
        .post(upstream.predict_url.as_str())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .send_body(body)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Prediction service unreachable: {}", e);
            return bad_gateway("Prediction service unavailable", start_time);
        }
    };

    let status = response.status();
    let payload = match response.body().limit(MAX_BODY_BYTES).await {
        Ok(payload) => payload,
        Err(e) => {
            error!("Could not read prediction service response: {}", e);
            return bad_gateway("Invalid response from prediction service", start_time);
        }
    };

    info!(
        "Prediction service answered {} in {} ms",
        status,
        start_time.elapsed().as_millis()
    );

    let mut relayed = HttpResponse::build(status);
    if let Some(content_type) = response.headers().get(header::CONTENT_TYPE) {
        relayed.insert_header((header::CONTENT_TYPE, content_type.clone()));
    }
    relayed.body(payload)
}

fn bad_gateway(message: &str, start_time: Instant) -> HttpResponse {
    let body = ApiResponse::<()>::error(message).elapsed(start_time);
    HttpResponse::BadGateway().json(body)
}
