pub mod config;
pub mod models;
pub mod proxy;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use config::GatewayConfig;
use log::info;
use proxy::Upstream;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let config = GatewayConfig::from_env();
    let upstream = web::Data::new(Upstream::new(&config.upstream_url));
    let bind_address = config.bind_address();

    info!("🚀 Starting maternal health risk gateway");
    info!("🌐 Listening on: http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    info!("🔁 Upstream prediction service: {}", upstream.predict_url);
    info!("🔧 Endpoints:");
    info!("   GET  /api/health  - Health check");
    info!("   POST /predict     - Forwarded to the prediction service");

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(proxy::security_headers())
            .wrap(proxy::cors(&allowed_origin))
            .app_data(upstream.clone())
            // awc clients are per-worker; they are not Send.
            .app_data(web::Data::new(proxy::http_client()))
            .configure(proxy::configure)
            .default_service(web::route().to(proxy::not_found))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
