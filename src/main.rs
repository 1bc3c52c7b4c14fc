use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tripledger::api::handlers::api_routes;
use tripledger::api::openapi::ApiDoc;
use tripledger::config::CONFIG;
use tripledger::core::services::TripLedgerService;
use tripledger::infrastructure::logging::in_memory::InMemoryLogging;
use tripledger::infrastructure::storage::in_memory::InMemoryStorage;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Initialize storage and logging
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let service = Arc::new(TripLedgerService::new(storage, logging));

    let app = api_routes(service)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
