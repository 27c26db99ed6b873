use std::sync::Arc;

use tower_http::cors::CorsLayer;

use gridtactics_backend::api;
use gridtactics_backend::config::Config;
use gridtactics_backend::db::Database;
use gridtactics_backend::llm::LlmClient;
use gridtactics_backend::metrics;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    metrics::register_metrics();

    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to initialize database");
    let db = Arc::new(db);

    if config.llm_api_key.is_empty() {
        tracing::warn!("LLM_API_KEY is not set; decision calls will fail and sessions will receive no orders");
    }
    let decision = Arc::new(LlmClient::new(&config));

    // The game client is served from another origin.
    let app = api::router(db, decision).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to port {}: {e}", config.port));

    tracing::info!("Grid Tactics backend listening on port {}", config.port);
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
