//! visprompt web server
//!
//! Axum-based server for the upload page, its JSON API and live updates.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use visprompt_core::AnalysisClient;

use state::AppState;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/state", get(routes::session::get_state))
        .route("/image", post(routes::session::upload_image))
        .route("/analyze", post(routes::session::analyze))
        .route("/copy", post(routes::session::copy))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::page::index))
        .route("/health", get(routes::session::health))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(client: Arc<dyn AnalysisClient>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(client);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
