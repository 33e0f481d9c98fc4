// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{analyze_handler, health_handler, index_handler, metrics_handler};
use super::middleware::{request_id_layers, upload_limit_layer};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let (set_request_id, propagate_request_id) = request_id_layers();
    let upload_limit = upload_limit_layer(config.server.max_upload_bytes());
    let enable_compression = config.performance.enable_compression;

    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(upload_limit);

    if enable_compression {
        app = app.layer(CompressionLayer::new());
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
