//! HTTP surface: the Twilio webhook plus status, health, and stats endpoints.

mod handlers;
mod state;

pub use handlers::{health_handler, root_handler, stats_handler, webhook_handler, ROOT_STATUS};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Builds the relay router.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(app_state)
}
