use axum::{extract::State, response::IntoResponse, Form, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use super::AppState;
use crate::core::InboundEvent;
use crate::transport::WebhookForm;

/// `POST /webhook`: runs the event through the handler chain and always acknowledges.
///
/// Processing is inline; Twilio's webhook timeout bounds how long a summary may take.
pub async fn webhook_handler(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<WebhookForm>,
) -> impl IntoResponse {
    let event = InboundEvent::from_webhook(&form, app_state.mode);
    info!(
        sender_id = %event.sender_id,
        sender_name = %event.sender_name,
        conversation_id = ?event.conversation_id,
        text = %event.text,
        "Received message"
    );

    if let Err(e) = app_state.chain.handle(&event).await {
        error!(error = %e, sender_id = %event.sender_id, "Handler chain failed");
    }

    Json(json!({ "status": "received" }))
}

/// Status line reported by `GET /`.
pub const ROOT_STATUS: &str = "WhatsApp Summarizer Bot is running!";

/// `GET /`: liveness and mode.
pub async fn root_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": ROOT_STATUS,
        "mode": app_state.mode.as_str(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /health`: store and cursor counters.
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "mode": app_state.mode.as_str(),
        "total_groups": app_state.store.conversation_count().await,
        "total_messages": app_state.store.total_messages().await,
        "total_users_tracking": app_state.cursors.tracked_users().await,
        "token_limit": app_state.token_limit,
    }))
}

/// `GET /stats`: per-conversation statistics.
pub async fn stats_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "groups": app_state.store.conversation_stats().await,
        "total_users": app_state.cursors.tracked_users().await,
    }))
}
