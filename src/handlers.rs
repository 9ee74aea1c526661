use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::{info, warn};

use crate::address::resolve_sender;
use crate::bulk::send_bulk;
use crate::error::AppError;
use crate::gateway::MessageGateway;
use crate::types::{HealthResponse, MessageRequest, SendResponse};

pub struct AppState {
    pub gateway: Arc<dyn MessageGateway>,
    pub use_sandbox: bool,
}

pub async fn send_bulk_whatsapp(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate(state.use_sandbox).map_err(AppError::Invalid)?;

    let from = resolve_sender(&req.sender, state.use_sandbox);
    info!("Sending to {} recipients from {}", req.recipients.len(), from);

    // Detached so a dropped connection doesn't cut the loop short.
    let gateway = state.gateway.clone();
    let outcome = tokio::spawn(async move {
        send_bulk(gateway.as_ref(), &req.message, &from, &req.recipients).await
    })
    .await?
    .map_err(|e| {
        warn!(
            "Bulk send aborted at {}; {} earlier recipient(s) already received it",
            e.recipient, e.delivered
        );
        e
    })?;

    info!("Bulk send finished: {} delivered", outcome.sent);

    Ok((
        StatusCode::OK,
        Json(SendResponse {
            status: "success".to_string(),
            detail: "Messages sent successfully!".to_string(),
        }),
    ))
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mode = if state.use_sandbox {
        "sandbox"
    } else {
        "production"
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: mode.to_string(),
    })
}
