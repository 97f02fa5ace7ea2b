use super::{ApiError, ApiResult};
use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use sumble_mcp::protocol::JsonRpcRequest;
use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Accept one JSON-RPC message for a session. The response, if any, is
/// queued on the session's event stream before this returns 202.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let session_id = query
        .session_id
        .ok_or_else(|| ApiError::bad_request("Missing sessionId query parameter"))?;

    let sender = state.sessions.sender(&session_id).ok_or_else(|| {
        debug!(session_id = %session_id, "Message for unknown session");
        ApiError::bad_request("Session not found")
    })?;

    let request: JsonRpcRequest = serde_json::from_slice(&body).map_err(|e| {
        ApiError::bad_request("Invalid JSON-RPC message").with_details(e.to_string())
    })?;
    debug!(session_id = %session_id, method = %request.method, "Message received");

    if let Some(response) = state.mcp.handle_request(request).await {
        match sender
            .send_timeout(response, state.transport.delivery_timeout())
            .await
        {
            Ok(()) => {}
            Err(SendTimeoutError::Closed(_)) => {
                debug!(session_id = %session_id, "Session closed before delivery, response dropped");
            }
            Err(SendTimeoutError::Timeout(_)) => {
                warn!(session_id = %session_id, "Session stream is not being read, response dropped");
            }
        }
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "accepted" })),
    ))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": sumble_mcp::server::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len(),
        "tools": state.mcp.registry().len(),
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
