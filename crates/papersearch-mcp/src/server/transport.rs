//! Streamable HTTP transport.
//!
//! A single `POST /mcp` endpoint carries JSON-RPC; every request is answered
//! inline. No per-session state is kept: `initialize` hands out a session id
//! and later requests simply have theirs echoed back.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::SERVER_NAME;
use super::rpc;
use crate::tools::{McpTool, ToolContext};

/// Session header defined by the Streamable HTTP transport.
pub const SESSION_HEADER: &str = "Mcp-Session-Id";

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
}

/// Create the HTTP router for MCP.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Router {
    let state = Arc::new(HttpState { tools, ctx });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.tools.len()
    }))
}

/// Handle POST requests to /mcp.
async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let req = match rpc::parse_request(&body) {
        Ok(req) => req,
        Err(parse_error) => return (StatusCode::BAD_REQUEST, Json(*parse_error)).into_response(),
    };

    tracing::debug!(method = %req.method, "Handling MCP POST request");

    let session_id = if req.method == "initialize" {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()).ok()
    } else {
        headers.get(SESSION_HEADER).cloned()
    };

    let mut response = match rpc::handle_request(&req, &state.tools, &state.ctx).await {
        Some(rpc_response) => Json(rpc_response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    };

    if let Some(session_id) = session_id {
        response.headers_mut().insert(SESSION_HEADER, session_id);
    }
    response
}
