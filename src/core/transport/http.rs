//! HTTP transport implementation.
//!
//! Routes:
//! - `POST {rpc_path}`: JSON-RPC protocol endpoint (`initialize`, `ping`,
//!   `tools/list`, `tools/call`, notifications)
//! - `GET /tools`: tool listing envelope
//! - `POST /tools/call`: `{ name, arguments }` tool call envelope
//! - `GET /health`, `GET /`: unauthenticated status endpoints
//!
//! The first three sit behind the API key check when a key is configured.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde_json::{Value, json};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::security::ApiKeyAuth;
use crate::core::server::INSTRUCTIONS;
use crate::domains::tools::{ErrorCode, ResponseEnvelope, parse_tool_call, validate_envelope};

/// MCP protocol revision announced on initialize.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
    auth: Option<ApiKeyAuth>,
}

/// Application state shared across HTTP handlers.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    auth: Option<Arc<ApiKeyAuth>>,
    rpc_path: Arc<str>,
}

impl HttpTransport {
    /// Create a new HTTP transport. `auth` of `None` disables the key check.
    pub fn new(config: HttpConfig, auth: Option<ApiKeyAuth>) -> Self {
        Self { config, auth }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the axum router for this transport.
    pub fn router(&self, server: McpServer) -> Router {
        build_router(&self.config, server, self.auth.clone())
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {}, auth {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" },
            if self.auth.is_some() { "enabled" } else { "disabled" },
        );
        info!("  → JSON-RPC:  POST {}", self.config.rpc_path);
        info!("  → Tools:     GET /tools, POST /tools/call");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router: protected protocol routes plus public status routes.
pub fn build_router(config: &HttpConfig, server: McpServer, auth: Option<ApiKeyAuth>) -> Router {
    let state = AppState {
        server,
        auth: auth.map(Arc::new),
        rpc_path: Arc::from(config.rpc_path.as_str()),
    };

    let protected = Router::new()
        .route(&config.rpc_path, post(handle_rpc))
        .route("/tools", get(handle_list_tools))
        .route("/tools/call", post(handle_call_tool))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .merge(protected)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin);
        app = app.layer(cors);
    }

    app
}

// ============================================================================
// Middleware
// ============================================================================

/// Reject requests without a valid API key when one is configured.
async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(auth) = state.auth.as_ref() else {
        return next.run(request).await;
    };

    let authorization = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth.authenticate(authorization) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            warn!("Rejected request to {}: {}", request.uri().path(), e);
            let envelope = ResponseEnvelope::error(ErrorCode::Unauthorized, e.to_string(), None);
            (StatusCode::UNAUTHORIZED, Json(envelope)).into_response()
        }
    }
}

/// Turn a handler panic into a generic INTERNAL_ERROR envelope.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("HTTP handler panicked: {}", detail);

    let envelope = ResponseEnvelope::error(ErrorCode::InternalError, "Internal server error", None);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": &*state.rpc_path,
            "tools": "/tools",
            "call": "/tools/call",
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "authentication": state.auth.is_some(),
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `GET /tools`.
async fn handle_list_tools(State(state): State<AppState>) -> Response {
    info!("Listing tools");
    reply(state.server.dispatcher().list_tools_envelope())
}

/// `POST /tools/call`.
async fn handle_call_tool(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_body(&body) {
        Ok(request) => request,
        Err(envelope) => return reply(envelope),
    };

    match parse_tool_call(Some(&request)) {
        Ok(call) => {
            info!("Calling tool {}", call.name);
            reply(state.server.call_tool(&call.name, call.arguments).await)
        }
        Err(e) => reply(ResponseEnvelope::error(e.code(), e.to_string(), None)),
    }
}

/// `POST {rpc_path}`: JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_body(&body) {
        Ok(request) => request,
        Err(envelope) => return reply(envelope),
    };

    let request_id = request.get("id").filter(|id| !id.is_null()).cloned();
    let correlate = |envelope: ResponseEnvelope| match &request_id {
        Some(id) => envelope.with_id(id.clone()),
        None => envelope,
    };

    if let Err(e) = validate_envelope(Some(&request)) {
        warn!("Rejected JSON-RPC message: {}", e);
        return reply(correlate(ResponseEnvelope::error(e.code(), e.to_string(), None)));
    }

    let method = match request.get("method") {
        Some(Value::String(method)) => method.as_str(),
        Some(_) => {
            return reply(correlate(ResponseEnvelope::error(
                ErrorCode::InvalidRequest,
                "method must be a string",
                None,
            )));
        }
        // A reply-shaped message (result or error); nothing to answer.
        None => return StatusCode::ACCEPTED.into_response(),
    };

    tracing::Span::current().record("method", method);
    info!("Received JSON-RPC request: {}", method);

    if method.starts_with("notifications/") {
        info!("Received notification: {}", method);
        return StatusCode::ACCEPTED.into_response();
    }

    let envelope = match method {
        "initialize" => ResponseEnvelope::success(initialize_result(&state.server)),
        "ping" => ResponseEnvelope::success(json!({})),
        "tools/list" => state.server.dispatcher().list_tools_envelope(),
        "tools/call" => match parse_tool_call(request.get("params")) {
            Ok(call) => state.server.call_tool(&call.name, call.arguments).await,
            Err(e) => ResponseEnvelope::error(e.code(), e.to_string(), None),
        },
        _ => {
            warn!("Unknown method: {}", method);
            ResponseEnvelope::error(
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", method),
                None,
            )
        }
    };

    reply(correlate(envelope))
}

fn initialize_result(server: &McpServer) -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": INSTRUCTIONS
    })
}

fn parse_body(body: &Bytes) -> Result<Value, ResponseEnvelope> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Unparseable request body: {}", e);
        ResponseEnvelope::error(ErrorCode::ParseError, format!("Parse error: {}", e), None)
    })
}

fn reply(envelope: ResponseEnvelope) -> Response {
    (StatusCode::OK, Json(envelope)).into_response()
}

// ============================================================================
// Tests
// ============================================================================
