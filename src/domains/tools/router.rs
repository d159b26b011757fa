//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Used by the STDIO transport. Each registered tool gets one route, and
//! every route goes through the shared [`Dispatcher`] so validation and
//! fault handling match the HTTP transport exactly.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, ErrorCode, JsonObject, Tool},
};
use serde_json::Value;

use super::dispatcher::Dispatcher;
use super::error::ToolError;
use super::handlers::ToolHandler;

/// Build the rmcp Tool model (metadata) for a handler.
pub fn to_tool(handler: &dyn ToolHandler) -> Tool {
    Tool {
        name: handler.name().into(),
        description: Some(handler.description().into()),
        input_schema: Arc::new(handler.input_schema().to_json()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Map a pipeline error onto an rmcp error with the same wire code.
pub fn to_mcp_error(error: &ToolError) -> McpError {
    McpError::new(ErrorCode(error.code().numeric()), error.to_string(), None)
}

/// Run one tool call for an rmcp route.
///
/// The outcome becomes a single text content block; pipeline errors keep
/// their wire code.
pub async fn call_route(
    dispatcher: &Dispatcher,
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let outcome = dispatcher
        .call(name, Value::Object(arguments.unwrap_or_default()))
        .await
        .and_then(|outcome| outcome.to_json_text())
        .map_err(|e| to_mcp_error(&e))?;

    Ok(CallToolResult::success(vec![Content::text(outcome)]))
}

fn create_route<S>(handler: &dyn ToolHandler, dispatcher: Dispatcher) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = handler.name();

    ToolRoute::new_dyn(to_tool(handler), move |ctx: ToolCallContext<'_, S>| {
        let arguments = ctx.arguments.clone();
        let dispatcher = dispatcher.clone();
        async move { call_route(&dispatcher, name, arguments).await }.boxed()
    })
}

/// Build the tool router with all registered tools, in registration order.
pub fn build_tool_router<S>(dispatcher: &Dispatcher) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .registry()
        .list()
        .iter()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool.as_ref(), dispatcher.clone()))
        })
}
