//! MCP Server implementation.
//!
//! [`McpServer`] owns the tool registry (through its [`Dispatcher`]) and
//! implements rmcp's `ServerHandler` for the STDIO transport. The HTTP
//! transport calls the dispatcher directly through the helper methods.

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::tools::{
    Dispatcher, ResponseEnvelope, ToolDescriptor, ToolRegistry, build_tool_router,
};

/// Instructions sent to clients on initialize.
pub const INSTRUCTIONS: &str = "Time filter tools for the CX dashboard. Use list_time_periods to discover period names, set_time_period to apply one to a tab, and set_custom_date_range for explicit YYYY-MM-DD ranges.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the read-only tool registry.
    dispatcher: Dispatcher,

    /// Tool router for the STDIO transport.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools registered.
    pub fn new(config: Config) -> CoreResult<Self> {
        Self::with_registry(config, ToolRegistry::with_builtin_tools()?)
    }

    /// Create a server around a prepared registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> CoreResult<Self> {
        let dispatcher = Dispatcher::new(Arc::new(registry));
        info!(
            "Registered {} tools: {}",
            dispatcher.registry().len(),
            dispatcher.registry().tool_names().join(", ")
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(&dispatcher),
            config: Arc::new(config),
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.dispatcher.list_tools()
    }

    /// Call a tool by name, producing a complete response envelope.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ResponseEnvelope {
        self.dispatcher.dispatch(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_lists_builtin_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let names: Vec<_> = server.list_tools().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["set_time_period", "set_custom_date_range", "list_time_periods"]
        );
        assert_eq!(server.name(), "timefilter-mcp-server");
    }

    #[test]
    fn test_get_info_enables_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.instructions.as_deref(), Some(INSTRUCTIONS));
    }

    #[test]
    fn test_handler_router_matches_registry() {
        let server = McpServer::new(Config::default()).unwrap();
        let routed: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();

        assert_eq!(routed.len(), server.dispatcher().registry().len());
        for name in server.dispatcher().registry().tool_names() {
            assert!(routed.iter().any(|r| r == name), "{name}");
        }
    }

    #[tokio::test]
    async fn test_call_tool() {
        let server = McpServer::new(Config::default()).unwrap();
        let envelope = server.call_tool("list_time_periods", json!({})).await;
        assert!(!envelope.is_error());

        let envelope = server.call_tool("nope", json!({})).await;
        assert_eq!(envelope.error_object().unwrap().code, -32601);
    }
}
