//! Time Filter MCP Server Library
//!
//! An MCP server exposing time-filter tools for an analytics dashboard. An
//! assistant can list the supported reporting periods, apply a named period
//! to a dashboard tab, or apply an explicit date range. Every tool call
//! answers with a JSON-RPC 2.0 envelope carrying either a result or an error
//! code from a fixed table.
//!
//! # Architecture
//!
//! - **core**: configuration, logging, API key authentication, the server
//!   and its transports (STDIO and HTTP)
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: schemas, validation, the tool registry and dispatcher,
//!     and the time filter tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use timefilter_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env()?)?;
//!     let envelope = server
//!         .call_tool("list_time_periods", serde_json::json!({}))
//!         .await;
//!     println!("{}", envelope.to_value());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{Dispatcher, ErrorCode, ResponseEnvelope, ToolRegistry};
