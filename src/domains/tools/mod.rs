//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server:
//! discovery, argument validation, dispatch and the response envelopes
//! returned to callers.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Declarative argument schemas
//! - `validator.rs` - Envelope and argument validation
//! - `handlers.rs` - The `ToolHandler` interface and `ToolOutcome`
//! - `registry.rs` - Ordered registry of tools
//! - `dispatcher.rs` - Lookup, validate, execute, wrap
//! - `envelope.rs` - JSON-RPC response envelopes and error codes
//! - `router.rs` - rmcp ToolRouter for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_builtin_tools()`
//!
//! Both transports pick it up from the registry.

pub mod definitions;
pub mod dispatcher;
pub mod envelope;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schema;
pub mod validator;

pub use dispatcher::{Dispatcher, ToolDescriptor};
pub use envelope::{ErrorCode, ResponseEnvelope, RpcError};
pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use schema::{Constraint, FullPattern, PropertyKind, PropertySchema, SchemaNode};
pub use validator::{
    ToolCallRequest, ValidatedArgs, ValidationError, ValidationResult, parse_tool_call,
    validate_arguments, validate_envelope,
};
