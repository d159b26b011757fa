//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, logging, authentication, server
//! lifecycle management, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod logging;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use security::{ApiKeyAuth, AuthError};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
