//! Transport layer for the MCP server.
//!
//! - **HTTP**: JSON-RPC over POST plus REST-style tool endpoints - feature: `http`
//! - **STDIO**: Standard input/output via rmcp - feature: `stdio`
//!
//! Both transports resolve tool calls through the same dispatcher.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
