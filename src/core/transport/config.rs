//! Transport configuration types.

use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
use crate::core::error::Error;
use crate::core::error::Result;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport.
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` picks the transport; anything unrecognised falls back
    /// to the default.
    pub fn from_env() -> Result<Self> {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            #[cfg(feature = "http")]
            "http" => Ok(Self::Http(HttpConfig::from_env()?)),
            _ => Self::default_from_env(),
        }
    }

    #[cfg(feature = "http")]
    fn default_from_env() -> Result<Self> {
        Ok(Self::Http(HttpConfig::from_env()?))
    }

    #[cfg(not(feature = "http"))]
    fn default_from_env() -> Result<Self> {
        Ok(Self::default())
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is STDIO.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

/// Paths served by the HTTP transport itself.
#[cfg(feature = "http")]
const RESERVED_PATHS: [&str; 4] = ["/", "/health", "/tools", "/tools/call"];

#[cfg(feature = "http")]
impl HttpConfig {
    /// Load HTTP settings from `MCP_HTTP_*` variables.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = match std::env::var("MCP_HTTP_PATH") {
            Ok(path) => Self::normalize_rpc_path(&path)?,
            Err(_) => default_rpc_path(),
        };
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            port,
            host,
            rpc_path,
            enable_cors,
        })
    }

    /// Turn a configured JSON-RPC path into one the router accepts.
    ///
    /// A missing leading `/` is added. Paths that clash with the built-in
    /// routes or contain characters outside `[A-Za-z0-9/_.-]` are rejected.
    pub fn normalize_rpc_path(path: &str) -> Result<String> {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::config("MCP_HTTP_PATH must not be empty"));
        }

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        if let Some(c) = path
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-')))
        {
            return Err(Error::config(format!(
                "MCP_HTTP_PATH '{}' contains unsupported character '{}'",
                path, c
            )));
        }

        if RESERVED_PATHS.contains(&path.as_str()) {
            return Err(Error::config(format!(
                "MCP_HTTP_PATH '{}' collides with a built-in route",
                path
            )));
        }

        Ok(path)
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    #[test]
    fn test_http_is_default() {
        let config = TransportConfig::default();
        assert!(!config.is_stdio());
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8080/mcp");
    }

    #[test]
    fn test_http_constructor() {
        match TransportConfig::http(9000, "0.0.0.0") {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.address(), "0.0.0.0:9000");
                assert_eq!(cfg.rpc_path, "/mcp");
                assert!(cfg.enable_cors);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("expected HTTP config"),
        }
    }

    #[test]
    fn test_rpc_path_gets_leading_slash() {
        assert_eq!(HttpConfig::normalize_rpc_path("rpc").unwrap(), "/rpc");
        assert_eq!(HttpConfig::normalize_rpc_path(" /api/mcp ").unwrap(), "/api/mcp");
    }

    #[test]
    fn test_rpc_path_rejects_builtin_routes() {
        for path in ["/tools", "tools", "/tools/call", "/health", "/"] {
            let err = HttpConfig::normalize_rpc_path(path).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{path}");
        }
    }

    #[test]
    fn test_rpc_path_rejects_bad_input() {
        assert!(HttpConfig::normalize_rpc_path("").is_err());
        assert!(HttpConfig::normalize_rpc_path("/{id}").is_err());
        assert!(HttpConfig::normalize_rpc_path("/:id").is_err());
        assert!(HttpConfig::normalize_rpc_path("/a b").is_err());
    }
}
