//! Tool-specific error types.

use thiserror::Error;

use super::envelope::ErrorCode;
use super::validator::ValidationError;

/// Errors that can occur while resolving, validating or executing a tool.
///
/// Every variant maps onto exactly one wire [`ErrorCode`] via [`ToolError::code`].
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateName(String),

    /// The request envelope was malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Arguments failed schema validation.
    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationError),

    /// Arguments passed validation but could not be bound to the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid request" error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The wire error code this error is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::MethodNotFound,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::Validation(_) | Self::InvalidArguments(_) => ErrorCode::InvalidParams,
            Self::DuplicateName(_) | Self::ExecutionFailed(_) | Self::Internal(_) => {
                ErrorCode::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::not_found("x").code().numeric(), -32601);
        assert_eq!(ToolError::invalid_request("x").code().numeric(), -32600);
        assert_eq!(ToolError::invalid_arguments("x").code().numeric(), -32602);
        assert_eq!(ToolError::execution_failed("x").code().numeric(), -32603);
        assert_eq!(ToolError::internal("x").code().numeric(), -32603);
    }

    #[test]
    fn test_validation_error_maps_to_invalid_params() {
        let err: ToolError = ValidationError::Missing {
            property: "tabName".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidParams);
        assert!(err.to_string().contains("tabName"));
    }
}
