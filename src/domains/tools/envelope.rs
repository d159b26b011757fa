//! JSON-RPC response envelopes.
//!
//! Every reply leaving the server, success or failure, is a
//! [`ResponseEnvelope`]. The body is an enum so an envelope carries exactly
//! one of `result` or `error`, never both and never neither.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version marker.
pub const JSONRPC_VERSION: &str = "2.0";

/// Symbolic error codes and their fixed numeric wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    NotFound,
    Unauthorized,
    Forbidden,
    Timeout,
}

impl ErrorCode {
    const TABLE: [(ErrorCode, &'static str, i32); 9] = [
        (ErrorCode::ParseError, "PARSE_ERROR", -32700),
        (ErrorCode::InvalidRequest, "INVALID_REQUEST", -32600),
        (ErrorCode::MethodNotFound, "METHOD_NOT_FOUND", -32601),
        (ErrorCode::InvalidParams, "INVALID_PARAMS", -32602),
        (ErrorCode::InternalError, "INTERNAL_ERROR", -32603),
        (ErrorCode::NotFound, "NOT_FOUND", -32000),
        (ErrorCode::Unauthorized, "UNAUTHORIZED", -32001),
        (ErrorCode::Forbidden, "FORBIDDEN", -32002),
        (ErrorCode::Timeout, "TIMEOUT", -32003),
    ];

    /// Numeric code sent on the wire.
    pub fn numeric(self) -> i32 {
        Self::TABLE
            .iter()
            .find(|(code, _, _)| *code == self)
            .map(|(_, _, value)| *value)
            .unwrap_or(-32000)
    }

    /// Symbolic name, e.g. `"METHOD_NOT_FOUND"`.
    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(code, _, _)| *code == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("NOT_FOUND")
    }

    /// Look up a code by symbolic name. Unknown names fall back to `NOT_FOUND`.
    pub fn from_name(name: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(code, _, _)| *code)
            .unwrap_or(ErrorCode::NotFound)
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Either side of an envelope. Flattened into the envelope object as a
/// `result` or `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeBody {
    Result(Value),
    Error(RpcError),
}

/// A complete JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub body: EnvelopeBody,
}

impl ResponseEnvelope {
    fn new(body: EnvelopeBody) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Value::String(uuid::Uuid::new_v4().to_string()),
            body,
        }
    }

    /// Build a success envelope around `result`.
    pub fn success(result: Value) -> Self {
        Self::new(EnvelopeBody::Result(result))
    }

    /// Build an error envelope.
    pub fn error(code: ErrorCode, message: impl Into<String>, data: Option<Value>) -> Self {
        Self::new(EnvelopeBody::Error(RpcError {
            code: code.numeric(),
            message: message.into(),
            data,
        }))
    }

    /// Build an error envelope from a symbolic code name.
    pub fn error_named(code_name: &str, message: impl Into<String>, data: Option<Value>) -> Self {
        Self::error(ErrorCode::from_name(code_name), message, data)
    }

    /// Replace the generated correlation id, e.g. with a client-supplied one.
    pub fn with_id(mut self, id: Value) -> Self {
        self.id = id;
        self
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.body {
            EnvelopeBody::Result(result) => Some(result),
            EnvelopeBody::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&RpcError> {
        match &self.body {
            EnvelopeBody::Result(_) => None,
            EnvelopeBody::Error(error) => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, EnvelopeBody::Error(_))
    }

    /// Serialize to a JSON value. Envelope serialization cannot fail.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
