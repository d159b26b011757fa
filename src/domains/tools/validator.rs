//! Request and argument validation.
//!
//! Validation is pure: the same input always yields the same result and
//! nothing here performs I/O.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::envelope::JSONRPC_VERSION;
use super::error::ToolError;
use super::schema::{Constraint, SchemaNode};

/// Reasons an argument object can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("arguments must be an object, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("missing required property '{property}'")]
    Missing { property: String },

    #[error("property '{property}' must be of type {expected}, got {actual}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("property '{property}' must be one of [{}], got '{value}'", .allowed.join(", "))]
    NotAllowed {
        property: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("property '{property}' does not match pattern {pattern}")]
    PatternMismatch { property: String, pattern: String },

    #[error("property '{property}' must be at least {min} character(s) long")]
    TooShort { property: String, min: usize },
}

/// Outcome of argument validation.
pub type ValidationResult = Result<ValidatedArgs, ValidationError>;

/// An argument object that satisfied every constraint of its schema.
///
/// Only declared properties are kept; undeclared keys are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Bind the arguments to a parameter struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// JSON type name of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check the outer shape of an inbound message.
///
/// Rejects an absent request, a `jsonrpc` marker other than the supported
/// version, and a payload with none of `method`, `result` or `error`.
pub fn validate_envelope(request: Option<&Value>) -> Result<(), ToolError> {
    let request = match request {
        Some(Value::Object(obj)) => obj,
        Some(other) => {
            return Err(ToolError::invalid_request(format!(
                "request must be an object, got {}",
                json_type_name(other)
            )));
        }
        None => return Err(ToolError::invalid_request("request is missing")),
    };

    if let Some(version) = request.get("jsonrpc") {
        if version.as_str() != Some(JSONRPC_VERSION) {
            return Err(ToolError::invalid_request(format!(
                "unsupported jsonrpc version {version}, expected \"{JSONRPC_VERSION}\""
            )));
        }
    }

    if !["method", "result", "error"]
        .iter()
        .any(|key| request.contains_key(*key))
    {
        return Err(ToolError::invalid_request(
            "request has no method, result or error",
        ));
    }

    Ok(())
}

/// A tool invocation extracted from a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub name: String,
    pub arguments: Value,
}

/// Extract `{ name, arguments }` from a tool-call body.
pub fn parse_tool_call(params: Option<&Value>) -> Result<ToolCallRequest, ToolError> {
    let params = params
        .and_then(Value::as_object)
        .ok_or_else(|| ToolError::invalid_request("tool call params must be an object"))?;

    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid_request("missing tool name"))?;

    let arguments = params
        .get("arguments")
        .cloned()
        .ok_or_else(|| ToolError::invalid_request("missing tool arguments"))?;

    Ok(ToolCallRequest {
        name: name.to_string(),
        arguments,
    })
}

/// Validate `raw` against `schema`.
///
/// Properties are checked in declaration order and the first failure wins.
pub fn validate_arguments(schema: &SchemaNode, raw: &Value) -> ValidationResult {
    let raw = raw.as_object().ok_or(ValidationError::NotAnObject {
        actual: json_type_name(raw),
    })?;

    let mut validated = Map::new();

    for property in schema.properties() {
        let Some(value) = raw.get(property.name) else {
            if schema.is_required(property.name) {
                return Err(ValidationError::Missing {
                    property: property.name.to_string(),
                });
            }
            continue;
        };

        if !property.kind.matches(value) {
            return Err(ValidationError::TypeMismatch {
                property: property.name.to_string(),
                expected: property.kind.as_str(),
                actual: json_type_name(value),
            });
        }

        for constraint in &property.constraints {
            check_constraint(property.name, constraint, value)?;
        }

        validated.insert(property.name.to_string(), value.clone());
    }

    Ok(ValidatedArgs(validated))
}

fn check_constraint(
    property: &str,
    constraint: &Constraint,
    value: &Value,
) -> Result<(), ValidationError> {
    match constraint {
        Constraint::Enum(allowed) => {
            let matched = value
                .as_str()
                .is_some_and(|s| allowed.iter().any(|a| a == s));
            if !matched {
                return Err(ValidationError::NotAllowed {
                    property: property.to_string(),
                    value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
                    allowed: allowed.clone(),
                });
            }
        }
        Constraint::Pattern(pattern) => {
            let s = value.as_str().unwrap_or_default();
            if !pattern.is_full_match(s) {
                return Err(ValidationError::PatternMismatch {
                    property: property.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }
        Constraint::MinLength(min) => {
            let len = value.as_str().map_or(0, |s| s.chars().count());
            if len < *min {
                return Err(ValidationError::TooShort {
                    property: property.to_string(),
                    min: *min,
                });
            }
        }
    }

    Ok(())
}
