//! Tool handler interface.
//!
//! Every tool is a value implementing [`ToolHandler`]. The registry stores
//! them as trait objects and the dispatcher drives them through
//! validate-then-execute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ToolError;
use super::schema::SchemaNode;
use super::validator::{ValidatedArgs, ValidationResult, validate_arguments};

/// Result of running a tool.
///
/// `success: false` is a business-level failure: the request was accepted
/// but the operation could not proceed. Extra fields in `payload` are
/// flattened into the serialized object next to `success` and `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolOutcome {
    /// Create a successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Map::new(),
        }
    }

    /// Create a failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload field.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Serialize to the JSON text placed in a response content block.
    pub fn to_json_text(&self) -> Result<String, ToolError> {
        serde_json::to_string(self).map_err(|e| ToolError::internal(e.to_string()))
    }
}

/// A callable tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique name the tool is registered and invoked under.
    fn name(&self) -> &'static str;

    /// Human-readable description shown to clients.
    fn description(&self) -> &'static str;

    /// Declared argument schema.
    fn input_schema(&self) -> &SchemaNode;

    /// Check raw arguments against the declared schema.
    fn validate(&self, arguments: &Value) -> ValidationResult {
        validate_arguments(self.input_schema(), arguments)
    }

    /// Run the tool on validated arguments.
    ///
    /// Business failures are `Ok` outcomes with `success: false`. An `Err`
    /// means the tool itself broke.
    async fn execute(&self, arguments: ValidatedArgs) -> Result<ToolOutcome, ToolError>;
}
