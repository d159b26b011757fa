//! Tool dispatcher.
//!
//! Resolves a tool by name, validates its arguments, runs it and turns the
//! result into a [`ResponseEnvelope`]. Executor faults, returned errors and
//! panics alike, stop here and become `INTERNAL_ERROR` envelopes.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{error, info, instrument, warn};

use super::envelope::ResponseEnvelope;
use super::error::ToolError;
use super::handlers::{ToolHandler, ToolOutcome};
use super::registry::ToolRegistry;

/// Discovery entry for one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Map<String, Value>,
}

impl ToolDescriptor {
    fn from_handler(tool: &dyn ToolHandler) -> Self {
        Self {
            name: tool.name(),
            description: tool.description(),
            input_schema: tool.input_schema().to_json(),
        }
    }
}

/// Dispatches tool calls against a read-only registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Discovery entries in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry
            .list()
            .iter()
            .map(|t| ToolDescriptor::from_handler(t.as_ref()))
            .collect()
    }

    /// Listing envelope: `result.tools`.
    pub fn list_tools_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::success(json!({ "tools": self.list_tools() }))
    }

    /// Run a tool and return its outcome or the pipeline error.
    #[instrument(skip_all, fields(tool = %name))]
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let Some(tool) = self.registry.find(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let validated = tool.validate(&arguments).map_err(|e| {
            warn!("Rejected arguments for {}: {}", name, e);
            ToolError::from(e)
        })?;

        info!("Executing tool");

        match AssertUnwindSafe(tool.execute(validated)).catch_unwind().await {
            Ok(Ok(outcome)) => {
                info!(success = outcome.success, "Tool finished");
                Ok(outcome)
            }
            Ok(Err(e)) => {
                error!("Tool {} failed: {}", name, e);
                Err(match e {
                    ToolError::ExecutionFailed(_) | ToolError::Internal(_) => e,
                    other => ToolError::execution_failed(other.to_string()),
                })
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                Err(ToolError::execution_failed(message))
            }
        }
    }

    /// Run a tool and wrap the result in a response envelope.
    ///
    /// Success puts the outcome's JSON text in a single text content block.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> ResponseEnvelope {
        let outcome = self
            .call(name, arguments)
            .await
            .and_then(|outcome| outcome.to_json_text());

        match outcome {
            Ok(text) => ResponseEnvelope::success(json!({
                "content": [{ "type": "text", "text": text }]
            })),
            Err(e) => ResponseEnvelope::error(e.code(), e.to_string(), None),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::SchemaNode;
    use crate::domains::tools::validator::ValidatedArgs;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(ToolRegistry::with_builtin_tools().unwrap()))
    }

    fn outcome_of(envelope: &ResponseEnvelope) -> Value {
        let result = envelope.result().expect("success envelope");
        let content = result["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["type"], "text");
        serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap()
    }

    fn error_code(envelope: &ResponseEnvelope) -> i32 {
        envelope.error_object().expect("error envelope").code
    }

    fn strip_timestamps(value: &mut Value) {
        match value {
            Value::Object(map) => {
                map.remove("timestamp");
                map.values_mut().for_each(strip_timestamps);
            }
            Value::Array(items) => items.iter_mut().for_each(strip_timestamps),
            _ => {}
        }
    }

    struct FaultyTool {
        schema: SchemaNode,
        panics: bool,
    }

    #[async_trait::async_trait]
    impl ToolHandler for FaultyTool {
        fn name(&self) -> &'static str {
            if self.panics { "panicky" } else { "broken" }
        }

        fn description(&self) -> &'static str {
            "Always fails"
        }

        fn input_schema(&self) -> &SchemaNode {
            &self.schema
        }

        async fn execute(&self, _arguments: ValidatedArgs) -> Result<ToolOutcome, ToolError> {
            if self.panics {
                panic!("boom");
            }
            Err(ToolError::internal("disk on fire"))
        }
    }

    fn faulty_dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();
        for panics in [false, true] {
            registry
                .register(Arc::new(FaultyTool {
                    schema: SchemaNode::object(),
                    panics,
                }))
                .unwrap();
        }
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_every_tool_returns_outcome() {
        let dispatcher = dispatcher();
        let cases = [
            (
                "set_time_period",
                json!({ "timePeriodName": "Today", "tabName": "Overview" }),
            ),
            (
                "set_custom_date_range",
                json!({ "startDate": "2024-01-01", "endDate": "2024-01-31", "tabName": "Comparison" }),
            ),
            ("list_time_periods", json!({})),
        ];

        for (name, args) in cases {
            let envelope = dispatcher.dispatch(name, args).await;
            let outcome = outcome_of(&envelope);
            assert!(outcome["success"].is_boolean(), "{name}");
            assert!(outcome["message"].is_string(), "{name}");
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let envelope = dispatcher().dispatch("nonexistent", json!({})).await;
        assert_eq!(error_code(&envelope), -32601);
        assert!(envelope.result().is_none());
    }

    #[tokio::test]
    async fn test_empty_period_name_is_invalid_params() {
        let envelope = dispatcher()
            .dispatch(
                "set_time_period",
                json!({ "timePeriodName": "", "tabName": "Overview" }),
            )
            .await;
        assert_eq!(error_code(&envelope), -32602);
        assert!(
            envelope
                .error_object()
                .unwrap()
                .message
                .contains("timePeriodName")
        );
    }

    #[tokio::test]
    async fn test_missing_argument_is_invalid_params() {
        let envelope = dispatcher()
            .dispatch("set_time_period", json!({ "timePeriodName": "Today" }))
            .await;
        assert_eq!(error_code(&envelope), -32602);
        assert!(envelope.error_object().unwrap().message.contains("tabName"));
    }

    #[tokio::test]
    async fn test_case_insensitive_period_resolution() {
        let envelope = dispatcher()
            .dispatch(
                "set_time_period",
                json!({ "timePeriodName": "last month", "tabName": "Overview" }),
            )
            .await;
        let outcome = outcome_of(&envelope);
        assert_eq!(outcome["success"], true);
        assert_eq!(outcome["filterConfig"]["periodName"], "Last Month");
    }

    #[tokio::test]
    async fn test_start_after_end_is_outcome_failure() {
        let envelope = dispatcher()
            .dispatch(
                "set_custom_date_range",
                json!({ "startDate": "2024-02-01", "endDate": "2024-01-01", "tabName": "Overview" }),
            )
            .await;
        assert!(!envelope.is_error());
        let outcome = outcome_of(&envelope);
        assert_eq!(outcome["success"], false);
        assert_eq!(outcome["message"], "Start date cannot be after end date");
    }

    #[tokio::test]
    async fn test_list_total_count_excludes_custom() {
        let envelope = dispatcher().dispatch("list_time_periods", json!({})).await;
        let outcome = outcome_of(&envelope);
        assert_eq!(outcome["data"]["totalCount"], 18);
    }

    #[tokio::test]
    async fn test_repeat_calls_match_except_timestamps() {
        let dispatcher = dispatcher();
        let args = json!({ "timePeriodName": "This Quarter", "tabName": "Prediction" });

        let mut first = outcome_of(&dispatcher.dispatch("set_time_period", args.clone()).await);
        let mut second = outcome_of(&dispatcher.dispatch("set_time_period", args).await);
        strip_timestamps(&mut first);
        strip_timestamps(&mut second);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_executor_error_is_internal_error() {
        let envelope = faulty_dispatcher().dispatch("broken", json!({})).await;
        assert_eq!(error_code(&envelope), -32603);
        assert!(envelope.error_object().unwrap().message.contains("disk on fire"));
    }

    #[tokio::test]
    async fn test_executor_panic_is_caught() {
        let dispatcher = faulty_dispatcher();
        let envelope = dispatcher.dispatch("panicky", json!({})).await;
        assert_eq!(error_code(&envelope), -32603);
        assert!(envelope.error_object().unwrap().message.contains("boom"));

        // The dispatcher is still usable afterwards.
        let envelope = dispatcher.dispatch("broken", json!({})).await;
        assert_eq!(error_code(&envelope), -32603);
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let dispatcher = dispatcher();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    dispatcher.dispatch("list_time_periods", json!({})).await
                })
            })
            .collect();

        for handle in handles {
            let envelope = handle.await.unwrap();
            assert_eq!(outcome_of(&envelope)["success"], true);
        }
    }

    #[test]
    fn test_list_tools() {
        let tools = dispatcher().list_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["set_time_period", "set_custom_date_range", "list_time_periods"]
        );

        let envelope = dispatcher().list_tools_envelope();
        let listed = &envelope.result().unwrap()["tools"];
        assert_eq!(listed[0]["name"], "set_time_period");
        assert_eq!(listed[0]["inputSchema"]["type"], "object");
        assert!(listed[2]["description"].is_string());
    }
}
