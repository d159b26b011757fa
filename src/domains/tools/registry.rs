//! Tool Registry - ordered, name-keyed collection of tools.
//!
//! Registration order is kept and is the order tools are advertised in.
//! The registry is filled once at startup and only read afterwards, so it
//! can be shared behind an `Arc` without locking.

use std::sync::Arc;

use tracing::debug;

use super::definitions::{ListTimePeriodsTool, SetCustomDateRangeTool, SetTimePeriodTool};
use super::error::ToolError;
use super::handlers::ToolHandler;

/// Tool registry - manages all available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool.
    pub fn with_builtin_tools() -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(Arc::new(SetTimePeriodTool::new()))?;
        registry.register(Arc::new(SetCustomDateRangeTool::new()))?;
        registry.register(Arc::new(ListTimePeriodsTool::new()))?;
        Ok(registry)
    }

    /// Add a tool. Fails without touching the registry if the name is taken.
    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        if self.find(tool.name()).is_some() {
            return Err(ToolError::DuplicateName(tool.name().to_string()));
        }

        debug!("Registered tool: {}", tool.name());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by exact name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[Arc<dyn ToolHandler>] {
        &self.tools
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::handlers::ToolOutcome;
    use crate::domains::tools::schema::SchemaNode;
    use crate::domains::tools::validator::ValidatedArgs;

    struct FixedTool {
        name: &'static str,
        description: &'static str,
        schema: SchemaNode,
    }

    impl FixedTool {
        fn new(name: &'static str, description: &'static str) -> Self {
            Self {
                name,
                description,
                schema: SchemaNode::object(),
            }
        }
    }

    #[async_trait::async_trait]
    impl ToolHandler for FixedTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            self.description
        }

        fn input_schema(&self) -> &SchemaNode {
            &self.schema
        }

        async fn execute(&self, _arguments: ValidatedArgs) -> Result<ToolOutcome, ToolError> {
            Ok(ToolOutcome::success(self.description))
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        assert_eq!(
            registry.tool_names(),
            vec!["set_time_period", "set_custom_date_range", "list_time_periods"]
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_find() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        assert!(registry.find("list_time_periods").is_some());
        assert!(registry.find("List_Time_Periods").is_none());
        assert!(registry.find("unknown").is_none());
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        for name in ["zeta", "alpha", "mid"] {
            registry.register(Arc::new(FixedTool::new(name, "x"))).unwrap();
        }

        let names: Vec<_> = registry.list().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(FixedTool::new("echo", "first")))
            .unwrap();

        let err = registry
            .register(Arc::new(FixedTool::new("echo", "second")))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateName(ref n) if n == "echo"));

        // The original entry is untouched.
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("echo").unwrap().description(), "first");

        // And the failure repeats deterministically.
        assert!(
            registry
                .register(Arc::new(FixedTool::new("echo", "third")))
                .is_err()
        );
        assert_eq!(registry.len(), 1);
    }
}
