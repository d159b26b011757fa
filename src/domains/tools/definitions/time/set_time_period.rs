//! Set predefined time period tool.
//!
//! Applies one of the catalog periods to a dashboard tab.

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::catalog::{DASHBOARD_TABS, resolve_period, selectable_period_names};
use super::filter::{FilterConfig, filter_result};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, ToolOutcome};
use crate::domains::tools::schema::{PropertySchema, SchemaNode};
use crate::domains::tools::validator::ValidatedArgs;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the set time period tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTimePeriodParams {
    /// Name of the period, matched case-insensitively.
    pub time_period_name: String,

    /// Dashboard tab to apply the filter to.
    pub tab_name: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Set time period tool - resolves a period name and builds the filter.
pub struct SetTimePeriodTool {
    schema: SchemaNode,
}

impl SetTimePeriodTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "set_time_period";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Set a predefined time period (e.g. 'Last Month', 'Last 30 days') as the time filter for a dashboard tab. Period names are matched case-insensitively.";

    pub fn new() -> Self {
        let schema = SchemaNode::object()
            .required(
                PropertySchema::string(
                    "timePeriodName",
                    "Name of the predefined time period, e.g. 'Last Month'",
                )
                .min_length(1),
            )
            .required(
                PropertySchema::string("tabName", "Dashboard tab to apply the filter to")
                    .one_of(DASHBOARD_TABS.iter().copied()),
            );

        Self { schema }
    }

    /// Execute the tool logic.
    pub fn run(params: &SetTimePeriodParams) -> ToolOutcome {
        info!(
            "Setting time period '{}' for tab {}",
            params.time_period_name, params.tab_name
        );

        let Some(period) = resolve_period(&params.time_period_name) else {
            warn!("No time period matches '{}'", params.time_period_name);
            return ToolOutcome::failure(format!(
                "Time period '{}' not found. Available periods: {}",
                params.time_period_name,
                selectable_period_names().join(", ")
            ))
            .with("availablePeriods", json!(selectable_period_names()));
        };

        let config = FilterConfig::for_period(period, &params.tab_name);

        filter_result(
            format!(
                "✅ Successfully set time filter to '{}' for {} tab.",
                period.name, params.tab_name
            ),
            config,
        )
    }
}

impl Default for SetTimePeriodTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for SetTimePeriodTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> &SchemaNode {
        &self.schema
    }

    async fn execute(&self, arguments: ValidatedArgs) -> Result<ToolOutcome, ToolError> {
        let params: SetTimePeriodParams = arguments.parse()?;
        Ok(Self::run(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================
