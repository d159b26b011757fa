//! List time periods tool.

use serde_json::{Value, json};
use tracing::info;

use super::catalog::{PERIODS, PeriodCategory};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, ToolOutcome};
use crate::domains::tools::schema::SchemaNode;
use crate::domains::tools::validator::ValidatedArgs;

/// Lists the catalog grouped into calendar, rolling and custom periods.
pub struct ListTimePeriodsTool {
    schema: SchemaNode,
}

impl ListTimePeriodsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_time_periods";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List all available predefined time periods, grouped into calendar, rolling and custom periods.";

    pub fn new() -> Self {
        Self {
            schema: SchemaNode::object(),
        }
    }

    pub fn run() -> ToolOutcome {
        info!("Listing time periods");

        let group = |category: PeriodCategory| -> Vec<Value> {
            PERIODS
                .iter()
                .filter(|p| p.category() == category)
                .map(|p| p.to_listing())
                .collect()
        };

        let calendar = group(PeriodCategory::Calendar);
        let rolling = group(PeriodCategory::Rolling);
        let custom = group(PeriodCategory::Custom);
        let total_count = calendar.len() + rolling.len();

        let message = format!(
            "📅 **Available Time Periods:**\n\n\
             **📅 Calendar Periods:**\n{}\n\n\
             **🔄 Rolling Periods:**\n{}\n\n\
             **⚙️ Custom Periods:**\n{}\n\n\
             **💡 Usage Examples:**\n\
             - \"Set Last Month for Overview tab\"\n\
             - \"Set Last 30 days for Comparison tab\"\n\
             - \"Set custom date range 2024-01-01 to 2024-01-31 for Text Analysis tab\"",
            bullets(&calendar),
            bullets(&rolling),
            bullets(&custom),
        );

        ToolOutcome::success(message).with(
            "data",
            json!({
                "calendarPeriods": calendar,
                "rollingPeriods": rolling,
                "customPeriods": custom,
                "totalCount": total_count,
            }),
        )
    }
}

fn bullets(entries: &[Value]) -> String {
    entries
        .iter()
        .filter_map(|e| e["name"].as_str())
        .map(|name| format!("• {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Default for ListTimePeriodsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListTimePeriodsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> &SchemaNode {
        &self.schema
    }

    async fn execute(&self, _arguments: ValidatedArgs) -> Result<ToolOutcome, ToolError> {
        Ok(Self::run())
    }
}
