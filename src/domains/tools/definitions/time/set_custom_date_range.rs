//! Set custom date range tool.
//!
//! Applies an explicit start/end date range to a dashboard tab.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{info, warn};

use super::catalog::DASHBOARD_TABS;
use super::filter::{FilterConfig, filter_result, range_text};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{ToolHandler, ToolOutcome};
use crate::domains::tools::schema::{FullPattern, PropertySchema, SchemaNode};
use crate::domains::tools::validator::ValidatedArgs;

static ISO_DATE: LazyLock<FullPattern> = LazyLock::new(|| {
    FullPattern::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid")
});

/// Parameters for the custom date range tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomDateRangeParams {
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,

    /// End date, `YYYY-MM-DD`.
    pub end_date: String,

    /// Dashboard tab to apply the filter to.
    pub tab_name: String,
}

/// Custom date range tool.
pub struct SetCustomDateRangeTool {
    schema: SchemaNode,
}

impl SetCustomDateRangeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "set_custom_date_range";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Set a custom date range (YYYY-MM-DD start and end dates) as the time filter for a dashboard tab. The end date may not be in the future.";

    pub fn new() -> Self {
        let schema = SchemaNode::object()
            .required(
                PropertySchema::string("startDate", "Start date in YYYY-MM-DD format")
                    .pattern(ISO_DATE.clone()),
            )
            .required(
                PropertySchema::string("endDate", "End date in YYYY-MM-DD format")
                    .pattern(ISO_DATE.clone()),
            )
            .required(
                PropertySchema::string("tabName", "Dashboard tab to apply the filter to")
                    .one_of(DASHBOARD_TABS.iter().copied()),
            );

        Self { schema }
    }

    /// Execute the tool logic against the given current date.
    pub fn run(params: &SetCustomDateRangeParams, today: NaiveDate) -> ToolOutcome {
        info!(
            "Setting custom range {} to {} for tab {}",
            params.start_date, params.end_date, params.tab_name
        );

        let parsed = NaiveDate::parse_from_str(&params.start_date, "%Y-%m-%d").and_then(|start| {
            NaiveDate::parse_from_str(&params.end_date, "%Y-%m-%d").map(|end| (start, end))
        });

        let (start, end) = match parsed {
            Ok(dates) => dates,
            Err(e) => {
                warn!("Unparseable date in custom range: {}", e);
                return ToolOutcome::failure(format!(
                    "Invalid date format. Use YYYY-MM-DD format. Error: {}",
                    e
                ));
            }
        };

        if start > end {
            return ToolOutcome::failure("Start date cannot be after end date");
        }

        if end > today {
            return ToolOutcome::failure("End date cannot be in the future");
        }

        let config = FilterConfig::for_range(start, end, &params.tab_name);

        filter_result(
            format!(
                "✅ Successfully set custom date range '{}' for {} tab.",
                range_text(start, end),
                params.tab_name
            ),
            config,
        )
    }
}

impl Default for SetCustomDateRangeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for SetCustomDateRangeTool {
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
        let params: SetCustomDateRangeParams = arguments.parse()?;
        Ok(Self::run(&params, Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(start: &str, end: &str) -> SetCustomDateRangeParams {
        SetCustomDateRangeParams {
            start_date: start.to_string(),
            end_date: end.to_string(),
            tab_name: "Customer Journey".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_valid_range() {
        let outcome = SetCustomDateRangeTool::run(&params("2024-01-01", "2024-01-31"), today());
        assert!(outcome.success);
        assert_eq!(
            outcome.message,
            "✅ Successfully set custom date range '2024-01-01 to 2024-01-31' for Customer Journey tab."
        );

        let config = &outcome.payload["filterConfig"];
        assert_eq!(config["periodScale"], 100);
        assert_eq!(config["isCustom"], true);
        assert_eq!(config["startDate"], "2024-01-01T00:00:00");
        assert_eq!(outcome.payload["action"]["target"], "filter-customer-journey");
    }

    #[test]
    fn test_single_day_range_ending_today() {
        let outcome = SetCustomDateRangeTool::run(&params("2024-06-15", "2024-06-15"), today());
        assert!(outcome.success);
    }

    #[test]
    fn test_start_after_end() {
        let outcome = SetCustomDateRangeTool::run(&params("2024-02-01", "2024-01-01"), today());
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Start date cannot be after end date");
    }

    #[test]
    fn test_future_end_date() {
        let outcome = SetCustomDateRangeTool::run(&params("2024-06-01", "2024-06-16"), today());
        assert!(!outcome.success);
        assert_eq!(outcome.message, "End date cannot be in the future");
    }

    #[test]
    fn test_impossible_calendar_date() {
        let outcome = SetCustomDateRangeTool::run(&params("2023-02-30", "2023-03-01"), today());
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Invalid date format"));
    }

    #[test]
    fn test_schema_requires_iso_dates() {
        let tool = SetCustomDateRangeTool::new();
        let args = json!({ "startDate": "01/02/2024", "endDate": "2024-01-31", "tabName": "Overview" });
        assert!(tool.validate(&args).is_err());

        let args = json!({ "startDate": "2024-01-01", "endDate": "2024-01-31", "tabName": "Overview" });
        assert!(tool.validate(&args).is_ok());
    }

    #[test]
    fn test_execute_far_future_fails_outcome() {
        let tool = SetCustomDateRangeTool::new();
        let args = tool
            .validate(&json!({ "startDate": "2024-01-01", "endDate": "2999-12-31", "tabName": "Overview" }))
            .unwrap();
        let outcome = tokio_test::block_on(tool.execute(args)).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "End date cannot be in the future");
    }
}
