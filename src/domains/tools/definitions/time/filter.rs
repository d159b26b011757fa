//! Filter configuration returned by the set-period tools.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Value, json};

use super::catalog::{CUSTOM_SCALE, TimePeriod, filter_target};
use crate::domains::tools::handlers::ToolOutcome;

const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Filter state the dashboard applies to a tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub period_scale: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub tab_name: String,
    pub period_name: String,
    pub is_custom: bool,
    pub timestamp: String,
}

impl FilterConfig {
    pub fn for_period(period: &TimePeriod, tab_name: &str) -> Self {
        Self {
            period_scale: period.scale,
            start_date: None,
            end_date: None,
            tab_name: tab_name.to_string(),
            period_name: period.name.to_string(),
            is_custom: period.is_custom,
            timestamp: now_timestamp(),
        }
    }

    pub fn for_range(start: NaiveDate, end: NaiveDate, tab_name: &str) -> Self {
        Self {
            period_scale: CUSTOM_SCALE,
            start_date: Some(midnight(start)),
            end_date: Some(midnight(end)),
            tab_name: tab_name.to_string(),
            period_name: format!("Custom ({})", range_text(start, end)),
            is_custom: true,
            timestamp: now_timestamp(),
        }
    }
}

/// `"2024-01-01 to 2024-01-31"`.
pub fn range_text(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

fn midnight(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.format(ISO_DATETIME).to_string())
        .unwrap_or_else(|| date.to_string())
}

fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Successful outcome carrying `filterConfig` and the matching UI `action`.
pub fn filter_result(message: String, config: FilterConfig) -> ToolOutcome {
    let data = serde_json::to_value(&config).unwrap_or(Value::Null);
    let action = json!({
        "type": "time_period_changed",
        "target": filter_target(&config.tab_name),
        "data": data,
    });

    ToolOutcome::success(message)
        .with("filterConfig", data)
        .with("action", action)
}
