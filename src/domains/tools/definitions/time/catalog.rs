//! Predefined time periods and dashboard tabs.

use serde::Serialize;
use serde_json::{Value, json};

/// A named period the dashboard filter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub name: &'static str,
    pub scale: u32,
    pub is_custom: bool,
}

const fn period(name: &'static str, scale: u32) -> TimePeriod {
    TimePeriod {
        name,
        scale,
        is_custom: false,
    }
}

/// Scale code of the custom date range entry.
pub const CUSTOM_SCALE: u32 = 100;

/// Every period, in the order they are matched and listed.
pub const PERIODS: &[TimePeriod] = &[
    period("All Time", 0),
    period("Today", 5),
    period("Yesterday", 80),
    period("Last 24 hours", 10),
    period("This Week", 15),
    period("Last Week", 25),
    period("Last 7 days", 20),
    period("Last 14 days", 85),
    period("This Month", 30),
    period("Last Month", 35),
    period("Last 30 days", 50),
    period("This Quarter", 40),
    period("Last Quarter", 45),
    period("Last 90 days", 55),
    period("Last 180 days", 60),
    period("This Year", 65),
    period("Last Year", 75),
    period("Last 12 Months", 70),
    TimePeriod {
        name: "Custom",
        scale: CUSTOM_SCALE,
        is_custom: true,
    },
];

/// Tabs a filter can be applied to.
pub const DASHBOARD_TABS: &[&str] = &[
    "Overview",
    "Comparison",
    "Prediction",
    "Text Analysis",
    "Customer Journey",
];

/// How a period is grouped in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeriodCategory {
    Calendar,
    Rolling,
    Custom,
}

impl TimePeriod {
    /// Calendar periods name a calendar unit ("This ...", "Last Month");
    /// rolling periods count back a fixed span ("Last 7 days").
    pub fn category(&self) -> PeriodCategory {
        if self.is_custom {
            PeriodCategory::Custom
        } else if self.name.contains("This")
            || (self.name.contains("Last")
                && !self.name.contains("days")
                && !self.name.contains("hours"))
        {
            PeriodCategory::Calendar
        } else {
            PeriodCategory::Rolling
        }
    }

    /// Listing entry: `{name, scale, isCustom, category}`.
    pub fn to_listing(&self) -> Value {
        json!({
            "name": self.name,
            "scale": self.scale,
            "isCustom": self.is_custom,
            "category": self.category(),
        })
    }
}

/// Resolve free text to a period.
///
/// Case-insensitive containment in either direction; the first period in
/// declared order wins. Blank input never matches.
pub fn resolve_period(input: &str) -> Option<&'static TimePeriod> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    PERIODS.iter().find(|p| {
        let name = p.name.to_lowercase();
        needle.contains(&name) || name.contains(&needle)
    })
}

/// Names of all non-custom periods, for error messages.
pub fn selectable_period_names() -> Vec<&'static str> {
    PERIODS
        .iter()
        .filter(|p| !p.is_custom)
        .map(|p| p.name)
        .collect()
}

/// DOM target id of a tab's filter, e.g. `filter-text-analysis`.
pub fn filter_target(tab_name: &str) -> String {
    format!("filter-{}", tab_name.to_lowercase().replace(' ', "-"))
}
