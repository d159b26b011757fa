//! Dashboard time filter tools.
//!
//! - `set_time_period`: apply a predefined period to a tab
//! - `set_custom_date_range`: apply an explicit date range to a tab
//! - `list_time_periods`: list the period catalog by category

pub mod catalog;
pub mod filter;
pub mod list_time_periods;
pub mod set_custom_date_range;
pub mod set_time_period;

pub use list_time_periods::ListTimePeriodsTool;
pub use set_custom_date_range::{SetCustomDateRangeParams, SetCustomDateRangeTool};
pub use set_time_period::{SetTimePeriodParams, SetTimePeriodTool};
