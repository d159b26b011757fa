//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod time;

pub use time::{
    ListTimePeriodsTool, SetCustomDateRangeParams, SetCustomDateRangeTool, SetTimePeriodParams,
    SetTimePeriodTool,
};
