//! Application state for the HTTP server.

use chrono::{Offset, Utc};
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::error::VizResult;
use crate::services::{CalendarCalculator, TimeRangeCalculator};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resolves named time ranges in the configured zone
    pub calculator: Arc<CalendarCalculator>,
}

impl AppState {
    pub fn new(calculator: impl Into<CalendarCalculator>) -> Self {
        Self {
            calculator: Arc::new(calculator.into()),
        }
    }

    /// State built from the calendar section of `config`.
    pub fn from_config(config: &DashboardConfig) -> VizResult<Self> {
        Ok(Self::new(config.calendar.calculator()?))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TimeRangeCalculator::new(Utc.fix()))
    }
}
