use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::define_labelled_enum;
use crate::error::VizError;

/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

pub const MINUTE_IN_MILLISECONDS: i64 = 60 * 1000;
pub const HOUR_IN_MILLISECONDS: i64 = 60 * MINUTE_IN_MILLISECONDS;
pub const DAY_IN_MILLISECONDS: i64 = 24 * HOUR_IN_MILLISECONDS;
pub const WEEK_IN_MILLISECONDS: i64 = 7 * DAY_IN_MILLISECONDS;
pub const MONTH_IN_MILLISECONDS: i64 = 30 * DAY_IN_MILLISECONDS;
pub const YEAR_IN_MILLISECONDS: i64 = 365 * DAY_IN_MILLISECONDS;

define_labelled_enum! {
    /// Named time ranges offered by the time range selector.
    TimeRange {
        Last15Minutes => ("LAST_15_MINUTES", "last 15 minutes"),
        Last1Hour => ("LAST_1_HOUR", "last 1 hour"),
        Last12Hours => ("LAST_12_HOURS", "last 12 hours"),
        Last24Hours => ("LAST_24_HOURS", "last 24 hours"),
        Last7Days => ("LAST_7_DAYS", "last 7 days"),
        Last30Days => ("LAST_30_DAYS", "last 30 days"),
        Today => ("TODAY", "today"),
        Yesterday => ("YESTERDAY", "yesterday"),
        ThisWeek => ("THIS_WEEK", "this week"),
        LastWeek => ("LAST_WEEK", "last week"),
        ThisMonth => ("THIS_MONTH", "this month"),
        LastMonth => ("LAST_MONTH", "last month"),
        ThisYear => ("THIS_YEAR", "this year"),
        LastYear => ("LAST_YEAR", "last year"),
        Custom => ("CUSTOM", "custom"),
    }
}

define_labelled_enum! {
    /// First day of the calendar week.
    WeekStart {
        Monday => ("MONDAY", "monday"),
        Sunday => ("SUNDAY", "sunday"),
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Monday
    }
}

/// Calendar unit used by the calendar-aligned time ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CalendarUnit {
    Day,
    Week,
    Month,
    Year,
}

/// How a [`TimeRange`] turns into concrete bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RangeKind {
    /// `[now - millis, now]`
    Relative(i64),
    /// `[start of current unit, now]`
    Calendar(CalendarUnit),
    /// `[start of previous unit, start of current unit - 1ms]`
    Trailing(CalendarUnit),
    /// Bounds supplied by the caller.
    Custom,
}

impl TimeRange {
    pub fn kind(&self) -> RangeKind {
        match self {
            TimeRange::Last15Minutes => RangeKind::Relative(15 * MINUTE_IN_MILLISECONDS),
            TimeRange::Last1Hour => RangeKind::Relative(HOUR_IN_MILLISECONDS),
            TimeRange::Last12Hours => RangeKind::Relative(12 * HOUR_IN_MILLISECONDS),
            TimeRange::Last24Hours => RangeKind::Relative(24 * HOUR_IN_MILLISECONDS),
            TimeRange::Last7Days => RangeKind::Relative(7 * DAY_IN_MILLISECONDS),
            TimeRange::Last30Days => RangeKind::Relative(30 * DAY_IN_MILLISECONDS),
            TimeRange::Today => RangeKind::Calendar(CalendarUnit::Day),
            TimeRange::ThisWeek => RangeKind::Calendar(CalendarUnit::Week),
            TimeRange::ThisMonth => RangeKind::Calendar(CalendarUnit::Month),
            TimeRange::ThisYear => RangeKind::Calendar(CalendarUnit::Year),
            TimeRange::Yesterday => RangeKind::Trailing(CalendarUnit::Day),
            TimeRange::LastWeek => RangeKind::Trailing(CalendarUnit::Week),
            TimeRange::LastMonth => RangeKind::Trailing(CalendarUnit::Month),
            TimeRange::LastYear => RangeKind::Trailing(CalendarUnit::Year),
            TimeRange::Custom => RangeKind::Custom,
        }
    }

    /// Display label, e.g. `Last 12 hours`.
    pub fn label(&self) -> String {
        let phrase = self.phrase();
        let mut chars = phrase.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for TimeRange {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::from_label(s).ok_or_else(|| VizError::InvalidTimeRange(s.to_string()))
    }
}

/// A named time range resolved to concrete bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeDuration {
    pub time_range: TimeRange,
    pub start_time: EpochMillis,
    pub end_time: EpochMillis,
}

impl TimeRangeDuration {
    pub fn new(time_range: TimeRange, start_time: EpochMillis, end_time: EpochMillis) -> Self {
        Self {
            time_range,
            start_time,
            end_time,
        }
    }

    /// Custom bounds; `end_time` is raised to `start_time` when it precedes it.
    pub fn custom(start_time: EpochMillis, end_time: EpochMillis) -> Self {
        Self::new(TimeRange::Custom, start_time, end_time.max(start_time))
    }

    /// Moves the start, pushing the end forward if it would precede the start.
    pub fn with_start_time(&self, start_time: EpochMillis) -> Self {
        Self::custom(start_time, self.end_time)
    }

    /// Moves the end, never earlier than the current start.
    pub fn with_end_time(&self, end_time: EpochMillis) -> Self {
        Self::custom(self.start_time, end_time)
    }

    /// Same bounds relabelled as a custom range.
    pub fn into_custom(self) -> Self {
        Self::new(TimeRange::Custom, self.start_time, self.end_time)
    }

    pub fn duration_millis(&self) -> i64 {
        self.end_time - self.start_time
    }

    pub fn contains(&self, timestamp: EpochMillis) -> bool {
        self.start_time <= timestamp && timestamp <= self.end_time
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
