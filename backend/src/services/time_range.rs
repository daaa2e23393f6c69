//! Resolution of named time ranges into concrete millisecond bounds.
//!
//! The zone and the first day of the week are carried by the calculator
//! itself; nothing here reads process-wide locale settings.

use chrono::{Datelike, Days, FixedOffset, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{debug, warn};

use crate::models::{
    CalendarUnit, EpochMillis, RangeKind, TimeRange, TimeRangeDuration, WeekStart,
    HOUR_IN_MILLISECONDS,
};

/// Display format used for custom range bounds and axis labels.
pub const DATE_TIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Computes [`TimeRangeDuration`]s in a fixed time zone.
#[derive(Debug, Clone)]
pub struct TimeRangeCalculator<Tz: TimeZone> {
    zone: Tz,
    week_start: WeekStart,
}

impl TimeRangeCalculator<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz: TimeZone> TimeRangeCalculator<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Resolve `range` against the current instant.
    pub fn duration(&self, range: Option<TimeRange>) -> TimeRangeDuration {
        self.duration_at(range, Utc::now().timestamp_millis())
    }

    /// Resolve `range` against `now`.
    ///
    /// A missing range or [`TimeRange::Custom`] resolves to today's bounds,
    /// labelled [`TimeRange::Today`].
    pub fn duration_at(&self, range: Option<TimeRange>, now: EpochMillis) -> TimeRangeDuration {
        let range = match range {
            Some(range) if range != TimeRange::Custom => range,
            _ => TimeRange::Today,
        };

        let Some(local_now) = self.zone.timestamp_millis_opt(now).single() else {
            warn!("Instant {} is outside the representable range, using empty window", now);
            return TimeRangeDuration::new(range, now, now);
        };
        let today = local_now.date_naive();

        let duration = match range.kind() {
            RangeKind::Relative(millis) => {
                TimeRangeDuration::new(range, now.saturating_sub(millis), now)
            }
            RangeKind::Calendar(unit) => {
                let start = self.local_midnight(self.unit_start(today, unit));
                TimeRangeDuration::new(range, start.min(now), now)
            }
            RangeKind::Trailing(unit) => {
                let current_start = self.unit_start(today, unit);
                let previous_start = self.previous_unit_start(current_start, unit);
                let end = self.local_midnight(current_start) - 1;
                let start = self.local_midnight(previous_start).min(end);
                TimeRangeDuration::new(range, start, end)
            }
            // Custom was folded into Today above.
            RangeKind::Custom => self.duration_at(Some(TimeRange::Today), now),
        };

        debug!(
            "Resolved {} to [{}, {}]",
            range.wire_name(),
            duration.start_time,
            duration.end_time
        );
        duration
    }

    /// Resolve a caller-supplied label; unknown labels fall back to today.
    pub fn duration_for_label(&self, label: &str, now: EpochMillis) -> TimeRangeDuration {
        let range = TimeRange::from_label(label);
        if range.is_none() {
            warn!("Unrecognized time range '{}', falling back to today", label);
        }
        self.duration_at(range, now)
    }

    /// The range shown before the user picks one.
    pub fn default_duration(&self, now: EpochMillis) -> TimeRangeDuration {
        self.duration_at(Some(TimeRange::Today), now)
    }

    /// Starting point when the user switches to a custom range.
    pub fn init_custom(&self, now: EpochMillis) -> TimeRangeDuration {
        self.default_duration(now).into_custom()
    }

    /// Text shown on the range selector button.
    pub fn format_duration(&self, duration: &TimeRangeDuration) -> String {
        if duration.time_range != TimeRange::Custom {
            return duration.time_range.label();
        }

        format!(
            "{} - {}",
            self.format_millis(duration.start_time),
            self.format_millis(duration.end_time)
        )
    }

    pub fn format_millis(&self, millis: EpochMillis) -> String {
        self.format_millis_with(millis, DATE_TIME_FORMAT)
    }

    pub(crate) fn format_millis_with(&self, millis: EpochMillis, format: &str) -> String {
        match self.zone.timestamp_millis_opt(millis).single() {
            Some(dt) => dt.format(format).to_string(),
            None => String::new(),
        }
    }

    fn unit_start(&self, date: NaiveDate, unit: CalendarUnit) -> NaiveDate {
        match unit {
            CalendarUnit::Day => date,
            CalendarUnit::Week => {
                let offset = match self.week_start {
                    WeekStart::Monday => date.weekday().num_days_from_monday(),
                    WeekStart::Sunday => date.weekday().num_days_from_sunday(),
                };
                date.checked_sub_days(Days::new(u64::from(offset)))
                    .unwrap_or(date)
            }
            CalendarUnit::Month => date.with_day(1).unwrap_or(date),
            CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// `current_start` must already be aligned to `unit`.
    fn previous_unit_start(&self, current_start: NaiveDate, unit: CalendarUnit) -> NaiveDate {
        let previous = match unit {
            CalendarUnit::Day => current_start.pred_opt(),
            CalendarUnit::Week => current_start.checked_sub_days(Days::new(7)),
            CalendarUnit::Month => {
                let (year, month) = if current_start.month() == 1 {
                    (current_start.year() - 1, 12)
                } else {
                    (current_start.year(), current_start.month() - 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
            }
            CalendarUnit::Year => NaiveDate::from_ymd_opt(current_start.year() - 1, 1, 1),
        };
        previous.unwrap_or(current_start)
    }

    /// Epoch millis of local midnight on `date`.
    ///
    /// Where midnight falls into a DST gap, 01:00 local is used instead.
    fn local_midnight(&self, date: NaiveDate) -> EpochMillis {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.zone.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => dt.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
            LocalResult::None => {
                let shifted = midnight + chrono::Duration::milliseconds(HOUR_IN_MILLISECONDS);
                self.zone
                    .from_local_datetime(&shifted)
                    .earliest()
                    .map(|dt| dt.timestamp_millis())
                    .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
            }
        }
    }
}

/// A calculator in whichever kind of zone was configured: a named IANA zone
/// that follows daylight saving, or a fixed UTC offset.
#[derive(Debug, Clone)]
pub enum CalendarCalculator {
    Named(TimeRangeCalculator<chrono_tz::Tz>),
    Fixed(TimeRangeCalculator<FixedOffset>),
}

impl CalendarCalculator {
    /// `America/Los_Angeles` or `-08:00`.
    pub fn zone_name(&self) -> String {
        match self {
            CalendarCalculator::Named(calculator) => calculator.zone().name().to_string(),
            CalendarCalculator::Fixed(calculator) => calculator.zone().to_string(),
        }
    }

    pub fn week_start(&self) -> WeekStart {
        match self {
            CalendarCalculator::Named(calculator) => calculator.week_start(),
            CalendarCalculator::Fixed(calculator) => calculator.week_start(),
        }
    }

    pub fn duration_at(&self, range: Option<TimeRange>, now: EpochMillis) -> TimeRangeDuration {
        match self {
            CalendarCalculator::Named(calculator) => calculator.duration_at(range, now),
            CalendarCalculator::Fixed(calculator) => calculator.duration_at(range, now),
        }
    }

    pub fn duration_for_label(&self, label: &str, now: EpochMillis) -> TimeRangeDuration {
        match self {
            CalendarCalculator::Named(calculator) => calculator.duration_for_label(label, now),
            CalendarCalculator::Fixed(calculator) => calculator.duration_for_label(label, now),
        }
    }

    pub fn default_duration(&self, now: EpochMillis) -> TimeRangeDuration {
        self.duration_at(Some(TimeRange::Today), now)
    }

    pub fn format_duration(&self, duration: &TimeRangeDuration) -> String {
        match self {
            CalendarCalculator::Named(calculator) => calculator.format_duration(duration),
            CalendarCalculator::Fixed(calculator) => calculator.format_duration(duration),
        }
    }
}

impl From<TimeRangeCalculator<chrono_tz::Tz>> for CalendarCalculator {
    fn from(calculator: TimeRangeCalculator<chrono_tz::Tz>) -> Self {
        CalendarCalculator::Named(calculator)
    }
}

impl From<TimeRangeCalculator<FixedOffset>> for CalendarCalculator {
    fn from(calculator: TimeRangeCalculator<FixedOffset>) -> Self {
        CalendarCalculator::Fixed(calculator)
    }
}

#[cfg(test)]
#[path = "time_range_tests.rs"]
mod time_range_tests;
