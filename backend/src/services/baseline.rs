//! Baseline comparison offsets such as `P1W` ("the same window one week
//! earlier") and the chart bands derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::define_labelled_enum;
use crate::error::{VizError, VizResult};
use crate::models::{
    EpochMillis, DAY_IN_MILLISECONDS, MONTH_IN_MILLISECONDS, WEEK_IN_MILLISECONDS,
    YEAR_IN_MILLISECONDS,
};

define_labelled_enum! {
    /// Unit of a baseline offset; the wire name is its ISO-8601 designator.
    BaselineOffsetUnit {
        Day => ("D", "day"),
        Week => ("W", "week"),
        Month => ("M", "month"),
        Year => ("Y", "year"),
    }
}

impl BaselineOffsetUnit {
    /// Fixed size of one unit; months are 30 days and years 365.
    pub fn millis(&self) -> i64 {
        match self {
            BaselineOffsetUnit::Day => DAY_IN_MILLISECONDS,
            BaselineOffsetUnit::Week => WEEK_IN_MILLISECONDS,
            BaselineOffsetUnit::Month => MONTH_IN_MILLISECONDS,
            BaselineOffsetUnit::Year => YEAR_IN_MILLISECONDS,
        }
    }
}

/// How far back the baseline window sits from the anomaly window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaselineOffset {
    pub value: i64,
    pub unit: BaselineOffsetUnit,
}

impl BaselineOffset {
    pub fn new(value: i64, unit: BaselineOffsetUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_millis(&self) -> i64 {
        self.value.saturating_mul(self.unit.millis())
    }

    /// e.g. `1 week ago`, `3 days ago`
    pub fn human_readable(&self) -> String {
        let plural = if self.value == 1 { "" } else { "s" };
        format!("{} {}{} ago", self.value, self.unit.phrase(), plural)
    }

    /// Shift a window back by this offset.
    pub fn shift(&self, start: EpochMillis, end: EpochMillis) -> (EpochMillis, EpochMillis) {
        let millis = self.to_millis();
        (start.saturating_sub(millis), end.saturating_sub(millis))
    }
}

impl Default for BaselineOffset {
    fn default() -> Self {
        Self::new(1, BaselineOffsetUnit::Week)
    }
}

impl fmt::Display for BaselineOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.value, self.unit.wire_name())
    }
}

impl FromStr for BaselineOffset {
    type Err = VizError;

    /// Parses `P<n><D|W|M|Y>`, case-insensitively.
    fn from_str(s: &str) -> VizResult<Self> {
        let invalid = || VizError::InvalidBaselineOffset(s.to_string());

        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('P')
            .or_else(|| trimmed.strip_prefix('p'))
            .ok_or_else(invalid)?;
        let designator = body.chars().last().ok_or_else(invalid)?;
        let digits = &body[..body.len() - designator.len_utf8()];

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: i64 = digits.parse().map_err(|_| invalid())?;
        let unit =
            BaselineOffsetUnit::from_label(&designator.to_string()).ok_or_else(invalid)?;

        Ok(Self::new(value, unit))
    }
}

impl Serialize for BaselineOffset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BaselineOffset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub const ANOMALY_PERIOD_BAND_NAME: &str = "Anomaly period";

/// A highlighted x-axis interval on a comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBand {
    pub start: EpochMillis,
    pub end: EpochMillis,
    pub name: String,
}

/// The anomaly window and the baseline window it is compared against.
pub fn comparison_plot_bands(
    start: EpochMillis,
    end: EpochMillis,
    offset: &BaselineOffset,
) -> [PlotBand; 2] {
    let (baseline_start, baseline_end) = offset.shift(start, end);
    [
        PlotBand {
            start,
            end,
            name: ANOMALY_PERIOD_BAND_NAME.to_string(),
        },
        PlotBand {
            start: baseline_start,
            end: baseline_end,
            name: offset.human_readable(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offsets() {
        assert_eq!(
            "P1W".parse::<BaselineOffset>().unwrap(),
            BaselineOffset::new(1, BaselineOffsetUnit::Week)
        );
        assert_eq!(
            "P14D".parse::<BaselineOffset>().unwrap(),
            BaselineOffset::new(14, BaselineOffsetUnit::Day)
        );
        assert_eq!(
            "p3m".parse::<BaselineOffset>().unwrap(),
            BaselineOffset::new(3, BaselineOffsetUnit::Month)
        );
        assert_eq!(
            " P1Y ".parse::<BaselineOffset>().unwrap(),
            BaselineOffset::new(1, BaselineOffsetUnit::Year)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "P", "PW", "1W", "P1", "P1H", "P-1W", "P1.5W", "PT1H", "P1W2D"] {
            let err = raw.parse::<BaselineOffset>().unwrap_err();
            assert_eq!(err, VizError::InvalidBaselineOffset(raw.to_string()), "{raw}");
        }
    }

    #[test]
    fn test_to_millis() {
        assert_eq!(
            BaselineOffset::new(1, BaselineOffsetUnit::Day).to_millis(),
            86_400_000
        );
        assert_eq!(
            BaselineOffset::new(2, BaselineOffsetUnit::Week).to_millis(),
            1_209_600_000
        );
        assert_eq!(
            BaselineOffset::new(1, BaselineOffsetUnit::Month).to_millis(),
            2_592_000_000
        );
        assert_eq!(
            BaselineOffset::new(1, BaselineOffsetUnit::Year).to_millis(),
            31_536_000_000
        );
    }

    #[test]
    fn test_human_readable() {
        assert_eq!(BaselineOffset::default().human_readable(), "1 week ago");
        assert_eq!(
            BaselineOffset::new(3, BaselineOffsetUnit::Day).human_readable(),
            "3 days ago"
        );
        assert_eq!(
            BaselineOffset::new(0, BaselineOffsetUnit::Month).human_readable(),
            "0 months ago"
        );
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let offset = BaselineOffset::new(2, BaselineOffsetUnit::Week);
        assert_eq!(offset.to_string(), "P2W");

        let json = serde_json::to_string(&offset).unwrap();
        assert_eq!(json, "\"P2W\"");
        assert_eq!(serde_json::from_str::<BaselineOffset>(&json).unwrap(), offset);
        assert!(serde_json::from_str::<BaselineOffset>("\"weekly\"").is_err());
    }

    #[test]
    fn test_comparison_plot_bands() {
        let offset = BaselineOffset::new(1, BaselineOffsetUnit::Day);
        let [anomaly, baseline] = comparison_plot_bands(200_000_000, 300_000_000, &offset);

        assert_eq!(anomaly.start, 200_000_000);
        assert_eq!(anomaly.end, 300_000_000);
        assert_eq!(anomaly.name, "Anomaly period");

        assert_eq!(baseline.start, 200_000_000 - 86_400_000);
        assert_eq!(baseline.end, 300_000_000 - 86_400_000);
        assert_eq!(baseline.name, "1 day ago");
    }
}
