//! Axis helpers for time series charts.

use chrono::TimeZone;

use crate::models::{
    EpochMillis, DAY_IN_MILLISECONDS, MONTH_IN_MILLISECONDS, YEAR_IN_MILLISECONDS,
};
use crate::services::time_range::TimeRangeCalculator;

pub const DEFAULT_TICK_COUNT: usize = 8;
pub const MAX_TICK_COUNT: usize = 1000;

/// `count` evenly spaced tick values over `[min, max]`, endpoints included.
///
/// Fewer than 3 ticks, or a zero-width domain, yields just the endpoints.
/// Counts above [`MAX_TICK_COUNT`] are clamped to it.
pub fn time_tick_values(count: Option<usize>, min: EpochMillis, max: EpochMillis) -> Vec<f64> {
    let count = count.unwrap_or(DEFAULT_TICK_COUNT).min(MAX_TICK_COUNT);
    let (min, max) = (min as f64, max as f64);
    if count < 3 || min == max {
        return vec![min, max];
    }

    let step = (max - min) / (count - 1) as f64;
    let mut ticks: Vec<f64> = (0..count - 1).map(|i| min + step * i as f64).collect();
    ticks.push(max);
    ticks
}

/// chrono format for an axis label, coarser as the visible domain widens.
pub fn axis_label_format(domain_start: EpochMillis, domain_end: EpochMillis) -> &'static str {
    let width = domain_end.saturating_sub(domain_start).saturating_abs();
    if width > 2 * YEAR_IN_MILLISECONDS {
        "%Y"
    } else if width > 2 * MONTH_IN_MILLISECONDS {
        "%b %Y"
    } else if width > 2 * DAY_IN_MILLISECONDS {
        "%b %d, %Y"
    } else {
        "%b %d, %Y@%I:%M %p"
    }
}

/// Label for the tick at `millis` on an axis spanning `domain`.
pub fn format_date_time_for_axis<Tz>(
    calculator: &TimeRangeCalculator<Tz>,
    millis: EpochMillis,
    domain: (EpochMillis, EpochMillis),
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    calculator.format_millis_with(millis, axis_label_format(domain.0, domain.1))
}

const LARGE_NUMBER_SUFFIXES: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// Compact form such as `1.5K`, `2.3M` or `1B`. Non-finite values format as
/// an empty string.
pub fn format_large_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let mut chosen = None;
    for (index, (scale, suffix)) in LARGE_NUMBER_SUFFIXES.iter().enumerate().rev() {
        if magnitude < *scale {
            continue;
        }
        let mut mantissa = round_to(magnitude / scale, 1);
        let mut suffix = *suffix;
        // 999.96K rounds to 1000.0K; show it as 1M instead.
        if mantissa >= 1000.0 {
            if let Some((_, next)) = LARGE_NUMBER_SUFFIXES.get(index + 1) {
                mantissa = round_to(mantissa / 1000.0, 1);
                suffix = next;
            }
        }
        chosen = Some((mantissa, suffix));
        break;
    }

    match chosen {
        Some((mantissa, suffix)) => format!("{}{}{}", sign, trim_decimal(mantissa, 1), suffix),
        None => format!("{}{}", sign, trim_decimal(round_to(magnitude, 2), 2)),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn trim_decimal(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn pacific() -> TimeRangeCalculator<FixedOffset> {
        TimeRangeCalculator::new(FixedOffset::west_opt(8 * 3600).unwrap())
    }

    #[test]
    fn test_default_tick_count() {
        let ticks = time_tick_values(None, 1_575_187_200_000, 1_606_852_800_000);

        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0], 1_575_187_200_000.0);
        assert!((ticks[1] - 1_579_710_857_142.857_2).abs() < 1e-2);
        assert!((ticks[6] - 1_602_329_142_852.857_2).abs() < 1e-2);
        assert_eq!(ticks[7], 1_606_852_800_000.0);
    }

    #[test]
    fn test_fewer_than_three_ticks() {
        assert_eq!(
            time_tick_values(Some(1), 1_575_187_200_000, 1_606_852_800_000),
            vec![1_575_187_200_000.0, 1_606_852_800_000.0]
        );
        assert_eq!(time_tick_values(Some(0), 5, 10), vec![5.0, 10.0]);
    }

    #[test]
    fn test_three_ticks() {
        assert_eq!(
            time_tick_values(Some(3), 1_575_187_200_000, 1_606_852_800_000),
            vec![1_575_187_200_000.0, 1_591_020_000_000.0, 1_606_852_800_000.0]
        );
    }

    #[test]
    fn test_tick_count_is_clamped() {
        let ticks = time_tick_values(Some(1usize << 52), 0, 1);
        assert_eq!(ticks.len(), MAX_TICK_COUNT);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[MAX_TICK_COUNT - 1], 1.0);

        assert_eq!(time_tick_values(Some(usize::MAX), 0, 10).len(), MAX_TICK_COUNT);
    }

    #[test]
    fn test_zero_width_domain() {
        assert_eq!(
            time_tick_values(Some(3), 1_606_852_800_000, 1_606_852_800_000),
            vec![1_606_852_800_000.0, 1_606_852_800_000.0]
        );
    }

    #[test]
    fn test_axis_label_by_domain_width() {
        let calculator = pacific();
        let at = 1_606_852_800_000;

        // More than 2 years
        let label = format_date_time_for_axis(&calculator, at, (1_543_651_200_000, 1_669_881_600_000));
        assert_eq!(label, "2020");

        // Exactly 2 years, then less
        let label = format_date_time_for_axis(&calculator, at, (1_575_273_600_000, 1_638_345_600_000));
        assert_eq!(label, "Dec 2020");
        let label = format_date_time_for_axis(&calculator, at, (1_577_865_600_000, 1_638_345_600_000));
        assert_eq!(label, "Dec 2020");

        // Exactly 2 months, then less
        let label = format_date_time_for_axis(&calculator, at, (1_604_304_000_000, 1_609_488_000_000));
        assert_eq!(label, "Dec 01, 2020");
        let label = format_date_time_for_axis(&calculator, at, (1_606_723_200_000, 1_609_488_000_000));
        assert_eq!(label, "Dec 01, 2020");

        // Exactly 2 days, then less
        let label = format_date_time_for_axis(&calculator, at, (1_606_723_200_000, 1_606_896_000_000));
        assert_eq!(label, "Dec 01, 2020@12:00 PM");
        let label = format_date_time_for_axis(&calculator, at, (1_606_852_800_000, 1_606_896_000_000));
        assert_eq!(label, "Dec 01, 2020@12:00 PM");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(1.0), "1");
        assert_eq!(format_large_number(12.5), "12.5");
        assert_eq!(format_large_number(999.0), "999");
        assert_eq!(format_large_number(1_000.0), "1K");
        assert_eq!(format_large_number(1_500.0), "1.5K");
        assert_eq!(format_large_number(-1_500.0), "-1.5K");
        assert_eq!(format_large_number(2_300_000.0), "2.3M");
        assert_eq!(format_large_number(1_000_000_000.0), "1B");
        assert_eq!(format_large_number(4_200_000_000_000.0), "4.2T");
        assert_eq!(format_large_number(0.0), "0");
    }

    #[test]
    fn test_format_large_number_rounds_into_next_suffix() {
        assert_eq!(format_large_number(999_960.0), "1M");
    }

    #[test]
    fn test_format_large_number_non_finite() {
        assert_eq!(format_large_number(f64::NAN), "");
        assert_eq!(format_large_number(f64::INFINITY), "");
    }
}
