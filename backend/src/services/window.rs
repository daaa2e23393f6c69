//! Time window filtering and point lookup over chart series.

use crate::models::{EpochMillis, Timestamped};

/// Keep the points whose timestamp lies in `[start, end]`, both inclusive.
///
/// When either bound is missing the points are returned unfiltered; a
/// missing bound does not mean "unbounded on that side".
pub fn filter_by_time<T: Timestamped + Clone>(
    points: &[T],
    start: Option<EpochMillis>,
    end: Option<EpochMillis>,
) -> Vec<T> {
    let (Some(start), Some(end)) = (start, end) else {
        return points.to_vec();
    };

    points
        .iter()
        .filter(|p| {
            let timestamp = p.timestamp();
            start <= timestamp && timestamp <= end
        })
        .cloned()
        .collect()
}

/// Point in effect at `time` in a series sorted by ascending timestamp.
///
/// Returns the point with the greatest timestamp not after `time`, or `None`
/// when the series is empty, `time` is missing, or `time` precedes the first
/// point. A `time` past the end resolves to the last point.
pub fn point_at_time<T: Timestamped>(points: &[T], time: Option<EpochMillis>) -> Option<&T> {
    let time = time?;
    let first = points.first()?;
    if time < first.timestamp() {
        return None;
    }

    // Number of points at or before `time`; at least 1 here.
    let at_or_before = points.partition_point(|p| p.timestamp() <= time);
    points.get(at_or_before - 1)
}
