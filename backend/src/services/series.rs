//! Projection of alert evaluation payloads into chart points.

use log::debug;

use crate::error::{VizError, VizResult};
use crate::models::{
    AlertEvaluation, AnomalyPoint, DetectionData, EpochMillis, SeriesPoint,
};

/// Flatten every detection evaluation into one sequence of series points.
///
/// Evaluations are visited in payload order and their points appended
/// without re-sorting. Missing evaluations, data blocks or timestamp arrays
/// contribute nothing. A value array that is present but not the same length
/// as its timestamp array is rejected.
pub fn project_time_series_points(
    evaluation: Option<&AlertEvaluation>,
) -> VizResult<Vec<SeriesPoint>> {
    let Some(evaluations) = evaluation.and_then(|e| e.detection_evaluations.as_ref()) else {
        return Ok(Vec::new());
    };

    let mut points = Vec::new();
    for (id, detection) in evaluations.iter() {
        if let Some(data) = &detection.data {
            points.extend(zip_detection_data(id, data)?);
        }
    }

    debug!(
        "Projected {} series points from {} evaluations",
        points.len(),
        evaluations.len()
    );
    Ok(points)
}

/// Flatten every detection evaluation's anomalies into anomaly points.
pub fn project_anomaly_points(evaluation: Option<&AlertEvaluation>) -> Vec<AnomalyPoint> {
    let Some(evaluations) = evaluation.and_then(|e| e.detection_evaluations.as_ref()) else {
        return Vec::new();
    };

    evaluations
        .iter()
        .filter_map(|(_, detection)| detection.anomalies.as_ref())
        .flat_map(|anomalies| anomalies.iter().map(AnomalyPoint::from))
        .collect()
}

fn zip_detection_data(evaluation_id: &str, data: &DetectionData) -> VizResult<Vec<SeriesPoint>> {
    let timestamps = match &data.timestamp {
        Some(timestamps) if !timestamps.is_empty() => timestamps,
        _ => return Ok(Vec::new()),
    };

    let current = aligned_values(evaluation_id, "current", &data.current, timestamps.len())?;
    let expected = aligned_values(evaluation_id, "expected", &data.expected, timestamps.len())?;
    let upper_bound =
        aligned_values(evaluation_id, "upperBound", &data.upper_bound, timestamps.len())?;
    let lower_bound =
        aligned_values(evaluation_id, "lowerBound", &data.lower_bound, timestamps.len())?;

    Ok(timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| SeriesPoint {
            timestamp,
            current: value_at(current, i),
            expected: value_at(expected, i),
            upper_bound: value_at(upper_bound, i),
            lower_bound: value_at(lower_bound, i),
        })
        .collect())
}

/// An absent array is accepted (every value reads as NaN); a present one must
/// match the timestamp count.
fn aligned_values<'a>(
    evaluation_id: &str,
    field: &'static str,
    values: &'a Option<Vec<Option<f64>>>,
    expected: usize,
) -> VizResult<Option<&'a [Option<f64>]>> {
    match values {
        None => Ok(None),
        Some(values) if values.len() == expected => Ok(Some(values.as_slice())),
        Some(values) => Err(VizError::MismatchedSeriesLength {
            evaluation: evaluation_id.to_string(),
            field,
            expected,
            actual: values.len(),
        }),
    }
}

fn value_at(values: Option<&[Option<f64>]>, index: usize) -> f64 {
    values
        .and_then(|values| values.get(index).copied().flatten())
        .unwrap_or(f64::NAN)
}

/// Earliest timestamp, or 0 for an empty series.
pub fn min_timestamp(points: &[SeriesPoint]) -> EpochMillis {
    points.iter().map(|p| p.timestamp).min().unwrap_or(0)
}

/// Latest timestamp, or 0 for an empty series.
pub fn max_timestamp(points: &[SeriesPoint]) -> EpochMillis {
    points.iter().map(|p| p.timestamp).max().unwrap_or(0)
}

/// Largest finite value across current, bounds and expected; 0 if none.
pub fn max_value(points: &[SeriesPoint]) -> f64 {
    points
        .iter()
        .flat_map(|p| p.values())
        .filter(|v| v.is_finite())
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "series_tests.rs"]
mod series_tests;
