//! Data Transfer Objects for the HTTP API.
//!
//! Domain types from [`crate::models`] already serialize in the dashboard's
//! camelCase wire format and are re-exported here; this module only adds the
//! request envelopes and aggregate responses.

use serde::{Deserialize, Serialize};

use crate::services::PlotBand;

pub use crate::models::{
    AlertEvaluation, AnomalyBreakdown, AnomalyPoint, DimensionColumnComparison, EpochMillis,
    FilterOption, SeriesPoint, TimeRange, TimeRangeDuration, TreemapNode,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}

/// Query parameters for the named time range endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimeRangeQuery {
    /// Wire name or phrase, e.g. `LAST_7_DAYS` or `last 7 days`
    #[serde(default)]
    pub range: Option<String>,
    /// Reference instant; the server clock when absent
    #[serde(default)]
    pub now: Option<EpochMillis>,
}

/// A selectable named range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeOption {
    pub time_range: TimeRange,
    pub label: String,
}

/// Request body for a custom time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRangeRequest {
    pub start_time: EpochMillis,
    pub end_time: EpochMillis,
}

/// Request body for series projection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    #[serde(default)]
    pub evaluation: Option<AlertEvaluation>,
    /// Window start; no filtering unless both bounds are given
    #[serde(default)]
    pub start: Option<EpochMillis>,
    #[serde(default)]
    pub end: Option<EpochMillis>,
    /// Number of x-axis ticks to compute (default 8, at most 1000)
    #[serde(default)]
    pub ticks: Option<usize>,
}

/// Projected chart data for one alert evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub points: Vec<SeriesPoint>,
    pub anomalies: Vec<AnomalyPoint>,
    pub min_timestamp: EpochMillis,
    pub max_timestamp: EpochMillis,
    pub max_value: f64,
    pub tick_values: Vec<f64>,
}

/// Request body for the point lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PointAtRequest {
    #[serde(default)]
    pub evaluation: Option<AlertEvaluation>,
    #[serde(default)]
    pub time: Option<EpochMillis>,
}

/// Request body for the breakdown comparison endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    #[serde(default)]
    pub breakdown: Option<AnomalyBreakdown>,
}

/// One dimension column ready for the heatmap view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBreakdown {
    pub comparison: DimensionColumnComparison,
    pub treemap: Vec<TreemapNode>,
}

/// Breakdown comparison response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub columns: Vec<ColumnBreakdown>,
    pub dimension_options: Vec<FilterOption>,
}

/// Request body for the dimension filter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub dimension_columns: Vec<String>,
    #[serde(default)]
    pub other_dimension_values: Vec<String>,
}

/// Filters for one dimension-analysis row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub filters: Vec<String>,
    /// Present when the row folds several values into `(ALL_OTHERS)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_dimension_tooltip: Option<String>,
}

/// Query parameters for the baseline plot band endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBandQuery {
    pub start: EpochMillis,
    pub end: EpochMillis,
    /// ISO-8601 style offset such as `P1W`
    #[serde(default)]
    pub offset: Option<String>,
}

/// Anomaly and baseline bands for a comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBandResponse {
    pub offset: String,
    pub offset_millis: i64,
    pub bands: Vec<PlotBand>,
}
