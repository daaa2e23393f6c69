//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer. The shaping work is linear in the payload size, so it runs
//! inline on the request task.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::{debug, info};

use super::dto::{
    BreakdownRequest, BreakdownResponse, ColumnBreakdown, CustomRangeRequest, FilterRequest,
    FilterResponse, HealthResponse, PlotBandQuery, PlotBandResponse, PointAtRequest,
    SeriesPoint, SeriesRequest, SeriesResponse, TimeRangeDuration, TimeRangeOption,
    TimeRangeQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::TimeRange;
use crate::services::{
    self, comparison_plot_bands, filters::ALL_OTHERS, BaselineOffset,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

// =============================================================================
// Time ranges
// =============================================================================

/// GET /v1/time-range?range=&now=
///
/// Resolve a named range. Missing or unrecognized names resolve to today.
pub async fn resolve_time_range(
    State(state): State<AppState>,
    query: Result<Query<TimeRangeQuery>, QueryRejection>,
) -> HandlerResult<TimeRangeDuration> {
    let Query(query) = query?;
    let now = query
        .now
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    let duration = match query.range.as_deref() {
        Some(label) => state.calculator.duration_for_label(label, now),
        None => state.calculator.default_duration(now),
    };
    Ok(Json(duration))
}

/// GET /v1/time-range/options
///
/// Every named range with its display label.
pub async fn list_time_ranges() -> HandlerResult<Vec<TimeRangeOption>> {
    Ok(Json(
        TimeRange::ALL
            .iter()
            .map(|range| TimeRangeOption {
                time_range: *range,
                label: range.label(),
            })
            .collect(),
    ))
}

/// POST /v1/time-range/custom
///
/// Build a custom range; an end before the start is raised to the start.
pub async fn custom_time_range(
    payload: Result<Json<CustomRangeRequest>, JsonRejection>,
) -> HandlerResult<TimeRangeDuration> {
    let Json(request) = payload?;
    Ok(Json(TimeRangeDuration::custom(
        request.start_time,
        request.end_time,
    )))
}

// =============================================================================
// Alert evaluations
// =============================================================================

/// POST /v1/evaluations/series
///
/// Project an alert evaluation into chart points, optionally windowed.
pub async fn evaluation_series(
    payload: Result<Json<SeriesRequest>, JsonRejection>,
) -> HandlerResult<SeriesResponse> {
    let Json(request) = payload?;
    if let Some(ticks) = request.ticks.filter(|&ticks| ticks > services::MAX_TICK_COUNT) {
        return Err(AppError::BadRequest(format!(
            "ticks must be at most {}, got {}",
            services::MAX_TICK_COUNT,
            ticks
        )));
    }
    let evaluation = request.evaluation.as_ref();

    let points = services::project_time_series_points(evaluation)?;
    let anomalies = services::project_anomaly_points(evaluation);

    let points = services::filter_by_time(&points, request.start, request.end);
    let anomalies = services::filter_by_time(&anomalies, request.start, request.end);

    let min_timestamp = services::min_timestamp(&points);
    let max_timestamp = services::max_timestamp(&points);
    let tick_values = services::time_tick_values(request.ticks, min_timestamp, max_timestamp);

    debug!(
        points = points.len(),
        anomalies = anomalies.len(),
        "Projected alert evaluation"
    );

    Ok(Json(SeriesResponse {
        max_value: services::max_value(&points),
        points,
        anomalies,
        min_timestamp,
        max_timestamp,
        tick_values,
    }))
}

/// POST /v1/evaluations/point-at
///
/// The series point in effect at `time`, or `null`.
pub async fn evaluation_point_at(
    payload: Result<Json<PointAtRequest>, JsonRejection>,
) -> HandlerResult<Option<SeriesPoint>> {
    let Json(request) = payload?;
    let points = services::project_time_series_points(request.evaluation.as_ref())?;
    Ok(Json(services::point_at_time(&points, request.time).copied()))
}

// =============================================================================
// Dimension breakdowns
// =============================================================================

/// POST /v1/breakdown/comparison
///
/// Current vs. baseline comparison per dimension column, with treemaps.
pub async fn breakdown_comparison(
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> HandlerResult<BreakdownResponse> {
    let Json(request) = payload?;
    let breakdown = request.breakdown.as_ref();

    let columns: Vec<ColumnBreakdown> = services::compute_breakdown_comparison(breakdown)
        .into_iter()
        .map(|comparison| {
            let treemap = services::format_treemap_data(&comparison, &comparison.column);
            ColumnBreakdown {
                comparison,
                treemap,
            }
        })
        .collect();

    info!(columns = columns.len(), "Computed breakdown comparison");

    Ok(Json(BreakdownResponse {
        columns,
        dimension_options: services::format_dimension_options(breakdown),
    }))
}

/// POST /v1/breakdown/filters
///
/// Filter strings for one dimension-analysis row.
pub async fn breakdown_filters(
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> HandlerResult<FilterResponse> {
    let Json(request) = payload?;
    let filters = services::generate_filter_strings(
        &request.names,
        &request.dimension_columns,
        &request.other_dimension_values,
    );

    let other_dimension_tooltip = request
        .names
        .iter()
        .any(|name| name == ALL_OTHERS)
        .then(|| services::other_dimension_tooltip(&request.other_dimension_values));

    Ok(Json(FilterResponse {
        filters,
        other_dimension_tooltip,
    }))
}

/// GET /v1/baseline/plot-bands?start=&end=&offset=
///
/// Anomaly and baseline bands; the offset defaults to one week.
pub async fn baseline_plot_bands(
    query: Result<Query<PlotBandQuery>, QueryRejection>,
) -> HandlerResult<PlotBandResponse> {
    let Query(query) = query?;
    let offset = match query.offset.as_deref() {
        Some(raw) => raw.parse::<BaselineOffset>()?,
        None => BaselineOffset::default(),
    };

    Ok(Json(PlotBandResponse {
        offset: offset.to_string(),
        offset_millis: offset.to_millis(),
        bands: comparison_plot_bands(query.start, query.end, &offset).to_vec(),
    }))
}
