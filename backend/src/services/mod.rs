//! Service layer: pure data-shaping functions.
//!
//! Every function here works on borrowed payloads and returns fresh values;
//! nothing keeps state between calls.

pub mod axis;
pub mod baseline;
pub mod breakdown;
pub mod filters;
pub mod series;
pub mod time_range;
pub mod window;

pub use axis::{
    format_date_time_for_axis, format_large_number, time_tick_values, MAX_TICK_COUNT,
};
pub use baseline::{comparison_plot_bands, BaselineOffset, BaselineOffsetUnit, PlotBand};
pub use breakdown::{
    compute_breakdown_comparison, format_dimension_options, format_treemap_data,
    summarize_dimension_values,
};
pub use filters::{generate_filter_options, generate_filter_strings, other_dimension_tooltip};
pub use series::{
    max_timestamp, max_value, min_timestamp, project_anomaly_points, project_time_series_points,
};
pub use time_range::{CalendarCalculator, TimeRangeCalculator};
pub use window::{filter_by_time, point_at_time};
