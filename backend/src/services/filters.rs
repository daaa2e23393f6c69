//! Filters derived from dimension-analysis rows.
//!
//! A row names one value per dimension column. Two placeholder values come
//! back from the analysis service: [`ALL_VALUES`] leaves the column
//! unfiltered and [`ALL_OTHERS`] stands for every value not broken out on its
//! own row.

use crate::models::FilterOption;

pub const ALL_OTHERS: &str = "(ALL_OTHERS)";
pub const ALL_VALUES: &str = "(ALL)";

/// Filters selecting the rows described by `names`.
///
/// `names[i]` is the value for `dimension_columns[i]`; extra names without a
/// column are ignored.
pub fn generate_filter_options(
    names: &[String],
    dimension_columns: &[String],
    other_dimension_values: &[String],
) -> Vec<FilterOption> {
    let mut filters = Vec::new();

    for (value, column) in names.iter().zip(dimension_columns) {
        match value.as_str() {
            ALL_VALUES => {}
            ALL_OTHERS => filters.extend(
                other_dimension_values
                    .iter()
                    .map(|other| FilterOption::new(column.clone(), other.clone())),
            ),
            _ => filters.push(FilterOption::new(column.clone(), value.clone())),
        }
    }

    filters
}

/// Sorted `column=value` strings for [`generate_filter_options`].
pub fn generate_filter_strings(
    names: &[String],
    dimension_columns: &[String],
    other_dimension_values: &[String],
) -> Vec<String> {
    let mut filters: Vec<String> =
        generate_filter_options(names, dimension_columns, other_dimension_values)
            .iter()
            .map(FilterOption::to_filter_string)
            .collect();
    filters.sort();
    filters
}

/// Tooltip listing the values folded into [`ALL_OTHERS`].
pub fn other_dimension_tooltip(other_dimension_values: &[String]) -> String {
    format!(
        "{} includes: {}",
        ALL_OTHERS,
        other_dimension_values.join(", ")
    )
}
