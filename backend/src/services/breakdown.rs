//! Current vs. baseline comparison of dimension breakdowns.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    AnomalyBreakdown, DimensionBucket, DimensionColumnComparison, DimensionComparison,
    DimensionValueSummary, FilterOption, TreemapExtraData, TreemapNode,
};

/// Total count of a bucket and each value's share of it.
///
/// Shares are 0 when the total is 0.
pub fn summarize_dimension_values(
    bucket: Option<&DimensionBucket>,
) -> (i64, BTreeMap<String, DimensionValueSummary>) {
    let Some(bucket) = bucket else {
        return (0, BTreeMap::new());
    };

    let total_count = bucket
        .values()
        .fold(0i64, |total, &count| total.saturating_add(count));
    let summarized = bucket
        .iter()
        .map(|(value, &count)| {
            let percentage = if total_count == 0 {
                0.0
            } else {
                count as f64 / total_count as f64
            };
            (
                value.clone(),
                DimensionValueSummary {
                    count,
                    percentage,
                    total_count,
                },
            )
        })
        .collect();

    (total_count, summarized)
}

/// Compare one dimension column across the two periods.
///
/// Every value seen in either period gets an entry; a value missing from a
/// period counts as 0 there.
pub fn compare_dimension_column(
    column: &str,
    current: Option<&DimensionBucket>,
    baseline: Option<&DimensionBucket>,
) -> DimensionColumnComparison {
    let (current_total, current_summary) = summarize_dimension_values(current);
    let (baseline_total, baseline_summary) = summarize_dimension_values(baseline);

    let values: BTreeSet<&String> = current_summary.keys().chain(baseline_summary.keys()).collect();

    let dimension_comparison_data = values
        .into_iter()
        .map(|value| {
            let current = current_summary.get(value);
            let baseline = baseline_summary.get(value);
            let current_count = current.map_or(0, |s| s.count);
            let baseline_count = baseline.map_or(0, |s| s.count);
            let current_share = current.map_or(0.0, |s| s.percentage);
            let baseline_share = baseline.map_or(0.0, |s| s.percentage);

            let comparison = DimensionComparison {
                current: current_count,
                baseline: baseline_count,
                metric_value_diff: current_count.saturating_sub(baseline_count),
                metric_value_diff_percentage: percent_change(current_count, baseline_count),
                current_contribution_percentage: current_share,
                baseline_contribution_percentage: baseline_share,
                contribution_diff: current_share - baseline_share,
                current_total_count: current_total,
                baseline_total_count: baseline_total,
            };
            (value.clone(), comparison)
        })
        .collect();

    DimensionColumnComparison {
        column: column.to_string(),
        current_total_count: current_total,
        baseline_total_count: baseline_total,
        dimension_comparison_data,
    }
}

/// `(current - baseline) / baseline * 100`, undefined for a zero baseline.
pub fn percent_change(current: i64, baseline: i64) -> Option<f64> {
    if baseline > 0 {
        Some(current.saturating_sub(baseline) as f64 / baseline as f64 * 100.0)
    } else {
        None
    }
}

/// One comparison per dimension column found in either period, ordered by
/// column name.
pub fn compute_breakdown_comparison(
    breakdown: Option<&AnomalyBreakdown>,
) -> Vec<DimensionColumnComparison> {
    let Some(breakdown) = breakdown else {
        return Vec::new();
    };

    let columns: BTreeSet<&String> = breakdown
        .current
        .iter()
        .chain(breakdown.baseline.iter())
        .flat_map(|period| period.breakdown.keys())
        .collect();

    let comparisons: Vec<DimensionColumnComparison> = columns
        .into_iter()
        .map(|column| {
            compare_dimension_column(
                column,
                breakdown.current_column(column),
                breakdown.baseline_column(column),
            )
        })
        .collect();

    debug!("Compared {} dimension columns", comparisons.len());
    comparisons
}

/// Root id of the treemap drawn for `column`.
pub fn treemap_root_id(column: &str) -> String {
    format!("{}-parent", column)
}

/// Treemap for one column: a size-0 root followed by one leaf per value.
///
/// A leaf whose current count is 0 is given size 1 so the chart still draws
/// it. When a dimension value is literally named like the root, the root id
/// takes another `-parent` suffix until it is unique.
pub fn format_treemap_data(
    comparison: &DimensionColumnComparison,
    column_name: &str,
) -> Vec<TreemapNode> {
    let mut root_id = treemap_root_id(&comparison.column);
    while comparison.dimension_comparison_data.contains_key(&root_id) {
        root_id = treemap_root_id(&root_id);
    }

    let mut nodes = Vec::with_capacity(comparison.dimension_comparison_data.len() + 1);
    nodes.push(TreemapNode {
        id: root_id.clone(),
        size: 0,
        parent: None,
        extra_data: None,
    });
    nodes.extend(
        comparison
            .dimension_comparison_data
            .iter()
            .map(|(value, data)| TreemapNode {
                id: value.clone(),
                size: if data.current == 0 { 1 } else { data.current },
                parent: Some(root_id.clone()),
                extra_data: Some(TreemapExtraData {
                    comparison: *data,
                    column_name: column_name.to_string(),
                }),
            }),
    );
    nodes
}

/// Every `(column, value)` pair of the current period, usable as a filter.
pub fn format_dimension_options(breakdown: Option<&AnomalyBreakdown>) -> Vec<FilterOption> {
    let Some(current) = breakdown.and_then(|b| b.current.as_ref()) else {
        return Vec::new();
    };

    current
        .breakdown
        .iter()
        .flat_map(|(column, bucket)| {
            bucket
                .keys()
                .map(move |value| FilterOption::new(column.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
#[path = "breakdown_tests.rs"]
mod breakdown_tests;
