use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count per dimension value for one column and one period.
pub type DimensionBucket = BTreeMap<String, i64>;

/// Breakdown of one period, keyed by dimension column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownPeriod {
    #[serde(default)]
    pub breakdown: BTreeMap<String, DimensionBucket>,
}

/// Current-period and baseline-period breakdowns for an anomaly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyBreakdown {
    #[serde(default)]
    pub current: Option<BreakdownPeriod>,
    #[serde(default)]
    pub baseline: Option<BreakdownPeriod>,
}

impl AnomalyBreakdown {
    pub fn current_column(&self, column: &str) -> Option<&DimensionBucket> {
        self.current.as_ref()?.breakdown.get(column)
    }

    pub fn baseline_column(&self, column: &str) -> Option<&DimensionBucket> {
        self.baseline.as_ref()?.breakdown.get(column)
    }
}

/// Count and share of a single dimension value within its period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionValueSummary {
    pub count: i64,
    pub percentage: f64,
    pub total_count: i64,
}

/// Current vs. baseline figures for a single dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionComparison {
    pub current: i64,
    pub baseline: i64,
    pub metric_value_diff: i64,
    /// `None` when the baseline count is zero.
    pub metric_value_diff_percentage: Option<f64>,
    pub current_contribution_percentage: f64,
    pub baseline_contribution_percentage: f64,
    pub contribution_diff: f64,
    pub current_total_count: i64,
    pub baseline_total_count: i64,
}

/// Comparison of every value of one dimension column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionColumnComparison {
    pub column: String,
    pub current_total_count: i64,
    pub baseline_total_count: i64,
    pub dimension_comparison_data: BTreeMap<String, DimensionComparison>,
}

/// Comparison figures attached to a treemap leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapExtraData {
    #[serde(flatten)]
    pub comparison: DimensionComparison,
    pub column_name: String,
}

/// A node of a treemap chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapNode {
    pub id: String,
    pub size: i64,
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<TreemapExtraData>,
}

impl TreemapNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A `column = value` filter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    pub key: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// `key=value`
    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}
