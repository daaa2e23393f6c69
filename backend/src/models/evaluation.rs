//! Alert evaluation payloads and the chart points derived from them.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::time::EpochMillis;

/// Serialize NaN as `null` and read `null` (or a missing value) back as NaN.
pub(crate) mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Parallel arrays describing one detection's time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionData {
    #[serde(default)]
    pub timestamp: Option<Vec<EpochMillis>>,
    #[serde(default)]
    pub current: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub expected: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub upper_bound: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub lower_bound: Option<Vec<Option<f64>>>,
}

/// Anomaly as reported by the evaluation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRecord {
    #[serde(default)]
    pub start_time: EpochMillis,
    #[serde(default)]
    pub end_time: EpochMillis,
    #[serde(default)]
    pub avg_current_val: Option<f64>,
    #[serde(default)]
    pub avg_baseline_val: Option<f64>,
}

/// Output of a single detection node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionEvaluation {
    #[serde(default)]
    pub data: Option<DetectionData>,
    #[serde(default)]
    pub anomalies: Option<Vec<AnomalyRecord>>,
}

/// Detection evaluations keyed by evaluation id, in payload order.
///
/// JSON objects are read into a `Vec` so the order the server emitted them in
/// is the order the points are projected in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionEvaluations(pub Vec<(String, DetectionEvaluation)>);

impl DetectionEvaluations {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetectionEvaluation)> {
        self.0.iter().map(|(id, evaluation)| (id.as_str(), evaluation))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, DetectionEvaluation)> for DetectionEvaluations {
    fn from_iter<I: IntoIterator<Item = (String, DetectionEvaluation)>>(iter: I) -> Self {
        DetectionEvaluations(iter.into_iter().collect())
    }
}

impl Serialize for DetectionEvaluations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, evaluation) in &self.0 {
            map.serialize_entry(id, evaluation)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DetectionEvaluations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = DetectionEvaluations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of detection evaluations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, evaluation)) =
                    access.next_entry::<String, Option<DetectionEvaluation>>()?
                {
                    entries.push((id, evaluation.unwrap_or_default()));
                }
                Ok(DetectionEvaluations(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Result of evaluating an alert over a time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvaluation {
    #[serde(default)]
    pub detection_evaluations: Option<DetectionEvaluations>,
    #[serde(default)]
    pub start: Option<EpochMillis>,
    #[serde(default)]
    pub end: Option<EpochMillis>,
    #[serde(default)]
    pub last_timestamp: Option<EpochMillis>,
}

/// A chart-ready time series point. Missing values are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub timestamp: EpochMillis,
    #[serde(with = "nan_as_null", default = "nan")]
    pub current: f64,
    #[serde(with = "nan_as_null", default = "nan")]
    pub expected: f64,
    #[serde(with = "nan_as_null", default = "nan")]
    pub upper_bound: f64,
    #[serde(with = "nan_as_null", default = "nan")]
    pub lower_bound: f64,
}

fn nan() -> f64 {
    f64::NAN
}

impl SeriesPoint {
    pub fn values(&self) -> [f64; 4] {
        [self.current, self.upper_bound, self.lower_bound, self.expected]
    }
}

/// A chart-ready anomaly span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPoint {
    pub start_time: EpochMillis,
    pub end_time: EpochMillis,
    #[serde(with = "nan_as_null", default = "nan")]
    pub current: f64,
    #[serde(with = "nan_as_null", default = "nan")]
    pub baseline: f64,
}

impl From<&AnomalyRecord> for AnomalyPoint {
    fn from(record: &AnomalyRecord) -> Self {
        AnomalyPoint {
            start_time: record.start_time,
            end_time: record.end_time,
            current: record.avg_current_val.unwrap_or(f64::NAN),
            baseline: record.avg_baseline_val.unwrap_or(f64::NAN),
        }
    }
}

/// Anything positioned on the time axis.
pub trait Timestamped {
    fn timestamp(&self) -> EpochMillis;
}

impl Timestamped for SeriesPoint {
    fn timestamp(&self) -> EpochMillis {
        self.timestamp
    }
}

/// Anomalies are placed on the axis by where they start.
impl Timestamped for AnomalyPoint {
    fn timestamp(&self) -> EpochMillis {
        self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluations_keep_payload_order() {
        let json = r#"{
            "detectionEvaluations": {
                "zeta": {"data": {"timestamp": [1]}},
                "alpha": {"data": {"timestamp": [2]}},
                "mid": null
            }
        }"#;
        let evaluation: AlertEvaluation = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = evaluation
            .detection_evaluations
            .as_ref()
            .unwrap()
            .iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let evaluation: AlertEvaluation = serde_json::from_str("{}").unwrap();
        assert!(evaluation.detection_evaluations.is_none());
        assert!(evaluation.start.is_none());

        let detection: DetectionEvaluation = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert_eq!(detection.data, Some(DetectionData::default()));
        assert!(detection.anomalies.is_none());
    }

    #[test]
    fn test_series_point_nan_round_trip() {
        let point = SeriesPoint {
            timestamp: 1,
            current: 2.0,
            expected: f64::NAN,
            upper_bound: 3.0,
            lower_bound: f64::NAN,
        };
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(value["expected"], serde_json::Value::Null);
        assert_eq!(value["upperBound"], serde_json::json!(3.0));

        let back: SeriesPoint = serde_json::from_value(value).unwrap();
        assert_eq!(back.current, 2.0);
        assert!(back.expected.is_nan());
        assert!(back.lower_bound.is_nan());
    }

    #[test]
    fn test_anomaly_point_from_record() {
        let record = AnomalyRecord {
            start_time: 16,
            end_time: 17,
            avg_current_val: Some(18.0),
            avg_baseline_val: None,
        };
        let point = AnomalyPoint::from(&record);
        assert_eq!(point.start_time, 16);
        assert_eq!(point.end_time, 17);
        assert_eq!(point.current, 18.0);
        assert!(point.baseline.is_nan());
        assert_eq!(point.timestamp(), 16);
    }
}
