#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable the configuration loader reads.
pub const DASHBOARD_ENV_KEYS: [&str; 6] = [
    "DASHBOARD_CONFIG",
    "HOST",
    "PORT",
    "DASHBOARD_TIMEZONE",
    "DASHBOARD_UTC_OFFSET_MINUTES",
    "DASHBOARD_WEEK_START",
];

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and callers are serialized since the
/// environment is process-global and tests run in parallel.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::apply(changes);
    f()
}

/// Like [`with_scoped_env`], but first clears every dashboard variable so
/// the developer's shell cannot leak into the test.
pub fn with_dashboard_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> =
        DASHBOARD_ENV_KEYS.iter().map(|key| (*key, None)).collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(key, _)| *key).collect();
        let saved = keys
            .into_iter()
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect();

        for (key, value) in changes {
            set_or_remove(key, *value);
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

/// A temporary `dashboard.toml` holding `contents`.
pub fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// Alert evaluation with two detection evaluations, as the detection
/// service returns it.
pub fn sample_evaluation_json() -> Value {
    json!({
        "detectionEvaluations": {
            "output_AnomalyDetectorResult_0": {
                "data": {
                    "timestamp": [1000, 2000, 3000, 4000],
                    "current": [10.0, 12.0, null, 40.0],
                    "expected": [11.0, 11.0, 11.0, 11.0],
                    "upperBound": [15.0, 15.0, 15.0, 15.0],
                    "lowerBound": [7.0, 7.0, 7.0, 7.0]
                },
                "anomalies": [
                    { "startTime": 4000, "endTime": 5000, "avgCurrentVal": 40.0, "avgBaselineVal": 11.0 }
                ]
            },
            "output_AnomalyDetectorResult_1": {
                "data": {
                    "timestamp": [6000],
                    "current": [5.0],
                    "expected": [6.0],
                    "upperBound": [9.0],
                    "lowerBound": [3.0]
                },
                "anomalies": []
            }
        },
        "start": 1000,
        "end": 6000,
        "lastTimestamp": 6000
    })
}

/// Breakdown of an anomaly by browser and country.
pub fn sample_breakdown_json() -> Value {
    json!({
        "current": {
            "breakdown": {
                "browser": { "chrome": 60, "firefox": 30, "safari": 10 },
                "country": { "US": 80, "CA": 20 }
            }
        },
        "baseline": {
            "breakdown": {
                "browser": { "chrome": 50, "firefox": 50 },
                "country": { "US": 40, "CA": 40, "MX": 20 }
            }
        }
    })
}
