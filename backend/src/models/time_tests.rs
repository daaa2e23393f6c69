use super::*;

#[test]
fn test_time_range_from_phrase() {
    assert_eq!(TimeRange::from_label("last 15 minutes"), Some(TimeRange::Last15Minutes));
    assert_eq!(TimeRange::from_label("Last 24 Hours"), Some(TimeRange::Last24Hours));
    assert_eq!(TimeRange::from_label("  this   week "), Some(TimeRange::ThisWeek));
    assert_eq!(TimeRange::from_label("custom"), Some(TimeRange::Custom));
}

#[test]
fn test_time_range_from_wire_name() {
    assert_eq!(TimeRange::from_label("LAST_30_DAYS"), Some(TimeRange::Last30Days));
    assert_eq!(TimeRange::from_label("yesterday"), Some(TimeRange::Yesterday));
    assert_eq!(TimeRange::from_label("last_year"), Some(TimeRange::LastYear));
}

#[test]
fn test_time_range_unknown_label() {
    assert_eq!(TimeRange::from_label(""), None);
    assert_eq!(TimeRange::from_label("last fortnight"), None);
    assert!("last fortnight".parse::<TimeRange>().is_err());
}

#[test]
fn test_time_range_serde_uses_wire_name() {
    let json = serde_json::to_string(&TimeRange::Last1Hour).unwrap();
    assert_eq!(json, "\"LAST_1_HOUR\"");

    let parsed: TimeRange = serde_json::from_str("\"THIS_MONTH\"").unwrap();
    assert_eq!(parsed, TimeRange::ThisMonth);
}

#[test]
fn test_time_range_label() {
    assert_eq!(TimeRange::Last12Hours.label(), "Last 12 hours");
    assert_eq!(TimeRange::Today.label(), "Today");
    assert_eq!(TimeRange::Custom.to_string(), "custom");
}

#[test]
fn test_every_range_has_a_kind() {
    for range in TimeRange::ALL {
        let kind = range.kind();
        if *range == TimeRange::Custom {
            assert_eq!(kind, RangeKind::Custom);
        } else {
            assert_ne!(kind, RangeKind::Custom);
        }
    }
    assert_eq!(TimeRange::ALL.len(), 15);
}

#[test]
fn test_custom_duration_clamps_end() {
    let duration = TimeRangeDuration::custom(10, 5);
    assert_eq!(duration.time_range, TimeRange::Custom);
    assert_eq!(duration.start_time, 10);
    assert_eq!(duration.end_time, 10);
}

#[test]
fn test_with_start_time_pushes_end_forward() {
    let duration = TimeRangeDuration::new(TimeRange::Today, 1, 2);

    let moved = duration.with_start_time(5);
    assert_eq!(moved, TimeRangeDuration::new(TimeRange::Custom, 5, 5));

    let earlier = duration.with_start_time(0);
    assert_eq!(earlier, TimeRangeDuration::new(TimeRange::Custom, 0, 2));
}

#[test]
fn test_with_end_time_never_precedes_start() {
    let duration = TimeRangeDuration::new(TimeRange::Custom, 10, 20);
    assert_eq!(duration.with_end_time(30).end_time, 30);
    assert_eq!(duration.with_end_time(3).end_time, 10);
}

#[test]
fn test_duration_contains_is_inclusive() {
    let duration = TimeRangeDuration::custom(1, 3);
    assert!(duration.contains(1));
    assert!(duration.contains(3));
    assert!(!duration.contains(4));
    assert_eq!(duration.duration_millis(), 2);
}

#[test]
fn test_duration_serializes_camel_case() {
    let duration = TimeRangeDuration::custom(1, 2);
    let value = serde_json::to_value(duration).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"timeRange": "CUSTOM", "startTime": 1, "endTime": 2})
    );
}

#[test]
fn test_week_start_default() {
    assert_eq!(WeekStart::default(), WeekStart::Monday);
    assert_eq!(WeekStart::from_label("Sunday"), Some(WeekStart::Sunday));
}
