mod common;
use common::line;
use wochenbericht::hours::{
    DayValue, DecimalField, auto_break_hours, day_cell_value, gross_hours_of, has_meaningful_line,
    infer_break_from_net, net_hours, parse_decimal, time_to_fraction,
};
use wochenbericht::models::{DailyLine, HoursOverride, LineType};

#[test]
fn test_auto_break_threshold_boundaries() {
    assert_eq!(auto_break_hours(9.6), 0.75);
    assert_eq!(auto_break_hours(9.5), 0.5);
    assert_eq!(auto_break_hours(6.01), 0.5);
    assert_eq!(auto_break_hours(6.0), 0.0);
    assert_eq!(auto_break_hours(0.0), 0.0);
}

#[test]
fn test_gross_hours_wraps_past_midnight() {
    assert_eq!(gross_hours_of("22:00", "02:00"), Some(4.0));
    assert_eq!(gross_hours_of("08:00", "16:30"), Some(8.5));
}

#[test]
fn test_time_to_fraction() {
    let frac = time_to_fraction("08:00").unwrap();
    assert!((frac - 8.0 / 24.0).abs() < 1e-12);

    assert_eq!(time_to_fraction(""), None);
    assert_eq!(time_to_fraction("8h"), None);
    assert_eq!(time_to_fraction("25:00"), None);
}

#[test]
fn test_parse_decimal_accepts_comma_and_dot() {
    assert_eq!(parse_decimal("7,5"), DecimalField::Number(7.5));
    assert_eq!(parse_decimal("7.5"), DecimalField::Number(7.5));
    assert_eq!(parse_decimal(" 320 "), DecimalField::Number(320.0));
    assert_eq!(parse_decimal("x"), DecimalField::Text("x".to_string()));
    assert_eq!(parse_decimal(""), DecimalField::Empty);
    assert_eq!(parse_decimal("   "), DecimalField::Empty);
}

#[test]
fn test_day_cell_value_from_times_with_auto_break() {
    // 08:00 - 16:30: gross 8.5h, auto break 0.5h, net 8.0h.
    let value = day_cell_value(&HoursOverride::Absent, "08:00", "16:30", "");
    assert_eq!(value, DayValue::Hours(8.0));
}

#[test]
fn test_day_cell_value_rounds_to_two_decimals() {
    // 08:00 - 14:05: gross 6h05, auto break 0.5h, net 5.5833.. -> 5.58.
    let value = day_cell_value(&HoursOverride::Absent, "08:00", "14:05", "");
    assert_eq!(value, DayValue::Hours(5.58));
}

#[test]
fn test_day_cell_value_with_pause_override() {
    let value = day_cell_value(&HoursOverride::Absent, "08:00", "16:30", "0,25");
    assert_eq!(value, DayValue::Hours(8.25));
}

#[test]
fn test_day_cell_value_explicit_override_wins() {
    let value = day_cell_value(&HoursOverride::parse("7,5"), "08:00", "16:30", "");
    assert_eq!(value, DayValue::Hours(7.5));
}

#[test]
fn test_day_cell_value_marker_passes_through() {
    let value = day_cell_value(&HoursOverride::parse("x"), "", "", "");
    assert_eq!(value, DayValue::Marker("x".to_string()));
}

#[test]
fn test_day_cell_value_without_times_is_absent() {
    let value = day_cell_value(&HoursOverride::DeriveFromTime, "", "", "");
    assert_eq!(value, DayValue::None);
}

#[test]
fn test_net_hours_of_line() {
    assert_eq!(net_hours(&line("Nord", "08:00", "16:30")), Some(8.0));
    assert_eq!(net_hours(&DailyLine::default()), None);
}

#[test]
fn test_infer_break_prefers_smallest_consistent_pause() {
    assert_eq!(infer_break_from_net(4.0), Some(0.0));
    assert_eq!(infer_break_from_net(8.0), Some(0.5));
    assert_eq!(infer_break_from_net(9.3), Some(0.75));
}

#[test]
fn test_meaningful_line_default_wage_type_is_empty() {
    // Only the default wage code set: not meaningful.
    let empty = DailyLine::default();
    assert_eq!(empty.lohn_type, "S");
    assert!(!has_meaningful_line(&empty));

    // A non-default wage code alone is meaningful.
    let krank = DailyLine {
        lohn_type: "K".to_string(),
        ..Default::default()
    };
    assert!(has_meaningful_line(&krank));
}

#[test]
fn test_meaningful_line_any_field_counts() {
    assert!(has_meaningful_line(&line("Nord", "", "")));
    assert!(has_meaningful_line(&line("", "08:00", "")));

    let marker = DailyLine {
        day_hours_override: HoursOverride::parse("x"),
        ..Default::default()
    };
    assert!(has_meaningful_line(&marker));

    // The derive-from-time sentinel is the default editor state.
    let auto_only = DailyLine {
        day_hours_override: HoursOverride::DeriveFromTime,
        ..Default::default()
    };
    assert!(!has_meaningful_line(&auto_only));
}

#[test]
fn test_baustelle_line_never_carries_times() {
    let raw = DailyLine {
        line_type: LineType::Baustelle,
        beginn: "08:00".to_string(),
        ende: "16:00".to_string(),
        pause_override: "0,5".to_string(),
        site_name_ort: "Schacht 12".to_string(),
        ..Default::default()
    };

    let normalized = raw.normalize();
    assert!(normalized.beginn.is_empty());
    assert!(normalized.ende.is_empty());
    assert!(normalized.pause_override.is_empty());
    assert_eq!(normalized.site_name_ort, "Schacht 12");
}

#[test]
fn test_hours_override_wire_round_trip() {
    assert_eq!(HoursOverride::parse(""), HoursOverride::Absent);
    assert_eq!(
        HoursOverride::parse("__AUTO_FROM_TIME__"),
        HoursOverride::DeriveFromTime
    );
    assert_eq!(HoursOverride::parse("7,5"), HoursOverride::Explicit(7.5));
    assert_eq!(
        HoursOverride::parse("x"),
        HoursOverride::Marker("x".to_string())
    );

    assert_eq!(
        HoursOverride::DeriveFromTime.as_wire(),
        "__AUTO_FROM_TIME__"
    );
    assert_eq!(HoursOverride::Absent.as_wire(), "");
}
