//! Row computer: time fractions, gross/net hour computation and the
//! statutory break schedule.
//!
//! Values follow the institutional template rules: the break table is
//! evaluated on gross hours, and net hours are rounded to 2 decimals.

use crate::models::line::DEFAULT_LOHN_TYPE;
use crate::models::{DailyLine, HoursOverride};
use crate::utils::time::parse_time;
use chrono::Timelike;

/// Decimal form field: numeric, opaque text, or empty.
/// Accepts both `,` and `.` as the fractional separator.
#[derive(Clone, Debug, PartialEq)]
pub enum DecimalField {
    Number(f64),
    Text(String),
    Empty,
}

pub fn parse_decimal(raw: &str) -> DecimalField {
    let txt = raw.trim();
    if txt.is_empty() {
        return DecimalField::Empty;
    }

    match txt.replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() => DecimalField::Number(n),
        _ => DecimalField::Text(txt.to_string()),
    }
}

/// "HH:MM" as a fraction of a day in `[0, 1)`; malformed or empty input
/// yields None.
pub fn time_to_fraction(raw: &str) -> Option<f64> {
    let t = parse_time(raw.trim())?;
    Some(f64::from(t.hour() * 60 + t.minute()) / (24.0 * 60.0))
}

/// End minus start in hours, wrapping past midnight when negative.
pub fn gross_hours(start_frac: f64, end_frac: f64) -> f64 {
    let mut diff = end_frac - start_frac;
    if diff < 0.0 {
        diff += 1.0;
    }
    diff * 24.0
}

/// Gross hours of a begin/end pair, if both parse.
pub fn gross_hours_of(beginn: &str, ende: &str) -> Option<f64> {
    let start = time_to_fraction(beginn)?;
    let end = time_to_fraction(ende)?;
    Some(gross_hours(start, end))
}

/// Statutory break schedule, evaluated on gross hours.
/// Thresholds are exclusive: more than 9.5h -> 0.75h, more than 6h -> 0.5h.
pub fn auto_break_hours(gross: f64) -> f64 {
    if gross > 9.5 {
        0.75
    } else if gross > 6.0 {
        0.5
    } else {
        0.0
    }
}

/// Smallest break consistent with the auto-break thresholds when only net
/// hours are known. Display-only hint, never part of persisted computation.
pub fn infer_break_from_net(net: f64) -> Option<f64> {
    [0.0, 0.5, 0.75]
        .into_iter()
        .find(|&pause| auto_break_hours(net + pause) == pause)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The value a row contributes to its weekday cell.
#[derive(Clone, Debug, PartialEq)]
pub enum DayValue {
    Hours(f64),
    /// Opaque marker ("day worked, no numeric hours").
    Marker(String),
    None,
}

/// Compute the day cell value from the override and the raw time fields.
///
/// An explicit numeric override wins; a marker override passes through.
/// Otherwise gross hours are derived from begin/end, and a numeric break
/// override (or the auto break) is subtracted.
pub fn day_cell_value(
    hours_override: &HoursOverride,
    beginn: &str,
    ende: &str,
    pause_override: &str,
) -> DayValue {
    match hours_override {
        HoursOverride::Explicit(n) => return DayValue::Hours(round2(*n)),
        HoursOverride::Marker(m) => return DayValue::Marker(m.clone()),
        HoursOverride::DeriveFromTime | HoursOverride::Absent => {}
    }

    let Some(gross) = gross_hours_of(beginn, ende) else {
        return DayValue::None;
    };

    let break_hours = match parse_decimal(pause_override) {
        DecimalField::Number(pause) => pause,
        _ => auto_break_hours(gross),
    };

    DayValue::Hours(round2(gross - break_hours))
}

/// Net hours of a line, when the line yields a numeric day value.
pub fn net_hours(line: &DailyLine) -> Option<f64> {
    match day_cell_value(
        &line.day_hours_override,
        &line.beginn,
        &line.ende,
        &line.pause_override,
    ) {
        DayValue::Hours(h) => Some(h),
        _ => None,
    }
}

/// A line counts for summaries and export iff it carries any data beyond
/// the default wage type. Single source of truth for export filtering and
/// summary counts.
pub fn has_meaningful_line(line: &DailyLine) -> bool {
    let override_set = matches!(
        line.day_hours_override,
        HoursOverride::Explicit(_) | HoursOverride::Marker(_)
    );

    let text_fields = [
        &line.site_name_ort,
        &line.beginn,
        &line.ende,
        &line.pause_override,
        &line.ausloese,
        &line.zulage,
        &line.projektnummer,
        &line.kabelschacht_info,
        &line.sm_nr,
        &line.bauleiter,
        &line.arbeitskollege,
    ];

    if override_set || text_fields.iter().any(|f| !f.trim().is_empty()) {
        return true;
    }

    let lohn = line.lohn_type.trim();
    !lohn.is_empty() && lohn != DEFAULT_LOHN_TYPE
}
