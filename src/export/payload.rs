// src/export/payload.rs

//! Payload Builder: turn a week's entries into one self-contained
//! SegmentPayload per month segment. A backend needs no other lookup to
//! render a payload.

use crate::calendar::{self, WeekSegment};
use crate::hours;
use crate::models::{CarUsage, DailyEntry, DailyLine, HoursOverride, WeekProfile};
use crate::utils::date::{format_de, iso_string, month_name_de};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A flattened, filtered report line bound to its source date, carrying
/// only fields relevant to rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRow {
    pub date: String,
    pub site_name_ort: String,
    pub beginn: String,
    pub ende: String,
    pub pause_override: String,
    pub day_hours_override: HoursOverride,
    pub lohn_type: String,
    pub ausloese: String,
    pub zulage: String,
    pub projektnummer: String,
    pub kabelschacht_info: String,
    pub sm_nr: String,
    pub bauleiter: String,
    pub arbeitskollege: String,
}

impl Default for ExportRow {
    fn default() -> Self {
        ExportRow::from_line(&NaiveDate::default(), &DailyLine::default())
    }
}

impl ExportRow {
    pub fn from_line(date: &NaiveDate, line: &DailyLine) -> Self {
        Self {
            date: iso_string(*date),
            site_name_ort: line.site_name_ort.clone(),
            beginn: line.beginn.clone(),
            ende: line.ende.clone(),
            pause_override: line.pause_override.clone(),
            day_hours_override: line.day_hours_override.clone(),
            lohn_type: line.lohn_type.clone(),
            ausloese: line.ausloese.clone(),
            zulage: line.zulage.clone(),
            projektnummer: line.projektnummer.clone(),
            kabelschacht_info: line.kabelschacht_info.clone(),
            sm_nr: line.sm_nr.clone(),
            bauleiter: line.bauleiter.clone(),
            arbeitskollege: line.arbeitskollege.clone(),
        }
    }

    /// The value this row contributes to its weekday cell.
    pub fn day_cell_value(&self) -> hours::DayValue {
        hours::day_cell_value(
            &self.day_hours_override,
            &self.beginn,
            &self.ende,
            &self.pause_override,
        )
    }
}

/// Everything one backend call needs for one segment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPayload {
    /// Display calendar week ("KW").
    pub kw: u32,
    pub report_year: i32,
    pub month: u32,
    /// This segment's date range, ISO.
    pub report_start: String,
    pub report_end: String,
    /// German-formatted forms for the header cells.
    pub report_start_de: String,
    pub report_end_de: String,
    /// The full week's range, independent of segmentation.
    pub week_start: String,
    pub week_end: String,
    pub all_week_dates: Vec<String>,
    pub segment_dates: Vec<String>,
    pub profile: WeekProfile,
    pub rows: Vec<ExportRow>,
    /// ISO date -> weekday column index (Monday = 0 .. Sunday = 6).
    pub weekday_columns: BTreeMap<String, u8>,
    pub car_usage: CarUsage,
}

/// A payload plus the identity fields every backend echoes back.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedSegment {
    pub base_name: String,
    pub segment_key: String,
    pub month: u32,
    pub dates: Vec<String>,
    pub report_year: i32,
    pub report_kw: u32,
    pub is_carry_over_to_next_year: bool,
    pub payload: SegmentPayload,
}

/// Build one PreparedSegment per month segment of the given ISO week.
pub fn build_prepared_segments(
    year: i32,
    week: u32,
    entries: &BTreeMap<String, DailyEntry>,
    profile: &WeekProfile,
    car_usage: &CarUsage,
) -> Vec<PreparedSegment> {
    let week_dates = calendar::iso_week_dates(year, week);
    let segments = calendar::split_week_by_month(&week_dates);
    let all_week_dates: Vec<String> = week_dates.iter().copied().map(iso_string).collect();

    segments
        .iter()
        .map(|seg| prepare_segment(seg, year, week, &week_dates, &all_week_dates, entries, profile, car_usage))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn prepare_segment(
    seg: &WeekSegment,
    year: i32,
    week: u32,
    week_dates: &[NaiveDate],
    all_week_dates: &[String],
    entries: &BTreeMap<String, DailyEntry>,
    profile: &WeekProfile,
    car_usage: &CarUsage,
) -> PreparedSegment {
    let display = calendar::segment_display_info(year, week, seg.year);

    let segment_entries: Vec<&DailyEntry> = seg
        .dates
        .iter()
        .filter_map(|d| entries.get(&iso_string(*d)))
        .collect();

    let arbeitsstaette = collect_distinct(
        &segment_entries,
        |e| &e.arbeitsstaette_projekte,
        &profile.arbeitsstaette_projekte,
    );
    let art_der_arbeit = collect_distinct(
        &segment_entries,
        |e| &e.art_der_arbeit,
        &profile.art_der_arbeit,
    );

    let mut rows = Vec::new();
    for date in &seg.dates {
        let Some(entry) = entries.get(&iso_string(*date)) else {
            continue;
        };
        for line in &entry.lines {
            let line = line.clone().normalize();
            if hours::has_meaningful_line(&line) {
                rows.push(ExportRow::from_line(date, &line));
            }
        }
    }

    let weekday_columns: BTreeMap<String, u8> = seg
        .dates
        .iter()
        .map(|d| (iso_string(*d), d.weekday().num_days_from_monday() as u8))
        .collect();

    let base_name = format!(
        "Wochenbericht_{}_{}_KW{:02}",
        month_name_de(seg.month),
        display.year,
        display.week
    );

    PreparedSegment {
        base_name,
        segment_key: seg.key.clone(),
        month: seg.month,
        dates: seg.dates.iter().copied().map(iso_string).collect(),
        report_year: display.year,
        report_kw: display.week,
        is_carry_over_to_next_year: display.carry_over,
        payload: SegmentPayload {
            kw: display.week,
            report_year: display.year,
            month: seg.month,
            report_start: iso_string(seg.start),
            report_end: iso_string(seg.end),
            report_start_de: format_de(seg.start),
            report_end_de: format_de(seg.end),
            week_start: iso_string(week_dates[0]),
            week_end: iso_string(week_dates[6]),
            all_week_dates: all_week_dates.to_vec(),
            segment_dates: seg.dates.iter().copied().map(iso_string).collect(),
            profile: WeekProfile {
                name: profile.name.clone(),
                vorname: profile.vorname.clone(),
                arbeitsstaette_projekte: arbeitsstaette,
                art_der_arbeit,
            },
            rows,
            weekday_columns,
            car_usage: car_usage.clone(),
        },
    }
}

/// Distinct non-empty values across the segment's days, joined in first
/// occurrence order; falls back to the profile default when none present.
fn collect_distinct<'a>(
    entries: &[&'a DailyEntry],
    field: impl Fn(&'a DailyEntry) -> &'a String,
    fallback: &str,
) -> String {
    let mut seen: Vec<&str> = Vec::new();

    for entry in entries {
        let value = field(entry).trim();
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }

    if seen.is_empty() {
        fallback.to_string()
    } else {
        seen.join(" / ")
    }
}
