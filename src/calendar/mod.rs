//! ISO-8601 week arithmetic and month segmentation.
//! Weeks start on Monday; week 1 is the week containing January 4th.
//!
//! Callers validate `(year, week)` bounds before calling in; this module
//! assumes valid input and has no error path.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// The 7 dates of an ISO week, Monday first.
pub fn iso_week_dates(year: i32, week: u32) -> Vec<NaiveDate> {
    let monday =
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).expect("valid (year, week) pair");

    (0..7)
        .map(|offset| monday.checked_add_days(Days::new(offset)).unwrap())
        .collect()
}

/// The ISO `(year, week)` a date belongs to.
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

/// Number of ISO weeks in a year: December 28 always lies in the final week.
pub fn weeks_in_year(year: i32) -> u32 {
    let dec28 = NaiveDate::from_ymd_opt(year, 12, 28).unwrap();
    iso_week_of(dec28).1
}

/// Contiguous run of week dates falling in the same calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct WeekSegment {
    /// Segment key, "YYYY-MM".
    pub key: String,
    pub year: i32,
    pub month: u32,
    pub dates: Vec<NaiveDate>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub is_single_day: bool,
}

/// Split the 7 dates of a week at month boundaries, in chronological order.
/// A single-month week yields one segment, a boundary-crossing week two.
pub fn split_week_by_month(dates: &[NaiveDate]) -> Vec<WeekSegment> {
    let mut segments: Vec<WeekSegment> = Vec::new();

    for d in dates {
        match segments.last_mut() {
            Some(seg) if seg.year == d.year() && seg.month == d.month() => {
                seg.dates.push(*d);
                seg.end = *d;
                seg.is_single_day = false;
            }
            _ => segments.push(WeekSegment {
                key: format!("{:04}-{:02}", d.year(), d.month()),
                year: d.year(),
                month: d.month(),
                dates: vec![*d],
                start: *d,
                end: *d,
                is_single_day: true,
            }),
        }
    }

    segments
}

/// Week/year labeling of a report, including year carry-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWeek {
    pub year: i32,
    pub week: u32,
    pub carry_over: bool,
}

/// A week spilling into the next year is displayed as week 1 of that year.
pub fn display_week_info(base_year: i32, base_week: u32, dates: &[NaiveDate]) -> DisplayWeek {
    if dates.iter().any(|d| d.year() > base_year) {
        DisplayWeek {
            year: base_year + 1,
            week: 1,
            carry_over: true,
        }
    } else {
        DisplayWeek {
            year: base_year,
            week: base_week,
            carry_over: false,
        }
    }
}

/// Same carry-over rule applied to a single month segment.
pub fn segment_display_info(base_year: i32, base_week: u32, segment_year: i32) -> DisplayWeek {
    if segment_year > base_year {
        DisplayWeek {
            year: segment_year,
            week: 1,
            carry_over: true,
        }
    } else {
        DisplayWeek {
            year: base_year,
            week: base_week,
            carry_over: false,
        }
    }
}
