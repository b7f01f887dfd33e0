// src/export/excel_date.rs

use chrono::NaiveDate;

/// Excel serial for a calendar date (days since the 1899-12-30 epoch).
pub(crate) fn date_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    (date - epoch).num_days() as f64
}
