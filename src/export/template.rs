// src/export/template.rs

//! Fixed cell layout of the institutional Wochenbericht sheet.
//! Row and column indices are zero-based; comments give the sheet's
//! A1-style addresses.

pub const SHEET_NAME: &str = "Wochenbericht";

// ---------------------------
// Header cells
// ---------------------------
pub const CELL_KW: (u32, u16) = (0, 7); // H1: calendar week number
pub const CELL_WEEK_START: (u32, u16) = (0, 11); // L1: start date (German text)
pub const CELL_WEEK_END: (u32, u16) = (0, 17); // R1: end date
pub const CELL_NAME: (u32, u16) = (2, 3); // D3: surname
pub const CELL_VORNAME: (u32, u16) = (2, 15); // P3: first name
pub const CELL_ARBEITSSTAETTE: (u32, u16) = (4, 3); // D5: site / projects
pub const CELL_ART_DER_ARBEIT: (u32, u16) = (5, 3); // D6: kind of work

// ---------------------------
// Weekday columns H..N (Monday..Sunday) and the date header row 9
// ---------------------------
pub const WEEKDAY_COL_FIRST: u16 = 7; // column H
pub const WEEKDAY_LABEL_ROW: u32 = 7; // row 8: Mo..So labels
pub const DATE_HEADER_ROW: u32 = 8; // row 9: day-of-month numbers

pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

// ---------------------------
// Data rows 10..49 (40-row template capacity)
// ---------------------------
pub const DATA_ROW_FIRST: u32 = 9; // row 10
pub const DATA_ROW_LAST: u32 = 48; // row 49
pub const MAX_DATA_ROWS: usize = (DATA_ROW_LAST - DATA_ROW_FIRST + 1) as usize;

// Per-row columns.
pub const COL_SITE: u16 = 0; // A: site name / Ort
pub const COL_BEGIN: u16 = 4; // E: begin time
pub const COL_END: u16 = 5; // F: end time
pub const COL_PAUSE: u16 = 6; // G: break hours
pub const COL_LOHN_TYPE: u16 = 16; // Q: wage-type code
pub const COL_AUSLOESE: u16 = 17; // R: Auslöse
pub const COL_ZULAGE: u16 = 18; // S: Zulage
pub const COL_PROJEKT: u16 = 19; // T: project number
pub const COL_KABELSCHACHT: u16 = 20; // U: Kabelschacht info
pub const COL_SM_NR: u16 = 21; // V: SM-Nr
pub const COL_BAULEITER: u16 = 22; // W: Bauleiter
pub const COL_KOLLEGE: u16 = 23; // X: colleague

// ---------------------------
// Vehicle footer
// ---------------------------
pub const CELL_CAR_PLATE: (u32, u16) = (50, 3); // D51: license plate
pub const CELL_CAR_PLATE2: (u32, u16) = (50, 10); // K51: second vehicle
pub const CELL_CAR_KM_STAND: (u32, u16) = (50, 17); // R51: odometer
pub const CELL_CAR_KM_DRIVEN: (u32, u16) = (51, 17); // R52: km driven
