// src/export/writer.rs

//! Embedded writer backend: renders the Wochenbericht layout in process
//! with rust_xlsxwriter. Always available, never produces PDF.
//!
//! Each segment gets a freshly synthesized workbook, so the data row range
//! and the weekday date row start out cleared and re-rendering is
//! idempotent by construction.

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::backend::{Artifact, RenderedSegment, SegmentRenderer};
use crate::export::excel_date::date_serial;
use crate::export::payload::{PreparedSegment, SegmentPayload};
use crate::export::template::*;
use crate::hours::{self, DayValue, DecimalField};
use crate::utils::date::parse_date;
use chrono::Datelike;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

pub struct EmbeddedWriter;

impl Default for EmbeddedWriter {
    fn default() -> Self {
        Self::new()
    }
}

struct CellFormats {
    label: Format,
    header_value: Format,
    date: Format,
    day_number: Format,
    time: Format,
    hours: Format,
    text: Format,
    footer_number: Format,
}

impl CellFormats {
    fn new() -> Self {
        let bordered = || Format::new().set_border(FormatBorder::Thin);

        Self {
            label: Format::new().set_bold(),
            header_value: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(0xEAF3FB)),
            date: bordered().set_num_format("dd.mm.yyyy"),
            day_number: bordered().set_align(FormatAlign::Center).set_num_format("0.00"),
            time: bordered().set_num_format("hh:mm"),
            hours: bordered().set_num_format("0.00"),
            text: bordered(),
            footer_number: Format::new().set_num_format("0.00"),
        }
    }
}

impl EmbeddedWriter {
    pub fn new() -> Self {
        EmbeddedWriter
    }

    /// Render one segment payload into workbook bytes.
    /// Returns (bytes, rows_written, rows_truncated, warnings).
    pub fn render_segment(
        &self,
        payload: &SegmentPayload,
    ) -> AppResult<(Vec<u8>, u32, u32, Vec<String>)> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let formats = CellFormats::new();

        write_header(worksheet, payload, &formats)?;
        write_date_row(worksheet, payload, &formats)?;
        let (rows_written, rows_truncated) = write_rows(worksheet, payload, &formats)?;
        write_car_usage(worksheet, payload, &formats)?;

        let bytes = workbook.save_to_buffer()?;

        let mut warnings = Vec::new();
        if rows_truncated > 0 {
            warnings.push(truncation_warning(rows_truncated));
        }

        Ok((bytes, rows_written, rows_truncated, warnings))
    }
}

pub(crate) fn truncation_warning(truncated: u32) -> String {
    format!(
        "More than {MAX_DATA_ROWS} lines for this report. Export truncated by {truncated} line(s) to fit rows 10-49."
    )
}

impl SegmentRenderer for EmbeddedWriter {
    fn render(
        &self,
        _format: &ExportFormat,
        segments: &[PreparedSegment],
    ) -> AppResult<Vec<RenderedSegment>> {
        let mut rendered = Vec::with_capacity(segments.len());

        for segment in segments {
            let (bytes, rows_written, rows_truncated, warnings) =
                self.render_segment(&segment.payload)?;

            rendered.push(RenderedSegment {
                base_name: segment.base_name.clone(),
                spreadsheet: Artifact::Bytes(bytes),
                pdf: None,
                warnings,
                rows_written: Some(rows_written),
                rows_truncated: Some(rows_truncated),
            });
        }

        Ok(rendered)
    }
}

fn write_header(
    ws: &mut Worksheet,
    payload: &SegmentPayload,
    formats: &CellFormats,
) -> AppResult<()> {
    ws.write_string_with_format(0, 0, "Wochenbericht Nr.", &formats.label)?;
    ws.write_number_with_format(CELL_KW.0, CELL_KW.1, f64::from(payload.kw), &formats.header_value)?;

    ws.write_string_with_format(0, 10, "vom", &formats.label)?; // K1
    ws.write_string(CELL_WEEK_START.0, CELL_WEEK_START.1, &payload.report_start_de)?;

    ws.write_string_with_format(0, 16, "bis", &formats.label)?; // Q1
    if let Some(end) = parse_date(&payload.report_end) {
        ws.write_number_with_format(CELL_WEEK_END.0, CELL_WEEK_END.1, date_serial(end), &formats.date)?;
    }

    let profile = &payload.profile;
    ws.write_string_with_format(2, 0, "Name:", &formats.label)?; // A3
    ws.write_string(CELL_NAME.0, CELL_NAME.1, &profile.name)?;
    ws.write_string_with_format(2, 13, "Vorname:", &formats.label)?; // N3
    ws.write_string(CELL_VORNAME.0, CELL_VORNAME.1, &profile.vorname)?;

    ws.write_string_with_format(4, 0, "Arbeitsstätte/Projekte:", &formats.label)?; // A5
    ws.write_string(
        CELL_ARBEITSSTAETTE.0,
        CELL_ARBEITSSTAETTE.1,
        &profile.arbeitsstaette_projekte,
    )?;
    ws.write_string_with_format(5, 0, "Art der Arbeit:", &formats.label)?; // A6
    ws.write_string(
        CELL_ART_DER_ARBEIT.0,
        CELL_ART_DER_ARBEIT.1,
        &profile.art_der_arbeit,
    )?;

    Ok(())
}

/// Weekday labels plus the day-of-month header. Only columns whose date
/// falls within this segment are populated; the other columns stay empty.
fn write_date_row(
    ws: &mut Worksheet,
    payload: &SegmentPayload,
    formats: &CellFormats,
) -> AppResult<()> {
    for (idx, label) in WEEKDAY_LABELS.iter().enumerate() {
        ws.write_string_with_format(
            WEEKDAY_LABEL_ROW,
            WEEKDAY_COL_FIRST + idx as u16,
            *label,
            &formats.header_value,
        )?;
    }

    for iso in &payload.all_week_dates {
        if !payload.segment_dates.contains(iso) {
            continue;
        }
        let Some(date) = parse_date(iso) else {
            continue;
        };
        let col = WEEKDAY_COL_FIRST + date.weekday().num_days_from_monday() as u16;
        ws.write_number_with_format(
            DATE_HEADER_ROW,
            col,
            f64::from(date.day()),
            &formats.header_value,
        )?;
    }

    Ok(())
}

fn weekday_col(iso: &str) -> Option<u16> {
    let date = parse_date(iso)?;
    Some(WEEKDAY_COL_FIRST + date.weekday().num_days_from_monday() as u16)
}

/// Write the data rows, bounded to the template capacity.
/// Returns (rows_written, rows_truncated).
fn write_rows(
    ws: &mut Worksheet,
    payload: &SegmentPayload,
    formats: &CellFormats,
) -> AppResult<(u32, u32)> {
    let total = payload.rows.len();
    let truncated = total.saturating_sub(MAX_DATA_ROWS) as u32;

    for (idx, row) in payload.rows.iter().take(MAX_DATA_ROWS).enumerate() {
        let row_no = DATA_ROW_FIRST + idx as u32;

        ws.write_string_with_format(row_no, COL_SITE, &row.site_name_ort, &formats.text)?;

        let start = hours::time_to_fraction(&row.beginn);
        let end = hours::time_to_fraction(&row.ende);
        if let Some(frac) = start {
            ws.write_number_with_format(row_no, COL_BEGIN, frac, &formats.time)?;
        }
        if let Some(frac) = end {
            ws.write_number_with_format(row_no, COL_END, frac, &formats.time)?;
        }

        let day_value = row.day_cell_value();

        // Break cell: explicit numeric override wins; otherwise, for rows
        // without times, an inferred hint derived from the net hours.
        match hours::parse_decimal(&row.pause_override) {
            DecimalField::Number(pause) => {
                ws.write_number_with_format(row_no, COL_PAUSE, pause, &formats.hours)?;
            }
            _ if start.is_none() && end.is_none() => {
                if let DayValue::Hours(net) = day_value {
                    if let Some(pause) = hours::infer_break_from_net(net) {
                        if pause > 0.0 {
                            ws.write_number_with_format(row_no, COL_PAUSE, pause, &formats.hours)?;
                        }
                    }
                }
            }
            _ => {}
        }

        if let Some(col) = weekday_col(&row.date) {
            match &day_value {
                DayValue::Hours(h) if *h >= 0.0 => {
                    ws.write_number_with_format(row_no, col, *h, &formats.day_number)?;
                }
                DayValue::Marker(marker) => {
                    let marker = marker.trim();
                    let cell_text = if marker.eq_ignore_ascii_case("x") { "x" } else { marker };
                    ws.write_string_with_format(row_no, col, cell_text, &formats.text)?;
                }
                _ => {}
            }
        }

        ws.write_string_with_format(row_no, COL_LOHN_TYPE, &row.lohn_type, &formats.text)?;
        ws.write_string_with_format(row_no, COL_AUSLOESE, &row.ausloese, &formats.text)?;
        write_decimal_or_text(ws, row_no, COL_ZULAGE, &row.zulage, formats)?;
        ws.write_string_with_format(row_no, COL_PROJEKT, &row.projektnummer, &formats.text)?;
        ws.write_string_with_format(row_no, COL_KABELSCHACHT, &row.kabelschacht_info, &formats.text)?;
        write_decimal_or_text(ws, row_no, COL_SM_NR, &row.sm_nr, formats)?;
        ws.write_string_with_format(row_no, COL_BAULEITER, &row.bauleiter, &formats.text)?;
        ws.write_string_with_format(row_no, COL_KOLLEGE, &row.arbeitskollege, &formats.text)?;
    }

    Ok((total.min(MAX_DATA_ROWS) as u32, truncated))
}

/// Numeric parse success gets the number format, failure writes the raw
/// text as a fallback.
fn write_decimal_or_text(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    raw: &str,
    formats: &CellFormats,
) -> AppResult<()> {
    match hours::parse_decimal(raw) {
        DecimalField::Number(n) => {
            ws.write_number_with_format(row, col, n, &formats.hours)?;
        }
        DecimalField::Text(txt) => {
            ws.write_string_with_format(row, col, &txt, &formats.text)?;
        }
        DecimalField::Empty => {}
    }
    Ok(())
}

fn write_car_usage(
    ws: &mut Worksheet,
    payload: &SegmentPayload,
    formats: &CellFormats,
) -> AppResult<()> {
    let car = &payload.car_usage;

    ws.write_string_with_format(50, 0, "KFZ-Kennzeichen:", &formats.label)?; // A51
    if !car.kennzeichen.trim().is_empty() {
        ws.write_string(CELL_CAR_PLATE.0, CELL_CAR_PLATE.1, car.kennzeichen.trim())?;
    }

    ws.write_string_with_format(50, 8, "2. Fahrzeug:", &formats.label)?; // I51
    if !car.kennzeichen2.trim().is_empty() {
        ws.write_string(CELL_CAR_PLATE2.0, CELL_CAR_PLATE2.1, car.kennzeichen2.trim())?;
    }

    ws.write_string_with_format(50, 15, "KM-Stand:", &formats.label)?; // P51
    write_footer_value(ws, CELL_CAR_KM_STAND, &car.km_stand, formats)?;

    ws.write_string_with_format(51, 15, "gefahrene KM:", &formats.label)?; // P52
    write_footer_value(ws, CELL_CAR_KM_DRIVEN, &car.gefahrene_km, formats)?;

    Ok(())
}

fn write_footer_value(
    ws: &mut Worksheet,
    cell: (u32, u16),
    raw: &str,
    formats: &CellFormats,
) -> AppResult<()> {
    match hours::parse_decimal(raw) {
        DecimalField::Number(n) => {
            ws.write_number_with_format(cell.0, cell.1, n, &formats.footer_number)?;
        }
        DecimalField::Text(txt) => {
            ws.write_string(cell.0, cell.1, &txt)?;
        }
        DecimalField::Empty => {}
    }
    Ok(())
}
