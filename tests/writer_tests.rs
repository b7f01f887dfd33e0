mod common;
use common::{entry, line, profile, sample_week_data};
use regex::Regex;
use std::io::Read;
use wochenbericht::export::{EmbeddedWriter, build_prepared_segments};
use wochenbericht::models::{DailyLine, HoursOverride, WeekData};

/// Extract a worksheet XML part from the produced workbook bytes.
fn zip_part(bytes: &[u8], part: &str) -> String {
    let cursor = std::io::Cursor::new(bytes.to_vec());
    let mut archive = zip::ZipArchive::new(cursor).expect("workbook is a zip archive");
    let mut file = archive.by_name(part).expect(part);
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("read xml");
    xml
}

fn sheet_xml(bytes: &[u8]) -> String {
    zip_part(bytes, "xl/worksheets/sheet1.xml")
}

/// Numeric value of a cell in the sheet XML, if the cell was written.
fn cell_value(xml: &str, cell: &str) -> Option<f64> {
    let re = Regex::new(&format!(
        r#"<c r="{cell}"[^>]*>(?:<f>[^<]*</f>)?<v>([^<]+)</v>"#
    ))
    .unwrap();
    re.captures(xml)
        .map(|caps| caps[1].parse().expect("numeric cell"))
}

fn render_february_segment(data: &WeekData) -> (Vec<u8>, u32, u32, Vec<String>) {
    let segments =
        build_prepared_segments(2026, 9, &data.entries, &data.profile, &data.car_usage);
    EmbeddedWriter::new()
        .render_segment(&segments[0].payload)
        .expect("render")
}

#[test]
fn test_rendered_workbook_is_an_xlsx_archive() {
    let (bytes, rows_written, rows_truncated, warnings) =
        render_february_segment(&sample_week_data());

    assert!(bytes.starts_with(b"PK"));
    assert_eq!(rows_written, 1);
    assert_eq!(rows_truncated, 0);
    assert!(warnings.is_empty());
}

#[test]
fn test_round_trip_net_hours_cell() {
    // 08:00 - 16:30, no override: gross 8.5h, break 0.5h, net 8.0h.
    // Monday goes to column H, first data row is row 10.
    let (bytes, _, _, _) = render_february_segment(&sample_week_data());
    let xml = sheet_xml(&bytes);

    assert_eq!(cell_value(&xml, "H10"), Some(8.0));

    // Begin/end are written as day fractions.
    let begin = cell_value(&xml, "E10").expect("begin cell");
    assert!((begin - 8.0 / 24.0).abs() < 1e-9);
    let end = cell_value(&xml, "F10").expect("end cell");
    assert!((end - 16.5 / 24.0).abs() < 1e-9);

    // Times given and no explicit pause: the break cell stays empty.
    assert_eq!(cell_value(&xml, "G10"), None);
}

#[test]
fn test_header_cells() {
    let (bytes, _, _, _) = render_february_segment(&sample_week_data());
    let xml = sheet_xml(&bytes);

    // H1 carries the week number.
    assert_eq!(cell_value(&xml, "H1"), Some(9.0));

    let strings = zip_part(&bytes, "xl/sharedStrings.xml");
    assert!(strings.contains("23.02.2026"));
    assert!(strings.contains("Muster"));
    assert!(strings.contains("Berlin Netz"));
}

#[test]
fn test_date_row_only_covers_segment_dates() {
    let (bytes, _, _, _) = render_february_segment(&sample_week_data());
    let xml = sheet_xml(&bytes);

    // Mon Feb 23 .. Sat Feb 28 populated (H9..M9).
    assert_eq!(cell_value(&xml, "H9"), Some(23.0));
    assert_eq!(cell_value(&xml, "M9"), Some(28.0));

    // Sunday Mar 1 belongs to the other segment: its column stays empty.
    assert!(!xml.contains(r#"<c r="N9""#));
}

#[test]
fn test_explicit_pause_override_is_written() {
    let mut data = WeekData {
        profile: profile(),
        ..Default::default()
    };
    let mut l = line("Nord", "08:00", "17:00");
    l.pause_override = "0,75".to_string();
    data.entries
        .insert("2026-02-23".to_string(), entry("2026-02-23", vec![l]));

    let (bytes, _, _, _) = render_february_segment(&data);
    let xml = sheet_xml(&bytes);

    assert_eq!(cell_value(&xml, "G10"), Some(0.75));
    // Net hours: 9.0 gross minus the 0.75 override.
    assert_eq!(cell_value(&xml, "H10"), Some(8.25));
}

#[test]
fn test_inferred_break_hint_for_rows_without_times() {
    let mut data = WeekData {
        profile: profile(),
        ..Default::default()
    };
    let l = DailyLine {
        site_name_ort: "Nord".to_string(),
        day_hours_override: HoursOverride::parse("8,0"),
        ..Default::default()
    };
    data.entries
        .insert("2026-02-23".to_string(), entry("2026-02-23", vec![l]));

    let (bytes, _, _, _) = render_february_segment(&data);
    let xml = sheet_xml(&bytes);

    // Net 8.0h implies a 0.5h break under the statutory table.
    assert_eq!(cell_value(&xml, "G10"), Some(0.5));
    assert_eq!(cell_value(&xml, "H10"), Some(8.0));
}

#[test]
fn test_marker_override_lands_in_day_cell() {
    let mut data = WeekData {
        profile: profile(),
        ..Default::default()
    };
    let l = DailyLine {
        site_name_ort: "Nord".to_string(),
        day_hours_override: HoursOverride::parse("X"),
        ..Default::default()
    };
    data.entries
        .insert("2026-02-23".to_string(), entry("2026-02-23", vec![l]));

    let (bytes, _, _, _) = render_february_segment(&data);
    let xml = sheet_xml(&bytes);

    // Uppercase marker is normalized to "x" and written as a string cell.
    assert!(xml.contains(r#"<c r="H10" t="s""#) || xml.contains(r#"<c r="H10" s="#));
    let strings = zip_part(&bytes, "xl/sharedStrings.xml");
    assert!(strings.contains(">x<"));
}

#[test]
fn test_truncation_at_forty_rows() {
    let mut data = WeekData {
        profile: profile(),
        ..Default::default()
    };
    let lines: Vec<DailyLine> = (0..41).map(|_| line("Nord", "08:00", "16:30")).collect();
    data.entries
        .insert("2026-02-23".to_string(), entry("2026-02-23", lines));

    let segments =
        build_prepared_segments(2026, 9, &data.entries, &data.profile, &data.car_usage);
    let (bytes, rows_written, rows_truncated, warnings) = EmbeddedWriter::new()
        .render_segment(&segments[0].payload)
        .expect("render");

    assert_eq!(rows_written, 40);
    assert_eq!(rows_truncated, 1);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("1 line(s)"));

    // Row 49 is the last populated data row; row 50 stays untouched.
    let xml = sheet_xml(&bytes);
    assert_eq!(cell_value(&xml, "H49"), Some(8.0));
    assert!(!xml.contains(r#"<c r="H50""#));
}

#[test]
fn test_vehicle_footer_cells() {
    let (bytes, _, _, _) = render_february_segment(&sample_week_data());
    let xml = sheet_xml(&bytes);

    // Numeric odometer and km values get number cells.
    assert_eq!(cell_value(&xml, "R51"), Some(45210.0));
    assert_eq!(cell_value(&xml, "R52"), Some(320.0));

    let strings = zip_part(&bytes, "xl/sharedStrings.xml");
    assert!(strings.contains("B-AB 123"));
}
