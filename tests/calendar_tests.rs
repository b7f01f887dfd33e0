use chrono::{Datelike, Weekday};
use wochenbericht::calendar::{
    DisplayWeek, display_week_info, iso_week_dates, iso_week_of, segment_display_info,
    split_week_by_month, weeks_in_year,
};

#[test]
fn test_week_dates_start_monday_and_are_consecutive() {
    for (year, week) in [(2026, 9), (2015, 53), (2016, 52), (2020, 1), (2026, 53)] {
        let dates = iso_week_dates(year, week);
        assert_eq!(dates.len(), 7, "KW {week}/{year}");
        assert_eq!(dates[0].weekday(), Weekday::Mon, "KW {week}/{year}");
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt().unwrap(), pair[1], "KW {week}/{year}");
        }
    }
}

#[test]
fn test_iso_week_of_inverts_week_dates() {
    for year in 2014..=2030 {
        for week in 1..=weeks_in_year(year) {
            let monday = iso_week_dates(year, week)[0];
            assert_eq!(iso_week_of(monday), (year, week));
        }
    }
}

#[test]
fn test_weeks_in_year_reference_values() {
    assert_eq!(weeks_in_year(2015), 53);
    assert_eq!(weeks_in_year(2016), 52);
    assert_eq!(weeks_in_year(2020), 53);
    assert_eq!(weeks_in_year(2021), 52);
    assert_eq!(weeks_in_year(2026), 53);
}

#[test]
fn test_split_week_kw9_2026_february_march() {
    let dates = iso_week_dates(2026, 9);
    let segments = split_week_by_month(&dates);

    assert_eq!(segments.len(), 2);

    let feb = &segments[0];
    assert_eq!(feb.key, "2026-02");
    assert_eq!(feb.month, 2);
    assert_eq!(feb.dates.len(), 6);
    assert_eq!(feb.start.to_string(), "2026-02-23");
    assert_eq!(feb.end.to_string(), "2026-02-28");
    assert!(!feb.is_single_day);

    let mar = &segments[1];
    assert_eq!(mar.key, "2026-03");
    assert_eq!(mar.month, 3);
    assert_eq!(mar.dates.len(), 1);
    assert_eq!(mar.start.to_string(), "2026-03-01");
    assert!(mar.is_single_day);
}

#[test]
fn test_split_single_month_week() {
    let dates = iso_week_dates(2026, 7);
    let segments = split_week_by_month(&dates);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].dates.len(), 7);
    assert!(!segments[0].is_single_day);
}

#[test]
fn test_segments_partition_the_week() {
    for week in 1..=weeks_in_year(2026) {
        let dates = iso_week_dates(2026, week);
        let segments = split_week_by_month(&dates);

        assert!(segments.len() <= 2, "KW {week}");
        let total: usize = segments.iter().map(|s| s.dates.len()).sum();
        assert_eq!(total, 7, "KW {week}");
    }
}

#[test]
fn test_display_week_carry_over() {
    let dates = iso_week_dates(2026, 53);
    assert_eq!(
        display_week_info(2026, 53, &dates),
        DisplayWeek {
            year: 2027,
            week: 1,
            carry_over: true
        }
    );

    let dates = iso_week_dates(2026, 9);
    assert_eq!(
        display_week_info(2026, 9, &dates),
        DisplayWeek {
            year: 2026,
            week: 9,
            carry_over: false
        }
    );
}

#[test]
fn test_segment_display_info_relabels_next_year_segment() {
    assert_eq!(
        segment_display_info(2026, 53, 2027),
        DisplayWeek {
            year: 2027,
            week: 1,
            carry_over: true
        }
    );
    assert_eq!(
        segment_display_info(2026, 53, 2026),
        DisplayWeek {
            year: 2026,
            week: 53,
            carry_over: false
        }
    );
}
