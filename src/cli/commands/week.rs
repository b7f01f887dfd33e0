use crate::calendar;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::{format_de, weekday_name_de};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week { year, week } = cmd {
        let (year, week) = (*year, *week);

        if year < cfg.min_year || year > cfg.max_year {
            return Err(AppError::InvalidWeek { year, week });
        }
        if week < 1 || week > calendar::weeks_in_year(year) {
            return Err(AppError::InvalidWeek { year, week });
        }

        let dates = calendar::iso_week_dates(year, week);
        let display = calendar::display_week_info(year, week, &dates);

        println!("KW {:02}/{}", week, year);
        for d in &dates {
            println!("  {:<10} {}", weekday_name_de(*d), format_de(*d));
        }

        let segments = calendar::split_week_by_month(&dates);
        if segments.len() > 1 {
            info("Week crosses a month boundary:");
        }
        for seg in &segments {
            let seg_display = calendar::segment_display_info(year, week, seg.year);
            println!(
                "  segment {}: {} - {} ({} day(s), KW {:02}/{})",
                seg.key,
                format_de(seg.start),
                format_de(seg.end),
                seg.dates.len(),
                seg_display.week,
                seg_display.year
            );
        }

        if display.carry_over {
            info(format!(
                "Week spills into {}; reports are labeled KW 01/{}.",
                display.year, display.year
            ));
        }
    }
    Ok(())
}
