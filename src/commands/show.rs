use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;

use daymark_core::{Daymark, MonthCursor};

use crate::render::{self, Render};
use crate::utils::tui;

pub async fn run(daymark: &mut Daymark, month: Option<&str>) -> Result<()> {
    let cursor = match month {
        Some(value) => MonthCursor::parse(value)
            .ok_or_else(|| anyhow!("Invalid month '{value}'. Expected YYYY-MM"))?,
        None => MonthCursor::current(),
    };

    let spinner = tui::create_spinner(format!("Fetching holidays for {}", cursor.year));
    daymark.load_holidays(cursor.year).await;
    spinner.finish_and_clear();

    println!("{}", render::render_month(daymark, cursor));

    let holidays = daymark.holidays_for_month(cursor.year, cursor.month);
    if !holidays.is_empty() {
        println!("{}", "Holidays".bold());
        for holiday in holidays {
            println!("{}", holiday.render());
        }
        println!();
    }

    let marks = daymark.marks_for_month(cursor.year, cursor.month);
    if !marks.is_empty() {
        println!("{}", "Marks".bold());
        for mark in marks {
            println!("{}", mark.render());
        }
    } else if daymark.has_tags() {
        println!("{}", "No marks this month".dimmed());
    } else {
        println!("No tags yet. Create one with `daymark tag add <name> <color>`");
    }
    Ok(())
}
