use anyhow::Result;
use chrono::{Datelike, Local};
use owo_colors::OwoColorize;

use daymark_core::Daymark;

use crate::render::Render;
use crate::utils::tui;

pub async fn run(daymark: &mut Daymark, year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());

    let spinner = tui::create_spinner(format!("Fetching holidays for {year}"));
    let holidays = daymark.load_holidays(year).await;
    spinner.finish_and_clear();

    if holidays.is_empty() {
        println!("No holidays found for {year}");
        return Ok(());
    }

    println!("{}", format!("Holidays in {year}").bold());
    for holiday in &holidays {
        println!("{}", holiday.render());
    }
    Ok(())
}
