use anyhow::Result;
use owo_colors::OwoColorize;

use daymark_core::Daymark;

use crate::render::{swatch, Render};

pub fn run(daymark: &Daymark) -> Result<()> {
    let mut usage = daymark.mark_counts_by_tag();
    if usage.is_empty() {
        println!("No marks yet");
        return Ok(());
    }
    usage.sort_by(|a, b| b.count.cmp(&a.count));

    println!("{}", "Marks per tag".bold());
    for entry in usage {
        println!(
            "{} {:<20} {}",
            swatch(&entry.color_value),
            entry.name,
            entry.count
        );
    }
    Ok(())
}

pub fn recent(daymark: &Daymark, days: i64) -> Result<()> {
    let mut marks = daymark.marks_in_last_days(days);
    if marks.is_empty() {
        println!("No marks in the last {days} days");
        return Ok(());
    }
    marks.sort_by_key(|mark| mark.date);

    println!("{}", format!("Marks from the last {days} days").bold());
    for mark in marks {
        println!("{}", mark.render());
    }
    Ok(())
}
