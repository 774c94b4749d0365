use anyhow::Result;
use owo_colors::OwoColorize;

use daymark_core::Daymark;

use crate::commands::{parse_date, resolve_tag};
use crate::render::swatch;

pub fn add(daymark: &mut Daymark, date: &str, tag: &str, note: Option<&str>) -> Result<()> {
    let date = parse_date(date)?;
    let tag = resolve_tag(daymark, tag)?;

    daymark.add_mark(date, &tag.id, note)?;
    println!(
        "Marked {} with {} {} ({}/{} marks used)",
        date,
        swatch(&tag.color_value),
        tag.name,
        daymark.mark_count(date),
        daymark_core::MAX_MARKS_PER_DAY,
    );
    Ok(())
}

pub fn remove(daymark: &mut Daymark, date: &str, tag: Option<&str>) -> Result<()> {
    let date = parse_date(date)?;

    match tag {
        Some(needle) => {
            let tag = resolve_tag(daymark, needle)?;
            if daymark.remove_mark(date, &tag.id) {
                println!("Removed {} from {}", tag.name, date);
            } else {
                println!("{} was not marked with {}", date, tag.name);
            }
        }
        None => {
            if daymark.remove_all_marks(date) {
                println!("Cleared all marks on {date}");
            } else {
                println!("{date} has no marks");
            }
        }
    }
    Ok(())
}

pub fn note(daymark: &mut Daymark, date: &str, tag: &str, text: Option<&str>) -> Result<()> {
    let date = parse_date(date)?;
    let tag = resolve_tag(daymark, tag)?;

    if !daymark.set_note(date, &tag.id, text) {
        println!("{} is not marked with {}", date, tag.name);
        return Ok(());
    }

    match text {
        Some(text) => println!("Note on {} / {}: {}", date, tag.name, text.italic()),
        None => println!("Cleared the note on {} / {}", date, tag.name),
    }
    Ok(())
}
