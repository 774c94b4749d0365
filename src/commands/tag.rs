use anyhow::Result;
use owo_colors::OwoColorize;

use daymark_core::{Daymark, TagPatch};

use crate::commands::resolve_tag;
use crate::render::Render;

pub fn add(daymark: &mut Daymark, name: &str, color: &str) -> Result<()> {
    let tag = daymark.add_tag(name, color)?;
    println!("Created {}", tag.render());
    Ok(())
}

pub fn list(daymark: &Daymark) -> Result<()> {
    let tags = daymark.tags_sorted_by_name();
    if tags.is_empty() {
        println!("No tags yet. Create one with `daymark tag add <name> <color>`");
        return Ok(());
    }

    for tag in tags {
        println!("{}", tag.render());
    }
    Ok(())
}

pub fn update(
    daymark: &mut Daymark,
    needle: &str,
    name: Option<String>,
    color: Option<String>,
) -> Result<()> {
    if name.is_none() && color.is_none() {
        println!("Nothing to change. Pass --name and/or --color");
        return Ok(());
    }

    let tag = resolve_tag(daymark, needle)?;
    let patch = TagPatch {
        name,
        color_value: color,
    };

    match daymark.update_tag(&tag.id, patch)? {
        Some(updated) => println!("Updated {}", updated.render()),
        None => println!("{}", "Tag vanished while updating".red()),
    }
    Ok(())
}

pub fn rm(daymark: &mut Daymark, needle: &str) -> Result<()> {
    let tag = resolve_tag(daymark, needle)?;
    let marks_lost = daymark
        .mark_counts_by_tag()
        .iter()
        .find(|usage| usage.tag_id == tag.id)
        .map_or(0, |usage| usage.count);

    daymark.delete_tag(&tag.id);
    println!("Deleted {} ({} marks removed with it)", tag.render(), marks_lost);
    Ok(())
}
