pub mod holidays;
pub mod mark;
pub mod session;
pub mod show;
pub mod stats;
pub mod tag;

use anyhow::{bail, Result};
use daymark_core::{DateKey, Daymark, Tag};

/// Parse a day argument: `YYYY-MM-DD` or the word "today".
pub fn parse_date(input: &str) -> Result<DateKey> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(DateKey::today());
    }
    input
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid date '{input}'. Expected YYYY-MM-DD or 'today'"))
}

/// Resolve a tag argument against the catalog: exact id, then exact name
/// (case-insensitive), then unique name prefix.
pub fn resolve_tag(daymark: &Daymark, needle: &str) -> Result<Tag> {
    if let Some(tag) = daymark.tag(needle) {
        return Ok(tag.clone());
    }

    let tags = daymark.tags();
    if let Some(tag) = tags
        .iter()
        .find(|tag| tag.name.eq_ignore_ascii_case(needle))
    {
        return Ok((*tag).clone());
    }

    let needle_lower = needle.to_lowercase();
    let matches: Vec<&&Tag> = tags
        .iter()
        .filter(|tag| tag.name.to_lowercase().starts_with(&needle_lower))
        .collect();
    match matches.as_slice() {
        [tag] => Ok((**tag).clone()),
        [] => bail!("No tag matches '{needle}'. Try `daymark tag list`"),
        _ => bail!("'{needle}' matches more than one tag. Be more specific"),
    }
}
