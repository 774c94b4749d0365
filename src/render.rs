//! Terminal rendering for daymark types.
//!
//! Extension trait plus the month-grid renderer, using owo_colors. Tag
//! swatches use the tag's actual hex value via truecolor.

use chrono::{Datelike, Duration};
use owo_colors::OwoColorize;

use daymark_core::{DateKey, Daymark, Holiday, HolidayKind, MonthCursor, ResolvedMark, Tag};

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Tag {
    fn render(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        format!(
            "{} {} {} {}",
            swatch(&self.color_value),
            self.name,
            self.color_value.dimmed(),
            short_id.dimmed()
        )
    }
}

impl Render for ResolvedMark {
    fn render(&self) -> String {
        let mut line = format!("{} {} {}", self.date, swatch(&self.color_value), self.name);
        if let Some(note) = &self.note {
            line.push_str(&format!(" — {}", note.italic()));
        }
        line
    }
}

impl Render for Holiday {
    fn render(&self) -> String {
        match self.kind {
            HolidayKind::National => format!("{} {}", self.date, self.name),
            HolidayKind::Optional => {
                format!("{} {} {}", self.date, self.name, "(optional)".dimmed())
            }
        }
    }
}

/// A colored dot in the tag's own color.
pub fn swatch(color_value: &str) -> String {
    match parse_hex(color_value) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

const CELL_WIDTH: usize = 8;
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render a 6-week month grid, the terminal cousin of the browser calendar:
/// leading and trailing days of the neighboring months fill the first and
/// last rows, holidays show red, today is highlighted, and each mark adds a
/// dot in its tag's color.
pub fn render_month(daymark: &Daymark, cursor: MonthCursor) -> String {
    let today = DateKey::today();
    let first = cursor.first_day();
    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        first.format("%B %Y").to_string().bold()
    ));

    for label in WEEKDAY_LABELS {
        out.push_str(&label.dimmed().to_string());
        out.push_str(&" ".repeat(CELL_WIDTH - label.len()));
    }
    out.push('\n');

    for week in 0..6 {
        for weekday in 0..7 {
            let date = start + Duration::days(week * 7 + weekday);
            let key = DateKey::new(date);

            let number = format!("{:>2}", date.day());
            let styled = if date.month() != cursor.month {
                number.dimmed().to_string()
            } else if key == today {
                number.bold().reversed().to_string()
            } else if daymark.is_holiday(key) {
                number.red().to_string()
            } else {
                number
            };

            let marks = daymark.marks_for_date(key);
            out.push_str(&styled);
            for mark in &marks {
                out.push_str(&swatch(&mark.color_value));
            }
            out.push_str(&" ".repeat(CELL_WIDTH - 2 - marks.len()));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use daymark_core::MemoryStore;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex("#9ca3af"), Some((156, 163, 175)));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#fff"), None);
    }

    #[test]
    fn test_month_grid_shape() {
        let daymark = Daymark::open(Box::new(MemoryStore::new()));
        let grid = render_month(&daymark, MonthCursor::new(2024, 3).unwrap());

        // Title, weekday header, six week rows.
        assert_eq!(grid.trim_end_matches('\n').lines().count(), 8);
        assert!(grid.contains("March 2024"));
    }
}
