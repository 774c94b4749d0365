//! Color value normalization.
//!
//! Early releases stored preset color names ("red", "blue") on tags; the
//! current schema stores `#rrggbb` hex strings only. This module holds the
//! fixed name→hex table the migrator uses to upgrade old records, and the
//! normalization applied to user input when a tag is created or recolored.

/// Legacy preset palette. Names are matched case-insensitively.
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#ef4444"),
    ("orange", "#f97316"),
    ("amber", "#f59e0b"),
    ("yellow", "#eab308"),
    ("green", "#22c55e"),
    ("teal", "#14b8a6"),
    ("cyan", "#06b6d4"),
    ("blue", "#3b82f6"),
    ("indigo", "#6366f1"),
    ("purple", "#a855f7"),
    ("pink", "#ec4899"),
    ("gray", "#6b7280"),
];

/// Look up the hex value for a legacy preset color name.
pub fn named_to_hex(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(named, _)| named.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Normalize user input into the canonical `#rrggbb` form.
///
/// Accepts a preset color name or a 6-digit hex string (with `#`), and
/// returns `None` for anything else.
pub fn normalize(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(hex) = named_to_hex(input) {
        return Some(hex.to_string());
    }

    let digits = input.strip_prefix('#')?;
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", digits.to_ascii_lowercase()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup_is_case_insensitive() {
        assert_eq!(named_to_hex("red"), Some("#ef4444"));
        assert_eq!(named_to_hex("Red"), Some("#ef4444"));
        assert_eq!(named_to_hex("maroon"), None);
    }

    #[test]
    fn test_normalize_lowercases_hex() {
        assert_eq!(normalize("#FF0000"), Some("#ff0000".to_string()));
        assert_eq!(normalize(" #abCDef "), Some("#abcdef".to_string()));
    }

    #[test]
    fn test_normalize_maps_preset_names() {
        assert_eq!(normalize("blue"), Some("#3b82f6".to_string()));
    }

    #[test]
    fn test_normalize_rejects_malformed_input() {
        assert_eq!(normalize("#fff"), None);
        assert_eq!(normalize("ff0000"), None);
        assert_eq!(normalize("#gg0000"), None);
        assert_eq!(normalize(""), None);
    }
}
