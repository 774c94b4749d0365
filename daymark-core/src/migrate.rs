//! Schema migration for stored partition records.
//!
//! Storage holds whatever older releases wrote, so every load funnels the raw
//! JSON through this module instead of deserializing the current shape
//! directly. Two upgrades are applied on the way in:
//!
//! 1. Color normalization: tags whose color is a known preset name (not a
//!    `#`-prefixed hex string) are rewritten to the hex equivalent.
//! 2. Mark de-denormalization: legacy embedded `colorName`/`colorValue`
//!    copies on marks are stripped (they are resolved live from the catalog
//!    now), and the legacy `colorId` field is read as `tagId`.
//!
//! Malformed entries are skipped with a warning rather than carried forward.
//! The returned flag tells the loader whether anything changed; a second run
//! over migrated data reports no change, so it triggers no second write.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::color;
use crate::date_key::DateKey;
use crate::mark::Mark;
use crate::partition::Partition;
use crate::tag::Tag;

/// Coerce one identity's raw stored record into a current-shape `Partition`.
/// `None` (identity never stored) yields an empty, clean partition.
pub fn load_partition(raw: Option<&Value>) -> (Partition, bool) {
    let mut partition = Partition::default();
    let mut dirty = false;

    let Some(raw) = raw else {
        return (partition, false);
    };

    let colors = raw.get("colors").and_then(Value::as_object);
    for (key, value) in colors.into_iter().flatten() {
        match coerce_tag(key, value) {
            Some((tag, changed)) => {
                dirty |= changed;
                partition.insert_tag(tag);
            }
            None => {
                log::warn!("skipping malformed color record '{key}'");
                dirty = true;
            }
        }
    }

    let marks = raw.get("marks").and_then(Value::as_object);
    for (date_raw, per_day) in marks.into_iter().flatten() {
        let Ok(date) = date_raw.parse::<DateKey>() else {
            log::warn!("skipping marks under invalid date key '{date_raw}'");
            dirty = true;
            continue;
        };
        let Some(entries) = per_day.as_object() else {
            log::warn!("skipping non-object mark entry for '{date_raw}'");
            dirty = true;
            continue;
        };
        for (key, value) in entries {
            match coerce_mark(key, value) {
                Some((tag_id, mark, changed)) => {
                    dirty |= changed;
                    if !partition.restore_mark(date, tag_id, mark) {
                        log::warn!("dropping excess or duplicate mark '{key}' on {date}");
                        dirty = true;
                    }
                }
                None => {
                    log::warn!("skipping malformed mark record '{key}' on {date}");
                    dirty = true;
                }
            }
        }
    }

    (partition, dirty)
}

/// Raw tag shape as found on disk, across all historical revisions.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    id: Option<String>,
    name: Option<String>,
    color_value: Option<String>,
    /// Field name used before the `colorValue` rename.
    color: Option<String>,
    created_at: Option<Value>,
    updated_at: Option<Value>,
}

/// Raw mark shape as found on disk, across all historical revisions.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMark {
    tag_id: Option<String>,
    /// Field name used before the `tagId` rename.
    color_id: Option<String>,
    note: Option<String>,
    /// Legacy denormalized copies, dropped on migration.
    color_name: Option<String>,
    color_value: Option<String>,
    created_at: Option<Value>,
    updated_at: Option<Value>,
}

fn coerce_tag(key: &str, value: &Value) -> Option<(Tag, bool)> {
    let raw: RawTag = serde_json::from_value(value.clone()).ok()?;
    let mut changed = false;

    let id = match raw.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None if !key.trim().is_empty() => {
            changed = true;
            key.to_string()
        }
        None => return None,
    };

    let name = raw.name?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    // Accept either field name; the old one dirties the record.
    let stored_color = match (raw.color_value, raw.color) {
        (Some(color_value), _) => color_value,
        (None, Some(color)) => {
            changed = true;
            color
        }
        (None, None) => return None,
    };
    let color_value = if stored_color.starts_with('#') {
        stored_color
    } else {
        match color::named_to_hex(&stored_color) {
            Some(hex) => {
                changed = true;
                hex.to_string()
            }
            // Unknown non-hex values pass through untouched.
            None => stored_color,
        }
    };

    let (created_at, stamped) = coerce_created_at(raw.created_at);
    changed |= stamped;
    let updated_at = coerce_timestamp(raw.updated_at);

    Some((
        Tag {
            id,
            name,
            color_value,
            created_at,
            updated_at,
        },
        changed,
    ))
}

fn coerce_mark(key: &str, value: &Value) -> Option<(String, Mark, bool)> {
    let raw: RawMark = serde_json::from_value(value.clone()).ok()?;
    let mut changed = false;

    let tag_id = match (raw.tag_id.filter(|id| !id.trim().is_empty()), raw.color_id) {
        (Some(tag_id), _) => tag_id,
        (None, Some(color_id)) if !color_id.trim().is_empty() => {
            changed = true;
            color_id
        }
        _ if !key.trim().is_empty() => {
            changed = true;
            key.to_string()
        }
        _ => return None,
    };

    // Denormalized color copies are dropped in favor of live resolution.
    if raw.color_name.is_some() || raw.color_value.is_some() {
        changed = true;
    }

    let (created_at, stamped) = coerce_created_at(raw.created_at);
    changed |= stamped;
    let updated_at = coerce_timestamp(raw.updated_at);

    Some((
        tag_id.clone(),
        Mark {
            tag_id,
            note: raw.note,
            created_at,
            updated_at,
        },
        changed,
    ))
}

/// Parse a stored timestamp, stamping "now" (and dirtying the record) when
/// it is missing or unreadable.
fn coerce_created_at(raw: Option<Value>) -> (DateTime<Utc>, bool) {
    match coerce_timestamp(raw.clone()) {
        Some(ts) => (ts, false),
        None => (Utc::now(), true),
    }
}

fn coerce_timestamp(raw: Option<Value>) -> Option<DateTime<Utc>> {
    serde_json::from_value(raw?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_is_clean() {
        let (partition, dirty) = load_partition(None);
        assert!(partition.is_empty());
        assert!(!dirty);

        let (partition, dirty) = load_partition(Some(&json!({})));
        assert!(partition.is_empty());
        assert!(!dirty);
    }

    #[test]
    fn test_named_color_is_rewritten_to_hex() {
        let raw = json!({
            "colors": {
                "t1": {
                    "id": "t1",
                    "name": "Work",
                    "color": "red",
                    "createdAt": "2024-01-15T10:00:00.000Z"
                }
            }
        });
        let (partition, dirty) = load_partition(Some(&raw));
        assert!(dirty);
        assert_eq!(partition.tag("t1").unwrap().color_value, "#ef4444");
    }

    #[test]
    fn test_unknown_color_name_passes_through() {
        let raw = json!({
            "colors": {
                "t1": {
                    "id": "t1",
                    "name": "Work",
                    "colorValue": "nacarado",
                    "createdAt": "2024-01-15T10:00:00Z"
                }
            }
        });
        let (partition, _) = load_partition(Some(&raw));
        assert_eq!(partition.tag("t1").unwrap().color_value, "nacarado");
    }

    #[test]
    fn test_denormalized_mark_fields_are_stripped() {
        let raw = json!({
            "colors": {
                "t1": {
                    "id": "t1",
                    "name": "Work",
                    "colorValue": "#ff0000",
                    "createdAt": "2024-01-15T10:00:00Z"
                }
            },
            "marks": {
                "2024-03-01": {
                    "t1": {
                        "colorId": "t1",
                        "colorName": "Work",
                        "colorValue": "#ff0000",
                        "createdAt": "2024-03-01T08:00:00Z"
                    }
                }
            }
        });
        let (partition, dirty) = load_partition(Some(&raw));
        assert!(dirty);

        let date = DateKey::from_ymd(2024, 3, 1).unwrap();
        assert!(partition.has_mark(date, "t1"));

        let serialized = serde_json::to_value(&partition).unwrap();
        let mark = &serialized["marks"]["2024-03-01"]["t1"];
        assert_eq!(mark["tagId"], "t1");
        assert!(mark.get("colorId").is_none());
        assert!(mark.get("colorName").is_none());
        assert!(mark.get("colorValue").is_none());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = json!({
            "colors": {
                "ok": {
                    "id": "ok",
                    "name": "Kept",
                    "colorValue": "#00ff00",
                    "createdAt": "2024-01-15T10:00:00Z"
                },
                "broken": { "id": "broken", "colorValue": "#123456" }
            },
            "marks": {
                "not-a-date": { "ok": { "tagId": "ok" } },
                "2024-03-01": { "bad": 42 }
            }
        });
        let (partition, dirty) = load_partition(Some(&raw));
        assert!(dirty);
        assert_eq!(partition.tag_count(), 1);
        assert!(partition.tag("ok").is_some());
        assert_eq!(partition.mark_count(DateKey::from_ymd(2024, 3, 1).unwrap()), 0);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let raw = json!({
            "colors": {
                "t1": {
                    "id": "t1",
                    "name": "Work",
                    "color": "blue",
                    "createdAt": "2024-01-15T10:00:00.000Z"
                }
            },
            "marks": {
                "2024-03-01": {
                    "t1": {
                        "colorId": "t1",
                        "colorName": "Work",
                        "colorValue": "blue",
                        "createdAt": "2024-03-01T08:00:00.000Z"
                    }
                }
            }
        });

        let (first, dirty) = load_partition(Some(&raw));
        assert!(dirty);

        // Re-running over the migrated serialization changes nothing.
        let migrated = serde_json::to_value(&first).unwrap();
        let (second, dirty) = load_partition(Some(&migrated));
        assert!(!dirty);
        assert_eq!(first, second);
    }

    #[test]
    fn test_current_shape_loads_clean() {
        let mut partition = Partition::default();
        let tag = Tag::new("Work", "#ff0000");
        let id = tag.id.clone();
        partition.insert_tag(tag);
        partition
            .insert_mark(DateKey::from_ymd(2024, 3, 1).unwrap(), &id, Some("note"))
            .unwrap();

        let stored = serde_json::to_value(&partition).unwrap();
        let (loaded, dirty) = load_partition(Some(&stored));
        assert!(!dirty);
        assert_eq!(loaded, partition);
    }
}
