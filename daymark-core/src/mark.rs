//! Day marks and their read-time resolution against the tag catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::tag::Tag;

/// Name shown for a mark whose tag no longer exists.
pub const REMOVED_TAG_NAME: &str = "Cor removida";
/// Neutral gray shown for a mark whose tag no longer exists.
pub const REMOVED_TAG_COLOR: &str = "#9ca3af";

/// One tag applied to one calendar day.
///
/// Holds a weak reference to the tag by id only; the tag's name and color are
/// resolved from the live catalog every time the mark is read. Older records
/// embedded denormalized copies of both, which the migrator strips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub tag_id: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Mark {
    pub fn new(tag_id: impl Into<String>, note: Option<&str>) -> Self {
        Mark {
            tag_id: tag_id.into(),
            note: note.map(str::to_string),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A mark joined against the current tag catalog.
///
/// When the tag was deleted out of band the placeholder name and color are
/// attached instead; resolution never fails on a dangling reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMark {
    pub date: DateKey,
    pub tag_id: String,
    pub name: String,
    pub color_value: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ResolvedMark {
    pub fn resolve(date: DateKey, mark: &Mark, tag: Option<&Tag>) -> Self {
        let (name, color_value) = match tag {
            Some(tag) => (tag.name.clone(), tag.color_value.clone()),
            None => (REMOVED_TAG_NAME.to_string(), REMOVED_TAG_COLOR.to_string()),
        };

        ResolvedMark {
            date,
            tag_id: mark.tag_id.clone(),
            name,
            color_value,
            note: mark.note.clone(),
            created_at: mark.created_at,
        }
    }
}
