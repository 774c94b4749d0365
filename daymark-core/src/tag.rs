//! User-defined color tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named color the user marks days with.
///
/// `id` is generated at creation and never changes; marks reference tags by
/// it. There is no uniqueness constraint on `name` or `color_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color_value: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tag {
    /// Create a fresh tag with a generated id. Expects an already-trimmed
    /// name and an already-normalized `#rrggbb` color value.
    pub fn new(name: impl Into<String>, color_value: impl Into<String>) -> Self {
        Tag {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color_value: color_value.into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A partial update to a tag. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color_value: Option<String>,
}

impl TagPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color_value.is_none()
    }
}
