//! Tag catalog operations on the active partition.

use crate::color;
use crate::daymark::Daymark;
use crate::error::{DaymarkError, DaymarkResult};
use crate::partition::TagUsage;
use crate::tag::{Tag, TagPatch};

impl Daymark {
    /// Create a tag from a (trimmed) name and a color name or hex value.
    pub fn add_tag(&mut self, name: &str, color: &str) -> DaymarkResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DaymarkError::Validation(
                "A tag name is required".to_string(),
            ));
        }
        let color_value = color::normalize(color)
            .ok_or_else(|| DaymarkError::Validation(format!("Unrecognized color '{color}'")))?;

        let tag = Tag::new(name, color_value);
        self.partition.insert_tag(tag.clone());
        self.persist();
        Ok(tag)
    }

    /// Merge a patch onto an existing tag. Returns `Ok(None)` when the id is
    /// unknown: a "not found" result, not an error.
    pub fn update_tag(&mut self, id: &str, patch: TagPatch) -> DaymarkResult<Option<Tag>> {
        let name = match patch.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(DaymarkError::Validation(
                        "A tag name is required".to_string(),
                    ));
                }
                Some(name)
            }
            None => None,
        };
        let color_value = match patch.color_value {
            Some(color) => Some(color::normalize(&color).ok_or_else(|| {
                DaymarkError::Validation(format!("Unrecognized color '{color}'"))
            })?),
            None => None,
        };

        let updated = self.partition.update_tag(id, TagPatch { name, color_value });
        if updated.is_some() {
            self.persist();
        }
        Ok(updated)
    }

    /// Delete a tag, cascading into the mark ledger. Returns whether a tag
    /// was actually removed.
    pub fn delete_tag(&mut self, id: &str) -> bool {
        let removed = self.partition.delete_tag(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn tags(&self) -> Vec<&Tag> {
        self.partition.tags()
    }

    pub fn tags_sorted_by_name(&self) -> Vec<&Tag> {
        self.partition.tags_sorted_by_name()
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.partition.tag(id)
    }

    pub fn tag_count(&self) -> usize {
        self.partition.tag_count()
    }

    pub fn has_tags(&self) -> bool {
        self.partition.has_tags()
    }

    pub fn mark_counts_by_tag(&self) -> Vec<TagUsage> {
        self.partition.mark_counts_by_tag()
    }
}
