//! The per-identity working set: tag catalog plus mark ledger.
//!
//! A `Partition` is pure state; it knows nothing about where it is stored.
//! All catalog/ledger invariants are enforced here: at most four marks per
//! day, one mark per tag per day, marks only for cataloged tags, and no
//! ledger entry for a day with zero marks.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{DaymarkError, DaymarkResult};
use crate::mark::{Mark, ResolvedMark};
use crate::tag::{Tag, TagPatch};

/// Hard cap on marks per calendar day.
pub const MAX_MARKS_PER_DAY: usize = 4;

/// The tags and marks belonging to one identity (named or ephemeral).
///
/// Serializes to the on-disk record `{ "colors": {...}, "marks": {...} }`;
/// the `colors` name is kept for compatibility with stored data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Partition {
    #[serde(rename = "colors")]
    tags: BTreeMap<String, Tag>,
    marks: BTreeMap<DateKey, BTreeMap<String, Mark>>,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.marks.clear();
    }

    // =========================================================================
    // Tag catalog
    // =========================================================================

    pub fn insert_tag(&mut self, tag: Tag) {
        self.tags.insert(tag.id.clone(), tag);
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.get(id)
    }

    pub fn tags(&self) -> Vec<&Tag> {
        self.tags.values().collect()
    }

    /// Tags ordered by name, caseless, with the raw name as tiebreak.
    pub fn tags_sorted_by_name(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tags.values().collect();
        tags.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        tags
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Merge `patch` onto an existing tag and stamp `updated_at`.
    /// Returns the updated tag, or `None` when the id is unknown.
    pub fn update_tag(&mut self, id: &str, patch: TagPatch) -> Option<Tag> {
        let tag = self.tags.get_mut(id)?;
        if let Some(name) = patch.name {
            tag.name = name;
        }
        if let Some(color_value) = patch.color_value {
            tag.color_value = color_value;
        }
        tag.updated_at = Some(Utc::now());
        Some(tag.clone())
    }

    /// Remove a tag, cascading into the ledger: every mark referencing it is
    /// deleted and days left with no marks lose their entry. Returns whether
    /// a tag was actually removed.
    pub fn delete_tag(&mut self, id: &str) -> bool {
        if self.tags.remove(id).is_none() {
            return false;
        }
        self.marks.retain(|_, per_day| {
            per_day.remove(id);
            !per_day.is_empty()
        });
        true
    }

    // =========================================================================
    // Mark ledger
    // =========================================================================

    /// Mark `date` with `tag_id`, optionally annotated.
    pub fn insert_mark(
        &mut self,
        date: DateKey,
        tag_id: &str,
        note: Option<&str>,
    ) -> DaymarkResult<Mark> {
        if tag_id.trim().is_empty() {
            return Err(DaymarkError::Validation(
                "A date and a tag id are required to add a mark".to_string(),
            ));
        }

        if let Some(per_day) = self.marks.get(&date) {
            if per_day.len() >= MAX_MARKS_PER_DAY {
                return Err(DaymarkError::Capacity(date));
            }
            if per_day.contains_key(tag_id) {
                return Err(DaymarkError::DuplicateMark {
                    date,
                    tag_id: tag_id.to_string(),
                });
            }
        }
        if !self.tags.contains_key(tag_id) {
            return Err(DaymarkError::TagNotFound(tag_id.to_string()));
        }

        let mark = Mark::new(tag_id, note);
        self.marks
            .entry(date)
            .or_default()
            .insert(tag_id.to_string(), mark.clone());
        Ok(mark)
    }

    /// Re-insert an already-stored mark during a load, bypassing the
    /// tag-existence check (dangling references are tolerated on disk).
    /// Returns false when the day is full or the tag already marked.
    pub(crate) fn restore_mark(&mut self, date: DateKey, tag_id: String, mark: Mark) -> bool {
        let per_day = self.marks.entry(date).or_default();
        if per_day.len() >= MAX_MARKS_PER_DAY || per_day.contains_key(&tag_id) {
            // Both failure conditions imply a non-empty day entry, so none
            // created here can leak.
            return false;
        }
        per_day.insert(tag_id, mark);
        true
    }

    /// Remove one mark, compacting the day entry if it becomes empty.
    pub fn remove_mark(&mut self, date: DateKey, tag_id: &str) -> bool {
        let Some(per_day) = self.marks.get_mut(&date) else {
            return false;
        };
        let removed = per_day.remove(tag_id).is_some();
        if removed && per_day.is_empty() {
            self.marks.remove(&date);
        }
        removed
    }

    /// Remove every mark for a day in one operation.
    pub fn remove_all_marks(&mut self, date: DateKey) -> bool {
        self.marks.remove(&date).is_some()
    }

    /// Set or clear the note on an existing mark, stamping `updated_at`.
    /// Returns false when no such mark exists.
    pub fn set_note(&mut self, date: DateKey, tag_id: &str, note: Option<&str>) -> bool {
        let Some(mark) = self.marks.get_mut(&date).and_then(|m| m.get_mut(tag_id)) else {
            return false;
        };
        mark.note = note.map(str::to_string);
        mark.updated_at = Some(Utc::now());
        true
    }

    pub fn has_mark(&self, date: DateKey, tag_id: &str) -> bool {
        self.marks
            .get(&date)
            .is_some_and(|per_day| per_day.contains_key(tag_id))
    }

    pub fn mark_count(&self, date: DateKey) -> usize {
        self.marks.get(&date).map_or(0, BTreeMap::len)
    }

    pub fn can_add_mark(&self, date: DateKey) -> bool {
        self.mark_count(date) < MAX_MARKS_PER_DAY
    }

    // =========================================================================
    // Resolved reads
    // =========================================================================

    /// All marks on a day, joined against the live catalog. Marks whose tag
    /// was deleted out of band resolve to the placeholder instead of failing.
    pub fn marks_for(&self, date: DateKey) -> Vec<ResolvedMark> {
        let Some(per_day) = self.marks.get(&date) else {
            return Vec::new();
        };
        per_day
            .values()
            .map(|mark| ResolvedMark::resolve(date, mark, self.tags.get(&mark.tag_id)))
            .collect()
    }

    /// Marks within one month whose tag still exists.
    pub fn marks_for_month(&self, year: i32, month: u32) -> Vec<ResolvedMark> {
        self.resolved_live()
            .filter(|mark| mark.date.in_month(year, month))
            .collect()
    }

    /// Every mark whose tag still exists, across all days.
    pub fn all_marks(&self) -> Vec<ResolvedMark> {
        self.resolved_live().collect()
    }

    /// Marks within the inclusive window `[today - days, today]`, computed on
    /// local calendar dates.
    pub fn marks_in_last_days(&self, days: i64) -> Vec<ResolvedMark> {
        let today = DateKey::today();
        let from = DateKey::new(today.date() - Duration::days(days));
        self.resolved_live()
            .filter(|mark| mark.date >= from && mark.date <= today)
            .collect()
    }

    /// Mark totals per tag, aggregated over `all_marks`.
    pub fn mark_counts_by_tag(&self) -> Vec<TagUsage> {
        let mut usage: Vec<TagUsage> = Vec::new();
        for mark in self.resolved_live() {
            match usage.iter_mut().find(|u| u.tag_id == mark.tag_id) {
                Some(existing) => existing.count += 1,
                None => usage.push(TagUsage {
                    tag_id: mark.tag_id,
                    name: mark.name,
                    color_value: mark.color_value,
                    count: 1,
                }),
            }
        }
        usage
    }

    fn resolved_live(&self) -> impl Iterator<Item = ResolvedMark> + '_ {
        self.marks.iter().flat_map(|(date, per_day)| {
            per_day.values().filter_map(|mark| {
                self.tags
                    .get(&mark.tag_id)
                    .map(|tag| ResolvedMark::resolve(*date, mark, Some(tag)))
            })
        })
    }
}

/// How often one tag has been used, for stats views.
#[derive(Debug, Clone, PartialEq)]
pub struct TagUsage {
    pub tag_id: String,
    pub name: String,
    pub color_value: String,
    pub count: usize,
}
