//! Mark ledger operations on the active partition.

use crate::date_key::DateKey;
use crate::daymark::Daymark;
use crate::error::DaymarkResult;
use crate::mark::{Mark, ResolvedMark};

impl Daymark {
    /// Mark a day with a tag, optionally annotated with a note.
    pub fn add_mark(
        &mut self,
        date: DateKey,
        tag_id: &str,
        note: Option<&str>,
    ) -> DaymarkResult<Mark> {
        let mark = self.partition.insert_mark(date, tag_id, note)?;
        self.persist();
        Ok(mark)
    }

    pub fn remove_mark(&mut self, date: DateKey, tag_id: &str) -> bool {
        let removed = self.partition.remove_mark(date, tag_id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn remove_all_marks(&mut self, date: DateKey) -> bool {
        let removed = self.partition.remove_all_marks(date);
        if removed {
            self.persist();
        }
        removed
    }

    /// Set or clear the note on an existing mark. A missing mark is a no-op
    /// returning false.
    pub fn set_note(&mut self, date: DateKey, tag_id: &str, note: Option<&str>) -> bool {
        let changed = self.partition.set_note(date, tag_id, note);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn has_mark(&self, date: DateKey, tag_id: &str) -> bool {
        self.partition.has_mark(date, tag_id)
    }

    pub fn mark_count(&self, date: DateKey) -> usize {
        self.partition.mark_count(date)
    }

    pub fn can_add_mark(&self, date: DateKey) -> bool {
        self.partition.can_add_mark(date)
    }

    pub fn marks_for_date(&self, date: DateKey) -> Vec<ResolvedMark> {
        self.partition.marks_for(date)
    }

    pub fn marks_for_month(&self, year: i32, month: u32) -> Vec<ResolvedMark> {
        self.partition.marks_for_month(year, month)
    }

    pub fn all_marks(&self) -> Vec<ResolvedMark> {
        self.partition.all_marks()
    }

    pub fn marks_in_last_days(&self, days: i64) -> Vec<ResolvedMark> {
        self.partition.marks_in_last_days(days)
    }
}
