//! Core state for the daymark ecosystem.
//!
//! This crate provides the calendar data model used by daymark frontends:
//! - `Daymark`, the context object holding the active partition and session
//! - tag catalog and mark ledger types with their invariants
//! - per-identity storage partitioning over a pluggable key/value store
//! - schema migration for records written by older releases
//! - holiday lookup with a static fallback

pub mod color;
pub mod config;
pub mod date_key;
pub mod daymark;
pub mod error;
pub mod holiday;
pub mod mark;
pub mod migrate;
pub mod partition;
pub mod session;
pub mod store;
pub mod tag;
pub mod view;

pub use config::GlobalConfig;
pub use date_key::DateKey;
pub use daymark::Daymark;
pub use error::{DaymarkError, DaymarkResult};
pub use holiday::{Holiday, HolidayCache, HolidayKind};
pub use mark::{Mark, ResolvedMark, REMOVED_TAG_COLOR, REMOVED_TAG_NAME};
pub use partition::{Partition, TagUsage, MAX_MARKS_PER_DAY};
pub use session::CurrentIdentity;
pub use store::{FileStore, MemoryStore, StorageAdapter};
pub use tag::{Tag, TagPatch};
pub use view::MonthCursor;
