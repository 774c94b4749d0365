//! Error types for the daymark ecosystem.

use thiserror::Error;

use crate::date_key::DateKey;

/// Errors that can occur in daymark operations.
#[derive(Error, Debug)]
pub enum DaymarkError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Day {0} already has the maximum of 4 marks")]
    Capacity(DateKey),

    #[error("Tag '{tag_id}' is already marked on {date}")]
    DuplicateMark { date: DateKey, tag_id: String },

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Holiday fetch failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for daymark operations.
pub type DaymarkResult<T> = Result<T, DaymarkError>;
