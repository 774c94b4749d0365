//! Key/value persistence for daymark state.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::error::DaymarkResult;

/// Storage key for the identity → partition record map.
pub const USERS_KEY: &str = "users";
/// Storage key for the current-identity record.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Durable key/value storage of JSON documents.
///
/// Reads and writes are whole-document: callers read a record, modify it and
/// write it back wholesale. Concurrent writers are not coordinated;
/// last-write-wins.
pub trait StorageAdapter {
    fn get(&self, key: &str) -> DaymarkResult<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> DaymarkResult<()>;
    fn remove(&mut self, key: &str) -> DaymarkResult<()>;
}
