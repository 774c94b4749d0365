//! The daymark context: active partition, identity resolution, persistence.

mod marks;
mod tags;

use serde_json::{Map, Value};

use crate::date_key::DateKey;
use crate::error::{DaymarkError, DaymarkResult};
use crate::holiday::{Holiday, HolidayCache};
use crate::migrate;
use crate::partition::Partition;
use crate::session::CurrentIdentity;
use crate::store::{StorageAdapter, CURRENT_USER_KEY, USERS_KEY};

/// The application's data context, constructed once at startup and passed by
/// reference to everything that reads or writes calendar state.
///
/// Exactly one partition is active at a time: either a named identity's
/// persisted partition or the ephemeral one. Every mutation on a named
/// partition re-serializes the whole partition into the `users` record;
/// ephemeral state never touches the store and is cleared on every
/// transition into or out of anonymous mode.
///
/// Persistence faults are logged and swallowed: the in-memory state keeps
/// the attempted change even when the write failed, so a full store can
/// diverge from memory until the next successful write.
pub struct Daymark {
    store: Box<dyn StorageAdapter>,
    session: Option<CurrentIdentity>,
    partition: Partition,
    holidays: HolidayCache,
}

impl Daymark {
    /// Open the context, resolving the startup identity: a persisted
    /// `current_user` record activates that identity's partition (run
    /// through the migrator), otherwise the ephemeral partition starts out
    /// active and empty.
    pub fn open(store: Box<dyn StorageAdapter>) -> Self {
        Self::open_with(store, HolidayCache::new())
    }

    pub fn open_with(store: Box<dyn StorageAdapter>, holidays: HolidayCache) -> Self {
        let mut daymark = Daymark {
            store,
            session: None,
            partition: Partition::default(),
            holidays,
        };
        daymark.resolve_on_startup();
        daymark
    }

    fn resolve_on_startup(&mut self) {
        match self.store.get(CURRENT_USER_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<CurrentIdentity>(value) {
                Ok(identity) => {
                    self.session = Some(identity);
                    self.load_active_partition();
                }
                Err(err) => {
                    log::warn!("ignoring unreadable current-identity record: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                log::error!("could not read current-identity record: {err}");
            }
        }
    }

    /// Load the active identity's partition from the store, running the
    /// schema migrator. A migration that changed anything is written back
    /// once, immediately.
    fn load_active_partition(&mut self) {
        let Some(identity) = self.session.as_ref().map(|s| s.identity.clone()) else {
            return;
        };

        let users = match self.store.get(USERS_KEY) {
            Ok(users) => users,
            Err(err) => {
                log::error!("could not read stored data for '{identity}': {err}");
                None
            }
        };

        let record = users.as_ref().and_then(|users| users.get(&identity));
        let (partition, dirty) = migrate::load_partition(record);
        self.partition = partition;

        if dirty {
            self.persist();
        }
    }

    /// Write the active named partition into the `users` record
    /// (read-modify-write of the whole map). Anonymous sessions never
    /// persist. Returns whether the write reached the store.
    pub(crate) fn persist(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };

        let record = match serde_json::to_value(&self.partition) {
            Ok(record) => record,
            Err(err) => {
                log::error!("could not serialize partition for '{}': {err}", session.identity);
                return false;
            }
        };

        let mut users = match self.store.get(USERS_KEY) {
            Ok(Some(Value::Object(users))) => users,
            Ok(Some(_)) => {
                log::warn!("users record is not an object; rebuilding it");
                Map::new()
            }
            Ok(None) => Map::new(),
            Err(err) => {
                log::error!("could not read users record, mutation not persisted: {err}");
                return false;
            }
        };

        users.insert(session.identity.clone(), record);
        if let Err(err) = self.store.set(USERS_KEY, Value::Object(users)) {
            log::error!(
                "could not persist partition for '{}', mutation not persisted: {err}",
                session.identity
            );
            return false;
        }
        true
    }

    // =========================================================================
    // Login / logout
    // =========================================================================

    /// Activate `identity`'s persisted partition. Ephemeral data is
    /// discarded, never merged.
    pub fn login(&mut self, identity: &str) -> DaymarkResult<()> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(DaymarkError::Validation(
                "A login identity is required".to_string(),
            ));
        }

        // Whatever was active (ephemeral data, or a previous identity's
        // in-memory copy) is dropped before the switch.
        self.partition.clear();

        let session = CurrentIdentity::new(identity);
        match serde_json::to_value(&session) {
            Ok(record) => {
                if let Err(err) = self.store.set(CURRENT_USER_KEY, record) {
                    log::error!("could not persist current-identity record: {err}");
                }
            }
            Err(err) => log::error!("could not serialize current-identity record: {err}"),
        }

        self.session = Some(session);
        self.load_active_partition();
        Ok(())
    }

    /// Clear the persisted identity and activate a freshly emptied
    /// ephemeral partition.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.remove(CURRENT_USER_KEY) {
            log::error!("could not remove current-identity record: {err}");
        }
        self.session = None;
        self.partition.clear();
    }

    /// Activate the ephemeral partition without touching any persisted
    /// identity record.
    pub fn continue_without_login(&mut self) {
        self.session = None;
        self.partition.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_anonymous(&self) -> bool {
        self.session.is_none()
    }

    pub fn current_identity(&self) -> Option<&CurrentIdentity> {
        self.session.as_ref()
    }

    /// Wipe the active partition and every stored record.
    pub fn clear_all(&mut self) {
        self.partition.clear();
        self.session = None;
        for key in [USERS_KEY, CURRENT_USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                log::error!("could not remove '{key}' record: {err}");
            }
        }
    }

    /// Read access to the active partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    // =========================================================================
    // Holidays
    // =========================================================================

    pub async fn load_holidays(&mut self, year: i32) -> Vec<Holiday> {
        self.holidays.load_for_year(year).await
    }

    pub fn holiday_for_date(&self, date: DateKey) -> Option<&Holiday> {
        self.holidays.for_date(date)
    }

    pub fn holidays_for_month(&self, year: i32, month: u32) -> Vec<&Holiday> {
        self.holidays.for_month(year, month)
    }

    pub fn is_holiday(&self, date: DateKey) -> bool {
        self.holidays.is_holiday(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn open_memory() -> (Daymark, MemoryStore) {
        let store = MemoryStore::new();
        let daymark = Daymark::open(Box::new(store.clone()));
        (daymark, store)
    }

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 3, d).unwrap()
    }

    #[test]
    fn test_startup_without_identity_is_anonymous() {
        let (daymark, store) = open_memory();
        assert!(daymark.is_anonymous());
        assert!(daymark.partition().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_login_requires_identity() {
        let (mut daymark, _) = open_memory();
        assert!(matches!(
            daymark.login("   "),
            Err(DaymarkError::Validation(_))
        ));
        assert!(daymark.is_anonymous());
    }

    #[test]
    fn test_login_trims_and_persists_identity() {
        let (mut daymark, store) = open_memory();
        daymark.login("  a@x.com  ").unwrap();

        assert!(daymark.is_logged_in());
        assert_eq!(daymark.current_identity().unwrap().identity, "a@x.com");

        let record = store.snapshot(CURRENT_USER_KEY).unwrap();
        assert_eq!(record["identity"], "a@x.com");
        assert!(record.get("loginAt").is_some());
    }

    #[test]
    fn test_named_mutations_persist_and_round_trip() {
        let (mut daymark, store) = open_memory();
        daymark.login("a@x.com").unwrap();

        let tag = daymark.add_tag("Work", "#FF0000").unwrap();
        daymark.add_mark(day(1), &tag.id, Some("kickoff")).unwrap();

        // A second context over the same store sees the same data.
        let restored = Daymark::open(Box::new(store.clone()));
        assert!(restored.is_logged_in());
        let loaded = restored.tag(&tag.id).unwrap();
        assert_eq!(loaded.id, tag.id);
        assert_eq!(loaded.name, "Work");
        assert_eq!(loaded.color_value, "#ff0000");

        let marks = restored.marks_for_date(day(1));
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].name, "Work");
        assert_eq!(marks[0].note.as_deref(), Some("kickoff"));
    }

    #[test]
    fn test_anonymous_mutations_never_persist() {
        let (mut daymark, store) = open_memory();
        let tag = daymark.add_tag("Temp", "#00ff00").unwrap();
        daymark.add_mark(day(1), &tag.id, None).unwrap();

        assert_eq!(store.write_count(), 0);
        assert_eq!(store.snapshot(USERS_KEY), None);
    }

    #[test]
    fn test_login_discards_ephemeral_and_logout_empties_it() {
        let (mut daymark, _) = open_memory();

        // Anonymous session with a mark.
        let tag = daymark.add_tag("Temp", "#00ff00").unwrap();
        daymark.add_mark(day(1), &tag.id, None).unwrap();

        // Login: ephemeral data is discarded, not merged.
        daymark.login("a@x.com").unwrap();
        assert!(daymark.partition().is_empty());
        assert!(!daymark.has_mark(day(1), &tag.id));

        // Logout: ephemeral partition comes back empty, not restored.
        daymark.logout();
        assert!(daymark.is_anonymous());
        assert!(daymark.partition().is_empty());
    }

    #[test]
    fn test_logout_removes_identity_record() {
        let (mut daymark, store) = open_memory();
        daymark.login("a@x.com").unwrap();
        assert!(store.snapshot(CURRENT_USER_KEY).is_some());

        daymark.logout();
        assert_eq!(store.snapshot(CURRENT_USER_KEY), None);

        // User data stays on disk for the next login.
        let mut daymark = Daymark::open(Box::new(store.clone()));
        assert!(daymark.is_anonymous());
        daymark.login("a@x.com").unwrap();
        assert!(daymark.is_logged_in());
    }

    #[test]
    fn test_continue_without_login_keeps_identity_record() {
        let (mut daymark, store) = open_memory();
        daymark.login("a@x.com").unwrap();

        daymark.continue_without_login();
        assert!(daymark.is_anonymous());
        assert!(daymark.partition().is_empty());
        // The persisted record is untouched; next startup resolves it.
        assert!(store.snapshot(CURRENT_USER_KEY).is_some());
        let restored = Daymark::open(Box::new(store.clone()));
        assert!(restored.is_logged_in());
    }

    #[test]
    fn test_partitions_are_isolated_per_identity() {
        let (mut daymark, _) = open_memory();

        daymark.login("a@x.com").unwrap();
        let tag = daymark.add_tag("A", "#ff0000").unwrap();
        daymark.add_mark(day(1), &tag.id, None).unwrap();

        daymark.login("b@x.com").unwrap();
        assert!(daymark.partition().is_empty());
        daymark.add_tag("B", "#0000ff").unwrap();

        daymark.login("a@x.com").unwrap();
        assert_eq!(daymark.tag_count(), 1);
        assert_eq!(daymark.tags()[0].name, "A");
        assert!(daymark.has_mark(day(1), &tag.id));
    }

    #[test]
    fn test_migration_persists_once_and_only_once() {
        let store = MemoryStore::new();
        let mut seed = store.clone();
        seed.set(CURRENT_USER_KEY, json!({"identity": "a@x.com", "loginAt": "2024-01-01T00:00:00Z"}))
            .unwrap();
        seed.set(
            USERS_KEY,
            json!({
                "a@x.com": {
                    "colors": {
                        "t1": {
                            "id": "t1",
                            "name": "Work",
                            "color": "red",
                            "createdAt": "2024-01-15T10:00:00.000Z"
                        }
                    },
                    "marks": {
                        "2024-03-01": {
                            "t1": {
                                "colorId": "t1",
                                "colorName": "Work",
                                "colorValue": "red",
                                "createdAt": "2024-03-01T08:00:00.000Z"
                            }
                        }
                    }
                }
            }),
        )
        .unwrap();
        let seeded_writes = store.write_count();

        // First load migrates and writes back exactly once.
        let daymark = Daymark::open(Box::new(store.clone()));
        assert_eq!(store.write_count(), seeded_writes + 1);
        assert_eq!(daymark.tag("t1").unwrap().color_value, "#ef4444");

        // Second load sees migrated data; no further write.
        let daymark = Daymark::open(Box::new(store.clone()));
        assert_eq!(store.write_count(), seeded_writes + 1);
        assert_eq!(daymark.marks_for_date(day(1))[0].name, "Work");
    }

    #[test]
    fn test_delete_tag_cascade_scenario() {
        let (mut daymark, store) = open_memory();
        daymark.login("a@x.com").unwrap();

        let tag = daymark.add_tag("Work", "#ff0000").unwrap();
        daymark.add_mark(day(1), &tag.id, None).unwrap();

        let resolved = daymark.marks_for_date(day(1));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Work");
        assert_eq!(resolved[0].color_value, "#ff0000");

        assert!(daymark.delete_tag(&tag.id));
        assert_eq!(daymark.marks_for_date(day(1)), Vec::new());

        // The cascade is persisted: no ledger entry for the date remains.
        let users = store.snapshot(USERS_KEY).unwrap();
        let marks = &users["a@x.com"]["marks"];
        assert!(marks.get("2024-03-01").is_none());
    }

    #[test]
    fn test_clear_all_wipes_store() {
        let (mut daymark, store) = open_memory();
        daymark.login("a@x.com").unwrap();
        daymark.add_tag("Work", "#ff0000").unwrap();

        daymark.clear_all();
        assert!(daymark.is_anonymous());
        assert_eq!(store.snapshot(USERS_KEY), None);
        assert_eq!(store.snapshot(CURRENT_USER_KEY), None);
    }
}
