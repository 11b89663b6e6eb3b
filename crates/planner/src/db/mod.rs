/// Database module for persisting planner collections

mod types;

pub use types::{CollectionKey, DbCollection};

use crate::schedule::ScheduleStore;
use rusqlite::{Connection, OptionalExtension, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

const SCHEMA_SQL: &str = include_str!("../../../../sql/init_planner.sql");

/// Key-value persistence for a [`ScheduleStore`].
///
/// Each collection is stored as its own JSON value so that one corrupt
/// collection never takes the others down with it.
pub struct PlannerDb {
    db: Mutex<Connection>,
}

impl PlannerDb {
    /// Opens (or creates) the database at `db_path` and initializes the schema
    pub fn new(db_path: &str) -> Result<Self> {
        info!("Opening planner database at {}", db_path);
        Self::with_connection(Connection::open(db_path)?)
    }

    /// Creates a throwaway in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock cannot leave SQLite half-written
        self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reads the raw row for a collection, if it has ever been written
    pub fn read_collection(&self, key: CollectionKey) -> Result<Option<DbCollection>> {
        let db = self.conn();
        db.query_row(
            "SELECT key, value, updated_at FROM collections WHERE key = ?",
            [key.as_str()],
            |row| {
                Ok(DbCollection {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )
        .optional()
    }

    /// Writes the raw JSON value of a collection
    pub fn write_collection(&self, key: CollectionKey, value: &str) -> Result<()> {
        let db = self.conn();
        db.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key.as_str(), value),
        )?;
        Ok(())
    }

    /// Loads every collection, substituting the documented default for any
    /// collection that is missing or cannot be decoded.
    ///
    /// Subjects and timetable default to the first-run seed; everything else
    /// defaults to empty.
    pub fn load_store(&self) -> ScheduleStore {
        let seed = ScheduleStore::seeded();

        let store = ScheduleStore::from_collections(
            self.load_collection(CollectionKey::Subjects, || seed.subjects().to_vec()),
            self.load_collection(CollectionKey::Timetable, || seed.timetable().to_vec()),
            self.load_collection(CollectionKey::Cancellations, Vec::new),
            self.load_collection(CollectionKey::ExtraClasses, Vec::new),
            self.load_collection(CollectionKey::Notes, Vec::new),
            self.load_collection(CollectionKey::CustomEvents, Vec::new),
        );

        info!(
            "Loaded planner store ({} subjects, {} slots, {} cancellations, {} extra classes)",
            store.subjects().len(),
            store.timetable().len(),
            store.cancellations().len(),
            store.extra_classes().len()
        );

        store
    }

    fn load_collection<T: DeserializeOwned>(
        &self,
        key: CollectionKey,
        default: impl FnOnce() -> Vec<T>,
    ) -> Vec<T> {
        match self.read_collection(key) {
            Ok(Some(row)) => match serde_json::from_str(&row.value) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Collection {} is corrupt, using default: {}", key, e);
                    default()
                }
            },
            Ok(None) => default(),
            Err(e) => {
                warn!("Failed to read collection {}, using default: {}", key, e);
                default()
            }
        }
    }

    /// Writes all six collections in a single transaction
    pub fn save_store(&self, store: &ScheduleStore) -> Result<()> {
        let values = [
            (CollectionKey::Subjects, to_json(store.subjects())?),
            (CollectionKey::Timetable, to_json(store.timetable())?),
            (CollectionKey::Cancellations, to_json(store.cancellations())?),
            (CollectionKey::ExtraClasses, to_json(store.extra_classes())?),
            (CollectionKey::Notes, to_json(store.notes())?),
            (CollectionKey::CustomEvents, to_json(store.custom_events())?),
        ];

        let mut db = self.conn();
        let tx = db.transaction()?;
        for (key, value) in &values {
            tx.execute(
                "INSERT INTO collections (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                (key.as_str(), value),
            )?;
        }
        tx.commit()
    }
}

fn to_json<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ClockTime, Note, SlotType, Subject};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_db_loads_seed() {
        let db = PlannerDb::in_memory().unwrap();
        let store = db.load_store();

        assert_eq!(store.subjects().len(), 8);
        assert_eq!(store.timetable().len(), 30);
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let db = PlannerDb::in_memory().unwrap();
        let mut store = db.load_store();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let slot_id = store.timetable()[0].id.clone();

        store.cancel_instance(monday, &slot_id).unwrap();
        store
            .add_note(Note {
                id: "n1".to_string(),
                date: monday,
                content: "Quiz".to_string(),
                time: Some(ClockTime::from_hour(9).unwrap()),
            })
            .unwrap();
        db.save_store(&store).unwrap();

        let loaded = db.load_store();
        assert_eq!(loaded, store);
        assert!(loaded.is_cancelled(monday, &slot_id));
        assert!(db
            .read_collection(CollectionKey::Notes)
            .unwrap()
            .unwrap()
            .updated_at
            .is_some());
    }

    #[test]
    fn test_corrupt_collection_falls_back_alone() {
        let db = PlannerDb::in_memory().unwrap();
        let mut store = ScheduleStore::new();
        store
            .add_subject(Subject {
                id: "X".to_string(),
                code: "X".to_string(),
                name: "Only subject".to_string(),
                color: "#ffffff".to_string(),
                faculty: None,
            })
            .unwrap();
        db.save_store(&store).unwrap();

        db.write_collection(CollectionKey::Timetable, "{not json").unwrap();
        db.write_collection(CollectionKey::Notes, r#"[{"id": 3}]"#).unwrap();

        let loaded = db.load_store();
        // Subjects were intact and are kept
        assert_eq!(loaded.subjects().len(), 1);
        // Timetable falls back to the seed, notes to empty
        assert_eq!(loaded.timetable().len(), 30);
        assert!(loaded.timetable().iter().any(|s| s.kind == SlotType::Lunch));
        assert!(loaded.notes().is_empty());
    }

    #[test]
    fn test_collection_keys_are_distinct() {
        let mut keys: Vec<_> = CollectionKey::ALL.iter().map(|k| k.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }
}
