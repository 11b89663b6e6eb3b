use std::sync::{Mutex, MutexGuard};

use tracing::error;

use crate::calendar::SemesterCalendar;
use crate::db::PlannerDb;
use crate::schedule::{PlannerError, ScheduleStore};

/// Shared state for the planner server.
pub struct PlannerState {
    /// The live store; every query and mutation goes through this lock
    store: Mutex<ScheduleStore>,
    /// Read-only semester configuration
    pub calendar: SemesterCalendar,
    /// Persistence for the store
    pub db: PlannerDb,
}

impl PlannerState {
    /// Creates the state, loading the store from `db`.
    pub fn new(calendar: SemesterCalendar, db: PlannerDb) -> Self {
        let store = db.load_store();
        Self {
            store: Mutex::new(store),
            calendar,
            db,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScheduleStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs a query against the current store.
    pub fn read<T>(&self, f: impl FnOnce(&ScheduleStore) -> T) -> T {
        f(&self.lock())
    }

    /// Applies a mutation and, if it succeeded, persists the store.
    ///
    /// A failed save is logged but does not undo the mutation; the next
    /// successful save writes the full store again.
    pub fn mutate<T>(
        &self,
        f: impl FnOnce(&mut ScheduleStore) -> Result<T, PlannerError>,
    ) -> Result<T, PlannerError> {
        let mut store = self.lock();
        let result = f(&mut store)?;

        if let Err(e) = self.db.save_store(&store) {
            error!("Failed to persist planner store: {}", e);
        }

        Ok(result)
    }
}
