//! Error types for timetable mutations.

use thiserror::Error;

/// Errors that can be reported at the mutation boundary of the store.
///
/// Queries never fail; dangling references and duplicate overrides are
/// absorbed by the store and resolver instead of surfacing here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// A clock time could not be parsed as `HH:MM`
    #[error("Invalid clock time: {value}")]
    InvalidTime { value: String },

    /// `end` is not exactly `start + duration` hours
    #[error("Invalid time range: {start}-{end} does not span {duration} hour(s)")]
    InvalidTimeRange {
        start: String,
        end: String,
        duration: u32,
    },

    /// No subject with this id exists
    #[error("Unknown subject: {id}")]
    UnknownSubject { id: String },

    /// No recurring slot with this id exists
    #[error("Unknown course slot: {id}")]
    UnknownSlot { id: String },

    /// No extra class with this id exists
    #[error("Unknown extra class: {id}")]
    UnknownExtraClass { id: String },

    #[error("Unknown note: {id}")]
    UnknownNote { id: String },

    #[error("Unknown custom event: {id}")]
    UnknownCustomEvent { id: String },

    /// An entity with this id is already stored
    #[error("Duplicate {collection} id: {id}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
}

impl PlannerError {
    /// Returns true if the mutation referenced something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlannerError::UnknownSubject { .. }
                | PlannerError::UnknownSlot { .. }
                | PlannerError::UnknownExtraClass { .. }
                | PlannerError::UnknownNote { .. }
                | PlannerError::UnknownCustomEvent { .. }
        )
    }

    /// Returns true if the caller supplied malformed times.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidTime { .. } | PlannerError::InvalidTimeRange { .. }
        )
    }
}
