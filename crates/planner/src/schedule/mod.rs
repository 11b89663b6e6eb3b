//! Weekly timetable, per-date overrides, and effective-schedule resolution.
//!
//! The [`ScheduleStore`] owns the mutable collections. [`resolver`] computes
//! what actually happens on a date, and the reschedule operations on the
//! store (see [`planner`]) move single instances or whole weekly slots.

mod error;
pub mod planner;
pub mod resolver;
mod seed;
mod store;
mod types;

pub use error::PlannerError;
pub use planner::{RescheduleOutcome, RescheduleRequest, RescheduleTarget};
pub use resolver::{cell_at, occurrence_status, occurrences_in_range, occurrences_on, upcoming_classes};
pub use seed::{initial_subjects, initial_timetable};
pub use store::{generate_id, ScheduleStore};
pub use types::*;
