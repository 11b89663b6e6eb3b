use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::server::endpoints::{annotations, calendar, schedule, status, subjects, timetable};
use crate::types::PlannerState;

mod endpoints;
mod types;

pub use types::{ApiErrorType, DatedOccurrenceView, OccurrenceView};

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The planner state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<PlannerState>) -> Router {
    // Read-only views over the calendar and resolved occurrences
    let query_router = Router::new()
        .route(
            "/calendar/classify/:date",
            get(calendar::get_classification),
        )
        .route("/calendar/key_dates", get(calendar::get_key_dates))
        .route("/schedule/day/:date", get(schedule::get_day))
        .route("/schedule/range", get(schedule::get_range))
        .route("/schedule/cell", get(schedule::get_cell))
        .route("/schedule/upcoming", get(schedule::get_upcoming))
        .route("/schedule/status/:date", get(schedule::get_day_status));

    // Subjects and the weekly timetable
    let timetable_router = Router::new()
        .route(
            "/subjects",
            get(subjects::get_subjects).post(subjects::post_subject),
        )
        .route(
            "/subjects/:id",
            get(subjects::get_subject)
                .put(subjects::put_subject)
                .delete(subjects::delete_subject),
        )
        .route("/slots", post(timetable::post_slot))
        .route("/slots/:id", delete(timetable::delete_slot))
        .route("/cancellations", post(timetable::post_cancellation))
        .route("/cancellations/restore", post(timetable::post_restore))
        .route("/extra_classes", post(timetable::post_extra_class))
        .route(
            "/extra_classes/:id",
            delete(timetable::delete_extra_class),
        )
        .route("/reschedule", post(timetable::post_reschedule));

    // Per-date notes and events
    let annotation_router = Router::new()
        .route(
            "/notes",
            get(annotations::get_notes).post(annotations::post_note),
        )
        .route("/notes/:id", delete(annotations::delete_note))
        .route(
            "/events",
            get(annotations::get_events).post(annotations::post_event),
        )
        .route("/events/:id", delete(annotations::delete_event));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(query_router)
        .merge(timetable_router)
        .merge(annotation_router)
        .with_state(app_state)
}
