use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::schedule::{
    DatedOccurrence, Occurrence, OccurrenceStatus, PlannerError, ScheduleStore, SubjectDisplay,
};

/// An error returned by an endpoint.
#[derive(Debug, Clone)]
pub struct ApiErrorType {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, details): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            message: message.to_string(),
            details,
        }
    }
}

impl From<PlannerError> for ApiErrorType {
    fn from(error: PlannerError) -> Self {
        let (status, message) = if error.is_not_found() {
            (StatusCode::NOT_FOUND, "Referenced entity not found")
        } else if matches!(error, PlannerError::DuplicateId { .. }) {
            (StatusCode::CONFLICT, "Entity already exists")
        } else {
            (StatusCode::BAD_REQUEST, "Invalid request")
        };

        Self::from((status, message, Some(error.to_string())))
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.message,
                "details": self.details,
            })),
        )
            .into_response()
    }
}

/// An occurrence together with how its subject should be displayed.
#[derive(Debug, Clone, Serialize)]
pub struct OccurrenceView {
    #[serde(flatten)]
    pub occurrence: Occurrence,
    pub subject: SubjectDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OccurrenceStatus>,
}

impl OccurrenceView {
    pub fn new(store: &ScheduleStore, occurrence: Occurrence) -> Self {
        let subject = store.subject_display(&occurrence.subject_id);
        Self {
            occurrence,
            subject,
            status: None,
        }
    }
}

/// A dated occurrence together with how its subject should be displayed.
#[derive(Debug, Clone, Serialize)]
pub struct DatedOccurrenceView {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub view: OccurrenceView,
}

impl DatedOccurrenceView {
    pub fn new(store: &ScheduleStore, dated: DatedOccurrence) -> Self {
        Self {
            date: dated.date,
            view: OccurrenceView::new(store, dated.occurrence),
        }
    }
}
