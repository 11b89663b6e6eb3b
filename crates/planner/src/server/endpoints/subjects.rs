//! Endpoints for managing subjects.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::schedule::{PlannerError, Subject};
use crate::server::types::ApiErrorType;
use crate::types::PlannerState;

/// Body of POST /subjects. The id defaults to the upper-cased code.
#[derive(Debug, Deserialize)]
pub struct NewSubject {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub color: String,
    pub faculty: Option<String>,
}

/// Body of PUT /subjects/:id
#[derive(Debug, Deserialize)]
pub struct SubjectUpdate {
    pub code: String,
    pub name: String,
    pub color: String,
    pub faculty: Option<String>,
}

fn subject_not_found(id: &str) -> Response {
    warn!("Subject not found: {}", id);
    ApiErrorType::from((
        StatusCode::NOT_FOUND,
        "Subject not found",
        Some(format!("No subject with ID: {}", id)),
    ))
    .into_response()
}

/// GET /subjects
pub async fn get_subjects(State(s): State<Arc<PlannerState>>) -> Response {
    info!("GET /subjects");
    let subjects = s.read(|store| store.subjects().to_vec());
    (StatusCode::OK, Json(subjects)).into_response()
}

/// GET /subjects/:id
pub async fn get_subject(Path(id): Path<String>, State(s): State<Arc<PlannerState>>) -> Response {
    info!("GET /subjects/{}", id);

    match s.read(|store| store.get_subject(&id).cloned()) {
        Some(subject) => (StatusCode::OK, Json(subject)).into_response(),
        None => subject_not_found(&id),
    }
}

/// POST /subjects
pub async fn post_subject(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<NewSubject>,
) -> Response {
    info!("POST /subjects ({})", body.code);

    let subject = Subject {
        id: body.id.unwrap_or_else(|| body.code.to_uppercase()),
        code: body.code,
        name: body.name,
        color: body.color,
        faculty: body.faculty,
    };

    match s.mutate(|store| store.add_subject(subject.clone())) {
        Ok(()) => (StatusCode::CREATED, Json(subject)).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// PUT /subjects/:id
pub async fn put_subject(
    Path(id): Path<String>,
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<SubjectUpdate>,
) -> Response {
    info!("PUT /subjects/{}", id);

    let subject = Subject {
        id,
        code: body.code,
        name: body.name,
        color: body.color,
        faculty: body.faculty,
    };

    match s.mutate(|store| store.update_subject(subject.clone())) {
        Ok(()) => (StatusCode::OK, Json(subject)).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /subjects/:id
///
/// Also removes the subject's slots, extra classes, and their cancellations.
pub async fn delete_subject(
    Path(id): Path<String>,
    State(s): State<Arc<PlannerState>>,
) -> Response {
    info!("DELETE /subjects/{}", id);

    let result = s.mutate(|store| {
        store
            .delete_subject(&id)
            .ok_or_else(|| PlannerError::UnknownSubject { id: id.clone() })
    });

    match result {
        Ok(subject) => (StatusCode::OK, Json(subject)).into_response(),
        Err(_) => subject_not_found(&id),
    }
}
