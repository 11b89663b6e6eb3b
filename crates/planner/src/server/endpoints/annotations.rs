//! Endpoints for notes and custom events attached to dates.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::schedule::{ClockTime, CustomEvent, EventKind, Note, PlannerError};
use crate::server::types::ApiErrorType;
use crate::types::PlannerState;

#[derive(Debug, Deserialize)]
pub struct DateParams {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NewNote {
    pub date: NaiveDate,
    pub content: String,
    pub time: Option<ClockTime>,
}

#[derive(Debug, Deserialize)]
pub struct NewEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub time: Option<ClockTime>,
}

/// GET /notes?date=
pub async fn get_notes(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<DateParams>,
) -> Response {
    info!("GET /notes (date={})", params.date);
    let notes: Vec<Note> = s.read(|store| store.notes_on(params.date).into_iter().cloned().collect());
    (StatusCode::OK, Json(notes)).into_response()
}

/// POST /notes
pub async fn post_note(State(s): State<Arc<PlannerState>>, Json(body): Json<NewNote>) -> Response {
    info!("POST /notes (date={})", body.date);

    let result = s.mutate(|store| {
        let note = Note {
            id: store.fresh_id(),
            date: body.date,
            content: body.content,
            time: body.time,
        };
        store.add_note(note.clone())?;
        Ok(note)
    });

    match result {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /notes/:id
pub async fn delete_note(Path(id): Path<String>, State(s): State<Arc<PlannerState>>) -> Response {
    info!("DELETE /notes/{}", id);

    let result = s.mutate(|store| {
        store
            .delete_note(&id)
            .ok_or_else(|| PlannerError::UnknownNote { id: id.clone() })
    });

    match result {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => {
            warn!("Failed to delete note: {}", e);
            ApiErrorType::from(e).into_response()
        }
    }
}

/// GET /events?date=
pub async fn get_events(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<DateParams>,
) -> Response {
    info!("GET /events (date={})", params.date);
    let events: Vec<CustomEvent> = s.read(|store| {
        store
            .custom_events_on(params.date)
            .into_iter()
            .cloned()
            .collect()
    });
    (StatusCode::OK, Json(events)).into_response()
}

/// POST /events
pub async fn post_event(State(s): State<Arc<PlannerState>>, Json(body): Json<NewEvent>) -> Response {
    info!("POST /events ({} on {})", body.title, body.date);

    let result = s.mutate(|store| {
        let event = CustomEvent {
            id: store.fresh_id(),
            date: body.date,
            title: body.title,
            kind: body.kind,
            time: body.time,
        };
        store.add_custom_event(event.clone())?;
        Ok(event)
    });

    match result {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => ApiErrorType::from(e).into_response(),
    }
}

/// DELETE /events/:id
pub async fn delete_event(Path(id): Path<String>, State(s): State<Arc<PlannerState>>) -> Response {
    info!("DELETE /events/{}", id);

    let result = s.mutate(|store| {
        store
            .delete_custom_event(&id)
            .ok_or_else(|| PlannerError::UnknownCustomEvent { id: id.clone() })
    });

    match result {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => {
            warn!("Failed to delete event: {}", e);
            ApiErrorType::from(e).into_response()
        }
    }
}
