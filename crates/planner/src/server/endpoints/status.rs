use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use std::sync::Arc;

use crate::types::PlannerState;

/// GET /health
pub async fn get_health(State(s): State<Arc<PlannerState>>) -> Response {
    let (subjects, slots) = s.read(|store| (store.subjects().len(), store.timetable().len()));

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "subjects": subjects,
            "slots": slots,
        })),
    )
        .into_response()
}
