//! Endpoints for semester calendar queries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::types::PlannerState;

#[derive(Debug, Deserialize)]
pub struct KeyDatesParams {
    /// Reference date; defaults to the server's local date
    pub today: Option<NaiveDate>,
}

/// GET /calendar/classify/:date
pub async fn get_classification(
    Path(date): Path<NaiveDate>,
    State(s): State<Arc<PlannerState>>,
) -> Response {
    info!("GET /calendar/classify/{}", date);
    (StatusCode::OK, Json(s.calendar.classify(date))).into_response()
}

/// GET /calendar/key_dates
///
/// Query parameters:
/// - `today` (optional): reference date used for the past/next flags
pub async fn get_key_dates(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<KeyDatesParams>,
) -> Response {
    let today = params.today.unwrap_or_else(|| Local::now().date_naive());
    info!("GET /calendar/key_dates (today={})", today);

    (StatusCode::OK, Json(s.calendar.key_dates(today))).into_response()
}
