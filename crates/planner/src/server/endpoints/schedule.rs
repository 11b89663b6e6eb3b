use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::schedule::{self, resolver};
use crate::server::types::{ApiErrorType, DatedOccurrenceView, OccurrenceView};
use crate::types::PlannerState;

/// Longest range a single request may resolve.
const MAX_RANGE_DAYS: u32 = 366;

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub start: NaiveDate,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingParams {
    /// Defaults to the server's local date
    pub from: Option<NaiveDate>,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub struct CellParams {
    pub date: NaiveDate,
    /// Weekday column of the grid; defaults to the weekday of `date`
    pub weekday: Option<String>,
    pub hour: u8,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    /// Reference time (`YYYY-MM-DDTHH:MM:SS`); defaults to the server's local time
    pub at: Option<NaiveDateTime>,
}

fn default_days() -> u32 {
    7
}

fn range_too_long(days: u32) -> Response {
    ApiErrorType::from((
        StatusCode::BAD_REQUEST,
        "Range too long",
        Some(format!("At most {} days may be requested, got {}", MAX_RANGE_DAYS, days)),
    ))
    .into_response()
}

/// GET /schedule/day/:date
/// Returns the day's classification and its resolved occurrences
pub async fn get_day(Path(date): Path<NaiveDate>, State(s): State<Arc<PlannerState>>) -> Response {
    info!("GET /schedule/day/{}", date);

    let classification = s.calendar.classify(date);
    let occurrences: Vec<_> = s.read(|store| {
        schedule::occurrences_on(store, date)
            .into_iter()
            .map(|o| OccurrenceView::new(store, o))
            .collect()
    });

    (
        StatusCode::OK,
        Json(json!({
            "date": date,
            "weekday": schedule::day_name(date.weekday()),
            "day_type": classification.day_type,
            "label": classification.label,
            "occurrences": occurrences,
        })),
    )
        .into_response()
}

/// GET /schedule/range?start=&days=
/// Returns occurrences for `days` consecutive days, date-major
pub async fn get_range(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<RangeParams>,
) -> Response {
    info!("GET /schedule/range (start={}, days={})", params.start, params.days);

    if params.days > MAX_RANGE_DAYS {
        return range_too_long(params.days);
    }

    let occurrences: Vec<_> = s.read(|store| {
        schedule::occurrences_in_range(store, params.start, params.days)
            .into_iter()
            .map(|d| DatedOccurrenceView::new(store, d))
            .collect()
    });

    (StatusCode::OK, Json(occurrences)).into_response()
}

/// GET /schedule/cell?date=&weekday=&hour=
/// Returns the occurrence starting in one timetable grid cell, or null
pub async fn get_cell(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<CellParams>,
) -> Response {
    info!(
        "GET /schedule/cell (date={}, weekday={:?}, hour={})",
        params.date, params.weekday, params.hour
    );

    let weekday = match params.weekday.as_deref() {
        Some(raw) => match raw.parse::<Weekday>() {
            Ok(day) => day,
            Err(_) => {
                return ApiErrorType::from((
                    StatusCode::BAD_REQUEST,
                    "Invalid weekday",
                    Some(format!("Could not parse weekday: {}", raw)),
                ))
                .into_response()
            }
        },
        None => params.date.weekday(),
    };

    let cell = s.read(|store| {
        schedule::cell_at(store, params.date, weekday, params.hour)
            .map(|o| OccurrenceView::new(store, o))
    });

    (StatusCode::OK, Json(cell)).into_response()
}

/// GET /schedule/upcoming?from=&days=
/// Returns upcoming lectures and labs, skipping lunch and empty blocks
pub async fn get_upcoming(
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<UpcomingParams>,
) -> Response {
    let from = params.from.unwrap_or_else(|| Local::now().date_naive());
    info!("GET /schedule/upcoming (from={}, days={})", from, params.days);

    if params.days > MAX_RANGE_DAYS {
        return range_too_long(params.days);
    }

    let upcoming: Vec<_> = s.read(|store| {
        schedule::upcoming_classes(store, from, params.days)
            .into_iter()
            .map(|d| DatedOccurrenceView::new(store, d))
            .collect()
    });

    (StatusCode::OK, Json(upcoming)).into_response()
}

/// GET /schedule/status/:date?at=
/// Returns the day's occurrences with ONGOING/UPCOMING/COMPLETED status
pub async fn get_day_status(
    Path(date): Path<NaiveDate>,
    State(s): State<Arc<PlannerState>>,
    Query(params): Query<StatusParams>,
) -> Response {
    let at = params.at.unwrap_or_else(|| Local::now().naive_local());
    info!("GET /schedule/status/{} (at={})", date, at);

    let occurrences: Vec<_> = s.read(|store| {
        schedule::occurrences_on(store, date)
            .into_iter()
            .map(|o| {
                let status = resolver::occurrence_status(date, &o, at);
                let mut view = OccurrenceView::new(store, o);
                view.status = Some(status);
                view
            })
            .collect()
    });

    (StatusCode::OK, Json(occurrences)).into_response()
}
