//! Endpoints that change the weekly timetable or override single instances.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::schedule::{
    end_time_for, serde_weekday, validate_time_range, ClockTime, CourseSlot, ExtraClass,
    PlannerError, RescheduleRequest, RescheduleTarget, SlotType,
};
use crate::server::types::ApiErrorType;
use crate::types::PlannerState;

/// Body of POST /slots. `end_time` is derived from `duration` when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub subject_id: String,
    #[serde(with = "serde_weekday")]
    pub day: Weekday,
    #[serde(rename = "type")]
    pub kind: SlotType,
    pub start_time: ClockTime,
    pub end_time: Option<ClockTime>,
    pub duration: u32,
}

/// Body of POST /extra_classes. `end_time` is derived from `duration` when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExtraClass {
    pub subject_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SlotType,
    pub start_time: ClockTime,
    pub end_time: Option<ClockTime>,
    pub duration: u32,
}

/// Body of POST /cancellations and POST /cancellations/restore
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRef {
    pub date: NaiveDate,
    pub slot_id: String,
}

/// Body of POST /reschedule
#[derive(Debug, Deserialize)]
pub struct RescheduleBody {
    pub target: RescheduleTarget,
    #[serde(flatten)]
    pub request: RescheduleRequest,
}

fn resolve_end_time(
    start: ClockTime,
    end: Option<ClockTime>,
    duration: u32,
) -> Result<ClockTime, PlannerError> {
    match end {
        Some(end) => validate_time_range(start, end, duration).map(|_| end),
        None => end_time_for(start, duration),
    }
}

fn planner_error(context: &str, e: PlannerError) -> Response {
    error!("{}: {}", context, e);
    ApiErrorType::from(e).into_response()
}

/// POST /slots
pub async fn post_slot(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<NewSlot>,
) -> Response {
    info!("POST /slots ({} {:?} {})", body.subject_id, body.day, body.start_time);

    let result = s.mutate(|store| {
        let slot = CourseSlot {
            id: store.fresh_id(),
            subject_id: body.subject_id,
            kind: body.kind,
            start_time: body.start_time,
            end_time: resolve_end_time(body.start_time, body.end_time, body.duration)?,
            duration: body.duration,
            day: body.day,
        };
        store.add_slot(slot.clone())?;
        Ok(slot)
    });

    match result {
        Ok(slot) => (StatusCode::CREATED, Json(slot)).into_response(),
        Err(e) => planner_error("Failed to add slot", e),
    }
}

/// DELETE /slots/:id
pub async fn delete_slot(Path(id): Path<String>, State(s): State<Arc<PlannerState>>) -> Response {
    info!("DELETE /slots/{}", id);

    let result = s.mutate(|store| {
        store
            .remove_slot(&id)
            .ok_or_else(|| PlannerError::UnknownSlot { id: id.clone() })
    });

    match result {
        Ok(slot) => (StatusCode::OK, Json(slot)).into_response(),
        Err(e) => planner_error("Failed to remove slot", e),
    }
}

/// POST /cancellations
pub async fn post_cancellation(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<InstanceRef>,
) -> Response {
    info!("POST /cancellations ({} on {})", body.slot_id, body.date);

    match s.mutate(|store| store.cancel_instance(body.date, &body.slot_id)) {
        Ok(created) => (
            StatusCode::OK,
            Json(json!({ "cancelled": true, "created": created })),
        )
            .into_response(),
        Err(e) => planner_error("Failed to cancel instance", e),
    }
}

/// POST /cancellations/restore
pub async fn post_restore(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<InstanceRef>,
) -> Response {
    info!("POST /cancellations/restore ({} on {})", body.slot_id, body.date);

    match s.mutate(|store| Ok(store.restore_instance(body.date, &body.slot_id))) {
        Ok(removed) => (StatusCode::OK, Json(json!({ "removed": removed }))).into_response(),
        Err(e) => planner_error("Failed to restore instance", e),
    }
}

/// POST /extra_classes
pub async fn post_extra_class(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<NewExtraClass>,
) -> Response {
    info!("POST /extra_classes ({} on {} {})", body.subject_id, body.date, body.start_time);

    let result = s.mutate(|store| {
        let extra = ExtraClass {
            id: store.fresh_id(),
            date: body.date,
            subject_id: body.subject_id,
            kind: body.kind,
            start_time: body.start_time,
            end_time: resolve_end_time(body.start_time, body.end_time, body.duration)?,
            duration: body.duration,
        };
        store.add_extra_class(extra.clone())?;
        Ok(extra)
    });

    match result {
        Ok(extra) => (StatusCode::CREATED, Json(extra)).into_response(),
        Err(e) => planner_error("Failed to add extra class", e),
    }
}

/// DELETE /extra_classes/:id
pub async fn delete_extra_class(
    Path(id): Path<String>,
    State(s): State<Arc<PlannerState>>,
) -> Response {
    info!("DELETE /extra_classes/{}", id);

    let result = s.mutate(|store| {
        store
            .remove_extra_class(&id)
            .ok_or_else(|| PlannerError::UnknownExtraClass { id: id.clone() })
    });

    match result {
        Ok(extra) => (StatusCode::OK, Json(extra)).into_response(),
        Err(e) => planner_error("Failed to remove extra class", e),
    }
}

/// POST /reschedule
pub async fn post_reschedule(
    State(s): State<Arc<PlannerState>>,
    Json(body): Json<RescheduleBody>,
) -> Response {
    info!(
        "POST /reschedule ({:?} -> {} {}, template={})",
        body.target,
        body.request.new_date,
        body.request.new_start_time,
        body.request.update_recurring_template
    );

    match s.mutate(|store| store.reschedule(&body.target, &body.request)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => planner_error("Failed to reschedule", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_end_time() {
        let start = ClockTime::from_hour(14).unwrap();
        assert_eq!(
            resolve_end_time(start, None, 2).unwrap(),
            ClockTime::from_hour(16).unwrap()
        );
        assert!(resolve_end_time(start, Some(ClockTime::from_hour(15).unwrap()), 2).is_err());
        assert!(resolve_end_time(start, None, 0).is_err());
    }

    #[test]
    fn test_reschedule_body_shape() {
        let body: RescheduleBody = serde_json::from_str(
            r#"{
                "target": { "kind": "extra", "extraId": "x1" },
                "newDate": "2026-01-17",
                "newStartTime": "09:00",
                "newDuration": 1,
                "newType": "LECTURE",
                "updateRecurringTemplate": false
            }"#,
        )
        .unwrap();

        assert_eq!(
            body.target,
            RescheduleTarget::Extra {
                extra_id: "x1".to_string()
            }
        );
        assert_eq!(body.request.new_start_time.hour(), 9);
    }
}
