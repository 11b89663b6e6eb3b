//! Instance overrides and rescheduling.

use super::error::PlannerError;
use super::store::ScheduleStore;
use super::types::{end_time_for, Cancellation, ClockTime, CourseSlot, ExtraClass, SlotType};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The instance being moved by [`ScheduleStore::reschedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RescheduleTarget {
    /// One date's occurrence of a recurring slot
    #[serde(rename_all = "camelCase")]
    Recurring {
        slot_id: String,
        original_date: NaiveDate,
    },
    /// A one-off extra class
    #[serde(rename_all = "camelCase")]
    Extra { extra_id: String },
}

/// Where and how the target should take place instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub new_date: NaiveDate,
    pub new_start_time: ClockTime,
    pub new_duration: u32,
    pub new_type: SlotType,
    /// Replace the weekly template instead of moving a single instance
    #[serde(default)]
    pub update_recurring_template: bool,
}

/// What a reschedule changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RescheduleOutcome {
    /// The weekly slot was swapped for a new one; affects every future week.
    TemplateReplaced {
        removed_slot: CourseSlot,
        new_slot: CourseSlot,
        dropped_cancellations: usize,
    },
    /// A single instance was moved to a new extra class.
    InstanceMoved {
        cancellation: Option<Cancellation>,
        removed_extra: Option<ExtraClass>,
        new_extra: ExtraClass,
    },
}

impl ScheduleStore {
    /// Cancels the occurrence of `slot_id` on `date`.
    ///
    /// Returns `Ok(false)` when the instance was already cancelled; no
    /// duplicate row is written in that case.
    pub fn cancel_instance(&mut self, date: NaiveDate, slot_id: &str) -> Result<bool, PlannerError> {
        if self.slot(slot_id).is_none() {
            return Err(PlannerError::UnknownSlot {
                id: slot_id.to_string(),
            });
        }

        Ok(self.insert_cancellation(date, slot_id).is_some())
    }

    /// Removes every cancellation of `slot_id` on `date`, returning how many were removed.
    pub fn restore_instance(&mut self, date: NaiveDate, slot_id: &str) -> usize {
        let before = self.cancellations.len();
        self.cancellations
            .retain(|c| !(c.date == date && c.slot_id == slot_id));
        before - self.cancellations.len()
    }

    fn insert_cancellation(&mut self, date: NaiveDate, slot_id: &str) -> Option<Cancellation> {
        if self.is_cancelled(date, slot_id) {
            return None;
        }

        let cancellation = Cancellation {
            id: self.fresh_id(),
            date,
            slot_id: slot_id.to_string(),
        };
        self.cancellations.push(cancellation.clone());
        Some(cancellation)
    }

    /// Moves `target` according to `request`.
    ///
    /// All checks run before the store is touched, so on error nothing has
    /// changed. With `update_recurring_template` set on a recurring target the
    /// template slot is replaced (new id, weekday of `new_date`); otherwise the
    /// original instance is cancelled or deleted and an extra class is added.
    pub fn reschedule(
        &mut self,
        target: &RescheduleTarget,
        request: &RescheduleRequest,
    ) -> Result<RescheduleOutcome, PlannerError> {
        let end_time = end_time_for(request.new_start_time, request.new_duration)?;

        match target {
            RescheduleTarget::Recurring { slot_id, .. } if request.update_recurring_template => {
                let removed_slot = self.slot(slot_id).cloned().ok_or_else(|| {
                    PlannerError::UnknownSlot {
                        id: slot_id.clone(),
                    }
                })?;

                let new_slot = CourseSlot {
                    id: self.fresh_id(),
                    subject_id: removed_slot.subject_id.clone(),
                    kind: request.new_type,
                    start_time: request.new_start_time,
                    end_time,
                    duration: request.new_duration,
                    day: request.new_date.weekday(),
                };

                self.timetable.retain(|s| s.id != removed_slot.id);
                let dropped_cancellations = self.drop_cancellations_for(&removed_slot.id);
                self.timetable.push(new_slot.clone());

                info!(
                    "Replaced slot {} with {} ({:?} {})",
                    removed_slot.id, new_slot.id, new_slot.day, new_slot.start_time
                );

                Ok(RescheduleOutcome::TemplateReplaced {
                    removed_slot,
                    new_slot,
                    dropped_cancellations,
                })
            }
            RescheduleTarget::Recurring {
                slot_id,
                original_date,
            } => {
                let subject_id = self
                    .slot(slot_id)
                    .map(|s| s.subject_id.clone())
                    .ok_or_else(|| PlannerError::UnknownSlot {
                        id: slot_id.clone(),
                    })?;

                let cancellation = self.insert_cancellation(*original_date, slot_id);
                let new_extra = self.push_extra(subject_id, request, end_time);

                info!(
                    "Moved slot {} from {} to {} {}",
                    slot_id, original_date, new_extra.date, new_extra.start_time
                );

                Ok(RescheduleOutcome::InstanceMoved {
                    cancellation,
                    removed_extra: None,
                    new_extra,
                })
            }
            RescheduleTarget::Extra { extra_id } => {
                let removed = self.extra_class(extra_id).cloned().ok_or_else(|| {
                    PlannerError::UnknownExtraClass {
                        id: extra_id.clone(),
                    }
                })?;

                self.extra_classes.retain(|e| e.id != removed.id);
                let new_extra = self.push_extra(removed.subject_id.clone(), request, end_time);

                info!(
                    "Moved extra class {} from {} to {} {}",
                    removed.id, removed.date, new_extra.date, new_extra.start_time
                );

                Ok(RescheduleOutcome::InstanceMoved {
                    cancellation: None,
                    removed_extra: Some(removed),
                    new_extra,
                })
            }
        }
    }

    fn push_extra(
        &mut self,
        subject_id: String,
        request: &RescheduleRequest,
        end_time: ClockTime,
    ) -> ExtraClass {
        let extra = ExtraClass {
            id: self.fresh_id(),
            date: request.new_date,
            subject_id,
            kind: request.new_type,
            start_time: request.new_start_time,
            end_time,
            duration: request.new_duration,
        };
        self.extra_classes.push(extra.clone());
        extra
    }
}
