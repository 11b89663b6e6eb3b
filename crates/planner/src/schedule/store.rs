//! The in-memory planner store and its mutation surface.

use super::error::PlannerError;
use super::seed;
use super::types::*;
use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Length of generated entity ids.
const ID_LEN: usize = 9;

/// Generates a random lower-case alphanumeric id.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}

/// Snapshot of every mutable planner collection.
///
/// Queries borrow the store immutably; mutations go through the methods
/// below so that cascades (subject -> slots -> cancellations) and time
/// validation are always applied. Persisting the store after a mutation is
/// the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStore {
    pub(crate) subjects: Vec<Subject>,
    pub(crate) timetable: Vec<CourseSlot>,
    pub(crate) cancellations: Vec<Cancellation>,
    pub(crate) extra_classes: Vec<ExtraClass>,
    pub(crate) notes: Vec<Note>,
    pub(crate) custom_events: Vec<CustomEvent>,
}

impl ScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the first-run store: initial subjects and weekly timetable.
    pub fn seeded() -> Self {
        let mut store = Self {
            subjects: seed::initial_subjects(),
            ..Self::default()
        };

        let mut taken: Vec<String> = Vec::new();
        store.timetable = seed::initial_timetable(|| loop {
            let id = generate_id();
            if !taken.contains(&id) {
                taken.push(id.clone());
                break id;
            }
        });

        store
    }

    /// Assembles a store from independently loaded collections.
    pub fn from_collections(
        subjects: Vec<Subject>,
        timetable: Vec<CourseSlot>,
        cancellations: Vec<Cancellation>,
        extra_classes: Vec<ExtraClass>,
        notes: Vec<Note>,
        custom_events: Vec<CustomEvent>,
    ) -> Self {
        Self {
            subjects,
            timetable,
            cancellations,
            extra_classes,
            notes,
            custom_events,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn timetable(&self) -> &[CourseSlot] {
        &self.timetable
    }

    pub fn cancellations(&self) -> &[Cancellation] {
        &self.cancellations
    }

    pub fn extra_classes(&self) -> &[ExtraClass] {
        &self.extra_classes
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn custom_events(&self) -> &[CustomEvent] {
        &self.custom_events
    }

    /// Returns an id not used by any entity in the store.
    pub fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if !self.id_in_use(&id) {
                return id;
            }
        }
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.subjects.iter().any(|s| s.id == id)
            || self.timetable.iter().any(|s| s.id == id)
            || self.cancellations.iter().any(|c| c.id == id)
            || self.extra_classes.iter().any(|e| e.id == id)
            || self.notes.iter().any(|n| n.id == id)
            || self.custom_events.iter().any(|e| e.id == id)
    }

    // Subjects

    /// Looks up a subject by id, falling back to an exact code match.
    pub fn get_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .or_else(|| self.subjects.iter().find(|s| s.code == id))
    }

    /// Display info for a subject reference; dangling ids get the UNKNOWN placeholder.
    pub fn subject_display(&self, id: &str) -> SubjectDisplay {
        self.get_subject(id)
            .map(SubjectDisplay::of)
            .unwrap_or_else(SubjectDisplay::unknown)
    }

    pub fn add_subject(&mut self, subject: Subject) -> Result<(), PlannerError> {
        if self.subjects.iter().any(|s| s.id == subject.id) {
            return Err(PlannerError::DuplicateId {
                collection: "subject",
                id: subject.id,
            });
        }

        info!("Adding subject {} ({})", subject.id, subject.display_code());
        self.subjects.push(subject);
        Ok(())
    }

    pub fn update_subject(&mut self, subject: Subject) -> Result<(), PlannerError> {
        match self.subjects.iter_mut().find(|s| s.id == subject.id) {
            Some(existing) => {
                *existing = subject;
                Ok(())
            }
            None => Err(PlannerError::UnknownSubject { id: subject.id }),
        }
    }

    /// Deletes a subject along with its slots, extra classes, and the
    /// cancellations of the removed slots.
    pub fn delete_subject(&mut self, id: &str) -> Option<Subject> {
        let index = self.subjects.iter().position(|s| s.id == id)?;
        let subject = self.subjects.remove(index);

        let removed_slots: Vec<String> = self
            .timetable
            .iter()
            .filter(|slot| slot.subject_id == id)
            .map(|slot| slot.id.clone())
            .collect();
        self.timetable.retain(|slot| slot.subject_id != id);
        self.cancellations
            .retain(|c| !removed_slots.contains(&c.slot_id));

        let extras_before = self.extra_classes.len();
        self.extra_classes.retain(|e| e.subject_id != id);

        info!(
            "Deleted subject {} with {} slot(s) and {} extra class(es)",
            id,
            removed_slots.len(),
            extras_before - self.extra_classes.len()
        );

        Some(subject)
    }

    // Recurring slots

    pub fn slot(&self, id: &str) -> Option<&CourseSlot> {
        self.timetable.iter().find(|s| s.id == id)
    }

    pub fn add_slot(&mut self, slot: CourseSlot) -> Result<(), PlannerError> {
        validate_time_range(slot.start_time, slot.end_time, slot.duration)?;
        if self.timetable.iter().any(|s| s.id == slot.id) {
            return Err(PlannerError::DuplicateId {
                collection: "slot",
                id: slot.id,
            });
        }

        debug!(
            "Adding slot {} ({} {} {})",
            slot.id,
            day_name(slot.day),
            slot.start_time,
            slot.subject_id
        );
        self.timetable.push(slot);
        Ok(())
    }

    /// Removes a slot and every cancellation that refers to it.
    pub fn remove_slot(&mut self, id: &str) -> Option<CourseSlot> {
        let index = self.timetable.iter().position(|s| s.id == id)?;
        let slot = self.timetable.remove(index);
        let dropped = self.drop_cancellations_for(id);

        debug!("Removed slot {} and {} cancellation(s)", id, dropped);
        Some(slot)
    }

    pub(crate) fn drop_cancellations_for(&mut self, slot_id: &str) -> usize {
        let before = self.cancellations.len();
        self.cancellations.retain(|c| c.slot_id != slot_id);
        before - self.cancellations.len()
    }

    /// Returns true if the slot's occurrence on `date` is cancelled.
    pub fn is_cancelled(&self, date: NaiveDate, slot_id: &str) -> bool {
        self.cancellations
            .iter()
            .any(|c| c.date == date && c.slot_id == slot_id)
    }

    // Extra classes

    pub fn extra_class(&self, id: &str) -> Option<&ExtraClass> {
        self.extra_classes.iter().find(|e| e.id == id)
    }

    pub fn add_extra_class(&mut self, extra: ExtraClass) -> Result<(), PlannerError> {
        validate_time_range(extra.start_time, extra.end_time, extra.duration)?;
        if self.extra_classes.iter().any(|e| e.id == extra.id) {
            return Err(PlannerError::DuplicateId {
                collection: "extra class",
                id: extra.id,
            });
        }

        debug!(
            "Adding extra class {} on {} at {}",
            extra.id, extra.date, extra.start_time
        );
        self.extra_classes.push(extra);
        Ok(())
    }

    pub fn remove_extra_class(&mut self, id: &str) -> Option<ExtraClass> {
        let index = self.extra_classes.iter().position(|e| e.id == id)?;
        Some(self.extra_classes.remove(index))
    }

    // Notes and custom events

    pub fn add_note(&mut self, note: Note) -> Result<(), PlannerError> {
        if self.notes.iter().any(|n| n.id == note.id) {
            return Err(PlannerError::DuplicateId {
                collection: "note",
                id: note.id,
            });
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn delete_note(&mut self, id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    pub fn notes_on(&self, date: NaiveDate) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.date == date).collect()
    }

    pub fn add_custom_event(&mut self, event: CustomEvent) -> Result<(), PlannerError> {
        if self.custom_events.iter().any(|e| e.id == event.id) {
            return Err(PlannerError::DuplicateId {
                collection: "custom event",
                id: event.id,
            });
        }
        self.custom_events.push(event);
        Ok(())
    }

    pub fn delete_custom_event(&mut self, id: &str) -> Option<CustomEvent> {
        let index = self.custom_events.iter().position(|e| e.id == id)?;
        Some(self.custom_events.remove(index))
    }

    pub fn custom_events_on(&self, date: NaiveDate) -> Vec<&CustomEvent> {
        self.custom_events.iter().filter(|e| e.date == date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot(id: &str, subject_id: &str, day: Weekday, hour: u8, duration: u32) -> CourseSlot {
        CourseSlot {
            id: id.to_string(),
            subject_id: subject_id.to_string(),
            kind: SlotType::Lecture,
            start_time: ClockTime::from_hour(hour).unwrap(),
            end_time: ClockTime::from_hour(hour + duration as u8).unwrap(),
            duration,
            day,
        }
    }

    fn extra(id: &str, subject_id: &str, on: &str, hour: u8) -> ExtraClass {
        ExtraClass {
            id: id.to_string(),
            date: date(on),
            subject_id: subject_id.to_string(),
            kind: SlotType::Lecture,
            start_time: ClockTime::from_hour(hour).unwrap(),
            end_time: ClockTime::from_hour(hour + 1).unwrap(),
            duration: 1,
        }
    }

    #[test]
    fn test_generated_ids() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_seeded_store() {
        let store = ScheduleStore::seeded();
        assert_eq!(store.subjects().len(), 8);
        assert_eq!(store.timetable().len(), 30);
        assert!(store.cancellations().is_empty());
        assert!(store.extra_classes().is_empty());

        let mut ids: Vec<_> = store.timetable().iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_get_subject_by_id_or_code() {
        let mut store = ScheduleStore::new();
        store
            .add_subject(Subject {
                id: "abc123".to_string(),
                code: "fem".to_string(),
                name: "Finite Element Method".to_string(),
                color: "#10b981".to_string(),
                faculty: Some("Dr. Rao".to_string()),
            })
            .unwrap();

        assert!(store.get_subject("abc123").is_some());
        assert!(store.get_subject("fem").is_some());
        assert!(store.get_subject("FEM").is_none());
        assert!(store.get_subject("nope").is_none());

        let display = store.subject_display("abc123");
        assert_eq!(display.code, "FEM");
        assert!(display.known);

        let missing = store.subject_display("nope");
        assert_eq!(missing.code, "UNKNOWN");
        assert_eq!(missing.color, "#6b7280");
        assert!(!missing.known);
    }

    #[test]
    fn test_duplicate_subject_rejected() {
        let mut store = ScheduleStore::seeded();
        let dup = store.subjects()[0].clone();
        assert!(matches!(
            store.add_subject(dup),
            Err(PlannerError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_update_subject() {
        let mut store = ScheduleStore::seeded();
        let mut hm = store.get_subject("HM").unwrap().clone();
        hm.color = "#000000".to_string();
        store.update_subject(hm).unwrap();
        assert_eq!(store.get_subject("HM").unwrap().color, "#000000");

        let ghost = Subject {
            id: "ghost".to_string(),
            code: "G".to_string(),
            name: "Ghost".to_string(),
            color: "#fff".to_string(),
            faculty: None,
        };
        assert!(store.update_subject(ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_subject_cascades() {
        let mut store = ScheduleStore::seeded();
        let fem_slot = store
            .timetable()
            .iter()
            .find(|s| s.subject_id == "FEM")
            .unwrap()
            .id
            .clone();
        store.cancellations.push(Cancellation {
            id: "c1".to_string(),
            date: date("2026-01-12"),
            slot_id: fem_slot,
        });
        store.add_extra_class(extra("x1", "FEM", "2026-01-17", 9)).unwrap();
        store.add_extra_class(extra("x2", "HM", "2026-01-17", 10)).unwrap();

        assert!(store.delete_subject("FEM").is_some());
        assert!(store.get_subject("FEM").is_none());
        assert!(store.timetable().iter().all(|s| s.subject_id != "FEM"));
        assert!(store.extra_classes().iter().all(|e| e.subject_id != "FEM"));
        assert_eq!(store.extra_classes().len(), 1);
        assert!(store.cancellations().is_empty());

        assert!(store.delete_subject("FEM").is_none());
    }

    #[test]
    fn test_deleted_subject_not_found_through_other_code() {
        let mut store = ScheduleStore::seeded();
        store
            .add_subject(Subject {
                id: "fem-elective".to_string(),
                code: "fem".to_string(),
                name: "FEM Elective".to_string(),
                color: "#123456".to_string(),
                faculty: None,
            })
            .unwrap();

        assert!(store.delete_subject("FEM").is_some());
        assert!(store.get_subject("FEM").is_none());
        assert_eq!(store.get_subject("fem").unwrap().id, "fem-elective");
    }

    #[test]
    fn test_add_slot_validates_time_range() {
        let mut store = ScheduleStore::new();
        let mut bad = slot("s1", "FEM", Weekday::Mon, 8, 1);
        bad.end_time = ClockTime::from_hour(10).unwrap();
        assert!(store.add_slot(bad).unwrap_err().is_invalid_input());
        assert!(store.timetable().is_empty());

        store.add_slot(slot("s1", "FEM", Weekday::Mon, 8, 1)).unwrap();
        assert!(matches!(
            store.add_slot(slot("s1", "HM", Weekday::Tue, 9, 1)),
            Err(PlannerError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_remove_slot_drops_its_cancellations() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("s1", "FEM", Weekday::Mon, 8, 1)).unwrap();
        store.add_slot(slot("s2", "HM", Weekday::Mon, 10, 1)).unwrap();
        store.cancellations.push(Cancellation {
            id: "c1".to_string(),
            date: date("2026-01-12"),
            slot_id: "s1".to_string(),
        });
        store.cancellations.push(Cancellation {
            id: "c2".to_string(),
            date: date("2026-01-12"),
            slot_id: "s2".to_string(),
        });

        assert!(store.remove_slot("s1").is_some());
        assert_eq!(store.cancellations().len(), 1);
        assert_eq!(store.cancellations()[0].slot_id, "s2");
        assert!(store.remove_slot("s1").is_none());
    }

    #[test]
    fn test_extra_classes() {
        let mut store = ScheduleStore::new();
        store.add_extra_class(extra("x1", "FEM", "2026-01-17", 9)).unwrap();

        let mut bad = extra("x2", "FEM", "2026-01-17", 9);
        bad.duration = 3;
        assert!(store.add_extra_class(bad).is_err());

        assert!(store.extra_class("x1").is_some());
        assert!(store.remove_extra_class("x1").is_some());
        assert!(store.remove_extra_class("x1").is_none());
    }

    #[test]
    fn test_notes_and_events_by_date() {
        let mut store = ScheduleStore::new();
        store
            .add_note(Note {
                id: "n1".to_string(),
                date: date("2026-02-10"),
                content: "Bring calculator".to_string(),
                time: None,
            })
            .unwrap();
        store
            .add_custom_event(CustomEvent {
                id: "e1".to_string(),
                date: date("2026-02-10"),
                title: "FEM assignment 2".to_string(),
                kind: EventKind::Assignment,
                time: Some(ClockTime::from_hour(23).unwrap()),
            })
            .unwrap();

        assert_eq!(store.notes_on(date("2026-02-10")).len(), 1);
        assert!(store.notes_on(date("2026-02-11")).is_empty());
        assert_eq!(store.custom_events_on(date("2026-02-10")).len(), 1);

        assert!(store.delete_note("n1").is_some());
        assert!(store.delete_custom_event("e1").is_some());
        assert!(store.notes().is_empty());
        assert!(store.custom_events().is_empty());
    }

    #[test]
    fn test_fresh_id_is_unused() {
        let store = ScheduleStore::seeded();
        let id = store.fresh_id();
        assert!(!store.id_in_use(&id));
    }
}
