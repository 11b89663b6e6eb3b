//! Effective-schedule resolution.
//!
//! Merges the weekly template with cancellations and extra classes to
//! produce the occurrences that actually apply on a date. Everything here is
//! a pure query over a [`ScheduleStore`] snapshot.

use super::store::ScheduleStore;
use super::types::{ClockTime, DatedOccurrence, Occurrence, OccurrenceStatus};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::collections::HashSet;
use tracing::debug;

/// Resolves every occurrence on `date`, sorted by start time.
///
/// Cancelled recurring slots are kept and flagged with `is_cancelled`. Ties
/// on start time keep source order, recurring slots before extra classes.
pub fn occurrences_on(store: &ScheduleStore, date: NaiveDate) -> Vec<Occurrence> {
    let weekday = date.weekday();

    let cancelled: HashSet<&str> = store
        .cancellations()
        .iter()
        .filter(|c| c.date == date)
        .map(|c| c.slot_id.as_str())
        .collect();

    let recurring = store
        .timetable()
        .iter()
        .filter(|slot| slot.day == weekday)
        .map(|slot| Occurrence::from_slot(slot, cancelled.contains(slot.id.as_str())));

    let extras = store
        .extra_classes()
        .iter()
        .filter(|extra| extra.date == date)
        .map(Occurrence::from_extra);

    let mut occurrences: Vec<Occurrence> = recurring.chain(extras).collect();
    // Stable sort keeps the recurring-then-extra order for equal start times
    occurrences.sort_by_key(|o| o.start_time.sort_key());

    debug!("Resolved {} occurrence(s) on {}", occurrences.len(), date);
    occurrences
}

/// Resolves `day_count` consecutive days starting at `start`.
///
/// Output is date-major, time-minor.
pub fn occurrences_in_range(
    store: &ScheduleStore,
    start: NaiveDate,
    day_count: u32,
) -> Vec<DatedOccurrence> {
    start
        .iter_days()
        .take(day_count as usize)
        .flat_map(|date| {
            occurrences_on(store, date)
                .into_iter()
                .map(move |occurrence| DatedOccurrence { date, occurrence })
        })
        .collect()
}

/// Looks up the occurrence starting at `hour` for one timetable grid cell.
///
/// An extra class on `date` shadows a recurring slot on `weekday` with the
/// same start hour. Cells covered by an earlier multi-hour occurrence are
/// not detected here; use [`Occurrence::covers`] for that.
pub fn cell_at(
    store: &ScheduleStore,
    date: NaiveDate,
    weekday: Weekday,
    hour: u8,
) -> Option<Occurrence> {
    if let Some(extra) = store
        .extra_classes()
        .iter()
        .find(|e| e.date == date && e.start_time.hour() == hour)
    {
        return Some(Occurrence::from_extra(extra));
    }

    store
        .timetable()
        .iter()
        .find(|s| s.day == weekday && s.start_time.hour() == hour)
        .map(|slot| Occurrence::from_slot(slot, store.is_cancelled(date, &slot.id)))
}

/// Upcoming classes over `days` days from `from`.
///
/// Lunch and empty blocks of the weekly template are left out; extra classes
/// are always listed. Cancelled classes stay in, flagged.
pub fn upcoming_classes(store: &ScheduleStore, from: NaiveDate, days: u32) -> Vec<DatedOccurrence> {
    occurrences_in_range(store, from, days)
        .into_iter()
        .filter(|d| d.occurrence.is_extra || d.occurrence.kind.is_class())
        .collect()
}

/// Classifies an occurrence on `date` against an explicit reference time.
pub fn occurrence_status(
    date: NaiveDate,
    occurrence: &Occurrence,
    reference: NaiveDateTime,
) -> OccurrenceStatus {
    let midnight = date.and_time(NaiveTime::MIN);
    let offset = |time: ClockTime| {
        midnight.checked_add_signed(Duration::minutes(time.minutes_since_midnight() as i64))
    };

    // Past the end of chrono's range nothing can still be running
    let (Some(start), Some(end)) = (offset(occurrence.start_time), offset(occurrence.end_time)) else {
        return OccurrenceStatus::Completed;
    };

    if reference < start {
        OccurrenceStatus::Upcoming
    } else if reference < end {
        OccurrenceStatus::Ongoing
    } else {
        OccurrenceStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
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

    fn extra(id: &str, subject_id: &str, on: &str, hour: u8, duration: u32) -> ExtraClass {
        ExtraClass {
            id: id.to_string(),
            date: date(on),
            subject_id: subject_id.to_string(),
            kind: SlotType::Lecture,
            start_time: ClockTime::from_hour(hour).unwrap(),
            end_time: ClockTime::from_hour(hour + duration as u8).unwrap(),
            duration,
        }
    }

    fn cancel(store: &mut ScheduleStore, on: &str, slot_id: &str) {
        store.cancellations.push(Cancellation {
            id: format!("c-{}-{}", on, slot_id),
            date: date(on),
            slot_id: slot_id.to_string(),
        });
    }

    #[test]
    fn test_seeded_monday_is_sorted() {
        let store = ScheduleStore::seeded();
        // 2026-01-12 is a Monday
        let occurrences = occurrences_on(&store, date("2026-01-12"));

        let starts: Vec<String> = occurrences
            .iter()
            .map(|o| o.start_time.to_string())
            .collect();
        assert_eq!(
            starts,
            vec!["08:00", "10:00", "11:00", "12:00", "13:00", "14:00", "16:00"]
        );
        assert!(occurrences.iter().all(|o| !o.is_extra && !o.is_cancelled));
    }

    #[test]
    fn test_sort_is_numeric_not_lexical() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("late", "A", Weekday::Mon, 10, 1)).unwrap();
        let mut early = slot("early", "B", Weekday::Mon, 9, 1);
        early.start_time = "9:00".parse().unwrap();
        early.end_time = "10:00".parse().unwrap();
        store.add_slot(early).unwrap();

        let occurrences = occurrences_on(&store, date("2026-01-12"));
        assert_eq!(occurrences[0].source_id, "early");
        assert_eq!(occurrences[1].source_id, "late");
    }

    #[test]
    fn test_cancelled_slots_are_flagged_not_dropped() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("s1", "FEM", Weekday::Mon, 8, 1)).unwrap();
        store.add_slot(slot("s2", "HM", Weekday::Mon, 10, 1)).unwrap();
        cancel(&mut store, "2026-01-12", "s1");

        let monday = occurrences_on(&store, date("2026-01-12"));
        assert_eq!(monday.len(), 2);
        assert!(monday[0].is_cancelled);
        assert!(!monday[1].is_cancelled);

        // The following Monday is unaffected
        let next = occurrences_on(&store, date("2026-01-19"));
        assert!(next.iter().all(|o| !o.is_cancelled));
    }

    #[test]
    fn test_extras_merge_and_ties_prefer_recurring() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("s1", "FEM", Weekday::Mon, 10, 1)).unwrap();
        store
            .add_extra_class(extra("x1", "HM", "2026-01-12", 10, 1))
            .unwrap();
        store
            .add_extra_class(extra("x2", "DE", "2026-01-12", 8, 1))
            .unwrap();
        store
            .add_extra_class(extra("x3", "DE", "2026-01-13", 8, 1))
            .unwrap();

        let ids: Vec<_> = occurrences_on(&store, date("2026-01-12"))
            .into_iter()
            .map(|o| (o.source_id, o.is_extra))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("x2".to_string(), true),
                ("s1".to_string(), false),
                ("x1".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_dangling_subject_still_resolves() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("s1", "GONE", Weekday::Mon, 8, 1)).unwrap();

        let occurrences = occurrences_on(&store, date("2026-01-12"));
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].subject_id, "GONE");
        assert!(!store.subject_display("GONE").known);
    }

    #[test]
    fn test_range_is_date_major() {
        let store = ScheduleStore::seeded();
        // Saturday 2026-01-10 through Tuesday 2026-01-13
        let range = occurrences_in_range(&store, date("2026-01-10"), 4);

        assert_eq!(range.len(), 7 + 5);
        assert!(range
            .windows(2)
            .all(|w| (w[0].date, w[0].occurrence.start_time) <= (w[1].date, w[1].occurrence.start_time)));
        assert_eq!(range.first().unwrap().date, date("2026-01-12"));
        assert_eq!(range.last().unwrap().date, date("2026-01-13"));

        assert!(occurrences_in_range(&store, date("2026-01-12"), 0).is_empty());
    }

    #[test]
    fn test_cell_lookup_prefers_extra() {
        let mut store = ScheduleStore::new();
        store.add_slot(slot("s1", "FEM", Weekday::Mon, 8, 1)).unwrap();
        store.add_slot(slot("s2", "TTHT", Weekday::Mon, 14, 2)).unwrap();
        store
            .add_extra_class(extra("x1", "HM", "2026-01-12", 8, 1))
            .unwrap();
        cancel(&mut store, "2026-01-12", "s2");

        let cell = cell_at(&store, date("2026-01-12"), Weekday::Mon, 8).unwrap();
        assert_eq!(cell.source_id, "x1");
        assert!(cell.is_extra);

        let next_week = cell_at(&store, date("2026-01-19"), Weekday::Mon, 8).unwrap();
        assert_eq!(next_week.source_id, "s1");

        let lab = cell_at(&store, date("2026-01-12"), Weekday::Mon, 14).unwrap();
        assert!(lab.is_cancelled);
        assert!(lab.covers(15));
        assert!(cell_at(&store, date("2026-01-12"), Weekday::Mon, 15).is_none());
    }

    #[test]
    fn test_upcoming_skips_lunch() {
        let store = ScheduleStore::seeded();
        let upcoming = upcoming_classes(&store, date("2026-01-12"), 1);

        assert_eq!(upcoming.len(), 6);
        assert!(upcoming
            .iter()
            .all(|d| d.occurrence.kind != SlotType::Lunch));
    }

    #[test]
    fn test_occurrence_status() {
        let store = ScheduleStore::seeded();
        let monday = date("2026-01-12");
        let lab = occurrences_on(&store, monday)
            .into_iter()
            .find(|o| o.start_time.hour() == 14)
            .unwrap();

        assert_eq!(
            occurrence_status(monday, &lab, at("2026-01-12 13:59")),
            OccurrenceStatus::Upcoming
        );
        assert_eq!(
            occurrence_status(monday, &lab, at("2026-01-12 14:00")),
            OccurrenceStatus::Ongoing
        );
        assert_eq!(
            occurrence_status(monday, &lab, at("2026-01-12 15:59")),
            OccurrenceStatus::Ongoing
        );
        assert_eq!(
            occurrence_status(monday, &lab, at("2026-01-12 16:00")),
            OccurrenceStatus::Completed
        );
        assert_eq!(
            occurrence_status(monday, &lab, at("2026-01-11 18:00")),
            OccurrenceStatus::Upcoming
        );
    }

    #[test]
    fn test_status_at_end_of_date_range() {
        let late = Occurrence::from_extra(&ExtraClass {
            id: "x-late".to_string(),
            date: NaiveDate::MAX,
            subject_id: "FEM".to_string(),
            kind: SlotType::Lecture,
            start_time: ClockTime::from_hour(23).unwrap(),
            end_time: ClockTime::from_hour(24).unwrap(),
            duration: 1,
        });

        let reference = NaiveDate::MAX.and_hms_opt(23, 30, 0).unwrap();
        assert_eq!(
            occurrence_status(NaiveDate::MAX, &late, reference),
            OccurrenceStatus::Completed
        );
    }
}
