/// First-run subjects and weekly timetable
use super::types::{ClockTime, CourseSlot, SlotType, Subject};
use chrono::Weekday;

/// `(id/code, name, color)` of each initial subject
const INITIAL_SUBJECTS: &[(&str, &str, &str)] = &[
    ("FEM", "Finite Element Method", "#10b981"),
    ("HM", "Heat Transfer", "#3b82f6"),
    ("DE", "Design Engineering", "#8b5cf6"),
    ("PM", "Production Management", "#f59e0b"),
    ("CM", "Computational Methods", "#ec4899"),
    ("TP", "Thermal Power", "#06b6d4"),
    ("TTHT", "Thermal Turbo", "#ef4444"),
    ("LUNCH", "Lunch Break", "#64748b"),
];

/// `(day, subject, type, start hour, duration)` of each initial slot
const INITIAL_TIMETABLE: &[(Weekday, &str, SlotType, u8, u32)] = &[
    (Weekday::Mon, "FEM", SlotType::Lecture, 8, 1),
    (Weekday::Mon, "HM", SlotType::Lecture, 10, 1),
    (Weekday::Mon, "DE", SlotType::Lecture, 11, 1),
    (Weekday::Mon, "PM", SlotType::Lecture, 12, 1),
    (Weekday::Mon, "LUNCH", SlotType::Lunch, 13, 1),
    (Weekday::Mon, "TTHT", SlotType::Lab, 14, 2),
    (Weekday::Mon, "TP", SlotType::Lab, 16, 2),
    (Weekday::Tue, "FEM", SlotType::Lecture, 9, 1),
    (Weekday::Tue, "CM", SlotType::Lecture, 10, 1),
    (Weekday::Tue, "TP", SlotType::Lecture, 11, 1),
    (Weekday::Tue, "TTHT", SlotType::Lecture, 12, 1),
    (Weekday::Tue, "LUNCH", SlotType::Lunch, 13, 1),
    (Weekday::Wed, "CM", SlotType::Lecture, 8, 1),
    (Weekday::Wed, "HM", SlotType::Lecture, 10, 1),
    (Weekday::Wed, "TP", SlotType::Lecture, 11, 1),
    (Weekday::Wed, "TTHT", SlotType::Lecture, 12, 1),
    (Weekday::Wed, "LUNCH", SlotType::Lunch, 13, 1),
    (Weekday::Thu, "HM", SlotType::Lecture, 8, 1),
    (Weekday::Thu, "PM", SlotType::Lecture, 9, 1),
    (Weekday::Thu, "DE", SlotType::Lecture, 10, 1),
    (Weekday::Thu, "FEM", SlotType::Lecture, 11, 1),
    (Weekday::Thu, "CM", SlotType::Lecture, 12, 1),
    (Weekday::Thu, "LUNCH", SlotType::Lunch, 13, 1),
    (Weekday::Thu, "PM", SlotType::Lab, 14, 2),
    (Weekday::Fri, "PM", SlotType::Lecture, 9, 1),
    (Weekday::Fri, "DE", SlotType::Lecture, 10, 1),
    (Weekday::Fri, "TTHT", SlotType::Lecture, 11, 1),
    (Weekday::Fri, "TP", SlotType::Lecture, 12, 1),
    (Weekday::Fri, "LUNCH", SlotType::Lunch, 13, 1),
    (Weekday::Fri, "CM", SlotType::Lecture, 16, 1),
];

pub fn initial_subjects() -> Vec<Subject> {
    INITIAL_SUBJECTS
        .iter()
        .map(|&(id, name, color)| Subject {
            id: id.to_string(),
            code: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            faculty: None,
        })
        .collect()
}

/// Builds the initial timetable, drawing one id per slot from `next_id`.
pub fn initial_timetable(mut next_id: impl FnMut() -> String) -> Vec<CourseSlot> {
    INITIAL_TIMETABLE
        .iter()
        .map(|&(day, subject_id, kind, start_hour, duration)| CourseSlot {
            id: next_id(),
            subject_id: subject_id.to_string(),
            kind,
            start_time: ClockTime::on_the_hour(start_hour),
            end_time: ClockTime::on_the_hour(start_hour + duration as u8),
            duration,
            day,
        })
        .collect()
}
