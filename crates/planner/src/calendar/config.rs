/// Loading the semester calendar, and the built-in 2026 semester
use super::error::CalendarError;
use super::types::*;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// `(date, type, label)` of the built-in special dates
const SPECIAL_DATES_2026: &[(&str, DayType, &str)] = &[
    ("2026-01-07", DayType::Commencement, "Classes Begin"),
    ("2026-01-26", DayType::Holiday, "Republic Day"),
    ("2026-02-23", DayType::Exam, "Mid Sem"),
    ("2026-02-24", DayType::Exam, "Mid Sem"),
    ("2026-02-25", DayType::Exam, "Mid Sem"),
    ("2026-02-26", DayType::Exam, "Mid Sem"),
    ("2026-02-27", DayType::Exam, "Mid Sem"),
    ("2026-02-28", DayType::Exam, "Mid Sem"),
    ("2026-03-02", DayType::Exam, "Mid Sem"),
    ("2026-03-03", DayType::Exam, "Mid Sem"),
    ("2026-03-04", DayType::Holiday, "Holi"),
    ("2026-03-19", DayType::Holiday, "Gudi Padava"),
    ("2026-03-21", DayType::Holiday, "Id-ul-Fitr"),
    ("2026-03-26", DayType::Holiday, "Ram Navami"),
    ("2026-03-31", DayType::Holiday, "Mahavir Jayanti"),
    ("2026-04-03", DayType::Holiday, "Good Friday"),
    ("2026-04-14", DayType::Holiday, "Ambedkar Jayanti"),
    ("2026-04-27", DayType::Exam, "End Sem"),
    ("2026-04-28", DayType::Exam, "End Sem"),
    ("2026-04-29", DayType::Exam, "End Sem"),
    ("2026-04-30", DayType::Exam, "End Sem"),
    ("2026-05-01", DayType::Holiday, "Maharashtra Day"),
    ("2026-05-02", DayType::Exam, "End Sem"),
    ("2026-05-04", DayType::Exam, "End Sem"),
    ("2026-05-05", DayType::Exam, "End Sem"),
    ("2026-05-06", DayType::Exam, "End Sem"),
    ("2026-05-20", DayType::ReExam, "Re-Exam"),
    ("2026-05-21", DayType::ReExam, "Re-Exam"),
    ("2026-05-22", DayType::ReExam, "Re-Exam"),
    ("2026-05-23", DayType::ReExam, "Re-Exam"),
    ("2026-05-27", DayType::Holiday, "Id-ul-Zuha"),
    ("2026-06-26", DayType::Holiday, "Muharram"),
];

const CLASS_RANGES_2026: &[(&str, &str)] = &[
    ("2026-01-08", "2026-02-21"),
    ("2026-03-04", "2026-04-24"),
];

const SEMESTER_2026: (&str, &str) = ("2026-01-01", "2026-07-31");

fn iso(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

impl SemesterCalendar {
    /// Loads a calendar from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to a JSON file with `specialDates` and `classRanges`
    ///
    /// # Returns
    /// * `Ok(SemesterCalendar)` - The loaded calendar
    /// * `Err` - If the file can't be read or parsed, or a class range is inverted
    pub fn load_from_file(path: &Path) -> Result<Self, CalendarError> {
        let content = fs::read_to_string(path)?;
        let calendar = Self::from_json(&content)?;

        info!(
            "Loaded semester calendar from {} ({} special dates, {} class ranges)",
            path.display(),
            calendar.special_dates.len(),
            calendar.class_ranges.len()
        );

        Ok(calendar)
    }

    /// Parses and validates a calendar from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, CalendarError> {
        let calendar: SemesterCalendar = serde_json::from_str(content)?;

        if let Some(range) = calendar.class_ranges.iter().find(|r| r.start > r.end) {
            return Err(CalendarError::InvertedRange {
                start: range.start.to_string(),
                end: range.end.to_string(),
            });
        }

        Ok(calendar)
    }

    /// Creates a calendar with no special dates or class ranges.
    pub fn empty() -> Self {
        SemesterCalendar {
            semester_start: None,
            semester_end: None,
            special_dates: BTreeMap::new(),
            class_ranges: Vec::new(),
        }
    }

    /// The built-in January-July 2026 semester.
    pub fn semester_2026() -> Self {
        let special_dates = SPECIAL_DATES_2026
            .iter()
            .filter_map(|&(date, day_type, label)| {
                iso(date).map(|date| {
                    (
                        date,
                        SpecialDate {
                            day_type,
                            label: Some(label.to_string()),
                        },
                    )
                })
            })
            .collect();

        let class_ranges = CLASS_RANGES_2026
            .iter()
            .filter_map(|&(start, end)| {
                Some(ClassRange {
                    start: iso(start)?,
                    end: iso(end)?,
                })
            })
            .collect();

        SemesterCalendar {
            semester_start: iso(SEMESTER_2026.0),
            semester_end: iso(SEMESTER_2026.1),
            special_dates,
            class_ranges,
        }
    }
}

impl Default for SemesterCalendar {
    fn default() -> Self {
        Self::semester_2026()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_semester_is_complete() {
        let calendar = SemesterCalendar::default();
        assert_eq!(calendar.special_dates.len(), SPECIAL_DATES_2026.len());
        assert_eq!(calendar.class_ranges.len(), 2);
        assert_eq!(calendar.semester_start, iso("2026-01-01"));
    }

    #[test]
    fn test_from_json() {
        let calendar = SemesterCalendar::from_json(
            r#"{
                "specialDates": {
                    "2026-08-15": { "type": "HOLIDAY", "label": "Independence Day" },
                    "2026-09-01": { "type": "RE_EXAM" }
                },
                "classRanges": [ { "start": "2026-08-01", "end": "2026-11-30" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(calendar.special_dates.len(), 2);
        let re_exam = &calendar.special_dates[&iso("2026-09-01").unwrap()];
        assert_eq!(re_exam.day_type, DayType::ReExam);
        assert_eq!(re_exam.label, None);
        assert!(calendar.semester_start.is_none());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = SemesterCalendar::from_json(
            r#"{ "classRanges": [ { "start": "2026-03-01", "end": "2026-02-01" } ] }"#,
        );
        assert!(matches!(result, Err(CalendarError::InvertedRange { .. })));
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let calendar = SemesterCalendar::default();
        let json = serde_json::to_string(&calendar).unwrap();
        assert_eq!(SemesterCalendar::from_json(&json).unwrap(), calendar);
    }
}
