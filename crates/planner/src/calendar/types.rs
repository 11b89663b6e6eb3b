/// Types for the semester calendar
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic category of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Holiday,
    Exam,
    Commencement,
    ReExam,
    Classes,
    Sunday,
    None,
}

/// A date with an explicit semester-wide classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    #[serde(rename = "type")]
    pub day_type: DayType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Inclusive range of regular class days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ClassRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Static semester configuration consulted by the date classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterCalendar {
    #[serde(default)]
    pub semester_start: Option<NaiveDate>,
    #[serde(default)]
    pub semester_end: Option<NaiveDate>,
    #[serde(default)]
    pub special_dates: BTreeMap<NaiveDate, SpecialDate>,
    #[serde(default)]
    pub class_ranges: Vec<ClassRange>,
}

/// Result of classifying a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub label: Option<String>,
}

/// A special date as listed on the key-dates panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDate {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub label: Option<String>,
    pub is_past: bool,
    pub is_next: bool,
}
