/// Types for timetable data and resolved occurrences
use super::error::PlannerError;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, written as `HH:MM`.
///
/// `24:00` is accepted so that a slot may end at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a clock time, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, PlannerError> {
        if hour > 24 || minute > 59 || (hour == 24 && minute != 0) {
            return Err(PlannerError::InvalidTime {
                value: format!("{:02}:{:02}", hour, minute),
            });
        }

        Ok(Self { hour, minute })
    }

    /// Creates a time on the hour (e.g. `from_hour(8)` is `08:00`).
    pub fn from_hour(hour: u8) -> Result<Self, PlannerError> {
        Self::new(hour, 0)
    }

    /// Used for the built-in seed timetable, whose hours are known to be valid.
    pub(crate) const fn on_the_hour(hour: u8) -> Self {
        Self { hour, minute: 0 }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Numeric ordering key, `HH * 100 + MM`.
    pub fn sort_key(&self) -> u16 {
        self.hour as u16 * 100 + self.minute as u16
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Returns the time `hours` later on the same day, or `None` past `24:00`.
    pub fn plus_hours(&self, hours: u32) -> Option<Self> {
        let hour = (self.hour as u32).checked_add(hours)?;
        if hour > 24 {
            return None;
        }
        Self::new(hour as u8, self.minute).ok()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidTime {
            value: s.to_string(),
        };

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !hour.chars().chain(minute.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Checks that `end` is exactly `duration` whole hours after `start`.
pub fn validate_time_range(
    start: ClockTime,
    end: ClockTime,
    duration: u32,
) -> Result<(), PlannerError> {
    if duration == 0 || start.plus_hours(duration) != Some(end) {
        return Err(PlannerError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
            duration,
        });
    }

    Ok(())
}

/// Returns the end time of a block starting at `start` lasting `duration` hours.
pub fn end_time_for(start: ClockTime, duration: u32) -> Result<ClockTime, PlannerError> {
    match start.plus_hours(duration) {
        Some(end) if duration > 0 => Ok(end),
        _ => Err(PlannerError::InvalidTimeRange {
            start: start.to_string(),
            end: format!("{}+{}h", start, duration),
            duration,
        }),
    }
}

/// Full English name of a weekday, as stored in the timetable.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Serializes a `Weekday` as its full English name ("Monday").
pub mod serde_weekday {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::day_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Weekday>()
            .map_err(|_| D::Error::custom(format!("invalid weekday: {}", raw)))
    }
}

/// A course the student is enrolled in (or a placeholder such as lunch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Hex color, e.g. `#10b981`
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
}

impl Subject {
    /// The code as it is displayed (always upper case).
    pub fn display_code(&self) -> String {
        self.code.to_uppercase()
    }
}

/// Kind of block on the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotType {
    Lecture,
    Lab,
    Lunch,
    Empty,
}

impl SlotType {
    /// Returns true for blocks that are actual classes (lectures and labs).
    pub fn is_class(&self) -> bool {
        matches!(self, SlotType::Lecture | SlotType::Lab)
    }
}

/// A weekly recurring block of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSlot {
    pub id: String,
    /// Weak reference to `Subject::id`; may dangle
    pub subject_id: String,
    #[serde(rename = "type")]
    pub kind: SlotType,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Length in whole hours
    pub duration: u32,
    #[serde(with = "serde_weekday")]
    pub day: Weekday,
}

/// Suppresses one date's occurrence of a recurring slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    pub id: String,
    pub date: NaiveDate,
    pub slot_id: String,
}

/// A one-off class on a specific date, independent of the weekly template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraClass {
    pub id: String,
    pub date: NaiveDate,
    pub subject_id: String,
    #[serde(rename = "type")]
    pub kind: SlotType,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub duration: u32,
}

/// Free-text note attached to a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<ClockTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Assignment,
    Event,
}

/// User-entered assignment deadline or event attached to a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<ClockTime>,
}

/// A resolved "this subject meets at this time" entry for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Id of the `CourseSlot` or `ExtraClass` this came from
    pub source_id: String,
    pub subject_id: String,
    #[serde(rename = "type")]
    pub kind: SlotType,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub duration: u32,
    pub is_extra: bool,
    pub is_cancelled: bool,
}

impl Occurrence {
    /// Builds the occurrence of a recurring slot.
    pub fn from_slot(slot: &CourseSlot, is_cancelled: bool) -> Self {
        Self {
            source_id: slot.id.clone(),
            subject_id: slot.subject_id.clone(),
            kind: slot.kind,
            start_time: slot.start_time,
            end_time: slot.end_time,
            duration: slot.duration,
            is_extra: false,
            is_cancelled,
        }
    }

    /// Builds the occurrence of an extra class (never cancelled).
    pub fn from_extra(extra: &ExtraClass) -> Self {
        Self {
            source_id: extra.id.clone(),
            subject_id: extra.subject_id.clone(),
            kind: extra.kind,
            start_time: extra.start_time,
            end_time: extra.end_time,
            duration: extra.duration,
            is_extra: true,
            is_cancelled: false,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_time.hour() as u32
    }

    /// First hour no longer covered by this occurrence.
    pub fn end_hour(&self) -> u32 {
        self.start_hour() + self.duration
    }

    /// Returns true if the hour cell `hour` falls inside this occurrence.
    pub fn covers(&self, hour: u32) -> bool {
        (self.start_hour()..self.end_hour()).contains(&hour)
    }
}

/// An occurrence paired with the date it resolves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedOccurrence {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub occurrence: Occurrence,
}

/// Where an occurrence sits relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OccurrenceStatus {
    Ongoing,
    Upcoming,
    Completed,
}

/// Display information for a subject reference, with a fallback for dangling ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDisplay {
    pub code: String,
    pub name: Option<String>,
    pub color: String,
    pub known: bool,
}

impl SubjectDisplay {
    pub const UNKNOWN_CODE: &'static str = "UNKNOWN";
    pub const UNKNOWN_COLOR: &'static str = "#6b7280";

    pub fn of(subject: &Subject) -> Self {
        Self {
            code: subject.display_code(),
            name: Some(subject.name.clone()),
            color: subject.color.clone(),
            known: true,
        }
    }

    pub fn unknown() -> Self {
        Self {
            code: Self::UNKNOWN_CODE.to_string(),
            name: None,
            color: Self::UNKNOWN_COLOR.to_string(),
            known: false,
        }
    }
}
