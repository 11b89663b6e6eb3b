/// Semester calendar and date classification
mod config;
mod error;
mod types;

pub use error::CalendarError;
pub use types::*;

use chrono::{Datelike, NaiveDate, Weekday};

impl SemesterCalendar {
    /// Classifies a date into exactly one day type.
    ///
    /// First match wins:
    /// 1. an entry in the special-dates map (returned verbatim, with its label)
    /// 2. Sunday
    /// 3. inside any inclusive class range
    /// 4. none of the above
    ///
    /// Dates are compared as calendar dates, so the result does not depend on
    /// the caller's time zone.
    pub fn classify(&self, date: NaiveDate) -> Classification {
        if let Some(special) = self.special_dates.get(&date) {
            return Classification {
                date,
                day_type: special.day_type,
                label: special.label.clone(),
            };
        }

        let day_type = if date.weekday() == Weekday::Sun {
            DayType::Sunday
        } else if self.class_ranges.iter().any(|r| r.contains(date)) {
            DayType::Classes
        } else {
            DayType::None
        };

        Classification {
            date,
            day_type,
            label: None,
        }
    }

    /// Shorthand for `classify(date).day_type`.
    pub fn day_type(&self, date: NaiveDate) -> DayType {
        self.classify(date).day_type
    }

    /// Returns true if `date` lies within the configured semester bounds.
    ///
    /// A missing bound is treated as open.
    pub fn in_semester(&self, date: NaiveDate) -> bool {
        self.semester_start.map_or(true, |start| start <= date)
            && self.semester_end.map_or(true, |end| date <= end)
    }

    /// Lists every special date in ascending order, flagged relative to `today`.
    ///
    /// `is_next` marks the first special date on or after `today`.
    pub fn key_dates(&self, today: NaiveDate) -> Vec<KeyDate> {
        let mut next_marked = false;

        // BTreeMap iteration is already in date order
        self.special_dates
            .iter()
            .map(|(&date, special)| {
                let is_past = date < today;
                let is_next = !is_past && !next_marked;
                if is_next {
                    next_marked = true;
                }

                KeyDate {
                    date,
                    day_type: special.day_type,
                    label: special.label.clone(),
                    is_past,
                    is_next,
                }
            })
            .collect()
    }
}
