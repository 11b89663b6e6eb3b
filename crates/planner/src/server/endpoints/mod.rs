pub mod annotations;
pub mod calendar;
pub mod schedule;
pub mod status;
pub mod subjects;
pub mod timetable;
