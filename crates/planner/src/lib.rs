//! Academic planner engine: semester calendar classification, timetable
//! occurrence resolution, and rescheduling, with an HTTP API on top.

pub mod calendar;
pub mod config;
pub mod db;
pub mod schedule;
pub mod server;
pub mod types;
