//! Error types for semester calendar loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// The calendar file could not be read
    #[error("Failed to read calendar file: {0}")]
    Io(#[from] std::io::Error),

    /// The calendar file is not valid calendar JSON
    #[error("Failed to parse calendar: {0}")]
    Parse(#[from] serde_json::Error),

    /// A class range ends before it starts
    #[error("Class range {start} to {end} is inverted")]
    InvertedRange { start: String, end: String },
}
