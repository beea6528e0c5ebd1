/// Error types for catalog loading and the booking workflow.
use thiserror::Error;

/// Errors raised by booking workflow transitions.
///
/// None of these change the workflow state; the caller surfaces the message
/// and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please select a time slot")]
    NoTimeSlotSelected,

    #[error("No booking in progress")]
    NoBookingInProgress,

    #[error("No doctor with id {0}")]
    UnknownDoctor(u32),

    #[error("Time slot '{slot}' is not offered by {doctor}")]
    UnknownTimeSlot { slot: String, doctor: String },
}

/// Errors raised while building a catalog from an external source.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid weekday: '{0}'")]
    InvalidWeekday(String),

    #[error("Duplicate doctor id: {0}")]
    DuplicateId(u32),
}
