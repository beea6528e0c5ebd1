//! Doctor catalog browsing and session appointment booking.
//!
//! Filter a fixed catalog of doctors by specialty and day, open a booking for
//! one of them, pick a time slot and confirm. Confirmed appointments live in
//! memory for the session only.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use booking::{BookingState, BookingWorkflow};
pub use catalog::{filter_doctors, results_summary, Catalog, FilterCache};
pub use config::AppConfig;
pub use error::{BookingError, CatalogError};
pub use models::{Appointment, DayFilter, Doctor, FilterSelection, SpecialtyFilter};
pub use session::BookingSession;
