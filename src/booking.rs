/// Booking workflow for the session.
///
/// This module provides the BookingWorkflow struct, a small state machine
/// that opens a slot selection for one doctor, validates the choice and
/// appends confirmed appointments to the session's list.

use crate::error::BookingError;
use crate::models::{Appointment, Doctor};
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

pub const NO_APPOINTMENTS_TITLE: &str = "No appointments scheduled";
pub const NO_APPOINTMENTS_HINT: &str = "Your booked appointments will appear here";

/// Where the workflow currently is.
///
/// A confirmed booking passes straight back to `Idle`, so there is no
/// separate confirmed state to observe.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookingState {
    #[default]
    Idle,
    Selecting {
        doctor: Doctor,
        slot: Option<String>,
        error: Option<BookingError>,
    },
}

/// Drives booking from doctor choice to confirmed appointment.
///
/// Appointments are only ever appended. Nothing checks one booking against
/// another, so the same doctor and slot may be booked any number of times.
#[derive(Debug, Default)]
pub struct BookingWorkflow {
    state: BookingState,
    appointments: Vec<Appointment>,
}

impl BookingWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, BookingState::Selecting { .. })
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        match &self.state {
            BookingState::Selecting { doctor, .. } => Some(doctor),
            BookingState::Idle => None,
        }
    }

    pub fn selected_slot(&self) -> Option<&str> {
        match &self.state {
            BookingState::Selecting { slot, .. } => slot.as_deref(),
            BookingState::Idle => None,
        }
    }

    /// The validation error to show next to the slot selector, if any.
    pub fn error(&self) -> Option<&BookingError> {
        match &self.state {
            BookingState::Selecting { error, .. } => error.as_ref(),
            BookingState::Idle => None,
        }
    }

    /// All confirmed appointments, in booking order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Open the slot selection for `doctor`.
    ///
    /// If a selection is already open it is retargeted and its tentative
    /// slot is dropped.
    pub fn begin_booking(&mut self, doctor: &Doctor) {
        if let Some(previous) = self.selected_doctor() {
            debug!(from = %previous.name, to = %doctor.name, "booking retargeted");
        }
        debug!(doctor = %doctor.name, "booking started");

        self.state = BookingState::Selecting {
            doctor: doctor.clone(),
            slot: None,
            error: None,
        };
    }

    /// Record the tentative slot and clear any validation error.
    pub fn select_time_slot(&mut self, choice: &str) -> Result<(), BookingError> {
        match &mut self.state {
            BookingState::Idle => {
                warn!(slot = choice, "slot selected with no booking open");
                Err(BookingError::NoBookingInProgress)
            }
            BookingState::Selecting { doctor, slot, error } => {
                if !doctor.offers_slot(choice) {
                    warn!(slot = choice, doctor = %doctor.name, "unknown slot rejected");
                    return Err(BookingError::UnknownTimeSlot {
                        slot: choice.to_string(),
                        doctor: doctor.name.clone(),
                    });
                }
                *slot = Some(choice.to_string());
                *error = None;
                Ok(())
            }
        }
    }

    /// Confirm the open selection, stamping the appointment with the current time.
    pub fn confirm_booking(&mut self) -> Result<&Appointment, BookingError> {
        self.confirm_booking_at(Local::now())
    }

    /// Confirm the open selection as of `now`.
    ///
    /// Without a chosen slot the selection stays open with the validation
    /// error recorded. On success the appointment is appended and the
    /// workflow returns to `Idle`.
    pub fn confirm_booking_at(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<&Appointment, BookingError> {
        let appointment = match &mut self.state {
            BookingState::Idle => {
                warn!("confirm with no booking open");
                return Err(BookingError::NoBookingInProgress);
            }
            BookingState::Selecting { doctor, slot, error } => match slot {
                None => {
                    debug!(doctor = %doctor.name, "confirm without a time slot");
                    *error = Some(BookingError::NoTimeSlotSelected);
                    return Err(BookingError::NoTimeSlotSelected);
                }
                Some(slot) => Appointment::new(doctor, slot.clone(), now),
            },
        };

        info!(
            appointment_id = %appointment.id,
            doctor = %appointment.doctor_name,
            time = %appointment.time,
            "appointment booked"
        );

        self.state = BookingState::Idle;
        let index = self.appointments.len();
        self.appointments.push(appointment);
        Ok(&self.appointments[index])
    }

    /// Close the selection without booking.
    pub fn cancel_booking(&mut self) -> Result<(), BookingError> {
        match std::mem::take(&mut self.state) {
            BookingState::Idle => Err(BookingError::NoBookingInProgress),
            BookingState::Selecting { doctor, .. } => {
                debug!(doctor = %doctor.name, "booking cancelled");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::{TimeZone, Weekday};

    fn wilson() -> Doctor {
        Catalog::mock(Weekday::Mon).doctors()[0].clone()
    }

    #[test]
    fn starts_idle_and_empty() {
        let workflow = BookingWorkflow::new();
        assert_eq!(workflow.state(), &BookingState::Idle);
        assert!(workflow.appointments().is_empty());
        assert!(workflow.error().is_none());
    }

    #[test]
    fn begin_opens_selection_without_slot() {
        let mut workflow = BookingWorkflow::new();
        workflow.begin_booking(&wilson());

        assert!(workflow.is_selecting());
        assert_eq!(workflow.selected_doctor().map(|d| d.id), Some(1));
        assert_eq!(workflow.selected_slot(), None);
        assert!(workflow.appointments().is_empty());
    }

    #[test]
    fn confirm_without_slot_keeps_selection_open() {
        let mut workflow = BookingWorkflow::new();
        workflow.begin_booking(&wilson());

        let err = workflow.confirm_booking().unwrap_err();
        assert_eq!(err, BookingError::NoTimeSlotSelected);
        assert_eq!(err.to_string(), "Please select a time slot");
        assert!(workflow.is_selecting());
        assert_eq!(workflow.error(), Some(&BookingError::NoTimeSlotSelected));
        assert!(workflow.appointments().is_empty());
    }

    #[test]
    fn selecting_a_slot_clears_error() {
        let mut workflow = BookingWorkflow::new();
        workflow.begin_booking(&wilson());
        let _ = workflow.confirm_booking();

        workflow.select_time_slot("10:00 AM").unwrap();
        assert!(workflow.error().is_none());
        assert_eq!(workflow.selected_slot(), Some("10:00 AM"));
    }

    #[test]
    fn confirm_appends_snapshot_and_returns_idle() {
        let mut workflow = BookingWorkflow::new();
        let doctor = wilson();
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 15, 0).unwrap();

        workflow.begin_booking(&doctor);
        workflow.select_time_slot("09:00 AM").unwrap();
        let appointment = workflow.confirm_booking_at(now).unwrap().clone();

        assert_eq!(appointment.doctor_name, "Dr. Sarah Wilson");
        assert_eq!(appointment.specialty, doctor.specialty);
        assert_eq!(appointment.location, doctor.location);
        assert_eq!(appointment.time, "09:00 AM");
        assert_eq!(appointment.date, "10/19/2026");
        assert_eq!(workflow.state(), &BookingState::Idle);
        assert_eq!(workflow.appointments(), [appointment]);
    }

    #[test]
    fn duplicate_bookings_are_allowed() {
        let mut workflow = BookingWorkflow::new();
        for _ in 0..2 {
            workflow.begin_booking(&wilson());
            workflow.select_time_slot("09:00 AM").unwrap();
            workflow.confirm_booking().unwrap();
        }

        let appointments = workflow.appointments();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[0].time, appointments[1].time);
        assert_ne!(appointments[0].id, appointments[1].id);
    }

    #[test]
    fn cancel_never_books() {
        let mut workflow = BookingWorkflow::new();
        workflow.begin_booking(&wilson());
        workflow.select_time_slot("11:00 AM").unwrap();

        assert_eq!(workflow.cancel_booking(), Ok(()));
        assert_eq!(workflow.state(), &BookingState::Idle);
        assert!(workflow.appointments().is_empty());
        assert_eq!(workflow.cancel_booking(), Err(BookingError::NoBookingInProgress));
    }

    #[test]
    fn begin_retargets_open_selection() {
        let catalog = Catalog::mock(Weekday::Mon);
        let mut workflow = BookingWorkflow::new();
        workflow.begin_booking(&catalog.doctors()[0]);
        workflow.select_time_slot("09:00 AM").unwrap();

        workflow.begin_booking(&catalog.doctors()[1]);
        assert_eq!(workflow.selected_doctor().map(|d| d.id), Some(2));
        assert_eq!(workflow.selected_slot(), None);
    }

    #[test]
    fn misuse_is_rejected_without_state_change() {
        let mut workflow = BookingWorkflow::new();
        assert_eq!(
            workflow.select_time_slot("09:00 AM"),
            Err(BookingError::NoBookingInProgress)
        );
        assert_eq!(
            workflow.confirm_booking().map(|a| a.id.clone()),
            Err(BookingError::NoBookingInProgress)
        );

        workflow.begin_booking(&wilson());
        workflow.select_time_slot("09:00 AM").unwrap();
        let err = workflow.select_time_slot("07:00 PM").unwrap_err();
        assert_eq!(
            err,
            BookingError::UnknownTimeSlot {
                slot: "07:00 PM".to_string(),
                doctor: "Dr. Sarah Wilson".to_string(),
            }
        );
        assert_eq!(workflow.selected_slot(), Some("09:00 AM"));
    }
}
