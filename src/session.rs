/// One user's browsing and booking session.
///
/// Holds the catalog, the current filter selection with its memoized
/// result, and the booking workflow. A front end renders from the accessors
/// and feeds user intents in through the mutating methods.

use crate::booking::BookingWorkflow;
use crate::catalog::{results_summary, Catalog, FilterCache};
use crate::error::BookingError;
use crate::models::{Appointment, DayFilter, Doctor, FilterSelection, SpecialtyFilter};
use tracing::debug;

pub struct BookingSession {
    catalog: Catalog,
    selection: FilterSelection,
    cache: FilterCache,
    workflow: BookingWorkflow,
}

impl BookingSession {
    pub fn new(catalog: Catalog) -> Self {
        BookingSession {
            catalog,
            selection: FilterSelection::default(),
            cache: FilterCache::new(),
            workflow: BookingWorkflow::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn workflow(&self) -> &BookingWorkflow {
        &self.workflow
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.workflow.appointments()
    }

    pub fn set_specialty(&mut self, specialty: SpecialtyFilter) {
        debug!(specialty = specialty.name(), "specialty filter changed");
        self.selection.specialty = specialty;
    }

    pub fn set_day(&mut self, day: DayFilter) {
        debug!(day = day.name(), "day filter changed");
        self.selection.day = day;
    }

    pub fn select_today(&mut self) {
        self.selection.select_today();
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    /// Doctors matching the current selection, in catalog order.
    pub fn visible_doctors(&mut self) -> Vec<&Doctor> {
        self.cache.get(&self.catalog, &self.selection)
    }

    pub fn results_summary(&mut self) -> String {
        let count = self.visible_doctors().len();
        results_summary(count, &self.selection)
    }

    pub fn begin_booking(&mut self, doctor_id: u32) -> Result<(), BookingError> {
        let doctor = self
            .catalog
            .get(doctor_id)
            .ok_or(BookingError::UnknownDoctor(doctor_id))?;
        self.workflow.begin_booking(doctor);
        Ok(())
    }

    pub fn select_time_slot(&mut self, slot: &str) -> Result<(), BookingError> {
        self.workflow.select_time_slot(slot)
    }

    pub fn confirm_booking(&mut self) -> Result<&Appointment, BookingError> {
        self.workflow.confirm_booking()
    }

    pub fn cancel_booking(&mut self) -> Result<(), BookingError> {
        self.workflow.cancel_booking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn filter_changes_update_visible_doctors() {
        let mut session = BookingSession::new(Catalog::mock(Weekday::Mon));
        assert_eq!(session.visible_doctors().len(), 4);
        assert_eq!(session.results_summary(), "Found 4 doctors");

        session.set_specialty(SpecialtyFilter::Only("Pediatrician".to_string()));
        session.select_today();
        assert_eq!(session.visible_doctors().len(), 1);
        assert!(session.selection().has_active_filters());

        session.set_day(DayFilter::On(Weekday::Wed));
        assert!(session.visible_doctors().is_empty());
        assert_eq!(session.results_summary(), "No doctors found matching your criteria");

        session.clear_filters();
        assert_eq!(session.visible_doctors().len(), 4);
    }

    #[test]
    fn begin_booking_unknown_doctor() {
        let mut session = BookingSession::new(Catalog::mock(Weekday::Mon));
        assert_eq!(session.begin_booking(42), Err(BookingError::UnknownDoctor(42)));
        assert!(!session.workflow().is_selecting());
    }
}
