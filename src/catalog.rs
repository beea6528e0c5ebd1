/// Doctor catalog and filtering.
///
/// The catalog is fixed for the lifetime of a session. It can be built from
/// the bundled fixture data or loaded from a JSON file of doctor records.

use crate::error::CatalogError;
use crate::models::{
    parse_weekday, DayFilter, Doctor, FilterSelection, SpecialtyFilter, WEEKDAYS,
};
use chrono::Weekday;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

pub const NO_DOCTORS_SUMMARY: &str = "No doctors found matching your criteria";
pub const NO_DOCTORS_MESSAGE: &str =
    "No doctors available with the selected filters. Try adjusting your filters to see more results.";

/// A doctor entry as it appears in a JSON catalog file.
#[derive(Debug, Deserialize)]
struct DoctorRecord {
    id: u32,
    name: String,
    specialty: String,
    location: String,
    rating: f32,
    availability: Vec<String>,
    #[serde(alias = "timeSlots")]
    time_slots: Vec<String>,
}

impl DoctorRecord {
    fn into_doctor(self) -> Result<Doctor, CatalogError> {
        let availability = self
            .availability
            .iter()
            .map(|name| {
                parse_weekday(name).ok_or_else(|| CatalogError::InvalidWeekday(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Doctor {
            id: self.id,
            name: self.name,
            specialty: self.specialty,
            location: self.location,
            rating: self.rating,
            availability,
            available_today: false,
            time_slots: self.time_slots,
        })
    }
}

/// The read-only set of doctors offered for booking.
///
/// Each built catalog gets its own id so memoized filter results are never
/// applied to a different catalog. Clones share the id and the contents.
#[derive(Debug, Clone)]
pub struct Catalog {
    id: Uuid,
    doctors: Vec<Doctor>,
    specialties: Vec<String>,
    available_days: Vec<Weekday>,
    today: Weekday,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate doctor ids.
    ///
    /// `available_today` is computed here against `today` and never again.
    pub fn new(doctors: Vec<Doctor>, today: Weekday) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for doctor in &doctors {
            if !seen.insert(doctor.id) {
                return Err(CatalogError::DuplicateId(doctor.id));
            }
        }
        Ok(Self::build(doctors, today))
    }

    fn build(mut doctors: Vec<Doctor>, today: Weekday) -> Self {
        for doctor in &mut doctors {
            doctor.available_today = doctor.is_available_on(today);
        }

        let mut specialties: Vec<String> = Vec::new();
        for doctor in &doctors {
            if !specialties.contains(&doctor.specialty) {
                specialties.push(doctor.specialty.clone());
            }
        }

        let available_days = WEEKDAYS
            .iter()
            .copied()
            .filter(|day| doctors.iter().any(|d| d.is_available_on(*day)))
            .collect();

        info!(
            doctors = doctors.len(),
            specialties = specialties.len(),
            today = ?today,
            "catalog loaded"
        );

        Catalog {
            id: Uuid::new_v4(),
            doctors,
            specialties,
            available_days,
            today,
        }
    }

    /// The bundled demo catalog.
    pub fn mock(today: Weekday) -> Self {
        fn slots(labels: &[&str]) -> Vec<String> {
            labels.iter().map(|s| s.to_string()).collect()
        }

        let doctors = vec![
            Doctor {
                id: 1,
                name: "Dr. Sarah Wilson".to_string(),
                specialty: "Cardiologist".to_string(),
                location: "New York Medical Center".to_string(),
                rating: 4.8,
                availability: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
                available_today: false,
                time_slots: slots(&[
                    "09:00 AM", "10:00 AM", "11:00 AM", "02:00 PM", "03:00 PM", "04:00 PM",
                ]),
            },
            Doctor {
                id: 2,
                name: "Dr. James Chen".to_string(),
                specialty: "Dermatologist".to_string(),
                location: "Downtown Clinic".to_string(),
                rating: 4.9,
                availability: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat],
                available_today: false,
                time_slots: slots(&[
                    "09:30 AM", "10:30 AM", "11:30 AM", "02:30 PM", "03:30 PM", "04:30 PM",
                ]),
            },
            Doctor {
                id: 3,
                name: "Dr. Emily Rodriguez".to_string(),
                specialty: "Pediatrician".to_string(),
                location: "Children's Medical Center".to_string(),
                rating: 4.7,
                availability: vec![Weekday::Mon, Weekday::Tue, Weekday::Thu],
                available_today: false,
                time_slots: slots(&[
                    "08:00 AM", "09:00 AM", "10:00 AM", "01:00 PM", "02:00 PM", "03:00 PM",
                ]),
            },
            Doctor {
                id: 4,
                name: "Dr. Michael Thompson".to_string(),
                specialty: "Orthopedist".to_string(),
                location: "Sports Medicine Clinic".to_string(),
                rating: 4.6,
                availability: vec![Weekday::Wed, Weekday::Fri, Weekday::Sat],
                available_today: false,
                time_slots: slots(&[
                    "10:00 AM", "11:00 AM", "12:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
                ]),
            },
        ];

        Self::build(doctors, today)
    }

    pub fn from_json_str(json: &str, today: Weekday) -> Result<Self, CatalogError> {
        let records: Vec<DoctorRecord> = serde_json::from_str(json)?;
        let doctors = records
            .into_iter()
            .map(DoctorRecord::into_doctor)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(doctors, today)
    }

    pub fn from_json_file(path: &Path, today: Weekday) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json, today)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Specialties in first-seen order, without the "All" sentinel.
    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Weekdays on which at least one doctor works, Monday first.
    pub fn available_days(&self) -> &[Weekday] {
        &self.available_days
    }

    pub fn today(&self) -> Weekday {
        self.today
    }

    pub fn get(&self, id: u32) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn filter(&self, selection: &FilterSelection) -> Vec<&Doctor> {
        filter_doctors(&self.doctors, selection)
    }
}

/// Doctors matching both halves of `selection`, in input order.
pub fn filter_doctors<'a, I>(doctors: I, selection: &FilterSelection) -> Vec<&'a Doctor>
where
    I: IntoIterator<Item = &'a Doctor>,
{
    doctors
        .into_iter()
        .filter(|doctor| selection.matches(doctor))
        .collect()
}

/// Memoized filter result for one catalog.
///
/// Stores catalog indices for the last catalog and selection seen and only
/// recomputes when either changes.
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(Uuid, FilterSelection)>,
    indices: Vec<usize>,
    recomputations: usize,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<'a>(
        &mut self,
        catalog: &'a Catalog,
        selection: &FilterSelection,
    ) -> Vec<&'a Doctor> {
        let fresh = matches!(
            &self.key,
            Some((id, key)) if *id == catalog.id && key == selection
        );
        if !fresh {
            self.indices = catalog
                .doctors()
                .iter()
                .enumerate()
                .filter(|(_, doctor)| selection.matches(doctor))
                .map(|(i, _)| i)
                .collect();
            self.key = Some((catalog.id, selection.clone()));
            self.recomputations += 1;
            debug!(
                specialty = selection.specialty.name(),
                day = selection.day.name(),
                matches = self.indices.len(),
                "filter recomputed"
            );
        }

        self.indices.iter().map(|&i| &catalog.doctors()[i]).collect()
    }

    /// How many times the filter has actually run.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// One-line description of a filter result, e.g.
/// "Found 1 doctor specializing in Cardiologist available on Monday".
pub fn results_summary(count: usize, selection: &FilterSelection) -> String {
    if count == 0 {
        return NO_DOCTORS_SUMMARY.to_string();
    }

    let plural = if count == 1 { "" } else { "s" };
    let mut summary = format!("Found {} doctor{}", count, plural);
    if let SpecialtyFilter::Only(specialty) = &selection.specialty {
        summary.push_str(&format!(" specializing in {}", specialty));
    }
    if selection.day != DayFilter::All {
        summary.push_str(&format!(" available on {}", selection.day.name()));
    }
    summary
}
