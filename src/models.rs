/// Data models for the doctor booking system.
///
/// This module defines the core data structures used throughout the system:
/// - Doctor: A read-only catalog entry
/// - SpecialtyFilter / DayFilter: The two filter selections
/// - FilterSelection: The current pair of selections
/// - Appointment: A confirmed booking snapshot

use chrono::{DateTime, Local, Weekday};
use uuid::Uuid;

/// Every weekday, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, e.g. "Monday".
pub fn weekday_name(day: Weekday) -> &'static str {
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

/// Parse a full weekday name, ignoring case and surrounding whitespace.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    let value = value.trim();
    WEEKDAYS
        .iter()
        .copied()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(value))
}

/// A doctor in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub rating: f32,
    pub availability: Vec<Weekday>,
    /// Whether the catalog's "today" was in `availability` when it was built.
    pub available_today: bool,
    pub time_slots: Vec<String>,
}

impl Doctor {
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }

    pub fn offers_slot(&self, slot: &str) -> bool {
        self.time_slots.iter().any(|s| s == slot)
    }

    /// Availability as display names, in catalog order.
    pub fn availability_names(&self) -> Vec<&'static str> {
        self.availability.iter().map(|d| weekday_name(*d)).collect()
    }
}

/// Specialty half of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SpecialtyFilter {
    #[default]
    All,
    Only(String),
}

impl SpecialtyFilter {
    /// "All" selects every specialty; anything else is matched verbatim.
    pub fn from_string(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            SpecialtyFilter::All
        } else {
            SpecialtyFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            SpecialtyFilter::All => true,
            SpecialtyFilter::Only(specialty) => doctor.specialty == *specialty,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SpecialtyFilter::All => "All",
            SpecialtyFilter::Only(specialty) => specialty,
        }
    }
}

/// Day half of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayFilter {
    #[default]
    All,
    Today,
    On(Weekday),
}

impl DayFilter {
    /// Convert a string to a DayFilter value.
    pub fn from_string(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        if trimmed.eq_ignore_ascii_case("today") {
            return Ok(DayFilter::Today);
        }
        parse_weekday(trimmed).map(DayFilter::On).ok_or_else(|| {
            format!(
                "Invalid day: '{}'. Must be All, Today or a weekday name",
                value
            )
        })
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Today => doctor.available_today,
            DayFilter::On(day) => doctor.is_available_on(*day),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayFilter::All => "All",
            DayFilter::Today => "Today",
            DayFilter::On(day) => weekday_name(*day),
        }
    }
}

/// The user's current filter choices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterSelection {
    pub specialty: SpecialtyFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(specialty: SpecialtyFilter, day: DayFilter) -> Self {
        FilterSelection { specialty, day }
    }

    /// Both predicates must hold.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        self.specialty.matches(doctor) && self.day.matches(doctor)
    }

    pub fn has_active_filters(&self) -> bool {
        self.specialty != SpecialtyFilter::All || self.day != DayFilter::All
    }

    pub fn clear(&mut self) {
        self.specialty = SpecialtyFilter::All;
        self.day = DayFilter::All;
    }

    pub fn select_today(&mut self) {
        self.day = DayFilter::Today;
    }
}

/// A confirmed booking.
///
/// Doctor fields are copied at booking time, so the record never changes
/// after it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub location: String,
    /// Creation date as M/D/YYYY, not a scheduled visit date.
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Local>,
}

impl Appointment {
    pub fn new(doctor: &Doctor, time: String, created_at: DateTime<Local>) -> Self {
        Appointment {
            id: Uuid::new_v4().to_string(),
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            location: doctor.location.clone(),
            date: created_at.format("%-m/%-d/%Y").to_string(),
            time,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doctor() -> Doctor {
        Doctor {
            id: 7,
            name: "Dr. Test".to_string(),
            specialty: "Cardiologist".to_string(),
            location: "Clinic".to_string(),
            rating: 4.5,
            availability: vec![Weekday::Mon, Weekday::Fri],
            available_today: false,
            time_slots: vec!["09:00 AM".to_string()],
        }
    }

    #[test]
    fn weekday_names_parse_back() {
        for day in WEEKDAYS {
            assert_eq!(parse_weekday(weekday_name(day)), Some(day));
        }
        assert_eq!(parse_weekday("  friday "), Some(Weekday::Fri));
        assert_eq!(parse_weekday("Fri"), None);
    }

    #[test]
    fn day_filter_from_string() {
        assert_eq!(DayFilter::from_string("All"), Ok(DayFilter::All));
        assert_eq!(DayFilter::from_string("today"), Ok(DayFilter::Today));
        assert_eq!(
            DayFilter::from_string("Sunday"),
            Ok(DayFilter::On(Weekday::Sun))
        );
        assert!(DayFilter::from_string("Someday").is_err());
    }

    #[test]
    fn specialty_filter_is_exact() {
        let d = doctor();
        assert!(SpecialtyFilter::from_string("All").matches(&d));
        assert!(SpecialtyFilter::from_string("Cardiologist").matches(&d));
        assert!(!SpecialtyFilter::from_string("cardiologist").matches(&d));
    }

    #[test]
    fn today_uses_precomputed_flag() {
        let mut d = doctor();
        assert!(!DayFilter::Today.matches(&d));
        d.available_today = true;
        assert!(DayFilter::Today.matches(&d));
    }

    #[test]
    fn active_filters_and_clear() {
        let mut selection = FilterSelection::default();
        assert!(!selection.has_active_filters());

        selection.select_today();
        assert!(selection.has_active_filters());

        selection.specialty = SpecialtyFilter::Only("Orthopedist".to_string());
        selection.clear();
        assert_eq!(selection, FilterSelection::default());
    }

    #[test]
    fn appointment_snapshots_doctor() {
        let created = Local.with_ymd_and_hms(2026, 3, 4, 10, 30, 0).unwrap();
        let apt = Appointment::new(&doctor(), "09:00 AM".to_string(), created);

        assert_eq!(apt.doctor_name, "Dr. Test");
        assert_eq!(apt.specialty, "Cardiologist");
        assert_eq!(apt.location, "Clinic");
        assert_eq!(apt.date, "3/4/2026");
        assert_eq!(apt.time, "09:00 AM");
        assert_eq!(apt.id.len(), 36);
    }
}
