/// Command-line interface for the doctor booking system.
///
/// This module provides an interactive CLI for filtering the doctor catalog,
/// booking appointments and viewing the appointments made this session.

use chrono::{Datelike, Local};
use easybook::booking::{NO_APPOINTMENTS_HINT, NO_APPOINTMENTS_TITLE};
use easybook::catalog::NO_DOCTORS_MESSAGE;
use easybook::config::{self, AppConfig};
use easybook::models::weekday_name;
use easybook::{BookingError, BookingSession, Catalog, DayFilter, SpecialtyFilter};
use std::io::{self, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

struct BookingCLI {
    session: BookingSession,
    running: bool,
}

impl BookingCLI {
    fn new(session: BookingSession) -> Self {
        BookingCLI {
            session,
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       BOOK YOUR DOCTOR APPOINTMENT");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        let selection = self.session.selection();
        println!("\n--- Main Menu ---");
        println!(
            "Filters: specialty = {}, day = {}",
            selection.specialty.name(),
            selection.day.name()
        );
        println!("1. Filter by specialty");
        println!("2. Filter by day");
        println!("3. Available today");
        if selection.has_active_filters() {
            println!("4. Clear all filters");
        }
        println!("5. View doctors");
        println!("6. Book appointment");
        println!("7. My appointments");
        println!("8. Exit");
        println!("{}", "-".repeat(20));
    }

    /// Read one trimmed line; end of input is reported as `UnexpectedEof`.
    fn get_input(&self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let input = input.trim();

        if input.is_empty() {
            Ok(default.unwrap_or("").to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i32>) -> io::Result<i32> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<i32>() {
                return Ok(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn filter_specialty(&mut self) -> io::Result<()> {
        println!("\n--- Specialty ---");
        let specialties = self.session.catalog().specialties().to_vec();
        println!("  0. All");
        for (i, specialty) in specialties.iter().enumerate() {
            println!("  {}. {}", i + 1, specialty);
        }

        let choice = self.get_int_input("Select specialty", Some(0))?;
        match choice {
            0 => self.session.set_specialty(SpecialtyFilter::All),
            n if n > 0 && (n as usize) <= specialties.len() => {
                let specialty = specialties[n as usize - 1].clone();
                self.session.set_specialty(SpecialtyFilter::Only(specialty))
            }
            _ => println!("Invalid choice"),
        }
        Ok(())
    }

    fn filter_day(&mut self) -> io::Result<()> {
        println!("\n--- Availability ---");
        let days = self.session.catalog().available_days().to_vec();
        println!("  0. Any Day");
        println!("  1. Today");
        for (i, day) in days.iter().enumerate() {
            println!("  {}. {}", i + 2, weekday_name(*day));
        }

        let choice = self.get_int_input("Select day", Some(0))?;
        match choice {
            0 => self.session.set_day(DayFilter::All),
            1 => self.session.set_day(DayFilter::Today),
            n if n > 1 && (n as usize) < days.len() + 2 => {
                self.session.set_day(DayFilter::On(days[n as usize - 2]))
            }
            _ => println!("Invalid choice"),
        }
        Ok(())
    }

    fn view_doctors(&mut self) {
        println!("\n{}", self.session.results_summary());

        let doctors = self.session.visible_doctors();
        if doctors.is_empty() {
            println!("{}", NO_DOCTORS_MESSAGE);
            return;
        }

        for doctor in doctors {
            println!("\n{} ({})", doctor.name, doctor.specialty);
            println!("  Rating: {:.1}", doctor.rating);
            println!("  Location: {}", doctor.location);
            println!("  Available on: {}", doctor.availability_names().join(", "));
            if doctor.available_today {
                println!("  Available today");
            }
        }
    }

    fn book_appointment(&mut self) -> io::Result<()> {
        let doctors: Vec<(u32, String)> = self
            .session
            .visible_doctors()
            .iter()
            .map(|d| (d.id, d.name.clone()))
            .collect();

        if doctors.is_empty() {
            println!("\n{}", NO_DOCTORS_MESSAGE);
            return Ok(());
        }

        println!("\n--- Book Appointment ---");
        for (i, (_, name)) in doctors.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }

        let choice = self.get_int_input("Select doctor (0 to go back)", Some(0))?;
        if choice <= 0 || (choice as usize) > doctors.len() {
            return Ok(());
        }

        let (doctor_id, _) = doctors[choice as usize - 1];
        if let Err(e) = self.session.begin_booking(doctor_id) {
            println!("\n{}", e);
            return Ok(());
        }

        self.booking_dialog()
    }

    fn booking_dialog(&mut self) -> io::Result<()> {
        let (name, slots) = match self.session.workflow().selected_doctor() {
            Some(doctor) => (doctor.name.clone(), doctor.time_slots.clone()),
            None => return Ok(()),
        };

        while self.session.workflow().is_selecting() {
            println!("\nBook Appointment with {}", name);
            let selected = self.session.workflow().selected_slot().map(str::to_string);
            for (i, slot) in slots.iter().enumerate() {
                let marker = if selected.as_deref() == Some(slot.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(" {}{}. {}", marker, i + 1, slot);
            }
            if let Some(e) = self.session.workflow().error() {
                println!("  ! {}", e);
            }

            let input =
                self.get_input("Time slot number, 'c' to confirm, 'x' to cancel", None)?;
            match input.to_lowercase().as_str() {
                "c" => match self.session.confirm_booking() {
                    Ok(apt) => println!(
                        "\nBooked {} with {} on {}",
                        apt.time, apt.doctor_name, apt.date
                    ),
                    Err(BookingError::NoTimeSlotSelected) => {}
                    Err(e) => println!("\n{}", e),
                },
                "x" => {
                    if self.session.cancel_booking().is_ok() {
                        println!("\nBooking cancelled");
                    }
                }
                other => match other.parse::<usize>() {
                    Ok(n) if n > 0 && n <= slots.len() => {
                        if let Err(e) = self.session.select_time_slot(&slots[n - 1]) {
                            println!("  ! {}", e);
                        }
                    }
                    _ => println!("Invalid choice"),
                },
            }
        }
        Ok(())
    }

    fn view_appointments(&self) {
        let appointments = self.session.appointments();

        if appointments.is_empty() {
            println!("\n{}", NO_APPOINTMENTS_TITLE);
            println!("{}", NO_APPOINTMENTS_HINT);
            return;
        }

        println!("\n--- My Appointments ({}) ---", appointments.len());
        for apt in appointments {
            println!("\n{} ({})", apt.doctor_name, apt.specialty);
            println!("  {}", apt.location);
            println!("  {}  {}", apt.date, apt.time);
            println!("  ID: {}...", &apt.id[..8]);
        }
    }

    fn run(&mut self) -> io::Result<()> {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(5))?;

            match choice {
                1 => self.filter_specialty()?,
                2 => self.filter_day()?,
                3 => self.session.select_today(),
                4 => self.session.clear_filters(),
                5 => self.view_doctors(),
                6 => self.book_appointment()?,
                7 => self.view_appointments(),
                8 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    for var in &config.fallbacks {
        warn!("{} not set, using default", var);
    }

    let today = Local::now().weekday();
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path, today).map_err(|e| {
            error!(path = %path.display(), "failed to load catalog: {}", e);
            e
        })?,
        None => Catalog::mock(today),
    };

    let mut cli = BookingCLI::new(BookingSession::new(catalog));
    match cli.run() {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            info!("input closed, exiting");
            Ok(())
        }
        other => Ok(other?),
    }
}
