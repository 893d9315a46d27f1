//! # MediBook Core
//!
//! Core business logic for the MediBook appointment-booking system:
//! - identities with patient/doctor/admin roles
//! - doctor professional profiles behind an approval gate
//! - the appointment lifecycle engine (pending → confirmed → completed,
//!   with cancellation from the two non-terminal states)
//! - pure directory and schedule filters
//! - the [`store::ClinicStore`] persistence boundary and its in-memory
//!   implementation
//!
//! **No API concerns**: HTTP servers, sessions, and wire DTOs belong in
//! `api-rest` and `api-shared`.

pub mod appointment;
pub mod config;
pub mod directory;
pub mod doctor;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod schedule;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment, StatusFilter};
pub use config::CoreConfig;
pub use directory::SortKey;
pub use doctor::{AvailabilityWindow, DoctorProfile, Specialty};
pub use error::{BookingError, BookingResult};
pub use identity::{Actor, Role, UserProfile};
pub use schedule::AppointmentView;
pub use service::{BookingService, DoctorRegistration, PatientRegistration};
pub use store::{ClinicStore, MemoryStore};
