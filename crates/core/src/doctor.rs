//! Doctor professional profiles.
//!
//! A profile extends exactly one [`Role::Doctor`](crate::identity::Role)
//! identity with specialty, credentials and fee information, plus the
//! approval gate that controls directory visibility and booking eligibility.
//! Availability windows are display data only; nothing checks bookings
//! against them.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::identity::{Role, UserProfile};

/// The fixed set of medical specialties a profile can be registered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    Cardiology,
    Dermatology,
    Neurology,
    Pediatrics,
    Orthopedics,
    Psychiatry,
    Oncology,
    Surgery,
    GeneralPractice,
    Ophthalmology,
}

impl Specialty {
    pub const ALL: [Specialty; 10] = [
        Specialty::Cardiology,
        Specialty::Dermatology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Orthopedics,
        Specialty::Psychiatry,
        Specialty::Oncology,
        Specialty::Surgery,
        Specialty::GeneralPractice,
        Specialty::Ophthalmology,
    ];

    /// Human-readable label, also used for case-insensitive directory search.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "Cardiology",
            Specialty::Dermatology => "Dermatology",
            Specialty::Neurology => "Neurology",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Psychiatry => "Psychiatry",
            Specialty::Oncology => "Oncology",
            Specialty::Surgery => "Surgery",
            Specialty::GeneralPractice => "General Practice",
            Specialty::Ophthalmology => "Ophthalmology",
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Specialty {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Specialty::ALL
            .iter()
            .find(|specialty| specialty.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| BookingError::validation(format!("unknown specialty: {wanted}")))
    }
}

/// A weekly availability window. Informational display data only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// A doctor's professional profile, joined with its owning identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialty: Specialty,
    pub license_number: String,
    pub years_of_experience: u32,
    pub education: String,
    pub bio: Option<String>,
    /// Consultation fee in minor currency units (cents), never negative.
    pub consultation_fee_cents: u64,
    /// False until an external admin process approves the doctor. Unapproved
    /// profiles never appear in the patient-facing directory and cannot be
    /// booked.
    pub is_approved: bool,
    pub availability: Vec<AvailabilityWindow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The owning identity, joined for display.
    pub user: UserProfile,
}

impl DoctorProfile {
    /// Display name of the owning identity.
    pub fn display_name(&self) -> &str {
        &self.user.full_name
    }

    /// Checks the one-to-one ownership invariant: the referenced identity
    /// must have been registered as a doctor.
    pub fn check_owner(user: &UserProfile) -> BookingResult<()> {
        if user.role != Role::Doctor {
            return Err(BookingError::validation(format!(
                "doctor profile owner must have role doctor, got {}",
                user.role
            )));
        }
        Ok(())
    }
}
