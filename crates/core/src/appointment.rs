//! Appointment records and their status vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// Lifecycle status of an appointment.
///
/// `pending` is the only creation status. `cancelled` and `completed` are
/// terminal. The full transition table lives in [`crate::lifecycle`]; this
/// enum only knows adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Statuses reachable from `self` in a single transition, in no
    /// particular order. Empty for terminal states.
    pub fn valid_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(BookingError::validation(format!(
                "unknown appointment status: {other}"
            ))),
        }
    }
}

/// Status constraint for appointment listings: everything, or one status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == AppointmentStatus::Pending,
            StatusFilter::Confirmed => status == AppointmentStatus::Confirmed,
            StatusFilter::Cancelled => status == AppointmentStatus::Cancelled,
            StatusFilter::Completed => status == AppointmentStatus::Completed,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "confirmed" => Ok(StatusFilter::Confirmed),
            "cancelled" => Ok(StatusFilter::Cancelled),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(BookingError::validation(format!(
                "unknown status filter: {other}"
            ))),
        }
    }
}

/// A booked appointment between a patient identity and a doctor profile.
///
/// `appointment_time` is free text from the booking form; it is not
/// validated against the doctor's availability windows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub reason: String,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient-supplied booking request, validated by the lifecycle engine
/// before an [`Appointment`] exists.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewAppointment {
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason: String,
    pub notes: Option<String>,
}
