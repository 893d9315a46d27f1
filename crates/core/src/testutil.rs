//! Shared builders for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use medibook_types::EmailAddress;
use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::doctor::{DoctorProfile, Specialty};
use crate::identity::{Role, UserProfile};

/// Fixed reference day so date arithmetic in tests is reproducible.
pub fn sample_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

pub fn sample_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).single().expect("valid timestamp")
}

#[derive(Clone, Debug)]
pub struct UserSpec {
    pub full_name: String,
    pub email: String,
}

impl Default for UserSpec {
    fn default() -> Self {
        Self {
            full_name: "Sam Park".into(),
            email: format!("user-{}@clinic.example", Uuid::new_v4().simple()),
        }
    }
}

pub fn user_with_role(spec: UserSpec, role: Role) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        email: EmailAddress::parse(&spec.email).expect("valid test email"),
        full_name: spec.full_name,
        role,
        phone: None,
        date_of_birth: None,
        address: None,
        created_at: sample_now(),
        updated_at: sample_now(),
    }
}

/// An approved doctor profile with a freshly generated owning identity.
pub fn approved_doctor(name: &str, specialty: Specialty) -> DoctorProfile {
    let user = user_with_role(
        UserSpec {
            full_name: name.into(),
            ..UserSpec::default()
        },
        Role::Doctor,
    );
    DoctorProfile {
        id: Uuid::new_v4(),
        user_id: user.id,
        specialty,
        license_number: "LIC-12345".into(),
        years_of_experience: 10,
        education: "University Medical School".into(),
        bio: None,
        consultation_fee_cents: 10_000,
        is_approved: true,
        availability: Vec::new(),
        created_at: sample_now(),
        updated_at: sample_now(),
        user,
    }
}

pub fn appointment_on(
    patient_id: Uuid,
    doctor_id: Uuid,
    date: NaiveDate,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        appointment_date: date,
        appointment_time: "10:30".into(),
        status,
        reason: "follow-up".into(),
        notes: None,
        documents: Vec::new(),
        created_at: sample_now(),
        updated_at: sample_now(),
    }
}

pub fn pending_appointment() -> Appointment {
    appointment_on(
        Uuid::new_v4(),
        Uuid::new_v4(),
        sample_day(),
        AppointmentStatus::Pending,
    )
}
