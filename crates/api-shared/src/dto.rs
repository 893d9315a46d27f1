//! Request/response DTOs for the REST surface.
//!
//! These are the serde/OpenAPI shapes of the domain types. Enumerations
//! cross the wire as their lowercase labels; translation back into domain
//! enums happens in the handlers via `FromStr`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use medibook_core::{
    Appointment, AppointmentView, AvailabilityWindow, DoctorProfile, UserProfile,
};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterPatientReq {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityWindowDto {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<AvailabilityWindowDto> for AvailabilityWindow {
    fn from(dto: AvailabilityWindowDto) -> Self {
        AvailabilityWindow {
            day_of_week: dto.day_of_week,
            start_time: dto.start_time,
            end_time: dto.end_time,
            is_available: dto.is_available,
        }
    }
}

impl From<AvailabilityWindow> for AvailabilityWindowDto {
    fn from(window: AvailabilityWindow) -> Self {
        AvailabilityWindowDto {
            day_of_week: window.day_of_week,
            start_time: window.start_time,
            end_time: window.end_time,
            is_available: window.is_available,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterDoctorReq {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Specialty label, e.g. "Cardiology".
    pub specialty: String,
    pub license_number: String,
    pub years_of_experience: u32,
    pub education: String,
    pub bio: Option<String>,
    pub consultation_fee_cents: u64,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindowDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRes {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserRes {
    fn from(user: UserProfile) -> Self {
        UserRes {
            id: user.id,
            email: user.email.to_string(),
            full_name: user.full_name,
            role: user.role.to_string(),
            phone: user.phone,
            date_of_birth: user.date_of_birth,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorRes {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialty: String,
    pub license_number: String,
    pub years_of_experience: u32,
    pub education: String,
    pub bio: Option<String>,
    pub consultation_fee_cents: u64,
    pub is_approved: bool,
    pub availability: Vec<AvailabilityWindowDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserRes,
}

impl From<DoctorProfile> for DoctorRes {
    fn from(doctor: DoctorProfile) -> Self {
        DoctorRes {
            id: doctor.id,
            user_id: doctor.user_id,
            specialty: doctor.specialty.to_string(),
            license_number: doctor.license_number,
            years_of_experience: doctor.years_of_experience,
            education: doctor.education,
            bio: doctor.bio,
            consultation_fee_cents: doctor.consultation_fee_cents,
            is_approved: doctor.is_approved,
            availability: doctor.availability.into_iter().map(Into::into).collect(),
            created_at: doctor.created_at,
            updated_at: doctor.updated_at,
            user: doctor.user.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorListRes {
    pub doctors: Vec<DoctorRes>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BookAppointmentReq {
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusReq {
    /// Target status: "confirmed", "cancelled" or "completed".
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRes {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: String,
    pub reason: String,
    pub notes: Option<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentRes {
    fn from(appointment: Appointment) -> Self {
        AppointmentRes {
            id: appointment.id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            status: appointment.status.to_string(),
            reason: appointment.reason,
            notes: appointment.notes,
            documents: appointment.documents,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentViewRes {
    pub appointment: AppointmentRes,
    /// The other party's display name: the doctor for a patient viewer, the
    /// patient for a doctor viewer.
    pub counterpart_name: String,
    pub counterpart_specialty: Option<String>,
}

impl From<AppointmentView> for AppointmentViewRes {
    fn from(view: AppointmentView) -> Self {
        AppointmentViewRes {
            appointment: view.appointment.into(),
            counterpart_name: view.counterpart_name,
            counterpart_specialty: view.counterpart_specialty.map(|s| s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentListRes {
    pub appointments: Vec<AppointmentViewRes>,
}
