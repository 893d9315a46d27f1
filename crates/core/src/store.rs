//! Persistence boundary.
//!
//! [`ClinicStore`] is the seam between the booking domain and whatever holds
//! the records. The trait mirrors the hosted-backend query helpers the
//! system is designed against: filtered doctor and appointment fetches,
//! single-record lookups, inserts, whole-record updates and deletes. Every
//! method can fail; a failure means the collaborator is unavailable and the
//! caller must not apply any optimistic local change.
//!
//! [`MemoryStore`] is the in-process implementation: plain maps keyed by id
//! behind `RwLock`s. It doubles as the explicit local cache the UI-facing
//! service works from and as the test substrate.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::doctor::{DoctorProfile, Specialty};
use crate::error::{BookingError, BookingResult};
use crate::identity::UserProfile;

/// Filter for doctor fetches.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoctorQuery {
    pub specialty: Option<Specialty>,
    pub approved_only: bool,
}

/// Filter for appointment fetches.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppointmentQuery {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

/// Storage operations the booking domain depends on.
pub trait ClinicStore: Send + Sync {
    fn insert_user(&self, user: UserProfile) -> BookingResult<()>;
    fn get_user(&self, id: Uuid) -> BookingResult<Option<UserProfile>>;
    fn find_user_by_email(&self, email: &str) -> BookingResult<Option<UserProfile>>;

    fn insert_doctor(&self, doctor: DoctorProfile) -> BookingResult<()>;
    fn get_doctor(&self, id: Uuid) -> BookingResult<Option<DoctorProfile>>;
    fn get_doctor_by_user(&self, user_id: Uuid) -> BookingResult<Option<DoctorProfile>>;
    /// Ordered by display name for stable paging; directory sorting happens
    /// in [`crate::directory`].
    fn list_doctors(&self, query: DoctorQuery) -> BookingResult<Vec<DoctorProfile>>;
    /// External-admin hook flipping the approval gate. Nothing in the
    /// patient or doctor flows calls this.
    fn set_doctor_approval(&self, id: Uuid, approved: bool) -> BookingResult<()>;

    fn insert_appointment(&self, appointment: Appointment) -> BookingResult<()>;
    fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;
    /// Ordered ascending by appointment date (ties by id).
    fn list_appointments(&self, query: AppointmentQuery) -> BookingResult<Vec<Appointment>>;
    /// Replaces the stored record wholesale. The record must exist.
    fn update_appointment(&self, appointment: Appointment) -> BookingResult<()>;
    fn delete_appointment(&self, id: Uuid) -> BookingResult<()>;
}

/// In-memory [`ClinicStore`] keyed by record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserProfile>>,
    doctors: RwLock<HashMap<Uuid, DoctorProfile>>,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// A poisoned lock means a writer panicked mid-update; the maps can no longer
// be trusted, so surface it as the collaborator being unavailable.
fn poisoned<T>(_: std::sync::PoisonError<T>) -> BookingError {
    BookingError::StoreUnavailable("store lock poisoned".into())
}

impl ClinicStore for MemoryStore {
    fn insert_user(&self, user: UserProfile) -> BookingResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        users.insert(user.id, user);
        Ok(())
    }

    fn get_user(&self, id: Uuid) -> BookingResult<Option<UserProfile>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> BookingResult<Option<UserProfile>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users
            .values()
            .find(|user| user.email.as_str() == email.to_lowercase())
            .cloned())
    }

    fn insert_doctor(&self, doctor: DoctorProfile) -> BookingResult<()> {
        let mut doctors = self.doctors.write().map_err(poisoned)?;
        doctors.insert(doctor.id, doctor);
        Ok(())
    }

    fn get_doctor(&self, id: Uuid) -> BookingResult<Option<DoctorProfile>> {
        let doctors = self.doctors.read().map_err(poisoned)?;
        Ok(doctors.get(&id).cloned())
    }

    fn get_doctor_by_user(&self, user_id: Uuid) -> BookingResult<Option<DoctorProfile>> {
        let doctors = self.doctors.read().map_err(poisoned)?;
        Ok(doctors
            .values()
            .find(|doctor| doctor.user_id == user_id)
            .cloned())
    }

    fn list_doctors(&self, query: DoctorQuery) -> BookingResult<Vec<DoctorProfile>> {
        let doctors = self.doctors.read().map_err(poisoned)?;
        let mut result: Vec<DoctorProfile> = doctors
            .values()
            .filter(|doctor| !query.approved_only || doctor.is_approved)
            .filter(|doctor| {
                query
                    .specialty
                    .map_or(true, |wanted| doctor.specialty == wanted)
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    fn set_doctor_approval(&self, id: Uuid, approved: bool) -> BookingResult<()> {
        let mut doctors = self.doctors.write().map_err(poisoned)?;
        let doctor = doctors
            .get_mut(&id)
            .ok_or_else(|| BookingError::not_found("doctor", id))?;
        doctor.is_approved = approved;
        Ok(())
    }

    fn insert_appointment(&self, appointment: Appointment) -> BookingResult<()> {
        let mut appointments = self.appointments.write().map_err(poisoned)?;
        appointments.insert(appointment.id, appointment);
        Ok(())
    }

    fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        let appointments = self.appointments.read().map_err(poisoned)?;
        Ok(appointments.get(&id).cloned())
    }

    fn list_appointments(&self, query: AppointmentQuery) -> BookingResult<Vec<Appointment>> {
        let appointments = self.appointments.read().map_err(poisoned)?;
        let mut result: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| {
                query
                    .patient_id
                    .map_or(true, |id| appointment.patient_id == id)
            })
            .filter(|appointment| {
                query
                    .doctor_id
                    .map_or(true, |id| appointment.doctor_id == id)
            })
            .filter(|appointment| {
                query
                    .status
                    .map_or(true, |status| appointment.status == status)
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.appointment_date
                .cmp(&b.appointment_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    fn update_appointment(&self, appointment: Appointment) -> BookingResult<()> {
        let mut appointments = self.appointments.write().map_err(poisoned)?;
        if !appointments.contains_key(&appointment.id) {
            return Err(BookingError::not_found("appointment", appointment.id));
        }
        appointments.insert(appointment.id, appointment);
        Ok(())
    }

    fn delete_appointment(&self, id: Uuid) -> BookingResult<()> {
        let mut appointments = self.appointments.write().map_err(poisoned)?;
        appointments
            .remove(&id)
            .ok_or_else(|| BookingError::not_found("appointment", id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use crate::testutil::{appointment_on, approved_doctor, sample_day};
    use chrono::Duration;

    #[test]
    fn doctor_query_filters_approval_and_specialty() {
        let store = MemoryStore::new();
        let approved = approved_doctor("Dr. Jane Lee", Specialty::Cardiology);
        let mut unapproved = approved_doctor("Dr. Omar Haddad", Specialty::Cardiology);
        unapproved.is_approved = false;
        let other = approved_doctor("Dr. Ana Costa", Specialty::Neurology);

        store.insert_doctor(approved.clone()).expect("insert");
        store.insert_doctor(unapproved).expect("insert");
        store.insert_doctor(other).expect("insert");

        let all = store.list_doctors(DoctorQuery::default()).expect("list");
        assert_eq!(all.len(), 3);

        let approved_cardio = store
            .list_doctors(DoctorQuery {
                specialty: Some(Specialty::Cardiology),
                approved_only: true,
            })
            .expect("list");
        assert_eq!(approved_cardio.len(), 1);
        assert_eq!(approved_cardio[0].id, approved.id);
    }

    #[test]
    fn appointment_listing_is_date_ordered() {
        let store = MemoryStore::new();
        let patient = Uuid::new_v4();
        let doctor = Uuid::new_v4();
        let day = sample_day();

        for offset in [7, 2, 5] {
            store
                .insert_appointment(appointment_on(
                    patient,
                    doctor,
                    day + Duration::days(offset),
                    AppointmentStatus::Pending,
                ))
                .expect("insert");
        }

        let listed = store
            .list_appointments(AppointmentQuery {
                patient_id: Some(patient),
                ..Default::default()
            })
            .expect("list");
        let offsets: Vec<i64> = listed
            .iter()
            .map(|a| (a.appointment_date - day).num_days())
            .collect();
        assert_eq!(offsets, vec![2, 5, 7]);
    }

    #[test]
    fn update_requires_existing_record() {
        let store = MemoryStore::new();
        let appointment = appointment_on(
            Uuid::new_v4(),
            Uuid::new_v4(),
            sample_day(),
            AppointmentStatus::Pending,
        );
        let err = store
            .update_appointment(appointment.clone())
            .expect_err("nothing stored yet");
        assert!(matches!(err, BookingError::NotFound { .. }));

        store.insert_appointment(appointment.clone()).expect("insert");
        let mut updated = appointment;
        updated.status = AppointmentStatus::Confirmed;
        store.update_appointment(updated.clone()).expect("update");
        let stored = store
            .get_appointment(updated.id)
            .expect("get")
            .expect("present");
        assert_eq!(stored.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn delete_removes_the_record() {
        let store = MemoryStore::new();
        let appointment = appointment_on(
            Uuid::new_v4(),
            Uuid::new_v4(),
            sample_day(),
            AppointmentStatus::Pending,
        );
        store.insert_appointment(appointment.clone()).expect("insert");
        store.delete_appointment(appointment.id).expect("delete");
        assert!(store
            .get_appointment(appointment.id)
            .expect("get")
            .is_none());
        assert!(matches!(
            store.delete_appointment(appointment.id),
            Err(BookingError::NotFound { .. })
        ));
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        let doctor = approved_doctor("Dr. Jane Lee", Specialty::Cardiology);
        store.insert_user(doctor.user.clone()).expect("insert");
        let found = store
            .find_user_by_email(&doctor.user.email.as_str().to_uppercase())
            .expect("lookup");
        assert_eq!(found.map(|u| u.id), Some(doctor.user_id));
    }
}
