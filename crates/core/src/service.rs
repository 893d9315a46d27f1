//! Booking service.
//!
//! Composes the store boundary with the lifecycle engine and the two filter
//! functions into the operations the API layer exposes. Every operation takes
//! the acting [`Actor`] explicitly; the service never consults an ambient
//! session. Mutations are confirmed against the store before anything is
//! returned, so a failed store call is a no-op from the caller's view.

use chrono::{NaiveDate, Utc};
use medibook_types::EmailAddress;
use tracing::info;
use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentStatus, NewAppointment, StatusFilter};
use crate::directory::{filter_directory, SortKey};
use crate::doctor::{AvailabilityWindow, DoctorProfile, Specialty};
use crate::error::{BookingError, BookingResult};
use crate::identity::{Actor, Role, UserProfile};
use crate::lifecycle;
use crate::schedule::{filter_appointments, AppointmentView};
use crate::store::{AppointmentQuery, ClinicStore, DoctorQuery};
use crate::validation::{validate_day_of_week, validate_fee_cents, validate_required_text};

/// Patient registration payload.
#[derive(Clone, Debug)]
pub struct PatientRegistration {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// Doctor registration payload. The resulting profile is always unapproved.
#[derive(Clone, Debug)]
pub struct DoctorRegistration {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub specialty: Specialty,
    pub license_number: String,
    pub years_of_experience: u32,
    pub education: String,
    pub bio: Option<String>,
    pub consultation_fee_cents: u64,
    pub availability: Vec<AvailabilityWindow>,
}

/// Booking operations over a [`ClinicStore`].
pub struct BookingService<S> {
    store: S,
}

impl<S: ClinicStore> BookingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store, for wiring and seeding.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves a session user id into an acting identity.
    ///
    /// A doctor actor needs the professional profile it owns; a doctor
    /// identity without one cannot act yet and reports not-found.
    pub fn resolve_actor(&self, user_id: Uuid) -> BookingResult<Actor> {
        let user = self
            .store
            .get_user(user_id)?
            .ok_or_else(|| BookingError::not_found("user", user_id))?;

        match user.role {
            Role::Patient => Ok(Actor::Patient { user_id }),
            Role::Admin => Ok(Actor::Admin { user_id }),
            Role::Doctor => {
                let profile = self
                    .store
                    .get_doctor_by_user(user_id)?
                    .ok_or_else(|| BookingError::not_found("doctor profile", user_id))?;
                Ok(Actor::Doctor {
                    user_id,
                    profile_id: profile.id,
                })
            }
        }
    }

    /// Registers a patient account.
    pub fn register_patient(&self, registration: PatientRegistration) -> BookingResult<UserProfile> {
        let user = self.register_identity(
            &registration.email,
            &registration.full_name,
            Role::Patient,
            registration.phone,
            registration.date_of_birth,
            registration.address,
        )?;
        info!(user_id = %user.id, "registered patient");
        Ok(user)
    }

    /// Registers a doctor account and its unapproved professional profile.
    pub fn register_doctor(&self, registration: DoctorRegistration) -> BookingResult<DoctorProfile> {
        let license = validate_required_text("license_number", &registration.license_number)?;
        let education = validate_required_text("education", &registration.education)?;
        validate_fee_cents(registration.consultation_fee_cents)?;
        for window in &registration.availability {
            validate_day_of_week(window.day_of_week)?;
        }

        let user = self.register_identity(
            &registration.email,
            &registration.full_name,
            Role::Doctor,
            registration.phone,
            None,
            None,
        )?;
        DoctorProfile::check_owner(&user)?;

        let now = Utc::now();
        let profile = DoctorProfile {
            id: Uuid::new_v4(),
            user_id: user.id,
            specialty: registration.specialty,
            license_number: license.into_string(),
            years_of_experience: registration.years_of_experience,
            education: education.into_string(),
            bio: registration.bio,
            consultation_fee_cents: registration.consultation_fee_cents,
            // Approval belongs to the external admin process.
            is_approved: false,
            availability: registration.availability,
            created_at: now,
            updated_at: now,
            user,
        };
        self.store.insert_doctor(profile.clone())?;
        info!(doctor_id = %profile.id, specialty = %profile.specialty, "registered doctor (unapproved)");
        Ok(profile)
    }

    /// Registers an admin identity.
    ///
    /// There is no admin API surface; this exists for operational tooling
    /// and demo seeding, which stand in for the external admin process.
    pub fn register_admin(&self, email: &str, full_name: &str) -> BookingResult<UserProfile> {
        let user = self.register_identity(email, full_name, Role::Admin, None, None, None)?;
        info!(user_id = %user.id, "registered admin");
        Ok(user)
    }

    /// Flips the approval gate. Admin actors only.
    pub fn set_doctor_approval(
        &self,
        actor: &Actor,
        doctor_id: Uuid,
        approved: bool,
    ) -> BookingResult<()> {
        match actor {
            Actor::Admin { .. } => {}
            other => {
                return Err(BookingError::Unauthorized(format!(
                    "only admins can change approval, got {}",
                    other.role()
                )));
            }
        }
        self.store.set_doctor_approval(doctor_id, approved)?;
        info!(doctor_id = %doctor_id, approved, "changed doctor approval");
        Ok(())
    }

    /// The patient-facing directory: approved doctors only, searched,
    /// constrained and sorted.
    pub fn browse_doctors(
        &self,
        search: &str,
        specialty: Option<Specialty>,
        sort: SortKey,
    ) -> BookingResult<Vec<DoctorProfile>> {
        let doctors = self.store.list_doctors(DoctorQuery {
            specialty,
            approved_only: true,
        })?;
        // The directory filter re-applies the approval gate; the query-level
        // filter is an optimisation, not the invariant.
        Ok(filter_directory(&doctors, search, specialty, sort))
    }

    /// A single doctor with joined identity and availability windows.
    pub fn doctor_detail(&self, doctor_id: Uuid) -> BookingResult<DoctorProfile> {
        self.store
            .get_doctor(doctor_id)?
            .ok_or_else(|| BookingError::not_found("doctor", doctor_id))
    }

    /// Books a new appointment for the acting patient.
    pub fn book_appointment(
        &self,
        actor: &Actor,
        request: NewAppointment,
    ) -> BookingResult<Appointment> {
        let doctor = self.store.get_doctor(request.doctor_id)?;
        let now = Utc::now();
        let appointment =
            lifecycle::create_appointment(actor, doctor.as_ref(), request, now.date_naive(), now)?;
        self.store.insert_appointment(appointment.clone())?;
        info!(appointment_id = %appointment.id, "booked appointment");
        Ok(appointment)
    }

    /// Moves an appointment along one edge of the lifecycle table.
    ///
    /// The updated record is only returned once the store has confirmed the
    /// swap; on any failure the stored record is unchanged.
    pub fn transition_appointment(
        &self,
        actor: &Actor,
        appointment_id: Uuid,
        to: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        let current = self
            .store
            .get_appointment(appointment_id)?
            .ok_or_else(|| BookingError::not_found("appointment", appointment_id))?;

        let updated = lifecycle::apply_transition(current, actor, to, Utc::now())?;
        self.store.update_appointment(updated.clone())?;
        info!(appointment_id = %appointment_id, to = %to, "appointment transitioned");
        Ok(updated)
    }

    /// Cancels by flagging the status; history stays visible in listings.
    pub fn cancel_appointment(
        &self,
        actor: &Actor,
        appointment_id: Uuid,
    ) -> BookingResult<Appointment> {
        self.transition_appointment(actor, appointment_id, AppointmentStatus::Cancelled)
    }

    /// Hard-removal path. Only a party to the appointment may remove it.
    pub fn delete_appointment(&self, actor: &Actor, appointment_id: Uuid) -> BookingResult<()> {
        let appointment = self
            .store
            .get_appointment(appointment_id)?
            .ok_or_else(|| BookingError::not_found("appointment", appointment_id))?;

        let owns = match actor {
            Actor::Patient { user_id } => *user_id == appointment.patient_id,
            Actor::Doctor { profile_id, .. } => *profile_id == appointment.doctor_id,
            Actor::Admin { .. } => false,
        };
        if !owns {
            return Err(BookingError::Unauthorized(
                "only a party to the appointment can remove it".into(),
            ));
        }

        self.store.delete_appointment(appointment_id)?;
        info!(appointment_id = %appointment_id, "appointment removed");
        Ok(())
    }

    /// The viewer's appointment list, enriched with counterpart display data.
    pub fn my_appointments(
        &self,
        actor: &Actor,
        status: StatusFilter,
    ) -> BookingResult<Vec<AppointmentView>> {
        let query = match actor {
            Actor::Patient { user_id } => AppointmentQuery {
                patient_id: Some(*user_id),
                ..Default::default()
            },
            Actor::Doctor { profile_id, .. } => AppointmentQuery {
                doctor_id: Some(*profile_id),
                ..Default::default()
            },
            Actor::Admin { .. } => return Ok(Vec::new()),
        };

        let fetched = self.store.list_appointments(query)?;
        // The view filter re-applies scoping and ordering; the query-level
        // filter is an optimisation, not the invariant.
        let scoped = filter_appointments(&fetched, actor, status);

        scoped
            .into_iter()
            .map(|appointment| self.enrich(appointment, actor))
            .collect()
    }

    fn enrich(&self, appointment: Appointment, viewer: &Actor) -> BookingResult<AppointmentView> {
        match viewer {
            Actor::Patient { .. } | Actor::Admin { .. } => {
                let doctor = self
                    .store
                    .get_doctor(appointment.doctor_id)?
                    .ok_or_else(|| BookingError::not_found("doctor", appointment.doctor_id))?;
                Ok(AppointmentView {
                    counterpart_name: doctor.display_name().to_owned(),
                    counterpart_specialty: Some(doctor.specialty),
                    appointment,
                })
            }
            Actor::Doctor { .. } => {
                let patient = self
                    .store
                    .get_user(appointment.patient_id)?
                    .ok_or_else(|| BookingError::not_found("user", appointment.patient_id))?;
                Ok(AppointmentView {
                    counterpart_name: patient.full_name,
                    counterpart_specialty: None,
                    appointment,
                })
            }
        }
    }

    fn register_identity(
        &self,
        email: &str,
        full_name: &str,
        role: Role,
        phone: Option<String>,
        date_of_birth: Option<NaiveDate>,
        address: Option<String>,
    ) -> BookingResult<UserProfile> {
        let email = EmailAddress::parse(email)?;
        let full_name = validate_required_text("full_name", full_name)?;

        if self.store.find_user_by_email(email.as_str())?.is_some() {
            return Err(BookingError::validation(format!(
                "email already registered: {email}"
            )));
        }

        let now = Utc::now();
        let user = UserProfile {
            id: Uuid::new_v4(),
            email,
            full_name: full_name.into_string(),
            role,
            phone,
            date_of_birth,
            address,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_user(user.clone())?;
        Ok(user)
    }
}
