//! Appointment lifecycle engine.
//!
//! The single authority on which status changes are legal and who may request
//! them:
//!
//! ```text
//! (creation) -> pending -> confirmed -> completed
//!                   \          \
//!                    +-> cancelled <-+
//! ```
//!
//! `completed` and `cancelled` are terminal. A request along any other edge,
//! or by an actor that does not own the relevant side of the appointment,
//! fails with [`BookingError::InvalidTransition`] and leaves the record
//! untouched. Application is a single full-record swap; readers never observe
//! an intermediate state.

use chrono::{DateTime, NaiveDate, Utc};
use medibook_types::NonEmptyText;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::doctor::DoctorProfile;
use crate::error::{BookingError, BookingResult};
use crate::identity::Actor;
use crate::validation::{validate_booking_date, validate_required_text};

/// Validates a booking request and builds the initial `pending` record.
///
/// Creation is only open to the patient actor booking for themselves, against
/// an existing approved doctor, on a future-or-present date, with a non-empty
/// reason.
///
/// # Errors
///
/// - [`BookingError::DoctorNotBookable`] when the doctor is absent or
///   unapproved (no record is produced).
/// - [`BookingError::Unauthorized`] when the actor is not a patient.
/// - [`BookingError::Validation`] for a past date or blank reason.
pub fn create_appointment(
    actor: &Actor,
    doctor: Option<&DoctorProfile>,
    request: NewAppointment,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> BookingResult<Appointment> {
    let patient_id = match actor {
        Actor::Patient { user_id } => *user_id,
        other => {
            return Err(BookingError::Unauthorized(format!(
                "only patients can book appointments, got {}",
                other.role()
            )));
        }
    };

    let doctor = match doctor {
        Some(profile) if profile.is_approved => profile,
        _ => {
            warn!(doctor_id = %request.doctor_id, "booking attempt against unbookable doctor");
            return Err(BookingError::DoctorNotBookable);
        }
    };

    validate_booking_date(request.appointment_date, today)?;
    let reason: NonEmptyText = validate_required_text("reason", &request.reason)?;
    let time = validate_required_text("appointment_time", &request.appointment_time)?;

    debug!(
        patient_id = %patient_id,
        doctor_id = %doctor.id,
        date = %request.appointment_date,
        "creating pending appointment"
    );

    Ok(Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id: doctor.id,
        appointment_date: request.appointment_date,
        appointment_time: time.into_string(),
        status: AppointmentStatus::Pending,
        reason: reason.into_string(),
        notes: request.notes,
        documents: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

/// Checks one edge of the transition table for a given actor.
///
/// Wrong-actor requests report [`BookingError::InvalidTransition`], the same
/// as wrong-edge requests: callers learn that the change is not available to
/// them, not who would be allowed to make it.
pub fn authorize_transition(
    appointment: &Appointment,
    actor: &Actor,
    to: AppointmentStatus,
) -> BookingResult<()> {
    use AppointmentStatus::{Cancelled, Completed, Confirmed, Pending};

    let invalid = || BookingError::InvalidTransition {
        from: appointment.status,
        to,
    };

    let patient_owns = matches!(actor, Actor::Patient { user_id } if *user_id == appointment.patient_id);
    let doctor_owns =
        matches!(actor, Actor::Doctor { profile_id, .. } if *profile_id == appointment.doctor_id);

    let allowed = match (appointment.status, to) {
        (Pending, Confirmed) => doctor_owns,
        (Pending, Cancelled) => patient_owns || doctor_owns,
        (Confirmed, Completed) => doctor_owns,
        (Confirmed, Cancelled) => doctor_owns,
        _ => false,
    };

    if !allowed {
        warn!(
            appointment_id = %appointment.id,
            from = %appointment.status,
            to = %to,
            actor = %actor.role(),
            "rejected transition request"
        );
        return Err(invalid());
    }

    Ok(())
}

/// Applies an authorised transition, returning the updated record.
///
/// Takes the appointment by value and returns a new one so the caller swaps
/// the whole record atomically in its store; on any error the original is
/// still the only version that exists.
pub fn apply_transition(
    appointment: Appointment,
    actor: &Actor,
    to: AppointmentStatus,
    now: DateTime<Utc>,
) -> BookingResult<Appointment> {
    authorize_transition(&appointment, actor, to)?;

    debug!(
        appointment_id = %appointment.id,
        from = %appointment.status,
        to = %to,
        "applying transition"
    );

    Ok(Appointment {
        status: to,
        updated_at: now,
        ..appointment
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{approved_doctor, pending_appointment, sample_day, sample_now};
    use chrono::Duration;

    fn booking_request(doctor_id: Uuid) -> NewAppointment {
        NewAppointment {
            doctor_id,
            appointment_date: sample_day() + Duration::days(3),
            appointment_time: "10:30".into(),
            reason: "persistent headaches".into(),
            notes: None,
        }
    }

    #[test]
    fn creation_yields_pending_for_patient() {
        let doctor = approved_doctor("Dr. Jane Lee", crate::doctor::Specialty::Cardiology);
        let patient = Actor::Patient { user_id: Uuid::new_v4() };

        let appointment = create_appointment(
            &patient,
            Some(&doctor),
            booking_request(doctor.id),
            sample_day(),
            sample_now(),
        )
        .expect("valid booking");

        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.patient_id, patient.user_id());
        assert_eq!(appointment.doctor_id, doctor.id);
    }

    #[test]
    fn creation_rejects_unapproved_doctor() {
        let mut doctor = approved_doctor("Dr. Jane Lee", crate::doctor::Specialty::Cardiology);
        doctor.is_approved = false;
        let patient = Actor::Patient { user_id: Uuid::new_v4() };

        let err = create_appointment(
            &patient,
            Some(&doctor),
            booking_request(doctor.id),
            sample_day(),
            sample_now(),
        )
        .expect_err("unapproved doctor");
        assert!(matches!(err, BookingError::DoctorNotBookable));
    }

    #[test]
    fn creation_rejects_missing_doctor() {
        let patient = Actor::Patient { user_id: Uuid::new_v4() };
        let err = create_appointment(
            &patient,
            None,
            booking_request(Uuid::new_v4()),
            sample_day(),
            sample_now(),
        )
        .expect_err("missing doctor");
        assert!(matches!(err, BookingError::DoctorNotBookable));
    }

    #[test]
    fn creation_rejects_past_date_and_blank_reason() {
        let doctor = approved_doctor("Dr. Jane Lee", crate::doctor::Specialty::Cardiology);
        let patient = Actor::Patient { user_id: Uuid::new_v4() };

        let mut past = booking_request(doctor.id);
        past.appointment_date = sample_day() - Duration::days(1);
        assert!(matches!(
            create_appointment(&patient, Some(&doctor), past, sample_day(), sample_now()),
            Err(BookingError::Validation(_))
        ));

        let mut blank = booking_request(doctor.id);
        blank.reason = "  ".into();
        assert!(matches!(
            create_appointment(&patient, Some(&doctor), blank, sample_day(), sample_now()),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn creation_rejects_non_patient_actor() {
        let doctor = approved_doctor("Dr. Jane Lee", crate::doctor::Specialty::Cardiology);
        let as_doctor = Actor::Doctor {
            user_id: doctor.user_id,
            profile_id: doctor.id,
        };
        let err = create_appointment(
            &as_doctor,
            Some(&doctor),
            booking_request(doctor.id),
            sample_day(),
            sample_now(),
        )
        .expect_err("doctors cannot book");
        assert!(matches!(err, BookingError::Unauthorized(_)));
    }

    #[test]
    fn doctor_confirms_then_completes() {
        let appointment = pending_appointment();
        let doctor = Actor::Doctor {
            user_id: Uuid::new_v4(),
            profile_id: appointment.doctor_id,
        };

        let confirmed = apply_transition(
            appointment,
            &doctor,
            AppointmentStatus::Confirmed,
            sample_now(),
        )
        .expect("doctor confirms");
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let completed = apply_transition(
            confirmed,
            &doctor,
            AppointmentStatus::Completed,
            sample_now(),
        )
        .expect("doctor completes");
        assert_eq!(completed.status, AppointmentStatus::Completed);

        // Terminal: every further request fails and the record is unchanged.
        for to in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ] {
            let err = authorize_transition(&completed, &doctor, to).expect_err("terminal state");
            assert!(matches!(err, BookingError::InvalidTransition { .. }));
        }
        assert_eq!(completed.status, AppointmentStatus::Completed);
    }

    #[test]
    fn patient_may_cancel_only_while_pending() {
        let appointment = pending_appointment();
        let patient = Actor::Patient {
            user_id: appointment.patient_id,
        };
        let doctor = Actor::Doctor {
            user_id: Uuid::new_v4(),
            profile_id: appointment.doctor_id,
        };

        authorize_transition(&appointment, &patient, AppointmentStatus::Cancelled)
            .expect("patient cancels pending");

        let confirmed = apply_transition(
            appointment,
            &doctor,
            AppointmentStatus::Confirmed,
            sample_now(),
        )
        .expect("doctor confirms");

        let err = authorize_transition(&confirmed, &patient, AppointmentStatus::Cancelled)
            .expect_err("patient cannot cancel confirmed");
        assert!(matches!(err, BookingError::InvalidTransition { .. }));

        authorize_transition(&confirmed, &doctor, AppointmentStatus::Cancelled)
            .expect("doctor cancels confirmed");
    }

    #[test]
    fn patient_cannot_confirm_or_complete() {
        let appointment = pending_appointment();
        let patient = Actor::Patient {
            user_id: appointment.patient_id,
        };

        assert!(matches!(
            authorize_transition(&appointment, &patient, AppointmentStatus::Confirmed),
            Err(BookingError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn stranger_doctor_cannot_touch_the_appointment() {
        let appointment = pending_appointment();
        let stranger = Actor::Doctor {
            user_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
        };

        let err = authorize_transition(&appointment, &stranger, AppointmentStatus::Confirmed)
            .expect_err("not the referenced doctor");
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[test]
    fn skipping_a_state_is_rejected() {
        let appointment = pending_appointment();
        let doctor = Actor::Doctor {
            user_id: Uuid::new_v4(),
            profile_id: appointment.doctor_id,
        };

        let err = authorize_transition(&appointment, &doctor, AppointmentStatus::Completed)
            .expect_err("pending cannot complete directly");
        assert!(matches!(
            err,
            BookingError::InvalidTransition {
                from: AppointmentStatus::Pending,
                to: AppointmentStatus::Completed,
            }
        ));
    }

    #[test]
    fn successful_transition_advances_updated_at() {
        let appointment = pending_appointment();
        let doctor = Actor::Doctor {
            user_id: Uuid::new_v4(),
            profile_id: appointment.doctor_id,
        };
        let later = sample_now() + Duration::hours(2);

        let confirmed =
            apply_transition(appointment.clone(), &doctor, AppointmentStatus::Confirmed, later)
                .expect("doctor confirms");
        assert_eq!(confirmed.updated_at, later);
        assert_eq!(confirmed.created_at, appointment.created_at);
        assert_eq!(confirmed.reason, appointment.reason);
    }
}
