//! Role-scoped appointment listings.
//!
//! A pure filter over an in-memory set of appointments: scope to the viewing
//! actor's own records, apply the status constraint, and order by date. The
//! display enrichment (the counterpart's name and specialty) is a read-only
//! join performed by the service layer with [`AppointmentView`].

use serde::Serialize;

use crate::appointment::{Appointment, StatusFilter};
use crate::doctor::Specialty;
use crate::identity::Actor;

/// Computes the viewer's appointment list.
///
/// A patient sees appointments where they are the patient; a doctor sees
/// appointments referencing the profile they own. An admin viewer has no
/// defined appointment view and gets an empty scope. Results are ordered
/// ascending by appointment date, ties broken by appointment id so the order
/// is deterministic whatever order the records were fetched in.
pub fn filter_appointments(
    appointments: &[Appointment],
    viewer: &Actor,
    status: StatusFilter,
) -> Vec<Appointment> {
    let mut scoped: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| match viewer {
            Actor::Patient { user_id } => appointment.patient_id == *user_id,
            Actor::Doctor { profile_id, .. } => appointment.doctor_id == *profile_id,
            Actor::Admin { .. } => false,
        })
        .filter(|appointment| status.matches(appointment.status))
        .cloned()
        .collect();

    scoped.sort_by(|a, b| {
        a.appointment_date
            .cmp(&b.appointment_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    scoped
}

/// An appointment enriched with the counterpart's display data.
///
/// For a patient viewer the counterpart is the doctor (name and specialty);
/// for a doctor viewer it is the patient (name only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub counterpart_name: String,
    pub counterpart_specialty: Option<Specialty>,
}
