use uuid::Uuid;

use crate::appointment::AppointmentStatus;

/// Errors produced by booking-domain operations.
///
/// Variants map one-to-one onto the failure modes the REST layer reports:
/// invalid input, an illegal lifecycle transition, a booking attempt against
/// an unapproved or missing doctor, a missing entity, an access violation
/// outside the lifecycle rules, and an unavailable persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("doctor is not bookable")]
    DoctorNotBookable,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("not permitted: {0}")]
    Unauthorized(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<medibook_types::TextError> for BookingError {
    fn from(err: medibook_types::TextError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type BookingResult<T> = std::result::Result<T, BookingError>;
