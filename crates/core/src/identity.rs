//! User identities and acting roles.
//!
//! Every identity carries exactly one role fixed at registration; there is no
//! role-migration flow. Lifecycle and filter operations never read an ambient
//! session: the acting identity is passed in explicitly as an [`Actor`].

use chrono::{DateTime, NaiveDate, Utc};
use medibook_types::EmailAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an identity was registered with. Immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        };
        f.write_str(label)
    }
}

/// A registered user account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: EmailAddress,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The identity performing an operation, as a closed union.
///
/// Authorisation checks match exhaustively over this enum instead of
/// inspecting optional fields on a shared record. A doctor actor carries both
/// its user id and the id of the professional profile it owns, so ownership
/// checks against an appointment's doctor reference need no extra lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor {
    Patient { user_id: Uuid },
    Doctor { user_id: Uuid, profile_id: Uuid },
    Admin { user_id: Uuid },
}

impl Actor {
    /// The user id behind the actor, regardless of role.
    pub fn user_id(&self) -> Uuid {
        match self {
            Actor::Patient { user_id }
            | Actor::Doctor { user_id, .. }
            | Actor::Admin { user_id } => *user_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Actor::Patient { .. } => Role::Patient,
            Actor::Doctor { .. } => Role::Doctor,
            Actor::Admin { .. } => Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).expect("json"), "\"doctor\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"patient\"").expect("json"),
            Role::Patient
        );
    }

    #[test]
    fn actor_exposes_user_id_for_all_variants() {
        let id = Uuid::new_v4();
        let profile = Uuid::new_v4();
        assert_eq!(Actor::Patient { user_id: id }.user_id(), id);
        assert_eq!(
            Actor::Doctor {
                user_id: id,
                profile_id: profile
            }
            .user_id(),
            id
        );
        assert_eq!(Actor::Admin { user_id: id }.role(), Role::Admin);
    }
}
