//! Patient-facing doctor directory.
//!
//! A pure filter/sort over an in-memory set of profiles. The approval gate is
//! enforced here as a hard invariant even though the store query can also
//! pre-filter: an unapproved profile must never survive this function,
//! wherever the input came from.

use serde::Deserialize;

use crate::doctor::{DoctorProfile, Specialty};

/// Sort order for the directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Display name, ascending, case-insensitive.
    #[default]
    Name,
    /// Years of experience, descending.
    Experience,
    /// Consultation fee, ascending.
    Fee,
}

impl std::str::FromStr for SortKey {
    type Err = crate::error::BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "name" => Ok(SortKey::Name),
            "experience" => Ok(SortKey::Experience),
            "fee" => Ok(SortKey::Fee),
            other => Err(crate::error::BookingError::validation(format!(
                "unknown sort key: {other}"
            ))),
        }
    }
}

/// Computes the visible, searchable, sorted doctor list.
///
/// Retains approved profiles matching the free-text search (case-insensitive
/// substring over display name and specialty label; empty search matches
/// all), then applies the specialty constraint, then sorts. The sort is
/// stable, so equal keys keep their input order and re-running on identical
/// input yields identical output.
pub fn filter_directory(
    doctors: &[DoctorProfile],
    search: &str,
    specialty: Option<Specialty>,
    sort: SortKey,
) -> Vec<DoctorProfile> {
    let needle = search.trim().to_lowercase();

    let mut visible: Vec<DoctorProfile> = doctors
        .iter()
        .filter(|doctor| doctor.is_approved)
        .filter(|doctor| {
            needle.is_empty()
                || doctor.display_name().to_lowercase().contains(&needle)
                || doctor.specialty.label().to_lowercase().contains(&needle)
        })
        .filter(|doctor| specialty.map_or(true, |wanted| doctor.specialty == wanted))
        .cloned()
        .collect();

    match sort {
        SortKey::Name => visible.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
        }),
        SortKey::Experience => {
            visible.sort_by(|a, b| b.years_of_experience.cmp(&a.years_of_experience));
        }
        SortKey::Fee => {
            visible.sort_by(|a, b| a.consultation_fee_cents.cmp(&b.consultation_fee_cents));
        }
    }

    visible
}
