//! Input validation helpers.
//!
//! These functions check user-supplied booking and registration fields before
//! they reach the store. Date checks take the reference day as a parameter so
//! the rules stay testable without reading the wall clock.

use chrono::NaiveDate;
use medibook_types::NonEmptyText;

use crate::error::{BookingError, BookingResult};

/// Validates that an appointment date is today or later.
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate) -> BookingResult<()> {
    if date < today {
        return Err(BookingError::validation(format!(
            "appointment date {date} is in the past"
        )));
    }
    Ok(())
}

/// Validates a required free-text field, returning the trimmed value.
pub fn validate_required_text(field: &'static str, value: &str) -> BookingResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| BookingError::validation(format!("{field} cannot be empty")))
}

/// Validates a consultation fee given in minor units.
///
/// The type already rules out negative amounts; this bounds the value to
/// catch unit mistakes (for example a fee entered in micro-units).
pub fn validate_fee_cents(fee_cents: u64) -> BookingResult<()> {
    const MAX_FEE_CENTS: u64 = 1_000_000_00;

    if fee_cents > MAX_FEE_CENTS {
        return Err(BookingError::validation(format!(
            "consultation fee {fee_cents} exceeds the maximum of {MAX_FEE_CENTS} cents"
        )));
    }
    Ok(())
}

/// Validates an availability day-of-week index (0 = Sunday .. 6 = Saturday).
pub fn validate_day_of_week(day: u8) -> BookingResult<()> {
    if day > 6 {
        return Err(BookingError::validation(format!(
            "day_of_week must be 0-6, got {day}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn booking_date_accepts_today_and_future() {
        let today = date(2026, 3, 10);
        validate_booking_date(today, today).expect("same day is bookable");
        validate_booking_date(date(2026, 3, 11), today).expect("future is bookable");
    }

    #[test]
    fn booking_date_rejects_past() {
        let today = date(2026, 3, 10);
        let err = validate_booking_date(date(2026, 3, 9), today).expect_err("past date");
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn required_text_names_the_field() {
        let err = validate_required_text("reason", "   ").expect_err("blank reason");
        assert_eq!(err.to_string(), "invalid input: reason cannot be empty");
        let ok = validate_required_text("reason", " check-up ").expect("valid reason");
        assert_eq!(ok.as_str(), "check-up");
    }

    #[test]
    fn fee_bound_and_day_of_week_bound() {
        validate_fee_cents(15_000).expect("plausible fee");
        assert!(validate_fee_cents(u64::MAX).is_err());
        validate_day_of_week(6).expect("saturday");
        assert!(validate_day_of_week(7).is_err());
    }
}
