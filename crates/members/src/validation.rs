//! Custom validators used by the [`User`] derive.
//!
//! Field-level rules (required strings, email format, postal code range) are
//! declared on the model itself; this module holds the rules the derive
//! cannot express, mostly keeping the dates on a record consistent.

use std::borrow::Cow;

use validator::ValidationError;

use crate::models::{Position, User};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Phone numbers are stored as bare digits, 10 to 15 of them.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let len = phone_number.len();
    if !(10..=15).contains(&len) || !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(error(
            "phone_number",
            "Phone number must be 10 to 15 digits",
        ));
    }
    Ok(())
}

/// Checks that a position did not end before it started.
pub fn validate_position(position: &Position) -> Result<(), ValidationError> {
    match position.ended {
        Some(ended) if ended < position.started => Err(error(
            "position_dates",
            "Position cannot end before it started",
        )),
        _ => Ok(()),
    }
}

/// Cross-field date rules for a user record.
pub fn validate_user_dates(user: &User) -> Result<(), ValidationError> {
    if user.started_surfing <= user.birthdate {
        return Err(error(
            "started_surfing",
            "Started surfing must be after birthdate",
        ));
    }

    if user.joined_date <= user.birthdate {
        return Err(error("joined_date", "Joined date must be after birthdate"));
    }

    if let Some(renewal_date) = user.renewal_date {
        if renewal_date < user.joined_date {
            return Err(error(
                "renewal_date",
                "Renewal date cannot be before joined date",
            ));
        }
    }

    match user.date_surfboard_won {
        Some(_) if !user.won_surfboard => {
            return Err(error(
                "date_surfboard_won",
                "Surfboard win date set but no surfboard was won",
            ));
        }
        Some(won) if won < user.birthdate => {
            return Err(error(
                "date_surfboard_won",
                "Surfboard win date must be after birthdate",
            ));
        }
        _ => {}
    }

    user.positions.iter().try_for_each(validate_position)
}
