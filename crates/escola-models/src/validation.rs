//! Custom field validators for `#[validate(custom(function = ...))]`.
//!
//! Each validator checks the raw input only. Normalization (digit stripping,
//! title-casing, trimming) happens when a DTO is converted into its record.

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use validator::ValidationError;

use crate::value_types::{Cpf, PhoneNumber, age_on};

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// bcrypt ignores input past this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const NAME_MAX_LENGTH: usize = 100;
pub const MAX_AGE_YEARS: i32 = 120;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(error(
            "username_length",
            "Username must be between 3 and 50 characters",
        ));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("password_blank", "Password must not be blank"));
    }
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(error(
            "password_length",
            "Password must be at least 8 characters",
        ));
    }
    if value.len() > PASSWORD_MAX_BYTES {
        return Err(error(
            "password_length",
            "Password must be at most 72 bytes",
        ));
    }
    Ok(())
}

pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    Cpf::new(value)
        .map(|_| ())
        .map_err(|_| error("cpf", "CPF is invalid"))
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    PhoneNumber::new(value)
        .map(|_| ())
        .map_err(|_| error("phone", "Phone number must have 10 or 11 digits"))
}

pub fn validate_birth_date(value: &NaiveDate) -> Result<(), ValidationError> {
    let age = age_on(*value, Utc::now().date_naive());
    if !(0..=MAX_AGE_YEARS).contains(&age) {
        return Err(error("birth_date", "Birth date is invalid"));
    }
    Ok(())
}

pub fn validate_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() <= 3 {
        return Err(error(
            "address",
            "Address must be longer than 3 characters",
        ));
    }
    Ok(())
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Field must not be blank"));
    }
    Ok(())
}

/// Classroom and subject names.
pub fn validate_entity_name(value: &str) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if length == 0 || length > NAME_MAX_LENGTH {
        return Err(error(
            "name",
            "Name must be between 1 and 100 characters",
        ));
    }
    Ok(())
}
