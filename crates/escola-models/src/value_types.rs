//! Strongly-typed value types for Brazilian personal data.
//!
//! [`Cpf`] and [`PhoneNumber`] accept formatted input (`529.982.247-25`,
//! `(11) 98765-4321`) and keep only the digits once validated.
//!
//! # Example
//!
//! ```ignore
//! use escola_models::value_types::{Cpf, PhoneNumber};
//!
//! let cpf: Cpf = "529.982.247-25".parse().unwrap();
//! assert_eq!(cpf.as_str(), "52998224725");
//!
//! let phone: PhoneNumber = "(11) 98765-4321".parse().unwrap();
//! assert_eq!(phone.as_str(), "11987654321");
//! ```

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTypeError {
    #[error("Invalid CPF: {0}")]
    InvalidCpf(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

// ============================================================================
// CPF
// ============================================================================

/// A Brazilian CPF number, stored as its 11 digits.
///
/// Numbers made of a single repeated digit (`111.111.111-11`) are rejected
/// even though their check digits work out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(value: &str) -> Result<Self, ValueTypeError> {
        let digits = digits_only(value);

        if digits.len() != 11 {
            return Err(ValueTypeError::InvalidCpf(
                "must contain exactly 11 digits".to_string(),
            ));
        }

        let first = digits.as_bytes()[0];
        if digits.bytes().all(|b| b == first) {
            return Err(ValueTypeError::InvalidCpf(
                "repeated digits are not allowed".to_string(),
            ));
        }

        let numbers: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
        let first_check = check_digit(&numbers[..9]);
        let second_check = check_digit(&numbers[..10]);

        if numbers[9] != first_check || numbers[10] != second_check {
            return Err(ValueTypeError::InvalidCpf(
                "check digits do not match".to_string(),
            ));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Mod-11 check digit over `digits`, weights descending to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

impl FromStr for Cpf {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// PhoneNumber
// ============================================================================

/// A Brazilian phone number with area code: 10 digits (landline) or 11 (mobile).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: &str) -> Result<Self, ValueTypeError> {
        let digits = digits_only(value);
        if !(10..=11).contains(&digits.len()) {
            return Err(ValueTypeError::InvalidPhoneNumber(
                "must contain 10 or 11 digits".to_string(),
            ));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Text helpers
// ============================================================================

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
///
/// `"rua das flores, 12b"` becomes `"Rua Das Flores, 12B"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_alphabetic = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

/// Completed years between `birth_date` and `today`; negative for future dates.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birth_date.month(), birth_date.day());
    today.year() - birth_date.year() - if had_birthday { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf_normalized() {
        let cpf = Cpf::new("529.982.247-25").unwrap();
        assert_eq!(cpf.as_str(), "52998224725");
        assert!(Cpf::new("52998224725").is_ok());
    }

    #[test]
    fn test_repeated_digit_cpf_rejected() {
        for digit in 0..=9 {
            let cpf = digit.to_string().repeat(11);
            assert!(Cpf::new(&cpf).is_err(), "{} should be rejected", cpf);
        }
        assert_eq!(
            Cpf::new("111.111.111-11"),
            Err(ValueTypeError::InvalidCpf(
                "repeated digits are not allowed".to_string()
            ))
        );
    }

    #[test]
    fn test_cpf_wrong_check_digits() {
        assert!(Cpf::new("529.982.247-24").is_err());
        assert!(Cpf::new("529.982.247-15").is_err());
    }

    #[test]
    fn test_cpf_wrong_length() {
        assert!(Cpf::new("529.982.247").is_err());
        assert!(Cpf::new("").is_err());
        assert!(Cpf::new("529.982.247-250").is_err());
    }

    #[test]
    fn test_cpf_check_digit_zero_branch() {
        // second check digit is 0 because the remainder is below 2
        assert!(Cpf::new("100.000.002-80").is_ok());
        assert!(Cpf::new("100.000.002-81").is_err());
    }

    #[test]
    fn test_phone_number() {
        assert_eq!(
            PhoneNumber::new("(11) 98765-4321").unwrap().as_str(),
            "11987654321"
        );
        assert!(PhoneNumber::new("1133334444").is_ok());
        assert!(PhoneNumber::new("98765-4321").is_err());
        assert!(PhoneNumber::new("+55 (11) 98765-4321").is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("rua das flores, 12b"), "Rua Das Flores, 12B");
        assert_eq!(title_case("MARIA joSÉ"), "Maria José");
        assert_eq!(title_case("1a"), "1A");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_age_on() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let birthday_passed = NaiveDate::from_ymd_opt(2010, 6, 15).unwrap();
        let birthday_pending = NaiveDate::from_ymd_opt(2010, 6, 16).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();

        assert_eq!(age_on(birthday_passed, today), 14);
        assert_eq!(age_on(birthday_pending, today), 13);
        assert_eq!(age_on(future, today), -1);
    }
}
