//! Field rules for registration and login input.
//!
//! The email and name patterns are intentionally shallow: a 2-4 letter TLD
//! and ASCII letters only.

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::UserError;
use super::models::RegisterUserCommand;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 120;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,4}$").unwrap();
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z ]{2,}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 6 characters with an uppercase letter, a lowercase letter and a digit.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn is_valid_age(age: i64) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// Check a registration command field by field.
///
/// Rules run in a fixed order (email, password, first name, last name, age)
/// and the first failure is returned.
pub fn validate_registration(command: &RegisterUserCommand) -> Result<(), UserError> {
    if !is_valid_email(&command.email) {
        return Err(UserError::InvalidEmail);
    }
    if !is_valid_password(&command.password) {
        return Err(UserError::InvalidPassword);
    }
    if !is_valid_name(&command.first_name) {
        return Err(UserError::InvalidFirstName);
    }
    if !is_valid_name(&command.last_name) {
        return Err(UserError::InvalidLastName);
    }
    if !is_valid_age(command.age) {
        return Err(UserError::InvalidAge);
    }
    Ok(())
}

/// Login only checks shape: a well-formed email and a non-empty password.
pub fn validate_login(email: &str, password: &str) -> Result<(), UserError> {
    if !is_valid_email(email) {
        return Err(UserError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(UserError::EmptyPassword);
    }
    Ok(())
}
