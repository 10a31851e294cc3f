//! Request validation for registration and login
//!
//! Checks run in a fixed order and collect every violation before reporting,
//! so a response lists all failing fields at once. Field names in the
//! reported errors use the wire casing (`countryCode`, `address.zipCode`).
//!
//! Email syntax goes through the `validator` crate rather than a hand-rolled
//! regex.

use serde::Serialize;
use validator::ValidateEmail;

use crate::core::auth::service::{LoginRequest, RegisterRequest};

/// Symbols a password must draw at least one character from
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&#";

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Required mobile number length in characters
pub const MOBILE_LENGTH: usize = 10;

/// A single validation violation: which field failed and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Check email syntax.
///
/// Shared by the validation rules and by the services' secondary email
/// check.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Validate a registration request, returning every violation in rule order.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if !is_valid_email(&request.email) {
        errors.push(FieldError::new("email", "Enter a valid email"));
    }

    // Each password rule reports independently, so a weak password lists
    // everything it is missing.
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }
    if !request.password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !request.password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !request.password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one digit",
        ));
    }
    if !request.password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one special character",
        ));
    }

    if request.country_code.trim().is_empty() {
        errors.push(FieldError::new("countryCode", "Country code is required"));
    }

    if request.mobile.chars().count() != MOBILE_LENGTH {
        errors.push(FieldError::new(
            "mobile",
            "Enter a valid 10-digit mobile number",
        ));
    }

    if request.address.street.trim().is_empty() {
        errors.push(FieldError::new(
            "address.street",
            "Street address is required",
        ));
    }
    if request.address.city.trim().is_empty() {
        errors.push(FieldError::new("address.city", "City is required"));
    }
    if request.address.state.trim().is_empty() {
        errors.push(FieldError::new("address.state", "State is required"));
    }
    if request.address.country.trim().is_empty() {
        errors.push(FieldError::new("address.country", "Country is required"));
    }
    if request.address.zip_code.trim().is_empty() {
        errors.push(FieldError::new("address.zipCode", "ZipCode is required"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a login request: email syntax and a non-empty password.
pub fn validate_login(request: &LoginRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_valid_email(&request.email) {
        errors.push(FieldError::new("email", "Enter a valid email"));
    }

    if request.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
