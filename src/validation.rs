//! Client-side input validation
//!
//! Checks run before anything is sent to the backend, mirroring the rules of
//! the registration and member forms. The backend validates again.

use crate::client::models::MemberInput;
use crate::error::{FieldError, ValidationError};

const NAME_MAX_CHARS: usize = 25;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 12;

fn field(field: &'static str, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_string(),
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    let len = name.chars().count();
    if len == 0 {
        errors.push(field("name", "Name is required"));
    } else if len > NAME_MAX_CHARS {
        errors.push(field("name", "Name must be 25 characters or less"));
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        errors.push(field("name", "Name must not contain numbers"));
    }
}

/// Loose `local@domain.tld` shape check
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(field("email", "Email is required"));
    } else if !looks_like_email(email) {
        errors.push(field("email", "Invalid email address"));
    }
}

fn check_phone(phone: &str, errors: &mut Vec<FieldError>) {
    let len = phone.chars().count();
    if len < PHONE_MIN_DIGITS {
        errors.push(field(
            "phone_number",
            "Phone number must be at least 10 digits",
        ));
    } else if len > PHONE_MAX_DIGITS {
        errors.push(field(
            "phone_number",
            "Phone number must be 12 digits or less",
        ));
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        errors.push(field(
            "phone_number",
            "Phone number must contain only digits",
        ));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.is_empty() {
        errors.push(field("password", "Password is required"));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(errors))
    }
}

/// Validate a member record before create/update
pub fn validate_member(input: &MemberInput) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_name(&input.name, &mut errors);
    check_email(&input.email, &mut errors);
    check_phone(&input.phone_number, &mut errors);
    finish(errors)
}

/// Validate login credentials
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    finish(errors)
}

/// Validate a registration form
pub fn validate_registration(input: &MemberInput, password: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_name(&input.name, &mut errors);
    check_email(&input.email, &mut errors);
    check_phone(&input.phone_number, &mut errors);
    check_password(password, &mut errors);
    finish(errors)
}
