//! Contact form field validation
//!
//! Rules mirror the public form exactly: the site's client-side checks are
//! advisory only, this module is the authority. Validation fails fast on
//! the first violated rule and that single message is what the caller sees;
//! a public contact form does not need aggregated field errors.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ServiceType, SubmissionRequest, ValidatedSubmission};

lazy_static! {
    static ref NAME: Regex = Regex::new(r"^[A-Za-z\s]+$").unwrap();
}

/// Validate a name field. Returns the trimmed value.
pub fn validate_name(raw: &str, label: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{label} is required"));
    }
    if !NAME.is_match(trimmed) {
        return Err(format!("{label} can only contain letters and spaces"));
    }
    let len = trimmed.chars().count();
    if !(2..=50).contains(&len) {
        return Err(format!("{label} must be between 2 and 50 characters"));
    }
    Ok(trimmed.to_string())
}

/// Normalize a phone number to digits and check it resolves to an Indian
/// mobile number: 10 digits, or 12 digits where the last 10 are the
/// subscriber number behind a 2-digit country prefix. The prefix itself is
/// deliberately not checked against "91"; tightening that would reject
/// numbers the live form has always accepted.
pub fn normalize_phone(raw: &str) -> Result<String, String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err("Phone number is required".to_string());
    }
    let subscriber = match digits.len() {
        10 => &digits[..],
        12 => &digits[2..],
        _ => return Err("Please enter a valid phone number".to_string()),
    };
    // Indian mobile subscriber numbers start with 6-9.
    if !matches!(subscriber.as_bytes()[0], b'6'..=b'9') {
        return Err("Please enter a valid Indian mobile number".to_string());
    }
    Ok(digits)
}

/// Parse the requested service against the closed catalog.
pub fn parse_service_type(raw: &str) -> Result<ServiceType, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Please select a service type".to_string());
    }
    trimmed
        .parse()
        .map_err(|_| "Please select a valid service type".to_string())
}

/// Validate the free-text message. Returns the trimmed value.
pub fn validate_message(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(10..=1000).contains(&len) {
        return Err("Message must be between 10 and 1000 characters".to_string());
    }
    // Length alone is gameable with interior whitespace padding.
    let substantive = trimmed.chars().filter(|c| !c.is_whitespace()).count();
    if substantive < 10 {
        return Err("Message must contain at least 10 characters of text".to_string());
    }
    Ok(trimmed.to_string())
}

/// Validate an email address. Returns the trimmed, lower-cased value.
pub fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if !email_address::EmailAddress::is_valid(&email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(email)
}

/// Run every field rule over a raw submission, failing on the first
/// violation. The returned record upholds the [`ValidatedSubmission`]
/// invariant: downstream code never re-validates.
pub fn validate_submission(raw: &SubmissionRequest) -> Result<ValidatedSubmission, String> {
    let first_name = validate_name(&raw.first_name, "First name")?;
    let last_name = validate_name(&raw.last_name, "Last name")?;
    let phone = normalize_phone(&raw.phone)?;
    let service_type = parse_service_type(&raw.service_type)?;
    let message = validate_message(raw.message.as_deref().unwrap_or(""))?;
    let email = match raw.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => Some(normalize_email(e)?),
        _ => None,
    };

    Ok(ValidatedSubmission {
        first_name,
        last_name,
        email,
        phone,
        service_type,
        message,
    })
}
