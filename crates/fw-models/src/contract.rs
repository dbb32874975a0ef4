//! Registration contract
//!
//! Cross-field validation for new accounts, applied once at creation.

use chrono::NaiveDate;
use fw_core::error::ValidationErrors;
use regex::Regex;
use std::sync::LazyLock;

use crate::user::NewUser;

/// Valid email pattern
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Contact numbers are 10 or 11 digits
static CONTACT_NO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10,11}$").unwrap());

/// Contract for self-registration input
pub struct RegistrationContract;

impl RegistrationContract {
    pub fn new() -> Self {
        Self
    }

    /// Validate registration input against `today` (the caller's clock).
    pub fn validate(&self, input: &NewUser, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.validate_name("first_name", &input.first_name, &mut errors);
        self.validate_name("last_name", &input.last_name, &mut errors);
        self.validate_email(input.email.as_deref(), &mut errors);
        self.validate_contact_no(input.contact_no.as_deref(), &mut errors);
        self.validate_reachability(input, &mut errors);
        self.validate_birthdate(input.birthdate, today, &mut errors);
        self.validate_role(input, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_name(&self, field: &str, value: &str, errors: &mut ValidationErrors) {
        if value.trim().is_empty() {
            errors.add(field, "can't be blank");
        } else if value.len() > 255 {
            errors.add(field, "is too long (maximum is 255 characters)");
        }
    }

    fn validate_email(&self, email: Option<&str>, errors: &mut ValidationErrors) {
        if let Some(email) = email {
            if !EMAIL_PATTERN.is_match(email) {
                errors.add("email", "is not a valid email address");
            }
        }
    }

    fn validate_contact_no(&self, contact_no: Option<&str>, errors: &mut ValidationErrors) {
        if let Some(contact_no) = contact_no {
            if !CONTACT_NO_PATTERN.is_match(contact_no) {
                errors.add("contact_no", "must be 10 or 11 digits");
            }
        }
    }

    /// At least one of email / contact number must be supplied.
    fn validate_reachability(&self, input: &NewUser, errors: &mut ValidationErrors) {
        if input.email.is_none() && input.contact_no.is_none() {
            errors.add_base("either an email address or a contact number is required");
        }
    }

    fn validate_birthdate(
        &self,
        birthdate: NaiveDate,
        today: NaiveDate,
        errors: &mut ValidationErrors,
    ) {
        if birthdate >= today {
            errors.add("birthdate", "must be in the past");
        }
    }

    fn validate_role(&self, input: &NewUser, errors: &mut ValidationErrors) {
        if !input.role.registrable() {
            errors.add("role", "Invalid role selected.");
        }
    }
}

impl Default for RegistrationContract {
    fn default() -> Self {
        Self::new()
    }
}
