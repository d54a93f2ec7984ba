//! Form-boundary validation of lead fields

use crate::error::{LeadGenError, Result};
use leadgen_types::{Lead, LeadField};
use once_cell::sync::Lazy;
use regex::Regex;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

// local@domain.tld, no whitespace anywhere
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("Failed to compile email regex")
});

/// Check the contact email shape only
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Reject a lead with any empty field or a malformed contact email
pub fn validate_lead(lead: &Lead) -> Result<()> {
    for field in LeadField::ALL {
        if lead.get(field).trim().is_empty() {
            return Err(LeadGenError::Validation(format!("{} is required", field)));
        }
    }

    if !is_valid_email(&lead.contact_email) {
        return Err(LeadGenError::Validation(INVALID_EMAIL_MESSAGE.to_string()));
    }

    Ok(())
}
