//! Shared types for the lead machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// A prospective business contact used to personalize outreach
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub website: String,
    pub niche: String,
}

/// Addressable lead fields, used for field-by-field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    CompanyName,
    ContactName,
    ContactEmail,
    Website,
    Niche,
}

impl LeadField {
    /// All fields in form order
    pub const ALL: [LeadField; 5] = [
        LeadField::CompanyName,
        LeadField::ContactName,
        LeadField::ContactEmail,
        LeadField::Website,
        LeadField::Niche,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::CompanyName => "Company Name",
            LeadField::ContactName => "Contact Name",
            LeadField::ContactEmail => "Contact Email",
            LeadField::Website => "Website",
            LeadField::Niche => "Industry/Niche",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Lead {
    pub fn new(
        company_name: impl Into<String>,
        contact_name: impl Into<String>,
        contact_email: impl Into<String>,
        website: impl Into<String>,
        niche: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            contact_name: contact_name.into(),
            contact_email: contact_email.into(),
            website: website.into(),
            niche: niche.into(),
        }
    }

    /// Replace a single field
    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::CompanyName => self.company_name = value,
            LeadField::ContactName => self.contact_name = value,
            LeadField::ContactEmail => self.contact_email = value,
            LeadField::Website => self.website = value,
            LeadField::Niche => self.niche = value,
        }
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::CompanyName => &self.company_name,
            LeadField::ContactName => &self.contact_name,
            LeadField::ContactEmail => &self.contact_email,
            LeadField::Website => &self.website,
            LeadField::Niche => &self.niche,
        }
    }
}

/// One generated subject/body pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Body posted to the automation webhook
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload<'a> {
    pub lead: &'a Lead,
    pub emails: &'a [EmailDraft],
}

/// In-flight operations; generating and sending are tracked independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFlags {
    pub generating: bool,
    pub sending: bool,
}

impl ActivityFlags {
    pub fn is_idle(&self) -> bool {
        !self.generating && !self.sending
    }
}

/// The single error or success message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(msg) | Notice::Success(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_serializes_with_camel_case_keys() {
        let lead = Lead::new("Acme Inc.", "John Doe", "john@acme.com", "https://acme.com", "B2B SaaS");
        let value = serde_json::to_value(&lead).unwrap();

        assert_eq!(value["companyName"], "Acme Inc.");
        assert_eq!(value["contactName"], "John Doe");
        assert_eq!(value["contactEmail"], "john@acme.com");
        assert_eq!(value["website"], "https://acme.com");
        assert_eq!(value["niche"], "B2B SaaS");
    }

    #[test]
    fn test_lead_field_edits() {
        let mut lead = Lead::default();
        for field in LeadField::ALL {
            lead.set(field, field.label());
        }

        assert_eq!(lead.get(LeadField::Website), "Website");
        assert_eq!(lead.company_name, "Company Name");
        assert_eq!(lead.niche, "Industry/Niche");
    }

    #[test]
    fn test_webhook_payload_shape() {
        let lead = Lead::new("Acme Inc.", "John Doe", "john@acme.com", "https://acme.com", "B2B SaaS");
        let emails = vec![EmailDraft::new("Hi", "Body")];
        let payload = WebhookPayload { lead: &lead, emails: &emails };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["lead"]["companyName"], "Acme Inc.");
        assert_eq!(value["emails"][0]["subject"], "Hi");
        assert_eq!(value["emails"][0]["body"], "Body");
    }

    #[test]
    fn test_activity_flags_idle() {
        let mut flags = ActivityFlags::default();
        assert!(flags.is_idle());
        flags.sending = true;
        assert!(!flags.is_idle());
    }
}
