//! Error types for the lead machine

use thiserror::Error;

/// Failures of the email generation call.
///
/// The display text is the message shown to the user; the underlying cause
/// is logged where the failure is detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("AI did not return the expected email format.")]
    MalformedResponse,

    #[error("Failed to generate emails. The AI may be experiencing issues.")]
    ServiceUnavailable,
}

/// Failures of the webhook forwarder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Please provide a Make.com webhook URL.")]
    MissingUrl,

    #[error("Webhook failed with status: {0}")]
    HttpStatus(u16),

    #[error("Failed to send data to webhook.")]
    Network(String),
}

/// Main error type for all lead machine operations
#[derive(Error, Debug)]
pub enum LeadGenError {
    #[error("You are out of credits. Please subscribe to generate more emails.")]
    CreditExhausted,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Credit storage error: {0}")]
    Storage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for lead machine operations
pub type Result<T> = std::result::Result<T, LeadGenError>;
