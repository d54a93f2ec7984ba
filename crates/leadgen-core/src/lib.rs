//! Lead Machine Core Library
//!
//! Collects a sales lead, asks a generative model for personalized outreach
//! emails, and optionally forwards the result to an automation webhook.
//! Generation is rate limited by a persisted credit balance.

pub mod config;
pub mod clients;
pub mod constants;
pub mod services;
pub mod workflow;
pub mod error;
pub mod paths;

// Re-export main types for easy access
pub use config::LeadGenConfig;
pub use error::{GenerationError, LeadGenError, Result, WebhookError};
pub use leadgen_types::{ActivityFlags, EmailDraft, Lead, LeadField, Notice};

// Re-export all client types
pub use clients::{
    GeminiClient,
    StructuredGenerator,
    WebhookClient,
    WebhookForwarder,
};

// Re-export service types
pub use services::{
    CreditLedger,
    CreditStore,
    EmailGenerator,
    FileCreditStore,
    MemoryCreditStore,
};

// Re-export workflow types
pub use workflow::{EmailGeneration, LeadOrchestrator};
