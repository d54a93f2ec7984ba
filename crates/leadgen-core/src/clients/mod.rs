//! Client modules for external services

pub mod gemini;
pub mod webhook;

// Re-export all client types
pub use gemini::{GeminiClient, StructuredGenerator};
pub use webhook::{WebhookClient, WebhookForwarder};
