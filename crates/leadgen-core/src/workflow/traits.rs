//! Seams between the orchestrator and its collaborators

use crate::error::GenerationError;
use async_trait::async_trait;
use leadgen_types::{EmailDraft, Lead};

/// Produces outreach drafts for a lead.
///
/// All-or-nothing per call: either the validated drafts or a single
/// user-facing failure. Implementations must not touch the credit ledger.
#[async_trait]
pub trait EmailGeneration: Send + Sync {
    async fn generate(&self, lead: &Lead) -> Result<Vec<EmailDraft>, GenerationError>;
}
