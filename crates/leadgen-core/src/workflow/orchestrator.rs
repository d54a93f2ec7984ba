//! Lead orchestrator: owns the application state and sequences the
//! credit check, generation call and webhook delivery.

use super::traits::EmailGeneration;
use crate::clients::WebhookForwarder;
use crate::constants::{subscription_message, WEBHOOK_SUCCESS_MESSAGE};
use crate::error::{LeadGenError, Result, WebhookError};
use crate::services::credit_ledger::CreditLedger;
use crate::services::credit_store::CreditStore;
use crate::services::mailto::compose_mailto;
use leadgen_types::{ActivityFlags, EmailDraft, Lead, LeadField, Notice};
use std::sync::Arc;

/// Single owner of lead, drafts, credits and transient UI state.
///
/// Handlers take `&mut self`, so each runs to completion around its one
/// awaited call and the flags are always reset before returning.
pub struct LeadOrchestrator<S: CreditStore> {
    lead: Lead,
    emails: Vec<EmailDraft>,
    active_draft: usize,
    webhook_url: String,
    ledger: CreditLedger<S>,
    activity: ActivityFlags,
    notice: Option<Notice>,
    generator: Arc<dyn EmailGeneration>,
    forwarder: Arc<dyn WebhookForwarder>,
}

impl<S: CreditStore> LeadOrchestrator<S> {
    pub fn new(
        ledger: CreditLedger<S>,
        generator: Arc<dyn EmailGeneration>,
        forwarder: Arc<dyn WebhookForwarder>,
    ) -> Self {
        Self {
            lead: Lead::default(),
            emails: Vec::new(),
            active_draft: 0,
            webhook_url: String::new(),
            ledger,
            activity: ActivityFlags::default(),
            notice: None,
            generator,
            forwarder,
        }
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    pub fn set_lead(&mut self, lead: Lead) {
        self.lead = lead;
    }

    pub fn set_lead_field(&mut self, field: LeadField, value: impl Into<String>) {
        self.lead.set(field, value);
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn set_webhook_url(&mut self, url: impl Into<String>) {
        self.webhook_url = url.into();
    }

    pub fn emails(&self) -> &[EmailDraft] {
        &self.emails
    }

    pub fn credits(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn ledger(&self) -> &CreditLedger<S> {
        &self.ledger
    }

    pub fn activity(&self) -> ActivityFlags {
        self.activity
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error(msg)) => Some(msg),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Success(msg)) => Some(msg),
            _ => None,
        }
    }

    fn clear_messages(&mut self) {
        self.notice = None;
    }

    fn fail(&mut self, error: &LeadGenError) {
        self.notice = Some(Notice::Error(error.to_string()));
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    /// Generate a fresh set of drafts for the current lead.
    ///
    /// Blocked without an external call when no credits remain. One credit
    /// is spent only after the drafts have been stored.
    pub async fn on_generate(&mut self) -> Result<()> {
        if !self.ledger.has_credits() {
            log::warn!("Generation blocked: no credits left");
            let error = LeadGenError::CreditExhausted;
            self.fail(&error);
            return Err(error);
        }

        self.activity.generating = true;
        self.clear_messages();
        self.emails.clear();
        self.active_draft = 0;

        let generator = Arc::clone(&self.generator);
        let result = generator.generate(&self.lead).await;
        let outcome = match result {
            Ok(drafts) => {
                self.emails = drafts;
                match self.ledger.try_consume() {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        log::error!("Failed to persist credit balance: {}", e);
                        self.fail(&e);
                        Err(e)
                    }
                }
            }
            Err(e) => {
                let error = LeadGenError::from(e);
                self.fail(&error);
                Err(error)
            }
        };

        self.activity.generating = false;
        outcome
    }

    /// Reset credits to the replenishment constant
    pub fn on_subscribe(&mut self) -> Result<u32> {
        self.clear_messages();

        match self.ledger.replenish() {
            Ok(balance) => {
                self.succeed(subscription_message(balance));
                Ok(balance)
            }
            Err(e) => {
                log::error!("Failed to persist replenished credits: {}", e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Forward the current lead and drafts to the configured webhook
    pub async fn on_send_to_make(&mut self) -> Result<()> {
        if self.webhook_url.is_empty() {
            let error = LeadGenError::from(WebhookError::MissingUrl);
            self.fail(&error);
            return Err(error);
        }

        self.activity.sending = true;
        self.clear_messages();

        let forwarder = Arc::clone(&self.forwarder);
        let result = forwarder
            .send(&self.webhook_url, &self.lead, &self.emails)
            .await;
        let outcome = match result {
            Ok(()) => {
                self.succeed(WEBHOOK_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(e) => {
                let error = LeadGenError::from(e);
                self.fail(&error);
                Err(error)
            }
        };

        self.activity.sending = false;
        outcome
    }

    pub fn active_draft_index(&self) -> usize {
        self.active_draft
    }

    pub fn active_draft(&self) -> Option<&EmailDraft> {
        self.emails.get(self.active_draft)
    }

    pub fn select_draft(&mut self, index: usize) -> Result<()> {
        if index >= self.emails.len() {
            return Err(LeadGenError::Validation(format!(
                "Draft {} does not exist ({} available)",
                index + 1,
                self.emails.len()
            )));
        }
        self.active_draft = index;
        Ok(())
    }

    /// `mailto:` URI for the active draft, addressed to the lead's contact
    pub fn mailto_for_active(&self) -> Option<String> {
        if self.lead.contact_email.is_empty() {
            return None;
        }
        self.active_draft()
            .map(|draft| compose_mailto(&self.lead.contact_email, draft))
    }
}
