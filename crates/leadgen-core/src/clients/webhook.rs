//! Webhook forwarder for automation platforms such as Make.com

use crate::error::{Result, WebhookError};
use async_trait::async_trait;
use leadgen_types::{EmailDraft, Lead, WebhookPayload};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;

/// One-shot delivery of a lead and its drafts to a user-supplied URL
#[async_trait]
pub trait WebhookForwarder: Send + Sync {
    async fn send(
        &self,
        url: &str,
        lead: &Lead,
        emails: &[EmailDraft],
    ) -> std::result::Result<(), WebhookError>;
}

pub struct WebhookClient {
    http_client: HttpClient,
}

impl WebhookClient {
    pub fn new() -> Result<Self> {
        let http_client = HttpClient::builder().build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl WebhookForwarder for WebhookClient {
    async fn send(
        &self,
        url: &str,
        lead: &Lead,
        emails: &[EmailDraft],
    ) -> std::result::Result<(), WebhookError> {
        if url.is_empty() {
            return Err(WebhookError::MissingUrl);
        }

        let payload = WebhookPayload { lead, emails };
        log::debug!("Posting lead and {} drafts to webhook", emails.len());

        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Webhook request failed: {}", e);
                WebhookError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Webhook responded with {}", status);
            return Err(WebhookError::HttpStatus(status.as_u16()));
        }

        log::info!("Webhook accepted payload with status {}", status);
        Ok(())
    }
}
