//! Outreach email generation: prompt building and response validation

use crate::clients::StructuredGenerator;
use crate::constants::EXPECTED_DRAFT_COUNT;
use crate::error::GenerationError;
use crate::workflow::traits::EmailGeneration;
use async_trait::async_trait;
use leadgen_types::{EmailDraft, Lead};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct EmailGenerator {
    generator: Arc<dyn StructuredGenerator>,
}

impl EmailGenerator {
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self { generator }
    }

    /// Schema the model output is constrained to
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "emails": {
                    "type": "ARRAY",
                    "description": "An array of 3 distinct, personalized outreach emails.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "subject": {
                                "type": "STRING",
                                "description": "The subject line of the email."
                            },
                            "body": {
                                "type": "STRING",
                                "description": "The body content of the email."
                            }
                        },
                        "required": ["subject", "body"]
                    }
                }
            }
        })
    }

    pub fn build_prompt(lead: &Lead) -> String {
        format!(
            "You are an elite sales development representative known for crafting hyper-personalized B2B cold outreach that gets replies.\n\
            Your task is to write exactly {count} distinct, compelling, and concise outreach emails for the following lead. Your goal is to book a meeting.\n\
            \n\
            **Lead Information:**\n\
            - Company Name: {company}\n\
            - Contact Name: {contact}\n\
            - Contact Email: {email}\n\
            - Website: {website}\n\
            - Industry/Niche: {niche}\n\
            \n\
            **Instructions for Hyper-Personalization:**\n\
            1. **Analyze the Lead:** Scrutinize the lead's company name, website, and niche to infer their business model, target audience, and potential challenges.\n\
            2. **Create Specific Hooks:** For each email, create a unique and highly specific opening line. Do NOT use generic phrases like \"Hope you're having a good week.\"\n\
               - **Idea 1 (Industry Trend):** Reference a recent trend or statistic in the lead's niche ('{niche}') and connect it to a potential opportunity for them.\n\
               - **Idea 2 (Website Observation):** Act as if you've visited their website ({website}). Mention something specific you (hypothetically) found impressive, like a case study, a recent blog post title, or their company mission.\n\
               - **Idea 3 (Problem-Solving Angle):** Identify a common pain point for businesses like theirs and hint at a solution.\n\
            3. **Value Proposition:** Clearly and concisely state the value you can provide.\n\
            4. **Call-to-Action:** Each email must have a clear, low-friction call-to-action (e.g., \"Would you be open to a brief 15-minute call next week to explore this?\").\n\
            \n\
            **Output Format:**\n\
            - Structure your response as a JSON object with a single key \"emails\".\n\
            - The value of \"emails\" must be an array of {count} JSON objects.\n\
            - Each object must have two keys: \"subject\" (string, make this catchy and personalized) and \"body\" (string).",
            count = EXPECTED_DRAFT_COUNT,
            company = lead.company_name,
            contact = lead.contact_name,
            email = lead.contact_email,
            website = lead.website,
            niche = lead.niche,
        )
    }

    /// Validate the model output into drafts.
    ///
    /// At least one draft is required; every element needs string `subject`
    /// and `body` fields.
    pub fn parse_drafts(text: &str) -> std::result::Result<Vec<EmailDraft>, GenerationError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            log::error!("Generated content is not JSON: {}", e);
            GenerationError::MalformedResponse
        })?;

        let emails = match value.get("emails") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            Some(Value::Array(_)) => {
                log::error!("Generated content has an empty emails array");
                return Err(GenerationError::MalformedResponse);
            }
            Some(_) => {
                log::error!("Generated emails field is not an array");
                return Err(GenerationError::MalformedResponse);
            }
            None => {
                log::error!("Generated content has no emails field");
                return Err(GenerationError::MalformedResponse);
            }
        };

        let drafts = emails
            .iter()
            .map(|item| serde_json::from_value::<EmailDraft>(item.clone()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                log::error!("Generated email is missing subject or body: {}", e);
                GenerationError::MalformedResponse
            })?;

        if drafts.len() != EXPECTED_DRAFT_COUNT {
            log::warn!(
                "Expected {} drafts, accepting {}",
                EXPECTED_DRAFT_COUNT,
                drafts.len()
            );
        }

        Ok(drafts)
    }
}

#[async_trait]
impl EmailGeneration for EmailGenerator {
    async fn generate(&self, lead: &Lead) -> std::result::Result<Vec<EmailDraft>, GenerationError> {
        log::info!("Generating outreach emails for {}", lead.company_name);

        let prompt = Self::build_prompt(lead);
        let schema = Self::response_schema();

        let text = self
            .generator
            .generate_structured(&prompt, &schema)
            .await
            .map_err(|e| {
                log::error!("Error generating lead emails: {}", e);
                GenerationError::ServiceUnavailable
            })?;

        let drafts = Self::parse_drafts(&text)?;
        log::info!("Generated {} drafts for {}", drafts.len(), lead.company_name);
        Ok(drafts)
    }
}
