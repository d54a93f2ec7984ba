//! `mailto:` handoff for the selected draft

use leadgen_types::EmailDraft;

/// Build a `mailto:` URI with percent-encoded subject and body
pub fn compose_mailto(recipient: &str, draft: &EmailDraft) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&draft.subject),
        urlencoding::encode(&draft.body)
    )
}
