/// Lead machine constants

/// Balance a subscription resets to, and the balance of a fresh install
pub const REPLENISH_CREDITS: u32 = 4;

/// Key the credit balance is stored under
pub const CREDITS_STORAGE_KEY: &str = "aiLeadMachineCredits";

/// Number of drafts the prompt asks for. Responses with fewer are still accepted.
pub const EXPECTED_DRAFT_COUNT: usize = 3;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const WEBHOOK_SUCCESS_MESSAGE: &str = "Successfully sent data to Make.com!";

pub fn subscription_message(credits: u32) -> String {
    format!(
        "Subscription successful! You have been given {} new credits.",
        credits
    )
}
