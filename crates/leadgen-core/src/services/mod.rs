//! Service modules for business logic

pub mod credit_ledger;
pub mod credit_store;
pub mod email_generator;
pub mod lead_validator;
pub mod mailto;

// Re-export service types
pub use credit_ledger::CreditLedger;
pub use credit_store::{CreditStore, FileCreditStore, MemoryCreditStore};
pub use email_generator::EmailGenerator;
pub use lead_validator::validate_lead;
pub use mailto::compose_mailto;
