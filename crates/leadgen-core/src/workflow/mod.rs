//! Application orchestration

pub mod orchestrator;
pub mod traits;

pub use orchestrator::LeadOrchestrator;
pub use traits::EmailGeneration;
