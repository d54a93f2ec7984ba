//! Persistence for the credit balance

use crate::constants::CREDITS_STORAGE_KEY;
use crate::error::{LeadGenError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage backend for the credit balance.
///
/// `load` returns `Ok(None)` when nothing usable has been stored yet.
pub trait CreditStore: Send + Sync {
    fn load(&self) -> Result<Option<u32>>;

    fn save(&self, balance: u32) -> Result<()>;
}

/// On-disk representation, keyed by the fixed storage identifier
#[derive(Debug, Serialize, Deserialize)]
struct CreditFile {
    #[serde(rename = "aiLeadMachineCredits")]
    credits: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// JSON file store, replaced atomically on every save
pub struct FileCreditStore {
    path: PathBuf,
}

impl FileCreditStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept whole numbers, or numeric strings as older files stored them
    fn parse_balance(value: &serde_json::Value) -> Option<u32> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        }
    }
}

impl CreditStore for FileCreditStore {
    fn load(&self) -> Result<Option<u32>> {
        if !self.path.exists() {
            log::debug!("No credit file at {}", self.path.display());
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(|e| {
            LeadGenError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let file: CreditFile = match serde_json::from_str(&json) {
            Ok(file) => file,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable credit file {}: {}",
                    self.path.display(),
                    e
                );
                return Ok(None);
            }
        };

        let balance = file.credits.as_ref().and_then(Self::parse_balance);
        if balance.is_none() && file.credits.is_some() {
            log::warn!(
                "Ignoring invalid {} value in {}",
                CREDITS_STORAGE_KEY,
                self.path.display()
            );
        }

        Ok(balance)
    }

    fn save(&self, balance: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LeadGenError::Storage(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = CreditFile {
            credits: Some(serde_json::Value::from(balance)),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| LeadGenError::Storage(format!("Failed to serialize credits: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            LeadGenError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            LeadGenError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        log::debug!("Persisted {} credits to {}", balance, self.path.display());
        Ok(())
    }
}

/// In-memory store, mostly for tests and dry runs
#[derive(Default)]
pub struct MemoryCreditStore {
    value: Mutex<Option<u32>>,
}

impl MemoryCreditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: u32) -> Self {
        Self {
            value: Mutex::new(Some(balance)),
        }
    }

    /// Last saved value
    pub fn stored(&self) -> Option<u32> {
        self.value.lock().ok().and_then(|guard| *guard)
    }
}

impl CreditStore for MemoryCreditStore {
    fn load(&self) -> Result<Option<u32>> {
        self.value
            .lock()
            .map(|guard| *guard)
            .map_err(|_| LeadGenError::Storage("Credit store lock poisoned".to_string()))
    }

    fn save(&self, balance: u32) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| LeadGenError::Storage("Credit store lock poisoned".to_string()))?;
        *guard = Some(balance);
        Ok(())
    }
}
