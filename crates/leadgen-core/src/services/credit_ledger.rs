//! Client-side rate limiting: a persisted balance of allowed generations

use super::credit_store::CreditStore;
use crate::constants::REPLENISH_CREDITS;
use crate::error::Result;

/// Non-negative credit balance, persisted after every mutation
pub struct CreditLedger<S: CreditStore> {
    store: S,
    balance: u32,
}

impl<S: CreditStore> CreditLedger<S> {
    /// Load the stored balance, seeding the store with the replenishment
    /// constant when nothing usable was stored.
    pub fn open(store: S) -> Result<Self> {
        let balance = match store.load()? {
            Some(balance) => balance,
            None => {
                log::info!("No stored credits, starting with {}", REPLENISH_CREDITS);
                store.save(REPLENISH_CREDITS)?;
                REPLENISH_CREDITS
            }
        };

        Ok(Self { store, balance })
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn has_credits(&self) -> bool {
        self.balance > 0
    }

    /// Spend one credit. Returns `Ok(false)` without touching the store
    /// when the balance is already zero.
    ///
    /// The in-memory balance is decremented even if persisting fails.
    pub fn try_consume(&mut self) -> Result<bool> {
        if self.balance == 0 {
            return Ok(false);
        }

        self.balance -= 1;
        self.store.save(self.balance)?;
        log::info!("Consumed one credit, {} remaining", self.balance);
        Ok(true)
    }

    /// Reset (not add) the balance to the replenishment constant
    pub fn replenish(&mut self) -> Result<u32> {
        self.balance = REPLENISH_CREDITS;
        self.store.save(self.balance)?;
        log::info!("Credits replenished to {}", self.balance);
        Ok(self.balance)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credit_store::{FileCreditStore, MemoryCreditStore};
    use tempfile::TempDir;

    #[test]
    fn test_open_defaults_and_persists() {
        let ledger = CreditLedger::open(MemoryCreditStore::new()).unwrap();

        assert_eq!(ledger.balance(), REPLENISH_CREDITS);
        assert_eq!(ledger.store().stored(), Some(REPLENISH_CREDITS));
    }

    #[test]
    fn test_open_keeps_stored_zero() {
        let ledger = CreditLedger::open(MemoryCreditStore::with_balance(0)).unwrap();
        assert_eq!(ledger.balance(), 0);
        assert!(!ledger.has_credits());
    }

    #[test]
    fn test_try_consume_decrements_positive_balances() {
        for start in 1..=6 {
            let mut ledger = CreditLedger::open(MemoryCreditStore::with_balance(start)).unwrap();

            assert!(ledger.try_consume().unwrap());
            assert_eq!(ledger.balance(), start - 1);
            assert_eq!(ledger.store().stored(), Some(start - 1));
        }
    }

    #[test]
    fn test_try_consume_at_zero_has_no_effect() {
        let mut ledger = CreditLedger::open(MemoryCreditStore::with_balance(0)).unwrap();

        assert!(!ledger.try_consume().unwrap());
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.store().stored(), Some(0));
    }

    #[test]
    fn test_replenish_resets_regardless_of_balance() {
        for start in [0, 2, 4, 9] {
            let mut ledger = CreditLedger::open(MemoryCreditStore::with_balance(start)).unwrap();

            assert_eq!(ledger.replenish().unwrap(), 4);
            assert_eq!(ledger.balance(), 4);
            assert_eq!(ledger.store().stored(), Some(4));
        }
    }

    #[test]
    fn test_balance_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credits.json");

        {
            let mut ledger = CreditLedger::open(FileCreditStore::new(&path)).unwrap();
            ledger.try_consume().unwrap();
            ledger.try_consume().unwrap();
        }

        let ledger = CreditLedger::open(FileCreditStore::new(&path)).unwrap();
        assert_eq!(ledger.balance(), 2);
    }
}
