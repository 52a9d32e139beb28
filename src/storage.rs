// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::db::KeyValueStore;
use crate::error::LedgerError;
use crate::models::{NewTransaction, Settings, Transaction, TransactionId, TransactionPatch};

pub const TRANSACTIONS_KEY: &str = "@ExpenseTracker:transactions";
pub const SETTINGS_KEY: &str = "@ExpenseTracker:settings";

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp id, strictly increasing within the process.
/// `None` once the numeric id space is used up.
pub(crate) fn next_id(now_ms: i64) -> Option<i64> {
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now_ms.max(prev.checked_add(1)?);
        match LAST_ID.compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::Relaxed)
        {
            Ok(_) => return Some(candidate),
            Err(actual) => prev = actual,
        }
    }
}

/// Picks an id above every numeric id already stored. Ids from an earlier run may be ahead of
/// this process's clock; if they sit at `i64::MAX` a non-numeric `<millis>-<seq>` id is used.
fn assign_id(existing: &[Transaction], now_ms: i64) -> TransactionId {
    let floor = match existing
        .iter()
        .filter_map(|t| t.id.as_str().parse::<i64>().ok())
        .max()
    {
        Some(max_existing) => max_existing.checked_add(1).map(|n| n.max(now_ms)),
        None => Some(now_ms),
    };
    if let Some(id) = floor.and_then(next_id) {
        return TransactionId::new(id.to_string());
    }

    warn!("Numeric transaction ids exhausted, falling back to sequenced ids");
    let mut seq: u64 = 0;
    loop {
        let candidate = format!("{}-{}", now_ms, seq);
        if existing.iter().all(|t| t.id.as_str() != candidate) {
            return TransactionId::new(candidate);
        }
        seq += 1;
    }
}

/// Transaction ledger and settings persisted as JSON blobs in a key-value store.
///
/// Every mutation is a full read-modify-write of the collection, serialized on `write_lock`.
pub struct LedgerStore<S: KeyValueStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> LedgerStore<S> {
    pub fn new(store: S) -> Self {
        LedgerStore {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, LedgerError> {
        let raw = self
            .store
            .get(key)
            .map_err(|source| LedgerError::Read { key, source })?;
        match raw {
            Some(s) => serde_json::from_str(&s)
                .map(Some)
                .map_err(|source| LedgerError::Corrupt { key, source }),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), LedgerError> {
        let s = serde_json::to_string(value)
            .map_err(|source| LedgerError::Serialize { key, source })?;
        self.store
            .set(key, &s)
            .map_err(|source| LedgerError::Write { key, source })
    }

    /// Read for a read-modify-write: unreadable data is an error so it never gets overwritten.
    fn load_for_write(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .read_json::<Vec<Transaction>>(TRANSACTIONS_KEY)?
            .unwrap_or_default())
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        match self.read_json::<Vec<Transaction>>(TRANSACTIONS_KEY) {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Error loading transactions, using an empty ledger");
                Vec::new()
            }
        }
    }

    /// Whole ledger, newest insertion first. Never fails: unreadable data yields an empty list.
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.load_transactions()
    }

    pub fn save_transaction(&self, new: NewTransaction) -> Result<Transaction, LedgerError> {
        let _guard = self.lock();
        let mut transactions = self.load_for_write()?;

        let created_at = Utc::now();
        let transaction = Transaction {
            id: assign_id(&transactions, created_at.timestamp_millis()),
            r#type: new.r#type,
            amount: new.amount,
            description: new.description,
            category: new.category,
            date: new.date,
            created_at,
        };
        transactions.insert(0, transaction.clone());
        self.write_json(TRANSACTIONS_KEY, &transactions)?;
        debug!(id = %transaction.id, count = transactions.len(), "Saved transaction");
        Ok(transaction)
    }

    pub fn update_transaction(
        &self,
        id: &TransactionId,
        patch: TransactionPatch,
    ) -> Result<Transaction, LedgerError> {
        let _guard = self.lock();
        let mut transactions = self.load_for_write()?;
        let existing = transactions
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        existing.apply(patch);
        let updated = existing.clone();
        self.write_json(TRANSACTIONS_KEY, &transactions)?;
        debug!(id = %updated.id, "Updated transaction");
        Ok(updated)
    }

    /// Like [`update_transaction`](Self::update_transaction) but from a raw JSON object.
    /// Payloads touching `id` or `createdAt` are rejected rather than ignored.
    pub fn update_transaction_json(
        &self,
        id: &TransactionId,
        updates: &serde_json::Value,
    ) -> Result<Transaction, LedgerError> {
        self.update_transaction(id, TransactionPatch::from_json(updates)?)
    }

    /// Idempotent. Returns `false` when the ledger could not be read back or written.
    pub fn delete_transaction(&self, id: &TransactionId) -> bool {
        let _guard = self.lock();
        let mut transactions = match self.load_for_write() {
            Ok(v) => v,
            Err(e) => {
                error!(%id, error = %e, "Error deleting transaction");
                return false;
            }
        };
        let before = transactions.len();
        transactions.retain(|t| &t.id != id);
        match self.write_json(TRANSACTIONS_KEY, &transactions) {
            Ok(()) => {
                debug!(%id, removed = before - transactions.len(), "Deleted transaction");
                true
            }
            Err(e) => {
                error!(%id, error = %e, "Error deleting transaction");
                false
            }
        }
    }

    pub fn get_settings(&self) -> Settings {
        match self.read_json::<Settings>(SETTINGS_KEY) {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Error loading settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: Settings) -> Result<Settings, LedgerError> {
        let _guard = self.lock();
        self.write_json(SETTINGS_KEY, &settings)?;
        debug!(language = settings.language.code(), currency = %settings.currency, "Saved settings");
        Ok(settings)
    }

    pub fn clear_all(&self) -> bool {
        let _guard = self.lock();
        match self.store.multi_remove(&[TRANSACTIONS_KEY, SETTINGS_KEY]) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error clearing data");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_even_when_clock_stalls() {
        let a = next_id(1_000).unwrap();
        let b = next_id(1_000).unwrap();
        let c = next_id(5).unwrap();
        assert!(b > a);
        assert!(c > b);
    }
}
