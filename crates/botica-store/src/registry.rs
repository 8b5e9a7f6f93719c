//! # Hold/Recall Registry
//!
//! Owns the set of suspended transactions for a terminal (or a cluster of
//! terminals sharing a backend).
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Hold / Recall Lifecycle                              │
//! │                                                                         │
//! │  Cashier Action          Registry Operation       Registry Change       │
//! │  ──────────────          ──────────────────       ───────────────       │
//! │                                                                         │
//! │  Hold (F4) ────────────► hold(snapshot, note) ──► entries.push(held)   │
//! │                                                                         │
//! │  Recall (F5) ──────────► recall(held_id) ───────► entries.remove(i)    │
//! │                          (destructive: a held transaction can be        │
//! │                           recalled exactly once)                        │
//! │                                                                         │
//! │  Delete ───────────────► delete(held_id) ───────► entries.retain(...)  │
//! │                          (idempotent: absent id is not an error)        │
//! │                                                                         │
//! │  Browse ───────────────► list() ────────────────► (snapshot copy,      │
//! │                                                    oldest first)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The registry is shared terminal-wide state. All mutations serialize on
//! one internal mutex, so two concurrent recalls of the same id cannot both
//! succeed: exactly one removes the entry, the other observes `NotFound`.

use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};

use botica_core::{CoreError, HeldTransaction, Transaction, TransactionStatus};

use crate::error::{StoreError, StoreResult};
use crate::ids::TimeIdGenerator;

/// The terminal-wide registry of suspended transactions.
#[derive(Debug)]
pub struct HoldRegistry {
    ids: TimeIdGenerator,
    entries: Mutex<Vec<HeldTransaction>>,
}

impl HoldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        HoldRegistry {
            ids: TimeIdGenerator::new("HELD"),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Suspends a transaction snapshot.
    ///
    /// Fails with [`CoreError::EmptyTransaction`] if the snapshot has no
    /// line items. The snapshot is stored verbatim (the registry owns its
    /// own deep copy, so later cart mutation cannot alter a held record)
    /// with its status moved to `Held`.
    ///
    /// Returns the generated held id.
    pub fn hold(&self, snapshot: Transaction, note: Option<String>) -> StoreResult<String> {
        if snapshot.line_items.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let mut held = HeldTransaction {
            id: self.ids.next(),
            transaction: snapshot,
            note,
            held_at: Utc::now(),
        };
        held.transaction.status = TransactionStatus::Held;

        info!(held_id = %held.id, transaction_id = %held.transaction.id, "Holding transaction");

        let mut entries = self.entries.lock().expect("hold registry mutex poisoned");
        let id = held.id.clone();
        entries.push(held);
        Ok(id)
    }

    /// Resumes a held transaction, removing it from the registry.
    ///
    /// Recall is destructive: exactly one caller may resume a given held
    /// transaction. A second recall of the same id (including the loser of
    /// a concurrent race) fails with `NotFound`.
    pub fn recall(&self, held_id: &str) -> StoreResult<HeldTransaction> {
        let mut entries = self.entries.lock().expect("hold registry mutex poisoned");

        let position = entries
            .iter()
            .position(|held| held.id == held_id)
            .ok_or_else(|| StoreError::not_found("Held transaction", held_id))?;

        let held = entries.remove(position);
        info!(held_id = %held_id, transaction_id = %held.transaction.id, "Recalled transaction");
        Ok(held)
    }

    /// Removes a held transaction without resuming it.
    ///
    /// Idempotent: deleting an absent id is not an error.
    pub fn delete(&self, held_id: &str) {
        let mut entries = self.entries.lock().expect("hold registry mutex poisoned");
        let before = entries.len();
        entries.retain(|held| held.id != held_id);
        if entries.len() < before {
            debug!(held_id = %held_id, "Deleted held transaction");
        }
    }

    /// Snapshot of the held transactions, oldest first.
    ///
    /// FIFO order lets a cashier working through overflow take the
    /// longest-waiting customer first.
    pub fn list(&self) -> Vec<HeldTransaction> {
        let entries = self.entries.lock().expect("hold registry mutex poisoned");
        let mut held: Vec<HeldTransaction> = entries.clone();
        held.sort_by(|a, b| a.held_at.cmp(&b.held_at));
        held
    }

    /// Number of currently held transactions.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("hold registry mutex poisoned").len()
    }

    /// Checks whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HoldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
