//! # Record Stores
//!
//! The engine's persistence seam. Each record family gets an append/find/
//! list trait; the engine depends only on these traits, never on a concrete
//! container, so a durable backend can replace the in-memory reference
//! implementations without touching business logic.
//!
//! ## Store Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleStore          append / find_by_id / find_receipt / list          │
//! │  ReturnStore        append / find_by_id / list                         │
//! │  PrescriptionStore  save / update / delete / find_by_id / list         │
//! │  InventoryStore     upsert / list                                      │
//! │                                                                         │
//! │  • append-style writes serialize on the store's own lock               │
//! │  • list() returns an owned snapshot (copy-on-read), so report          │
//! │    aggregation never blocks writers                                    │
//! │  • ids are unique per store; duplicates are rejected, not replaced     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod inventory;
pub mod prescription;
pub mod returns;
pub mod sale;

pub use inventory::MemoryInventoryStore;
pub use prescription::MemoryPrescriptionStore;
pub use returns::MemoryReturnStore;
pub use sale::MemorySaleStore;

use botica_core::{InventoryItem, LineItem, Prescription, ReturnTransaction, Transaction};

use crate::error::StoreResult;

/// Store of finalized (Completed or Voided) sale transactions.
pub trait SaleStore: Send + Sync {
    /// Appends a finalized transaction. Rejects non-finalized statuses and
    /// duplicate ids. Records are immutable once appended.
    fn append(&self, sale: Transaction) -> StoreResult<()>;

    /// Finds a record by transaction id, whatever its status.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Transaction>>;

    /// Finds the line items of a *completed* sale — the receipt a return is
    /// processed against. Voided records are not receipts.
    fn find_receipt(&self, id: &str) -> StoreResult<Option<Vec<LineItem>>>;

    /// Owned snapshot of all records.
    fn list(&self) -> StoreResult<Vec<Transaction>>;
}

/// Append-only store of processed returns.
pub trait ReturnStore: Send + Sync {
    /// Appends a return record. Duplicate ids are rejected.
    fn append(&self, record: ReturnTransaction) -> StoreResult<()>;

    /// Finds a return record by id.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<ReturnTransaction>>;

    /// Owned snapshot of all records.
    fn list(&self) -> StoreResult<Vec<ReturnTransaction>>;
}

/// Store of prescriptions on file.
pub trait PrescriptionStore: Send + Sync {
    /// Saves a new prescription after validating it.
    fn save(&self, prescription: Prescription) -> StoreResult<()>;

    /// Replaces an existing prescription's contents, keeping its id and
    /// creation timestamp.
    fn update(&self, id: &str, prescription: Prescription) -> StoreResult<()>;

    /// Removes a prescription.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Finds a prescription by id.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Prescription>>;

    /// Owned snapshot of all prescriptions.
    fn list(&self) -> StoreResult<Vec<Prescription>>;
}

/// Store of current stock levels.
pub trait InventoryStore: Send + Sync {
    /// Inserts or replaces the stock record for an item code.
    fn upsert(&self, item: InventoryItem) -> StoreResult<()>;

    /// Owned snapshot of all stock records, ordered by item code.
    fn list(&self) -> StoreResult<Vec<InventoryItem>>;
}
