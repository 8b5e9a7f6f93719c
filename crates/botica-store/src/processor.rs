//! # Return Processor
//!
//! Validates and records returns against a located receipt.
//!
//! ## Per-Attempt State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Return Processing Flow                             │
//! │                                                                         │
//! │  1. RECEIPT LOOKUP                                                     │
//! │     └── lookup_receipt(receipt_id)                                     │
//! │         ├── blank id        → InvalidReceiptId                         │
//! │         ├── no completed sale → Receipt NotFound                       │
//! │         └── ok → the receipt's line items                              │
//! │                                                                         │
//! │  2. ITEM SELECTION (UI) → quantities per line + reason text            │
//! │                                                                         │
//! │  3. VALIDATED                                                          │
//! │     └── botica_core::returns::validate_return                          │
//! │         ├── OverReturn / NoItemsSelected / MissingReason               │
//! │         └── ok → resolved returned lines                               │
//! │                                                                         │
//! │  4. RECORDED                                                           │
//! │     └── one append to the return ledger (atomic: the attempt           │
//! │         either records exactly one ReturnTransaction or fails          │
//! │         with no partial state)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The processor never deduplicates by content: two genuinely identical
//! returns are legal. A caller needing at-most-once semantics across
//! retries supplies its own correlation token at the transport layer.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use botica_core::returns::{return_total, validate_return, ReturnRequestLine};
use botica_core::{CoreError, LineItem, ReturnTransaction};

use crate::error::{StoreError, StoreResult};
use crate::ids::TimeIdGenerator;
use crate::store::{ReturnStore, SaleStore};

/// Processes returns against the sale and return stores.
pub struct ReturnProcessor {
    sales: Arc<dyn SaleStore>,
    returns: Arc<dyn ReturnStore>,
    ids: TimeIdGenerator,
}

impl ReturnProcessor {
    /// Creates a processor over the given stores.
    pub fn new(sales: Arc<dyn SaleStore>, returns: Arc<dyn ReturnStore>) -> Self {
        ReturnProcessor {
            sales,
            returns,
            ids: TimeIdGenerator::new("RET"),
        }
    }

    /// Finds the line items of the completed sale behind `receipt_id`.
    ///
    /// Fails with [`CoreError::InvalidReceiptId`] for a blank id and
    /// `Receipt NotFound` when no completed sale matches (voided and
    /// unknown ids alike).
    pub fn lookup_receipt(&self, receipt_id: &str) -> StoreResult<Vec<LineItem>> {
        let receipt_id = receipt_id.trim();
        if receipt_id.is_empty() {
            return Err(CoreError::InvalidReceiptId.into());
        }

        self.sales
            .find_receipt(receipt_id)?
            .ok_or_else(|| StoreError::not_found("Receipt", receipt_id))
    }

    /// Validates and records a return.
    ///
    /// Runs the full lookup → validate → record flow. On success exactly
    /// one [`ReturnTransaction`] is appended to the return ledger; the
    /// original sale record is never mutated.
    pub fn process(
        &self,
        receipt_id: &str,
        requested: &[ReturnRequestLine],
        reason: &str,
        processed_by: &str,
    ) -> StoreResult<ReturnTransaction> {
        let purchased = self.lookup_receipt(receipt_id)?;
        let returned_lines = validate_return(&purchased, requested, reason)?;
        let total = return_total(&returned_lines);

        let record = ReturnTransaction {
            id: self.ids.next(),
            receipt_id: receipt_id.trim().to_string(),
            returned_lines,
            reason: reason.trim().to_string(),
            total_amount_centavos: total.centavos(),
            timestamp: Utc::now(),
            processed_by: processed_by.to_string(),
        };

        self.returns.append(record.clone())?;
        info!(
            id = %record.id,
            receipt_id = %record.receipt_id,
            total = %total,
            "Processed return"
        );
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
