//! # Sale Store
//!
//! In-memory reference implementation of [`SaleStore`].
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Record Lifecycle                               │
//! │                                                                         │
//! │  1. CHECKOUT                                                           │
//! │     └── append(Transaction { status: Completed })                      │
//! │                                                                         │
//! │  2. VOID                                                               │
//! │     └── append(Transaction { status: Voided })                         │
//! │                                                                         │
//! │  3. RETURN LOOKUP                                                      │
//! │     └── find_receipt(id) → lines of the Completed sale                 │
//! │                                                                         │
//! │  4. REPORTING                                                          │
//! │     └── list() → owned snapshot for the aggregator                     │
//! │                                                                         │
//! │  Records are append-only: a stored sale is never mutated. Returns      │
//! │  are tracked in their own ledger and netted only at report time.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use tracing::debug;

use botica_core::{LineItem, Transaction, TransactionStatus};

use crate::error::{StoreError, StoreResult};
use crate::store::SaleStore;

/// In-memory sale store; writes serialize on an internal mutex.
#[derive(Debug, Default)]
pub struct MemorySaleStore {
    records: Mutex<Vec<Transaction>>,
}

impl MemorySaleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemorySaleStore {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl SaleStore for MemorySaleStore {
    fn append(&self, sale: Transaction) -> StoreResult<()> {
        if !sale.is_finalized() {
            return Err(StoreError::conflict(format!(
                "sale {} is {:?}, only Completed or Voided records can be stored",
                sale.id, sale.status
            )));
        }

        let mut records = self.records.lock().expect("sale store mutex poisoned");
        if records.iter().any(|record| record.id == sale.id) {
            return Err(StoreError::duplicate("Sale", &sale.id));
        }

        debug!(id = %sale.id, status = ?sale.status, "Appending sale record");
        records.push(sale);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Transaction>> {
        let records = self.records.lock().expect("sale store mutex poisoned");
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn find_receipt(&self, id: &str) -> StoreResult<Option<Vec<LineItem>>> {
        let records = self.records.lock().expect("sale store mutex poisoned");
        Ok(records
            .iter()
            .find(|record| record.id == id && record.status == TransactionStatus::Completed)
            .map(|record| record.line_items.clone()))
    }

    fn list(&self) -> StoreResult<Vec<Transaction>> {
        let records = self.records.lock().expect("sale store mutex poisoned");
        Ok(records.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use botica_core::{DiscountSelection, PaymentMethod, Product};
    use chrono::Utc;

    fn finalized(id: &str, status: TransactionStatus) -> Transaction {
        let product = Product {
            item_code: "MED001".to_string(),
            product_name: "Paracetamol 500mg".to_string(),
            unit_price_centavos: 599,
            unit: "tablet".to_string(),
            category: "Pain Relief".to_string(),
            brand: "PharmaCo".to_string(),
            dosage: "500mg".to_string(),
            requires_prescription: false,
            barcode: None,
        };
        Transaction {
            id: id.to_string(),
            line_items: vec![LineItem::from_product(&product)],
            discount: DiscountSelection::None,
            customer_id: None,
            customer_name: None,
            star_points_id: None,
            timestamp: Utc::now(),
            processed_by: "USER1".to_string(),
            payment_method: Some(PaymentMethod::Cash),
            status,
        }
    }

    #[test]
    fn test_append_and_find() {
        let store = MemorySaleStore::new();
        store.append(finalized("S1", TransactionStatus::Completed)).unwrap();

        let found = store.find_by_id("S1").unwrap();
        assert!(found.is_some());
        assert!(store.find_by_id("S2").unwrap().is_none());
    }

    #[test]
    fn test_append_rejects_open_transactions() {
        let store = MemorySaleStore::new();
        let err = store
            .append(finalized("S1", TransactionStatus::Open))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn test_append_rejects_duplicate_ids() {
        let store = MemorySaleStore::new();
        store.append(finalized("S1", TransactionStatus::Completed)).unwrap();

        let err = store
            .append(finalized("S1", TransactionStatus::Completed))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn test_voided_record_is_not_a_receipt() {
        let store = MemorySaleStore::new();
        store.append(finalized("S1", TransactionStatus::Completed)).unwrap();
        store.append(finalized("S2", TransactionStatus::Voided)).unwrap();

        assert!(store.find_receipt("S1").unwrap().is_some());
        assert!(store.find_receipt("S2").unwrap().is_none());
    }

    #[test]
    fn test_list_returns_owned_snapshot() {
        let store = MemorySaleStore::new();
        store.append(finalized("S1", TransactionStatus::Completed)).unwrap();

        let snapshot = store.list().unwrap();
        store.append(finalized("S2", TransactionStatus::Completed)).unwrap();

        // The earlier snapshot is unaffected by the later write
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list().unwrap().len(), 2);
    }
}
