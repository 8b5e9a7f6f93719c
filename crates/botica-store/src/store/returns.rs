//! # Return Store
//!
//! In-memory reference implementation of [`ReturnStore`]. Returns are an
//! append-only ledger: the sale record a return references is never
//! touched, and netting happens only in the report aggregator.

use std::sync::Mutex;

use tracing::debug;

use botica_core::ReturnTransaction;

use crate::error::{StoreError, StoreResult};
use crate::store::ReturnStore;

/// In-memory return ledger; writes serialize on an internal mutex.
#[derive(Debug, Default)]
pub struct MemoryReturnStore {
    records: Mutex<Vec<ReturnTransaction>>,
}

impl MemoryReturnStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryReturnStore {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl ReturnStore for MemoryReturnStore {
    fn append(&self, record: ReturnTransaction) -> StoreResult<()> {
        let mut records = self.records.lock().expect("return store mutex poisoned");
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::duplicate("Return", &record.id));
        }

        debug!(id = %record.id, receipt_id = %record.receipt_id, "Appending return record");
        records.push(record);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<ReturnTransaction>> {
        let records = self.records.lock().expect("return store mutex poisoned");
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<ReturnTransaction>> {
        let records = self.records.lock().expect("return store mutex poisoned");
        Ok(records.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use botica_core::ReturnedLine;
    use chrono::Utc;

    fn record(id: &str) -> ReturnTransaction {
        ReturnTransaction {
            id: id.to_string(),
            receipt_id: "S1".to_string(),
            returned_lines: vec![ReturnedLine {
                line_id: "l1".to_string(),
                item_code: "MED001".to_string(),
                product_name: "Paracetamol 500mg".to_string(),
                unit_price_centavos: 599,
                return_quantity: 1,
            }],
            reason: "Expired".to_string(),
            total_amount_centavos: 599,
            timestamp: Utc::now(),
            processed_by: "USER1".to_string(),
        }
    }

    #[test]
    fn test_append_and_list() {
        let store = MemoryReturnStore::new();
        store.append(record("RET-1")).unwrap();
        store.append(record("RET-2")).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        assert!(store.find_by_id("RET-1").unwrap().is_some());
    }

    #[test]
    fn test_identical_content_with_distinct_ids_is_legal() {
        // Two genuinely identical returns are legal; only the id must differ
        let store = MemoryReturnStore::new();
        store.append(record("RET-1")).unwrap();
        store.append(record("RET-2")).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryReturnStore::new();
        store.append(record("RET-1")).unwrap();
        let err = store.append(record("RET-1")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }
}
