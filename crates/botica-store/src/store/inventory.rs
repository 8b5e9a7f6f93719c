//! # Inventory Store
//!
//! In-memory reference implementation of [`InventoryStore`]. Stock levels
//! are keyed by item code; the inventory report reads an ordered snapshot.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;

use botica_core::InventoryItem;

use crate::error::StoreResult;
use crate::store::InventoryStore;

/// In-memory stock-level store; writes serialize on an internal mutex.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    items: Mutex<BTreeMap<String, InventoryItem>>,
}

impl MemoryInventoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryInventoryStore {
            items: Mutex::new(BTreeMap::new()),
        }
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn upsert(&self, item: InventoryItem) -> StoreResult<()> {
        let mut items = self.items.lock().expect("inventory store mutex poisoned");
        debug!(item_code = %item.item_code, stock = item.current_stock, "Upserting stock level");
        items.insert(item.item_code.clone(), item);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = self.items.lock().expect("inventory store mutex poisoned");
        // BTreeMap iteration gives item-code order
        Ok(items.values().cloned().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
