//! # Prescription Store
//!
//! In-memory reference implementation of [`PrescriptionStore`]. Unlike the
//! sale and return ledgers, prescriptions are editable records: a pending
//! prescription can be corrected or cancelled before it is filled.

use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use botica_core::validation::validate_prescription;
use botica_core::Prescription;

use crate::error::{StoreError, StoreResult};
use crate::store::PrescriptionStore;

/// In-memory prescription store; writes serialize on an internal mutex.
#[derive(Debug, Default)]
pub struct MemoryPrescriptionStore {
    records: Mutex<Vec<Prescription>>,
}

impl MemoryPrescriptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryPrescriptionStore {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl PrescriptionStore for MemoryPrescriptionStore {
    fn save(&self, prescription: Prescription) -> StoreResult<()> {
        validate_prescription(&prescription).map_err(botica_core::CoreError::from)?;

        let mut records = self.records.lock().expect("prescription store mutex poisoned");
        if records.iter().any(|existing| existing.id == prescription.id) {
            return Err(StoreError::duplicate("Prescription", &prescription.id));
        }

        debug!(id = %prescription.id, patient = %prescription.patient_name, "Saving prescription");
        records.push(prescription);
        Ok(())
    }

    fn update(&self, id: &str, prescription: Prescription) -> StoreResult<()> {
        validate_prescription(&prescription).map_err(botica_core::CoreError::from)?;

        let mut records = self.records.lock().expect("prescription store mutex poisoned");
        let existing = records
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| StoreError::not_found("Prescription", id))?;

        // The id and creation timestamp survive the update
        let mut updated = prescription;
        updated.id = existing.id.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();

        debug!(id = %id, "Updating prescription");
        *existing = updated;
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.lock().expect("prescription store mutex poisoned");
        let before = records.len();
        records.retain(|existing| existing.id != id);

        if records.len() == before {
            return Err(StoreError::not_found("Prescription", id));
        }
        debug!(id = %id, "Deleted prescription");
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Prescription>> {
        let records = self.records.lock().expect("prescription store mutex poisoned");
        Ok(records.iter().find(|existing| existing.id == id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Prescription>> {
        let records = self.records.lock().expect("prescription store mutex poisoned");
        Ok(records.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use botica_core::{LineItem, PrescriptionStatus, Product};
    use chrono::NaiveDate;

    fn medicine(item_code: &str) -> LineItem {
        LineItem::from_product(&Product {
            item_code: item_code.to_string(),
            product_name: format!("Product {item_code}"),
            unit_price_centavos: 599,
            unit: "tablet".to_string(),
            category: "Pain Relief".to_string(),
            brand: "PharmaCo".to_string(),
            dosage: "500mg".to_string(),
            requires_prescription: true,
            barcode: None,
        })
    }

    fn prescription(id: &str) -> Prescription {
        Prescription {
            id: id.to_string(),
            patient_name: "Juan dela Cruz".to_string(),
            doctor_name: "Dr. Santos".to_string(),
            doctor_id: "DR001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            medicines: vec![medicine("MED002")],
            notes: None,
            status: PrescriptionStatus::Pending,
            image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_find() {
        let store = MemoryPrescriptionStore::new();
        store.save(prescription("RX1")).unwrap();
        assert!(store.find_by_id("RX1").unwrap().is_some());
    }

    #[test]
    fn test_save_validates() {
        let store = MemoryPrescriptionStore::new();
        let mut invalid = prescription("RX1");
        invalid.medicines.clear();

        let err = store.save(invalid).unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
    }

    #[test]
    fn test_update_keeps_id_and_created_at() {
        let store = MemoryPrescriptionStore::new();
        let original = prescription("RX1");
        let created_at = original.created_at;
        store.save(original).unwrap();

        let mut changed = prescription("RX1");
        changed.id = "SOMETHING-ELSE".to_string();
        changed.status = PrescriptionStatus::Filled;
        store.update("RX1", changed).unwrap();

        let stored = store.find_by_id("RX1").unwrap().expect("updated record");
        assert_eq!(stored.status, PrescriptionStatus::Filled);
        assert_eq!(stored.created_at, created_at);
    }

    #[test]
    fn test_update_missing_fails() {
        let store = MemoryPrescriptionStore::new();
        let err = store.update("RX9", prescription("RX9")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_delete() {
        let store = MemoryPrescriptionStore::new();
        store.save(prescription("RX1")).unwrap();

        store.delete("RX1").unwrap();
        assert!(store.find_by_id("RX1").unwrap().is_none());
        assert!(matches!(
            store.delete("RX1").unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
