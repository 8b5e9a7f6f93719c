//! # Validation Module
//!
//! Field-level input validation, run before business logic.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI boundary (external collaborator)                          │
//! │  ├── Basic format checks, immediate cashier feedback                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — field validation                               │
//! │  ├── Required / length / range checks per field                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (totals, cart, returns modules)               │
//! │  └── InvalidLineItem, OverReturn, EmptyTransaction, ...                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Prescription;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product item code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_item_code(item_code: &str) -> ValidationResult<()> {
    let item_code = item_code.trim();

    if item_code.is_empty() {
        return Err(ValidationError::Required {
            field: "item code".to_string(),
        });
    }

    if item_code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "item code".to_string(),
            max: 50,
        });
    }

    if !item_code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// Empty queries are allowed (return default results); the length is
/// capped. Returns the trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in centavos.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
pub fn validate_unit_price(centavos: i64) -> ValidationResult<()> {
    if centavos < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Prescription Validator
// =============================================================================

/// Validates a prescription before it is saved or updated.
///
/// ## Rules
/// - Patient name and doctor name are required
/// - At least one medicine line
/// - Every medicine line needs an item code and quantity >= 1
pub fn validate_prescription(prescription: &Prescription) -> ValidationResult<()> {
    if prescription.patient_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "patient name".to_string(),
        });
    }

    if prescription.doctor_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "doctor name".to_string(),
        });
    }

    if prescription.medicines.is_empty() {
        return Err(ValidationError::Required {
            field: "medicines".to_string(),
        });
    }

    for medicine in &prescription.medicines {
        validate_item_code(&medicine.item_code)?;
        if medicine.quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: format!("quantity for {}", medicine.item_code),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
