//! # Error Types
//!
//! Domain-specific error types for botica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  botica-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  botica-store errors (separate crate)                                  │
//! │  └── StoreError       - Shared-state / record store failures           │
//! │                                                                         │
//! │  botica-terminal errors (session layer)                                │
//! │  └── TerminalError    - What the UI boundary sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → TerminalError → UI   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item code, line id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are surfaced to the caller with enough context to render a user
/// message, and are never retried automatically by the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A line id does not exist in the current transaction.
    #[error("Line not in transaction: {line_id}")]
    LineNotFound { line_id: String },

    /// A line item violates the calculator's input constraints
    /// (quantity < 1 or negative unit price). Violating items are
    /// rejected, never silently clamped.
    #[error("Invalid line item {item_code}: {reason}")]
    InvalidLineItem { item_code: String, reason: String },

    /// The operation requires at least one line item.
    ///
    /// ## When This Occurs
    /// - Holding a transaction with an empty cart
    /// - Checking out or voiding an empty cart
    #[error("Transaction has no line items")]
    EmptyTransaction,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Receipt id was empty or blank.
    #[error("Receipt id must not be blank")]
    InvalidReceiptId,

    /// Requested return quantity is outside `1..=purchased`.
    ///
    /// ## When This Occurs
    /// ```text
    /// Receipt line: Paracetamol, purchased qty 2
    ///      │
    ///      ▼
    /// Return request: qty 3
    ///      │
    ///      ▼
    /// OverReturn { item_code: "MED001", purchased: 2, requested: 3 }
    /// ```
    #[error("Cannot return {requested} of {item_code}: only {purchased} purchased")]
    OverReturn {
        item_code: String,
        purchased: i64,
        requested: i64,
    },

    /// Every requested return quantity was zero.
    #[error("No items selected for return")]
    NoItemsSelected,

    /// Return reason text was blank.
    #[error("A reason is required to process a return")]
    MissingReason,

    /// A return request references a line that is not on the receipt.
    #[error("Line not on receipt: {line_id}")]
    LineNotOnReceipt { line_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet field-level
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in an item code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OverReturn {
            item_code: "MED001".to_string(),
            purchased: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot return 3 of MED001: only 2 purchased"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item code".to_string(),
        };
        assert_eq!(err.to_string(), "item code is required");

        let err = ValidationError::TooLong {
            field: "product name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "product name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "item code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
