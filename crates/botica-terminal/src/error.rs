//! # Boundary Error Type
//!
//! Unified error type for the terminal boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow at the Boundary                             │
//! │                                                                         │
//! │  UI / transport              Session Layer                              │
//! │  ──────────────              ─────────────                              │
//! │                                                                         │
//! │  process_return(...)                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<T, TerminalError>                                               │
//! │         │                                                               │
//! │         ├── CoreError::OverReturn ──────► VALIDATION_ERROR             │
//! │         ├── StoreError::NotFound ───────► NOT_FOUND                    │
//! │         ├── StoreError::Duplicate ──────► CONFLICT                     │
//! │         └── Success ────────────────────► T                            │
//! │                                                                         │
//! │  The UI renders { code, message }; validation and not-found errors     │
//! │  are surfaced, never retried automatically.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use botica_core::CoreError;
use botica_store::StoreError;

/// Boundary error returned from session and report operations.
///
/// ## Serialization
/// This is what the UI boundary receives when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Receipt not found: B001-260805-00042"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for boundary responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (receipt, held transaction, product, line).
    NotFound,

    /// Input validation failed (over-return, blank reason, bad quantity).
    ValidationError,

    /// Cart operation failed (ceiling reached, empty cart).
    CartError,

    /// The record's state does not allow the operation.
    Conflict,

    /// Internal error.
    Internal,
}

impl TerminalError {
    /// Creates a new boundary error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        TerminalError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        TerminalError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        TerminalError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        TerminalError::new(ErrorCode::CartError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        TerminalError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to boundary errors.
impl From<CoreError> for TerminalError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::ProductNotFound(item_code) => {
                TerminalError::not_found("Product", item_code)
            }
            CoreError::LineNotFound { line_id } => TerminalError::not_found("Line", line_id),
            CoreError::CartTooLarge { .. } | CoreError::EmptyTransaction => {
                TerminalError::cart(err.to_string())
            }
            CoreError::InvalidLineItem { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::InvalidReceiptId
            | CoreError::OverReturn { .. }
            | CoreError::NoItemsSelected
            | CoreError::MissingReason
            | CoreError::LineNotOnReceipt { .. }
            | CoreError::Validation(_) => TerminalError::validation(err.to_string()),
        }
    }
}

/// Converts store errors to boundary errors.
impl From<StoreError> for TerminalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => TerminalError::not_found(&entity, &id),
            StoreError::Duplicate { .. } => {
                TerminalError::new(ErrorCode::Conflict, err.to_string())
            }
            StoreError::Conflict { message } => TerminalError::new(ErrorCode::Conflict, message),
            StoreError::Core(core) => core.into(),
        }
    }
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for TerminalError {}

/// Result type for boundary operations.
pub type TerminalResult<T> = Result<T, TerminalError>;

// =============================================================================
// Unit Tests
// =============================================================================
