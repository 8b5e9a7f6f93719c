//! # Store Error Types
//!
//! Error types for shared-state operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (validation / business rule)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds NotFound / Duplicate / Conflict       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TerminalError (session layer) ← Serialized for the UI boundary        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use botica_core::CoreError;
use thiserror::Error;

/// Shared-state operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    ///
    /// ## When This Occurs
    /// - Recalling a held id that was already recalled or deleted
    ///   (including losing a concurrent-recall race)
    /// - Looking up a receipt id with no completed sale behind it
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Record id already exists in the store.
    #[error("{entity} '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// The record's state does not allow the requested operation.
    ///
    /// ## When This Occurs
    /// - Appending a still-open transaction to the sale store
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Business rule or validation failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
