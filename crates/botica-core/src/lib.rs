//! # botica-core: Pure Business Logic for Botica POS
//!
//! This crate is the **heart** of Botica POS, a pharmacy point-of-sale
//! engine. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Botica POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Terminal UI (external collaborator)                 │   │
//! │  │    Scan ──► Cart ──► Discount ──► Checkout ──► Receipt         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  botica-terminal (session layer)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ botica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────┐ ┌─────────┐ ┌──────────┐  │   │
//! │  │   │  types  │ │  money  │ │ cart  │ │ returns │ │  report  │  │   │
//! │  │   │ LineItem│ │  Money  │ │ state │ │ validate│ │ daily/rx │  │   │
//! │  │   │ Txn     │ │  Rate   │ │machine│ │  rules  │ │ inventory│  │   │
//! │  │   └─────────┘ └─────────┘ └───────┘ └─────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              botica-store (shared state layer)                  │   │
//! │  │        Hold/recall registry, record stores, catalog             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Transaction, Prescription, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - The pricing & totals calculator (discount-then-VAT)
//! - [`cart`] - Cart manager state machine
//! - [`returns`] - Return validation rules
//! - [`report`] - Report aggregation (pure projections)
//! - [`validation`] - Field-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use botica_core::money::Money;
//! use botica_core::totals::compute_totals;
//! use botica_core::types::{DiscountSelection, LineItem, Product};
//!
//! let paracetamol = Product {
//!     item_code: "MED001".to_string(),
//!     product_name: "Paracetamol 500mg".to_string(),
//!     unit_price_centavos: 599,
//!     unit: "tablet".to_string(),
//!     category: "Pain Relief".to_string(),
//!     brand: "PharmaCo".to_string(),
//!     dosage: "500mg".to_string(),
//!     requires_prescription: false,
//!     barcode: None,
//! };
//!
//! let mut line = LineItem::from_product(&paracetamol);
//! line.quantity = 2;
//!
//! // ₱11.98 subtotal, 20% senior/PWD discount, then 12% VAT
//! let totals = compute_totals(&[line], &DiscountSelection::SeniorPwd).unwrap();
//! assert_eq!(totals.total(), Money::from_centavos(1073));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod returns;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use botica_core::Money` instead of
// `use botica_core::money::Money`

pub use cart::CartManager;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use totals::{compute_totals, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat value-added tax rate (12%), applied to the discounted subtotal.
///
/// A single jurisdiction-wide rate is policy for this engine; per-item or
/// per-region tax rules are out of scope.
pub const VAT_RATE: Rate = Rate::from_bps(1200);

/// Statutory senior citizen / PWD discount rate (20%).
pub const SENIOR_PWD_DISCOUNT: Rate = Rate::from_bps(2000);

/// Maximum lines allowed in a single cart.
///
/// Prevents runaway carts and keeps transactions a reviewable size.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity on a single line.
///
/// Guards against mistyped quantities (e.g., 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Loyalty program accrual: one star point per this many whole pesos of a
/// completed sale's total.
pub const STAR_POINTS_PESOS_PER_POINT: i64 = 200;
