//! # Domain Types
//!
//! Core domain types used throughout Botica POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │ ReturnTransaction│      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_code      │──►│  line_items     │◄──│  returned_lines │       │
//! │  │  unit_price     │   │  discount       │   │  receipt_id     │       │
//! │  │  requires_rx    │   │  status         │   │  reason         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌─────────────────┐   ┌─────────────────┐       │
//! │  │DiscountSelection │  │TransactionStatus│   │ PaymentMethod   │       │
//! │  │  ─────────────   │  │  ─────────────  │   │  ─────────────  │       │
//! │  │  None            │  │  Open           │   │  Cash           │       │
//! │  │  SeniorPwd (20%) │  │  Held           │   │  Card           │       │
//! │  │  Custom{percent} │  │  Completed      │   │  Other          │       │
//! │  └──────────────────┘  │  Voided         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Line items freeze product data (name, price) at the moment of scanning.
//! Catalog edits after the scan never alter an open cart, a held snapshot,
//! or a finalized record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::{Money, Rate};
use crate::SENIOR_PWD_DISCOUNT;

// =============================================================================
// Product (catalog entry)
// =============================================================================

/// A product as served by the catalog collaborator.
///
/// The engine never owns catalog data; it consumes products through the
/// `ProductCatalog` boundary and snapshots the fields it needs into
/// [`LineItem`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, unique per catalog (e.g. "MED001").
    pub item_code: String,

    /// Display name shown to cashier and on receipt.
    pub product_name: String,

    /// Price in centavos (smallest currency unit).
    pub unit_price_centavos: i64,

    /// Selling unit ("tablet", "capsule", "bottle", ...).
    pub unit: String,

    /// Category used for sales breakdowns. Empty string means uncategorized.
    pub category: String,

    /// Manufacturer brand.
    pub brand: String,

    /// Dosage strength ("500mg", ...).
    pub dosage: String,

    /// Whether dispensing requires a prescription on file.
    pub requires_prescription: bool,

    /// Barcode (EAN-13, UPC-A, etc.), when known.
    pub barcode: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_centavos(self.unit_price_centavos)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry with quantity in a transaction.
///
/// Identity is the `item_code`; `quantity` is the only field a cart mutates
/// after the line is added. Repeated scans of the same item code create
/// separate lines, so `id` disambiguates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique per line (repeated scans of one item code get distinct ids).
    pub id: String,

    /// Product business identifier at time of scan (frozen).
    pub item_code: String,

    /// Product name at time of scan (frozen).
    pub product_name: String,

    /// Unit price in centavos at time of scan (frozen).
    pub unit_price_centavos: i64,

    /// Quantity on this line. Valid lines have quantity >= 1.
    pub quantity: i64,

    /// Selling unit at time of scan.
    pub unit: String,

    /// Category at time of scan.
    pub category: String,

    /// Brand at time of scan.
    pub brand: String,

    /// Dosage at time of scan.
    pub dosage: String,

    /// Whether the product requires a prescription.
    pub requires_prescription: bool,
}

impl LineItem {
    /// Creates a new line from a catalog product with quantity 1 and a
    /// fresh line id.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            item_code: product.item_code.clone(),
            product_name: product.product_name.clone(),
            unit_price_centavos: product.unit_price_centavos,
            quantity: 1,
            unit: product.unit.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            dosage: product.dosage.clone(),
            requires_prescription: product.requires_prescription,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_centavos(self.unit_price_centavos)
    }

    /// Line total (unit price × quantity), before any discount or VAT.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Discount Selection
// =============================================================================

/// The single active discount policy for a transaction.
///
/// Exactly one selection is active per transaction. The senior/PWD rate is
/// fixed by statute at 20%; custom percentages are clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountSelection {
    /// No discount.
    None,
    /// Senior citizen / PWD statutory discount (fixed 20%).
    SeniorPwd,
    /// Cashier-entered percentage, clamped to `[0, 100]`.
    Custom { percent: f64 },
}

impl DiscountSelection {
    /// Resolves the selection to a discount rate.
    pub fn rate(&self) -> Rate {
        match self {
            DiscountSelection::None => Rate::zero(),
            DiscountSelection::SeniorPwd => SENIOR_PWD_DISCOUNT,
            DiscountSelection::Custom { percent } => Rate::from_percent(*percent),
        }
    }

    /// Checks if no discount is selected.
    pub fn is_none(&self) -> bool {
        matches!(self, DiscountSelection::None)
    }
}

impl Default for DiscountSelection {
    fn default() -> Self {
        DiscountSelection::None
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a completed sale was tendered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Other tender (GC, store credit, ...).
    Other,
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Lifecycle state of a transaction.
///
/// ```text
/// Open ──hold──► Held ──recall──► Open ──checkout──► Completed
///   │                                                    (immutable)
///   └──void──► Voided (immutable)
/// ```
///
/// At most one Open transaction exists per terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// In progress at the terminal (items being added).
    Open,
    /// Suspended into the hold/recall registry.
    Held,
    /// Checked out and finalized; now an immutable sale record.
    Completed,
    /// Explicitly voided; recorded but excluded from sales totals.
    Voided,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Open
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A transaction at any point in its lifecycle.
///
/// While Open this is the cart's snapshot view; once Completed or Voided it
/// is the immutable sale record consumed by the report aggregator and
/// referenced by returns (a "receipt"). Totals are always derived via
/// [`crate::totals::compute_totals`], never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Branch-date-sequence composite id (e.g. "B001-260805-00001").
    pub id: String,

    /// The scanned lines.
    pub line_items: Vec<LineItem>,

    /// The single active discount selection.
    pub discount: DiscountSelection,

    /// Customer identifier, when captured.
    pub customer_id: Option<String>,

    /// Customer display name, when captured.
    pub customer_name: Option<String>,

    /// Loyalty (star points) card id, when presented.
    pub star_points_id: Option<String>,

    /// When the record was created or finalized.
    pub timestamp: DateTime<Utc>,

    /// Cashier user id from the identity collaborator.
    pub processed_by: String,

    /// Tender method; set at checkout, None while open/held.
    pub payment_method: Option<PaymentMethod>,

    /// Lifecycle status.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Derives fresh totals for this transaction's lines and discount.
    pub fn totals(&self) -> crate::error::CoreResult<crate::totals::Totals> {
        crate::totals::compute_totals(&self.line_items, &self.discount)
    }

    /// Whether this transaction is an immutable record.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Completed | TransactionStatus::Voided
        )
    }
}

// =============================================================================
// Held Transaction
// =============================================================================

/// A transaction snapshot suspended for later resumption.
///
/// Owned exclusively by the hold/recall registry. The snapshot is deep-copied
/// on hold and never mutated in place; it is removed on recall or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldTransaction {
    /// Time-based registry id (e.g. "HELD-20260805-103000-0001").
    pub id: String,

    /// The frozen snapshot (status Held).
    pub transaction: Transaction,

    /// Free-text note entered by the cashier, if any.
    pub note: Option<String>,

    /// When the transaction was suspended.
    pub held_at: DateTime<Utc>,
}

// =============================================================================
// Returns
// =============================================================================

/// One returned line: a subset of an original receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedLine {
    /// Id of the original receipt line.
    pub line_id: String,

    /// Product business identifier (from the receipt line).
    pub item_code: String,

    /// Product name (from the receipt line).
    pub product_name: String,

    /// Unit price in centavos (from the receipt line).
    pub unit_price_centavos: i64,

    /// Quantity returned; always in `1..=purchased`.
    pub return_quantity: i64,
}

impl ReturnedLine {
    /// Refund amount for this line (unit price × return quantity).
    #[inline]
    pub fn refund_total(&self) -> Money {
        Money::from_centavos(self.unit_price_centavos).multiply_quantity(self.return_quantity)
    }
}

/// An append-only record of a processed return.
///
/// References the original completed sale by `receipt_id`; the sale record
/// itself is never mutated. Returns are netted against sales only at report
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnTransaction {
    /// Time-based id (e.g. "RET-20260805-110000-0001").
    pub id: String,

    /// Id of the completed sale being returned against.
    pub receipt_id: String,

    /// The returned subset of the receipt's lines.
    pub returned_lines: Vec<ReturnedLine>,

    /// Declared reason for the return.
    pub reason: String,

    /// Total refund in centavos (Σ unit price × return quantity).
    pub total_amount_centavos: i64,

    /// When the return was recorded.
    pub timestamp: DateTime<Utc>,

    /// Cashier user id that processed the return.
    pub processed_by: String,
}

impl ReturnTransaction {
    /// Returns the refund total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_centavos(self.total_amount_centavos)
    }
}

// =============================================================================
// Prescription
// =============================================================================

/// Workflow state of a prescription on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    /// Captured but not yet dispensed.
    Pending,
    /// Dispensed.
    Filled,
    /// Cancelled before dispensing.
    Cancelled,
}

/// A prescription record captured at the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    /// Doctor identifier used for report breakdowns (e.g. "DR001").
    pub doctor_id: String,
    /// Prescription date (calendar day, as written on the script).
    pub date: NaiveDate,
    /// Prescribed medicines as line items (quantity >= 1 each).
    pub medicines: Vec<LineItem>,
    pub notes: Option<String>,
    pub status: PrescriptionStatus,
    /// Path to the captured prescription image, when uploaded.
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Current stock level for one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_code: String,
    pub product_name: String,
    pub current_stock: i64,
    /// Stock level at or below which the item needs reordering.
    pub reorder_point: i64,
    pub unit_price_centavos: i64,
    pub category: String,
}

impl InventoryItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_centavos(self.unit_price_centavos)
    }

    /// Stock valuation (unit price × current stock).
    #[inline]
    pub fn total_value(&self) -> Money {
        self.unit_price().multiply_quantity(self.current_stock)
    }

    /// Low-stock boundary is inclusive: stock equal to the reorder point
    /// already counts as low.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.reorder_point
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive calendar-day range used by report filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; both endpoints are inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// A range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// Inclusive containment check.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
