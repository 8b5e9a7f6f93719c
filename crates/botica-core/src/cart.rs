//! # Cart Manager
//!
//! Owns the current transaction's line items and customer/discount state.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations Flow                               │
//! │                                                                         │
//! │  Cashier Action           Operation              State Change           │
//! │  ──────────────           ─────────              ────────────           │
//! │                                                                         │
//! │  Scan product ──────────► add_item() ──────────► lines.push(new line)  │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity() ──────► line.quantity = n     │
//! │                           (n < 1 removes the line)                      │
//! │                                                                         │
//! │  Remove line ───────────► remove_line() ───────► lines.remove(i)       │
//! │                                                                         │
//! │  Void / new txn ────────► reset() ─────────────► Empty (new id)        │
//! │                                                                         │
//! │  Hold / checkout ───────► snapshot() ──────────► (read only)           │
//! │                                                                         │
//! │  NOTE: Mutations run strictly sequentially (one cashier, one input     │
//! │        stream). The cart carries no lock of its own.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Scans Never Merge
//! Scanning the same item code twice creates two lines. Repeated scans stay
//! visually distinguishable for the cashier, and the return processor
//! operates per line, not per item code. Use [`CartManager::set_quantity`]
//! to change an existing line instead.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::totals::{compute_totals, Totals};
use crate::types::{DiscountSelection, LineItem, Product, Transaction, TransactionStatus};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// The cart behind one terminal session's open transaction.
///
/// States are {Empty, Open}: an empty line list is Empty, anything else is
/// Open. The session layer owns exactly one `CartManager`, which is what
/// enforces "at most one open transaction per terminal".
#[derive(Debug, Clone)]
pub struct CartManager {
    transaction_id: String,
    lines: Vec<LineItem>,
    discount: DiscountSelection,
    customer_id: Option<String>,
    customer_name: Option<String>,
    star_points_id: Option<String>,
}

impl CartManager {
    /// Creates an empty cart for a new transaction id.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        CartManager {
            transaction_id: transaction_id.into(),
            lines: Vec::new(),
            discount: DiscountSelection::None,
            customer_id: None,
            customer_name: None,
            star_points_id: None,
        }
    }

    /// The current transaction id.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not total quantity).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Read-only view of the current lines.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// The active discount selection.
    pub fn discount(&self) -> DiscountSelection {
        self.discount
    }

    /// Appends a new line for the product, quantity 1.
    ///
    /// A repeated scan of an item code already in the cart appends another
    /// line; it never merges quantities (see module docs). Returns the new
    /// line.
    pub fn add_item(&mut self, product: &Product) -> CoreResult<&LineItem> {
        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(LineItem::from_product(product));
        Ok(self.lines.last().expect("line just pushed"))
    }

    /// Removes a line by its line id.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.id != line_id);

        if self.lines.len() == initial_len {
            return Err(CoreError::LineNotFound {
                line_id: line_id.to_string(),
            });
        }
        Ok(())
    }

    /// Sets the quantity of a line. A quantity below 1 removes the line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return self.remove_line(line_id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|line| line.id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::LineNotFound {
                line_id: line_id.to_string(),
            }),
        }
    }

    /// Replaces the active discount selection.
    pub fn select_discount(&mut self, discount: DiscountSelection) {
        self.discount = discount;
    }

    /// Sets the customer fields travelling with the transaction.
    pub fn set_customer(
        &mut self,
        customer_id: Option<String>,
        customer_name: Option<String>,
        star_points_id: Option<String>,
    ) {
        self.customer_id = customer_id;
        self.customer_name = customer_name;
        self.star_points_id = star_points_id;
    }

    /// Clears lines, discount, and customer fields, keeping the current
    /// transaction id. Used by void before the voided record is built.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = DiscountSelection::None;
        self.customer_id = None;
        self.customer_name = None;
        self.star_points_id = None;
    }

    /// Clears everything and starts a fresh transaction under a new id.
    pub fn reset(&mut self, new_transaction_id: impl Into<String>) {
        self.clear();
        self.transaction_id = new_transaction_id.into();
    }

    /// Adopts a previously held transaction: id, lines, discount, and
    /// customer fields. Used by recall; the resumed transaction keeps its
    /// original identity.
    pub fn restore(&mut self, transaction: Transaction) {
        self.transaction_id = transaction.id;
        self.lines = transaction.line_items;
        self.discount = transaction.discount;
        self.customer_id = transaction.customer_id;
        self.customer_name = transaction.customer_name;
        self.star_points_id = transaction.star_points_id;
    }

    /// Fresh totals for the current lines and discount.
    pub fn totals(&self) -> CoreResult<Totals> {
        compute_totals(&self.lines, &self.discount)
    }

    /// Returns an immutable transaction view of the current state, with
    /// lines deep-copied so later cart mutation cannot alter the snapshot.
    ///
    /// Totals are derived by the caller via [`Transaction::totals`] on every
    /// read; nothing is cached here.
    pub fn snapshot(&self, processed_by: &str, at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: self.transaction_id.clone(),
            line_items: self.lines.clone(),
            discount: self.discount,
            customer_id: self.customer_id.clone(),
            customer_name: self.customer_name.clone(),
            star_points_id: self.star_points_id.clone(),
            timestamp: at,
            processed_by: processed_by.to_string(),
            payment_method: None,
            status: TransactionStatus::Open,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
