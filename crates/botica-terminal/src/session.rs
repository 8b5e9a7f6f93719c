//! # Terminal Session
//!
//! One cashier session at one terminal: an owned cart manager wired to the
//! shared registry, stores, catalog, and identity collaborators.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cashier Session Flow                               │
//! │                                                                         │
//! │  scan ──► add_item(code) ──► catalog lookup ──► cart appends line      │
//! │                                                                         │
//! │  F4 hold ──► hold(note) ──► registry stores snapshot, cart resets      │
//! │  F5 recall ──► recall(id) ──► registry entry resumes into the cart     │
//! │                                                                         │
//! │  checkout(method) ──► Completed record → sale store, star points,      │
//! │                       cart resets under a fresh transaction id         │
//! │  void() ──► Voided record → sale store, cart resets                    │
//! │                                                                         │
//! │  F6 return ──► lookup_receipt / process_return (shared processor)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session owns exactly one open transaction at a time. Cart mutations
//! are strictly sequential (one cashier, one input stream); everything
//! shared between sessions lives behind the registry/store locks.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use botica_core::totals::star_points_earned;
use botica_core::returns::ReturnRequestLine;
use botica_core::{
    CartManager, CoreError, DiscountSelection, HeldTransaction, LineItem, PaymentMethod, Totals,
    Transaction, TransactionStatus,
};
use botica_store::{
    HoldRegistry, ProductCatalog, ReturnProcessor, ReturnStore, SaleStore, TransactionIdGenerator,
};

use crate::config::{IdentityProvider, TerminalConfig};
use crate::error::TerminalResult;

// =============================================================================
// Boundary Responses
// =============================================================================

/// Receipt summary returned from a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub line_count: usize,
    pub subtotal_centavos: i64,
    pub discount_amount_centavos: i64,
    pub vat_centavos: i64,
    pub total_centavos: i64,
    pub star_points_earned: i64,
}

// =============================================================================
// Terminal Session
// =============================================================================

/// A cashier session bound to one terminal.
///
/// The session is the explicit owner of the "current transaction" state:
/// multiple sessions can coexist in one process, each with its own cart,
/// all sharing the branch-wide registry, stores, and id generator.
pub struct TerminalSession {
    config: TerminalConfig,
    identity: Arc<dyn IdentityProvider>,
    catalog: Arc<dyn ProductCatalog>,
    registry: Arc<HoldRegistry>,
    sales: Arc<dyn SaleStore>,
    processor: ReturnProcessor,
    transaction_ids: Arc<TransactionIdGenerator>,
    cart: CartManager,
}

impl TerminalSession {
    /// Opens a session and starts its first transaction.
    pub fn new(
        config: TerminalConfig,
        identity: Arc<dyn IdentityProvider>,
        catalog: Arc<dyn ProductCatalog>,
        registry: Arc<HoldRegistry>,
        sales: Arc<dyn SaleStore>,
        returns: Arc<dyn ReturnStore>,
        transaction_ids: Arc<TransactionIdGenerator>,
    ) -> Self {
        let cart = CartManager::new(transaction_ids.next());
        info!(
            terminal = %config.terminal_id,
            transaction_id = %cart.transaction_id(),
            "Opened terminal session"
        );

        TerminalSession {
            processor: ReturnProcessor::new(Arc::clone(&sales), returns),
            config,
            identity,
            catalog,
            registry,
            sales,
            transaction_ids,
            cart,
        }
    }

    /// The terminal configuration this session runs under.
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The id of the current open transaction.
    pub fn transaction_id(&self) -> &str {
        self.cart.transaction_id()
    }

    /// Read-only view of the current cart lines.
    pub fn lines(&self) -> &[LineItem] {
        self.cart.lines()
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Scans an item: looks the code up in the catalog and appends a new
    /// line (quantity 1). Repeated scans append repeated lines.
    pub fn add_item(&mut self, item_code: &str) -> TerminalResult<LineItem> {
        let product = self
            .catalog
            .get_product(item_code)
            .ok_or_else(|| CoreError::ProductNotFound(item_code.to_string()))?;

        let line = self.cart.add_item(&product)?.clone();
        debug!(item_code = %item_code, line_id = %line.id, "Added line");
        Ok(line)
    }

    /// Removes a line from the current transaction.
    pub fn remove_line(&mut self, line_id: &str) -> TerminalResult<()> {
        self.cart.remove_line(line_id)?;
        Ok(())
    }

    /// Sets a line's quantity; below 1 removes the line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> TerminalResult<()> {
        self.cart.set_quantity(line_id, quantity)?;
        Ok(())
    }

    /// Replaces the transaction's discount selection.
    pub fn select_discount(&mut self, discount: DiscountSelection) {
        debug!(discount = ?discount, "Selected discount");
        self.cart.select_discount(discount);
    }

    /// Sets the customer fields travelling with the transaction.
    pub fn set_customer(
        &mut self,
        customer_id: Option<String>,
        customer_name: Option<String>,
        star_points_id: Option<String>,
    ) {
        self.cart.set_customer(customer_id, customer_name, star_points_id);
    }

    /// Fresh totals for the current transaction.
    pub fn totals(&self) -> TerminalResult<Totals> {
        Ok(self.cart.totals()?)
    }

    /// Abandons the current transaction without a record and starts a new
    /// one under a fresh id.
    pub fn new_transaction(&mut self) {
        let next_id = self.transaction_ids.next();
        debug!(transaction_id = %next_id, "Starting new transaction");
        self.cart.reset(next_id);
    }

    // -------------------------------------------------------------------------
    // Lifecycle: checkout / void
    // -------------------------------------------------------------------------

    /// Finalizes the current transaction as a Completed sale record.
    ///
    /// Appends the record to the sale store, computes earned star points,
    /// and starts a new transaction. Fails on an empty cart.
    pub fn checkout(&mut self, payment_method: PaymentMethod) -> TerminalResult<CheckoutSummary> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let totals = self.cart.totals()?;
        let mut record = self.snapshot();
        record.status = TransactionStatus::Completed;
        record.payment_method = Some(payment_method);

        let summary = CheckoutSummary {
            transaction_id: record.id.clone(),
            payment_method,
            line_count: record.line_items.len(),
            subtotal_centavos: totals.subtotal_centavos,
            discount_amount_centavos: totals.discount_amount_centavos,
            vat_centavos: totals.vat_centavos,
            total_centavos: totals.total_centavos,
            star_points_earned: star_points_earned(totals.total()),
        };

        self.sales.append(record)?;
        info!(
            transaction_id = %summary.transaction_id,
            total = summary.total_centavos,
            star_points = summary.star_points_earned,
            "Checkout complete"
        );

        self.new_transaction();
        Ok(summary)
    }

    /// Voids the current transaction: records it as Voided (immutable,
    /// excluded from sales totals) and starts a new transaction.
    pub fn void(&mut self) -> TerminalResult<String> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let mut record = self.snapshot();
        record.status = TransactionStatus::Voided;
        let voided_id = record.id.clone();

        self.sales.append(record)?;
        info!(transaction_id = %voided_id, "Voided transaction");

        self.new_transaction();
        Ok(voided_id)
    }

    // -------------------------------------------------------------------------
    // Lifecycle: hold / recall
    // -------------------------------------------------------------------------

    /// Suspends the current transaction into the shared registry and starts
    /// a new one. Fails on an empty cart.
    pub fn hold(&mut self, note: Option<String>) -> TerminalResult<String> {
        let held_id = self.registry.hold(self.snapshot(), note)?;
        self.new_transaction();
        Ok(held_id)
    }

    /// Resumes a held transaction under its original id.
    ///
    /// Recall is destructive in the registry: this session becomes the only
    /// holder of the transaction. Any lines in the session's current open
    /// transaction are discarded, so the boundary confirms with the cashier
    /// before recalling over a non-empty cart.
    pub fn recall(&mut self, held_id: &str) -> TerminalResult<Transaction> {
        let held = self.registry.recall(held_id)?;
        let mut transaction = held.transaction;
        transaction.status = TransactionStatus::Open;

        self.cart.restore(transaction.clone());
        info!(
            held_id = %held_id,
            transaction_id = %transaction.id,
            "Resumed held transaction"
        );
        Ok(transaction)
    }

    /// Held transactions waiting in the registry, oldest first.
    pub fn held_transactions(&self) -> Vec<HeldTransaction> {
        self.registry.list()
    }

    /// Removes a held transaction without resuming it (idempotent).
    pub fn delete_held(&self, held_id: &str) {
        self.registry.delete(held_id);
    }

    // -------------------------------------------------------------------------
    // Returns
    // -------------------------------------------------------------------------

    /// Finds the line items of the completed sale behind a receipt id.
    pub fn lookup_receipt(&self, receipt_id: &str) -> TerminalResult<Vec<LineItem>> {
        Ok(self.processor.lookup_receipt(receipt_id)?)
    }

    /// Validates and records a return against a receipt.
    pub fn process_return(
        &self,
        receipt_id: &str,
        requested: &[ReturnRequestLine],
        reason: &str,
    ) -> TerminalResult<botica_core::ReturnTransaction> {
        let processed_by = self.identity.current_user();
        Ok(self
            .processor
            .process(receipt_id, requested, reason, &processed_by)?)
    }

    // -------------------------------------------------------------------------

    /// Immutable snapshot of the current transaction, stamped with the
    /// current cashier and time.
    fn snapshot(&self) -> Transaction {
        self.cart.snapshot(&self.identity.current_user(), Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticIdentity;
    use botica_store::{MemoryCatalog, MemoryReturnStore, MemorySaleStore};

    fn sample_products() -> Vec<botica_core::Product> {
        vec![
            botica_core::Product {
                item_code: "MED001".to_string(),
                product_name: "Paracetamol 500mg".to_string(),
                unit_price_centavos: 599,
                unit: "tablet".to_string(),
                category: "Pain Relief".to_string(),
                brand: "PharmaCo".to_string(),
                dosage: "500mg".to_string(),
                requires_prescription: false,
                barcode: None,
            },
            botica_core::Product {
                item_code: "MED002".to_string(),
                product_name: "Amoxicillin 250mg".to_string(),
                unit_price_centavos: 1299,
                unit: "capsule".to_string(),
                category: "Antibiotics".to_string(),
                brand: "MediCorp".to_string(),
                dosage: "250mg".to_string(),
                requires_prescription: true,
                barcode: None,
            },
        ]
    }

    fn session() -> (TerminalSession, Arc<MemorySaleStore>) {
        let sales = Arc::new(MemorySaleStore::new());
        let session = TerminalSession::new(
            TerminalConfig::default(),
            Arc::new(StaticIdentity::new("USER1")),
            Arc::new(MemoryCatalog::with_products(sample_products())),
            Arc::new(HoldRegistry::new()),
            Arc::clone(&sales) as Arc<dyn SaleStore>,
            Arc::new(MemoryReturnStore::new()),
            Arc::new(TransactionIdGenerator::new("B001")),
        );
        (session, sales)
    }

    #[test]
    fn test_add_item_unknown_code_fails() {
        let (mut session, _) = session();
        let err = session.add_item("MED999").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let (mut session, _) = session();
        let err = session.checkout(PaymentMethod::Cash).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CartError);
    }

    #[test]
    fn test_checkout_appends_completed_record_and_rolls_transaction() {
        let (mut session, sales) = session();
        let line = session.add_item("MED001").unwrap();
        session.set_quantity(&line.id, 2).unwrap();
        let receipt_id = session.transaction_id().to_string();

        let summary = session.checkout(PaymentMethod::Cash).unwrap();

        assert_eq!(summary.transaction_id, receipt_id);
        assert_eq!(summary.total_centavos, 1342);
        let record = sales.find_by_id(&receipt_id).unwrap().expect("sale stored");
        assert_eq!(record.status, TransactionStatus::Completed);
        assert_eq!(record.processed_by, "USER1");
        // A fresh transaction started under a new id
        assert_ne!(session.transaction_id(), receipt_id);
        assert!(session.lines().is_empty());
    }

    #[test]
    fn test_star_points_on_checkout() {
        let (mut session, _) = session();
        // 32 × ₱12.99 = ₱415.68 + 12% VAT = ₱465.56 → 2 points
        let line = session.add_item("MED002").unwrap();
        session.set_quantity(&line.id, 32).unwrap();

        let summary = session.checkout(PaymentMethod::Card).unwrap();
        assert_eq!(summary.star_points_earned, 2);
    }

    #[test]
    fn test_void_records_voided_transaction() {
        let (mut session, sales) = session();
        session.add_item("MED001").unwrap();
        let voided_id = session.void().unwrap();

        let record = sales.find_by_id(&voided_id).unwrap().expect("void stored");
        assert_eq!(record.status, TransactionStatus::Voided);
        // Voided records are not receipts
        assert!(sales.find_receipt(&voided_id).unwrap().is_none());
    }

    #[test]
    fn test_hold_and_recall_restores_identity_and_lines() {
        let (mut session, _) = session();
        session.add_item("MED001").unwrap();
        session.select_discount(DiscountSelection::SeniorPwd);
        let original_id = session.transaction_id().to_string();
        let original_lines = session.lines().to_vec();

        let held_id = session.hold(Some("senior lane".to_string())).unwrap();
        assert!(session.lines().is_empty());

        let resumed = session.recall(&held_id).unwrap();
        assert_eq!(resumed.id, original_id);
        assert_eq!(session.transaction_id(), original_id);
        assert_eq!(session.lines(), &original_lines[..]);
        assert_eq!(session.totals().unwrap().discount_amount_centavos, 120);
        assert!(session.held_transactions().is_empty());
    }

    #[test]
    fn test_return_flow_through_session() {
        let (mut session, _) = session();
        let line = session.add_item("MED001").unwrap();
        session.set_quantity(&line.id, 2).unwrap();
        let receipt_id = session.transaction_id().to_string();
        session.checkout(PaymentMethod::Cash).unwrap();

        let receipt_lines = session.lookup_receipt(&receipt_id).unwrap();
        assert_eq!(receipt_lines.len(), 1);

        let record = session
            .process_return(
                &receipt_id,
                &[ReturnRequestLine {
                    line_id: receipt_lines[0].id.clone(),
                    return_quantity: 1,
                }],
                "Expired",
            )
            .unwrap();
        assert_eq!(record.total_amount_centavos, 599);
        assert_eq!(record.processed_by, "USER1");
    }
}
