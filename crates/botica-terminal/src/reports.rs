//! # Report Service
//!
//! Wires the pure report aggregator to the record stores. Each report takes
//! an owned snapshot of its stores (copy-on-read) and delegates to
//! `botica_core::report`, so generation never blocks writers and two calls
//! with no intervening writes produce identical output.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use botica_core::report::{
    daily_sales_report, inventory_report, prescription_report, return_report, DailySalesReport,
    InventoryReport, PrescriptionReport, ReturnReport,
};
use botica_core::DateRange;
use botica_store::{InventoryStore, PrescriptionStore, ReturnStore, SaleStore};

use crate::error::TerminalResult;

/// Read-side report facade over the shared stores.
pub struct ReportService {
    sales: Arc<dyn SaleStore>,
    returns: Arc<dyn ReturnStore>,
    prescriptions: Arc<dyn PrescriptionStore>,
    inventory: Arc<dyn InventoryStore>,
}

impl ReportService {
    /// Creates the service over the given stores.
    pub fn new(
        sales: Arc<dyn SaleStore>,
        returns: Arc<dyn ReturnStore>,
        prescriptions: Arc<dyn PrescriptionStore>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Self {
        ReportService {
            sales,
            returns,
            prescriptions,
            inventory,
        }
    }

    /// Daily sales report for one local calendar day.
    pub fn daily_sales(&self, date: NaiveDate) -> TerminalResult<DailySalesReport> {
        debug!(%date, "Generating daily sales report");
        let sales = self.sales.list()?;
        let returns = self.returns.list()?;
        Ok(daily_sales_report(&sales, &returns, date))
    }

    /// Current stock snapshot against reorder points.
    pub fn inventory(&self) -> TerminalResult<InventoryReport> {
        debug!("Generating inventory report");
        let items = self.inventory.list()?;
        Ok(inventory_report(&items, Utc::now()))
    }

    /// Prescription activity over an inclusive date range.
    pub fn prescriptions(&self, range: DateRange) -> TerminalResult<PrescriptionReport> {
        debug!(start = %range.start, end = %range.end, "Generating prescription report");
        let prescriptions = self.prescriptions.list()?;
        Ok(prescription_report(&prescriptions, range))
    }

    /// Return activity over an inclusive date range.
    pub fn returns(&self, range: DateRange) -> TerminalResult<ReturnReport> {
        debug!(start = %range.start, end = %range.end, "Generating return report");
        let returns = self.returns.list()?;
        Ok(return_report(&returns, range))
    }
}
