//! # Report Aggregator
//!
//! Pure read-side projections over the sale / return / prescription /
//! inventory record sets. Reports are computed on demand and never
//! persisted: they are always derivable from the stores.
//!
//! ## Conventions
//! - Daily bucketing uses the terminal's **local** calendar day, not UTC,
//!   matching register-close conventions.
//! - Date ranges are inclusive on both endpoints.
//! - Empty input produces a zero-valued report, never an error: "no data
//!   for this range" is a normal state.
//! - Breakdown maps are `BTreeMap`s, so serialized output is deterministic
//!   and repeated calls with no intervening writes compare equal.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::totals::Totals;
use crate::types::{
    DateRange, InventoryItem, PaymentMethod, Prescription, ReturnTransaction, Transaction,
    TransactionStatus,
};

/// Number of entries in the top-selling-items ranking.
const TOP_SELLING_LIMIT: usize = 5;

/// The local calendar day a record timestamp falls on.
fn local_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

// =============================================================================
// Daily Sales Report
// =============================================================================

/// One entry in the top-selling ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSellingItem {
    pub item_code: String,
    pub product_name: String,
    /// Total quantity sold across the day's transactions.
    pub quantity: i64,
    /// Total revenue attributed to the item (unit price × quantity).
    pub total_amount: Money,
}

/// Sales summary for a single local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySalesReport {
    pub date: NaiveDate,
    /// Sum of completed-transaction totals (discounted, VAT included).
    pub total_sales: Money,
    pub total_transactions: u64,
    /// Sum of same-day return amounts (the separate return ledger).
    pub total_returns: Money,
    /// `total_sales - total_returns`.
    pub net_sales: Money,
    /// Revenue per line category, attributed `price × quantity`. The
    /// transaction-level discount is intentionally not apportioned here.
    pub sales_by_category: BTreeMap<String, Money>,
    /// Transaction totals per tender method.
    pub sales_by_payment_method: BTreeMap<PaymentMethod, Money>,
    /// Top items by revenue; ties broken by quantity, then item code.
    pub top_selling_items: Vec<TopSellingItem>,
}

/// Builds the daily sales report for the given local calendar day.
///
/// Only Completed transactions count towards sales; Voided records are
/// excluded. Returns recorded on the same local day are summed into
/// `total_returns` and netted into `net_sales`.
pub fn daily_sales_report(
    sales: &[Transaction],
    returns: &[ReturnTransaction],
    date: NaiveDate,
) -> DailySalesReport {
    struct ItemAccumulator {
        product_name: String,
        quantity: i64,
        total_amount: Money,
    }

    let mut total_sales = Money::zero();
    let mut total_transactions: u64 = 0;
    let mut sales_by_category: BTreeMap<String, Money> = BTreeMap::new();
    let mut sales_by_payment_method: BTreeMap<PaymentMethod, Money> = BTreeMap::new();
    let mut item_sales: BTreeMap<String, ItemAccumulator> = BTreeMap::new();

    let day_sales = sales.iter().filter(|transaction| {
        transaction.status == TransactionStatus::Completed
            && local_day(transaction.timestamp) == date
    });

    for transaction in day_sales {
        let totals = Totals::unchecked(&transaction.line_items, &transaction.discount);
        total_sales += totals.total();
        total_transactions += 1;

        let method = transaction.payment_method.unwrap_or(PaymentMethod::Other);
        *sales_by_payment_method
            .entry(method)
            .or_insert_with(Money::zero) += totals.total();

        for line in &transaction.line_items {
            let category = if line.category.trim().is_empty() {
                "Uncategorized".to_string()
            } else {
                line.category.clone()
            };
            *sales_by_category.entry(category).or_insert_with(Money::zero) += line.line_total();

            let entry = item_sales
                .entry(line.item_code.clone())
                .or_insert_with(|| ItemAccumulator {
                    product_name: line.product_name.clone(),
                    quantity: 0,
                    total_amount: Money::zero(),
                });
            entry.quantity += line.quantity;
            entry.total_amount += line.line_total();
        }
    }

    let mut top_selling_items: Vec<TopSellingItem> = item_sales
        .into_iter()
        .map(|(item_code, acc)| TopSellingItem {
            item_code,
            product_name: acc.product_name,
            quantity: acc.quantity,
            total_amount: acc.total_amount,
        })
        .collect();
    // Revenue descending, then quantity descending, then item code
    // ascending for a fully deterministic ranking.
    top_selling_items.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(b.quantity.cmp(&a.quantity))
            .then(a.item_code.cmp(&b.item_code))
    });
    top_selling_items.truncate(TOP_SELLING_LIMIT);

    let total_returns: Money = returns
        .iter()
        .filter(|record| local_day(record.timestamp) == date)
        .map(ReturnTransaction::total_amount)
        .sum();

    DailySalesReport {
        date,
        total_sales,
        total_transactions,
        total_returns,
        net_sales: total_sales - total_returns,
        sales_by_category,
        sales_by_payment_method,
        top_selling_items,
    }
}

// =============================================================================
// Inventory Report
// =============================================================================

/// One stock line in the inventory report, with its valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReportItem {
    pub item_code: String,
    pub product_name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
    pub unit_price: Money,
    pub total_value: Money,
    pub category: String,
}

/// Snapshot of current stock levels against reorder points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub items: Vec<InventoryReportItem>,
    pub total_items: u64,
    pub total_value: Money,
    /// Count of items where `current_stock <= reorder_point` (inclusive).
    pub low_stock_items: u64,
}

/// Builds the inventory snapshot report.
///
/// `generated_at` is supplied by the caller so the aggregation stays a pure
/// function of its inputs.
pub fn inventory_report(items: &[InventoryItem], generated_at: DateTime<Utc>) -> InventoryReport {
    let report_items: Vec<InventoryReportItem> = items
        .iter()
        .map(|item| InventoryReportItem {
            item_code: item.item_code.clone(),
            product_name: item.product_name.clone(),
            current_stock: item.current_stock,
            reorder_point: item.reorder_point,
            unit_price: item.unit_price(),
            total_value: item.total_value(),
            category: item.category.clone(),
        })
        .collect();

    let total_value: Money = report_items.iter().map(|item| item.total_value).sum();
    let low_stock_items = items.iter().filter(|item| item.is_low_stock()).count() as u64;

    InventoryReport {
        generated_at,
        total_items: report_items.len() as u64,
        total_value,
        low_stock_items,
        items: report_items,
    }
}

// =============================================================================
// Prescription Report
// =============================================================================

/// Prescription activity over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_prescriptions: u64,
    /// Prescription count per doctor id.
    pub prescriptions_by_doctor: BTreeMap<String, u64>,
    /// Prescribed-line count per medicine item code.
    pub prescriptions_by_medicine: BTreeMap<String, u64>,
    /// Medicine lines / prescriptions; 0 when the range is empty.
    pub average_items_per_prescription: f64,
}

/// Builds the prescription report for prescriptions whose date falls in
/// `range` (inclusive on both ends).
pub fn prescription_report(
    prescriptions: &[Prescription],
    range: DateRange,
) -> PrescriptionReport {
    let mut total_prescriptions: u64 = 0;
    let mut total_medicine_lines: u64 = 0;
    let mut prescriptions_by_doctor: BTreeMap<String, u64> = BTreeMap::new();
    let mut prescriptions_by_medicine: BTreeMap<String, u64> = BTreeMap::new();

    for prescription in prescriptions
        .iter()
        .filter(|prescription| range.contains(prescription.date))
    {
        total_prescriptions += 1;
        total_medicine_lines += prescription.medicines.len() as u64;
        *prescriptions_by_doctor
            .entry(prescription.doctor_id.clone())
            .or_insert(0) += 1;
        for medicine in &prescription.medicines {
            *prescriptions_by_medicine
                .entry(medicine.item_code.clone())
                .or_insert(0) += 1;
        }
    }

    // Guard the empty range; 0/0 would be NaN
    let average_items_per_prescription = if total_prescriptions == 0 {
        0.0
    } else {
        total_medicine_lines as f64 / total_prescriptions as f64
    };

    PrescriptionReport {
        start_date: range.start,
        end_date: range.end,
        total_prescriptions,
        prescriptions_by_doctor,
        prescriptions_by_medicine,
        average_items_per_prescription,
    }
}

// =============================================================================
// Return Report
// =============================================================================

/// Per-product breakdown line of the return report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnProductBreakdown {
    pub item_code: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_amount: Money,
}

/// Return activity over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_returns: u64,
    pub total_amount: Money,
    /// Return count per declared reason.
    pub returns_by_reason: BTreeMap<String, u64>,
    /// Returned quantity and amount per product, largest refund first.
    pub returns_by_product: Vec<ReturnProductBreakdown>,
}

/// Builds the return report for returns recorded on local days within
/// `range` (inclusive).
pub fn return_report(returns: &[ReturnTransaction], range: DateRange) -> ReturnReport {
    struct ProductAccumulator {
        product_name: String,
        quantity: i64,
        total_amount: Money,
    }

    let mut total_returns: u64 = 0;
    let mut total_amount = Money::zero();
    let mut returns_by_reason: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_product: BTreeMap<String, ProductAccumulator> = BTreeMap::new();

    for record in returns
        .iter()
        .filter(|record| range.contains(local_day(record.timestamp)))
    {
        total_returns += 1;
        total_amount += record.total_amount();
        *returns_by_reason.entry(record.reason.clone()).or_insert(0) += 1;

        for line in &record.returned_lines {
            let entry = by_product
                .entry(line.item_code.clone())
                .or_insert_with(|| ProductAccumulator {
                    product_name: line.product_name.clone(),
                    quantity: 0,
                    total_amount: Money::zero(),
                });
            entry.quantity += line.return_quantity;
            entry.total_amount += line.refund_total();
        }
    }

    let mut returns_by_product: Vec<ReturnProductBreakdown> = by_product
        .into_iter()
        .map(|(item_code, acc)| ReturnProductBreakdown {
            item_code,
            product_name: acc.product_name,
            quantity: acc.quantity,
            total_amount: acc.total_amount,
        })
        .collect();
    returns_by_product.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(a.item_code.cmp(&b.item_code))
    });

    ReturnReport {
        start_date: range.start,
        end_date: range.end,
        total_returns,
        total_amount,
        returns_by_reason,
        returns_by_product,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountSelection, LineItem, ReturnedLine};
    use chrono::TimeZone;

    /// A timestamp that falls on the given local calendar day regardless of
    /// the timezone the tests run in.
    fn local_timestamp(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, hour, 30, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    fn line(id: &str, item_code: &str, name: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            item_code: item_code.to_string(),
            product_name: name.to_string(),
            unit_price_centavos: price,
            quantity,
            unit: "tablet".to_string(),
            category: "Pain Relief".to_string(),
            brand: "PharmaCo".to_string(),
            dosage: "500mg".to_string(),
            requires_prescription: false,
        }
    }

    fn completed_sale(
        id: &str,
        lines: Vec<LineItem>,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            line_items: lines,
            discount: DiscountSelection::None,
            customer_id: None,
            customer_name: None,
            star_points_id: None,
            timestamp,
            processed_by: "USER1".to_string(),
            payment_method: Some(method),
            status: TransactionStatus::Completed,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    #[test]
    fn test_daily_sales_filters_by_local_day_and_status() {
        let on_day = completed_sale(
            "S1",
            vec![line("l1", "MED001", "Paracetamol 500mg", 599, 2)],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 20, 10),
        );
        let other_day = completed_sale(
            "S2",
            vec![line("l2", "MED001", "Paracetamol 500mg", 599, 1)],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 21, 10),
        );
        let mut voided = on_day.clone();
        voided.id = "S3".to_string();
        voided.status = TransactionStatus::Voided;

        let report = daily_sales_report(&[on_day, other_day, voided], &[], day());

        assert_eq!(report.total_transactions, 1);
        // 1198 subtotal + 144 VAT
        assert_eq!(report.total_sales.centavos(), 1342);
        assert_eq!(report.net_sales, report.total_sales);
    }

    #[test]
    fn test_daily_sales_breakdowns() {
        let mut antibiotic = line("l2", "MED002", "Amoxicillin 250mg", 1299, 1);
        antibiotic.category = "Antibiotics".to_string();

        let cash = completed_sale(
            "S1",
            vec![line("l1", "MED001", "Paracetamol 500mg", 599, 2), antibiotic],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 20, 9),
        );
        let card = completed_sale(
            "S2",
            vec![line("l3", "MED001", "Paracetamol 500mg", 599, 1)],
            PaymentMethod::Card,
            local_timestamp(2026, 1, 20, 14),
        );

        let report = daily_sales_report(&[cash, card], &[], day());

        // Categories carry undiscounted price × quantity
        assert_eq!(
            report.sales_by_category.get("Pain Relief").map(Money::centavos),
            Some(599 * 3)
        );
        assert_eq!(
            report.sales_by_category.get("Antibiotics").map(Money::centavos),
            Some(1299)
        );
        // Payment buckets carry full transaction totals (with VAT)
        assert_eq!(
            report
                .sales_by_payment_method
                .get(&PaymentMethod::Cash)
                .map(Money::centavos),
            Some(2497 + 300) // 2497 subtotal, VAT 299.64 → 300
        );
        assert!(report.sales_by_payment_method.contains_key(&PaymentMethod::Card));
    }

    #[test]
    fn test_top_selling_tie_breaks() {
        // A and B tie on revenue (1000 centavos); B sold more units so it
        // ranks first. C and D tie fully; item code ascending decides.
        let sale = completed_sale(
            "S1",
            vec![
                line("l1", "MED-A", "Item A", 500, 2),  // 1000, qty 2
                line("l2", "MED-B", "Item B", 250, 4),  // 1000, qty 4
                line("l3", "MED-D", "Item D", 100, 1),  // 100, qty 1
                line("l4", "MED-C", "Item C", 100, 1),  // 100, qty 1
            ],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 20, 11),
        );

        let report = daily_sales_report(&[sale], &[], day());
        let codes: Vec<&str> = report
            .top_selling_items
            .iter()
            .map(|item| item.item_code.as_str())
            .collect();

        assert_eq!(codes, vec!["MED-B", "MED-A", "MED-C", "MED-D"]);
    }

    #[test]
    fn test_top_selling_limited_to_five() {
        let lines: Vec<LineItem> = (0..8)
            .map(|i| {
                line(
                    &format!("l{i}"),
                    &format!("MED{i:03}"),
                    &format!("Item {i}"),
                    100 + i,
                    1,
                )
            })
            .collect();
        let sale = completed_sale("S1", lines, PaymentMethod::Cash, local_timestamp(2026, 1, 20, 8));

        let report = daily_sales_report(&[sale], &[], day());
        assert_eq!(report.top_selling_items.len(), 5);
    }

    #[test]
    fn test_daily_sales_nets_same_day_returns() {
        let sale = completed_sale(
            "S1",
            vec![line("l1", "MED001", "Paracetamol 500mg", 599, 2)],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 20, 10),
        );
        let ret = ReturnTransaction {
            id: "RET-1".to_string(),
            receipt_id: "S1".to_string(),
            returned_lines: vec![ReturnedLine {
                line_id: "l1".to_string(),
                item_code: "MED001".to_string(),
                product_name: "Paracetamol 500mg".to_string(),
                unit_price_centavos: 599,
                return_quantity: 1,
            }],
            reason: "Expired".to_string(),
            total_amount_centavos: 599,
            timestamp: local_timestamp(2026, 1, 20, 16),
            processed_by: "USER1".to_string(),
        };

        let report = daily_sales_report(&[sale], &[ret], day());

        assert_eq!(report.total_returns.centavos(), 599);
        assert_eq!(
            report.net_sales.centavos(),
            report.total_sales.centavos() - 599
        );
    }

    #[test]
    fn test_empty_day_is_zero_valued_not_an_error() {
        let report = daily_sales_report(&[], &[], day());

        assert_eq!(report.total_transactions, 0);
        assert!(report.total_sales.is_zero());
        assert!(report.sales_by_category.is_empty());
        assert!(report.top_selling_items.is_empty());
    }

    #[test]
    fn test_report_idempotence() {
        let sales = vec![completed_sale(
            "S1",
            vec![line("l1", "MED001", "Paracetamol 500mg", 599, 2)],
            PaymentMethod::Cash,
            local_timestamp(2026, 1, 20, 10),
        )];

        let first = daily_sales_report(&sales, &[], day());
        let second = daily_sales_report(&sales, &[], day());
        assert_eq!(first, second);
    }

    #[test]
    fn test_inventory_report() {
        let items = vec![
            InventoryItem {
                item_code: "MED001".to_string(),
                product_name: "Paracetamol 500mg".to_string(),
                current_stock: 150,
                reorder_point: 50,
                unit_price_centavos: 599,
                category: "Pain Relief".to_string(),
            },
            InventoryItem {
                item_code: "MED002".to_string(),
                product_name: "Amoxicillin 250mg".to_string(),
                current_stock: 30,
                reorder_point: 30,
                unit_price_centavos: 1299,
                category: "Antibiotics".to_string(),
            },
        ];

        let report = inventory_report(&items, Utc::now());

        assert_eq!(report.total_items, 2);
        // Inclusive boundary: stock == reorder point counts as low
        assert_eq!(report.low_stock_items, 1);
        assert_eq!(
            report.total_value.centavos(),
            599 * 150 + 1299 * 30
        );
    }

    #[test]
    fn test_prescription_report_counts_and_average() {
        let base = Prescription {
            id: "RX1".to_string(),
            patient_name: "Juan dela Cruz".to_string(),
            doctor_name: "Dr. Santos".to_string(),
            doctor_id: "DR001".to_string(),
            date: day(),
            medicines: vec![
                line("m1", "MED001", "Paracetamol 500mg", 599, 1),
                line("m2", "MED002", "Amoxicillin 250mg", 1299, 1),
            ],
            notes: None,
            status: crate::types::PrescriptionStatus::Pending,
            image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut second = base.clone();
        second.id = "RX2".to_string();
        second.doctor_id = "DR002".to_string();
        second.medicines = vec![line("m3", "MED001", "Paracetamol 500mg", 599, 2)];
        let mut out_of_range = base.clone();
        out_of_range.id = "RX3".to_string();
        out_of_range.date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        let report = prescription_report(
            &[base, second, out_of_range],
            DateRange::single_day(day()),
        );

        assert_eq!(report.total_prescriptions, 2);
        assert_eq!(report.prescriptions_by_doctor.get("DR001"), Some(&1));
        assert_eq!(report.prescriptions_by_doctor.get("DR002"), Some(&1));
        assert_eq!(report.prescriptions_by_medicine.get("MED001"), Some(&2));
        assert!((report.average_items_per_prescription - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prescription_report_empty_range_has_zero_average() {
        let report = prescription_report(&[], DateRange::single_day(day()));
        assert_eq!(report.total_prescriptions, 0);
        assert_eq!(report.average_items_per_prescription, 0.0);
    }

    #[test]
    fn test_return_report_breakdowns() {
        let make_return = |id: &str, reason: &str, qty: i64, timestamp| ReturnTransaction {
            id: id.to_string(),
            receipt_id: "S1".to_string(),
            returned_lines: vec![ReturnedLine {
                line_id: "l1".to_string(),
                item_code: "MED001".to_string(),
                product_name: "Paracetamol 500mg".to_string(),
                unit_price_centavos: 599,
                return_quantity: qty,
            }],
            reason: reason.to_string(),
            total_amount_centavos: 599 * qty,
            timestamp,
            processed_by: "USER1".to_string(),
        };

        let records = vec![
            make_return("RET-1", "Expired", 1, local_timestamp(2026, 1, 20, 9)),
            make_return("RET-2", "Expired", 2, local_timestamp(2026, 1, 20, 15)),
            make_return("RET-3", "Wrong Medicine", 1, local_timestamp(2026, 1, 20, 17)),
            // Outside the range
            make_return("RET-4", "Expired", 1, local_timestamp(2026, 2, 2, 9)),
        ];

        let report = return_report(&records, DateRange::single_day(day()));

        assert_eq!(report.total_returns, 3);
        assert_eq!(report.total_amount.centavos(), 599 * 4);
        assert_eq!(report.returns_by_reason.get("Expired"), Some(&2));
        assert_eq!(report.returns_by_reason.get("Wrong Medicine"), Some(&1));
        assert_eq!(report.returns_by_product.len(), 1);
        assert_eq!(report.returns_by_product[0].quantity, 4);
    }
}
