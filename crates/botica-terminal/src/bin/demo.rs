//! # Scripted Terminal Demo
//!
//! Seeds the catalog, inventory, and a prescription, then drives a full
//! cashier session against the in-memory stores: scan → discount → hold →
//! recall → checkout → return, finishing with the four reports as JSON.
//!
//! ## Usage
//! ```bash
//! # Default branch and cashier
//! cargo run -p botica-terminal --bin demo
//!
//! # Custom branch/cashier
//! cargo run -p botica-terminal --bin demo -- --branch B002 --user MARIA
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::env;
use std::sync::Arc;

use chrono::{Local, Utc};
use tracing_subscriber::EnvFilter;

use botica_core::returns::ReturnRequestLine;
use botica_core::{
    DateRange, DiscountSelection, InventoryItem, LineItem, PaymentMethod, Prescription,
    PrescriptionStatus, Product,
};
use botica_store::{
    HoldRegistry, InventoryStore, MemoryCatalog, MemoryInventoryStore, MemoryPrescriptionStore,
    MemoryReturnStore, MemorySaleStore, PrescriptionStore, ReturnStore, SaleStore,
    TransactionIdGenerator,
};
use botica_terminal::{ReportService, StaticIdentity, TerminalConfig, TerminalSession};

/// Pharmacy shelf stock used to seed the catalog and inventory.
/// (item code, name, price in centavos, unit, category, brand, dosage,
/// requires prescription, stock, reorder point)
const SHELF: &[(&str, &str, i64, &str, &str, &str, &str, bool, i64, i64)] = &[
    ("MED001", "Paracetamol 500mg", 599, "tablet", "Pain Relief", "PharmaCo", "500mg", false, 150, 50),
    ("MED002", "Amoxicillin 250mg", 1299, "capsule", "Antibiotics", "MediCorp", "250mg", true, 75, 30),
    ("MED003", "Ibuprofen 200mg", 799, "tablet", "Pain Relief", "PharmaCo", "200mg", false, 90, 40),
    ("MED004", "Cetirizine 10mg", 899, "tablet", "Antihistamines", "AllerCare", "10mg", false, 40, 40),
    ("MED005", "Ascorbic Acid 500mg", 450, "tablet", "Vitamins", "VitaPlus", "500mg", false, 200, 60),
];

fn shelf_products() -> Vec<Product> {
    SHELF
        .iter()
        .map(
            |&(item_code, name, price, unit, category, brand, dosage, requires_rx, _, _)| Product {
                item_code: item_code.to_string(),
                product_name: name.to_string(),
                unit_price_centavos: price,
                unit: unit.to_string(),
                category: category.to_string(),
                brand: brand.to_string(),
                dosage: dosage.to_string(),
                requires_prescription: requires_rx,
                barcode: None,
            },
        )
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut branch = String::from("B001");
    let mut user = String::from("USER1");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--branch" | "-b" => {
                if i + 1 < args.len() {
                    branch = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Botica POS Terminal Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -b, --branch <ID>  Branch id for transaction ids (default: B001)");
                println!("  -u, --user <ID>    Cashier user id (default: USER1)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Botica POS Terminal Demo");
    println!("========================");
    println!("Branch:  {branch}");
    println!("Cashier: {user}");
    println!();

    // Shared branch-wide state
    let catalog = Arc::new(MemoryCatalog::with_products(shelf_products()));
    let registry = Arc::new(HoldRegistry::new());
    let sales = Arc::new(MemorySaleStore::new());
    let returns = Arc::new(MemoryReturnStore::new());
    let prescriptions = Arc::new(MemoryPrescriptionStore::new());
    let inventory = Arc::new(MemoryInventoryStore::new());
    let transaction_ids = Arc::new(TransactionIdGenerator::new(branch));

    for &(item_code, name, price, _, category, _, _, _, stock, reorder) in SHELF {
        inventory.upsert(InventoryItem {
            item_code: item_code.to_string(),
            product_name: name.to_string(),
            current_stock: stock,
            reorder_point: reorder,
            unit_price_centavos: price,
            category: category.to_string(),
        })?;
    }
    println!("✓ Seeded catalog and inventory ({} products)", SHELF.len());

    // A prescription on file for the antibiotic sale
    let amoxicillin = catalog
        .get_product("MED002")
        .ok_or("seeded product missing")?;
    let mut rx_line = LineItem::from_product(&amoxicillin);
    rx_line.quantity = 21;
    prescriptions.save(Prescription {
        id: "RX-0001".to_string(),
        patient_name: "Juan dela Cruz".to_string(),
        doctor_name: "Dr. Reyes Santos".to_string(),
        doctor_id: "DR001".to_string(),
        date: Local::now().date_naive(),
        medicines: vec![rx_line],
        notes: Some("1 capsule three times daily for 7 days".to_string()),
        status: PrescriptionStatus::Pending,
        image_path: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })?;
    println!("✓ Prescription RX-0001 on file");
    println!();

    let mut session = TerminalSession::new(
        TerminalConfig::default(),
        Arc::new(StaticIdentity::new(user)),
        catalog,
        Arc::clone(&registry),
        Arc::clone(&sales) as Arc<dyn SaleStore>,
        Arc::clone(&returns) as Arc<dyn ReturnStore>,
        transaction_ids,
    );

    // --- Sale 1: senior citizen, suspended mid-transaction -------------------
    let line = session.add_item("MED001")?;
    session.set_quantity(&line.id, 2)?;
    session.select_discount(DiscountSelection::SeniorPwd);
    session.set_customer(
        Some("C-1001".to_string()),
        Some("Lola Remedios".to_string()),
        Some("SP-778".to_string()),
    );
    let totals = session.totals()?;
    println!(
        "Transaction {}: subtotal {} less {} discount, VAT {}, total {}",
        session.transaction_id(),
        totals.subtotal(),
        totals.discount_amount(),
        totals.vat(),
        totals.total()
    );

    let held_id = session.hold(Some("customer fetching senior ID".to_string()))?;
    println!("  … suspended as {held_id}");

    // --- Sale 2: walk-in rung up while the first waits -----------------------
    session.add_item("MED003")?;
    session.add_item("MED005")?;
    let walk_in = session.checkout(PaymentMethod::Cash)?;
    println!(
        "Walk-in sale {} complete: total ₱{}.{:02}",
        walk_in.transaction_id,
        walk_in.total_centavos / 100,
        walk_in.total_centavos % 100
    );

    // --- Resume and finish the held sale -------------------------------------
    session.recall(&held_id)?;
    let senior = session.checkout(PaymentMethod::Cash)?;
    println!(
        "Senior sale {} complete: total ₱{}.{:02} ({} star points)",
        senior.transaction_id,
        senior.total_centavos / 100,
        senior.total_centavos % 100,
        senior.star_points_earned
    );

    // --- Return one tablet from the senior sale ------------------------------
    let receipt_lines = session.lookup_receipt(&senior.transaction_id)?;
    let returned = session.process_return(
        &senior.transaction_id,
        &[ReturnRequestLine {
            line_id: receipt_lines[0].id.clone(),
            return_quantity: 1,
        }],
        "Wrong dosage",
    )?;
    println!(
        "Return {} recorded against {}: {}",
        returned.id,
        returned.receipt_id,
        returned.total_amount()
    );
    println!();

    // --- Reports --------------------------------------------------------------
    let reports = ReportService::new(sales, returns, prescriptions, inventory);
    let today = Local::now().date_naive();
    let range = DateRange::single_day(today);

    println!("Daily Sales Report ({today})");
    println!("{}", serde_json::to_string_pretty(&reports.daily_sales(today)?)?);
    println!();
    println!("Inventory Report");
    println!("{}", serde_json::to_string_pretty(&reports.inventory()?)?);
    println!();
    println!("Prescription Report");
    println!("{}", serde_json::to_string_pretty(&reports.prescriptions(range)?)?);
    println!();
    println!("Return Report");
    println!("{}", serde_json::to_string_pretty(&reports.returns(range)?)?);

    println!();
    println!("✓ Demo complete");
    Ok(())
}
