//! # Return Validation
//!
//! Pure validation and math for processing a return against a located
//! receipt. The stateful half of the flow (receipt lookup, recording the
//! return) lives in the store layer; everything here is deterministic over
//! its inputs.
//!
//! ## Per-Attempt State Machine
//! ```text
//! ReceiptLookup ──► ItemSelection ──► Validated ──► Recorded
//!      (store)          (UI)          (this module)   (store)
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, ReturnedLine};

use serde::{Deserialize, Serialize};

/// One requested return line, keyed by the original receipt line id.
///
/// A request with `return_quantity` 0 means "not selected" and is skipped;
/// the UI sends the whole receipt back with zeros for untouched lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequestLine {
    pub line_id: String,
    pub return_quantity: i64,
}

/// Validates a return request against the purchased receipt lines.
///
/// ## Rules
/// - `reason` must not be blank → [`CoreError::MissingReason`]
/// - at least one line must have quantity >= 1 → [`CoreError::NoItemsSelected`]
/// - every selected line must exist on the receipt → [`CoreError::LineNotOnReceipt`]
/// - every selected quantity must be in `1..=purchased` → [`CoreError::OverReturn`]
///
/// Returns the resolved [`ReturnedLine`]s (receipt data + return quantity)
/// ready to be recorded.
pub fn validate_return(
    purchased: &[LineItem],
    requested: &[ReturnRequestLine],
    reason: &str,
) -> CoreResult<Vec<ReturnedLine>> {
    if reason.trim().is_empty() {
        return Err(CoreError::MissingReason);
    }

    let selected: Vec<&ReturnRequestLine> = requested
        .iter()
        .filter(|request| request.return_quantity != 0)
        .collect();

    if selected.is_empty() {
        return Err(CoreError::NoItemsSelected);
    }

    let mut returned = Vec::with_capacity(selected.len());
    for request in selected {
        let line = purchased
            .iter()
            .find(|line| line.id == request.line_id)
            .ok_or_else(|| CoreError::LineNotOnReceipt {
                line_id: request.line_id.clone(),
            })?;

        if request.return_quantity < 1 || request.return_quantity > line.quantity {
            return Err(CoreError::OverReturn {
                item_code: line.item_code.clone(),
                purchased: line.quantity,
                requested: request.return_quantity,
            });
        }

        returned.push(ReturnedLine {
            line_id: line.id.clone(),
            item_code: line.item_code.clone(),
            product_name: line.product_name.clone(),
            unit_price_centavos: line.unit_price_centavos,
            return_quantity: request.return_quantity,
        });
    }

    Ok(returned)
}

/// Total refund for a set of validated return lines.
#[inline]
pub fn return_total(lines: &[ReturnedLine]) -> Money {
    lines.iter().map(ReturnedLine::refund_total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
