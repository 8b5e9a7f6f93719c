//! # Pricing & Totals Calculator
//!
//! Turns (line items, discount selection) into subtotal / discount / VAT /
//! total. This is the single pricing authority: the cart, checkout, and the
//! daily sales report all derive totals through this module, on every read.
//!
//! ## Fixed Policy: Discount Before VAT
//! ```text
//! subtotal              = Σ (unit price × quantity)
//! discount amount       = subtotal × rate(selection)
//! discounted subtotal   = subtotal − discount amount
//! VAT (12%)             = discounted subtotal × 12%
//! total                 = discounted subtotal + VAT
//! ```
//! VAT is computed strictly after the discount. The ordering is policy, not
//! configuration.
//!
//! ## Invariants
//! - `total == discounted_subtotal + vat` exactly (total is constructed as
//!   the sum, so no rounding drift is possible)
//! - `discount_amount <= subtotal` (rates are capped at 100%)

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountSelection, LineItem};
use crate::{STAR_POINTS_PESOS_PER_POINT, VAT_RATE};

// =============================================================================
// Totals
// =============================================================================

/// Derived transaction totals. Never stored; recomputed on every read so a
/// stale cached figure can never reach a receipt or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal_centavos: i64,
    pub discount_amount_centavos: i64,
    pub discounted_subtotal_centavos: i64,
    pub vat_centavos: i64,
    pub total_centavos: i64,
}

impl Totals {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_centavos(self.subtotal_centavos)
    }

    /// Returns the discount amount as Money.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_centavos(self.discount_amount_centavos)
    }

    /// Returns the discounted subtotal as Money.
    #[inline]
    pub fn discounted_subtotal(&self) -> Money {
        Money::from_centavos(self.discounted_subtotal_centavos)
    }

    /// Returns the VAT amount as Money.
    #[inline]
    pub fn vat(&self) -> Money {
        Money::from_centavos(self.vat_centavos)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_centavos)
    }

    /// Pure arithmetic over the given lines, with no input validation.
    ///
    /// Used by report aggregation, where records were already validated at
    /// the time they were finalized and aggregation must never fail.
    /// Callers pricing live input use [`compute_totals`] instead.
    pub fn unchecked(line_items: &[LineItem], discount: &DiscountSelection) -> Totals {
        let subtotal: Money = line_items.iter().map(LineItem::line_total).sum();
        let discount_amount = subtotal.percent_of(discount.rate());
        let discounted_subtotal = subtotal - discount_amount;
        let vat = discounted_subtotal.percent_of(VAT_RATE);
        let total = discounted_subtotal + vat;

        Totals {
            subtotal_centavos: subtotal.centavos(),
            discount_amount_centavos: discount_amount.centavos(),
            discounted_subtotal_centavos: discounted_subtotal.centavos(),
            vat_centavos: vat.centavos(),
            total_centavos: total.centavos(),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes transaction totals for the given lines and discount selection.
///
/// ## Input Constraints
/// Every line must have `quantity >= 1` and a non-negative unit price.
/// Violating lines are rejected with [`CoreError::InvalidLineItem`], never
/// silently clamped. (Custom discount percentages, by contrast, ARE clamped
/// to `[0, 100]` — see [`DiscountSelection::rate`].)
///
/// Pure function: no side effects, deterministic, callable concurrently
/// without synchronization.
pub fn compute_totals(
    line_items: &[LineItem],
    discount: &DiscountSelection,
) -> CoreResult<Totals> {
    for line in line_items {
        if line.quantity < 1 {
            return Err(CoreError::InvalidLineItem {
                item_code: line.item_code.clone(),
                reason: format!("quantity must be at least 1, got {}", line.quantity),
            });
        }
        if line.unit_price_centavos < 0 {
            return Err(CoreError::InvalidLineItem {
                item_code: line.item_code.clone(),
                reason: format!(
                    "unit price must not be negative, got {}",
                    line.unit_price_centavos
                ),
            });
        }
    }

    Ok(Totals::unchecked(line_items, discount))
}

/// Loyalty points earned for a completed sale: one point per full
/// ₱200 of the grand total.
#[inline]
pub fn star_points_earned(total: Money) -> i64 {
    total.centavos() / (STAR_POINTS_PESOS_PER_POINT * 100)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_code: &str, unit_price_centavos: i64, quantity: i64) -> LineItem {
        LineItem {
            id: format!("line-{item_code}-{quantity}"),
            item_code: item_code.to_string(),
            product_name: format!("Product {item_code}"),
            unit_price_centavos,
            quantity,
            unit: "tablet".to_string(),
            category: "Pain Relief".to_string(),
            brand: "PharmaCo".to_string(),
            dosage: "500mg".to_string(),
            requires_prescription: false,
        }
    }

    #[test]
    fn test_no_discount_worked_example() {
        // Paracetamol ₱5.99 × 2, no discount:
        // subtotal 1198, vat = 12% of 1198 = 143.76 → 144, total 1342
        let totals = compute_totals(&[line("MED001", 599, 2)], &DiscountSelection::None).unwrap();

        assert_eq!(totals.subtotal_centavos, 1198);
        assert_eq!(totals.discount_amount_centavos, 0);
        assert_eq!(totals.discounted_subtotal_centavos, 1198);
        assert_eq!(totals.vat_centavos, 144);
        assert_eq!(totals.total_centavos, 1342);
    }

    #[test]
    fn test_senior_pwd_worked_example() {
        // Same cart, 20% senior/PWD discount:
        // discount = 20% of 1198 = 239.6 → 240, discounted 958,
        // vat = 12% of 958 = 114.96 → 115, total 1073
        let totals =
            compute_totals(&[line("MED001", 599, 2)], &DiscountSelection::SeniorPwd).unwrap();

        assert_eq!(totals.discount_amount_centavos, 240);
        assert_eq!(totals.discounted_subtotal_centavos, 958);
        assert_eq!(totals.vat_centavos, 115);
        assert_eq!(totals.total_centavos, 1073);
    }

    #[test]
    fn test_custom_discount_is_clamped_not_rejected() {
        let lines = [line("MED001", 1000, 1)];

        let totals =
            compute_totals(&lines, &DiscountSelection::Custom { percent: 150.0 }).unwrap();
        // Clamped to 100%: everything discounted, VAT on zero
        assert_eq!(totals.discount_amount_centavos, 1000);
        assert_eq!(totals.total_centavos, 0);

        let totals =
            compute_totals(&lines, &DiscountSelection::Custom { percent: -10.0 }).unwrap();
        assert_eq!(totals.discount_amount_centavos, 0);
    }

    #[test]
    fn test_total_is_exactly_discounted_subtotal_plus_vat() {
        let carts: &[&[LineItem]] = &[
            &[line("MED001", 599, 2)],
            &[line("MED001", 599, 2), line("MED002", 1299, 1)],
            &[line("MED003", 799, 7), line("MED001", 1, 1)],
            &[],
        ];
        let discounts = [
            DiscountSelection::None,
            DiscountSelection::SeniorPwd,
            DiscountSelection::Custom { percent: 12.5 },
            DiscountSelection::Custom { percent: 100.0 },
        ];

        for lines in carts {
            for discount in &discounts {
                let t = compute_totals(lines, discount).unwrap();
                assert_eq!(t.total_centavos, t.discounted_subtotal_centavos + t.vat_centavos);
                assert!(t.discount_amount_centavos <= t.subtotal_centavos);
                assert!(t.total_centavos >= 0);
            }
        }
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = compute_totals(&[line("MED001", 599, 0)], &DiscountSelection::None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = compute_totals(&[line("MED001", -5, 1)], &DiscountSelection::None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { .. }));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = compute_totals(&[], &DiscountSelection::SeniorPwd).unwrap();
        assert_eq!(totals.subtotal_centavos, 0);
        assert_eq!(totals.total_centavos, 0);
    }

    #[test]
    fn test_star_points() {
        // One point per full ₱200
        assert_eq!(star_points_earned(Money::from_centavos(0)), 0);
        assert_eq!(star_points_earned(Money::from_centavos(19_999)), 0);
        assert_eq!(star_points_earned(Money::from_centavos(20_000)), 1);
        assert_eq!(star_points_earned(Money::from_centavos(130_000)), 6);
    }
}
