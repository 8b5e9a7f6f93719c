//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point arithmetic:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    ₱10.00 / 3 = ₱3.33 (×3 = ₱9.99)  → Lost ₱0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    1000 centavos / 3 = 333 centavos (×3 = 999 centavos)                │
//! │    We KNOW we lost 1 centavo, and handle it explicitly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use botica_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_centavos(599); // ₱5.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₱11.98
//! let total = price + Money::from_centavos(500); // ₱10.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. 1200 bps = 12% (the flat VAT rate),
/// 2000 bps = 20% (the senior/PWD statutory discount). The same type is
/// used for tax and discount rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage, clamped to `[0, 100]`.
    ///
    /// Out-of-range input is clamped rather than rejected: this is the
    /// cashier-facing tolerance for fat-finger entry of custom discounts.
    pub fn from_percent(pct: f64) -> Self {
        Rate((pct.clamp(0.0, 100.0) * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit
/// (centavos for Philippine pesos).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and netting
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let price = Money::from_centavos(599); // Represents ₱5.99
    /// assert_eq!(price.centavos(), 599);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from pesos and centavos.
    ///
    /// For negative amounts, only the peso part should be negative:
    /// `from_pesos_centavos(-5, 50)` = -₱5.50, not -₱4.50.
    #[inline]
    pub const fn from_pesos_centavos(pesos: i64, centavos: i64) -> Self {
        if pesos < 0 {
            Money(pesos * 100 - centavos)
        } else {
            Money(pesos * 100 + centavos)
        }
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Computes `rate` percent of this amount, rounding half-up at
    /// centavo precision.
    ///
    /// ## Implementation
    /// Integer math over i128 to prevent overflow on large amounts:
    /// `(amount_centavos * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_centavos(1198); // ₱11.98
    /// let vat = subtotal.percent_of(Rate::from_bps(1200)); // 12%
    /// // ₱11.98 × 12% = ₱1.4376 → rounds to ₱1.44 (144 centavos)
    /// assert_eq!(vat.centavos(), 144);
    /// ```
    pub fn percent_of(&self, rate: Rate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_centavos(amount as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let unit_price = Money::from_centavos(599); // ₱5.99
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.centavos(), 1198); // ₱11.98
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for receipts, logs, and debugging. The UI layer handles
/// localization on its own.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (report aggregation).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centavos() {
        let money = Money::from_centavos(1099);
        assert_eq!(money.centavos(), 1099);
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.centavos_part(), 99);
    }

    #[test]
    fn test_from_pesos_centavos() {
        let money = Money::from_pesos_centavos(10, 99);
        assert_eq!(money.centavos(), 1099);

        let negative = Money::from_pesos_centavos(-5, 50);
        assert_eq!(negative.centavos(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centavos(1099)), "₱10.99");
        assert_eq!(format!("{}", Money::from_centavos(500)), "₱5.00");
        assert_eq!(format!("{}", Money::from_centavos(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::from_centavos(0)), "₱0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centavos(1000);
        let b = Money::from_centavos(500);

        assert_eq!((a + b).centavos(), 1500);
        assert_eq!((a - b).centavos(), 500);
        assert_eq!((a * 3).centavos(), 3000);
    }

    #[test]
    fn test_percent_of_basic() {
        // ₱10.00 at 10% = ₱1.00
        let amount = Money::from_centavos(1000);
        let cut = amount.percent_of(Rate::from_bps(1000));
        assert_eq!(cut.centavos(), 100);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // ₱11.98 at 12% = ₱1.4376 → ₱1.44
        let amount = Money::from_centavos(1198);
        let vat = amount.percent_of(Rate::from_bps(1200));
        assert_eq!(vat.centavos(), 144);

        // ₱9.58 at 12% = ₱1.1496 → ₱1.15
        let amount = Money::from_centavos(958);
        let vat = amount.percent_of(Rate::from_bps(1200));
        assert_eq!(vat.centavos(), 115);
    }

    #[test]
    fn test_percent_of_full_rate_is_identity() {
        let amount = Money::from_centavos(1198);
        assert_eq!(amount.percent_of(Rate::from_bps(10000)), amount);
    }

    #[test]
    fn test_rate_from_percent_clamps() {
        assert_eq!(Rate::from_percent(20.0).bps(), 2000);
        assert_eq!(Rate::from_percent(12.5).bps(), 1250);
        assert_eq!(Rate::from_percent(150.0).bps(), 10000);
        assert_eq!(Rate::from_percent(-5.0).bps(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_centavos(100);
        assert!(positive.is_positive());

        let negative = Money::from_centavos(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().centavos(), 100);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 649]
            .into_iter()
            .map(Money::from_centavos)
            .sum();
        assert_eq!(total.centavos(), 999);
    }
}
