//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A quote that shows $24.999999999 is a quote the customer questions.    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    Prices are i64 cents; percentages (tax, discounts) are u32 basis     │
//! │    points (1 bp = 0.01%). Every derived amount rounds exactly once.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quoteflow_core::money::{Money, Rate};
//!
//! let unit_price = Money::from_cents(1000);          // $10.00
//! let gross = unit_price.multiply_quantity(2);       // $20.00
//!
//! let ten_percent = Rate::from_bps(1000);            // 10%
//! assert_eq!(gross.percent_of(ten_percent).cents(), 200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results (gross − discount) may dip below
///   zero before clamping
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quoteflow_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Clamps the value into `[lo, hi]`.
    ///
    /// Used when an absolute discount must not exceed the line gross.
    #[inline]
    pub fn clamp_between(&self, lo: Money, hi: Money) -> Money {
        Money(self.0.clamp(lo.0, hi.0))
    }

    /// Returns `max(self, floor)` - clamps a net amount so it never goes
    /// below zero (or any other floor).
    #[inline]
    pub fn at_least(&self, floor: Money) -> Money {
        Money(self.0.max(floor.0))
    }

    /// Multiplies money by a quantity, saturating at the `i64` limits.
    ///
    /// Inbound prices and quantities are clamped at the boundary, so a
    /// saturated result only appears for values constructed directly.
    ///
    /// ## Example
    /// ```rust
    /// use quoteflow_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate` percent of this amount, rounded to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow:
    /// `(amount_cents * bps + 5000) / 10000`
    /// The +5000 provides half-up rounding (5000/10000 = 0.5 cent).
    ///
    /// ## Example
    /// ```rust
    /// use quoteflow_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_cents(2000);  // $20.00
    /// let tax = subtotal.percent_of(Rate::from_bps(1000)); // 10%
    /// assert_eq!(tax.cents(), 200); // $2.00
    /// ```
    pub fn percent_of(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Reduces this amount by a percentage and returns the remainder.
    ///
    /// This is the order-level discount step: `total × (1 − pct/100)`.
    ///
    /// ## Example
    /// ```rust
    /// use quoteflow_core::money::{Money, Rate};
    ///
    /// let total = Money::from_cents(2500);     // $25.00
    /// let after = total.less_percent(Rate::from_bps(2000)); // 20% off
    /// assert_eq!(after.cents(), 2000); // $20.00
    /// ```
    pub fn less_percent(&self, rate: Rate) -> Money {
        *self - self.percent_of(rate)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the fixed tax rate), 825 bps = 8.25%
///
/// The same type covers the tax rate, per-line percent discounts, and the
/// order-level discount, so clamping rules live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// 100% expressed in basis points.
    pub const FULL_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    ///
    /// Negative or non-finite input collapses to zero; the callers that
    /// accept free-form numeric input do their own reject/clamp first.
    pub fn from_percent(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate(0);
        }
        Rate((pct * 100.0).round() as u32)
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

    /// Clamps the rate to at most 100%.
    ///
    /// Per-line percent discounts are interpreted as `clamp(value, 0, 100)`.
    #[inline]
    pub const fn clamp_to_full(&self) -> Self {
        if self.0 > Self::FULL_BPS {
            Rate(Self::FULL_BPS)
        } else {
            Rate(self.0)
        }
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
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the demo binary. The hosting surface formats
/// currency itself to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

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
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_percent_of_exact() {
        // $20.00 at 10% = $2.00
        let amount = Money::from_cents(2000);
        assert_eq!(amount.percent_of(Rate::from_bps(1000)).cents(), 200);
    }

    #[test]
    fn test_percent_of_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83 (half-up with +5000)
        let amount = Money::from_cents(1000);
        assert_eq!(amount.percent_of(Rate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_less_percent() {
        let total = Money::from_cents(2500);
        assert_eq!(total.less_percent(Rate::from_bps(2000)).cents(), 2000);
        // 0% leaves the amount untouched
        assert_eq!(total.less_percent(Rate::zero()).cents(), 2500);
    }

    #[test]
    fn test_clamping_helpers() {
        let gross = Money::from_cents(2000);
        let big_discount = Money::from_cents(5000);
        assert_eq!(
            big_discount.clamp_between(Money::zero(), gross).cents(),
            2000
        );

        let negative_net = Money::from_cents(-300);
        assert_eq!(negative_net.at_least(Money::zero()).cents(), 0);
    }

    #[test]
    fn test_rate_from_percent() {
        assert_eq!(Rate::from_percent(10.0).bps(), 1000);
        assert_eq!(Rate::from_percent(8.25).bps(), 825);
        assert_eq!(Rate::from_percent(-3.0).bps(), 0);
        assert_eq!(Rate::from_percent(f64::NAN).bps(), 0);
    }

    #[test]
    fn test_rate_clamp_to_full() {
        assert_eq!(Rate::from_bps(15_000).clamp_to_full().bps(), 10_000);
        assert_eq!(Rate::from_bps(2_500).clamp_to_full().bps(), 2_500);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MIN).multiply_quantity(3).cents(), i64::MIN);
    }
}
