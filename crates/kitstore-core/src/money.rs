//! # Money Module
//!
//! Provides the `Money` type for monetary values in the storefront currency.
//!
//! ## Precision Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FULL PRECISION INSIDE, TWO DECIMALS AT THE EDGE                        │
//! │                                                                         │
//! │  line totals ─► discount ─► taxable ─► tax ─► total                     │
//! │       (f64, never rounded between steps)                                │
//! │                                                                         │
//! │  PricingResult::rounded() / Money::cents() / Display                    │
//! │       (rounded to 2 decimal places, only for presentation)              │
//! │                                                                         │
//! │  Rounding each step would let the displayed parts drift from the       │
//! │  displayed total, so intermediate values are never rounded.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitstore_core::money::Money;
//!
//! let price = Money::new(100.0);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 20000);
//! assert_eq!(line_total.to_string(), "200.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units (rupees), kept at full `f64`
/// precision.
///
/// ## Where Money is Used
/// ```text
/// LineItem.price ──► line total ──► applicable total ──► discount
///                                                          │
/// subtotal ──────────────────────────► taxable ◄───────────┘
///                                        │
///                                        ├──► tax
///                                        ▼
///                              total = taxable + tax + shipping
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from an amount in major units.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount in major units.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Returns the value rounded to 2 decimal places.
    ///
    /// Presentation only. Never feed a rounded value back into a calculation.
    ///
    /// ## Example
    /// ```rust
    /// use kitstore_core::money::Money;
    ///
    /// assert_eq!(Money::new(32.399999).rounded(), Money::new(32.4));
    /// ```
    pub fn rounded(&self) -> Money {
        Money(self.cents() as f64 / 100.0)
    }

    /// Returns the value in paise (hundredths), rounded half away from zero.
    #[inline]
    pub fn cents(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Returns the larger of two amounts.
    #[inline]
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Floors the value at zero.
    #[inline]
    pub fn non_negative(self) -> Money {
        self.max(Money::zero())
    }

    /// Calculates tax on this amount.
    ///
    /// ## Example
    /// ```rust
    /// use kitstore_core::money::Money;
    /// use kitstore_core::types::TaxRate;
    ///
    /// let taxable = Money::new(180.0);
    /// let tax = taxable.calculate_tax(TaxRate::from_bps(1800)); // 18% GST
    /// assert_eq!(tax.cents(), 3240);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Returns `pct` percent of this amount.
    ///
    /// ## Example
    /// ```rust
    /// use kitstore_core::money::Money;
    ///
    /// assert_eq!(Money::new(200.0).percentage(10.0).cents(), 2000);
    /// ```
    pub fn percentage(&self, pct: f64) -> Money {
        Money(self.0 * pct / 100.0)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty as f64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol.
///
/// The storefront config adds the symbol when formatting for the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs())
    }
}

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

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
