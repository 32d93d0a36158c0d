//! # Pricing Calculator
//!
//! Computes cart and checkout totals from line items and an optional coupon.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. subtotal         = Σ price × quantity                               │
//! │  2. applicable_total = Σ price × quantity over items the coupon covers  │
//! │  3. raw discount     = applicable × value / 100   (percentage)          │
//! │                      = value                      (amount)              │
//! │  4. discount         = clamp(raw, 0, applicable_total)                  │
//! │  5. taxable          = subtotal - discount                              │
//! │  6. tax              = taxable × tax_rate                               │
//! │  7. total            = taxable + tax + shipping                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coupon passed here is assumed to have passed
//! [`crate::coupon::apply_coupon`]; this module never rejects anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::applicable_total;
use crate::money::Money;
use crate::types::{Coupon, LineItem, TaxRate};
use crate::{DEFAULT_SHIPPING_COST, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Settings
// =============================================================================

/// Store-wide inputs to the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    pub tax_rate: TaxRate,

    /// Flat shipping charge added to every priced order.
    pub shipping_cost: Money,
}

impl PricingSettings {
    pub fn new(tax_rate: TaxRate, shipping_cost: Money) -> Self {
        PricingSettings {
            tax_rate,
            shipping_cost,
        }
    }

    /// Replaces the shipping charge.
    pub fn with_shipping(mut self, shipping_cost: Money) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }

    /// Replaces the tax rate.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

impl Default for PricingSettings {
    /// 18% GST, 50.00 flat shipping.
    fn default() -> Self {
        PricingSettings {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            shipping_cost: Money::new(DEFAULT_SHIPPING_COST),
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Totals for one order. Derived data; recompute rather than store.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub subtotal: Money,
    pub applicable_total: Money,
    pub discount: Money,
    pub taxable: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl PricingResult {
    /// Every field rounded to 2 decimal places, for display and for the
    /// order draft handed to the order store.
    pub fn rounded(&self) -> PricingResult {
        PricingResult {
            subtotal: self.subtotal.rounded(),
            applicable_total: self.applicable_total.rounded(),
            discount: self.discount.rounded(),
            taxable: self.taxable.rounded(),
            tax: self.tax.rounded(),
            shipping: self.shipping.rounded(),
            total: self.total.rounded(),
        }
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Caps a coupon's raw discount to `[0, applicable_total]`.
pub fn capped_discount(coupon: Option<&Coupon>, applicable_total: Money) -> Money {
    match coupon {
        Some(coupon) => coupon
            .raw_discount(applicable_total)
            .min(applicable_total)
            .non_negative(),
        None => Money::zero(),
    }
}

/// Computes the totals for `items` with an optional, already validated coupon.
///
/// Shipping is always added; whether an empty cart is priced at all is
/// the caller's decision.
///
/// ## Example
/// ```rust
/// use kitstore_core::pricing::{compute_totals, PricingSettings};
/// use kitstore_core::{Category, Coupon, CouponScope, LineItem, Money};
///
/// let items = vec![LineItem::new("kit", Money::new(100.0), 3, Category::Kits)];
/// let flat = Coupon::amount("FLAT500", 500.0, CouponScope::Universal);
///
/// let totals = compute_totals(&items, Some(&flat), &PricingSettings::default());
/// assert_eq!(totals.discount.cents(), 30000); // capped at 300, not 500
/// assert!(totals.taxable.is_zero());
/// ```
pub fn compute_totals(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    settings: &PricingSettings,
) -> PricingResult {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let applicable_total = applicable_total(items, coupon);
    let discount = capped_discount(coupon, applicable_total);

    let taxable = subtotal - discount;
    let tax = taxable.calculate_tax(settings.tax_rate);
    let shipping = settings.shipping_cost;

    PricingResult {
        subtotal,
        applicable_total,
        discount,
        taxable,
        tax,
        shipping,
        total: taxable + tax + shipping,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
