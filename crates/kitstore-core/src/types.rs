//! # Domain Types
//!
//! Core domain types used throughout the pricing flows.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │     Coupon      │   │   RentalPlan    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  code           │   │  id             │       │
//! │  │  price          │   │  discount_type  │   │  name           │       │
//! │  │  quantity       │   │  discount_value │   │  duration_days  │       │
//! │  │  category       │   │  category_type  │   │  fee_percentage │       │
//! │  └─────────────────┘   │  status, expiry │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  CouponScope    │   │  DiscountType   │       │
//! │  │  Kits           │   │  Universal      │   │  percentage     │       │
//! │  │  Components     │   │  Kits           │   │  amount         │       │
//! │  └─────────────────┘   │  Components     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST on electronics kits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, rounded to whole basis points.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the rate as a multiplier (1800 bps → 0.18).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Category {
    /// Complete project kits.
    Kits,
    /// Individual electronic components.
    Components,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Kits => f.write_str("Kits"),
            Category::Components => f.write_str("Components"),
        }
    }
}

// =============================================================================
// Coupon Scope
// =============================================================================

/// Which line items a coupon discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum CouponScope {
    /// Every line item.
    Universal,
    /// Only kit line items.
    Kits,
    /// Only component line items.
    Components,
}

impl CouponScope {
    /// Returns true when a coupon with this scope discounts `category`.
    pub fn covers(&self, category: Category) -> bool {
        match self {
            CouponScope::Universal => true,
            CouponScope::Kits => category == Category::Kits,
            CouponScope::Components => category == Category::Components,
        }
    }
}

// =============================================================================
// Discount Type / Coupon Status
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` percent of the applicable total.
    Percentage,
    /// `discount_value` off, flat.
    Amount,
}

/// Admin on/off switch for a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    #[default]
    Active,
    Paused,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity pair in a cart or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier from the catalog.
    pub id: String,

    /// Display name, if the caller has one.
    #[serde(default)]
    pub name: Option<String>,

    /// Unit price.
    pub price: Money,

    /// Quantity, at least 1.
    pub quantity: i64,

    pub category: Category,
}

impl LineItem {
    /// Creates an unnamed line item.
    pub fn new(id: impl Into<String>, price: Money, quantity: i64, category: Category) -> Self {
        LineItem {
            id: id.into(),
            name: None,
            price,
            quantity,
            category,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount rule keyed by code.
///
/// ## Invariants
/// - `discount_value >= 0`
/// - percentage coupons have `discount_value <= 90`
///
/// Both are enforced by [`crate::validation::validate_coupon`] on the admin
/// side and re-checked by [`crate::coupon::apply_coupon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Normalised (upper-case) code.
    pub code: String,

    pub discount_type: DiscountType,

    /// Percent (0-90) or flat amount, depending on `discount_type`.
    pub discount_value: f64,

    /// Which line items the coupon discounts.
    pub category_type: CouponScope,

    #[serde(default)]
    pub status: CouponStatus,

    /// Coupon stops working at this instant. `None` never expires.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Creates an active, non-expiring percentage coupon.
    pub fn percentage(code: impl Into<String>, pct: f64, scope: CouponScope) -> Self {
        Coupon {
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: pct,
            category_type: scope,
            status: CouponStatus::Active,
            expiry_date: None,
        }
    }

    /// Creates an active, non-expiring flat-amount coupon.
    pub fn amount(code: impl Into<String>, amount: f64, scope: CouponScope) -> Self {
        Coupon {
            discount_type: DiscountType::Amount,
            ..Coupon::percentage(code, amount, scope)
        }
    }

    /// Sets the expiry date.
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: CouponStatus) -> Self {
        self.status = status;
        self
    }

    /// Checks the admin on/off switch.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == CouponStatus::Active
    }

    /// A coupon is expired once `now` reaches its expiry date.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry <= now)
    }

    /// Returns true when this coupon discounts `item`.
    #[inline]
    pub fn applies_to(&self, item: &LineItem) -> bool {
        self.category_type.covers(item.category)
    }

    /// Discount before capping at the applicable total.
    pub fn raw_discount(&self, applicable_total: Money) -> Money {
        match self.discount_type {
            DiscountType::Percentage => applicable_total.percentage(self.discount_value),
            DiscountType::Amount => Money::new(self.discount_value),
        }
    }
}

// =============================================================================
// Rental Plan
// =============================================================================

/// A rental duration offered for kits, priced as a share of the item price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalPlan {
    pub id: String,

    /// Display name, e.g. "2 Weeks".
    pub name: String,

    pub duration_days: u32,

    /// Rental fee as a percentage of the item price, in `(0, 100]`.
    pub fee_percentage: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
