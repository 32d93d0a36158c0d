//! # kitstore-core: Pure Pricing Logic for the KitStore storefront
//!
//! This crate prices carts, checkouts and rentals. It contains the
//! business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KitStore Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Cart ──► Apply Coupon ──► Checkout ──► Rental Quote          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (commands)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kitstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  types  │ │  money  │ │ coupon  │ │ pricing │ │  rental  │ │   │
//! │  │   │LineItem │ │  Money  │ │ apply   │ │ compute │ │ deposit, │ │   │
//! │  │   │ Coupon  │ │ TaxRate │ │ _coupon │ │ _totals │ │  refund  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                kitstore-db (coupon / plan catalog)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Coupon, RentalPlan, ...)
//! - [`money`] - Money type (full precision, rounded for display)
//! - [`coupon`] - Coupon validation at apply-time
//! - [`pricing`] - Cart / checkout totals
//! - [`rental`] - Rental deposit, fee and refund
//! - [`validation`] - Input and admin-side validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kitstore_core::pricing::{compute_totals, PricingSettings};
//! use kitstore_core::{Category, Coupon, CouponScope, LineItem, Money};
//!
//! let items = vec![LineItem::new("kit-1", Money::new(100.0), 2, Category::Kits)];
//! let coupon = Coupon::percentage("SAVE10", 10.0, CouponScope::Universal);
//! let settings = PricingSettings::default().with_shipping(Money::new(50.0));
//!
//! let totals = compute_totals(&items, Some(&coupon), &settings);
//! assert_eq!(totals.rounded().total.cents(), 26240); // 262.40
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod rental;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::{apply_coupon, AppliedCoupon};
pub use error::{CoreError, CouponError, ValidationError};
pub use money::Money;
pub use pricing::{compute_totals, PricingResult, PricingSettings};
pub use rental::{compute_rental, RentalQuote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default GST rate in basis points (18%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Default flat shipping charge per order.
pub const DEFAULT_SHIPPING_COST: f64 = 50.0;

/// Upper bound for a percentage coupon.
pub const MAX_PERCENTAGE_DISCOUNT: f64 = 90.0;

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart.
pub const MAX_ITEM_QUANTITY: i64 = 999;
