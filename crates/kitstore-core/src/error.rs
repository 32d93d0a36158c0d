//! # Error Types
//!
//! Domain-specific error types for kitstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kitstore-core errors (this file)                                      │
//! │  ├── CoreError        - Cart / checkout / rental rule violations        │
//! │  ├── CouponError      - Coupon rejected at apply-time (non-fatal)       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kitstore-db errors (separate crate)                                   │
//! │  └── DbError          - Catalog storage failures                       │
//! │                                                                         │
//! │  storefront errors (app)                                               │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CouponError` is not part of `CoreError`: every variant is
//! recovered by pricing the order without a coupon and showing the message.

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the cart, checkout and rental flows.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was submitted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotInCart(String),

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Rental plan does not exist or is no longer offered.
    #[error("Rental plan not found: {0}")]
    RentalPlanNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Coupon Error
// =============================================================================

/// Reasons a coupon code could not be applied.
///
/// ## User Workflow
/// ```text
/// Enter code "SUMMER" ──► lookup ──► apply_coupon
///                            │            │
///                            │            ├── missing / malformed ─► InvalidCoupon
///                            │            ├── status = paused ─────► CouponPaused
///                            │            └── expiry ≤ now ────────► CouponExpired
///                            │
///                            └── storage unreachable ─────────────► LookupFailure
///
/// Every branch: price without coupon, show the message, keep going.
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponError {
    /// No coupon with this code, or the stored coupon is malformed.
    #[error("Invalid coupon code: {code}")]
    InvalidCoupon { code: String },

    /// Coupon exists but has been paused by an admin.
    #[error("Coupon {code} is currently paused")]
    CouponPaused { code: String },

    /// Coupon expiry date has passed.
    #[error("Coupon {code} expired on {expired_at}")]
    CouponExpired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    /// The coupon store could not be reached.
    #[error("Could not check coupon right now: {0}")]
    LookupFailure(String),
}

impl CouponError {
    /// Short machine-readable reason, used in logs and API payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            CouponError::InvalidCoupon { .. } => "invalid",
            CouponError::CouponPaused { .. } => "paused",
            CouponError::CouponExpired { .. } => "expired",
            CouponError::LookupFailure(_) => "lookup_failure",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user or admin input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad coupon code characters, bad email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
