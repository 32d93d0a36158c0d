//! # Coupon Commands
//!
//! Applying and removing coupon codes on the session cart.
//!
//! ## Apply Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_coupon_code("save10")                                            │
//! │       │                                                                 │
//! │       ├── 1. snapshot cart items (lock, clone, unlock)                  │
//! │       ├── 2. catalog.coupon_by_code("SAVE10").await                     │
//! │       │        └── Err(DbError) ──► LookupFailure                       │
//! │       ├── 3. apply_coupon(code, items, coupon, now)                     │
//! │       │        └── Invalid / Paused / Expired                           │
//! │       └── 4. lock cart: coupon = Some(..) or None                       │
//! │                                                                         │
//! │  Every failure is non-fatal: the cart is priced without a coupon and    │
//! │  the response carries a CouponNotice for the UI.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::PricingCatalog;
use crate::commands::cart::CartResponse;
use crate::state::{CartState, StoreConfig};
use kitstore_core::coupon::normalize_code;
use kitstore_core::{apply_coupon, AppliedCoupon, CouponError, LineItem};

/// Why a coupon was not applied, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponNotice {
    /// `invalid`, `paused`, `expired` or `lookup_failure`.
    pub reason: String,
    pub message: String,
}

impl From<&CouponError> for CouponNotice {
    fn from(err: &CouponError) -> Self {
        CouponNotice {
            reason: err.reason().to_string(),
            message: err.to_string(),
        }
    }
}

/// Cart after a coupon attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub cart: CartResponse,

    /// Set when the code was not applied.
    pub notice: Option<CouponNotice>,
}

/// Looks `code` up in the catalog and validates it for `items` at `now`.
///
/// Shared by the cart and rental flows.
pub async fn resolve_coupon(
    catalog: &dyn PricingCatalog,
    code: &str,
    items: &[LineItem],
    now: DateTime<Utc>,
) -> Result<AppliedCoupon, CouponError> {
    let code = normalize_code(code);
    if code.is_empty() {
        return Err(CouponError::InvalidCoupon { code });
    }

    let coupon = catalog
        .coupon_by_code(&code)
        .await
        .map_err(|e| CouponError::LookupFailure(e.to_string()))?;

    apply_coupon(&code, items, coupon, now)
}

/// Applies a coupon code to the cart.
///
/// On any failure the cart falls back to no coupon (a previously applied
/// coupon is dropped too) and the reason is returned as a notice.
pub async fn apply_coupon_code(
    catalog: &dyn PricingCatalog,
    cart: &CartState,
    config: &StoreConfig,
    code: &str,
) -> CouponResponse {
    debug!(code = %code, "apply_coupon_code command");

    let items = cart.with_cart(|c| c.line_items());
    let result = resolve_coupon(catalog, code, &items, Utc::now()).await;

    let notice = match &result {
        Ok(applied) => {
            debug!(
                code = %applied.coupon.code,
                applicable_total = %applied.applicable_total,
                "Coupon applied"
            );
            None
        }
        Err(e) => {
            warn!(code = %code, reason = e.reason(), "Coupon not applied: {}", e);
            Some(CouponNotice::from(e))
        }
    };

    let coupon = result.ok().map(|applied| applied.coupon);
    let cart = cart.with_cart_mut(|c| {
        c.coupon = coupon;
        CartResponse::build(c, config)
    });

    CouponResponse { cart, notice }
}

/// Removes the coupon from the cart.
pub fn remove_coupon(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("remove_coupon command");

    cart.with_cart_mut(|c| {
        c.coupon = None;
        CartResponse::build(c, config)
    })
}
