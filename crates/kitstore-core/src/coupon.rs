//! # Coupon Application
//!
//! Decides whether a looked-up coupon may be applied to an order.
//!
//! ## Apply Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  code typed by user                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_code ──► catalog lookup (async, storefront) ──► Option<Coupon>│
//! │                                                               │         │
//! │                                                               ▼         │
//! │  apply_coupon(code, items, coupon, now) ← THIS MODULE                   │
//! │       │                                                                 │
//! │       ├── None / empty code / malformed ──► InvalidCoupon               │
//! │       ├── status == paused ───────────────► CouponPaused                │
//! │       ├── expiry_date <= now ─────────────► CouponExpired               │
//! │       └── OK ──► AppliedCoupon { coupon, applicable_total }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CouponError;
use crate::money::Money;
use crate::types::{Coupon, DiscountType, LineItem};
use crate::MAX_PERCENTAGE_DISCOUNT;

/// A coupon that passed apply-time validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub coupon: Coupon,

    /// Portion of the items' subtotal this coupon discounts. Zero when no
    /// item is in the coupon's category; the coupon still applies.
    pub applicable_total: Money,
}

/// Canonical form of a coupon code: trimmed and upper-cased.
///
/// ## Example
/// ```rust
/// use kitstore_core::coupon::normalize_code;
///
/// assert_eq!(normalize_code("  save10 "), "SAVE10");
/// ```
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Sum of line totals the coupon discounts. Zero without a coupon.
pub fn applicable_total(items: &[LineItem], coupon: Option<&Coupon>) -> Money {
    match coupon {
        Some(coupon) => items
            .iter()
            .filter(|item| coupon.applies_to(item))
            .map(LineItem::line_total)
            .sum(),
        None => Money::zero(),
    }
}

/// Validates a looked-up coupon for the given code and line items.
///
/// `coupon` is whatever the catalog returned for `code` (`None` when there
/// was no match). `now` is supplied by the caller so this stays pure.
///
/// ## Errors
/// Checked in order: existence, status, expiry. See [`CouponError`].
pub fn apply_coupon(
    code: &str,
    items: &[LineItem],
    coupon: Option<Coupon>,
    now: DateTime<Utc>,
) -> Result<AppliedCoupon, CouponError> {
    let code = normalize_code(code);

    let coupon = match coupon {
        Some(coupon) if !code.is_empty() && normalize_code(&coupon.code) == code => coupon,
        _ => return Err(CouponError::InvalidCoupon { code }),
    };

    if !is_well_formed(&coupon) {
        return Err(CouponError::InvalidCoupon { code });
    }

    if !coupon.is_active() {
        return Err(CouponError::CouponPaused { code });
    }

    if let Some(expired_at) = coupon.expiry_date.filter(|_| coupon.is_expired_at(now)) {
        return Err(CouponError::CouponExpired { code, expired_at });
    }

    let applicable_total = applicable_total(items, Some(&coupon));
    Ok(AppliedCoupon {
        coupon,
        applicable_total,
    })
}

/// Stored coupons can predate admin validation, so the value invariants are
/// re-checked before use.
fn is_well_formed(coupon: &Coupon) -> bool {
    let value = coupon.discount_value;
    if !value.is_finite() || value < 0.0 {
        return false;
    }
    coupon.discount_type != DiscountType::Percentage || value <= MAX_PERCENTAGE_DISCOUNT
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, CouponScope, CouponStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn cart() -> Vec<LineItem> {
        vec![
            LineItem::new("kit-1", Money::new(100.0), 2, Category::Kits),
            LineItem::new("led-1", Money::new(5.0), 10, Category::Components),
        ]
    }

    #[test]
    fn test_valid_coupon_applies() {
        let coupon = Coupon::percentage("SAVE10", 10.0, CouponScope::Universal);
        let applied = apply_coupon("save10", &cart(), Some(coupon), now()).unwrap();
        assert_eq!(applied.applicable_total.cents(), 25000);
    }

    #[test]
    fn test_missing_coupon_is_invalid() {
        let err = apply_coupon("GHOST", &cart(), None, now()).unwrap_err();
        assert_eq!(
            err,
            CouponError::InvalidCoupon {
                code: "GHOST".to_string()
            }
        );
    }

    #[test]
    fn test_empty_code_is_invalid() {
        let coupon = Coupon::percentage("", 10.0, CouponScope::Universal);
        let err = apply_coupon("   ", &cart(), Some(coupon), now()).unwrap_err();
        assert!(matches!(err, CouponError::InvalidCoupon { .. }));
    }

    #[test]
    fn test_mismatched_code_is_invalid() {
        let coupon = Coupon::percentage("OTHER", 10.0, CouponScope::Universal);
        let err = apply_coupon("SAVE10", &cart(), Some(coupon), now()).unwrap_err();
        assert!(matches!(err, CouponError::InvalidCoupon { .. }));
    }

    #[test]
    fn test_paused_coupon() {
        let coupon = Coupon::percentage("SAVE10", 10.0, CouponScope::Universal)
            .with_status(CouponStatus::Paused);
        let err = apply_coupon("SAVE10", &cart(), Some(coupon), now()).unwrap_err();
        assert!(matches!(err, CouponError::CouponPaused { .. }));
    }

    #[test]
    fn test_paused_takes_precedence_over_expired() {
        let coupon = Coupon::percentage("OLD", 10.0, CouponScope::Universal)
            .with_status(CouponStatus::Paused)
            .with_expiry(now() - Duration::days(3));
        let err = apply_coupon("OLD", &cart(), Some(coupon), now()).unwrap_err();
        assert_eq!(err.reason(), "paused");
    }

    #[test]
    fn test_expired_coupon() {
        let expiry = now() - Duration::days(1);
        let coupon = Coupon::amount("FLAT50", 50.0, CouponScope::Universal).with_expiry(expiry);
        let err = apply_coupon("FLAT50", &cart(), Some(coupon), now()).unwrap_err();
        assert_eq!(
            err,
            CouponError::CouponExpired {
                code: "FLAT50".to_string(),
                expired_at: expiry
            }
        );
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let coupon = Coupon::amount("FLAT50", 50.0, CouponScope::Universal)
            .with_expiry(now() + Duration::hours(1));
        assert!(apply_coupon("FLAT50", &cart(), Some(coupon), now()).is_ok());
    }

    #[test]
    fn test_over_cap_percentage_is_invalid() {
        let coupon = Coupon::percentage("HUGE", 95.0, CouponScope::Universal);
        let err = apply_coupon("HUGE", &cart(), Some(coupon), now()).unwrap_err();
        assert!(matches!(err, CouponError::InvalidCoupon { .. }));
    }

    #[test]
    fn test_category_coupon_without_matching_items() {
        let only_components = vec![LineItem::new("led-1", Money::new(5.0), 10, Category::Components)];
        let coupon = Coupon::percentage("KITS20", 20.0, CouponScope::Kits);
        let applied = apply_coupon("KITS20", &only_components, Some(coupon), now()).unwrap();
        assert!(applied.applicable_total.is_zero());
    }

    #[test]
    fn test_applicable_total_by_scope() {
        let items = cart();
        let kits = Coupon::percentage("K", 10.0, CouponScope::Kits);
        let components = Coupon::percentage("C", 10.0, CouponScope::Components);
        assert_eq!(applicable_total(&items, Some(&kits)).cents(), 20000);
        assert_eq!(applicable_total(&items, Some(&components)).cents(), 5000);
        assert!(applicable_total(&items, None).is_zero());
    }
}
