//! # Checkout Command
//!
//! Turns the session cart into an order draft.
//!
//! ## Checkout Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(customer)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Cart empty? ──────────────────────────► CoreError::EmptyCart        │
//! │  2. Validate name / email / address ──────► ValidationError            │
//! │  3. Re-check the applied coupon at now                                  │
//! │       └── expired or malformed since apply ─► dropped, CouponNotice     │
//! │  4. Price items + coupon, round for the draft                          │
//! │  5. Build OrderDraft (UUID, item snapshot, coupon code, pricing)       │
//! │  6. Clear the cart                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderDraft ──► order store (not this crate)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-6 run under one cart lock, so nothing can slip into the cart
//! between pricing and clearing it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::commands::coupon::CouponNotice;
use crate::error::ApiError;
use crate::state::{CartState, StoreConfig};
use kitstore_core::validation::{validate_email, validate_required};
use kitstore_core::{apply_coupon, compute_totals, CoreError, LineItem, PricingResult};

/// Customer details collected on the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub address: String,

    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Trims every field and checks the required ones.
    fn validated(&self) -> Result<CustomerDetails, ApiError> {
        let phone = match self.phone.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => Some(validate_required("phone", phone, 20)?),
            _ => None,
        };

        Ok(CustomerDetails {
            name: validate_required("name", &self.name, 100)?,
            email: validate_email(&self.email)?,
            address: validate_required("address", &self.address, 500)?,
            phone,
        })
    }
}

/// A priced order ready to be persisted by the order store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub id: String,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,

    /// Code of the coupon that priced this order, if any.
    pub coupon_code: Option<String>,

    /// Rounded to 2 decimals.
    pub pricing: PricingResult,
    pub currency_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: OrderDraft,

    /// Set when the cart's coupon no longer applied at checkout.
    pub notice: Option<CouponNotice>,
}

/// Checks the cart out for `customer`.
pub fn checkout(
    cart: &CartState,
    config: &StoreConfig,
    customer: &CustomerDetails,
) -> Result<CheckoutResponse, ApiError> {
    checkout_at(cart, config, customer, Utc::now())
}

/// [`checkout`] with an explicit clock.
pub fn checkout_at(
    cart: &CartState,
    config: &StoreConfig,
    customer: &CustomerDetails,
    now: DateTime<Utc>,
) -> Result<CheckoutResponse, ApiError> {
    cart.with_cart_mut(|c| -> Result<CheckoutResponse, ApiError> {
        if c.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let customer = customer.validated()?;
        let items = c.line_items();

        let (coupon, notice) = match c.coupon.clone() {
            Some(coupon) => {
                let code = coupon.code.clone();
                match apply_coupon(&code, &items, Some(coupon), now) {
                    Ok(applied) => (Some(applied.coupon), None),
                    Err(e) => {
                        warn!(code = %code, reason = e.reason(), "Dropping coupon at checkout");
                        (None, Some(CouponNotice::from(&e)))
                    }
                }
            }
            None => (None, None),
        };

        let pricing = compute_totals(&items, coupon.as_ref(), &config.pricing_settings());

        let order = OrderDraft {
            id: Uuid::new_v4().to_string(),
            customer,
            items,
            coupon_code: coupon.map(|applied| applied.code),
            pricing: pricing.rounded(),
            currency_code: config.currency_code.clone(),
            created_at: now,
        };

        info!(
            order_id = %order.id,
            total = %order.pricing.total,
            coupon = ?order.coupon_code,
            "Order draft created"
        );

        c.clear();
        Ok(CheckoutResponse { order, notice })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::{Duration, TimeZone};
    use kitstore_core::{Category, Coupon, CouponScope, Money};

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: " Asha Rao ".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
            phone: Some("  ".to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn cart_with_coupon(coupon: Option<Coupon>) -> CartState {
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            c.add_item(&LineItem::new("kit-1", Money::new(100.0), 2, Category::Kits))
                .unwrap();
            c.coupon = coupon;
        });
        cart
    }

    #[test]
    fn test_checkout_builds_draft_and_clears_cart() {
        let cart = cart_with_coupon(Some(Coupon::percentage(
            "SAVE10",
            10.0,
            CouponScope::Universal,
        )));

        let response =
            checkout_at(&cart, &StoreConfig::default(), &customer(), now()).unwrap();
        let order = response.order;

        assert!(response.notice.is_none());
        assert!(Uuid::parse_str(&order.id).is_ok());
        assert_eq!(order.customer.name, "Asha Rao");
        assert_eq!(order.customer.phone, None);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.coupon_code.as_deref(), Some("SAVE10"));
        assert_eq!(order.pricing.total, Money::new(262.4));
        assert_eq!(order.currency_code, "INR");
        assert_eq!(order.created_at, now());

        assert!(cart.with_cart(|c| c.is_empty() && c.coupon.is_none()));
    }

    #[test]
    fn test_coupon_expired_since_apply_is_dropped() {
        let expired = Coupon::percentage("SAVE10", 10.0, CouponScope::Universal)
            .with_expiry(now() - Duration::minutes(5));
        let cart = cart_with_coupon(Some(expired));

        let response =
            checkout_at(&cart, &StoreConfig::default(), &customer(), now()).unwrap();

        assert_eq!(response.notice.unwrap().reason, "expired");
        assert_eq!(response.order.coupon_code, None);
        assert_eq!(response.order.pricing.total, Money::new(286.0));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = checkout_at(&CartState::new(), &StoreConfig::default(), &customer(), now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_bad_customer_keeps_cart() {
        let cart = cart_with_coupon(None);
        let bad = CustomerDetails {
            email: "not-an-email".to_string(),
            ..customer()
        };

        let err = checkout_at(&cart, &StoreConfig::default(), &bad, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.with_cart(|c| c.item_count()), 1);
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let cart = cart_with_coupon(None);
        let response = checkout(&cart, &StoreConfig::default(), &customer()).unwrap();

        let json = serde_json::to_value(&response.order).unwrap();
        assert!(json.get("couponCode").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["pricing"]["total"], 286.0);
    }
}
