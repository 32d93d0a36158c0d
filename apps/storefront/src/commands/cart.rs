//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Coupon  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ applied  │     │  Draft   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart     apply_coupon_code     checkout       │
//! │                   update_item     (coupon.rs)          (checkout.rs)   │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{Cart, CartItem, CartState, CartTotals, StoreConfig};
use kitstore_core::pricing::capped_discount;
use kitstore_core::validation::validate_line_item;
use kitstore_core::{
    coupon::applicable_total, Coupon, CouponScope, DiscountType, LineItem, Money,
};

/// The coupon currently on the cart, as shown next to the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponSummary {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub category_type: CouponScope,

    /// Discount the coupon gives on the current items, rounded.
    pub discount: Money,
}

impl CouponSummary {
    fn for_cart(coupon: &Coupon, items: &[LineItem]) -> Self {
        let applicable = applicable_total(items, Some(coupon));
        CouponSummary {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            category_type: coupon.category_type,
            discount: capped_discount(Some(coupon), applicable).rounded(),
        }
    }
}

/// Cart response including items, applied coupon and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub coupon: Option<CouponSummary>,
    pub totals: CartTotals,

    /// Grand total with the currency symbol, e.g. "₹262.40".
    pub formatted_total: String,
}

impl CartResponse {
    pub fn build(cart: &Cart, config: &StoreConfig) -> Self {
        let totals = CartTotals::compute(cart, &config.pricing_settings());
        let coupon = cart
            .coupon
            .as_ref()
            .map(|c| CouponSummary::for_cart(c, &cart.line_items()));

        CartResponse {
            items: cart.items.clone(),
            coupon,
            formatted_total: config.format_currency(totals.pricing.total),
            totals,
        }
    }
}

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART                                              1 item      │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Arduino Starter Kit      x2              ₹200.00              │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                 ₹200.00              │
/// │  Coupon SAVE10                            -₹20.00              │
/// │  GST (18%)                                 ₹32.40              │
/// │  Shipping                                  ₹50.00              │
/// │  ──────────────────────────────────────────────────            │
/// │  TOTAL                                    ₹262.40              │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::build(c, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new item
/// - Price is frozen at time of adding
///
/// ## Arguments
/// * `item` - Product id, name, unit price, category and quantity to add
pub fn add_to_cart(
    cart: &CartState,
    config: &StoreConfig,
    item: LineItem,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %item.id, quantity = %item.quantity, "add_to_cart command");

    validate_line_item(&item)?;

    cart.with_cart_mut(|c| {
        c.add_item(&item)?;
        Ok::<_, ApiError>(CartResponse::build(c, config))
    })
}

/// Updates the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity 0: removes the item
/// - Quantity > max: returns error
pub fn update_cart_item(
    cart: &CartState,
    config: &StoreConfig,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        c.update_quantity(product_id, quantity)?;
        Ok::<_, ApiError>(CartResponse::build(c, config))
    })
}

/// Removes an item from the cart.
pub fn remove_from_cart(
    cart: &CartState,
    config: &StoreConfig,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(product_id)?;
        Ok::<_, ApiError>(CartResponse::build(c, config))
    })
}

/// Clears all items and the coupon from the cart.
pub fn clear_cart(cart: &CartState, config: &StoreConfig) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kitstore_core::Category;

    fn kit(id: &str, price: f64, qty: i64) -> LineItem {
        LineItem::new(id, Money::new(price), qty, Category::Kits).with_name("Arduino Starter Kit")
    }

    #[test]
    fn test_add_and_totals() {
        let cart = CartState::new();
        let config = StoreConfig::default();

        let response = add_to_cart(&cart, &config, kit("kit-1", 100.0, 2)).unwrap();
        assert_eq!(response.items.len(), 1);
        assert!(response.coupon.is_none());
        assert_eq!(response.totals.pricing.subtotal, Money::new(200.0));
        assert_eq!(response.totals.pricing.tax, Money::new(36.0));
        assert_eq!(response.formatted_total, "₹286.00");
    }

    #[test]
    fn test_empty_cart_is_not_priced() {
        let response = get_cart(&CartState::new(), &StoreConfig::default());
        assert!(response.totals.pricing.total.is_zero());
        assert_eq!(response.formatted_total, "₹0.00");
    }

    #[test]
    fn test_invalid_items_are_rejected() {
        let cart = CartState::new();
        let config = StoreConfig::default();

        let err = add_to_cart(&cart, &config, kit("kit-1", -1.0, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&cart, &config, kit("kit-1", 10.0, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&cart, &config).items.is_empty());
    }

    #[test]
    fn test_update_remove_clear() {
        let cart = CartState::new();
        let config = StoreConfig::default();
        add_to_cart(&cart, &config, kit("kit-1", 100.0, 1)).unwrap();

        let response = update_cart_item(&cart, &config, "kit-1", 3).unwrap();
        assert_eq!(response.totals.total_quantity, 3);

        let err = remove_from_cart(&cart, &config, "ghost").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let response = remove_from_cart(&cart, &config, "kit-1").unwrap();
        assert!(response.items.is_empty());

        add_to_cart(&cart, &config, kit("kit-2", 10.0, 1)).unwrap();
        assert!(clear_cart(&cart, &config).items.is_empty());
    }

    #[test]
    fn test_coupon_summary_tracks_items() {
        let cart = CartState::new();
        let config = StoreConfig::default();
        add_to_cart(&cart, &config, kit("kit-1", 100.0, 2)).unwrap();
        cart.with_cart_mut(|c| {
            c.coupon = Some(Coupon::percentage("SAVE10", 10.0, CouponScope::Universal))
        });

        let response = get_cart(&cart, &config);
        let coupon = response.coupon.unwrap();
        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount, Money::new(20.0));
        assert_eq!(response.formatted_total, "₹262.40");
    }
}
