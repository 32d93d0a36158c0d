//! # Cart State
//!
//! The session's shopping cart and the coupon applied to it.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` so the async command layer can
//! share it. The lock is only ever held for synchronous work; coupon
//! lookups snapshot the items, release the lock, await, then lock again.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  User Action              Command                 Cart State Change     │
//! │  ───────────              ───────                 ─────────────────     │
//! │                                                                         │
//! │  Add kit ────────────────► add_to_cart() ───────► items.push(item)     │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► items[i].qty = n     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► items.remove(i)      │
//! │                                                                         │
//! │  Enter coupon ───────────► apply_coupon_code() ─► coupon = Some(..)    │
//! │                                                                         │
//! │  Place order ────────────► checkout() ──────────► clear()              │
//! │                                                                         │
//! │  Totals are never stored: every response recomputes them from the      │
//! │  items and the coupon.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitstore_core::{
    compute_totals, Category, CoreError, Coupon, LineItem, Money, PricingResult,
    PricingSettings, ValidationError, MAX_CART_ITEMS, MAX_ITEM_QUANTITY,
};

/// An item in the shopping cart.
///
/// Price and category are frozen when the item is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,

    pub name: Option<String>,

    pub unit_price: Money,

    pub category: Category,

    pub quantity: i64,

    /// When this item was added to cart
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart item from a storefront line item.
    pub fn from_line_item(item: &LineItem) -> Self {
        CartItem {
            product_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            category: item.category,
            quantity: item.quantity,
            added_at: Utc::now(),
        }
    }

    /// The line item the pricing calculator sees.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            id: self.product_id.clone(),
            name: self.name.clone(),
            price: self.unit_price,
            quantity: self.quantity,
            category: self.category,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Quantity must be > 0 (setting it to 0 removes the item)
/// - Maximum distinct items: 100
/// - Maximum quantity per item: 999
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// Coupon that passed validation when it was applied.
    pub coupon: Option<Coupon>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            coupon: None,
            created_at: Utc::now(),
        }
    }

    /// Adds an item or increases its quantity if the product is already in
    /// the cart.
    pub fn add_item(&mut self, item: &LineItem) -> Result<(), CoreError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.id) {
            let new_qty = existing.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_line_item(item));
        Ok(())
    }

    /// Sets the quantity of an item. Quantity 0 removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CoreError> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(product_id.to_string())),
        }
    }

    /// Removes an item from the cart by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CoreError> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Empties the cart and drops the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
        self.created_at = Utc::now();
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the items as pricing line items.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::to_line_item).collect()
    }

    /// Full-precision totals for the current items and coupon.
    pub fn pricing(&self, settings: &PricingSettings) -> PricingResult {
        compute_totals(&self.line_items(), self.coupon.as_ref(), settings)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals for API responses, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,

    #[serde(flatten)]
    pub pricing: PricingResult,
}

impl CartTotals {
    /// An empty cart is not priced: every amount, shipping included, is zero.
    pub fn compute(cart: &Cart, settings: &PricingSettings) -> Self {
        let pricing = if cart.is_empty() {
            PricingResult::default()
        } else {
            cart.pricing(settings).rounded()
        };

        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            pricing,
        }
    }
}

/// Session-scoped cart state.
///
/// Cloning shares the same cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let items = cart_state.with_cart(|cart| cart.line_items());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&item))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitstore_core::CouponScope;

    fn kit(id: &str, price: f64, qty: i64) -> LineItem {
        LineItem::new(id, Money::new(price), qty, Category::Kits)
    }

    fn component(id: &str, price: f64, qty: i64) -> LineItem {
        LineItem::new(id, Money::new(price), qty, Category::Components)
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&kit("arduino-kit", 100.0, 2)).unwrap();
        cart.add_item(&kit("arduino-kit", 100.0, 3)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.items[0].line_total(), Money::new(500.0));
    }

    #[test]
    fn test_cart_limits() {
        let mut cart = Cart::new();
        cart.add_item(&kit("kit", 10.0, 999)).unwrap();
        assert!(matches!(
            cart.add_item(&kit("kit", 10.0, 1)),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));

        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&component(&format!("r-{i}"), 1.0, 1)).unwrap();
        }
        assert!(matches!(
            cart.add_item(&component("one-more", 1.0, 1)),
            Err(CoreError::CartTooLarge { max: 100 })
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&kit("kit", 100.0, 1)).unwrap();

        cart.update_quantity("kit", 4).unwrap();
        assert_eq!(cart.total_quantity(), 4);

        assert!(matches!(
            cart.update_quantity("kit", 1000),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.update_quantity("kit", -1),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.update_quantity("ghost", 2),
            Err(CoreError::ItemNotInCart(_))
        ));

        cart.update_quantity("kit", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_pricing_recomputes_with_coupon() {
        let mut cart = Cart::new();
        cart.add_item(&kit("kit", 100.0, 2)).unwrap();
        cart.coupon = Some(Coupon::percentage("SAVE10", 10.0, CouponScope::Universal));

        let totals = CartTotals::compute(&cart, &PricingSettings::default());
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.pricing.subtotal, Money::new(200.0));
        assert_eq!(totals.pricing.discount, Money::new(20.0));
        assert_eq!(totals.pricing.tax, Money::new(32.4));
        assert_eq!(totals.pricing.total, Money::new(262.4));

        cart.update_quantity("kit", 1).unwrap();
        let totals = CartTotals::compute(&cart, &PricingSettings::default());
        assert_eq!(totals.pricing.discount, Money::new(10.0));
    }

    #[test]
    fn test_empty_cart_is_not_priced() {
        let mut cart = Cart::new();
        let totals = CartTotals::compute(&cart, &PricingSettings::default());
        assert_eq!(totals.pricing, PricingResult::default());

        cart.add_item(&kit("kit-1", 100.0, 1)).unwrap();
        cart.remove_item("kit-1").unwrap();
        let totals = CartTotals::compute(&cart, &PricingSettings::default());
        assert!(totals.pricing.shipping.is_zero());
    }

    #[test]
    fn test_clear_drops_coupon() {
        let mut cart = Cart::new();
        cart.add_item(&kit("kit", 100.0, 1)).unwrap();
        cart.coupon = Some(Coupon::amount("FLAT50", 50.0, CouponScope::Kits));

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }

    #[test]
    fn test_cart_state_is_shared_between_clones() {
        let state = CartState::new();
        let other = state.clone();

        state.with_cart_mut(|c| c.add_item(&kit("kit", 100.0, 1))).unwrap();
        assert_eq!(other.with_cart(|c| c.item_count()), 1);
    }
}
