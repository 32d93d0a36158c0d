//! # Rental Pricing
//!
//! Prices a kit rental: the customer leaves the full item price as a
//! security deposit, and the rental fee is withheld from it on return.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  security_deposit = price × quantity                                    │
//! │  rental_fee       = security_deposit × plan.fee_percentage / 100        │
//! │  discount         = coupon discount against the FEE (not the price)     │
//! │  taxable_fee      = rental_fee - discount                               │
//! │  final_rental_fee = taxable_fee + tax(taxable_fee)                      │
//! │  amount_due       = security_deposit + shipping                         │
//! │  potential_refund = security_deposit - final_rental_fee                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{capped_discount, PricingSettings};
use crate::types::{Coupon, LineItem, RentalPlan};

/// Priced rental of one line item under one plan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalQuote {
    pub security_deposit: Money,
    pub rental_fee: Money,

    /// Part of the fee the coupon may discount (the fee, or zero when the
    /// coupon's category doesn't cover the item).
    pub applicable_fee: Money,
    pub discount: Money,
    pub taxable_fee: Money,
    pub tax: Money,
    pub final_rental_fee: Money,
    pub shipping: Money,

    /// Charged when the rental starts.
    pub amount_due: Money,

    /// Returned to the customer when the kit comes back.
    pub potential_refund: Money,
}

impl RentalQuote {
    /// Every field rounded to 2 decimal places.
    pub fn rounded(&self) -> RentalQuote {
        RentalQuote {
            security_deposit: self.security_deposit.rounded(),
            rental_fee: self.rental_fee.rounded(),
            applicable_fee: self.applicable_fee.rounded(),
            discount: self.discount.rounded(),
            taxable_fee: self.taxable_fee.rounded(),
            tax: self.tax.rounded(),
            final_rental_fee: self.final_rental_fee.rounded(),
            shipping: self.shipping.rounded(),
            amount_due: self.amount_due.rounded(),
            potential_refund: self.potential_refund.rounded(),
        }
    }
}

/// Prices renting `item` under `plan` with an optional, already validated
/// coupon.
pub fn compute_rental(
    item: &LineItem,
    plan: &RentalPlan,
    coupon: Option<&Coupon>,
    settings: &PricingSettings,
) -> RentalQuote {
    let security_deposit = item.line_total();
    let rental_fee = security_deposit.percentage(plan.fee_percentage);

    let applicable_fee = match coupon {
        Some(coupon) if coupon.applies_to(item) => rental_fee,
        _ => Money::zero(),
    };
    let discount = capped_discount(coupon, applicable_fee);

    let taxable_fee = rental_fee - discount;
    let tax = taxable_fee.calculate_tax(settings.tax_rate);
    let final_rental_fee = taxable_fee + tax;
    let shipping = settings.shipping_cost;

    RentalQuote {
        security_deposit,
        rental_fee,
        applicable_fee,
        discount,
        taxable_fee,
        tax,
        final_rental_fee,
        shipping,
        amount_due: security_deposit + shipping,
        potential_refund: security_deposit - final_rental_fee,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, CouponScope};

    fn plan(pct: f64) -> RentalPlan {
        RentalPlan {
            id: "two-weeks".to_string(),
            name: "2 Weeks".to_string(),
            duration_days: 14,
            fee_percentage: pct,
        }
    }

    fn settings() -> PricingSettings {
        PricingSettings::default().with_shipping(Money::new(50.0))
    }

    fn drone_kit() -> LineItem {
        LineItem::new("drone", Money::new(2000.0), 1, Category::Kits)
    }

    #[test]
    fn test_rental_without_coupon() {
        let quote = compute_rental(&drone_kit(), &plan(20.0), None, &settings()).rounded();

        assert_eq!(quote.security_deposit.cents(), 200000);
        assert_eq!(quote.rental_fee.cents(), 40000);
        assert!(quote.discount.is_zero());
        assert_eq!(quote.tax.cents(), 7200);
        assert_eq!(quote.final_rental_fee.cents(), 47200);
        assert_eq!(quote.amount_due.cents(), 205000);
        assert_eq!(quote.potential_refund.cents(), 152800);
    }

    #[test]
    fn test_coupon_discounts_the_fee_not_the_price() {
        let coupon = Coupon::percentage("RENT10", 10.0, CouponScope::Universal);
        let quote = compute_rental(&drone_kit(), &plan(20.0), Some(&coupon), &settings()).rounded();

        // 10% of the 400 fee, not of the 2000 price
        assert_eq!(quote.applicable_fee.cents(), 40000);
        assert_eq!(quote.discount.cents(), 4000);
        assert_eq!(quote.taxable_fee.cents(), 36000);
        assert_eq!(quote.tax.cents(), 6480);
        assert_eq!(quote.final_rental_fee.cents(), 42480);
        assert_eq!(quote.potential_refund.cents(), 157520);
    }

    #[test]
    fn test_flat_coupon_capped_at_fee() {
        let coupon = Coupon::amount("FREE1000", 1000.0, CouponScope::Kits);
        let quote = compute_rental(&drone_kit(), &plan(20.0), Some(&coupon), &settings());

        assert_eq!(quote.discount.cents(), 40000);
        assert!(quote.final_rental_fee.is_zero());
        assert_eq!(quote.potential_refund, quote.security_deposit);
    }

    #[test]
    fn test_coupon_for_other_category_is_zero() {
        let coupon = Coupon::percentage("PARTS", 50.0, CouponScope::Components);
        let quote = compute_rental(&drone_kit(), &plan(20.0), Some(&coupon), &settings());

        assert!(quote.applicable_fee.is_zero());
        assert!(quote.discount.is_zero());
    }

    #[test]
    fn test_full_price_plan_leaves_negative_refund() {
        // 100% fee plus tax exceeds the deposit: the customer owes the rest
        let quote = compute_rental(&drone_kit(), &plan(100.0), None, &settings());
        assert_eq!(quote.final_rental_fee.cents(), 236000);
        assert_eq!(quote.potential_refund.cents(), -36000);
        assert!(quote.potential_refund.is_negative());
    }

    #[test]
    fn test_quantity_scales_deposit_and_fee() {
        let item = LineItem::new("bot", Money::new(500.0), 3, Category::Kits);
        let quote = compute_rental(&item, &plan(10.0), None, &settings());
        assert_eq!(quote.security_deposit.cents(), 150000);
        assert_eq!(quote.rental_fee.cents(), 15000);
    }
}
