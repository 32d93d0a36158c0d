//! # Validation Module
//!
//! Input validation for the storefront and the admin back-office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront commands (Rust)                                   │
//! │  └── THIS MODULE: line items, quantities, checkout details             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog admin                                                │
//! │  └── THIS MODULE: coupon and rental plan rules before they are stored  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite CHECK / UNIQUE constraints                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitstore_core::validation::{validate_coupon_code, validate_quantity};
//!
//! assert_eq!(validate_coupon_code(" save10 ").unwrap(), "SAVE10");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::coupon::normalize_code;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, DiscountType, LineItem, RentalPlan};
use crate::{MAX_ITEM_QUANTITY, MAX_PERCENTAGE_DISCOUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted coupon code.
pub const MAX_COUPON_CODE_LEN: usize = 32;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field and returns it trimmed.
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a coupon code and returns its normalised form.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = normalize_code(code);

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code)
}

/// Validates an email address well enough to catch typos.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email, 254)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(email)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_ITEM_QUANTITY as f64,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.amount().is_finite() || price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a coupon's discount value for its discount type.
///
/// ## Rules
/// - Must be finite and non-negative
/// - Percentage coupons are capped at 90%
pub fn validate_discount_value(discount_type: DiscountType, value: f64) -> ValidationResult<()> {
    let max = match discount_type {
        DiscountType::Percentage => MAX_PERCENTAGE_DISCOUNT,
        DiscountType::Amount => f64::MAX,
    };

    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "discount_value".to_string(),
            min: 0.0,
            max,
        });
    }

    Ok(())
}

/// Validates a rental plan fee percentage, which must lie in `(0, 100]`.
pub fn validate_fee_percentage(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
        return Err(ValidationError::OutOfRange {
            field: "fee_percentage".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0.0,
            max: 10_000.0,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a line item arriving from the storefront.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_required("id", &item.id, 128)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)
}

/// Validates a coupon before it is stored by the admin back-office.
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;
    validate_discount_value(coupon.discount_type, coupon.discount_value)
}

/// Validates a rental plan before it is stored.
pub fn validate_rental_plan(plan: &RentalPlan) -> ValidationResult<()> {
    validate_required("id", &plan.id, 64)?;
    validate_required("name", &plan.name, 100)?;

    if plan.duration_days == 0 {
        return Err(ValidationError::MustBePositive {
            field: "duration_days".to_string(),
        });
    }

    validate_fee_percentage(plan.fee_percentage)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, CouponScope};

    #[test]
    fn test_validate_coupon_code() {
        assert_eq!(validate_coupon_code("SAVE10").unwrap(), "SAVE10");
        assert_eq!(validate_coupon_code(" kits_20 ").unwrap(), "KITS_20");
        assert_eq!(validate_coupon_code("new-year").unwrap(), "NEW-YEAR");

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("SAVE 10").is_err());
        assert!(validate_coupon_code("50%OFF").is_err());
        assert!(validate_coupon_code(&"A".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("maker@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::new(10.99)).is_ok());
        assert!(validate_price(Money::new(-1.0)).is_err());
        assert!(validate_price(Money::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_discount_value() {
        assert!(validate_discount_value(DiscountType::Percentage, 0.0).is_ok());
        assert!(validate_discount_value(DiscountType::Percentage, 90.0).is_ok());
        assert!(validate_discount_value(DiscountType::Percentage, 90.01).is_err());
        assert!(validate_discount_value(DiscountType::Amount, 5000.0).is_ok());
        assert!(validate_discount_value(DiscountType::Amount, -1.0).is_err());
    }

    #[test]
    fn test_validate_coupon() {
        assert!(validate_coupon(&Coupon::percentage("OK", 15.0, CouponScope::Kits)).is_ok());
        assert!(validate_coupon(&Coupon::percentage("TOOMUCH", 95.0, CouponScope::Kits)).is_err());
        assert!(validate_coupon(&Coupon::amount("", 10.0, CouponScope::Kits)).is_err());
    }

    #[test]
    fn test_validate_rental_plan() {
        let plan = RentalPlan {
            id: "week".to_string(),
            name: "1 Week".to_string(),
            duration_days: 7,
            fee_percentage: 10.0,
        };
        assert!(validate_rental_plan(&plan).is_ok());

        let zero_days = RentalPlan {
            duration_days: 0,
            ..plan.clone()
        };
        assert!(validate_rental_plan(&zero_days).is_err());

        let free = RentalPlan {
            fee_percentage: 0.0,
            ..plan.clone()
        };
        assert!(validate_rental_plan(&free).is_err());

        let blank_id = RentalPlan {
            id: " ".to_string(),
            ..plan.clone()
        };
        assert!(validate_rental_plan(&blank_id).is_err());

        let over = RentalPlan {
            fee_percentage: 100.5,
            ..plan
        };
        assert!(validate_rental_plan(&over).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let item = LineItem::new("kit-1", Money::new(100.0), 2, Category::Kits);
        assert!(validate_line_item(&item).is_ok());

        let blank_id = LineItem::new(" ", Money::new(100.0), 2, Category::Kits);
        assert!(validate_line_item(&blank_id).is_err());

        let zero_qty = LineItem::new("kit-1", Money::new(100.0), 0, Category::Kits);
        assert!(validate_line_item(&zero_qty).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10_000).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }
}
