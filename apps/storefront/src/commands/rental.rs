//! # Rental Commands
//!
//! Quotes for renting a kit instead of buying it.
//!
//! ## Rental Money Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  At rental start                      At return                         │
//! │  ───────────────                      ─────────                         │
//! │  security deposit (item price × qty)  deposit                           │
//! │  + shipping                           − (fee − discount + GST on that)  │
//! │  = amount due                         = potential refund (< 0: owed)    │
//! │                                                                         │
//! │  fee = deposit × plan fee %; coupons and GST apply to the fee only.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::PricingCatalog;
use crate::commands::coupon::{resolve_coupon, CouponNotice};
use crate::error::ApiError;
use crate::state::StoreConfig;
use kitstore_core::validation::validate_line_item;
use kitstore_core::{compute_rental, CoreError, LineItem, RentalPlan, RentalQuote};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalQuoteResponse {
    pub plan: RentalPlan,

    /// Rounded to 2 decimals.
    pub quote: RentalQuote,

    /// Code of the coupon applied to the fee, if any.
    pub coupon_code: Option<String>,

    /// Set when a coupon code was given but not applied.
    pub notice: Option<CouponNotice>,
}

/// Lists the rental plans currently offered.
pub async fn list_rental_plans(catalog: &dyn PricingCatalog) -> Result<Vec<RentalPlan>, ApiError> {
    debug!("list_rental_plans command");
    Ok(catalog.active_rental_plans().await?)
}

/// Quotes renting `item` under `plan_id`, with an optional coupon code.
///
/// An unknown plan is an error; a coupon that can't be applied is not.
pub async fn quote_rental(
    catalog: &dyn PricingCatalog,
    config: &StoreConfig,
    item: LineItem,
    plan_id: &str,
    coupon_code: Option<&str>,
) -> Result<RentalQuoteResponse, ApiError> {
    debug!(product_id = %item.id, plan_id = %plan_id, "quote_rental command");

    validate_line_item(&item)?;

    let plan = catalog
        .rental_plan(plan_id)
        .await?
        .ok_or_else(|| CoreError::RentalPlanNotFound(plan_id.to_string()))?;

    let (coupon, notice) = match coupon_code {
        Some(code) => {
            match resolve_coupon(catalog, code, std::slice::from_ref(&item), Utc::now()).await {
                Ok(applied) => (Some(applied.coupon), None),
                Err(e) => {
                    warn!(code = %code, reason = e.reason(), "Rental coupon not applied: {}", e);
                    (None, Some(CouponNotice::from(&e)))
                }
            }
        }
        None => (None, None),
    };

    let quote = compute_rental(&item, &plan, coupon.as_ref(), &config.pricing_settings());

    Ok(RentalQuoteResponse {
        plan,
        quote: quote.rounded(),
        coupon_code: coupon.map(|c| c.code),
        notice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{MemoryCatalog, UnreachableCatalog};
    use crate::error::ErrorCode;
    use kitstore_core::{Category, Coupon, CouponScope, Money};

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::default()
            .with_plan("month", 30, 30.0)
            .with_plan("fortnight", 14, 20.0)
            .with_coupon(Coupon::percentage("KITS20", 20.0, CouponScope::Kits))
            .with_coupon(Coupon::percentage("PARTS10", 10.0, CouponScope::Components))
    }

    fn kit() -> LineItem {
        LineItem::new("robot-kit", Money::new(1000.0), 1, Category::Kits)
    }

    #[tokio::test]
    async fn test_quote_with_coupon() {
        let response = quote_rental(
            &catalog(),
            &StoreConfig::default(),
            kit(),
            "fortnight",
            Some("kits20"),
        )
        .await
        .unwrap();

        let quote = response.quote;
        assert!(response.notice.is_none());
        assert_eq!(response.coupon_code.as_deref(), Some("KITS20"));
        assert_eq!(quote.security_deposit, Money::new(1000.0));
        assert_eq!(quote.rental_fee, Money::new(200.0));
        assert_eq!(quote.discount, Money::new(40.0));
        assert_eq!(quote.taxable_fee, Money::new(160.0));
        assert_eq!(quote.tax, Money::new(28.8));
        assert_eq!(quote.final_rental_fee, Money::new(188.8));
        assert_eq!(quote.amount_due, Money::new(1050.0));
        assert_eq!(quote.potential_refund, Money::new(811.2));
    }

    #[tokio::test]
    async fn test_out_of_scope_coupon_discounts_nothing() {
        let response = quote_rental(
            &catalog(),
            &StoreConfig::default(),
            kit(),
            "fortnight",
            Some("PARTS10"),
        )
        .await
        .unwrap();

        assert!(response.notice.is_none());
        assert!(response.quote.discount.is_zero());
        assert_eq!(response.quote.final_rental_fee, Money::new(236.0));
    }

    #[tokio::test]
    async fn test_coupon_failures_are_non_fatal() {
        let response = quote_rental(
            &catalog(),
            &StoreConfig::default(),
            kit(),
            "month",
            Some("NOPE"),
        )
        .await
        .unwrap();

        assert_eq!(response.notice.unwrap().reason, "invalid");
        assert_eq!(response.coupon_code, None);
        assert_eq!(response.quote.rental_fee, Money::new(300.0));
    }

    #[tokio::test]
    async fn test_unknown_plan_is_an_error() {
        let err = quote_rental(&catalog(), &StoreConfig::default(), kit(), "decade", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = quote_rental(&UnreachableCatalog, &StoreConfig::default(), kit(), "month", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn test_list_rental_plans() {
        let plans = list_rental_plans(&catalog()).await.unwrap();
        let ids: Vec<&str> = plans.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["fortnight", "month"]);
    }
}
