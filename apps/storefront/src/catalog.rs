//! # Pricing Catalog
//!
//! Where the storefront looks coupons and rental plans up.
//!
//! ```text
//! commands ──► &dyn PricingCatalog ──┬──► Database (kitstore-db, SQLite)
//!                                    └──► in-memory catalog (tests)
//! ```
//!
//! A lookup that returns `Err` is a storage failure; an unknown code or
//! plan is `Ok(None)`.

use async_trait::async_trait;

use kitstore_core::{Coupon, RentalPlan};
use kitstore_db::{Database, DbError};

#[async_trait]
pub trait PricingCatalog: Send + Sync {
    /// Looks up a coupon by its normalised code, whatever its status.
    async fn coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, DbError>;

    /// Looks up an active rental plan.
    async fn rental_plan(&self, id: &str) -> Result<Option<RentalPlan>, DbError>;

    /// Lists active rental plans, shortest first.
    async fn active_rental_plans(&self) -> Result<Vec<RentalPlan>, DbError>;
}

#[async_trait]
impl PricingCatalog for Database {
    async fn coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, DbError> {
        self.coupons().get_by_code(code).await
    }

    async fn rental_plan(&self, id: &str) -> Result<Option<RentalPlan>, DbError> {
        self.rental_plans().get_by_id(id).await
    }

    async fn active_rental_plans(&self) -> Result<Vec<RentalPlan>, DbError> {
        self.rental_plans().list_active().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use kitstore_core::coupon::normalize_code;
    use std::collections::HashMap;

    /// Catalog held in memory.
    #[derive(Debug, Default)]
    pub struct MemoryCatalog {
        coupons: HashMap<String, Coupon>,
        plans: Vec<RentalPlan>,
    }

    impl MemoryCatalog {
        pub fn with_coupon(mut self, coupon: Coupon) -> Self {
            self.coupons.insert(normalize_code(&coupon.code), coupon);
            self
        }

        pub fn with_plan(mut self, id: &str, duration_days: u32, fee_percentage: f64) -> Self {
            self.plans.push(RentalPlan {
                id: id.to_string(),
                name: format!("{duration_days} days"),
                duration_days,
                fee_percentage,
            });
            self
        }
    }

    #[async_trait]
    impl PricingCatalog for MemoryCatalog {
        async fn coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, DbError> {
            Ok(self.coupons.get(&normalize_code(code)).cloned())
        }

        async fn rental_plan(&self, id: &str) -> Result<Option<RentalPlan>, DbError> {
            Ok(self.plans.iter().find(|p| p.id == id).cloned())
        }

        async fn active_rental_plans(&self) -> Result<Vec<RentalPlan>, DbError> {
            let mut plans = self.plans.clone();
            plans.sort_by_key(|p| p.duration_days);
            Ok(plans)
        }
    }

    /// Catalog whose storage is always down.
    #[derive(Debug, Default)]
    pub struct UnreachableCatalog;

    #[async_trait]
    impl PricingCatalog for UnreachableCatalog {
        async fn coupon_by_code(&self, _code: &str) -> Result<Option<Coupon>, DbError> {
            Err(DbError::ConnectionFailed("catalog offline".to_string()))
        }

        async fn rental_plan(&self, _id: &str) -> Result<Option<RentalPlan>, DbError> {
            Err(DbError::ConnectionFailed("catalog offline".to_string()))
        }

        async fn active_rental_plans(&self) -> Result<Vec<RentalPlan>, DbError> {
            Err(DbError::ConnectionFailed("catalog offline".to_string()))
        }
    }
}
