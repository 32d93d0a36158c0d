//! # Rental Plan Repository
//!
//! Rental durations offered for kits. Plans are never hard-deleted; a
//! retired plan is deactivated so that quotes for it stop resolving.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kitstore_core::validation::validate_rental_plan;
use kitstore_core::RentalPlan;

#[derive(Debug, sqlx::FromRow)]
struct RentalPlanRow {
    id: String,
    name: String,
    duration_days: i64,
    fee_percentage: f64,
}

impl TryFrom<RentalPlanRow> for RentalPlan {
    type Error = DbError;

    fn try_from(row: RentalPlanRow) -> Result<Self, Self::Error> {
        let duration_days = u32::try_from(row.duration_days).map_err(|_| DbError::CorruptRow {
            entity: "RentalPlan".to_string(),
            reason: format!("duration_days {} out of range", row.duration_days),
        })?;

        Ok(RentalPlan {
            id: row.id,
            name: row.name,
            duration_days,
            fee_percentage: row.fee_percentage,
        })
    }
}

/// Repository for rental plan database operations.
#[derive(Debug, Clone)]
pub struct RentalPlanRepository {
    pool: SqlitePool,
}

impl RentalPlanRepository {
    /// Creates a new RentalPlanRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalPlanRepository { pool }
    }

    /// Lists active plans, shortest first.
    pub async fn list_active(&self) -> DbResult<Vec<RentalPlan>> {
        let rows = sqlx::query_as::<_, RentalPlanRow>(
            r#"
            SELECT id, name, duration_days, fee_percentage
            FROM rental_plans
            WHERE is_active = 1
            ORDER BY duration_days, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RentalPlan::try_from).collect()
    }

    /// Gets an active plan by id.
    ///
    /// ## Returns
    /// * `Ok(Some(RentalPlan))` - Plan found and active
    /// * `Ok(None)` - Unknown or deactivated plan
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<RentalPlan>> {
        debug!(id = %id, "Getting rental plan");

        let row = sqlx::query_as::<_, RentalPlanRow>(
            r#"
            SELECT id, name, duration_days, fee_percentage
            FROM rental_plans
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RentalPlan::try_from).transpose()
    }

    /// Inserts a new active plan.
    pub async fn insert(&self, plan: &RentalPlan) -> DbResult<()> {
        validate_rental_plan(plan)?;
        debug!(id = %plan.id, days = plan.duration_days, "Inserting rental plan");

        let result = sqlx::query(
            r#"
            INSERT INTO rental_plans (id, name, duration_days, fee_percentage, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, 1, ?5)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.name)
        .bind(i64::from(plan.duration_days))
        .bind(plan.fee_percentage)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result.map_err(DbError::from) {
            Ok(_) => Ok(()),
            Err(DbError::UniqueViolation { field, .. }) => {
                Err(DbError::duplicate(field, plan.id.clone()))
            }
            Err(e) => Err(e),
        }
    }

    /// Retires a plan.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating rental plan");

        let result = sqlx::query("UPDATE rental_plans SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("RentalPlan", id));
        }

        Ok(())
    }
}
