//! # Coupon Repository
//!
//! Coupon storage for the admin back-office and apply-time lookup.
//!
//! Codes are stored in normalised (trimmed, upper-case) form and every
//! lookup normalises its input the same way, so "save10" finds "SAVE10".

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kitstore_core::coupon::normalize_code;
use kitstore_core::validation::validate_coupon;
use kitstore_core::{Coupon, CouponScope, CouponStatus, DiscountType};

/// Row shape of the `coupons` table (minus bookkeeping columns).
#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    code: String,
    discount_type: DiscountType,
    discount_value: f64,
    category_type: CouponScope,
    status: CouponStatus,
    expiry_date: Option<DateTime<Utc>>,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Coupon {
            code: row.code,
            discount_type: row.discount_type,
            discount_value: row.discount_value,
            category_type: row.category_type,
            status: row.status,
            expiry_date: row.expiry_date,
        }
    }
}

const SELECT_COUPON: &str = r#"
    SELECT code, discount_type, discount_value, category_type, status, expiry_date
    FROM coupons
"#;

/// Repository for coupon database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.coupons();
/// let coupon = repo.get_by_code("save10").await?; // Option<Coupon>
/// repo.set_status("SAVE10", CouponStatus::Paused).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Looks a coupon up by code.
    ///
    /// ## Returns
    /// * `Ok(Some(Coupon))` - Coupon found (in any status, expired or not)
    /// * `Ok(None)` - No coupon with this code
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let code = normalize_code(code);
        debug!(code = %code, "Looking up coupon");

        let row = sqlx::query_as::<_, CouponRow>(&format!("{SELECT_COUPON} WHERE code = ?1"))
            .bind(&code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Coupon::from))
    }

    /// Lists every coupon, ordered by code.
    pub async fn list(&self) -> DbResult<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(&format!("{SELECT_COUPON} ORDER BY code"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Coupon::from).collect())
    }

    /// Inserts a new coupon.
    ///
    /// ## Returns
    /// * `Ok(Coupon)` - The stored coupon (code normalised)
    /// * `Err(DbError::Validation)` - Malformed code or discount value
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&self, coupon: &Coupon) -> DbResult<Coupon> {
        validate_coupon(coupon)?;
        let code = normalize_code(&coupon.code);
        debug!(code = %code, "Inserting coupon");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO coupons (
                id, code, discount_type, discount_value, category_type,
                status, expiry_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&code)
        .bind(coupon.discount_type)
        .bind(coupon.discount_value)
        .bind(coupon.category_type)
        .bind(coupon.status)
        .bind(coupon.expiry_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result.map_err(DbError::from) {
            Ok(_) => Ok(Coupon {
                code,
                ..coupon.clone()
            }),
            Err(DbError::UniqueViolation { field, .. }) => Err(DbError::duplicate(field, code)),
            Err(e) => Err(e),
        }
    }

    /// Replaces the terms of an existing coupon, matched by code.
    pub async fn update(&self, coupon: &Coupon) -> DbResult<()> {
        validate_coupon(coupon)?;
        let code = normalize_code(&coupon.code);
        debug!(code = %code, "Updating coupon");

        let result = sqlx::query(
            r#"
            UPDATE coupons SET
                discount_type = ?2,
                discount_value = ?3,
                category_type = ?4,
                status = ?5,
                expiry_date = ?6,
                updated_at = ?7
            WHERE code = ?1
            "#,
        )
        .bind(&code)
        .bind(coupon.discount_type)
        .bind(coupon.discount_value)
        .bind(coupon.category_type)
        .bind(coupon.status)
        .bind(coupon.expiry_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", code));
        }

        Ok(())
    }

    /// Pauses or resumes a coupon.
    pub async fn set_status(&self, code: &str, status: CouponStatus) -> DbResult<()> {
        let code = normalize_code(code);
        debug!(code = %code, ?status, "Setting coupon status");

        let result = sqlx::query("UPDATE coupons SET status = ?2, updated_at = ?3 WHERE code = ?1")
            .bind(&code)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", code));
        }

        Ok(())
    }

    /// Deletes a coupon.
    pub async fn delete(&self, code: &str) -> DbResult<()> {
        let code = normalize_code(code);
        debug!(code = %code, "Deleting coupon");

        let result = sqlx::query("DELETE FROM coupons WHERE code = ?1")
            .bind(&code)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", code));
        }

        Ok(())
    }

    /// Counts coupons (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
