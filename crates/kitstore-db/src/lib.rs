//! # kitstore-db: Coupon & Rental Plan Catalog
//!
//! SQLite storage for the data the pricing flows look up at apply-time:
//! coupons (managed from the admin back-office) and rental plans.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_coupon_code / quote_rental (storefront)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kitstore-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ CouponRepository │   │ (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ RentalPlanRepo   │   │ 001_catalog │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir, or KITSTORE_DB_PATH)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kitstore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("kitstore.db")).await?;
//! let coupon = db.coupons().get_by_code("SAVE10").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::coupon::CouponRepository;
pub use repository::rental_plan::RentalPlanRepository;
