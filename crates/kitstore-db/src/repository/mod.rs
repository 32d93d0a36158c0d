//! # Repository Module
//!
//! Catalog repositories.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront command                                                     │
//! │       │                                                                 │
//! │       │  db.coupons().get_by_code("SAVE10")                             │
//! │       ▼                                                                 │
//! │  CouponRepository                                                       │
//! │  ├── get_by_code / list / count                                        │
//! │  └── insert / update / set_status / delete   (admin back-office)       │
//! │                                                                         │
//! │  RentalPlanRepository                                                   │
//! │  ├── list_active / get_by_id                                           │
//! │  └── insert / deactivate                                               │
//! │       │                                                                 │
//! │       ▼  SQL                                                            │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod coupon;
pub mod rental_plan;
