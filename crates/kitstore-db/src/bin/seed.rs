//! # Seed Data Generator
//!
//! Populates the catalog with demo coupons and rental plans for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p kitstore-db --bin seed
//!
//! # Specify database path
//! cargo run -p kitstore-db --bin seed -- --db ./data/kitstore.db
//! ```
//!
//! ## Seeded Catalog
//! - Coupons covering every scope and discount type, plus one paused
//!   and one expired coupon for exercising the rejection paths
//! - Rental plans of 1 week, 2 weeks and 1 month

use chrono::{Duration, Utc};
use kitstore_core::{Coupon, CouponScope, CouponStatus, RentalPlan};
use kitstore_db::{Database, DbConfig};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (id, name, duration_days, fee_percentage)
const RENTAL_PLANS: &[(&str, &str, u32, f64)] = &[
    ("week", "1 Week", 7, 10.0),
    ("fortnight", "2 Weeks", 14, 18.0),
    ("month", "1 Month", 30, 30.0),
];

fn demo_coupons() -> Vec<Coupon> {
    let now = Utc::now();

    vec![
        Coupon::percentage("SAVE10", 10.0, CouponScope::Universal),
        Coupon::percentage("KITS20", 20.0, CouponScope::Kits),
        Coupon::percentage("PARTS15", 15.0, CouponScope::Components),
        Coupon::amount("FLAT100", 100.0, CouponScope::Universal),
        Coupon::amount("KITFLAT250", 250.0, CouponScope::Kits)
            .with_expiry(now + Duration::days(90)),
        Coupon::percentage("PAUSED5", 5.0, CouponScope::Universal)
            .with_status(CouponStatus::Paused),
        Coupon::percentage("LASTYEAR", 25.0, CouponScope::Universal)
            .with_expiry(now - Duration::days(30)),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./kitstore_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("KitStore Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kitstore_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding catalog");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.coupons().count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has coupons; delete the database file to reseed");
        return Ok(());
    }

    let mut seeded = 0;
    for coupon in demo_coupons() {
        match db.coupons().insert(&coupon).await {
            Ok(stored) => {
                info!(code = %stored.code, "Seeded coupon");
                seeded += 1;
            }
            Err(e) => warn!(code = %coupon.code, error = %e, "Failed to seed coupon"),
        }
    }

    for (id, name, duration_days, fee_percentage) in RENTAL_PLANS {
        let plan = RentalPlan {
            id: id.to_string(),
            name: name.to_string(),
            duration_days: *duration_days,
            fee_percentage: *fee_percentage,
        };
        db.rental_plans().insert(&plan).await?;
        info!(id = %plan.id, days = plan.duration_days, "Seeded rental plan");
    }

    info!(
        coupons = seeded,
        plans = RENTAL_PLANS.len(),
        "Seed complete"
    );
    db.close().await;

    Ok(())
}
