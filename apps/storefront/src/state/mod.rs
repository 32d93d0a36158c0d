//! # State Module
//!
//! Session and startup state for the storefront.
//!
//! Each command takes only the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────┐          │
//! │  │ &dyn Pricing     │  │  CartState   │  │   StoreConfig    │          │
//! │  │     Catalog      │  │              │  │                  │          │
//! │  │  (Database pool) │  │  Arc<Mutex<  │  │  tax_rate_bps    │          │
//! │  │                  │  │    Cart      │  │  shipping_cost   │          │
//! │  │                  │  │  >>          │  │  currency        │          │
//! │  └──────────────────┘  └──────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Catalog: Database has an internal connection pool                   │
//! │  • CartState: Arc<Mutex<T>>, never locked across an .await             │
//! │  • StoreConfig: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{Cart, CartItem, CartState, CartTotals};
pub use config::{default_database_path, ConfigError, StoreConfig};
