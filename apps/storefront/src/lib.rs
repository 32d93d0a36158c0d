//! # KitStore Storefront
//!
//! Session layer of the KitStore storefront: the cart, coupon codes,
//! checkout and rental quotes. All pricing is delegated to `kitstore-core`.
//!
//! ## Module Organization
//! ```text
//! kitstore_storefront/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── catalog.rs      ◄─── PricingCatalog seam (coupon / plan lookup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Session cart
//! │   └── config.rs   ◄─── StoreConfig (env + defaults)
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── coupon.rs   ◄─── Coupon codes
//! │   ├── checkout.rs ◄─── Order drafts
//! │   ├── rental.rs   ◄─── Rental quotes
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! kitstore_storefront::init_tracing();
//!
//! let store = Storefront::open(StoreConfig::from_env()?).await?;
//! let cart = add_to_cart(&store.cart, &store.config, item)?;
//! let applied = apply_coupon_code(&store.catalog, &store.cart, &store.config, "SAVE10").await;
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::PricingCatalog;
use error::ApiError;
use kitstore_db::{Database, DbConfig};
use state::{CartState, StoreConfig};

/// Everything one storefront session needs.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: StoreConfig,
    pub cart: CartState,
    pub catalog: Database,
}

impl Storefront {
    /// Opens the catalog and starts an empty cart.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Determine Database Path ──────────────────────────────────────────► │
    /// │     • KITSTORE_DB_PATH, or the platform data directory                  │
    /// │     • ":memory:" for an in-memory catalog                               │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Run pending migrations                                            │
    /// │                                                                         │
    /// │  3. Initialize State ─────────────────────────────────────────────────► │
    /// │     • CartState: empty cart behind a Mutex                              │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: StoreConfig) -> Result<Self, ApiError> {
        info!(store = %config.store_name, "Starting KitStore storefront");

        let catalog = open_database(&config).await?;
        info!("Catalog connected and migrations applied");

        Ok(Storefront {
            config,
            cart: CartState::new(),
            catalog,
        })
    }

    /// The catalog as the commands see it.
    pub fn pricing_catalog(&self) -> &dyn PricingCatalog {
        &self.catalog
    }
}

/// Connects to the catalog database named by `config`.
pub async fn open_database(config: &StoreConfig) -> Result<Database, ApiError> {
    let db_config = if config.database_path.as_os_str() == ":memory:" {
        DbConfig::in_memory()
    } else {
        if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(state::ConfigError::from)?;
        }
        DbConfig::new(&config.database_path)
    };

    info!(path = %db_config.database_path.display(), "Opening catalog");
    Ok(Database::new(db_config).await?)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kitstore=trace` - Show trace for kitstore crates only
/// - Default: `info,kitstore=debug,sqlx=warn`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kitstore=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
