//! # Storefront Commands
//!
//! Every operation the storefront UI invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── coupon.rs    ◄─── Apply / remove coupon codes
//! ├── checkout.rs  ◄─── Order draft creation
//! ├── rental.rs    ◄─── Rental plans and quotes
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState, config: &StoreConfig)
//!
//! // Needs the catalog (async lookup) and the cart
//! async fn apply_coupon_code(catalog: &dyn PricingCatalog, cart: &CartState, ...)
//!
//! // Only needs the catalog
//! async fn quote_rental(catalog: &dyn PricingCatalog, config: &StoreConfig, ...)
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod coupon;
pub mod rental;
