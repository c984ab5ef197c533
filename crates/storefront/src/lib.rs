//! Odhanee storefront library.
//!
//! The storefront's state layer: persistent slots over a pluggable key-value
//! backend, plus the catalog, cart, login and admin console services that
//! mutate them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;

pub use config::StorefrontConfig;
pub use error::AppError;
pub use state::AppState;
