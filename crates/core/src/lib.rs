//! Odhanee Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront library and the
//! command-line front end:
//! - catalog entries and the catalog list
//! - cart lines and the cart
//! - user accounts and the user directory
//! - site banner settings
//! - the built-in seed data
//!
//! # Architecture
//!
//! The core crate contains only types and pure transforms - no I/O, no
//! storage access. Every `with_*`/`without` method returns a new value so it
//! can be used directly as the update function of a persistent slot.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod seed;
pub mod settings;
pub mod types;
pub mod users;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{Catalog, Product, SaveOutcome};
pub use settings::{SettingsUpdate, SiteSettings};
pub use types::*;
pub use users::{DuplicateEmail, User, UserDirectory};
