//! Durable storage for storefront state.
//!
//! # Layout
//!
//! Every piece of application state lives in its own [`Slot`], bound to one
//! key of a [`Backend`]:
//!
//! - `odhanee_products` - the catalog
//! - `odhanee_cart` - cart lines
//! - `odhanee_session` - the logged-in account, or `null`
//! - `odhanee_users` - the user directory
//! - `odhanee_settings` - site banner settings
//!
//! Values are JSON documents. Slots are independent: there is no transaction
//! spanning two keys.

mod backend;
mod file;
mod memory;
mod slot;

pub use backend::{Backend, BackendError};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use slot::{FailureKind, Slot, StoreError};

/// Backend keys of the application slots.
pub mod keys {
    /// Key for the product catalog.
    pub const CATALOG: &str = "odhanee_products";

    /// Key for the shopping cart.
    pub const CART: &str = "odhanee_cart";

    /// Key for the logged-in account.
    pub const SESSION: &str = "odhanee_session";

    /// Key for the user directory.
    pub const USERS: &str = "odhanee_users";

    /// Key for the site settings singleton.
    pub const SETTINGS: &str = "odhanee_settings";
}
