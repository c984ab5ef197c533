//! Storefront services.
//!
//! Each service borrows the slots it works on from [`crate::state::AppState`]
//! for the duration of one interaction.
//!
//! - `catalog` - Browsing, search and share links
//! - `cart` - Cart operations
//! - `auth` - Mock login and logout
//! - `admin` - Admin console (catalog, users, site settings)

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;

pub use admin::AdminService;
pub use auth::{AuthError, AuthService};
pub use cart::{CartService, CartSummary};
pub use catalog::{CatalogView, SharePlatform, share_link};
