//! Integration tests for the Odhanee storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p odhanee-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Slot loading, fallback and write-through against both backends
//! - `storefront_flows` - End-to-end shopper and administrator sessions
//!
//! Tests need no external services: they run against the in-memory backend
//! or a file backend in a temporary directory.
