//! Cart service.
//!
//! Every operation updates the cart slot through a pure transform of the
//! previous cart. Storage failures are logged by the slot and otherwise
//! ignored: the cart in memory is what the shopper sees.

use odhanee_core::{Cart, CartItem, Catalog, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::store::Slot;

/// Cart totals shown in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    /// Sum of quantities (the cart badge).
    pub item_count: u32,
    /// Estimated total.
    pub subtotal: Price,
}

/// Cart operations over the catalog and cart slots.
pub struct CartService<'a> {
    catalog: &'a Slot<Catalog>,
    cart: &'a mut Slot<Cart>,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Slot<Catalog>, cart: &'a mut Slot<Cart>) -> Self {
        Self { catalog, cart }
    }

    /// Add one unit of catalog entry `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the catalog has no such product.
    pub fn add(&mut self, id: &ProductId) -> Result<CartItem> {
        let product = self
            .catalog
            .get()
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

        let _ = self.cart.update_with(|cart| cart.with_added(product));
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

        let item = self.line(id)?;
        tracing::info!(product_id = %id, quantity = item.quantity, "Added to cart");
        Ok(item)
    }

    /// Drop the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        if self.cart.get().find(id).is_none() {
            return false;
        }
        let _ = self.cart.update_with(|cart| cart.without(id));
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        tracing::info!(product_id = %id, "Removed from cart");
        true
    }

    /// Set the quantity of an existing line; values below 1 become 1.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the cart has no line for `id`.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<CartItem> {
        self.line(id)?;
        let _ = self.cart.update_with(|cart| cart.with_quantity(id, quantity));
        self.line(id)
    }

    /// Lower the quantity by one, never below 1.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the cart has no line for `id`.
    pub fn decrement(&mut self, id: &ProductId) -> Result<CartItem> {
        let current = self.line(id)?.quantity;
        self.set_quantity(id, current.saturating_sub(1))
    }

    /// The cart with its badge count and estimated total.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let cart = self.cart.get();
        CartSummary {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        }
    }

    /// "Confirm Selection": checkout is not part of this storefront, so this
    /// leaves the cart untouched.
    pub fn confirm_selection(&self) -> CartSummary {
        let summary = self.summary();
        tracing::info!(
            item_count = summary.item_count,
            subtotal = summary.subtotal.amount(),
            "Selection confirmed (checkout not available)"
        );
        summary
    }

    fn line(&self, id: &ProductId) -> Result<CartItem> {
        self.cart
            .get()
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("cart line for product {id}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use odhanee_core::seed;

    use super::*;
    use crate::store::{MemoryBackend, keys};

    fn slots(backend: &Arc<MemoryBackend>) -> (Slot<Catalog>, Slot<Cart>) {
        let (catalog, _) = Slot::initialize(backend.clone(), keys::CATALOG, seed::products());
        let (cart, _) = Slot::initialize(backend.clone(), keys::CART, Cart::new());
        (catalog, cart)
    }

    #[test]
    fn test_add_twice_yields_one_line_quantity_two() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        let mut service = CartService::new(&catalog, &mut cart);

        service.add(&ProductId::new("1")).unwrap();
        let item = service.add(&ProductId::new("1")).unwrap();
        assert_eq!(item.quantity, 2);

        let summary = service.summary();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].id().as_str(), "1");
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, Price::new(25000));
    }

    #[test]
    fn test_add_unknown_product() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        let mut service = CartService::new(&catalog, &mut cart);
        assert!(matches!(
            service.add(&ProductId::new("404")),
            Err(AppError::NotFound(_))
        ));
        assert!(service.summary().items.is_empty());
    }

    #[test]
    fn test_quantity_changes() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        let mut service = CartService::new(&catalog, &mut cart);
        let id = ProductId::new("3");

        service.add(&id).unwrap();
        assert_eq!(service.set_quantity(&id, 4).unwrap().quantity, 4);
        assert_eq!(service.decrement(&id).unwrap().quantity, 3);
        assert_eq!(service.set_quantity(&id, 0).unwrap().quantity, 1);
        assert_eq!(service.decrement(&id).unwrap().quantity, 1);
        assert!(matches!(
            service.set_quantity(&ProductId::new("2"), 2),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        let mut service = CartService::new(&catalog, &mut cart);
        let id = ProductId::new("2");

        service.add(&id).unwrap();
        assert!(service.remove(&id));
        assert!(!service.remove(&id));
        assert_eq!(service.summary().item_count, 0);
    }

    #[test]
    fn test_cart_written_through() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        CartService::new(&catalog, &mut cart)
            .add(&ProductId::new("4"))
            .unwrap();

        let stored: Cart = serde_json::from_str(&backend.raw(keys::CART).unwrap()).unwrap();
        assert_eq!(stored.item_count(), 1);
    }

    #[test]
    fn test_add_survives_write_failure() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        backend.set_read_only(true);

        let mut service = CartService::new(&catalog, &mut cart);
        let item = service.add(&ProductId::new("1")).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(backend.raw(keys::CART).is_none());
    }

    #[test]
    fn test_confirm_selection_is_inert() {
        let backend = Arc::new(MemoryBackend::new());
        let (catalog, mut cart) = slots(&backend);
        let mut service = CartService::new(&catalog, &mut cart);
        service.add(&ProductId::new("1")).unwrap();

        let before = service.summary();
        assert_eq!(service.confirm_selection(), before);
        assert_eq!(service.summary(), before);
    }
}
