//! Shopping cart lines.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A catalog entry plus a quantity.
///
/// Serialized as the product object with an extra `quantity` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Errors for a stored cart that breaks the line invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart has more than one line for product {0}")]
    DuplicateLine(ProductId),
    #[error("cart line for product {0} has quantity 0")]
    ZeroQuantity(ProductId),
}

/// The cart: at most one line per product ID.
///
/// Serialized as the plain list of lines. Deserializing rejects duplicate
/// product IDs and zero quantities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart(Vec<CartItem>);

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id().clone()));
            }
            if !seen.insert(item.id()) {
                return Err(CartError::DuplicateLine(item.id().clone()));
            }
        }
        Ok(Self(items))
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.0
    }
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&CartItem> {
        self.0.iter().find(|item| item.id() == id)
    }

    /// Total number of units, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.0
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.0.iter().map(CartItem::line_total).sum()
    }

    /// Add one unit of `product`: increments the existing line or appends a
    /// new line with quantity 1.
    #[must_use]
    pub fn with_added(&self, product: &Product) -> Self {
        let mut items = self.0.clone();
        match items.iter_mut().find(|item| item.id() == &product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Self(items)
    }

    /// Set the quantity of an existing line, clamped to at least 1.
    #[must_use]
    pub fn with_quantity(&self, id: &ProductId, quantity: u32) -> Self {
        let quantity = quantity.max(1);
        Self(
            self.0
                .iter()
                .map(|item| {
                    if item.id() == id {
                        CartItem {
                            quantity,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        )
    }

    /// The cart without the line for `id`.
    #[must_use]
    pub fn without(&self, id: &ProductId) -> Self {
        Self(
            self.0
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::seed;

    fn product(id: &str) -> Product {
        seed::products().find(&ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_add_same_product_increments() {
        let saree = product("1");
        let cart = Cart::new().with_added(&saree).with_added(&saree);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].id().as_str(), "1");
    }

    #[test]
    fn test_add_n_times_yields_one_line() {
        let kurti = product("4");
        let cart = (0..7).fold(Cart::new(), |cart, _| cart.with_added(&kurti));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_distinct_products_get_distinct_lines() {
        let cart = Cart::new()
            .with_added(&product("1"))
            .with_added(&product("3"))
            .with_added(&product("1"));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Price::new(12500 * 2 + 8500));
    }

    #[test]
    fn test_with_quantity_clamps_to_one() {
        let cart = Cart::new().with_added(&product("2"));
        let cart = cart.with_quantity(&ProductId::new("2"), 0);
        assert_eq!(cart.items()[0].quantity, 1);
        let cart = cart.with_quantity(&ProductId::new("2"), 5);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_with_quantity_ignores_missing_line() {
        let cart = Cart::new().with_added(&product("2"));
        assert_eq!(cart.with_quantity(&ProductId::new("9"), 4), cart);
    }

    #[test]
    fn test_without() {
        let cart = Cart::new()
            .with_added(&product("1"))
            .with_added(&product("2"));
        let cart = cart.without(&ProductId::new("1"));
        assert_eq!(cart.items().len(), 1);
        assert!(cart.find(&ProductId::new("1")).is_none());
    }

    #[test]
    fn test_line_is_product_with_quantity() {
        let cart = Cart::new().with_added(&product("3"));
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json[0]["id"], "3");
        assert_eq!(json[0]["name"], "Pastel Anarkali Suit");
        assert_eq!(json[0]["quantity"], 1);
    }

    #[test]
    fn test_stored_cart_must_keep_line_invariants() {
        let line = serde_json::to_value(Cart::new().with_added(&product("1"))).unwrap();
        let mut doubled = line.clone();
        doubled
            .as_array_mut()
            .unwrap()
            .push(line[0].clone());
        let err = serde_json::from_value::<Cart>(doubled).unwrap_err();
        assert!(err.to_string().contains("more than one line for product 1"));

        let mut zero = line.clone();
        zero[0]["quantity"] = 0.into();
        let err = serde_json::from_value::<Cart>(zero).unwrap_err();
        assert!(err.to_string().contains("quantity 0"));

        let cart: Cart = serde_json::from_value(line).unwrap();
        assert_eq!(cart.item_count(), 1);
    }
}
