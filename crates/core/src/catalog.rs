//! Catalog entries and the catalog list.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// An empty product with the given ID, as opened by the "add product" form.
    #[must_use]
    pub fn draft(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            category: Category::default(),
            price: Price::ZERO,
            description: String::new(),
            image: String::new(),
        }
    }

    /// Case-insensitive match against name, description and category.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.category.as_str().to_lowercase().contains(&query)
    }
}

/// Whether [`Catalog::with_saved`] inserted or replaced a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// The ordered list of catalog entries. IDs are unique.
///
/// Transform methods (`with_*`, `without`) are pure and return a new catalog so
/// they can be handed to a persistent slot as the update function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self(products)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.0.iter().find(|p| &p.id == id)
    }

    /// Products in `category`, or every product for `None`.
    pub fn in_category(&self, category: Option<Category>) -> impl Iterator<Item = &Product> {
        self.0
            .iter()
            .filter(move |p| category.is_none_or(|c| p.category == c))
    }

    /// Replace the product with the same ID in place, or append it.
    #[must_use]
    pub fn with_saved(&self, product: Product) -> (Self, SaveOutcome) {
        let mut products = self.0.clone();
        if let Some(slot) = products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
            (Self(products), SaveOutcome::Updated)
        } else {
            products.push(product);
            (Self(products), SaveOutcome::Created)
        }
    }

    /// The catalog without the product `id`.
    #[must_use]
    pub fn without(&self, id: &ProductId) -> Self {
        Self(self.0.iter().filter(|p| &p.id != id).cloned().collect())
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}
