//! Catalog browsing and product sharing.

use core::fmt;
use core::str::FromStr;

use url::Url;

use odhanee_core::{Catalog, Category, Product, ProductId};

/// How many products the search overlay suggests before anything is typed.
const FEATURED_COUNT: usize = 3;

/// Where a product can be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    WhatsApp,
    Facebook,
    /// Instagram has no web share endpoint; the page link is copied instead.
    Instagram,
}

impl FromStr for SharePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wa" | "whatsapp" => Ok(Self::WhatsApp),
            "fb" | "facebook" => Ok(Self::Facebook),
            "in" | "ig" | "instagram" => Ok(Self::Instagram),
            other => Err(format!(
                "unknown share platform `{other}` (expected whatsapp, facebook or instagram)"
            )),
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WhatsApp => "WhatsApp",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        })
    }
}

/// Read-only view over the catalog slot.
#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
}

impl<'a> CatalogView<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn products(&self) -> &'a [Product] {
        self.catalog.products()
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&'a Product> {
        self.catalog.find(id)
    }

    /// Products in `category`, or all of them for `None`.
    #[must_use]
    pub fn by_category(&self, category: Option<Category>) -> Vec<&'a Product> {
        self.catalog.in_category(category).collect()
    }

    /// The first few products, suggested by the search overlay.
    #[must_use]
    pub fn featured(&self) -> Vec<&'a Product> {
        self.catalog.products().iter().take(FEATURED_COUNT).collect()
    }

    /// Products whose name, description or category contains `query`
    /// (case-insensitive). A blank query returns [`CatalogView::featured`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&'a Product> {
        if query.trim().is_empty() {
            return self.featured();
        }
        self.catalog
            .products()
            .iter()
            .filter(|p| p.matches(query))
            .collect()
    }
}

/// Build the link that shares `product` on `platform`.
///
/// `page_url` is the storefront page being shared.
#[must_use]
pub fn share_link(product: &Product, platform: SharePlatform, page_url: &Url) -> String {
    let url = page_url.as_str();
    match platform {
        SharePlatform::WhatsApp => {
            let text = format!("Check out this beautiful {} from Odhanee! {url}", product.name);
            format!(
                "https://api.whatsapp.com/send?text={}",
                urlencoding::encode(&text)
            )
        }
        SharePlatform::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            urlencoding::encode(url)
        ),
        SharePlatform::Instagram => url.to_owned(),
    }
}
