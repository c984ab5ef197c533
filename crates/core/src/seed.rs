//! Built-in seed data used as slot fallbacks on a fresh store.

use chrono::NaiveDate;

use crate::catalog::{Catalog, Product};
use crate::settings::SiteSettings;
use crate::types::{Category, Email, Price, ProductId, UserId};
use crate::users::{User, UserDirectory};

fn product(
    id: &str,
    name: &str,
    category: Category,
    price: u64,
    description: &str,
    image: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        price: Price::new(price),
        description: description.to_owned(),
        image: image.to_owned(),
    }
}

/// The four seed catalog entries.
#[must_use]
pub fn products() -> Catalog {
    Catalog::new(vec![
        product(
            "1",
            "Royal Banarasi Silk Saree",
            Category::Sarees,
            12500,
            "A classic red Banarasi silk saree with intricate zari work, perfect for bridal wear.",
            "https://images.unsplash.com/photo-1610030469983-98e550d6193c?auto=format&fit=crop&q=80&w=800",
        ),
        product(
            "2",
            "Midnight Velvet Lehenga",
            Category::Lehengas,
            24000,
            "Deep navy velvet lehenga with silver sequins and hand-embroidered floral motifs.",
            "https://images.unsplash.com/photo-1599032909756-5dee8c65843b?auto=format&fit=crop&q=80&w=800",
        ),
        product(
            "3",
            "Pastel Anarkali Suit",
            Category::Suits,
            8500,
            "Flowy pastel pink Anarkali suit set with heavy gota patti work on the borders.",
            "https://images.unsplash.com/photo-1583391733956-6c78276477e2?auto=format&fit=crop&q=80&w=800",
        ),
        product(
            "4",
            "Designer Chanderi Kurti",
            Category::Kurtis,
            3200,
            "Elegant beige Chanderi kurti with subtle thread work and side slits.",
            "https://images.unsplash.com/photo-1627484394640-62287332d783?auto=format&fit=crop&q=80&w=800",
        ),
    ])
}

fn account(id: &str, email: &str, name: &str, is_admin: bool, joined_at: (i32, u32, u32)) -> Option<User> {
    Some(User {
        id: UserId::new(id),
        email: Email::parse(email).ok()?,
        name: name.to_owned(),
        is_admin,
        joined_at: NaiveDate::from_ymd_opt(joined_at.0, joined_at.1, joined_at.2)?,
    })
}

/// The two seed accounts: one administrator, one customer.
#[must_use]
pub fn users() -> UserDirectory {
    UserDirectory::new(
        [
            account("admin-1", "admin@odhanee.com", "Odhanee Admin", true, (2023, 1, 1)),
            account("user-1", "customer@odhanee.com", "Priya Verma", false, (2024, 2, 15)),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )
}

/// The seed site settings.
#[must_use]
pub fn settings() -> SiteSettings {
    SiteSettings {
        promo_banner: "FREE SHIPPING ON ORDERS OVER ₹50,000".to_owned(),
        marquee_text: "NEW SUMMER COLLECTION NOW LIVE • HANDCRAFTED WITH LOVE • WORLDWIDE DELIVERY"
            .to_owned(),
        announcement_active: true,
    }
}
