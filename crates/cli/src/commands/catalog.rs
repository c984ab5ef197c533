//! Catalog browsing commands.

use std::io::Write;

use odhanee_core::{Category, Product};
use odhanee_storefront::services::{SharePlatform, share_link};

use super::{CommandError, Context, product_id};

/// List the catalog, optionally filtered by category and search text.
pub fn list<W: Write>(
    ctx: &mut Context<'_, W>,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<(), CommandError> {
    let category = category
        .map(Category::parse_filter)
        .transpose()
        .map_err(|e| CommandError::Usage(e.to_string()))?
        .flatten();

    let view = ctx.state.catalog_view();
    let products: Vec<&Product> = match search {
        Some(query) => view
            .search(query)
            .into_iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect(),
        None => view.by_category(category),
    };

    if products.is_empty() {
        writeln!(ctx.out, "No pieces found.")?;
        return Ok(());
    }
    for product in products {
        write_product(ctx.out, product)?;
    }
    Ok(())
}

/// Print the share link for product `id` on `platform`.
pub fn share<W: Write>(
    ctx: &mut Context<'_, W>,
    id: &str,
    platform: &str,
) -> Result<(), CommandError> {
    let platform: SharePlatform = platform.parse().map_err(CommandError::Usage)?;
    let id = product_id(id)?;
    let product = ctx
        .state
        .catalog_view()
        .find(&id)
        .ok_or_else(|| CommandError::Usage(format!("no product with ID {id}")))?;

    let link = share_link(product, platform, ctx.base_url);
    if platform == SharePlatform::Instagram {
        writeln!(ctx.out, "Link copied for {platform}: {link}")?;
    } else {
        writeln!(ctx.out, "{link}")?;
    }
    Ok(())
}

pub(crate) fn write_product<W: Write>(out: &mut W, product: &Product) -> std::io::Result<()> {
    writeln!(
        out,
        "[{}] {} ({}) {}",
        product.id, product.name, product.category, product.price
    )?;
    writeln!(out, "    {}", product.description)
}
