//! Admin console commands.
//!
//! Every command first asks the state for the admin console, which fails for
//! anonymous sessions and for accounts without the administrator flag.

use std::io::Write;

use clap::Args;

use odhanee_core::{Category, Price, SaveOutcome, SettingsUpdate, SiteSettings};

use super::catalog::write_product;
use super::{CommandError, Context, product_id};

/// Product form fields. Omitted fields keep their current value when editing.
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    /// ID of the product to edit; a new ID is assigned when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Category (Sarees, Lehengas, Suits or Kurtis)
    #[arg(long)]
    pub category: Option<Category>,

    /// Price in rupees
    #[arg(long)]
    pub price: Option<u64>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Absolute image URL
    #[arg(long)]
    pub image: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

pub fn list_products<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let admin = ctx.state.admin_service()?;
    writeln!(ctx.out, "Collection ({} pieces)", admin.catalog().len())?;
    for product in admin.catalog().products() {
        write_product(ctx.out, product)?;
    }
    Ok(())
}

/// Print a blank draft with a fresh ID.
pub fn new_product<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let draft = ctx.state.admin_service()?.new_product_draft();
    writeln!(ctx.out, "New product draft {}", draft.id)?;
    writeln!(
        ctx.out,
        "Save it with: odhanee admin products save --id {} --name ... --category {} --price ... --description ... --image ...",
        draft.id, draft.category
    )?;
    Ok(())
}

/// Create a product, or edit an existing one when `--id` names it.
pub fn save_product<W: Write>(
    ctx: &mut Context<'_, W>,
    fields: ProductFields,
) -> Result<(), CommandError> {
    let mut admin = ctx.state.admin_service()?;

    let mut product = match fields.id.as_deref().map(product_id).transpose()? {
        Some(id) => admin
            .catalog()
            .find(&id)
            .cloned()
            .unwrap_or_else(|| odhanee_core::Product::draft(id)),
        None => admin.new_product_draft(),
    };

    if let Some(name) = fields.name {
        product.name = name;
    }
    if let Some(category) = fields.category {
        product.category = category;
    }
    if let Some(price) = fields.price {
        product.price = Price::new(price);
    }
    if let Some(description) = fields.description {
        product.description = description;
    }
    if let Some(image) = fields.image {
        product.image = image;
    }

    let id = product.id.clone();
    let outcome = admin.save_product(product)?;
    let verb = match outcome {
        SaveOutcome::Created => "Created",
        SaveOutcome::Updated => "Updated",
    };
    writeln!(ctx.out, "{verb} product {id}.")?;
    Ok(())
}

pub fn delete_product<W: Write>(ctx: &mut Context<'_, W>, id: &str) -> Result<(), CommandError> {
    let id = product_id(id)?;
    let removed = ctx.state.admin_service()?.delete_product(&id)?;
    writeln!(ctx.out, "Deleted {} ({id}).", removed.name)?;
    Ok(())
}

// =============================================================================
// Users
// =============================================================================

pub fn list_users<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let admin = ctx.state.admin_service()?;
    for user in admin.users() {
        let marker = if user.email == admin.actor().email { " (you)" } else { "" };
        writeln!(
            ctx.out,
            "{} <{}> {} joined {}{marker}",
            user.name,
            user.email,
            user.role_label(),
            user.joined_at
        )?;
    }
    Ok(())
}

pub fn toggle_admin<W: Write>(ctx: &mut Context<'_, W>, email: &str) -> Result<(), CommandError> {
    let is_admin = ctx.state.admin_service()?.toggle_admin(email)?;
    let role = if is_admin { "Administrator" } else { "Customer" };
    writeln!(ctx.out, "{} is now: {role}", email.trim())?;
    Ok(())
}

// =============================================================================
// Settings
// =============================================================================

pub fn show_settings<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let admin = ctx.state.admin_service()?;
    write_settings(ctx.out, admin.settings())?;
    Ok(())
}

pub fn update_settings<W: Write>(
    ctx: &mut Context<'_, W>,
    promo: Option<String>,
    marquee: Option<String>,
    announcement: Option<bool>,
) -> Result<(), CommandError> {
    let update = SettingsUpdate {
        promo_banner: promo,
        marquee_text: marquee,
        announcement_active: announcement,
    };
    if update.is_empty() {
        return Err(CommandError::Usage(
            "nothing to change: pass --promo, --marquee or --announcement".to_owned(),
        ));
    }

    let mut admin = ctx.state.admin_service()?;
    let settings = admin.update_settings(&update);
    write_settings(ctx.out, settings)?;
    Ok(())
}

pub fn toggle_announcement<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let active = ctx.state.admin_service()?.toggle_announcement();
    let state = if active { "on" } else { "off" };
    writeln!(ctx.out, "Announcement bar is {state}.")?;
    Ok(())
}

pub fn save_settings<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let admin = ctx.state.admin_service()?;
    write_settings(ctx.out, admin.save_settings())?;
    writeln!(ctx.out, "Settings saved.")?;
    Ok(())
}

fn write_settings<W: Write>(out: &mut W, settings: &SiteSettings) -> std::io::Result<()> {
    writeln!(out, "Promo banner: {}", settings.promo_banner)?;
    writeln!(out, "Marquee text: {}", settings.marquee_text)?;
    writeln!(
        out,
        "Announcement bar: {}",
        if settings.announcement_active { "on" } else { "off" }
    )
}
