//! Shopping bag commands.

use std::io::Write;

use odhanee_storefront::services::CartSummary;

use super::{CommandError, Context, product_id};

pub fn show<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let summary = ctx.state.cart_service().summary();
    write_summary(ctx.out, &summary)?;
    Ok(())
}

pub fn add<W: Write>(ctx: &mut Context<'_, W>, id: &str) -> Result<(), CommandError> {
    let id = product_id(id)?;
    let item = ctx.state.cart_service().add(&id)?;
    writeln!(
        ctx.out,
        "Added {} to your bag (quantity {}).",
        item.product.name, item.quantity
    )?;
    Ok(())
}

pub fn remove<W: Write>(ctx: &mut Context<'_, W>, id: &str) -> Result<(), CommandError> {
    let id = product_id(id)?;
    if ctx.state.cart_service().remove(&id) {
        writeln!(ctx.out, "Removed {id} from your bag.")?;
    } else {
        writeln!(ctx.out, "{id} is not in your bag.")?;
    }
    Ok(())
}

pub fn set_quantity<W: Write>(
    ctx: &mut Context<'_, W>,
    id: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let id = product_id(id)?;
    let item = ctx.state.cart_service().set_quantity(&id, quantity)?;
    writeln!(ctx.out, "{}: quantity {}", item.product.name, item.quantity)?;
    Ok(())
}

pub fn decrement<W: Write>(ctx: &mut Context<'_, W>, id: &str) -> Result<(), CommandError> {
    let id = product_id(id)?;
    let item = ctx.state.cart_service().decrement(&id)?;
    writeln!(ctx.out, "{}: quantity {}", item.product.name, item.quantity)?;
    Ok(())
}

pub fn confirm<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let summary = ctx.state.cart_service().confirm_selection();
    if summary.items.is_empty() {
        writeln!(ctx.out, "Your bag is empty.")?;
    } else {
        writeln!(
            ctx.out,
            "Selection confirmed: {} piece(s), {}. Checkout is not available yet.",
            summary.item_count, summary.subtotal
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &CartSummary) -> std::io::Result<()> {
    if summary.items.is_empty() {
        return writeln!(out, "Your bag is empty.");
    }
    for item in &summary.items {
        writeln!(
            out,
            "[{}] {} x{} {}",
            item.id(),
            item.product.name,
            item.quantity,
            item.line_total()
        )?;
    }
    writeln!(out, "Items: {}", summary.item_count)?;
    writeln!(out, "Estimated total: {}", summary.subtotal)
}
