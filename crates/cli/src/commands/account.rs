//! Login, logout and profile commands.

use std::io::Write;

use odhanee_storefront::error::AppError;

use super::{CommandError, Context};

pub fn login<W: Write>(
    ctx: &mut Context<'_, W>,
    email: &str,
    name: Option<&str>,
) -> Result<(), CommandError> {
    let user = ctx
        .state
        .auth_service()
        .login(email, name)
        .map_err(AppError::from)?;
    writeln!(ctx.out, "Welcome, {}.", user.first_name())?;
    if user.is_admin {
        writeln!(ctx.out, "Admin console available: odhanee admin --help")?;
    }
    Ok(())
}

pub fn logout<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    match ctx.state.auth_service().logout() {
        Some(user) => writeln!(ctx.out, "Goodbye, {}.", user.first_name())?,
        None => writeln!(ctx.out, "Not logged in.")?,
    }
    Ok(())
}

/// Print the profile of the logged-in account.
pub fn whoami<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let Some(user) = ctx.state.current_user() else {
        writeln!(ctx.out, "Not logged in.")?;
        return Ok(());
    };
    writeln!(ctx.out, "{} <{}>", user.name, user.email)?;
    writeln!(ctx.out, "{}", user.membership_label())?;
    writeln!(ctx.out, "Role: {}", user.role_label())?;
    writeln!(ctx.out, "Member since {}", user.joined_at.format("%B %Y"))?;
    Ok(())
}

/// Print the promo banner and, when active, the announcement bar.
pub fn banner<W: Write>(ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    let settings = ctx.state.settings();
    writeln!(ctx.out, "{}", settings.promo_banner)?;
    if let Some(line) = settings.announcement_line() {
        writeln!(ctx.out, "{line}")?;
    }
    Ok(())
}
