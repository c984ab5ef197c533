//! Admin console: catalog, user and site settings management.
//!
//! An [`AdminService`] can only be obtained through
//! [`crate::state::AppState::admin_service`], which checks that the session
//! user is an administrator.

use chrono::Utc;
use url::Url;

use odhanee_core::{
    Catalog, Email, Product, ProductId, SaveOutcome, SettingsUpdate, SiteSettings, User,
    UserDirectory,
};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::store::Slot;

/// Administrator operations over the catalog, users and settings slots.
pub struct AdminService<'a> {
    actor: &'a User,
    catalog: &'a mut Slot<Catalog>,
    users: &'a mut Slot<UserDirectory>,
    settings: &'a mut Slot<SiteSettings>,
}

impl<'a> AdminService<'a> {
    pub(crate) const fn new(
        actor: &'a User,
        catalog: &'a mut Slot<Catalog>,
        users: &'a mut Slot<UserDirectory>,
        settings: &'a mut Slot<SiteSettings>,
    ) -> Self {
        Self {
            actor,
            catalog,
            users,
            settings,
        }
    }

    /// The administrator using the console.
    #[must_use]
    pub const fn actor(&self) -> &User {
        self.actor
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog.get()
    }

    /// A blank product with a fresh timestamp ID, ready for editing.
    #[must_use]
    pub fn new_product_draft(&self) -> Product {
        Product::draft(ProductId::from_millis(Utc::now().timestamp_millis()))
    }

    /// Insert `product`, or replace the entry with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the name or description is blank or
    /// the image is not an absolute URL.
    pub fn save_product(&mut self, product: Product) -> Result<SaveOutcome> {
        validate_product(&product)?;

        let id = product.id.clone();
        let (next, outcome) = self.catalog.get().with_saved(product);
        let _ = self.catalog.replace_with(next);

        add_breadcrumb(
            "admin",
            "Saved product",
            Some(&[("product_id", id.as_str())]),
        );
        tracing::info!(
            admin = %self.actor.email,
            product_id = %id,
            ?outcome,
            "Product saved"
        );
        Ok(outcome)
    }

    /// Remove the catalog entry `id`.
    ///
    /// Cart lines already holding the product are left alone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the catalog has no such product.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Product> {
        let removed = self
            .catalog
            .get()
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

        let _ = self.catalog.update_with(|catalog| catalog.without(id));
        tracing::info!(admin = %self.actor.email, product_id = %id, "Product deleted");
        Ok(removed)
    }

    // =========================================================================
    // Users
    // =========================================================================

    #[must_use]
    pub fn users(&self) -> &[User] {
        self.users.get().users()
    }

    /// Flip the administrator flag of the account registered under `email`.
    /// Returns the new flag.
    ///
    /// The session copy of an account is not refreshed; a logged-in user keeps
    /// their current role until they log in again.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a malformed email and
    /// `AppError::NotFound` if no account uses it.
    pub fn toggle_admin(&mut self, email: &str) -> Result<bool> {
        let email = Email::parse(email).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let current = self
            .users
            .get()
            .find_by_email(&email)
            .map(|u| u.is_admin)
            .ok_or_else(|| AppError::NotFound(format!("user {email}")))?;

        let _ = self
            .users
            .update_with(|users| users.with_admin_toggled(&email));

        let is_admin = !current;
        tracing::info!(
            admin = %self.actor.email,
            target = %email,
            is_admin,
            "Administrator flag toggled"
        );
        Ok(is_admin)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        self.settings.get()
    }

    /// Apply a partial settings edit. Takes effect immediately.
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> &SiteSettings {
        if update.is_empty() {
            return self.settings.get();
        }
        let _ = self.settings.update_with(|settings| update.apply(settings));
        tracing::info!(admin = %self.actor.email, "Site settings updated");
        self.settings.get()
    }

    /// Flip the announcement bar on or off. Returns the new state.
    pub fn toggle_announcement(&mut self) -> bool {
        let active = !self.settings.get().announcement_active;
        self.update_settings(&SettingsUpdate {
            announcement_active: Some(active),
            ..SettingsUpdate::default()
        });
        active
    }

    /// The "Save Changes" button. Edits are already live, so this only
    /// confirms the current settings.
    #[must_use]
    pub fn save_settings(&self) -> &SiteSettings {
        tracing::debug!(admin = %self.actor.email, "Settings save requested");
        self.settings.get()
    }
}

fn validate_product(product: &Product) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".to_owned()));
    }
    if product.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "product description is required".to_owned(),
        ));
    }
    Url::parse(product.image.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid image URL: {e}")))?;
    Ok(())
}
