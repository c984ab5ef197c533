//! Application state: the five persistent slots.

use std::sync::Arc;

use odhanee_core::{Cart, Catalog, SiteSettings, User, UserDirectory, seed};

use crate::error::{AppError, Result};
use crate::services::{AdminService, AuthService, CartService, CatalogView};
use crate::store::{Backend, Slot, StoreError, keys};

/// All storefront state, owned by the top-level interaction loop.
///
/// Created with [`AppState::open`] against an injected backend; dropped when
/// the application exits. Every mutation goes through one of the services,
/// which write the touched slot through immediately.
#[derive(Debug)]
pub struct AppState {
    catalog: Slot<Catalog>,
    cart: Slot<Cart>,
    session: Slot<Option<User>>,
    users: Slot<UserDirectory>,
    settings: Slot<SiteSettings>,
    load_errors: Vec<StoreError>,
}

impl AppState {
    /// Load every slot from `backend`, falling back to the seed data.
    ///
    /// Load failures do not prevent startup; they are logged and kept in
    /// [`AppState::load_errors`].
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        let mut load_errors = Vec::new();
        let mut track = |status: std::result::Result<(), StoreError>| {
            if let Err(err) = status {
                load_errors.push(err);
            }
        };

        let (catalog, status) = Slot::initialize(backend.clone(), keys::CATALOG, seed::products());
        track(status);
        let (cart, status) = Slot::initialize(backend.clone(), keys::CART, Cart::new());
        track(status);
        let (session, status) = Slot::initialize(backend.clone(), keys::SESSION, None::<User>);
        track(status);
        let (users, status) = Slot::initialize(backend.clone(), keys::USERS, seed::users());
        track(status);
        let (settings, status) = Slot::initialize(backend, keys::SETTINGS, seed::settings());
        track(status);

        tracing::info!(
            products = catalog.get().len(),
            cart_lines = cart.get().items().len(),
            users = users.get().len(),
            logged_in = session.get().is_some(),
            load_failures = load_errors.len(),
            "Storefront state loaded"
        );

        Self {
            catalog,
            cart,
            session,
            users,
            settings,
            load_errors,
        }
    }

    /// Slots that fell back to their seed value because the stored entry was
    /// unreadable.
    #[must_use]
    pub fn load_errors(&self) -> &[StoreError] {
        &self.load_errors
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog.get()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.cart.get()
    }

    /// The logged-in account, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.get().as_ref()
    }

    #[must_use]
    pub const fn users(&self) -> &UserDirectory {
        self.users.get()
    }

    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        self.settings.get()
    }

    /// Read-only catalog browsing.
    #[must_use]
    pub const fn catalog_view(&self) -> CatalogView<'_> {
        CatalogView::new(self.catalog.get())
    }

    /// Cart operations.
    pub fn cart_service(&mut self) -> CartService<'_> {
        CartService::new(&self.catalog, &mut self.cart)
    }

    /// Login and logout.
    pub fn auth_service(&mut self) -> AuthService<'_> {
        AuthService::new(&mut self.users, &mut self.session)
    }

    /// The admin console, available to administrators only.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is logged in and
    /// `AppError::Forbidden` when the session user is not an administrator.
    pub fn admin_service(&mut self) -> Result<AdminService<'_>> {
        let actor = self
            .session
            .get()
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("log in to use the admin console".to_owned()))?;

        if !actor.is_admin {
            return Err(AppError::Forbidden(format!(
                "{} is not an administrator",
                actor.email
            )));
        }

        Ok(AdminService::new(
            actor,
            &mut self.catalog,
            &mut self.users,
            &mut self.settings,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::{FailureKind, MemoryBackend};

    #[test]
    fn test_open_empty_backend_uses_seeds() {
        let state = AppState::open(Arc::new(MemoryBackend::new()));
        assert!(state.load_errors().is_empty());
        assert_eq!(state.catalog(), &seed::products());
        assert!(state.cart().is_empty());
        assert!(state.current_user().is_none());
        assert_eq!(state.users(), &seed::users());
        assert_eq!(state.settings(), &seed::settings());
    }

    #[test]
    fn test_open_isolates_malformed_slot() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_raw(keys::USERS, "not json at all");
        backend.insert_raw(keys::CART, "[]");

        let state = AppState::open(backend);
        assert_eq!(state.load_errors().len(), 1);
        assert_eq!(state.load_errors()[0].key(), keys::USERS);
        assert_eq!(state.load_errors()[0].kind(), FailureKind::Read);
        assert_eq!(state.users(), &seed::users());
        assert_eq!(state.catalog().len(), 4);
    }

    #[test]
    fn test_admin_service_requires_login() {
        let mut state = AppState::open(Arc::new(MemoryBackend::new()));
        assert!(matches!(
            state.admin_service(),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_admin_service_requires_admin_flag() {
        let mut state = AppState::open(Arc::new(MemoryBackend::new()));
        state
            .auth_service()
            .login("customer@odhanee.com", None)
            .unwrap();
        assert!(matches!(state.admin_service(), Err(AppError::Forbidden(_))));

        state.auth_service().logout();
        state
            .auth_service()
            .login("admin@odhanee.com", None)
            .unwrap();
        assert!(state.admin_service().is_ok());
    }
}
