//! Login service.
//!
//! Login is a mock: there is no password check. It resolves the account for an
//! email (creating it on first sight) and stores it as the session.

mod error;

pub use error::AuthError;

use chrono::Utc;

use odhanee_core::{Email, User, UserDirectory, UserId};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::store::Slot;

/// Display name given to accounts created without one.
pub const DEFAULT_DISPLAY_NAME: &str = "Welcome Guest";

/// Maximum display name length in characters.
const MAX_NAME_LENGTH: usize = 100;

/// Login and logout over the user directory and session slots.
pub struct AuthService<'a> {
    users: &'a mut Slot<UserDirectory>,
    session: &'a mut Slot<Option<User>>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a mut Slot<UserDirectory>, session: &'a mut Slot<Option<User>>) -> Self {
        Self { users, session }
    }

    /// Log in as `email`.
    ///
    /// An email already in the directory resolves to the stored account, role
    /// included; `name` is ignored in that case. A new email gets a fresh
    /// customer account, appended to the directory before the session is set.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::NameTooLong` if the display name is too long.
    pub fn login(&mut self, email: &str, name: Option<&str>) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let user = if let Some(existing) = self.users.get().find_by_email(&email) {
            tracing::info!(user_id = %existing.id, "Login with existing account");
            existing.clone()
        } else {
            let user = new_account(email, name)?;
            let _ = self.users.update_with(|users| users.with_account(user.clone()));
            tracing::info!(user_id = %user.id, "Created account on first login");
            user
        };

        let _ = self.session.replace_with(Some(user.clone()));
        set_sentry_user(&user.id, Some(user.email.as_str()));

        Ok(user)
    }

    /// Clear the session, returning the account that was logged in.
    pub fn logout(&mut self) -> Option<User> {
        let previous = self.session.get().clone();
        let _ = self.session.replace_with(None);
        clear_sentry_user();

        if let Some(user) = &previous {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        previous
    }

    /// The logged-in account, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.get().as_ref()
    }
}

fn new_account(email: Email, name: Option<&str>) -> Result<User, AuthError> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    if let Some(n) = name {
        if n.chars().count() > MAX_NAME_LENGTH {
            return Err(AuthError::NameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
    }

    let now = Utc::now();
    Ok(User {
        id: UserId::from_millis(now.timestamp_millis()),
        email,
        name: name.unwrap_or(DEFAULT_DISPLAY_NAME).to_owned(),
        is_admin: false,
        joined_at: now.date_naive(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use odhanee_core::seed;

    use super::*;
    use crate::store::{MemoryBackend, keys};

    fn slots(backend: &Arc<MemoryBackend>) -> (Slot<UserDirectory>, Slot<Option<User>>) {
        let (users, _) = Slot::initialize(backend.clone(), keys::USERS, seed::users());
        let (session, _) = Slot::initialize(backend.clone(), keys::SESSION, None);
        (users, session)
    }

    #[test]
    fn test_login_new_email_appends_one_account() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        let user = auth.login("guest@odhanee.com", None).unwrap();
        assert_eq!(user.name, DEFAULT_DISPLAY_NAME);
        assert!(!user.is_admin);
        assert!(user.id.as_str().starts_with("u-"));
        assert_eq!(auth.current_user(), Some(&user));
        drop(auth);

        assert_eq!(users.get().len(), 3);
        assert_eq!(session.get().as_ref(), Some(&user));
    }

    #[test]
    fn test_login_existing_email_reuses_stored_role() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        let user = auth.login(" admin@odhanee.com ", Some("Someone Else")).unwrap();
        assert!(user.is_admin);
        assert_eq!(user.name, "Odhanee Admin");
        assert_eq!(user.id.as_str(), "admin-1");
        drop(auth);

        assert_eq!(users.get(), &seed::users());
    }

    #[test]
    fn test_repeated_login_never_duplicates() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        let first = auth.login("new@odhanee.com", Some("Meera Shah")).unwrap();
        auth.logout();
        let second = auth.login("new@odhanee.com", None).unwrap();
        assert_eq!(first, second);
        drop(auth);

        assert_eq!(users.get().len(), 3);
    }

    #[test]
    fn test_login_invalid_email() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        assert!(matches!(
            auth.login("not-an-email", None),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_login_name_too_long() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            auth.login("long@odhanee.com", Some(&name)),
            Err(AuthError::NameTooLong { .. })
        ));
        drop(auth);
        assert_eq!(users.get().len(), 2);
    }

    #[test]
    fn test_logout() {
        let backend = Arc::new(MemoryBackend::new());
        let (mut users, mut session) = slots(&backend);
        let mut auth = AuthService::new(&mut users, &mut session);

        assert!(auth.logout().is_none());
        auth.login("customer@odhanee.com", None).unwrap();
        let previous = auth.logout().unwrap();
        assert_eq!(previous.name, "Priya Verma");
        assert!(auth.current_user().is_none());
        assert_eq!(backend.raw(keys::SESSION).as_deref(), Some("null"));
    }
}
