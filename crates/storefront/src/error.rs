//! Unified error handling with Sentry integration.
//!
//! Controller operations return `Result<T, AppError>`. Storage failures are not
//! part of this type: slots degrade silently (see [`crate::store`]) and only
//! report through logs and their own `StoreError`.

use thiserror::Error;

use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No user is logged in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The logged-in user may not use this feature.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Log the error. Attempts to use the admin console without the
    /// administrator flag are also captured to Sentry.
    pub fn report(&self) {
        if matches!(self, Self::Forbidden(_)) {
            let event_id = sentry::capture_error(self);
            tracing::warn!(
                error = %self,
                sentry_event_id = %event_id,
                "Interaction error"
            );
        } else {
            tracing::info!(error = %self, "Interaction rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Called after login to associate events with the account.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Called on logout to stop associating events with the account.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry reports to show the trail of interactions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
