//! Unified error handling with Sentry integration.
//!
//! Every failure the orchestration layer can report collapses into one
//! [`AppError`] bucket chosen by the operation that was running. Callers turn
//! these into status flags for the user; nothing here terminates the process.

use plate_palette_core::Identity;
use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::services::dashboard::DataLoadError;
use crate::services::session::AuthError;

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The backend client could not be constructed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The connectivity probe reported the backend unreachable.
    #[error("Backend unreachable")]
    Connectivity,

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A dashboard query failed.
    #[error("Dashboard error: {0}")]
    DataLoad(#[from] DataLoadError),
}

impl AppError {
    /// Report to Sentry if this is a failure on our side or the backend's,
    /// as opposed to user error.
    pub fn capture(&self) {
        let reportable = matches!(
            self,
            Self::Backend(_) | Self::DataLoad(_) | Self::Auth(AuthError::Backend(_))
        );
        if reportable {
            let event_id = sentry::capture_error(self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Client error");
        }
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose internal error details to users
        match self {
            Self::Config(err) => err.to_string(),
            Self::Backend(_) | Self::Connectivity => {
                "API Error: the recipe service is unreachable".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
                AuthError::InvalidCredentials => {
                    "Login failed. Please check your credentials.".to_string()
                }
                AuthError::SessionUnavailable | AuthError::Backend(_) => {
                    "Login failed. Please try again later.".to_string()
                }
            },
            Self::DataLoad(_) => "Failed to load dashboard data.".to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the signed-in identity.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(identity: &Identity) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(identity.id.to_string()),
            email: identity.email.as_ref().map(ToString::to_string),
            username: Some(identity.name.clone()),
            ..Default::default()
        }));
        scope.set_tag("role", identity.role);
    });
}

/// Clear the Sentry user context (on logout).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
        scope.remove_tag("role");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::DataLoad(DataLoadError::Orders(BackendError::Api {
            status: 500,
            message: "stack trace here".to_string(),
        }));
        assert_eq!(err.user_message(), "Failed to load dashboard data.");

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(
            err.user_message(),
            "Login failed. Please check your credentials."
        );
    }

    #[test]
    fn test_unauthorized_backend_error_maps_to_invalid_credentials() {
        let err = AuthError::from(BackendError::Unauthorized);
        assert!(matches!(err, AuthError::InvalidCredentials));
        let err = AuthError::from(BackendError::Timeout);
        assert!(matches!(err, AuthError::Backend(BackendError::Timeout)));
    }

    #[test]
    fn test_connectivity_display() {
        assert_eq!(AppError::Connectivity.to_string(), "Backend unreachable");
    }
}
