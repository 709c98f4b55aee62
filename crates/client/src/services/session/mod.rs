//! Session manager.
//!
//! Owns the single active [`Identity`]. The identity is published through a
//! `tokio::sync::watch` channel: this module holds the only sender, every other
//! component reads through a receiver from [`SessionManager::subscribe`].
//!
//! ```text
//! Unknown --restore/login--> Authenticated | Anonymous
//! Authenticated --logout--> Anonymous
//! ```

mod error;

pub use error::AuthError;

use std::fmt;
use std::sync::Arc;

use plate_palette_core::{Email, Identity};
use secrecy::SecretString;
use tokio::sync::{Mutex, watch};
use tracing::{info, instrument, warn};

use crate::backend::RecipeBackend;
use crate::error::{clear_sentry_user, set_sentry_user};

/// Authentication state of the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup has not resolved the session yet.
    #[default]
    Unknown,
    /// No one is signed in.
    Anonymous,
    /// A user is signed in.
    Authenticated(Identity),
}

impl SessionState {
    /// The active identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unknown | Self::Anonymous => None,
        }
    }
}

/// Email and password for a login attempt.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Establishes, restores and clears the authenticated identity.
pub struct SessionManager {
    backend: Arc<dyn RecipeBackend>,
    state: watch::Sender<SessionState>,
    // Serializes restore/login/logout so transitions never interleave
    transition: Mutex<()>,
}

impl SessionManager {
    #[must_use]
    pub fn new(backend: Arc<dyn RecipeBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            backend,
            state,
            transition: Mutex::new(()),
        }
    }

    /// Read-only view of the session state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Snapshot of the active identity.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// Restore an existing session from the backend.
    ///
    /// Call once at startup, after a successful connectivity probe. A failed
    /// lookup is treated like "no session": it is logged but never returned.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<Identity> {
        let _guard = self.transition.lock().await;

        let identity = match self.backend.current_session().await {
            Ok(Some(identity)) => {
                info!(user_id = %identity.id, role = %identity.role, "User session found");
                Some(identity)
            }
            Ok(None) => {
                info!("No active user session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed, continuing anonymously");
                None
            }
        };

        self.publish(identity.clone());
        identity
    }

    /// Sign in with email and password.
    ///
    /// Signing in again with the same credentials while authenticated yields
    /// the same identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email (no network call),
    /// `AuthError::InvalidCredentials` when the backend rejects the pair, and
    /// `AuthError::Backend` / `AuthError::SessionUnavailable` for other
    /// failures. A rejected login leaves the session state unchanged. If the
    /// backend accepts the login but the identity lookup then fails, the
    /// backend session is dropped and the state becomes `Anonymous`, so no
    /// earlier identity stays published over someone else's session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Identity, AuthError> {
        let _guard = self.transition.lock().await;

        let email = Email::parse(email)?;
        self.backend.login(&email, password).await?;
        let identity = match self.backend.current_session().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Err(self.abandon_login(AuthError::SessionUnavailable).await),
            Err(e) => return Err(self.abandon_login(AuthError::Backend(e)).await),
        };

        info!(user_id = %identity.id, role = %identity.role, "User logged in");
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign out.
    ///
    /// The local identity is cleared even when the remote call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = self.transition.lock().await;

        if let Err(e) = self.backend.logout().await {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }

        info!("User logged out");
        self.publish(None);
    }

    /// Undo an accepted login whose identity could not be resolved.
    async fn abandon_login(&self, err: AuthError) -> AuthError {
        warn!(error = %err, "Identity lookup after login failed, signing out");
        if let Err(e) = self.backend.logout().await {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        self.publish(None);
        err
    }

    fn publish(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => {
                set_sentry_user(&identity);
                self.state.send_replace(SessionState::Authenticated(identity));
            }
            None => {
                clear_sentry_user();
                self.state.send_replace(SessionState::Anonymous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = LoginCredentials {
            email: "chef@example.com".to_string(),
            password: SecretString::from("hunter2-but-longer"),
        };
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("chef@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_state_identity() {
        assert!(SessionState::Unknown.identity().is_none());
        assert!(SessionState::Anonymous.identity().is_none());
    }
}
