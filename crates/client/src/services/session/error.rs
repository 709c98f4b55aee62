//! Authentication error types.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors that can occur during login.
///
/// Any of these leaves the session state unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format; rejected before contacting the backend.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] plate_palette_core::EmailError),

    /// The backend rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Login succeeded but the backend reported no session afterwards.
    #[error("session unavailable after login")]
    SessionUnavailable,

    /// Any other backend failure during login.
    #[error("backend error: {0}")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized => Self::InvalidCredentials,
            other => Self::Backend(other),
        }
    }
}
