//! Recipe backend access.
//!
//! # Architecture
//!
//! - [`RecipeBackend`] is the seam every service talks through. It is injected
//!   as `Arc<dyn RecipeBackend>` at construction, so there is no global client
//!   and tests can substitute an in-memory double.
//! - [`ManifestBackend`] is the HTTP implementation for the hosted
//!   backend-as-a-service (REST collections plus bearer-token auth).
//! - The backend is the source of truth - NO local sync and no response cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use plate_palette_client::backend::{ManifestBackend, RecordQuery, fields, relations};
//!
//! let backend = ManifestBackend::new(&config.backend)?;
//! backend.login(&email, &password).await?;
//!
//! let drafts = backend
//!     .find_recipes(
//!         &RecordQuery::new()
//!             .filter(fields::IS_PUBLISHED, false)
//!             .include(relations::CHEF),
//!     )
//!     .await?;
//! ```

mod manifest;
pub mod query;

pub use manifest::ManifestBackend;
pub use query::{FilterValue, RecordQuery, SortDirection, fields, relations};

use async_trait::async_trait;
use plate_palette_core::{Email, Identity, Order, Recipe};
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur when talking to the recipe backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request did not complete within its timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend rejected the credentials or the session token.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Operations the client needs from the recipe backend.
///
/// Every method is a suspension point; none of them retry.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    /// Lightweight reachability check against the health surface.
    async fn health(&self) -> Result<(), BackendError>;

    /// Authenticate and keep the resulting session on this client.
    ///
    /// Rejected credentials must surface as [`BackendError::Unauthorized`].
    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), BackendError>;

    /// Invalidate the current session.
    async fn logout(&self) -> Result<(), BackendError>;

    /// The identity owning the current session, if any.
    async fn current_session(&self) -> Result<Option<Identity>, BackendError>;

    /// Query the recipe collection.
    async fn find_recipes(&self, query: &RecordQuery) -> Result<Vec<Recipe>, BackendError>;

    /// Query the order collection.
    async fn find_orders(&self, query: &RecordQuery) -> Result<Vec<Order>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
        assert_eq!(BackendError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(BackendError::Timeout.to_string(), "request timed out");
    }
}
