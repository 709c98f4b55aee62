//! Dashboard load error types.

use thiserror::Error;

use crate::backend::BackendError;

/// A dashboard query failed; the whole load is discarded.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to load recipe catalog: {0}")]
    Catalog(#[source] BackendError),

    #[error("failed to load authored recipes: {0}")]
    AuthoredRecipes(#[source] BackendError),

    #[error("failed to load orders: {0}")]
    Orders(#[source] BackendError),
}
