//! Connectivity probe.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::backend::RecipeBackend;

/// Result of a connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    pub reachable: bool,
}

/// Checks that the backend answers before any session work is attempted.
pub struct ConnectivityProbe {
    backend: Arc<dyn RecipeBackend>,
    timeout: Duration,
}

impl ConnectivityProbe {
    #[must_use]
    pub fn new(backend: Arc<dyn RecipeBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Probe the backend health surface.
    ///
    /// Never fails: timeouts, transport errors and non-success statuses all
    /// report `reachable = false`.
    #[instrument(skip(self), fields(timeout = ?self.timeout))]
    pub async fn check_backend(&self) -> Connectivity {
        let reachable = match tokio::time::timeout(self.timeout, self.backend.health()).await {
            Ok(Ok(())) => {
                info!("Backend connection successful");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
            Err(_) => {
                warn!("Backend health check timed out");
                false
            }
        };
        Connectivity { reachable }
    }
}
