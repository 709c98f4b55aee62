//! Application state shared by every front end.
//!
//! Wires the services around one injected [`RecipeBackend`] and runs the
//! startup sequence: probe, then (only when reachable) session restore.

use std::sync::Arc;

use plate_palette_core::Identity;

use crate::backend::{ManifestBackend, RecipeBackend};
use crate::config::{ClientConfig, ServiceSettings};
use crate::error::{AppError, Result};
use crate::services::capabilities::Capabilities;
use crate::services::dashboard::{DashboardController, DashboardOrchestrator};
use crate::services::feed::FeaturedFeed;
use crate::services::probe::ConnectivityProbe;
use crate::services::session::SessionManager;

/// Backend status shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Connected,
    Unreachable,
}

/// Outcome of [`AppState::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupStatus {
    pub api: ApiStatus,
    /// Restored identity; always `None` when the backend is unreachable.
    pub identity: Option<Identity>,
}

impl StartupStatus {
    /// # Errors
    ///
    /// Returns `AppError::Connectivity` when the probe failed.
    pub const fn require_connected(&self) -> Result<()> {
        match self.api {
            ApiStatus::Connected => Ok(()),
            ApiStatus::Unreachable => Err(AppError::Connectivity),
        }
    }
}

/// Shared application state.
///
/// Cheap to clone; all clones share the same services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    probe: ConnectivityProbe,
    session: SessionManager,
    dashboard: DashboardController,
    feed: FeaturedFeed,
}

impl AppState {
    /// Build the services around `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn RecipeBackend>, settings: ServiceSettings) -> Self {
        let session = SessionManager::new(Arc::clone(&backend));
        let dashboard = DashboardController::new(
            DashboardOrchestrator::new(Arc::clone(&backend)),
            session.subscribe(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                probe: ConnectivityProbe::new(Arc::clone(&backend), settings.probe_timeout),
                session,
                dashboard,
                feed: FeaturedFeed::new(backend, settings.featured_limit),
            }),
        }
    }

    /// Build state backed by the HTTP client described in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let backend = ManifestBackend::new(&config.backend)?;
        Ok(Self::new(Arc::new(backend), config.service_settings()))
    }

    #[must_use]
    pub fn probe(&self) -> &ConnectivityProbe {
        &self.inner.probe
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    #[must_use]
    pub fn dashboard(&self) -> &DashboardController {
        &self.inner.dashboard
    }

    #[must_use]
    pub fn feed(&self) -> &FeaturedFeed {
        &self.inner.feed
    }

    /// Capabilities of whoever is signed in right now.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_session(&self.inner.session.state())
    }

    /// Probe the backend and, only if it answers, restore the session.
    pub async fn initialize(&self) -> StartupStatus {
        tracing::info!("Starting backend connection test");
        if !self.inner.probe.check_backend().await.reachable {
            tracing::error!("Backend connection failed, skipping session restore");
            return StartupStatus {
                api: ApiStatus::Unreachable,
                identity: None,
            };
        }

        let identity = self.inner.session.restore().await;
        StartupStatus {
            api: ApiStatus::Connected,
            identity,
        }
    }
}
