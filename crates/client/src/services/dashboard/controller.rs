//! Dashboard refresh driver with stale-response discard.
//!
//! Each refresh is tagged with a monotonically increasing generation and the
//! `(user id, role)` pair it was started for. A result is published only when
//! its generation is still the newest and the session still holds the same
//! pair; anything else is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use plate_palette_core::{Identity, Role, UserId};
use tokio::sync::watch;
use tracing::{debug, error, instrument};

use super::{DashboardData, DashboardOrchestrator};
use crate::services::session::SessionState;

/// Identity fields a dashboard load depends on.
///
/// A change in either one is treated as a new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DashboardKey {
    pub user_id: UserId,
    pub role: Role,
}

impl DashboardKey {
    #[must_use]
    pub const fn of(identity: &Identity) -> Self {
        Self {
            user_id: identity.id,
            role: identity.role,
        }
    }
}

/// What the dashboard currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    /// Nobody is signed in.
    #[default]
    Idle,
    Loading,
    Ready(DashboardData),
    /// One dashboard-wide error; never mixed with partial data.
    Failed(String),
}

/// Whether a finished refresh was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Discarded,
}

/// Keeps [`DashboardState`] in step with the session's identity.
pub struct DashboardController {
    orchestrator: DashboardOrchestrator,
    session: watch::Receiver<SessionState>,
    generation: AtomicU64,
    state: watch::Sender<DashboardState>,
}

impl DashboardController {
    #[must_use]
    pub fn new(
        orchestrator: DashboardOrchestrator,
        session: watch::Receiver<SessionState>,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::Idle);
        Self {
            orchestrator,
            session,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// The orchestrator, for one-off loads that bypass the published state.
    #[must_use]
    pub const fn orchestrator(&self) -> &DashboardOrchestrator {
        &self.orchestrator
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Load the dashboard for `identity` and publish the result if it is
    /// still wanted when it arrives.
    #[instrument(skip(self, identity), fields(user_id = %identity.id, role = %identity.role))]
    pub async fn refresh(&self, identity: &Identity) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let key = DashboardKey::of(identity);
        self.state.send_replace(DashboardState::Loading);

        let result = self.orchestrator.load_dashboard(identity).await;

        if !self.is_current(generation, key) {
            debug!(generation, "Discarding superseded dashboard result");
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(data) => {
                self.state.send_replace(DashboardState::Ready(data));
            }
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                error!(error = %e, sentry_event_id = %event_id, "Failed to load dashboard data");
                self.state.send_replace(DashboardState::Failed(e.to_string()));
            }
        }
        RefreshOutcome::Applied
    }

    /// Refresh whenever the session's user id or role changes; reset to
    /// [`DashboardState::Idle`] on logout. Returns when the session manager is
    /// dropped.
    pub async fn follow_session(&self) {
        let mut session = self.session.clone();
        let mut last: Option<DashboardKey> = None;

        loop {
            let identity = session.borrow_and_update().identity().cloned();
            let key = identity.as_ref().map(DashboardKey::of);

            if key != last {
                last = key;
                match identity {
                    Some(identity) => {
                        self.refresh(&identity).await;
                    }
                    None => {
                        // Invalidate anything still in flight
                        self.generation.fetch_add(1, Ordering::SeqCst);
                        self.state.send_replace(DashboardState::Idle);
                    }
                }
            }

            if session.changed().await.is_err() {
                break;
            }
        }
    }

    fn is_current(&self, generation: u64, key: DashboardKey) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        self.session
            .borrow()
            .identity()
            .is_some_and(|active| DashboardKey::of(active) == key)
    }
}
