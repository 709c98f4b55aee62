//! Orchestration services for the client.
//!
//! # Services
//!
//! - `probe` - Backend reachability check gating all session work
//! - `session` - Restore, login and logout of the single active identity
//! - `capabilities` - Role to tab and data-scope resolution (pure)
//! - `dashboard` - Concurrent per-role dashboard queries with stale-result discard
//! - `feed` - Public "latest creations" feed shown before login
//!
//! Startup order: `probe` -> `session::restore` -> `capabilities` -> `dashboard`.

pub mod capabilities;
pub mod dashboard;
pub mod feed;
pub mod probe;
pub mod session;
