//! PlatePalette client library.
//!
//! The session-and-view-orchestration layer of the recipe marketplace:
//! - establishes and restores the user session,
//! - derives visible tabs and data scopes from the user's role,
//! - fans out and joins the per-role dashboard queries.
//!
//! All persistence and authentication live in the remote recipe backend,
//! reached through the injected [`backend::RecipeBackend`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

pub use config::ClientConfig;
pub use error::AppError;
pub use state::{ApiStatus, AppState, StartupStatus};
