//! Core types for PlatePalette.
//!
//! This module provides type-safe wrappers for the marketplace domain.

mod date;
pub mod email;
pub mod id;
pub mod identity;
pub mod order;
pub mod recipe;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use identity::Identity;
pub use order::{Order, OrderStatus};
pub use recipe::{Category, Recipe, Review, UserRef};
pub use role::{Role, RoleParseError};
