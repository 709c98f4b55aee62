//! PlatePalette Core - Shared domain types.
//!
//! This crate provides the records the PlatePalette client exchanges with the
//! recipe backend:
//! - `client` - Session, capability and dashboard orchestration
//! - `cli` - Command-line front end for the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O and no HTTP
//! clients. The backend owns every record; values here are transient copies.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, roles, identities, recipes and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
