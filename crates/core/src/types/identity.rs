//! The authenticated principal.

use serde::{Deserialize, Serialize};

use super::{Email, Role, UserId};

/// Fallback avatar service used when a user has not uploaded an avatar.
const AVATAR_FALLBACK_URL: &str = "https://ui-avatars.com/api/?name=";

/// The user a session belongs to, as returned by the backend's
/// "current session" lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, when the backend exposes it.
    #[serde(default)]
    pub email: Option<Email>,
    /// Marketplace role.
    pub role: Role,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Identity {
    /// Avatar URL, falling back to a generated initials avatar.
    #[must_use]
    pub fn avatar_url(&self) -> String {
        match self.avatar.as_deref() {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => format!("{AVATAR_FALLBACK_URL}{}", urlencoding::encode(&self.name)),
        }
    }
}
