//! Marketplace roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role assigned to a backend user.
///
/// Determines which dashboard tabs are visible and which data scopes are
/// queried. Role strings the client does not recognise decode to
/// [`Role::Unknown`], which is granted nothing beyond browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Places orders.
    Customer,
    /// Publishes recipes.
    Chef,
    /// Combined chef and customer view.
    Admin,
    /// Unrecognised role value; least privileged.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Whether this role authors recipes (chef scope).
    #[must_use]
    pub const fn authors_recipes(self) -> bool {
        matches!(self, Self::Chef | Self::Admin)
    }

    /// Whether this role places orders (customer scope).
    #[must_use]
    pub const fn places_orders(self) -> bool {
        matches!(self, Self::Customer | Self::Admin)
    }

    /// The wire value of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Chef => "chef",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a role name that is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0} (expected customer, chef or admin)")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "chef" => Ok(Self::Chef),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes() {
        assert!(Role::Chef.authors_recipes());
        assert!(!Role::Chef.places_orders());
        assert!(Role::Customer.places_orders());
        assert!(!Role::Customer.authors_recipes());
        assert!(Role::Admin.authors_recipes() && Role::Admin.places_orders());
        assert!(!Role::Unknown.authors_recipes() && !Role::Unknown.places_orders());
    }

    #[test]
    fn test_unrecognised_role_decodes_to_unknown() {
        let role: Role = serde_json::from_str("\"sommelier\"").unwrap();
        assert_eq!(role, Role::Unknown);
        let role: Role = serde_json::from_str("\"chef\"").unwrap();
        assert_eq!(role, Role::Chef);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("unknown".parse::<Role>().is_err());
    }
}
