//! Role-capability resolution.
//!
//! Maps a [`Role`] to the dashboard tabs it may see and the data scopes the
//! dashboard queries for it. Everything here is pure; rendering is left to
//! the caller.

use std::fmt;
use std::str::FromStr;

use plate_palette_core::Role;
use thiserror::Error;

use super::session::SessionState;

/// Dashboard tab identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Browse,
    MyRecipes,
    MyOrders,
}

impl TabId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::MyRecipes => "my-recipes",
            Self::MyOrders => "my-orders",
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised tab id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tab: {0} (expected browse, my-recipes or my-orders)")]
pub struct TabParseError(pub String);

impl FromStr for TabId {
    type Err = TabParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browse" => Ok(Self::Browse),
            "my-recipes" => Ok(Self::MyRecipes),
            "my-orders" => Ok(Self::MyOrders),
            _ => Err(TabParseError(s.to_owned())),
        }
    }
}

/// A navigation entry on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub label: &'static str,
    /// Icon name; the presentation layer maps it to artwork.
    pub icon: &'static str,
    pub allowed_roles: &'static [Role],
}

impl Tab {
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// All tabs in display order.
const TABS: [Tab; 3] = [
    Tab {
        id: TabId::Browse,
        label: "Browse Recipes",
        icon: "book-open",
        allowed_roles: &[Role::Customer, Role::Chef, Role::Admin],
    },
    Tab {
        id: TabId::MyRecipes,
        label: "My Recipes",
        icon: "pencil-square",
        allowed_roles: &[Role::Chef, Role::Admin],
    },
    Tab {
        id: TabId::MyOrders,
        label: "My Orders",
        icon: "shopping-cart",
        allowed_roles: &[Role::Customer, Role::Admin],
    },
];

/// Tabs visible to `role`, in display order (browse, my-recipes, my-orders).
///
/// [`Role::Unknown`] sees nothing.
#[must_use]
pub fn resolve_tabs(role: Role) -> Vec<Tab> {
    TABS.iter()
        .filter(|tab| tab.is_visible_to(role))
        .copied()
        .collect()
}

/// What a role may see and which data scopes the dashboard loads for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub tabs: Vec<Tab>,
    /// Load the recipes this user authored.
    pub authored_recipes: bool,
    /// Load the orders this user placed.
    pub own_orders: bool,
}

impl Capabilities {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self {
            tabs: resolve_tabs(role),
            authored_recipes: role.authors_recipes(),
            own_orders: role.places_orders(),
        }
    }

    /// Capabilities of the session's identity; nothing when signed out.
    #[must_use]
    pub fn for_session(state: &SessionState) -> Self {
        state
            .identity()
            .map(|identity| Self::for_role(identity.role))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn can_view(&self, tab: TabId) -> bool {
        self.tabs.iter().any(|t| t.id == tab)
    }

    /// The requested tab when visible, otherwise the first visible tab.
    #[must_use]
    pub fn select_tab(&self, requested: Option<TabId>) -> Option<&Tab> {
        requested
            .and_then(|id| self.tabs.iter().find(|t| t.id == id))
            .or_else(|| self.tabs.first())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use plate_palette_core::{Identity, UserId};

    use super::*;

    fn ids(role: Role) -> Vec<TabId> {
        resolve_tabs(role).iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_tabs_per_role() {
        assert_eq!(ids(Role::Customer), [TabId::Browse, TabId::MyOrders]);
        assert_eq!(ids(Role::Chef), [TabId::Browse, TabId::MyRecipes]);
        assert_eq!(
            ids(Role::Admin),
            [TabId::Browse, TabId::MyRecipes, TabId::MyOrders]
        );
        assert!(ids(Role::Unknown).is_empty());
    }

    #[test]
    fn test_visibility_rule_holds_for_every_role() {
        for role in [Role::Customer, Role::Chef, Role::Admin] {
            let tabs = ids(role);
            assert_eq!(tabs.first(), Some(&TabId::Browse));
            assert_eq!(
                tabs.contains(&TabId::MyRecipes),
                matches!(role, Role::Chef | Role::Admin)
            );
            assert_eq!(
                tabs.contains(&TabId::MyOrders),
                matches!(role, Role::Customer | Role::Admin)
            );
            for tab in resolve_tabs(role) {
                assert!(tab.allowed_roles.contains(&role));
            }
        }
    }

    #[test]
    fn test_scopes_follow_role() {
        let chef = Capabilities::for_role(Role::Chef);
        assert!(chef.authored_recipes && !chef.own_orders);
        let customer = Capabilities::for_role(Role::Customer);
        assert!(!customer.authored_recipes && customer.own_orders);
        let admin = Capabilities::for_role(Role::Admin);
        assert!(admin.authored_recipes && admin.own_orders);
    }

    #[test]
    fn test_for_session() {
        assert_eq!(
            Capabilities::for_session(&SessionState::Anonymous),
            Capabilities::default()
        );
        let state = SessionState::Authenticated(Identity {
            id: UserId::new(1),
            name: "Ana".to_string(),
            email: None,
            role: Role::Customer,
            avatar: None,
        });
        assert!(Capabilities::for_session(&state).can_view(TabId::MyOrders));
    }

    #[test]
    fn test_select_tab_falls_back_to_browse() {
        let customer = Capabilities::for_role(Role::Customer);
        assert_eq!(
            customer.select_tab(Some(TabId::MyOrders)).unwrap().id,
            TabId::MyOrders
        );
        assert_eq!(
            customer.select_tab(Some(TabId::MyRecipes)).unwrap().id,
            TabId::Browse
        );
        assert_eq!(customer.select_tab(None).unwrap().label, "Browse Recipes");
        assert!(Capabilities::default().select_tab(None).is_none());
    }

    #[test]
    fn test_tab_id_round_trips_through_str() {
        for tab in TABS {
            assert_eq!(tab.id.as_str().parse::<TabId>().unwrap(), tab.id);
        }
        assert!("settings".parse::<TabId>().is_err());
    }
}
