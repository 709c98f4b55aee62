//! Dashboard data orchestration.
//!
//! [`DashboardOrchestrator`] issues the per-role queries concurrently and joins
//! them; [`DashboardController`] runs it for the session's identity and drops
//! results that were superseded while in flight.

mod controller;
mod error;

pub use controller::{DashboardController, DashboardKey, DashboardState, RefreshOutcome};
pub use error::DataLoadError;

use std::sync::Arc;

use plate_palette_core::{Identity, Order, Recipe, UserId};
use tracing::{debug, instrument};

use super::capabilities::{Capabilities, TabId};
use crate::backend::{RecipeBackend, RecordQuery, fields, relations};

/// Everything the dashboard renders for one identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Full catalog, published and drafts, for the browse tab.
    pub recipes: Vec<Recipe>,
    /// Recipes authored by the identity (chef scope).
    pub my_recipes: Vec<Recipe>,
    /// Orders placed by the identity (customer scope).
    pub orders: Vec<Order>,
}

/// Content of one dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardPanel<'a> {
    Recipes {
        title: &'static str,
        recipes: &'a [Recipe],
    },
    Orders(&'a [Order]),
}

impl DashboardData {
    /// The panel shown for `tab`.
    #[must_use]
    pub fn panel(&self, tab: TabId) -> DashboardPanel<'_> {
        match tab {
            TabId::Browse => DashboardPanel::Recipes {
                title: "All Recipes",
                recipes: &self.recipes,
            },
            TabId::MyRecipes => DashboardPanel::Recipes {
                title: "My Creations",
                recipes: &self.my_recipes,
            },
            TabId::MyOrders => DashboardPanel::Orders(&self.orders),
        }
    }
}

/// Full catalog with chef, reviews and categories; no filter and no sort.
#[must_use]
pub fn catalog_query() -> RecordQuery {
    RecordQuery::new()
        .include(relations::CHEF)
        .include(relations::REVIEWS)
        .include(relations::CATEGORIES)
}

/// Recipes authored by `chef`.
#[must_use]
pub fn authored_recipes_query(chef: UserId) -> RecordQuery {
    RecordQuery::new().filter(fields::CHEF_ID, chef)
}

/// Orders placed by `customer`, with their recipes.
#[must_use]
pub fn own_orders_query(customer: UserId) -> RecordQuery {
    RecordQuery::new()
        .filter(fields::CUSTOMER_ID, customer)
        .include(relations::RECIPES)
}

/// Issues the dashboard queries for an identity.
#[derive(Clone)]
pub struct DashboardOrchestrator {
    backend: Arc<dyn RecipeBackend>,
}

impl DashboardOrchestrator {
    #[must_use]
    pub fn new(backend: Arc<dyn RecipeBackend>) -> Self {
        Self { backend }
    }

    /// Load the catalog plus the identity's own recipes and orders.
    ///
    /// The three queries are in flight together. Scopes the role does not have
    /// resolve to empty without a network call. The result is all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first `DataLoadError` if any query fails.
    #[instrument(skip(self, identity), fields(user_id = %identity.id, role = %identity.role))]
    pub async fn load_dashboard(
        &self,
        identity: &Identity,
    ) -> Result<DashboardData, DataLoadError> {
        let capabilities = Capabilities::for_role(identity.role);
        let catalog = catalog_query();
        let authored = authored_recipes_query(identity.id);
        let owned = own_orders_query(identity.id);

        let recipes_future = async {
            self.backend
                .find_recipes(&catalog)
                .await
                .map_err(DataLoadError::Catalog)
        };
        let my_recipes_future = async {
            if !capabilities.authored_recipes {
                return Ok(Vec::new());
            }
            self.backend
                .find_recipes(&authored)
                .await
                .map_err(DataLoadError::AuthoredRecipes)
        };
        let orders_future = async {
            if !capabilities.own_orders {
                return Ok(Vec::new());
            }
            self.backend
                .find_orders(&owned)
                .await
                .map_err(DataLoadError::Orders)
        };

        let (recipes, my_recipes, orders) =
            tokio::try_join!(recipes_future, my_recipes_future, orders_future)?;

        debug!(
            recipes = recipes.len(),
            my_recipes = my_recipes.len(),
            orders = orders.len(),
            "Dashboard data loaded"
        );

        Ok(DashboardData {
            recipes,
            my_recipes,
            orders,
        })
    }
}
