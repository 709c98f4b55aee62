//! Public recipe feed shown before login.

use std::sync::Arc;

use plate_palette_core::Recipe;
use tracing::{error, instrument};

use crate::backend::{RecipeBackend, RecordQuery, SortDirection, fields, relations};

/// The "latest creations" list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedRecipes {
    pub recipes: Vec<Recipe>,
    /// Set when the query failed; `recipes` is then empty.
    pub load_failed: bool,
}

/// Newest published recipes with chef and reviews.
#[must_use]
pub fn featured_query(limit: u32) -> RecordQuery {
    RecordQuery::new()
        .filter(fields::IS_PUBLISHED, true)
        .include(relations::CHEF)
        .include(relations::REVIEWS)
        .sort_by(fields::CREATED_AT, SortDirection::Desc)
        .per_page(limit)
}

/// Loads the public feed. Independent of the session and the dashboard.
pub struct FeaturedFeed {
    backend: Arc<dyn RecipeBackend>,
    limit: u32,
}

impl FeaturedFeed {
    #[must_use]
    pub fn new(backend: Arc<dyn RecipeBackend>, limit: u32) -> Self {
        Self { backend, limit }
    }

    /// Fetch the newest published recipes.
    ///
    /// Never fails; a backend error yields an empty list flagged `load_failed`.
    #[instrument(skip(self), fields(limit = self.limit))]
    pub async fn load_featured_recipes(&self) -> FeaturedRecipes {
        match self.backend.find_recipes(&featured_query(self.limit)).await {
            Ok(mut recipes) => {
                // Guard against backends that ignore perPage
                recipes.truncate(self.limit as usize);
                FeaturedRecipes {
                    recipes,
                    load_failed: false,
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch featured recipes");
                FeaturedRecipes {
                    recipes: Vec::new(),
                    load_failed: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::FilterValue;

    use super::*;

    #[test]
    fn test_featured_query_shape() {
        let query = featured_query(6);
        assert_eq!(
            query.filter_value(fields::IS_PUBLISHED),
            Some(&FilterValue::Bool(true))
        );
        assert_eq!(query.includes(), ["chef", "reviews"]);
        assert_eq!(query.sort(), Some(("createdAt", SortDirection::Desc)));
        assert_eq!(query.page_size(), Some(6));
    }
}
