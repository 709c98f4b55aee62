//! Recipe records and their relations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryId, RecipeId, ReviewId, UserId, date};

/// Name shown when a recipe's chef relation was not loaded.
const ANONYMOUS_CHEF: &str = "Anonymous";

/// A recipe as stored by the backend.
///
/// Relations (`chef`, `reviews`, `categories`) are only populated when the
/// query asked for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub main_image: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub chef: Option<UserRef>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "date::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Mean review rating, or `None` when the recipe has no reviews.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f64 = self.reviews.iter().map(|r| r.rating).sum();
        #[allow(clippy::cast_precision_loss)] // Review counts stay far below 2^52
        let count = self.reviews.len() as f64;
        Some(total / count)
    }

    /// Rating formatted to one decimal place, or "No reviews".
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.average_rating()
            .map_or_else(|| "No reviews".to_string(), |avg| format!("{avg:.1}"))
    }

    /// The chef's display name, falling back to "Anonymous".
    #[must_use]
    pub fn chef_name(&self) -> &str {
        self.chef.as_ref().map_or(ANONYMOUS_CHEF, |c| c.name.as_str())
    }

    /// "Published" or "Draft".
    #[must_use]
    pub const fn publication_label(&self) -> &'static str {
        if self.is_published { "Published" } else { "Draft" }
    }
}

/// A related user record (a recipe's chef or an order's customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A customer review of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<ReviewId>,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A recipe category such as "Dessert" or "Vegan".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn recipe_with_ratings(ratings: &[f64]) -> Recipe {
        Recipe {
            id: RecipeId::new(1),
            title: "Shakshuka".to_string(),
            main_image: None,
            price: Decimal::new(1250, 2),
            difficulty: Some("Easy".to_string()),
            is_published: true,
            chef: None,
            reviews: ratings
                .iter()
                .map(|&rating| Review {
                    id: None,
                    rating,
                    comment: None,
                })
                .collect(),
            categories: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_average_rating() {
        let recipe = recipe_with_ratings(&[5.0, 4.0, 4.0]);
        assert_eq!(recipe.rating_label(), "4.3");
        assert!(recipe_with_ratings(&[]).average_rating().is_none());
        assert_eq!(recipe_with_ratings(&[]).rating_label(), "No reviews");
    }

    #[test]
    fn test_chef_name_fallback() {
        let mut recipe = recipe_with_ratings(&[]);
        assert_eq!(recipe.chef_name(), "Anonymous");
        recipe.chef = Some(UserRef {
            id: UserId::new(3),
            name: "Massimo".to_string(),
            avatar: None,
        });
        assert_eq!(recipe.chef_name(), "Massimo");
    }

    #[test]
    fn test_publication_label() {
        let mut recipe = recipe_with_ratings(&[]);
        assert_eq!(recipe.publication_label(), "Published");
        recipe.is_published = false;
        assert_eq!(recipe.publication_label(), "Draft");
    }

    #[test]
    fn test_decode_with_relations() {
        let json = r#"{
            "id": 7,
            "title": "Pad Thai",
            "mainImage": "https://cdn.example.com/pad-thai.jpg",
            "price": 14.5,
            "difficulty": "Medium",
            "isPublished": false,
            "chef": {"id": 42, "name": "Kris"},
            "reviews": [{"id": 1, "rating": 5}, {"id": 2, "rating": 3}],
            "categories": [{"id": 2, "name": "Noodles"}],
            "createdAt": "2025-01-02T10:00:00.000Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.price, Decimal::new(145, 1));
        assert_eq!(recipe.chef.as_ref().unwrap().id, UserId::new(42));
        assert_eq!(recipe.average_rating(), Some(4.0));
        assert_eq!(recipe.categories.len(), 1);
        assert!(recipe.created_at.is_some());
    }

    #[test]
    fn test_decode_without_relations() {
        let json = r#"{"id": 8, "title": "Toast", "price": "3.00"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.chef.is_none());
        assert!(recipe.reviews.is_empty());
        assert!(!recipe.is_published);
    }
}
