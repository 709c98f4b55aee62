//! Customer orders.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderId, Recipe, UserRef, date};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Delivered,
    Cancelled,
    /// Status value this client does not know about.
    #[serde(other)]
    Other,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other => "Unknown",
        };
        f.write_str(label)
    }
}

/// An order placed by a customer for one or more recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub customer: Option<UserRef>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default, deserialize_with = "date::date")]
    pub order_date: Option<NaiveDate>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Titles of the ordered recipes, comma separated.
    #[must_use]
    pub fn item_titles(&self) -> String {
        self.recipes
            .iter()
            .map(|r| r.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the order has been delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self.status, OrderStatus::Delivered)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_order_with_recipes() {
        let json = r#"{
            "id": 11,
            "orderDate": "2025-02-01",
            "totalAmount": 31.5,
            "status": "Delivered",
            "recipes": [
                {"id": 1, "title": "Ramen", "price": 18},
                {"id": 2, "title": "Gyoza", "price": 13.5}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.item_titles(), "Ramen, Gyoza");
        assert!(order.is_delivered());
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(order.total_amount, Decimal::new(315, 1));
    }

    #[test]
    fn test_unknown_status_and_missing_fields() {
        let json = r#"{"id": 12, "totalAmount": "9.99", "status": "Refunded"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Other);
        assert!(!order.is_delivered());
        assert!(order.order_date.is_none());
        assert_eq!(order.item_titles(), "");
    }
}
