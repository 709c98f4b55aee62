//! Record queries against backend collections.
//!
//! A [`RecordQuery`] carries equality filters, relation includes, one sort key
//! and a page size. It is transport neutral; the HTTP backend renders it with
//! [`RecordQuery::to_query_pairs`].

use std::fmt;

use plate_palette_core::UserId;

/// Field names used in filters and sorts.
pub mod fields {
    pub const IS_PUBLISHED: &str = "isPublished";
    pub const CHEF_ID: &str = "chefId";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const CREATED_AT: &str = "createdAt";
}

/// Relation names that can be included in results.
pub mod relations {
    pub const CHEF: &str = "chef";
    pub const REVIEWS: &str = "reviews";
    pub const CATEGORIES: &str = "categories";
    pub const RECIPES: &str = "recipes";
}

/// Value compared for equality in a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<UserId> for FilterValue {
    fn from(id: UserId) -> Self {
        Self::Int(i64::from(id.as_i32()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A find query over one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    filters: Vec<(String, FilterValue)>,
    includes: Vec<String>,
    sort: Option<(String, SortDirection)>,
    per_page: Option<u32>,
}

impl RecordQuery {
    /// An unfiltered, unsorted query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`. A later filter on the same field replaces the earlier one.
    #[must_use]
    pub fn filter(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.filters.retain(|(f, _)| f != field);
        self.filters.push((field.to_owned(), value.into()));
        self
    }

    /// Include a relation in each returned record.
    #[must_use]
    pub fn include(mut self, relation: &str) -> Self {
        if !self.includes.iter().any(|r| r == relation) {
            self.includes.push(relation.to_owned());
        }
        self
    }

    /// Sort by `field`.
    #[must_use]
    pub fn sort_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some((field.to_owned(), direction));
        self
    }

    /// Limit the page size.
    #[must_use]
    pub const fn per_page(mut self, limit: u32) -> Self {
        self.per_page = Some(limit);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[(String, FilterValue)] {
        &self.filters
    }

    /// The value `field` is filtered on, if any.
    #[must_use]
    pub fn filter_value(&self, field: &str) -> Option<&FilterValue> {
        self.filters
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    #[must_use]
    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(f, d)| (f.as_str(), *d))
    }

    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.per_page
    }

    /// Render as URL query pairs: `{field}_eq`, `relations`, `orderBy`/`order`, `perPage`.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| (format!("{field}_eq"), value.to_string()))
            .collect();

        if !self.includes.is_empty() {
            pairs.push(("relations".to_string(), self.includes.join(",")));
        }

        if let Some((field, direction)) = &self.sort {
            pairs.push(("orderBy".to_string(), field.clone()));
            pairs.push(("order".to_string(), direction.as_param().to_string()));
        }

        if let Some(limit) = self.per_page {
            pairs.push(("perPage".to_string(), limit.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(RecordQuery::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_featured_style_query_pairs() {
        let query = RecordQuery::new()
            .filter(fields::IS_PUBLISHED, true)
            .include(relations::CHEF)
            .include(relations::REVIEWS)
            .sort_by(fields::CREATED_AT, SortDirection::Desc)
            .per_page(6);

        assert_eq!(
            query.to_query_pairs(),
            vec![
                pair("isPublished_eq", "true"),
                pair("relations", "chef,reviews"),
                pair("orderBy", "createdAt"),
                pair("order", "DESC"),
                pair("perPage", "6"),
            ]
        );
    }

    #[test]
    fn test_refiltering_replaces_value() {
        let query = RecordQuery::new()
            .filter(fields::CHEF_ID, UserId::new(1))
            .filter(fields::CHEF_ID, UserId::new(42));
        assert_eq!(query.filters().len(), 1);
        assert_eq!(query.filter_value(fields::CHEF_ID), Some(&FilterValue::Int(42)));
    }

    #[test]
    fn test_duplicate_include_ignored() {
        let query = RecordQuery::new()
            .include(relations::RECIPES)
            .include(relations::RECIPES);
        assert_eq!(query.includes(), ["recipes".to_string()]);
    }
}
