//! # QueryBuilder
//!
//! Chains search, filter, sort, pagination and field selection onto a lazy
//! [`DocumentQuery`]. Each method consumes and returns the builder; the
//! refined query is handed back with [`QueryBuilder::into_query`] and
//! executed by the caller, never here.

use crate::store::{Condition, DocumentQuery, Projection, SortKey};

use super::params::{coerce_scalar, QueryParams};

/// Sort spec applied when the `sort` key is absent
pub const DEFAULT_SORT: &str = "-createdAt";

/// Projection spec applied when the `fields` key is absent
pub const DEFAULT_FIELDS: &str = "-__v";

/// Builds a refined document query from raw request parameters
pub struct QueryBuilder {
    query: DocumentQuery,
    params: QueryParams,
}

impl QueryBuilder {
    pub fn new(query: DocumentQuery, params: QueryParams) -> Self {
        Self { query, params }
    }

    /// Apply a case-insensitive OR search across the given fields.
    ///
    /// A missing or empty `searchTerm` leaves the query untouched.
    pub fn search(mut self, fields: &[&str]) -> Self {
        if let Some(term) = self.params.search_term.as_deref() {
            if !term.is_empty() {
                let branches = fields
                    .iter()
                    .map(|f| Condition::Matches {
                        field: (*f).to_string(),
                        pattern: term.to_string(),
                    })
                    .collect();
                self.query = self.query.filter(Condition::Or(branches));
            }
        }
        self
    }

    /// Apply every non-reserved parameter as an equality constraint.
    ///
    /// Scalar values are coerced (bool/null/number) before comparison.
    pub fn filter(mut self) -> Self {
        let mut query = self.query;
        for (field, value) in &self.params.extra {
            query = query.filter(Condition::eq(field.clone(), coerce_scalar(value)));
        }
        self.query = query;
        self
    }

    /// Apply the `sort` spec, defaulting to newest-first (`-createdAt`)
    pub fn sort(mut self) -> Self {
        let spec = self.params.sort.as_deref().unwrap_or(DEFAULT_SORT);
        let keys = SortKey::parse_list(spec);
        if !keys.is_empty() {
            self.query = self.query.sort_by(keys);
        }
        self
    }

    /// Apply skip/take from `page` and `limit` (defaults: page 1, limit 10).
    ///
    /// The skip is computed with saturating arithmetic; an absurdly large
    /// `page` yields an empty page instead of an overflow.
    pub fn paginate(mut self) -> Self {
        let page = self.params.page();
        let limit = self.params.limit();
        let skip = page.saturating_sub(1).saturating_mul(limit);
        self.query = self.query.skip(skip).limit(limit);
        self
    }

    /// Apply the `fields` projection, defaulting to `-__v`.
    ///
    /// The comma-separated param is converted to the store's space-separated
    /// projection spec.
    pub fn fields(mut self) -> Self {
        let spec = self
            .params
            .fields
            .as_deref()
            .unwrap_or(DEFAULT_FIELDS)
            .replace(',', " ");
        self.query = self.query.select(Projection::parse(&spec));
        self
    }

    /// Hand the refined, still-unexecuted query back to the caller
    pub fn into_query(self) -> DocumentQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::json;

    use crate::store::Collection;

    use super::*;

    fn params(entries: &[(&str, &str)]) -> QueryParams {
        let raw: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QueryParams::from_map(&raw)
    }

    fn empty_query() -> DocumentQuery {
        Arc::new(Collection::new("t")).find()
    }

    #[test]
    fn test_search_without_term_leaves_filters_unchanged() {
        let query = QueryBuilder::new(empty_query(), params(&[("role", "admin")]))
            .search(&["name", "email"])
            .into_query();
        assert!(query.conditions().is_empty());
    }

    #[test]
    fn test_search_with_empty_term_leaves_filters_unchanged() {
        let query = QueryBuilder::new(empty_query(), params(&[("searchTerm", "")]))
            .search(&["name"])
            .into_query();
        assert!(query.conditions().is_empty());
    }

    #[test]
    fn test_search_builds_or_across_fields() {
        let query = QueryBuilder::new(empty_query(), params(&[("searchTerm", "ali")]))
            .search(&["name", "email"])
            .into_query();

        assert_eq!(query.conditions().len(), 1);
        match &query.conditions()[0] {
            Condition::Or(branches) => assert_eq!(branches.len(), 2),
            other => panic!("expected Or condition, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_excludes_reserved_keys() {
        let query = QueryBuilder::new(
            empty_query(),
            params(&[
                ("searchTerm", "x"),
                ("sort", "name"),
                ("limit", "5"),
                ("page", "2"),
                ("fields", "name"),
                ("role", "admin"),
                ("active", "true"),
            ]),
        )
        .filter()
        .into_query();

        assert_eq!(query.conditions().len(), 2);
        assert!(query.conditions().contains(&Condition::eq("role", json!("admin"))));
        assert!(query.conditions().contains(&Condition::eq("active", json!(true))));
    }

    #[test]
    fn test_sort_default_is_created_at_descending() {
        let query = QueryBuilder::new(empty_query(), params(&[])).sort().into_query();
        assert_eq!(query.sort_keys().len(), 1);
        assert_eq!(query.sort_keys()[0].field, "createdAt");
        assert!(query.sort_keys()[0].descending);
    }

    #[test]
    fn test_sort_parses_comma_separated_spec() {
        let query = QueryBuilder::new(empty_query(), params(&[("sort", "name,-age")]))
            .sort()
            .into_query();
        assert_eq!(query.sort_keys().len(), 2);
        assert!(!query.sort_keys()[0].descending);
        assert!(query.sort_keys()[1].descending);
    }

    #[test]
    fn test_paginate_computes_skip_and_take() {
        let query = QueryBuilder::new(empty_query(), params(&[("page", "3"), ("limit", "5")]))
            .paginate()
            .into_query();
        assert_eq!(query.skip_count(), 10);
        assert_eq!(query.take_count(), Some(5));
    }

    #[test]
    fn test_paginate_saturates_on_huge_page() {
        let query = QueryBuilder::new(
            empty_query(),
            params(&[("page", "2305843009213693952"), ("limit", "10")]),
        )
        .paginate()
        .into_query();
        assert_eq!(query.skip_count(), usize::MAX);
        assert_eq!(query.take_count(), Some(10));
    }

    #[test]
    fn test_paginate_defaults() {
        let query = QueryBuilder::new(empty_query(), params(&[])).paginate().into_query();
        assert_eq!(query.skip_count(), 0);
        assert_eq!(query.take_count(), Some(10));
    }

    #[test]
    fn test_fields_converts_commas_to_projection_spec() {
        let query = QueryBuilder::new(empty_query(), params(&[("fields", "name,email")]))
            .fields()
            .into_query();
        assert_eq!(query.projection().as_spec(), "name email");
    }

    #[test]
    fn test_fields_default_excludes_version_key() {
        let query = QueryBuilder::new(empty_query(), params(&[])).fields().into_query();
        assert_eq!(query.projection().as_spec(), "-__v");
    }

    #[test]
    fn test_operations_do_not_disturb_each_other() {
        // fields() after sort() must not change the sort spec
        let query = QueryBuilder::new(empty_query(), params(&[("sort", "name")]))
            .sort()
            .fields()
            .into_query();
        assert_eq!(query.sort_keys().len(), 1);
        assert_eq!(query.sort_keys()[0].field, "name");
        assert_eq!(query.projection().as_spec(), "-__v");
    }
}
