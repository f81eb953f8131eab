//! # Query Parameters
//!
//! Typed view over the raw query-string mapping. Reserved keys are lifted
//! into dedicated fields at construction; everything else lands in an
//! explicit extras bag used only for equality filtering, so a reserved key
//! can never leak into the filter set.

use std::collections::HashMap;

use serde_json::Value;

/// Keys with special meaning, always excluded from equality filtering
pub const RESERVED_KEYS: [&str; 5] = ["searchTerm", "sort", "limit", "page", "fields"];

/// Default page when `page` is absent or non-numeric
pub const DEFAULT_PAGE: usize = 1;

/// Default limit when `limit` is absent or non-numeric
pub const DEFAULT_LIMIT: usize = 10;

/// Parsed query parameters
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Free-text search term (`searchTerm`)
    pub search_term: Option<String>,

    /// Raw sort spec (`sort`, comma-separated)
    pub sort: Option<String>,

    /// Raw limit value; numeric interpretation happens at paginate time
    pub limit: Option<String>,

    /// Raw page value; numeric interpretation happens at paginate time
    pub page: Option<String>,

    /// Raw field-selection spec (`fields`, comma-separated)
    pub fields: Option<String>,

    /// Non-reserved keys, applied as equality filters (sorted by key)
    pub extra: Vec<(String, String)>,
}

impl QueryParams {
    /// Build from the raw query-string mapping.
    ///
    /// Extras are sorted by key so filter application is deterministic
    /// regardless of map iteration order.
    pub fn from_map(raw: &HashMap<String, String>) -> Self {
        let mut params = QueryParams::default();

        for (key, value) in raw {
            match key.as_str() {
                "searchTerm" => params.search_term = Some(value.clone()),
                "sort" => params.sort = Some(value.clone()),
                "limit" => params.limit = Some(value.clone()),
                "page" => params.page = Some(value.clone()),
                "fields" => params.fields = Some(value.clone()),
                _ => params.extra.push((key.clone(), value.clone())),
            }
        }

        params.extra.sort_by(|a, b| a.0.cmp(&b.0));
        params
    }

    /// Effective page number (>= 1)
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(DEFAULT_PAGE)
    }

    /// Effective page size (>= 1)
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Coerce a raw filter value into a typed JSON value.
///
/// Booleans, null and numbers are recognized; everything else stays a string.
pub(crate) fn coerce_scalar(value: &str) -> Value {
    match value {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    Value::String(value.to_string())
}
