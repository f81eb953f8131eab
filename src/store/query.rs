//! # Lazy Document Query
//!
//! The chainable query handle over a [`Collection`]. Each method narrows the
//! query and returns the handle for further chaining; nothing runs until
//! [`DocumentQuery::execute`], which consumes the handle so a query can only
//! be executed once.

use std::cmp::Ordering;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use super::collection::{Collection, ID_FIELD};
use super::StoreResult;

/// A filter condition, combined with AND at the query level
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact-match equality on a field
    Eq { field: String, value: Value },

    /// Case-insensitive substring match on a string field
    Matches { field: String, pattern: String },

    /// Logical OR of nested conditions
    Or(Vec<Condition>),
}

impl Condition {
    /// Equality shorthand
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Condition::Eq {
            field: field.into(),
            value,
        }
    }

    fn compile(&self) -> StoreResult<Compiled> {
        Ok(match self {
            Condition::Eq { field, value } => Compiled::Eq {
                field: field.clone(),
                value: value.clone(),
            },
            Condition::Matches { field, pattern } => Compiled::Matches {
                field: field.clone(),
                re: Regex::new(&format!("(?i){}", regex::escape(pattern)))?,
            },
            Condition::Or(branches) => Compiled::Or(
                branches
                    .iter()
                    .map(Condition::compile)
                    .collect::<StoreResult<Vec<_>>>()?,
            ),
        })
    }
}

/// Condition with search patterns compiled once per execution
enum Compiled {
    Eq { field: String, value: Value },
    Matches { field: String, re: Regex },
    Or(Vec<Compiled>),
}

impl Compiled {
    fn matches(&self, doc: &Value) -> bool {
        match self {
            Compiled::Eq { field, value } => match doc.get(field) {
                Some(v) => v == value,
                None => value.is_null(),
            },
            Compiled::Matches { field, re } => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| re.is_match(s)),
            Compiled::Or(branches) => branches.iter().any(|b| b.matches(doc)),
        }
    }
}

/// One key of an ordered sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Parse a single key; a leading `-` means descending
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() || spec == "-" {
            return None;
        }
        match spec.strip_prefix('-') {
            Some(field) => Some(Self {
                field: field.to_string(),
                descending: true,
            }),
            None => Some(Self {
                field: spec.to_string(),
                descending: false,
            }),
        }
    }

    /// Parse a comma-separated list of keys, skipping empty entries
    pub fn parse_list(spec: &str) -> Vec<Self> {
        spec.split(',').filter_map(Self::parse).collect()
    }
}

/// Field selection applied to executed documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Keep every field
    #[default]
    All,

    /// Keep only the listed fields (`_id` is always retained)
    Include(Vec<String>),

    /// Drop the listed fields
    Exclude(Vec<String>),
}

impl Projection {
    /// Parse a space-separated projection spec.
    ///
    /// When every term carries a leading `-` the projection is an exclusion
    /// (`"-__v"`); otherwise the `-`-prefixed terms are ignored and the rest
    /// form an inclusion (`"name email"`). An empty spec keeps everything.
    pub fn parse(spec: &str) -> Self {
        let terms: Vec<&str> = spec.split_whitespace().collect();
        if terms.is_empty() {
            return Projection::All;
        }

        if terms.iter().all(|t| t.starts_with('-')) {
            Projection::Exclude(
                terms
                    .iter()
                    .map(|t| t.trim_start_matches('-').to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            )
        } else {
            Projection::Include(
                terms
                    .iter()
                    .filter(|t| !t.starts_with('-'))
                    .map(|t| t.to_string())
                    .collect(),
            )
        }
    }

    /// Render the spec string back (space-separated)
    pub fn as_spec(&self) -> String {
        match self {
            Projection::All => String::new(),
            Projection::Include(fields) => fields.join(" "),
            Projection::Exclude(fields) => fields
                .iter()
                .map(|f| format!("-{}", f))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Apply the projection to one document
    pub fn apply(&self, doc: Value) -> Value {
        let Value::Object(obj) = doc else {
            return doc;
        };

        match self {
            Projection::All => Value::Object(obj),
            Projection::Include(fields) => Value::Object(
                obj.into_iter()
                    .filter(|(k, _)| k == ID_FIELD || fields.contains(k))
                    .collect(),
            ),
            Projection::Exclude(fields) => Value::Object(
                obj.into_iter().filter(|(k, _)| !fields.contains(k)).collect(),
            ),
        }
    }
}

/// A deferred, not-yet-executed query against a collection
pub struct DocumentQuery {
    collection: Arc<Collection>,
    conditions: Vec<Condition>,
    sort: Vec<SortKey>,
    skip: usize,
    limit: Option<usize>,
    projection: Projection,
}

impl DocumentQuery {
    pub(crate) fn new(collection: Arc<Collection>) -> Self {
        Self {
            collection,
            conditions: Vec::new(),
            sort: Vec::new(),
            skip: 0,
            limit: None,
            projection: Projection::All,
        }
    }

    /// Add a filter condition (ANDed with existing ones)
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replace the sort specification
    pub fn sort_by(mut self, keys: Vec<SortKey>) -> Self {
        self.sort = keys;
        self
    }

    /// Skip the first `n` matching documents
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Return at most `n` documents
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Replace the projection
    pub fn select(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Accumulated filter conditions
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Accumulated sort keys
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    /// Accumulated skip count
    pub fn skip_count(&self) -> usize {
        self.skip
    }

    /// Accumulated take count, when set
    pub fn take_count(&self) -> Option<usize> {
        self.limit
    }

    /// Accumulated projection
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Count documents matching the filters, ignoring pagination
    pub fn count(&self) -> StoreResult<usize> {
        let compiled = self.compile_conditions()?;
        let docs = self.collection.snapshot()?;
        Ok(docs
            .iter()
            .filter(|d| compiled.iter().all(|c| c.matches(d)))
            .count())
    }

    fn compile_conditions(&self) -> StoreResult<Vec<Compiled>> {
        self.conditions.iter().map(Condition::compile).collect()
    }

    /// Run the query: filter, sort, paginate, project.
    ///
    /// Consumes the handle so execution happens exactly once.
    pub fn execute(self) -> StoreResult<Vec<Value>> {
        let compiled = self.compile_conditions()?;

        let mut matched: Vec<Value> = self
            .collection
            .snapshot()?
            .into_iter()
            .filter(|d| compiled.iter().all(|c| c.matches(d)))
            .collect();

        if !self.sort.is_empty() {
            matched.sort_by(|a, b| compare_docs(a, b, &self.sort));
        }

        let paged = matched.into_iter().skip(self.skip);
        let paged: Vec<Value> = match self.limit {
            Some(n) => paged.take(n).collect(),
            None => paged.collect(),
        };

        Ok(paged
            .into_iter()
            .map(|d| self.projection.apply(d))
            .collect())
    }
}

fn compare_docs(a: &Value, b: &Value, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = compare_values(a.get(&key.field), b.get(&key.field));
        let ord = if key.descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Compare two optional JSON values; incomparable kinds sort equal
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
