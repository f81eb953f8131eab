//! # Document Collection
//!
//! A named, thread-safe collection of JSON documents. Documents are keyed by
//! a `_id` string; one is assigned on insert when absent.

use std::sync::{Arc, RwLock};

use serde_json::Value;
use uuid::Uuid;

use super::query::DocumentQuery;
use super::{StoreError, StoreResult};

/// Field holding the document identifier
pub const ID_FIELD: &str = "_id";

/// A named collection of documents
pub struct Collection {
    name: String,
    docs: RwLock<Vec<Value>>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start a lazy query against this collection.
    ///
    /// Nothing is read until the returned handle is executed.
    pub fn find(self: &Arc<Self>) -> DocumentQuery {
        DocumentQuery::new(Arc::clone(self))
    }

    /// Insert a document, assigning a `_id` when absent.
    ///
    /// Returns the stored document including its id.
    pub fn insert(&self, mut doc: Value) -> StoreResult<Value> {
        ensure_id(&mut doc)?;
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        docs.push(doc.clone());
        Ok(doc)
    }

    /// Insert a document only if no stored document carries the same value
    /// for `field`. The check and the push happen under one write lock, so
    /// concurrent inserts cannot both pass the check.
    ///
    /// Returns `None` when a conflicting document exists.
    pub fn insert_unique(&self, field: &str, mut doc: Value) -> StoreResult<Option<Value>> {
        ensure_id(&mut doc)?;
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;

        if let Some(value) = doc.get(field) {
            if docs.iter().any(|d| d.get(field) == Some(value)) {
                return Ok(None);
            }
        }

        docs.push(doc.clone());
        Ok(Some(doc))
    }

    /// Get a document by id
    pub fn get(&self, id: &str) -> StoreResult<Option<Value>> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.iter().find(|d| doc_id(d) == Some(id)).cloned())
    }

    /// Replace a document by id; returns false when no document matched
    pub fn replace(&self, id: &str, doc: Value) -> StoreResult<bool> {
        if !doc.is_object() {
            return Err(StoreError::InvalidDocument);
        }

        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        match docs.iter_mut().find(|d| doc_id(d) == Some(id)) {
            Some(existing) => {
                *existing = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a document by id; returns false when no document matched
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = docs.len();
        docs.retain(|d| doc_id(d) != Some(id));
        Ok(docs.len() != before)
    }

    /// Number of documents in the collection
    pub fn count(&self) -> StoreResult<usize> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.len())
    }

    /// Snapshot of all documents, taken under the read lock
    pub(crate) fn snapshot(&self) -> StoreResult<Vec<Value>> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.clone())
    }
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get(ID_FIELD).and_then(|v| v.as_str())
}

fn ensure_id(doc: &mut Value) -> StoreResult<()> {
    let obj = doc.as_object_mut().ok_or(StoreError::InvalidDocument)?;
    if !obj.contains_key(ID_FIELD) {
        obj.insert(
            ID_FIELD.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_assigns_id() {
        let col = Collection::new("posts");
        let stored = col.insert(json!({"title": "Hello"})).unwrap();

        let id = stored["_id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(col.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_keeps_existing_id() {
        let col = Collection::new("posts");
        let stored = col.insert(json!({"_id": "abc", "title": "Hello"})).unwrap();
        assert_eq!(stored["_id"], "abc");
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let col = Collection::new("posts");
        let result = col.insert(json!([1, 2, 3]));
        assert!(matches!(result, Err(StoreError::InvalidDocument)));
    }

    #[test]
    fn test_insert_unique_rejects_duplicate_field_value() {
        let col = Collection::new("users");
        let first = col
            .insert_unique("email", json!({"email": "a@b.co"}))
            .unwrap();
        assert!(first.is_some());

        let second = col
            .insert_unique("email", json!({"email": "a@b.co"}))
            .unwrap();
        assert!(second.is_none());
        assert_eq!(col.count().unwrap(), 1);
    }

    #[test]
    fn test_get_replace_remove() {
        let col = Collection::new("posts");
        let stored = col.insert(json!({"title": "Original"})).unwrap();
        let id = stored["_id"].as_str().unwrap().to_string();

        assert_eq!(col.get(&id).unwrap().unwrap()["title"], "Original");

        let replaced = col
            .replace(&id, json!({"_id": id, "title": "Updated"}))
            .unwrap();
        assert!(replaced);
        assert_eq!(col.get(&id).unwrap().unwrap()["title"], "Updated");

        assert!(col.remove(&id).unwrap());
        assert!(col.get(&id).unwrap().is_none());
        assert!(!col.remove(&id).unwrap());
    }
}
