//! # User Repository
//!
//! CRUD over the `users` collection. Passwords are hashed with Argon2id
//! before storage; malformed ids surface as cast failures; the list path is
//! exposed as a raw document query for the generic query builder.

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{Collection, DocumentQuery};

use super::model::{CreateUser, UpdateUser, User};

/// Repository over the `users` collection
#[derive(Clone)]
pub struct UserRepository {
    collection: Arc<Collection>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository {
    pub fn new() -> Self {
        Self {
            collection: Arc::new(Collection::new("users")),
        }
    }

    /// Lazy query over all user documents, for the generic list path
    pub fn query(&self) -> DocumentQuery {
        self.collection.find()
    }

    /// Create a user; duplicate emails are rejected with a conflict.
    ///
    /// The uniqueness check and the insert run under one store lock, so
    /// concurrent creates with the same email cannot both land.
    pub fn create(&self, req: &CreateUser) -> AppResult<User> {
        req.validate()?;

        let user = User::new(
            req.name.clone(),
            req.email.clone(),
            hash_password(&req.password)?,
            req.role,
        );

        match self.collection.insert_unique("email", user.to_document()?)? {
            Some(_) => Ok(user),
            None => Err(AppError::DuplicateEmail),
        }
    }

    /// Fetch a user by id; a malformed id is a cast failure, not a miss
    pub fn find_by_id(&self, id: &str) -> AppResult<User> {
        parse_id(id)?;
        match self.collection.get(id)? {
            Some(doc) => User::from_document(&doc),
            None => Err(AppError::NotFound),
        }
    }

    /// Apply a partial update and refresh `updatedAt`
    pub fn update(&self, id: &str, req: &UpdateUser) -> AppResult<User> {
        req.validate()?;
        let mut user = self.find_by_id(id)?;

        if let Some(name) = &req.name {
            user.name = name.clone();
        }
        if let Some(password) = &req.password {
            user.password_hash = hash_password(password)?;
        }
        if let Some(role) = req.role {
            user.role = role;
        }
        user.updated_at = chrono::Utc::now();

        if !self.collection.replace(id, user.to_document()?)? {
            // Deleted between the lookup and the write
            return Err(AppError::NotFound);
        }
        Ok(user)
    }

    /// Delete a user by id
    pub fn delete(&self, id: &str) -> AppResult<()> {
        parse_id(id)?;
        if self.collection.remove(id)? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Strip the stored password hash from a queried document
    pub fn redact(mut doc: Value) -> Value {
        if let Some(obj) = doc.as_object_mut() {
            obj.remove("password");
        }
        doc
    }
}

fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::Cast {
        path: "_id".to_string(),
        value: id.to_string(),
    })
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal("password hashing failed".to_string()))
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("malformed password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
