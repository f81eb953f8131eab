//! # User Model
//!
//! User record plus the create/update payloads and their validation. Wire
//! names are camelCase; the password hash is stored in documents but never
//! serialized into responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, ErrorSource};

/// User role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2id password hash; stored in documents, never in responses
    #[serde(rename = "password", skip_serializing, default)]
    pub password_hash: String,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a fresh id and timestamps
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Serialize into a store document, including the password hash
    pub fn to_document(&self) -> Result<Value, AppError> {
        let mut doc = serde_json::to_value(self)
            .map_err(|e| AppError::Internal(format!("user serialization failed: {}", e)))?;
        if let Some(obj) = doc.as_object_mut() {
            obj.insert(
                "password".to_string(),
                Value::String(self.password_hash.clone()),
            );
        }
        Ok(doc)
    }

    /// Deserialize from a full store document
    pub fn from_document(doc: &Value) -> Result<Self, AppError> {
        serde_json::from_value(doc.clone())
            .map_err(|e| AppError::Internal(format!("malformed user document: {}", e)))
    }
}

/// Payload for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl CreateUser {
    /// Validate all fields, collecting every violation in declaration order
    pub fn validate(&self) -> Result<(), AppError> {
        let mut sources = Vec::new();

        check_name(&self.name, &mut sources);
        check_email(&self.email, &mut sources);
        check_password(&self.password, &mut sources);

        if sources.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(sources))
        }
    }
}

/// Payload for partially updating a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUser {
    /// Validate the fields that are present, same ordering rules as create
    pub fn validate(&self) -> Result<(), AppError> {
        let mut sources = Vec::new();

        if let Some(name) = &self.name {
            check_name(name, &mut sources);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut sources);
        }

        if sources.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(sources))
        }
    }
}

fn check_name(name: &str, sources: &mut Vec<ErrorSource>) {
    if name.trim().is_empty() {
        sources.push(ErrorSource::new("name", "name must not be empty"));
    } else if name.len() > 60 {
        sources.push(ErrorSource::new("name", "name must be at most 60 characters"));
    }
}

fn check_email(email: &str, sources: &mut Vec<ErrorSource>) {
    if !is_plausible_email(email) {
        sources.push(ErrorSource::new("email", "email is not a valid address"));
    }
}

fn check_password(password: &str, sources: &mut Vec<ErrorSource>) {
    if password.len() < 8 {
        sources.push(ErrorSource::new(
            "password",
            "password must be at least 8 characters",
        ));
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
