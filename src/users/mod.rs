//! # Users
//!
//! The user data model, payload validation and the repository that stores
//! users as documents in the embedded store. Listing goes through the
//! generic query path; everything else is keyed by id.

pub mod model;
pub mod repository;

pub use model::{CreateUser, Role, UpdateUser, User};
pub use repository::UserRepository;
