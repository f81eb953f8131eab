//! # Generic Query Building
//!
//! Translates raw request query parameters into constraints on a lazy
//! [`DocumentQuery`](crate::store::DocumentQuery). Reserved keys drive
//! search, sort, pagination and field selection; every other key becomes an
//! equality filter. The builder never executes the query.

pub mod builder;
pub mod params;

pub use builder::QueryBuilder;
pub use params::{QueryParams, RESERVED_KEYS};
