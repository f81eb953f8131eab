//! # HTTP Server Module
//!
//! Axum server combining the landing page, health check and the user CRUD
//! API. Route handlers run the request control flow: raw query params →
//! `QueryBuilder` chain → execute → respond; every failure surfaces through
//! the normalized error shape.

pub mod response;
pub mod server;
pub mod users_routes;

pub use server::{AppState, HttpServer};
