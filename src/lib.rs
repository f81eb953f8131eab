//! stackpilot - product landing site and user API over an embedded document store

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod site;
pub mod store;
pub mod users;
