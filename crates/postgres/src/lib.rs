//! # Postgres
//!
//! This crate provides the Creek River campground API's PostgreSQL access
//! layer: connection pooling and the reservation/campsite store.

/// Connection pool helpers.
pub mod database;

/// CRUD queries and the conflict-defended reservation insert.
pub mod store;
