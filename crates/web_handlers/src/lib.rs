//! # Web Handlers
//!
//! This crate provides the HTTP handlers for the Creek River campground
//! API: campsite CRUD, user profile lookups, and the reservation
//! admission path.

/// Campsite CRUD handlers.
pub mod campsite_handlers;
pub use campsite_handlers::*;

/// API error type and its HTTP response mapping.
pub mod error;
pub use error::*;

/// User profile lookup handlers.
pub mod profile_handlers;
pub use profile_handlers::*;

/// Reservation listing, admission, and deletion handlers.
pub mod reservation_handlers;
pub use reservation_handlers::*;

/// Response DTO shapes.
pub mod types;
pub use types::*;
