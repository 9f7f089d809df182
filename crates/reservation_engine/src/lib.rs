//! # Reservation Engine
//!
//! Pure admission logic for campground reservations. Given a candidate
//! booking, the existing reservations for the same campsite, and the
//! campsite type's stay limit, the engine decides whether the booking may
//! be admitted. No I/O, no clock reads: "today" is supplied by the caller.

/// Admission decision logic and verdict types.
pub mod engine;
pub use engine::*;

/// Domain types shared by the store and the API boundary.
pub mod types;
pub use types::*;
