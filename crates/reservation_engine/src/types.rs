use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Class of campsite (e.g. Tent, RV) defining the nightly fee and the
/// maximum stay length. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampsiteType {
    /// Unique identifier for the campsite type
    pub id: i32,
    /// Display name of the type
    pub name: String,
    /// Fee charged per night, fixed-point currency
    pub fee_per_night: Decimal,
    /// Maximum allowed reservation length in nights
    pub max_reservation_days: i32,
}

/// A bookable campsite. Belongs to exactly one [`CampsiteType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campsite {
    /// Unique identifier for the campsite
    pub id: i32,
    /// Identifier of the owning campsite type
    pub campsite_type_id: i32,
    /// Display name of the campsite
    pub nickname: String,
    /// Optional photo URL for display
    pub image_url: Option<String>,
}

/// A registered camper. Only involved in admission as a required
/// foreign reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the profile
    pub id: i32,
    /// First name of the camper
    pub first_name: String,
    /// Last name of the camper
    pub last_name: String,
    /// Email address of the camper
    pub email: String,
}

/// A persisted reservation. Immutable once admitted; removal is the only
/// mutation (delete-then-recreate, no update-in-place).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for the reservation
    pub id: i32,
    /// Identifier of the reserved campsite
    pub campsite_id: i32,
    /// Identifier of the reserving user profile
    pub user_profile_id: i32,
    /// First night of the stay (inclusive)
    pub checkin_date: NaiveDate,
    /// Morning of departure (exclusive)
    pub checkout_date: NaiveDate,
}

impl Reservation {
    /// Length of the stay in whole nights.
    pub fn total_nights(&self) -> i64 {
        (self.checkout_date - self.checkin_date).num_days()
    }

    /// The half-open `[checkin, checkout)` interval of this reservation.
    pub fn date_range(&self) -> DateRange {
        DateRange {
            checkin: self.checkin_date,
            checkout: self.checkout_date,
        }
    }
}

/// A candidate booking as submitted by a client. Dates arrive optional
/// because presence is one of the admission rules, not a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRequest {
    /// Identifier of the campsite to reserve
    pub campsite_id: i32,
    /// Identifier of the reserving user profile
    pub user_profile_id: i32,
    /// Requested first night of the stay
    pub checkin_date: Option<NaiveDate>,
    /// Requested morning of departure
    pub checkout_date: Option<NaiveDate>,
}

/// Half-open date interval `[checkin, checkout)` used for overlap testing.
/// A check-in on another stay's checkout day does not overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start of the interval (inclusive)
    pub checkin: NaiveDate,
    /// End of the interval (exclusive)
    pub checkout: NaiveDate,
}

impl DateRange {
    /// Whether two half-open intervals intersect.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.checkin < other.checkout && self.checkout > other.checkin
    }
}
