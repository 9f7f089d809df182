use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use postgres::store::{CampsiteDetail, ReservationDetail};
use reservation_engine::types::{Campsite, CampsiteType, Reservation, UserProfile};

/// Campsite type as served to clients.
#[derive(Debug, Serialize)]
pub struct CampsiteTypeDto {
    /// Unique identifier for the campsite type
    pub id: i32,
    /// Display name of the type
    pub name: String,
    /// Fee charged per night
    pub fee_per_night: Decimal,
    /// Maximum allowed reservation length in nights
    pub max_reservation_days: i32,
}

/// Campsite as served to clients. The listing omits the type expansion;
/// single-campsite lookups include it.
#[derive(Debug, Serialize)]
pub struct CampsiteDto {
    /// Unique identifier for the campsite
    pub id: i32,
    /// Display name of the campsite
    pub nickname: String,
    /// Optional photo URL
    pub image_url: Option<String>,
    /// Identifier of the owning campsite type
    pub campsite_type_id: i32,
    /// The owning type, expanded where the endpoint resolves it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campsite_type: Option<CampsiteTypeDto>,
}

/// User profile as served to clients.
#[derive(Debug, Serialize)]
pub struct UserProfileDto {
    /// Unique identifier for the profile
    pub id: i32,
    /// First name of the camper
    pub first_name: String,
    /// Last name of the camper
    pub last_name: String,
    /// Email address of the camper
    pub email: String,
}

/// Reservation as served by the listing endpoint, with its user profile
/// and campsite expanded and the derived stay length and fee attached.
#[derive(Debug, Serialize)]
pub struct ReservationDto {
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
    /// Length of the stay in whole nights
    pub total_nights: i64,
    /// Nightly fee times the stay length
    pub total_fee: Decimal,
    /// The reserving camper
    pub user_profile: UserProfileDto,
    /// The reserved campsite with its type
    pub campsite: CampsiteDto,
}

/// Response body for an admitted reservation.
#[derive(Debug, Serialize)]
pub struct CreatedReservationDto {
    /// Unique identifier for the new reservation
    pub id: i32,
    /// Identifier of the reserved campsite
    pub campsite_id: i32,
    /// Identifier of the reserving user profile
    pub user_profile_id: i32,
    /// First night of the stay (inclusive)
    pub checkin_date: NaiveDate,
    /// Morning of departure (exclusive)
    pub checkout_date: NaiveDate,
    /// Length of the admitted stay in whole nights
    pub total_nights: i64,
    /// Nightly fee times the stay length
    pub total_fee: Decimal,
}

/// Display fee for a stay: nightly rate times the number of nights.
pub fn stay_fee(fee_per_night: Decimal, total_nights: i64) -> Decimal {
    fee_per_night * Decimal::from(total_nights)
}

impl From<CampsiteType> for CampsiteTypeDto {
    fn from(campsite_type: CampsiteType) -> Self {
        CampsiteTypeDto {
            id: campsite_type.id,
            name: campsite_type.name,
            fee_per_night: campsite_type.fee_per_night,
            max_reservation_days: campsite_type.max_reservation_days,
        }
    }
}

impl From<Campsite> for CampsiteDto {
    fn from(campsite: Campsite) -> Self {
        CampsiteDto {
            id: campsite.id,
            nickname: campsite.nickname,
            image_url: campsite.image_url,
            campsite_type_id: campsite.campsite_type_id,
            campsite_type: None,
        }
    }
}

impl From<CampsiteDetail> for CampsiteDto {
    fn from(detail: CampsiteDetail) -> Self {
        let mut dto = CampsiteDto::from(detail.campsite);
        dto.campsite_type = Some(detail.campsite_type.into());
        dto
    }
}

impl From<UserProfile> for UserProfileDto {
    fn from(profile: UserProfile) -> Self {
        UserProfileDto {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
        }
    }
}

impl From<ReservationDetail> for ReservationDto {
    fn from(detail: ReservationDetail) -> Self {
        let total_nights = detail.reservation.total_nights();
        let total_fee = stay_fee(detail.campsite.campsite_type.fee_per_night, total_nights);
        let Reservation {
            id,
            campsite_id,
            user_profile_id,
            checkin_date,
            checkout_date,
        } = detail.reservation;

        ReservationDto {
            id,
            campsite_id,
            user_profile_id,
            checkin_date,
            checkout_date,
            total_nights,
            total_fee,
            user_profile: detail.user_profile.into(),
            campsite: detail.campsite.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn stay_fee_is_nightly_rate_times_nights() {
        let fee = stay_fee(Decimal::new(1599, 2), 4);
        assert_eq!(fee, Decimal::new(6396, 2));
    }

    #[test]
    fn reservation_dto_derives_nights_and_fee() {
        let detail = ReservationDetail {
            reservation: Reservation {
                id: 1,
                campsite_id: 1,
                user_profile_id: 1,
                checkin_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
                checkout_date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            },
            user_profile: UserProfile {
                id: 1,
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: "johndoe@example.com".to_string(),
            },
            campsite: CampsiteDetail {
                campsite: Campsite {
                    id: 1,
                    campsite_type_id: 1,
                    nickname: "Barred Owl".to_string(),
                    image_url: None,
                },
                campsite_type: CampsiteType {
                    id: 1,
                    name: "Tent".to_string(),
                    fee_per_night: Decimal::new(1599, 2),
                    max_reservation_days: 7,
                },
            },
        };

        let dto = ReservationDto::from(detail);
        assert_eq!(dto.total_nights, 5);
        assert_eq!(dto.total_fee, Decimal::new(7995, 2));
        assert!(dto.campsite.campsite_type.is_some());
    }
}
