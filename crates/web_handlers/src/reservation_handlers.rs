use actix_web::{HttpResponse, web};
use chrono::Utc;
use sqlx::PgPool;

use postgres::store::{CampgroundStore, NewReservation, StoreError};
use reservation_engine::engine::{RejectReason, Verdict, admit};
use reservation_engine::types::ReservationRequest;

use crate::error::ApiError;
use crate::types::{CreatedReservationDto, ReservationDto, stay_fee};

/// Lists all reservations ordered by check-in date, with user profile and
/// campsite/type expanded.
pub async fn list_reservations(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let details = store.list_reservations().await?;
    let dtos: Vec<ReservationDto> = details.into_iter().map(ReservationDto::from).collect();

    Ok(HttpResponse::Ok().json(dtos))
}

/// Admits and persists a candidate reservation.
///
/// Resolves the campsite and user profile first (a dangling reference is
/// a 404, not a validation rejection), snapshots the campsite's existing
/// reservations, and runs the admission engine with today's date
/// injected. On admit the reservation is inserted; a concurrent insert
/// that slips past the pre-check is caught by the store's exclusion
/// constraint and reported as the same date conflict.
pub async fn create_reservation(
    pool: web::Data<PgPool>,
    request: web::Json<ReservationRequest>,
) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let detail = store
        .get_campsite(request.campsite_id)
        .await?
        .ok_or(ApiError::NotFound("Campsite"))?;
    store
        .get_user_profile(request.user_profile_id)
        .await?
        .ok_or(ApiError::NotFound("User profile"))?;

    let existing = store.reservations_for_campsite(request.campsite_id).await?;
    let today = Utc::now().date_naive();

    let verdict = admit(
        &request,
        &existing,
        detail.campsite_type.max_reservation_days,
        today,
    );
    let total_nights = match verdict {
        Verdict::Admit { total_nights } => total_nights,
        Verdict::Reject(reason) => {
            log::info!(
                "Rejected reservation for campsite {}: {}",
                request.campsite_id,
                reason
            );
            return Err(reason.into());
        }
    };

    // Admit implies both dates were present.
    let (Some(checkin_date), Some(checkout_date)) = (request.checkin_date, request.checkout_date)
    else {
        return Err(RejectReason::MissingDates.into());
    };

    let reservation = store
        .create_reservation(&NewReservation {
            campsite_id: request.campsite_id,
            user_profile_id: request.user_profile_id,
            checkin_date,
            checkout_date,
        })
        .await?;

    let response = CreatedReservationDto {
        id: reservation.id,
        campsite_id: reservation.campsite_id,
        user_profile_id: reservation.user_profile_id,
        checkin_date: reservation.checkin_date,
        checkout_date: reservation.checkout_date,
        total_nights,
        total_fee: stay_fee(detail.campsite_type.fee_per_night, total_nights),
    };

    Ok(HttpResponse::Created().json(response))
}

/// Deletes a reservation by id, removing it from future conflict checks.
pub async fn delete_reservation(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    match store.delete_reservation(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Reservation")),
        Err(err) => Err(err.into()),
    }
}
