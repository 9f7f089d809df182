use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use postgres::store::CampgroundStore;

use crate::error::ApiError;
use crate::types::UserProfileDto;

/// Lists all user profiles.
pub async fn list_user_profiles(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let profiles = store.list_user_profiles().await?;
    let dtos: Vec<UserProfileDto> = profiles.into_iter().map(UserProfileDto::from).collect();

    Ok(HttpResponse::Ok().json(dtos))
}

/// Retrieves a single user profile by id.
pub async fn get_user_profile(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let profile = store
        .get_user_profile(path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("User profile"))?;

    Ok(HttpResponse::Ok().json(UserProfileDto::from(profile)))
}
