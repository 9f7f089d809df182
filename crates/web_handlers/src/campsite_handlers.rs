use actix_web::{HttpResponse, web};
use sqlx::PgPool;
use validator::Validate;

use postgres::store::{CampgroundStore, CampsiteUpsert, StoreError};

use crate::error::ApiError;
use crate::types::CampsiteDto;

/// Lists all campsites without type expansion.
pub async fn list_campsites(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let campsites = store.list_campsites().await?;
    let dtos: Vec<CampsiteDto> = campsites.into_iter().map(CampsiteDto::from).collect();

    Ok(HttpResponse::Ok().json(dtos))
}

/// Retrieves a single campsite with its resolved type.
pub async fn get_campsite(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    let detail = store
        .get_campsite(path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Campsite"))?;

    Ok(HttpResponse::Ok().json(CampsiteDto::from(detail)))
}

/// Creates a campsite. Returns 201 with the created row.
pub async fn create_campsite(
    pool: web::Data<PgPool>,
    request: web::Json<CampsiteUpsert>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let store = CampgroundStore::new(pool.get_ref().clone());
    let campsite = store.create_campsite(&request).await?;

    Ok(HttpResponse::Created().json(CampsiteDto::from(campsite)))
}

/// Updates a campsite's display attributes and type reference.
pub async fn update_campsite(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    request: web::Json<CampsiteUpsert>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let store = CampgroundStore::new(pool.get_ref().clone());
    match store.update_campsite(path.into_inner(), &request).await {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Campsite")),
        Err(err) => Err(err.into()),
    }
}

/// Deletes a campsite by id.
pub async fn delete_campsite(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let store = CampgroundStore::new(pool.get_ref().clone());

    match store.delete_campsite(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(StoreError::NotFound) => Err(ApiError::NotFound("Campsite")),
        Err(err) => Err(err.into()),
    }
}
