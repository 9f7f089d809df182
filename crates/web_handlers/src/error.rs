use postgres::store::StoreError;
use reservation_engine::engine::RejectReason;

/// Custom error type for API request failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The admission engine refused the candidate reservation
    #[error("{0}")]
    Rejected(#[from] RejectReason),

    /// The requested or referenced record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request body failed structural validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A constraint violation under concurrent admission is the
            // same client-facing outcome as a pre-check conflict.
            StoreError::RangeConflict => ApiError::Rejected(RejectReason::DateConflict),
            StoreError::NotFound => ApiError::NotFound("Record"),
            StoreError::InvalidReference => {
                ApiError::Validation("Request references a record that does not exist".to_string())
            }
            StoreError::Database(err) => ApiError::Database(err),
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            ApiError::Rejected(RejectReason::DateConflict) => {
                HttpResponse::Conflict().json(serde_json::json!({
                    "error": RejectReason::DateConflict.code(),
                    "message": RejectReason::DateConflict.to_string()
                }))
            }
            ApiError::Rejected(reason) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": reason.code(),
                "message": reason.to_string()
            })),
            ApiError::NotFound(what) => HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": format!("{} not found", what)
            })),
            ApiError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            ApiError::Database(_) => {
                log::error!("Request failed: {}", self);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn conflict_rejections_map_to_409() {
        let err = ApiError::Rejected(RejectReason::DateConflict);
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_rejections_map_to_400() {
        for reason in [
            RejectReason::MissingDates,
            RejectReason::InvalidDateRange,
            RejectReason::SameDayCheckinNotAllowed,
            RejectReason::DurationExceeded,
        ] {
            let err = ApiError::Rejected(reason);
            assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_records_map_to_404() {
        let err = ApiError::NotFound("Campsite");
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn late_store_conflict_reports_like_a_precheck_conflict() {
        let late: ApiError = StoreError::RangeConflict.into();
        let precheck = ApiError::Rejected(RejectReason::DateConflict);
        assert_eq!(
            late.error_response().status(),
            precheck.error_response().status()
        );
        assert!(matches!(
            late,
            ApiError::Rejected(RejectReason::DateConflict)
        ));
    }
}
