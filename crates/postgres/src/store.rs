use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{PgPool, Row};
use validator::Validate;

use reservation_engine::types::{Campsite, CampsiteType, DateRange, Reservation, UserProfile};

/// Errors surfaced by the campground store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The insert lost to a concurrent reservation for the same dates.
    /// Raised by the exclusion constraint on (campsite_id, date range);
    /// callers must report it exactly like a pre-check conflict.
    #[error("Reservation conflicts with an existing reservation")]
    RangeConflict,

    /// The referenced row does not exist
    #[error("Record not found")]
    NotFound,

    /// An insert or update named a related record that does not exist
    #[error("Invalid reference to a related record")]
    InvalidReference,

    /// An underlying database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Request structure for creating or updating a campsite
#[derive(Debug, Deserialize, Validate)]
pub struct CampsiteUpsert {
    /// Identifier of the owning campsite type
    pub campsite_type_id: i32,

    /// Display name of the campsite
    #[validate(length(min = 1, max = 255, message = "Nickname is required"))]
    pub nickname: String,

    /// Optional photo URL
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// A fully validated reservation ready for insertion. Only the admission
/// engine's accept path produces one.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Identifier of the reserved campsite
    pub campsite_id: i32,
    /// Identifier of the reserving user profile
    pub user_profile_id: i32,
    /// First night of the stay (inclusive)
    pub checkin_date: NaiveDate,
    /// Morning of departure (exclusive)
    pub checkout_date: NaiveDate,
}

/// A campsite joined with its resolved type.
#[derive(Debug, Clone)]
pub struct CampsiteDetail {
    /// The campsite row
    pub campsite: Campsite,
    /// The owning type, with fee and stay limit
    pub campsite_type: CampsiteType,
}

/// A reservation joined with its user profile and campsite/type, the shape
/// served by the reservation listing.
#[derive(Debug, Clone)]
pub struct ReservationDetail {
    /// The reservation row
    pub reservation: Reservation,
    /// The reserving camper
    pub user_profile: UserProfile,
    /// The reserved campsite with its type
    pub campsite: CampsiteDetail,
}

// SQLSTATE for exclusion_violation, raised by the gist constraint in
// schema.sql when two inserts race for overlapping dates.
const EXCLUSION_VIOLATION: &str = "23P01";
// SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn map_constraint_errors(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => return StoreError::RangeConflict,
            Some(FOREIGN_KEY_VIOLATION) => return StoreError::InvalidReference,
            _ => {}
        }
    }
    StoreError::Database(err)
}

/// A store for campsites, campsite types, user profiles, and reservations.
pub struct CampgroundStore {
    pool: PgPool,
}

impl CampgroundStore {
    /// Creates a new store over the provided connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all campsites without type expansion.
    pub async fn list_campsites(&self) -> Result<Vec<Campsite>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, campsite_type_id, nickname, image_url FROM campsites ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(campsite_from_row).collect())
    }

    /// Retrieves a campsite joined with its resolved type, or `None` when
    /// the id does not exist.
    pub async fn get_campsite(&self, id: i32) -> Result<Option<CampsiteDetail>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                c.id, c.campsite_type_id, c.nickname, c.image_url,
                t.id AS type_id, t.name AS type_name,
                t.fee_per_night, t.max_reservation_days
            FROM campsites c
            JOIN campsite_types t ON t.id = c.campsite_type_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| campsite_detail_from_row(&row)))
    }

    /// Inserts a new campsite and returns the created row.
    pub async fn create_campsite(&self, request: &CampsiteUpsert) -> Result<Campsite, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO campsites (campsite_type_id, nickname, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, campsite_type_id, nickname, image_url
            "#,
        )
        .bind(request.campsite_type_id)
        .bind(request.nickname.trim())
        .bind(&request.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_errors)?;

        Ok(campsite_from_row(&row))
    }

    /// Updates a campsite's display attributes and type reference.
    pub async fn update_campsite(
        &self,
        id: i32,
        request: &CampsiteUpsert,
    ) -> Result<Campsite, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE campsites
            SET campsite_type_id = $1,
                nickname = $2,
                image_url = $3
            WHERE id = $4
            RETURNING id, campsite_type_id, nickname, image_url
            "#,
        )
        .bind(request.campsite_type_id)
        .bind(request.nickname.trim())
        .bind(&request.image_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_errors)?;

        row.map(|row| campsite_from_row(&row))
            .ok_or(StoreError::NotFound)
    }

    /// Deletes a campsite by id. A missing id is reported, not fatal.
    pub async fn delete_campsite(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM campsites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Lists all reservations ordered by check-in date, each joined with
    /// its user profile and campsite/type.
    pub async fn list_reservations(&self) -> Result<Vec<ReservationDetail>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                r.id, r.campsite_id, r.user_profile_id,
                r.checkin_date, r.checkout_date,
                u.first_name, u.last_name, u.email,
                c.campsite_type_id, c.nickname, c.image_url,
                t.name AS type_name, t.fee_per_night, t.max_reservation_days
            FROM reservations r
            JOIN user_profiles u ON u.id = r.user_profile_id
            JOIN campsites c ON c.id = r.campsite_id
            JOIN campsite_types t ON t.id = c.campsite_type_id
            ORDER BY r.checkin_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reservation_detail_from_row).collect())
    }

    /// Snapshot of the date ranges currently held for one campsite, the
    /// engine's conflict-scan input. Ordered by check-in date.
    pub async fn reservations_for_campsite(
        &self,
        campsite_id: i32,
    ) -> Result<Vec<DateRange>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT checkin_date, checkout_date
            FROM reservations
            WHERE campsite_id = $1
            ORDER BY checkin_date
            "#,
        )
        .bind(campsite_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| DateRange {
                checkin: row.get("checkin_date"),
                checkout: row.get("checkout_date"),
            })
            .collect())
    }

    /// Inserts an admitted reservation. Loses cleanly to a concurrent
    /// overlapping insert: the exclusion constraint rejects the second
    /// writer and the violation surfaces as [`StoreError::RangeConflict`].
    pub async fn create_reservation(
        &self,
        new: &NewReservation,
    ) -> Result<Reservation, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (campsite_id, user_profile_id, checkin_date, checkout_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, campsite_id, user_profile_id, checkin_date, checkout_date
            "#,
        )
        .bind(new.campsite_id)
        .bind(new.user_profile_id)
        .bind(new.checkin_date)
        .bind(new.checkout_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_errors)?;

        Ok(reservation_from_row(&result))
    }

    /// Deletes a reservation by id, removing it from future conflict
    /// consideration. A missing id is reported, not fatal.
    pub async fn delete_reservation(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Lists all user profiles.
    pub async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        let rows =
            sqlx::query("SELECT id, first_name, last_name, email FROM user_profiles ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(user_profile_from_row).collect())
    }

    /// Retrieves a user profile by id, or `None` when it does not exist.
    pub async fn get_user_profile(&self, id: i32) -> Result<Option<UserProfile>, StoreError> {
        let row =
            sqlx::query("SELECT id, first_name, last_name, email FROM user_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|row| user_profile_from_row(&row)))
    }
}

fn campsite_from_row(row: &sqlx::postgres::PgRow) -> Campsite {
    Campsite {
        id: row.get("id"),
        campsite_type_id: row.get("campsite_type_id"),
        nickname: row.get("nickname"),
        image_url: row.get("image_url"),
    }
}

fn campsite_detail_from_row(row: &sqlx::postgres::PgRow) -> CampsiteDetail {
    CampsiteDetail {
        campsite: campsite_from_row(row),
        campsite_type: CampsiteType {
            id: row.get("type_id"),
            name: row.get("type_name"),
            fee_per_night: row.get("fee_per_night"),
            max_reservation_days: row.get("max_reservation_days"),
        },
    }
}

fn reservation_from_row(row: &sqlx::postgres::PgRow) -> Reservation {
    Reservation {
        id: row.get("id"),
        campsite_id: row.get("campsite_id"),
        user_profile_id: row.get("user_profile_id"),
        checkin_date: row.get("checkin_date"),
        checkout_date: row.get("checkout_date"),
    }
}

fn user_profile_from_row(row: &sqlx::postgres::PgRow) -> UserProfile {
    UserProfile {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
    }
}

fn reservation_detail_from_row(row: &sqlx::postgres::PgRow) -> ReservationDetail {
    ReservationDetail {
        reservation: reservation_from_row(row),
        user_profile: UserProfile {
            id: row.get("user_profile_id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
        },
        campsite: CampsiteDetail {
            campsite: Campsite {
                id: row.get("campsite_id"),
                campsite_type_id: row.get("campsite_type_id"),
                nickname: row.get("nickname"),
                image_url: row.get("image_url"),
            },
            campsite_type: CampsiteType {
                id: row.get("campsite_type_id"),
                name: row.get("type_name"),
                fee_per_night: row.get("fee_per_night"),
                max_reservation_days: row.get("max_reservation_days"),
            },
        },
    }
}
