//! Reservation repository
//!
//! Backs the guest's "my reservations" page: each row carries the stay's
//! dates plus the booked property and its average review rating, fetched
//! in a single query (no N+1).

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::query::Limit;

/// Reservation joined with its property and average rating
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReservationWithProperty {
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i32,
    pub guest_id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
    pub average_rating: f64,
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's reservations, earliest start date first.
    ///
    /// The review join is inner, so a reservation for a never-reviewed
    /// property does not appear. A guest with no reservations gets an
    /// empty `Vec`, not an error.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<ReservationWithProperty>> {
        let reservations: Vec<ReservationWithProperty> = sqlx::query_as(
            r#"
            SELECT reservations.id, reservations.start_date, reservations.end_date,
                   reservations.property_id, reservations.guest_id,
                   properties.owner_id, properties.title, properties.description,
                   properties.thumbnail_photo_url, properties.cover_photo_url,
                   properties.cost_per_night, properties.parking_spaces,
                   properties.number_of_bathrooms, properties.number_of_bedrooms,
                   properties.country, properties.street, properties.city,
                   properties.province, properties.post_code, properties.active,
                   AVG(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.get())
        .fetch_all(self.pool)
        .await?;

        Ok(reservations)
    }
}
