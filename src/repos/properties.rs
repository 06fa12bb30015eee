//! Property repository
//!
//! The search endpoint takes a sparse filter set and renders it into one
//! statement through [`PredicateList`], so every active filter lands in a
//! single AND-joined WHERE clause with correctly numbered placeholders.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::error::Result;
use crate::query::{Comparison, Limit, PredicateList, QueryPlan};

/// Base SELECT shared by every search: listing columns plus the average
/// review rating. The review join is inner, so never-reviewed listings do
/// not appear in search results.
const SEARCH_SELECT: &str = "\
SELECT properties.id, properties.owner_id, properties.title, properties.description,
  properties.thumbnail_photo_url, properties.cover_photo_url, properties.cost_per_night,
  properties.parking_spaces, properties.number_of_bathrooms, properties.number_of_bedrooms,
  properties.country, properties.street, properties.city, properties.province,
  properties.post_code, properties.active,
  AVG(property_reviews.rating)::float8 AS average_rating
FROM properties
JOIN property_reviews ON property_reviews.property_id = properties.id";

/// Grouping and ordering applied after the WHERE clause, cheapest first
const SEARCH_TAIL: &str = "GROUP BY properties.id\nORDER BY properties.cost_per_night";

/// Sparse filter set for the property search.
///
/// Every field is optional and independent; `Some` always contributes a
/// filter. Arrives straight from the search form's query parameters.
/// Prices are in cents, matching the `cost_per_night` column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearch {
    pub owner_id: Option<i32>,
    pub city: Option<String>,
    pub minimum_price_per_night: Option<i32>,
    pub maximum_price_per_night: Option<i32>,
    pub minimum_rating: Option<i16>,
}

/// Property record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: i32,
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
}

/// Property with its average review rating, for search results
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyWithRating {
    pub id: i32,
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

/// Insert payload for a new listing
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// Render the search statement from the sparse filter set.
///
/// Filters apply in a fixed order (owner, city, price band, rating floor)
/// so identical inputs always render identical SQL. City matches any
/// substring, case sensitive; the price bounds are strict; the rating
/// floor is inclusive.
fn search_plan(search: &PropertySearch, limit: Limit) -> QueryPlan {
    let mut filters = PredicateList::new();

    if let Some(owner_id) = search.owner_id {
        filters.push("properties.owner_id", Comparison::Eq, owner_id);
    }
    if let Some(city) = &search.city {
        filters.push("properties.city", Comparison::Like, format!("%{}%", city));
    }
    if let Some(min_price) = search.minimum_price_per_night {
        filters.push("properties.cost_per_night", Comparison::Gt, min_price);
    }
    if let Some(max_price) = search.maximum_price_per_night {
        filters.push("properties.cost_per_night", Comparison::Lt, max_price);
    }
    if let Some(min_rating) = search.minimum_rating {
        filters.push("property_reviews.rating", Comparison::Gte, min_rating);
    }

    filters.into_plan(SEARCH_SELECT, SEARCH_TAIL, limit)
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search listings matching the given filters, cheapest first.
    ///
    /// An empty filter set lists everything up to the limit. No matches is
    /// `Ok` with an empty `Vec`.
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyWithRating>> {
        let plan = search_plan(search, limit);
        debug!(params = plan.params.len(), sql = %plan.sql, "searching properties");
        plan.fetch_all(self.pool).await
    }

    /// Insert a listing, returning the stored row with its generated id.
    pub async fn create(&self, new: &NewProperty) -> Result<Property> {
        let property: Property = sqlx::query_as(
            r#"
            INSERT INTO properties (owner_id, title, description, thumbnail_photo_url,
                                    cover_photo_url, cost_per_night, street, city, province,
                                    post_code, country, parking_spaces, number_of_bathrooms,
                                    number_of_bedrooms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                      cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                      country, street, city, province, post_code, active
            "#,
        )
        .bind(new.owner_id)
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(&new.thumbnail_photo_url)
        .bind(&new.cover_photo_url)
        .bind(new.cost_per_night)
        .bind(&new.street)
        .bind(&new.city)
        .bind(&new.province)
        .bind(&new.post_code)
        .bind(&new.country)
        .bind(new.parking_spaces)
        .bind(new.number_of_bathrooms)
        .bind(new.number_of_bedrooms)
        .fetch_one(self.pool)
        .await?;

        Ok(property)
    }
}
