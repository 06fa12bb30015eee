//! staybnb-db: PostgreSQL data access for the staybnb rental platform
//!
//! Thin repositories over a shared [`sqlx::PgPool`]: user lookup and
//! signup, a guest's reservation listing, and the filtered property
//! search. The search renders its statement through
//! [`query::PredicateList`], which assigns every positional placeholder
//! in a single pass.
//!
//! # Design Principles
//!
//! - Callers own the pool and hand it to repositories - no global state
//! - Listing queries JOIN their ratings in - no N+1 queries
//! - Rely on DB constraints, map conflicts - no check-then-insert
//! - "No such row" is `Ok(None)` or an empty `Vec`, never an `Err`

pub mod config;
pub mod error;
pub mod pool;
pub mod query;
pub mod repos;

pub use config::DbConfig;
pub use error::{DbError, Result};
pub use pool::{connect, create_pool, create_pool_with_options};
pub use query::{BindValue, Comparison, Limit, PredicateList, QueryPlan, DEFAULT_LIMIT};
pub use repos::{
    NewProperty, NewUser, Property, PropertyRepo, PropertySearch, PropertyWithRating,
    ReservationRepo, ReservationWithProperty, User, UserRepo,
};
