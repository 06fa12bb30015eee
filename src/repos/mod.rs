//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues one statement per
//! call. Lookups distinguish "no row" (`Ok(None)`) from "query failed"
//! (`Err`); list queries return an empty `Vec` when nothing matches.

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::{NewProperty, Property, PropertyRepo, PropertySearch, PropertyWithRating};
pub use reservations::{ReservationRepo, ReservationWithProperty};
pub use users::{NewUser, User, UserRepo};
