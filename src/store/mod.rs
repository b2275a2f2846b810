//! Persistence seam for listings, bookings, reviews and seed users.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};
use crate::listings::repo_types::{
    Booking, BookingWithParties, Listing, ListingChanges, NewBooking, NewListing, NewReview,
    Review,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or("unknown").to_string();
            if db.is_unique_violation() {
                return Self::Conflict(constraint);
            }
            if db.is_check_violation() {
                return Self::Validation(format!("check constraint {constraint} violated"));
            }
            if db.is_foreign_key_violation() {
                return Self::Validation(format!("referenced record missing ({constraint})"));
            }
        }
        if matches!(e, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }
        Self::Database(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row totals per record kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub users: i64,
    pub listings: i64,
    pub bookings: i64,
    pub reviews: i64,
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;

    async fn find_listing_by_title(&self, title: &str) -> StoreResult<Option<Listing>>;
    async fn get_listing(&self, id: Uuid) -> StoreResult<Option<Listing>>;
    async fn list_listings(&self) -> StoreResult<Vec<Listing>>;
    async fn create_listing(&self, new: NewListing) -> StoreResult<Listing>;
    /// Returns `None` when no listing has this id.
    async fn update_listing(&self, id: Uuid, changes: ListingChanges)
        -> StoreResult<Option<Listing>>;
    /// Removes the listing and, by cascade, its bookings and reviews.
    async fn delete_listing(&self, id: Uuid) -> StoreResult<bool>;

    async fn create_booking(&self, new: NewBooking) -> StoreResult<Booking>;
    async fn bookings_for_listing(&self, listing_id: Uuid)
        -> StoreResult<Vec<BookingWithParties>>;
    async fn count_bookings_for_listing(&self, listing_id: Uuid) -> StoreResult<i64>;

    async fn create_review(&self, new: NewReview) -> StoreResult<Review>;
    async fn reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<Vec<Review>>;
    async fn count_reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<i64>;

    async fn delete_all_reviews(&self) -> StoreResult<u64>;
    async fn delete_all_bookings(&self) -> StoreResult<u64>;
    async fn delete_all_listings(&self) -> StoreResult<u64>;

    async fn counts(&self) -> StoreResult<StoreCounts>;
}
