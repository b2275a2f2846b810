use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RentalStore, StoreCounts, StoreResult};
use crate::auth::repo_types::{NewUser, User};
use crate::listings::repo::{self, Table};
use crate::listings::repo_types::{
    Booking, BookingWithParties, Listing, ListingChanges, NewBooking, NewListing, NewReview,
    Review,
};

/// `RentalStore` over a Postgres pool. Every call is its own statement;
/// nothing here opens a transaction.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RentalStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&self.db, username).await?)
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        Ok(User::create(&self.db, &new).await?)
    }

    async fn find_listing_by_title(&self, title: &str) -> StoreResult<Option<Listing>> {
        Ok(repo::find_listing_by_title(&self.db, title).await?)
    }

    async fn get_listing(&self, id: Uuid) -> StoreResult<Option<Listing>> {
        Ok(repo::get_listing(&self.db, id).await?)
    }

    async fn list_listings(&self) -> StoreResult<Vec<Listing>> {
        Ok(repo::list_listings(&self.db).await?)
    }

    async fn create_listing(&self, new: NewListing) -> StoreResult<Listing> {
        let new = new.validated()?;
        Ok(repo::insert_listing(&self.db, &new).await?)
    }

    async fn update_listing(
        &self,
        id: Uuid,
        changes: ListingChanges,
    ) -> StoreResult<Option<Listing>> {
        let changes = changes.validated()?;
        Ok(repo::update_listing(&self.db, id, &changes).await?)
    }

    async fn delete_listing(&self, id: Uuid) -> StoreResult<bool> {
        Ok(repo::delete_listing(&self.db, id).await?)
    }

    async fn create_booking(&self, new: NewBooking) -> StoreResult<Booking> {
        Ok(repo::insert_booking(&self.db, &new).await?)
    }

    async fn bookings_for_listing(
        &self,
        listing_id: Uuid,
    ) -> StoreResult<Vec<BookingWithParties>> {
        Ok(repo::bookings_for_listing(&self.db, listing_id).await?)
    }

    async fn count_bookings_for_listing(&self, listing_id: Uuid) -> StoreResult<i64> {
        Ok(repo::count_bookings_for_listing(&self.db, listing_id).await?)
    }

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        let new = new.validated()?;
        Ok(repo::insert_review(&self.db, &new).await?)
    }

    async fn reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<Vec<Review>> {
        Ok(repo::reviews_for_listing(&self.db, listing_id).await?)
    }

    async fn count_reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<i64> {
        Ok(repo::count_reviews_for_listing(&self.db, listing_id).await?)
    }

    async fn delete_all_reviews(&self) -> StoreResult<u64> {
        Ok(repo::delete_all(&self.db, Table::Reviews).await?)
    }

    async fn delete_all_bookings(&self) -> StoreResult<u64> {
        Ok(repo::delete_all(&self.db, Table::Bookings).await?)
    }

    async fn delete_all_listings(&self) -> StoreResult<u64> {
        Ok(repo::delete_all(&self.db, Table::Listings).await?)
    }

    async fn counts(&self) -> StoreResult<StoreCounts> {
        Ok(StoreCounts {
            users: User::count(&self.db).await?,
            listings: repo::count_rows(&self.db, Table::Listings).await?,
            bookings: repo::count_rows(&self.db, Table::Bookings).await?,
            reviews: repo::count_rows(&self.db, Table::Reviews).await?,
        })
    }
}
