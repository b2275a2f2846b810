//! In-process `RentalStore` that mirrors the schema's constraints: unique
//! usernames and titles, foreign keys, cascades and the rating check.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{RentalStore, StoreCounts, StoreError, StoreResult};
use crate::auth::repo_types::{NewUser, User};
use crate::listings::repo_types::{
    Booking, BookingWithParties, Listing, ListingChanges, NewBooking, NewListing, NewReview,
    Review,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    listings: Vec<Listing>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a user and, by cascade, their bookings.
    pub async fn delete_user(&self, id: Uuid) -> bool {
        let mut t = self.tables.lock().await;
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        t.bookings.retain(|b| b.user_id != id);
        t.users.len() != before
    }

    pub async fn users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.tables.lock().await.bookings.clone()
    }

    pub async fn reviews(&self) -> Vec<Review> {
        self.tables.lock().await.reviews.clone()
    }
}

fn missing_listing() -> StoreError {
    StoreError::validation("referenced record missing (listing)")
}

#[async_trait]
impl RentalStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.username == new.username) {
            return Err(StoreError::Conflict("users_username_key".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_listing_by_title(&self, title: &str) -> StoreResult<Option<Listing>> {
        let t = self.tables.lock().await;
        Ok(t.listings.iter().find(|l| l.title == title).cloned())
    }

    async fn get_listing(&self, id: Uuid) -> StoreResult<Option<Listing>> {
        let t = self.tables.lock().await;
        Ok(t.listings.iter().find(|l| l.id == id).cloned())
    }

    async fn list_listings(&self) -> StoreResult<Vec<Listing>> {
        Ok(self.tables.lock().await.listings.clone())
    }

    async fn create_listing(&self, new: NewListing) -> StoreResult<Listing> {
        let new = new.validated()?;
        let mut t = self.tables.lock().await;
        if t.listings.iter().any(|l| l.title == new.title) {
            return Err(StoreError::Conflict("listings_title_key".into()));
        }
        let now = OffsetDateTime::now_utc();
        let listing = Listing {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            price_per_night: new.price_per_night,
            created_at: now,
            updated_at: now,
        };
        t.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(
        &self,
        id: Uuid,
        changes: ListingChanges,
    ) -> StoreResult<Option<Listing>> {
        let changes = changes.validated()?;
        let mut t = self.tables.lock().await;
        if let Some(title) = &changes.title {
            if t.listings.iter().any(|l| l.id != id && &l.title == title) {
                return Err(StoreError::Conflict("listings_title_key".into()));
            }
        }
        let Some(listing) = t.listings.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            listing.title = title;
        }
        if let Some(description) = changes.description {
            listing.description = description;
        }
        if let Some(price) = changes.price_per_night {
            listing.price_per_night = price;
        }
        listing.updated_at = OffsetDateTime::now_utc();
        Ok(Some(listing.clone()))
    }

    async fn delete_listing(&self, id: Uuid) -> StoreResult<bool> {
        let mut t = self.tables.lock().await;
        let before = t.listings.len();
        t.listings.retain(|l| l.id != id);
        if t.listings.len() == before {
            return Ok(false);
        }
        t.bookings.retain(|b| b.listing_id != id);
        t.reviews.retain(|r| r.listing_id != id);
        Ok(true)
    }

    async fn create_booking(&self, new: NewBooking) -> StoreResult<Booking> {
        let mut t = self.tables.lock().await;
        if !t.listings.iter().any(|l| l.id == new.listing_id) {
            return Err(missing_listing());
        }
        if !t.users.iter().any(|u| u.id == new.user_id) {
            return Err(StoreError::validation("referenced record missing (user)"));
        }
        let booking = Booking {
            booking_id: Uuid::new_v4(),
            listing_id: new.listing_id,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
            total_price: new.total_price,
            status: new.status,
            created_at: OffsetDateTime::now_utc(),
        };
        t.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn bookings_for_listing(
        &self,
        listing_id: Uuid,
    ) -> StoreResult<Vec<BookingWithParties>> {
        let t = self.tables.lock().await;
        let mut rows: Vec<BookingWithParties> = t
            .bookings
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .filter_map(|b| {
                let listing = t.listings.iter().find(|l| l.id == b.listing_id)?;
                let user = t.users.iter().find(|u| u.id == b.user_id)?;
                Some(BookingWithParties {
                    booking: b.clone(),
                    listing_title: listing.title.clone(),
                    username: user.username.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|r| r.booking.start_date);
        Ok(rows)
    }

    async fn count_bookings_for_listing(&self, listing_id: Uuid) -> StoreResult<i64> {
        let t = self.tables.lock().await;
        Ok(t.bookings.iter().filter(|b| b.listing_id == listing_id).count() as i64)
    }

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        let new = new.validated()?;
        let mut t = self.tables.lock().await;
        if !t.listings.iter().any(|l| l.id == new.listing_id) {
            return Err(missing_listing());
        }
        let review = Review {
            review_id: Uuid::new_v4(),
            listing_id: new.listing_id,
            rating: new.rating,
            comment: new.comment,
            created_at: OffsetDateTime::now_utc(),
        };
        t.reviews.push(review.clone());
        Ok(review)
    }

    async fn reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<Vec<Review>> {
        let t = self.tables.lock().await;
        Ok(t.reviews
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn count_reviews_for_listing(&self, listing_id: Uuid) -> StoreResult<i64> {
        let t = self.tables.lock().await;
        Ok(t.reviews.iter().filter(|r| r.listing_id == listing_id).count() as i64)
    }

    async fn delete_all_reviews(&self) -> StoreResult<u64> {
        let mut t = self.tables.lock().await;
        let n = t.reviews.len() as u64;
        t.reviews.clear();
        Ok(n)
    }

    async fn delete_all_bookings(&self) -> StoreResult<u64> {
        let mut t = self.tables.lock().await;
        let n = t.bookings.len() as u64;
        t.bookings.clear();
        Ok(n)
    }

    async fn delete_all_listings(&self) -> StoreResult<u64> {
        let mut t = self.tables.lock().await;
        let n = t.listings.len() as u64;
        t.listings.clear();
        t.bookings.clear();
        t.reviews.clear();
        Ok(n)
    }

    async fn counts(&self) -> StoreResult<StoreCounts> {
        let t = self.tables.lock().await;
        Ok(StoreCounts {
            users: t.users.len() as i64,
            listings: t.listings.len() as i64,
            bookings: t.bookings.len() as i64,
            reviews: t.reviews.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::repo_types::BookingStatus;
    use rust_decimal::Decimal;
    use time::macros::date;

    async fn listing(store: &MemoryStore, title: &str) -> Listing {
        store
            .create_listing(NewListing {
                title: title.into(),
                description: "desc".into(),
                price_per_night: Decimal::new(10000, 2),
            })
            .await
            .unwrap()
    }

    async fn user(store: &MemoryStore, username: &str) -> User {
        store
            .create_user(NewUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: "hash".into(),
            })
            .await
            .unwrap()
    }

    fn booking_for(listing: &Listing, user: &User) -> NewBooking {
        NewBooking {
            listing_id: listing.id,
            user_id: user.id,
            start_date: date!(2024 - 05 - 01),
            end_date: date!(2024 - 05 - 03),
            total_price: Decimal::new(20000, 2),
            status: BookingStatus::Pending,
        }
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let store = MemoryStore::new();
        listing(&store, "Loft").await;
        let err = store
            .create_listing(NewListing {
                title: "Loft".into(),
                description: "again".into(),
                price_per_night: Decimal::ONE,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn deleting_listing_cascades() {
        let store = MemoryStore::new();
        let keep = listing(&store, "Keep").await;
        let gone = listing(&store, "Gone").await;
        let u = user(&store, "ann").await;
        store.create_booking(booking_for(&keep, &u)).await.unwrap();
        store.create_booking(booking_for(&gone, &u)).await.unwrap();
        store
            .create_review(NewReview { listing_id: gone.id, rating: 3, comment: "ok".into() })
            .await
            .unwrap();

        assert!(store.delete_listing(gone.id).await.unwrap());
        assert!(!store.delete_listing(gone.id).await.unwrap());

        let counts = store.counts().await.unwrap();
        assert_eq!(counts.listings, 1);
        assert_eq!(counts.bookings, 1);
        assert_eq!(counts.reviews, 0);
        assert_eq!(counts.users, 1);
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_bookings() {
        let store = MemoryStore::new();
        let l = listing(&store, "Villa").await;
        let a = user(&store, "ann").await;
        let b = user(&store, "bob").await;
        store.create_booking(booking_for(&l, &a)).await.unwrap();
        store.create_booking(booking_for(&l, &b)).await.unwrap();

        assert!(store.delete_user(a.id).await);
        let left = store.bookings().await;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].user_id, b.id);
    }

    #[tokio::test]
    async fn booking_requires_existing_parents() {
        let store = MemoryStore::new();
        let l = listing(&store, "Villa").await;
        let u = user(&store, "ann").await;
        let mut orphan = booking_for(&l, &u);
        orphan.listing_id = Uuid::new_v4();
        assert!(matches!(
            store.create_booking(orphan).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_not_stored() {
        let store = MemoryStore::new();
        let l = listing(&store, "Villa").await;
        for rating in [0, 6] {
            let res = store
                .create_review(NewReview { listing_id: l.id, rating, comment: "x".into() })
                .await;
            assert!(matches!(res, Err(StoreError::Validation(_))));
        }
        assert!(store.reviews().await.is_empty());
    }

    #[tokio::test]
    async fn update_keeps_unchanged_fields_and_bumps_updated_at() {
        let store = MemoryStore::new();
        let l = listing(&store, "Villa").await;
        let updated = store
            .update_listing(
                l.id,
                ListingChanges { price_per_night: Some(Decimal::from(120)), ..Default::default() },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Villa");
        assert_eq!(updated.price_per_night.to_string(), "120.00");
        assert!(updated.updated_at >= l.updated_at);
        assert!(store
            .update_listing(Uuid::new_v4(), ListingChanges::default())
            .await
            .unwrap()
            .is_none());
    }
}
