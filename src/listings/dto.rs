use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{
    BookingStatus, BookingWithParties, Listing, ListingChanges, NewListing, Review,
};
use crate::store::{RentalStore, StoreResult};

/// Listing as exposed by the API, with live related-record counts.
#[derive(Debug, Serialize)]
pub struct ListingOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub booking_count: i64,
    pub review_count: i64,
}

impl ListingOut {
    /// Counts are queried on every call.
    pub async fn build(store: &dyn RentalStore, listing: Listing) -> StoreResult<Self> {
        let booking_count = store.count_bookings_for_listing(listing.id).await?;
        let review_count = store.count_reviews_for_listing(listing.id).await?;
        Ok(Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            price_per_night: listing.price_per_night,
            booking_count,
            review_count,
        })
    }
}

/// Booking with its listing and user rendered as display strings.
#[derive(Debug, Serialize)]
pub struct BookingOut {
    pub booking_id: Uuid,
    pub listing: String,
    pub user: String,
    pub start_date: Date,
    pub end_date: Date,
    pub total_price: Decimal,
    pub status: BookingStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<BookingWithParties> for BookingOut {
    fn from(row: BookingWithParties) -> Self {
        let b = row.booking;
        Self {
            booking_id: b.booking_id,
            listing: row.listing_title,
            user: row.username,
            start_date: b.start_date,
            end_date: b.end_date,
            total_price: b.total_price,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewOut {
    pub review_id: Uuid,
    pub listing: Uuid,
    pub rating: i32,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Review> for ReviewOut {
    fn from(r: Review) -> Self {
        Self {
            review_id: r.review_id,
            listing: r.listing_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
}

impl From<CreateListingRequest> for NewListing {
    fn from(r: CreateListingRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            price_per_night: r.price_per_night,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
}

impl From<UpdateListingRequest> for ListingChanges {
    fn from(r: UpdateListingRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            price_per_night: r.price_per_night,
        }
    }
}
