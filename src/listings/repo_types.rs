use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Rentable property.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal, // NUMERIC(10, 2)
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown booking status `{0}`")]
pub struct UnknownStatus(pub String);

impl TryFrom<String> for BookingStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(UnknownStatus(s)),
        }
    }
}

/// Reservation of a listing by a user.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Booking {
    pub booking_id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub total_price: Decimal, // fixed when the booking is created
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: OffsetDateTime,
}

/// Booking joined with the display names of its listing and user.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithParties {
    #[sqlx(flatten)]
    pub booking: Booking,
    pub listing_title: String,
    pub username: String,
}

impl fmt::Display for BookingWithParties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Booking {} for {}", self.booking.booking_id, self.listing_title)
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Review {
    pub review_id: Uuid,
    pub listing_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub listing_id: Uuid,
    pub rating: i32,
    pub comment: String,
}
