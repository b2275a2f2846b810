//! Fixed sample dataset.

use crate::listings::repo_types::BookingStatus;

pub struct SeedUser {
    pub username: &'static str,
    pub email: &'static str,
}

pub struct SeedListing {
    pub title: &'static str,
    pub description: &'static str,
    pub price_cents: i64,
}

/// Dates are day offsets from the seeding date.
pub struct SeedBooking {
    pub listing: &'static str,
    pub user: &'static str,
    pub start_offset: i64,
    pub end_offset: i64,
    pub status: BookingStatus,
}

pub struct SeedReview {
    pub listing: &'static str,
    pub rating: i32,
    pub comment: &'static str,
}

pub const VILLA: &str = "Cozy Beachfront Villa";
pub const CABIN: &str = "Mountain Cabin Retreat";
pub const APARTMENT: &str = "Downtown Luxury Apartment";
pub const FARMHOUSE: &str = "Rustic Countryside Farmhouse";
pub const LOFT: &str = "Modern Studio Loft";

pub const USERS: &[SeedUser] = &[
    SeedUser { username: "john_doe", email: "john@example.com" },
    SeedUser { username: "jane_smith", email: "jane@example.com" },
    SeedUser { username: "bob_wilson", email: "bob@example.com" },
];

pub const LISTINGS: &[SeedListing] = &[
    SeedListing {
        title: VILLA,
        description: "Beautiful villa with ocean view, 3 bedrooms, fully equipped kitchen.",
        price_cents: 15000,
    },
    SeedListing {
        title: CABIN,
        description: "Peaceful cabin in the mountains, perfect for hiking enthusiasts.",
        price_cents: 8550,
    },
    SeedListing {
        title: APARTMENT,
        description: "Modern apartment in city center, close to restaurants and nightlife.",
        price_cents: 20000,
    },
    SeedListing {
        title: FARMHOUSE,
        description: "Charming farmhouse with garden, ideal for families.",
        price_cents: 12075,
    },
    SeedListing {
        title: LOFT,
        description: "Stylish studio with high ceilings and city views.",
        price_cents: 9500,
    },
];

pub const BOOKINGS: &[SeedBooking] = &[
    SeedBooking {
        listing: VILLA,
        user: "john_doe",
        start_offset: 5,
        end_offset: 8,
        status: BookingStatus::Confirmed,
    },
    SeedBooking {
        listing: CABIN,
        user: "jane_smith",
        start_offset: 10,
        end_offset: 12,
        status: BookingStatus::Pending,
    },
    SeedBooking {
        listing: APARTMENT,
        user: "john_doe",
        start_offset: 15,
        end_offset: 18,
        status: BookingStatus::Confirmed,
    },
    SeedBooking {
        listing: VILLA,
        user: "bob_wilson",
        start_offset: 20,
        end_offset: 25,
        status: BookingStatus::Pending,
    },
];

pub const REVIEWS: &[SeedReview] = &[
    SeedReview {
        listing: VILLA,
        rating: 5,
        comment: "Absolutely amazing! The view was breathtaking and the place was spotless.",
    },
    SeedReview {
        listing: VILLA,
        rating: 4,
        comment: "Great location, but could use better WiFi.",
    },
    SeedReview {
        listing: CABIN,
        rating: 5,
        comment: "Perfect getaway! Very peaceful and well-maintained.",
    },
    SeedReview {
        listing: APARTMENT,
        rating: 4,
        comment: "Nice place, excellent location. A bit noisy at night though.",
    },
    SeedReview {
        listing: FARMHOUSE,
        rating: 5,
        comment: "Loved the garden! Great for families with kids.",
    },
];
