use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{
    Booking, BookingWithParties, Listing, ListingChanges, NewBooking, NewListing, NewReview,
    Review,
};

const LISTING_COLUMNS: &str = "id, title, description, price_per_night, created_at, updated_at";
const BOOKING_COLUMNS: &str =
    "booking_id, listing_id, user_id, start_date, end_date, total_price, status, created_at";
const REVIEW_COLUMNS: &str = "review_id, listing_id, rating, comment, created_at";

pub async fn find_listing_by_title(db: &PgPool, title: &str) -> sqlx::Result<Option<Listing>> {
    sqlx::query_as::<_, Listing>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings WHERE title = $1"
    ))
    .bind(title)
    .fetch_optional(db)
    .await
}

pub async fn get_listing(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Listing>> {
    sqlx::query_as::<_, Listing>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_listings(db: &PgPool) -> sqlx::Result<Vec<Listing>> {
    sqlx::query_as::<_, Listing>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings ORDER BY created_at ASC, title ASC"
    ))
    .fetch_all(db)
    .await
}

pub async fn insert_listing(db: &PgPool, new: &NewListing) -> sqlx::Result<Listing> {
    sqlx::query_as::<_, Listing>(&format!(
        r#"
        INSERT INTO listings (id, title, description, price_per_night)
        VALUES ($1, $2, $3, $4)
        RETURNING {LISTING_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.price_per_night)
    .fetch_one(db)
    .await
}

pub async fn update_listing(
    db: &PgPool,
    id: Uuid,
    changes: &ListingChanges,
) -> sqlx::Result<Option<Listing>> {
    sqlx::query_as::<_, Listing>(&format!(
        r#"
        UPDATE listings
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            price_per_night = COALESCE($4, price_per_night),
            updated_at = now()
        WHERE id = $1
        RETURNING {LISTING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.price_per_night)
    .fetch_optional(db)
    .await
}

pub async fn delete_listing(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn insert_booking(db: &PgPool, new: &NewBooking) -> sqlx::Result<Booking> {
    sqlx::query_as::<_, Booking>(&format!(
        r#"
        INSERT INTO bookings (booking_id, listing_id, user_id, start_date, end_date, total_price, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.listing_id)
    .bind(new.user_id)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(new.total_price)
    .bind(new.status.as_str())
    .fetch_one(db)
    .await
}

pub async fn bookings_for_listing(
    db: &PgPool,
    listing_id: Uuid,
) -> sqlx::Result<Vec<BookingWithParties>> {
    sqlx::query_as::<_, BookingWithParties>(
        r#"
        SELECT b.booking_id, b.listing_id, b.user_id, b.start_date, b.end_date,
               b.total_price, b.status, b.created_at,
               l.title AS listing_title, u.username
        FROM bookings b
        JOIN listings l ON l.id = b.listing_id
        JOIN users u ON u.id = b.user_id
        WHERE b.listing_id = $1
        ORDER BY b.start_date ASC, b.created_at ASC
        "#,
    )
    .bind(listing_id)
    .fetch_all(db)
    .await
}

pub async fn count_bookings_for_listing(db: &PgPool, listing_id: Uuid) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_one(db)
        .await
}

pub async fn insert_review(db: &PgPool, new: &NewReview) -> sqlx::Result<Review> {
    sqlx::query_as::<_, Review>(&format!(
        r#"
        INSERT INTO reviews (review_id, listing_id, rating, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING {REVIEW_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.listing_id)
    .bind(new.rating)
    .bind(&new.comment)
    .fetch_one(db)
    .await
}

pub async fn reviews_for_listing(db: &PgPool, listing_id: Uuid) -> sqlx::Result<Vec<Review>> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE listing_id = $1 ORDER BY created_at ASC"
    ))
    .bind(listing_id)
    .fetch_all(db)
    .await
}

pub async fn count_reviews_for_listing(db: &PgPool, listing_id: Uuid) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_one(db)
        .await
}

/// Unconditional `DELETE FROM <table>`; returns rows removed.
pub async fn delete_all(db: &PgPool, table: Table) -> sqlx::Result<u64> {
    let res = sqlx::query(&format!("DELETE FROM {}", table.name()))
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count_rows(db: &PgPool, table: Table) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table.name()))
        .fetch_one(db)
        .await
}

#[derive(Debug, Clone, Copy)]
pub enum Table {
    Listings,
    Bookings,
    Reviews,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::Bookings => "bookings",
            Self::Reviews => "reviews",
        }
    }
}
