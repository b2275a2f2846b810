//! Development seeding: users, then listings, then bookings, then reviews.
//!
//! Users and listings are fetched by natural key before being created, so
//! re-running leaves them alone. Bookings and reviews are inserted
//! unconditionally and pile up on every run unless `clear` is set. Steps
//! are not wrapped in a transaction: the first failing store call aborts
//! the run and whatever was written so far stays.

pub mod data;

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use time::{Date, Duration};
use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::auth::repo_types::{NewUser, User};
use crate::clock::Clock;
use crate::listings::repo_types::{Listing, NewBooking, NewListing, NewReview};
use crate::listings::services::total_price;
use crate::store::{RentalStore, StoreCounts};
use data::{BOOKINGS, LISTINGS, REVIEWS, USERS};

#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Delete reviews, bookings and listings first. Users are kept.
    pub clear: bool,
    pub default_password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub reviews: u64,
    pub bookings: u64,
    pub listings: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub cleared: Option<ClearReport>,
    pub users_created: usize,
    pub users_existing: usize,
    pub listings_created: usize,
    pub listings_existing: usize,
    pub bookings_created: usize,
    pub reviews_created: usize,
    /// Row totals once seeding finished.
    pub totals: StoreCounts,
}

pub async fn run(
    store: &dyn RentalStore,
    clock: &dyn Clock,
    opts: &SeedOptions,
) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    if opts.clear {
        report.cleared = Some(clear(store).await?);
    }

    info!("starting to seed database");
    let users = seed_users(store, &opts.default_password, &mut report).await?;
    let listings = seed_listings(store, &mut report).await?;
    report.bookings_created = seed_bookings(store, clock.today(), &listings, &users).await?;
    report.reviews_created = seed_reviews(store, &listings).await?;

    report.totals = store.counts().await.context("count rows")?;
    info!(?report, "database seeding completed");
    Ok(report)
}

/// Children first so nothing is left pointing at a removed listing.
pub async fn clear(store: &dyn RentalStore) -> anyhow::Result<ClearReport> {
    warn!("clearing existing data");
    let reviews = store.delete_all_reviews().await.context("delete reviews")?;
    let bookings = store.delete_all_bookings().await.context("delete bookings")?;
    let listings = store.delete_all_listings().await.context("delete listings")?;
    let cleared = ClearReport { reviews, bookings, listings };
    info!(?cleared, "existing data cleared");
    Ok(cleared)
}

async fn seed_users(
    store: &dyn RentalStore,
    default_password: &str,
    report: &mut SeedReport,
) -> anyhow::Result<HashMap<&'static str, User>> {
    info!("creating users");
    let mut users = HashMap::with_capacity(USERS.len());
    for seed in USERS {
        let user = match store
            .find_user_by_username(seed.username)
            .await
            .with_context(|| format!("look up user {}", seed.username))?
        {
            Some(existing) => {
                if existing.password_hash.is_empty() {
                    warn!(username = %existing, "existing user has no password set");
                }
                info!(username = %existing, "user already exists");
                report.users_existing += 1;
                existing
            }
            None => {
                let created = store
                    .create_user(NewUser {
                        username: seed.username.into(),
                        email: seed.email.into(),
                        password_hash: hash_password(default_password)?,
                    })
                    .await
                    .with_context(|| format!("create user {}", seed.username))?;
                info!(username = %created, "created user");
                report.users_created += 1;
                created
            }
        };
        users.insert(seed.username, user);
    }
    Ok(users)
}

async fn seed_listings(
    store: &dyn RentalStore,
    report: &mut SeedReport,
) -> anyhow::Result<HashMap<&'static str, Listing>> {
    info!("creating listings");
    let mut listings = HashMap::with_capacity(LISTINGS.len());
    for seed in LISTINGS {
        let listing = match store
            .find_listing_by_title(seed.title)
            .await
            .with_context(|| format!("look up listing {}", seed.title))?
        {
            Some(existing) => {
                info!(title = %existing, "listing already exists");
                report.listings_existing += 1;
                existing
            }
            None => {
                let created = store
                    .create_listing(NewListing {
                        title: seed.title.into(),
                        description: seed.description.into(),
                        price_per_night: Decimal::new(seed.price_cents, 2),
                    })
                    .await
                    .with_context(|| format!("create listing {}", seed.title))?;
                info!(title = %created, "created listing");
                report.listings_created += 1;
                created
            }
        };
        listings.insert(seed.title, listing);
    }
    Ok(listings)
}

async fn seed_bookings(
    store: &dyn RentalStore,
    today: Date,
    listings: &HashMap<&'static str, Listing>,
    users: &HashMap<&'static str, User>,
) -> anyhow::Result<usize> {
    info!(%today, "creating bookings");
    let mut created = 0;
    for seed in BOOKINGS {
        let listing = listings
            .get(seed.listing)
            .ok_or_else(|| anyhow!("booking references unknown listing {}", seed.listing))?;
        let user = users
            .get(seed.user)
            .ok_or_else(|| anyhow!("booking references unknown user {}", seed.user))?;
        let start_date = offset(today, seed.start_offset)?;
        let end_date = offset(today, seed.end_offset)?;

        let booking = store
            .create_booking(NewBooking {
                listing_id: listing.id,
                user_id: user.id,
                start_date,
                end_date,
                total_price: total_price(listing.price_per_night, start_date, end_date),
                status: seed.status,
            })
            .await
            .with_context(|| format!("create booking {} -> {}", user, listing))?;
        info!(
            user = %user,
            listing = %listing,
            total_price = %booking.total_price,
            "created booking"
        );
        created += 1;
    }
    Ok(created)
}

async fn seed_reviews(
    store: &dyn RentalStore,
    listings: &HashMap<&'static str, Listing>,
) -> anyhow::Result<usize> {
    info!("creating reviews");
    let mut created = 0;
    for seed in REVIEWS {
        let listing = listings
            .get(seed.listing)
            .ok_or_else(|| anyhow!("review references unknown listing {}", seed.listing))?;
        let review = store
            .create_review(NewReview {
                listing_id: listing.id,
                rating: seed.rating,
                comment: seed.comment.into(),
            })
            .await
            .with_context(|| format!("create review for {}", listing))?;
        info!(rating = review.rating, listing = %listing, "created review");
        created += 1;
    }
    Ok(created)
}

fn offset(today: Date, days: i64) -> anyhow::Result<Date> {
    today
        .checked_add(Duration::days(days))
        .ok_or_else(|| anyhow!("{today} + {days} days is out of range"))
}
