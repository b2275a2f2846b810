use rust_decimal::Decimal;
use time::Date;

use super::repo_types::{ListingChanges, NewListing, NewReview};
use crate::store::{StoreError, StoreResult};

pub const TITLE_MAX_LEN: usize = 255;
pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const PRICE_MAX_DIGITS: u32 = 10;
pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// Whole days between the two dates. Not validated: an inverted range
/// gives a negative count.
pub fn nights(start: Date, end: Date) -> i64 {
    (end - start).whole_days()
}

pub fn total_price(price_per_night: Decimal, start: Date, end: Date) -> Decimal {
    price_per_night * Decimal::from(nights(start, end))
}

pub fn validate_rating(rating: i32) -> StoreResult<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(StoreError::validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::validation("title may not be blank"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(StoreError::validation(format!(
            "title may not exceed {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Checks the NUMERIC(10, 2) shape and returns the value at scale 2.
pub fn normalize_price(price: Decimal) -> StoreResult<Decimal> {
    if price.scale() > PRICE_DECIMAL_PLACES {
        return Err(StoreError::validation(format!(
            "price_per_night may have at most {PRICE_DECIMAL_PLACES} decimal places"
        )));
    }
    let int_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(int_digits));
    if price.abs() >= limit {
        return Err(StoreError::validation(format!(
            "price_per_night may have at most {int_digits} digits before the decimal point"
        )));
    }
    let mut normalized = price;
    normalized.rescale(PRICE_DECIMAL_PLACES);
    Ok(normalized)
}

impl NewListing {
    pub fn validated(mut self) -> StoreResult<Self> {
        validate_title(&self.title)?;
        self.price_per_night = normalize_price(self.price_per_night)?;
        Ok(self)
    }
}

impl ListingChanges {
    pub fn validated(mut self) -> StoreResult<Self> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(price) = self.price_per_night {
            self.price_per_night = Some(normalize_price(price)?);
        }
        Ok(self)
    }
}

impl NewReview {
    pub fn validated(self) -> StoreResult<Self> {
        validate_rating(self.rating)?;
        Ok(self)
    }
}
