use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{BookingOut, CreateListingRequest, ListingOut, ReviewOut, UpdateListingRequest};
use crate::routes::listings::{reverse, RouteName};
use crate::state::AppState;
use crate::store::StoreError;

type ApiError = (StatusCode, String);

#[instrument(skip(state))]
pub async fn list_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingOut>>, ApiError> {
    let listings = state.store.list_listings().await.map_err(store_error)?;
    let mut items = Vec::with_capacity(listings.len());
    for listing in listings {
        items.push(
            ListingOut::build(state.store.as_ref(), listing)
                .await
                .map_err(store_error)?,
        );
    }
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingOut>, ApiError> {
    let listing = state
        .store
        .get_listing(id)
        .await
        .map_err(store_error)?
        .ok_or_else(not_found)?;
    let out = ListingOut::build(state.store.as_ref(), listing)
        .await
        .map_err(store_error)?;
    Ok(Json(out))
}

#[instrument(skip(state, body))]
pub async fn create_listing(
    State(state): State<AppState>,
    Json(body): Json<CreateListingRequest>,
) -> Result<(StatusCode, HeaderMap, Json<ListingOut>), ApiError> {
    let listing = state
        .store
        .create_listing(body.into())
        .await
        .map_err(store_error)?;
    info!(id = %listing.id, title = %listing.title, "listing created");

    let location = reverse(RouteName::Detail, Some(listing.id))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );

    let out = ListingOut::build(state.store.as_ref(), listing)
        .await
        .map_err(store_error)?;
    Ok((StatusCode::CREATED, headers, Json(out)))
}

/// Changing the rate leaves existing bookings' totals as they were.
#[instrument(skip(state, body))]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateListingRequest>,
) -> Result<Json<ListingOut>, ApiError> {
    let listing = state
        .store
        .update_listing(id, body.into())
        .await
        .map_err(store_error)?
        .ok_or_else(not_found)?;
    info!(%id, "listing updated");
    let out = ListingOut::build(state.store.as_ref(), listing)
        .await
        .map_err(store_error)?;
    Ok(Json(out))
}

#[instrument(skip(state))]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_listing(id).await.map_err(store_error)? {
        info!(%id, "listing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

#[instrument(skip(state))]
pub async fn list_listing_bookings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BookingOut>>, ApiError> {
    ensure_listing(&state, id).await?;
    let rows = state
        .store
        .bookings_for_listing(id)
        .await
        .map_err(store_error)?;
    Ok(Json(rows.into_iter().map(BookingOut::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_listing_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewOut>>, ApiError> {
    ensure_listing(&state, id).await?;
    let reviews = state
        .store
        .reviews_for_listing(id)
        .await
        .map_err(store_error)?;
    Ok(Json(reviews.into_iter().map(ReviewOut::from).collect()))
}

async fn ensure_listing(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    match state.store.get_listing(id).await.map_err(store_error)? {
        Some(_) => Ok(()),
        None => Err(not_found()),
    }
}

fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, "Listing not found".into())
}

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::Validation(msg) => {
            warn!(%msg, "validation failed");
            (StatusCode::BAD_REQUEST, msg)
        }
        StoreError::NotFound => not_found(),
        StoreError::Conflict(constraint) => {
            warn!(%constraint, "unique constraint violated");
            (StatusCode::CONFLICT, "Listing with this title already exists".into())
        }
        StoreError::Database(e) => {
            error!(error = %e, "store failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}
