//! Named routes of the `listings` namespace and reverse lookup.

use std::{fmt, str::FromStr};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use thiserror::Error;
use uuid::Uuid;

use crate::listings::handlers::{
    create_listing, delete_listing, get_listing, list_listing_bookings, list_listing_reviews,
    list_listings, update_listing,
};
use crate::state::AppState;

pub const NAMESPACE: &str = "listings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

impl RouteName {
    pub const ALL: [RouteName; 5] = [
        RouteName::List,
        RouteName::Detail,
        RouteName::Create,
        RouteName::Update,
        RouteName::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Path pattern in axum syntax.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::List => "/listings/",
            Self::Detail => "/listings/:id/",
            Self::Create => "/listings/create/",
            Self::Update => "/listings/:id/update/",
            Self::Delete => "/listings/:id/delete/",
        }
    }

    pub fn takes_id(self) -> bool {
        matches!(self, Self::Detail | Self::Update | Self::Delete)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NAMESPACE}:{}", self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route named `{0}`")]
    UnknownName(String),
    #[error("route `{0}` needs an id")]
    MissingId(RouteName),
    #[error("route `{0}` takes no id")]
    UnexpectedId(RouteName),
}

/// Accepts both `detail` and the qualified `listings:detail`.
impl FromStr for RouteName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = match s.split_once(':') {
            Some((ns, rest)) if ns == NAMESPACE => rest,
            Some(_) => return Err(RouteError::UnknownName(s.to_string())),
            None => s,
        };
        Self::ALL
            .into_iter()
            .find(|r| r.name() == bare)
            .ok_or_else(|| RouteError::UnknownName(s.to_string()))
    }
}

pub fn reverse(route: RouteName, id: Option<Uuid>) -> Result<String, RouteError> {
    let pattern = route.pattern();
    match (route.takes_id(), id) {
        (true, Some(id)) => Ok(pattern.replace(":id", &id.to_string())),
        (true, None) => Err(RouteError::MissingId(route)),
        (false, None) => Ok(pattern.to_string()),
        (false, Some(_)) => Err(RouteError::UnexpectedId(route)),
    }
}

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(RouteName::List.pattern(), get(list_listings))
        .route(RouteName::Detail.pattern(), get(get_listing))
        .route(RouteName::Create.pattern(), post(create_listing))
        .route(RouteName::Update.pattern(), put(update_listing))
        .route(RouteName::Delete.pattern(), delete(delete_listing))
        .route("/listings/:id/bookings/", get(list_listing_bookings))
        .route("/listings/:id/reviews/", get(list_listing_reviews))
}
