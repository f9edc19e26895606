//! Defines the endpoint for listing and searching merchants.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    merchant::core::{get_all_merchants, get_merchants_by_category, get_merchants_by_name},
};

/// The state needed to list merchants.
#[derive(Debug, Clone)]
pub struct ListMerchantsState {
    /// The database connection for managing merchants.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListMerchantsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional filters for the merchant listing.
#[derive(Debug, Deserialize)]
pub struct MerchantQuery {
    /// Case-insensitive substring to match against merchant names.
    #[serde(default)]
    pub name: Option<String>,
    /// Exact category to match.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for listing merchants.
///
/// With a `name` query parameter the listing is filtered by case-insensitive
/// substring match; with `category` it is filtered by exact match; with
/// neither, all merchants are returned. `name` takes precedence when both are
/// given.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_merchants_endpoint(
    State(state): State<ListMerchantsState>,
    Query(query): Query<MerchantQuery>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let merchants = match (&query.name, &query.category) {
        (Some(name), _) => get_merchants_by_name(name, &connection),
        (None, Some(category)) => get_merchants_by_category(category, &connection),
        (None, None) => get_all_merchants(&connection),
    };

    match merchants {
        Ok(merchants) => Json(merchants).into_response(),
        Err(error) => error.into_response(),
    }
}
