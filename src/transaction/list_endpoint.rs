//! Defines the endpoint for listing the demo user's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState,
    transaction::core::{get_transactions_by_user, get_transactions_by_user_in_range},
    user::{DEMO_USER_ID, get_user_by_id},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional date range for the transaction listing, as RFC 3339
/// timestamps. Both bounds must be provided together.
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// The inclusive lower bound of the range.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start: Option<OffsetDateTime>,
    /// The inclusive upper bound of the range.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
}

/// A route handler for listing the demo user's transactions, newest first.
///
/// With `start` and `end` query parameters the listing is restricted to the
/// inclusive timestamp range. Responds with 404 and an empty body when the
/// demo user does not exist.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<TransactionQuery>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let user = match get_user_by_id(DEMO_USER_ID, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    let transactions = match (query.start, query.end) {
        (Some(start), Some(end)) => {
            get_transactions_by_user_in_range(user.id, start, end, &connection)
        }
        (None, None) => get_transactions_by_user(user.id, &connection),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "start and end must be provided together"
                })),
            )
                .into_response();
        }
    };

    match transactions {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}
