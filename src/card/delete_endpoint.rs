//! Defines the endpoint for deleting a credit card.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, card::core::delete_credit_card, database_id::CardId};

/// The state needed to delete a credit card.
#[derive(Debug, Clone)]
pub struct DeleteCreditCardState {
    /// The database connection for managing credit cards.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCreditCardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a credit card by ID.
///
/// The delete is unconditional: no ownership check is performed, and the
/// response is 200 with an empty body whether or not the card existed. Both
/// behaviors reproduce the backend this service is a port of.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_credit_card_endpoint(
    State(state): State<DeleteCreditCardState>,
    Path(card_id): Path<CardId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_credit_card(card_id, &connection) {
        Ok(0) => {
            tracing::debug!("Delete of credit card {card_id} matched no rows");
            StatusCode::OK.into_response()
        }
        Ok(_) => StatusCode::OK.into_response(),
        Err(error) => {
            tracing::error!("Could not delete credit card {card_id}: {error}");
            error.into_response()
        }
    }
}
