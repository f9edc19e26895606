//! Defines the endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState,
    database_id::{CardId, MerchantId},
    transaction::core::{Transaction, create_transaction},
    user::{DEMO_USER_ID, get_user_by_id},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON payload for recording a transaction.
///
/// The owning user is attached server-side. Reward fields are stored exactly
/// as given; the application never computes them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// The amount of money spent.
    pub amount: f64,
    /// When the purchase happened, as an RFC 3339 timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The ID of the card the purchase was made with.
    #[serde(default)]
    pub card_id: Option<CardId>,
    /// The ID of the merchant the purchase was made at.
    #[serde(default)]
    pub merchant_id: Option<MerchantId>,
    /// Total reward points, stored as given.
    #[serde(default)]
    pub reward_points: Option<f64>,
    /// Card-level reward points, stored as given.
    #[serde(default)]
    pub card_reward_points: Option<f64>,
    /// Company-level reward points, stored as given.
    #[serde(default)]
    pub company_reward_points: Option<f64>,
    /// Whether the purchase used the best available card, stored as given.
    #[serde(default)]
    pub is_optimal: Option<bool>,
}

/// A route handler for recording a new transaction for the demo user.
///
/// Responds with 404 and an empty body when the demo user does not exist,
/// with 400 when the amount is not positive or a referenced card or merchant
/// does not exist, and otherwise with 201 and the saved transaction.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(form): Json<TransactionForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let user = match get_user_by_id(DEMO_USER_ID, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    let mut builder = Transaction::build(form.amount, form.date)
        .card_id(form.card_id)
        .merchant_id(form.merchant_id);
    builder.reward_points = form.reward_points;
    builder.card_reward_points = form.card_reward_points;
    builder.company_reward_points = form.company_reward_points;
    builder.is_optimal = form.is_optimal;

    match create_transaction(builder, user.id, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}
