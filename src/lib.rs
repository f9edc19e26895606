//! Rewards Wallet is a demonstration web backend for tracking credit cards,
//! merchants, and purchase transactions.
//!
//! This library provides a JSON API under `/api` plus a handful of
//! server-rendered pages. Reward-point columns exist on transactions but are
//! plain storage; nothing in the application computes them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod card;
mod database_id;
mod db;
pub mod endpoints;
mod html;
mod logging;
mod merchant;
mod navigation;
mod not_found;
mod pages;
mod routing;
mod transaction;
mod user;

pub use app_state::AppState;
pub use card::{
    CardBuilder, CardWithUser, CreditCard, create_credit_card, delete_credit_card,
    get_credit_card, get_credit_cards_by_user,
};
pub use database_id::{CardId, DatabaseId, MerchantId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use merchant::{
    Merchant, MerchantName, create_merchant, get_all_merchants, get_merchant,
    get_merchants_by_category, get_merchants_by_name,
};
pub use routing::build_router;
pub use transaction::{
    Transaction, TransactionBuilder, create_transaction, get_transaction,
    get_transactions_by_user, get_transactions_by_user_in_range,
};
pub use user::{
    DEMO_USER_ID, NewUser, User, UserID, count_users, create_user, get_user_by_id,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required text field was blank. The value names the offending field.
    #[error("the {0} field cannot be blank")]
    EmptyField(&'static str),

    /// The last-four string of a card was longer than four characters.
    #[error("lastFour must be at most 4 characters, got {0:?}")]
    InvalidLastFour(String),

    /// A card was created with a base reward rate of zero or less.
    #[error("baseRewardRate must be positive, got {0}")]
    NonPositiveRewardRate(f64),

    /// A transaction was created with an amount of zero or less.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    /// The username used to create a user already exists in the database.
    #[error("the username is already taken")]
    DuplicateUsername,

    /// The email address used to create a user already exists in the database.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// An insert referenced a user, card, or merchant that does not exist.
    #[error("a referenced record does not exist")]
    InvalidForeignKey,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidForeignKey
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent with 4xx/5xx API responses that carry a message.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // The original backend answers a bodyless 404 when a record (most
            // commonly the demo user) is missing.
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            Error::EmptyField(_)
            | Error::InvalidLastFour(_)
            | Error::NonPositiveRewardRate(_)
            | Error::NonPositiveAmount(_)
            | Error::DuplicateUsername
            | Error::DuplicateEmail
            | Error::InvalidForeignKey => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "an unexpected error occurred, check the server logs".to_owned(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
