//! Defines the endpoint for fetching a single user by ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState,
    user::core::{UserID, get_user_by_id},
};

/// The state needed to fetch a user.
#[derive(Debug, Clone)]
pub struct GetUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for fetching a user by its ID.
///
/// Responds with the user as JSON, or 404 if no such user exists.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_user_endpoint(
    State(state): State<GetUserState>,
    Path(user_id): Path<i64>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match get_user_by_id(UserID::new(user_id), &connection) {
        Ok(user) => Json(user).into_response(),
        Err(error) => error.into_response(),
    }
}
