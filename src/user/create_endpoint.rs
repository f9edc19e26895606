//! Defines the endpoint for creating a new user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState,
    user::core::{NewUser, create_user},
};

/// The state needed to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new user from a JSON payload.
///
/// Responds with 201 Created and the saved user on success. The password is
/// accepted in the payload but never serialized back out.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    Json(new_user): Json<NewUser>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match create_user(new_user, &connection) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod create_user_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, endpoints, user::count_users};

    fn get_test_server() -> (AppState, TestServer) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server =
            TestServer::new(build_router(state.clone()));

        (state, server)
    }

    #[tokio::test]
    async fn creates_user_and_hides_password() {
        let (state, server) = get_test_server();

        let response = server
            .post(endpoints::USERS_API)
            .json(&json!({
                "username": "testuser",
                "password": "password123",
                "email": "user@example.com",
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);

        let body = response.text();
        assert!(body.contains("testuser"));
        assert!(
            !body.contains("password123"),
            "the password must not be serialized, got {body}"
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_users(&connection).unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (_state, server) = get_test_server();

        let payload = json!({
            "username": "testuser",
            "password": "password123",
            "email": "user@example.com",
        });

        server.post(endpoints::USERS_API).json(&payload).await;
        let response = server.post(endpoints::USERS_API).json(&payload).await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
}
