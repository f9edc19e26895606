//! Defines the endpoint for registering a new credit card.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    card::core::{CardWithUser, CreditCard, create_credit_card},
    user::{DEMO_USER_ID, get_user_by_id},
};

/// The state needed to create a credit card.
#[derive(Debug, Clone)]
pub struct CreateCreditCardState {
    /// The database connection for managing credit cards.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCreditCardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON payload for creating a credit card.
///
/// The owning user is attached server-side, so the payload carries neither an
/// ID nor a user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardForm {
    /// The card network, e.g. "VISA".
    pub card_type: String,
    /// The last four digits printed on the card.
    pub last_four: String,
    /// The card's expiry as text, e.g. "12/26".
    pub expiry_date: String,
    /// The card's base reward rate.
    pub base_reward_rate: f64,
    /// A display name for the card.
    #[serde(default)]
    pub nickname: Option<String>,
    /// The institution that issued the card.
    #[serde(default)]
    pub issuer: Option<String>,
    /// A URL to the card art or issuer logo.
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A route handler for registering a new credit card for the demo user.
///
/// Responds with 404 and an empty body when the demo user does not exist,
/// with 400 when a field constraint is violated, and otherwise with the saved
/// card (including its assigned ID) with the owning user embedded.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_credit_card_endpoint(
    State(state): State<CreateCreditCardState>,
    Json(form): Json<CardForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let user = match get_user_by_id(DEMO_USER_ID, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    let mut builder = CreditCard::build(
        &form.card_type,
        &form.last_four,
        &form.expiry_date,
        form.base_reward_rate,
    );
    builder.nickname = form.nickname;
    builder.issuer = form.issuer;
    builder.logo_url = form.logo_url;

    match create_credit_card(builder, user.id, &connection) {
        Ok(card) => Json(CardWithUser::new(card, user)).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod create_credit_card_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        card::core::{CardWithUser, get_credit_cards_by_user},
        endpoints,
        user::{NewUser, create_user},
    };

    fn get_test_server() -> (AppState, TestServer) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server =
            TestServer::new(build_router(state.clone()));

        (state, server)
    }

    fn seed_demo_user(state: &AppState) {
        let connection = state.db_connection.lock().unwrap();

        create_user(
            NewUser {
                username: "testuser".to_string(),
                password: "password123".to_string(),
                email: "user@example.com".to_string(),
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn missing_demo_user_gives_404() {
        let (_state, server) = get_test_server();

        let response = server
            .post(endpoints::CREDIT_CARDS_API)
            .json(&json!({
                "cardType": "VISA",
                "lastFour": "1234",
                "expiryDate": "12/26",
                "baseRewardRate": 1.0,
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_card_is_returned_with_assigned_id() {
        let (state, server) = get_test_server();
        seed_demo_user(&state);

        let response = server
            .post(endpoints::CREDIT_CARDS_API)
            .json(&json!({
                "cardType": "VISA",
                "lastFour": "1234",
                "expiryDate": "12/26",
                "baseRewardRate": 1.0,
                "nickname": "Main Card",
                "issuer": "Rakuten Card",
            }))
            .await;

        response.assert_status_ok();

        let card: CardWithUser = response.json();
        assert!(card.id > 0);
        assert_eq!(card.card_type, "VISA");
        assert_eq!(card.nickname.as_deref(), Some("Main Card"));
        assert_eq!(card.user.username, "testuser");

        let connection = state.db_connection.lock().unwrap();
        let stored = get_credit_cards_by_user(card.user.id, &connection).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, card.id);
    }

    #[tokio::test]
    async fn zero_reward_rate_is_rejected_before_persistence() {
        let (state, server) = get_test_server();
        seed_demo_user(&state);

        let response = server
            .post(endpoints::CREDIT_CARDS_API)
            .json(&json!({
                "cardType": "VISA",
                "lastFour": "1234",
                "expiryDate": "12/26",
                "baseRewardRate": 0.0,
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("baseRewardRate"));

        let connection = state.db_connection.lock().unwrap();
        let stored = get_credit_cards_by_user(crate::DEMO_USER_ID, &connection).unwrap();
        assert_eq!(stored, []);
    }
}
