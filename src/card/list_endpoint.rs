//! Defines the endpoint for listing the demo user's credit cards.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState,
    card::core::{CardWithUser, get_credit_cards_by_user},
    user::{DEMO_USER_ID, get_user_by_id},
};

/// The state needed to list credit cards.
#[derive(Debug, Clone)]
pub struct ListCreditCardsState {
    /// The database connection for managing credit cards.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListCreditCardsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing the demo user's credit cards, most recently
/// created first, each with the owning user embedded.
///
/// Responds with 404 and an empty body when the demo user does not exist.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_credit_cards_endpoint(State(state): State<ListCreditCardsState>) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let user = match get_user_by_id(DEMO_USER_ID, &connection) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    match get_credit_cards_by_user(user.id, &connection) {
        Ok(cards) => {
            let cards: Vec<CardWithUser> = cards
                .into_iter()
                .map(|card| CardWithUser::new(card, user.clone()))
                .collect();

            Json(cards).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod list_credit_cards_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, build_router,
        card::core::{CardWithUser, CreditCard, create_credit_card},
        endpoints,
        user::{NewUser, User, create_user},
    };

    fn get_test_server() -> (AppState, TestServer) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server =
            TestServer::new(build_router(state.clone()));

        (state, server)
    }

    fn seed_demo_user(state: &AppState) -> User {
        let connection = state.db_connection.lock().unwrap();

        create_user(
            NewUser {
                username: "testuser".to_string(),
                password: "password123".to_string(),
                email: "user@example.com".to_string(),
            },
            &connection,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_demo_user_gives_404_with_empty_body() {
        let (_state, server) = get_test_server();

        let response = server.get(endpoints::CREDIT_CARDS_API).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(
            response.text().is_empty(),
            "want empty body, got {:?}",
            response.text()
        );
    }

    #[tokio::test]
    async fn seeded_card_is_returned_with_owner() {
        let (state, server) = get_test_server();
        let user = seed_demo_user(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            create_credit_card(
                CreditCard::build("VISA", "1234", "12/26", 1.0),
                user.id,
                &connection,
            )
            .unwrap();
        }

        let response = server.get(endpoints::CREDIT_CARDS_API).await;

        response.assert_status_ok();

        let cards: Vec<CardWithUser> = response.json();
        assert_eq!(cards.len(), 1, "want exactly one card, got {cards:?}");

        let card = &cards[0];
        assert!(card.id > 0);
        assert_eq!(card.card_type, "VISA");
        assert_eq!(card.last_four, "1234");
        assert_eq!(card.expiry_date, "12/26");
        assert_eq!(card.base_reward_rate, 1.0);
        assert_eq!(card.user.username, "testuser");
    }

    #[tokio::test]
    async fn cards_are_listed_newest_first() {
        let (state, server) = get_test_server();
        let user = seed_demo_user(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            create_credit_card(
                CreditCard::build("VISA", "1234", "12/26", 1.0),
                user.id,
                &connection,
            )
            .unwrap();
            create_credit_card(
                CreditCard::build("MasterCard", "5678", "03/27", 0.5),
                user.id,
                &connection,
            )
            .unwrap();
        }

        let response = server.get(endpoints::CREDIT_CARDS_API).await;

        let cards: Vec<CardWithUser> = response.json();
        assert_eq!(cards.len(), 2);
        assert!(cards[0].id > cards[1].id);
        assert_eq!(cards[0].last_four, "5678");
    }
}
