//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    card::{create_credit_card_endpoint, delete_credit_card_endpoint, list_credit_cards_endpoint},
    endpoints,
    merchant::list_merchants_endpoint,
    not_found::get_404_not_found,
    pages::{get_cards_page, get_index_page, get_transactions_page, get_wallet_page},
    transaction::{create_transaction_endpoint, list_transactions_endpoint},
    user::{create_user_endpoint, get_user_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CARDS_VIEW, get(get_cards_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::WALLET_VIEW, get(get_wallet_page));

    let api_routes = Router::new()
        .route(
            endpoints::CREDIT_CARDS_API,
            get(list_credit_cards_endpoint).post(create_credit_card_endpoint),
        )
        .route(
            endpoints::CREDIT_CARD_API,
            delete(delete_credit_card_endpoint),
        )
        .route(endpoints::USERS_API, post(create_user_endpoint))
        .route(endpoints::USER_API, get(get_user_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::MERCHANTS_API, get(list_merchants_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
