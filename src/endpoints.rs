//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/credit-cards/{card_id}',
//! use [format_endpoint].

use crate::database_id::DatabaseId;

/// The home page.
pub const ROOT: &str = "/";
/// The page for displaying the user's credit cards.
pub const CARDS_VIEW: &str = "/cards";
/// The page for displaying the user's transaction history.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for displaying the reward-point wallet.
pub const WALLET_VIEW: &str = "/wallet";

/// The route to list and create credit cards.
pub const CREDIT_CARDS_API: &str = "/api/credit-cards";
/// The route to delete a single credit card.
pub const CREDIT_CARD_API: &str = "/api/credit-cards/{card_id}";
/// The route to create users.
pub const USERS_API: &str = "/api/users";
/// The route to access a single user.
pub const USER_API: &str = "/api/users/{user_id}";
/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list merchants.
pub const MERCHANTS_API: &str = "/api/merchants";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/users/{user_id}', '{user_id}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: DatabaseId) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::CARDS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::WALLET_VIEW);

        assert_endpoint_is_valid_uri(endpoints::CREDIT_CARDS_API);
        assert_endpoint_is_valid_uri(endpoints::CREDIT_CARD_API);
        assert_endpoint_is_valid_uri(endpoints::USERS_API);
        assert_endpoint_is_valid_uri(endpoints::USER_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::MERCHANTS_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::CREDIT_CARD_API, 1);

        assert_eq!(formatted_path, "/api/credit-cards/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
