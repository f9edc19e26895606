//! The fallback page for unknown routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, PAGE_HEADING_STYLE, base},
};

/// A route handler that renders the 404 page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a response containing the rendered 404 page.
pub fn get_404_not_found_response() -> Response {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_HEADING_STYLE) { "404 Not Found" }
            p
            {
                "The page you were looking for does not exist. "
                a href=(endpoints::ROOT) class=(LINK_STYLE) { "Go home" }
            }
        }
    };

    (StatusCode::NOT_FOUND, base("Rewards Wallet - Not Found", &content)).into_response()
}
