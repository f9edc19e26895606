//! The server-rendered page shells.
//!
//! Each page route serves a named view with no data; the pages fetch what
//! they need through the JSON API.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, PAGE_HEADING_STYLE, PAGE_TEXT_STYLE, base},
    navigation::NavBar,
};

fn page_shell(active_endpoint: &str, title: &str, heading: &str, blurb: &str) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_HEADING_STYLE) { (heading) }
            p class=(PAGE_TEXT_STYLE) { (blurb) }
        }
    };

    base(title, &content)
}

/// A route handler for the home page.
pub async fn get_index_page() -> Markup {
    page_shell(
        endpoints::ROOT,
        "Rewards Wallet",
        "Home",
        "Track your credit cards, purchases, and reward points in one place.",
    )
}

/// A route handler for the cards page.
pub async fn get_cards_page() -> Markup {
    page_shell(
        endpoints::CARDS_VIEW,
        "Rewards Wallet - Cards",
        "Cards",
        "The credit cards registered to your account.",
    )
}

/// A route handler for the transactions page.
pub async fn get_transactions_page() -> Markup {
    page_shell(
        endpoints::TRANSACTIONS_VIEW,
        "Rewards Wallet - Transactions",
        "Transactions",
        "Your purchase history, newest first.",
    )
}

/// A route handler for the wallet page.
pub async fn get_wallet_page() -> Markup {
    page_shell(
        endpoints::WALLET_VIEW,
        "Rewards Wallet - Wallet",
        "Wallet",
        "Reward points recorded against your purchases.",
    )
}
