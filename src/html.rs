//! Shared HTML layout and style constants for the server-rendered pages.

use maud::{DOCTYPE, Markup, html};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub const PAGE_HEADING_STYLE: &str = "text-xl font-bold";

pub const PAGE_TEXT_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";

/// Wrap `content` in the shared document shell.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }

            body class="bg-white dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}
