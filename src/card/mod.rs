//! The credit card model, its database operations, and the card API endpoints.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    CardBuilder, CardWithUser, CreditCard, create_credit_card, create_credit_card_table,
    delete_credit_card, get_credit_card, get_credit_cards_by_user,
};
pub use create_endpoint::create_credit_card_endpoint;
pub use delete_endpoint::delete_credit_card_endpoint;
pub use list_endpoint::list_credit_cards_endpoint;
