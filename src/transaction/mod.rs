//! The transaction model, its database operations, and the transaction API
//! endpoints.

mod core;
mod create_endpoint;
mod list_endpoint;

pub use core::{
    Transaction, TransactionBuilder, create_transaction, create_transaction_table,
    get_transaction, get_transactions_by_user, get_transactions_by_user_in_range,
};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
