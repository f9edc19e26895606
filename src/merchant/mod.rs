//! The merchant model, its database operations, and the merchant API endpoint.

mod core;
mod list_endpoint;

pub use core::{
    Merchant, MerchantName, create_merchant, create_merchant_table, get_all_merchants,
    get_merchant, get_merchants_by_category, get_merchants_by_name,
};
pub use list_endpoint::list_merchants_endpoint;
