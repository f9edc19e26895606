//! The user model, its database operations, and the user API endpoints.

mod core;
mod create_endpoint;
mod get_endpoint;

pub use core::{
    DEMO_USER_ID, NewUser, User, UserID, count_users, create_user, create_user_table,
    get_user_by_id,
};
pub use create_endpoint::create_user_endpoint;
pub use get_endpoint::get_user_endpoint;
