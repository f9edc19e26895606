//! Code for creating the users table and fetching users from the database.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The fixed account that the card and transaction API operates on.
///
/// This stands in for a missing authentication layer: the first seeded user
/// always receives ID 1.
pub const DEMO_USER_ID: UserID = UserID::new(1);

/// A user of the application.
///
/// The caller should ensure that `id` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user signs in with.
    pub username: String,
    /// The user's password as provided at signup.
    ///
    /// This is demo data, stored as given. It is never written into API
    /// responses and the logging middleware redacts it from request bodies.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// The user's email address.
    pub email: String,
}

/// The fields needed to create a [User].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    /// The name the user signs in with.
    pub username: String,
    /// The user's password.
    pub password: String,
    /// The user's email address.
    pub email: String,
}

/// Create the users table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// This function will return a:
/// - [Error::EmptyField] if the username or email is blank,
/// - [Error::DuplicateUsername] or [Error::DuplicateEmail] if another user
///   already holds the username or email,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    if new_user.username.trim().is_empty() {
        return Err(Error::EmptyField("username"));
    }

    if new_user.email.trim().is_empty() {
        return Err(Error::EmptyField("email"));
    }

    connection.execute(
        "INSERT INTO users (username, password, email) VALUES (?1, ?2, ?3)",
        (&new_user.username, &new_user.password, &new_user.email),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: new_user.username,
        password: new_user.password,
        email: new_user.email,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, db_connection: &Connection) -> Result<User, Error> {
    db_connection
        .prepare("SELECT id, username, password, email FROM users WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], |row| {
            Ok(User {
                id: UserID::new(row.get(0)?),
                username: row.get(1)?,
                password: row.get(2)?,
                email: row.get(3)?,
            })
        })
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM users;", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|count| count as usize)
        .map_err(|error| error.into())
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        user::core::{NewUser, UserID, count_users, create_user, create_user_table, get_user_by_id},
    };

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create users table");

        conn
    }

    fn test_user() -> NewUser {
        NewUser {
            username: "testuser".to_string(),
            password: "password123".to_string(),
            email: "user@example.com".to_string(),
        }
    }

    #[test]
    fn insert_user_succeeds() {
        let db_connection = get_db_connection();

        let inserted_user = create_user(test_user(), &db_connection).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.username, "testuser");
        assert_eq!(inserted_user.email, "user@example.com");
    }

    #[test]
    fn insert_user_fails_on_blank_username() {
        let db_connection = get_db_connection();

        let result = create_user(
            NewUser {
                username: "  ".to_string(),
                ..test_user()
            },
            &db_connection,
        );

        assert_eq!(result, Err(Error::EmptyField("username")));
    }

    #[test]
    fn insert_user_fails_on_duplicate_username() {
        let db_connection = get_db_connection();
        create_user(test_user(), &db_connection).unwrap();

        let duplicate = create_user(
            NewUser {
                email: "other@example.com".to_string(),
                ..test_user()
            },
            &db_connection,
        );

        assert_eq!(duplicate, Err(Error::DuplicateUsername));
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let db_connection = get_db_connection();
        create_user(test_user(), &db_connection).unwrap();

        let duplicate = create_user(
            NewUser {
                username: "otheruser".to_string(),
                ..test_user()
            },
            &db_connection,
        );

        assert_eq!(duplicate, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let db_connection = get_db_connection();

        let id = UserID::new(42);

        assert_eq!(get_user_by_id(id, &db_connection), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let db_connection = get_db_connection();
        let test_user = create_user(test_user(), &db_connection).unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn returns_correct_count() {
        let db_connection = get_db_connection();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(0, count, "Want zero users before insertion, got {count}");

        create_user(test_user(), &db_connection).unwrap();

        let count = count_users(&db_connection).expect("Could not get user count");
        assert_eq!(1, count, "Want one user after insertion, got {count}");
    }
}
