//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{CardId, MerchantId, TransactionId},
    user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// A purchase made by a user, optionally through a registered card at a known
/// merchant.
///
/// The four reward fields are plain storage. They are nullable, set only if a
/// client supplies them, and nothing in the application computes them.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user the purchase belongs to.
    pub user_id: UserID,
    /// The ID of the card the purchase was made with, if recorded.
    pub card_id: Option<CardId>,
    /// The ID of the merchant the purchase was made at, if recorded.
    pub merchant_id: Option<MerchantId>,
    /// The amount of money spent.
    pub amount: f64,
    /// When the purchase happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Total reward points for the purchase, if recorded.
    pub reward_points: Option<f64>,
    /// Card-level reward points for the purchase, if recorded.
    pub card_reward_points: Option<f64>,
    /// Company-level reward points for the purchase, if recorded.
    pub company_reward_points: Option<f64>,
    /// Whether the purchase used the best available card, if recorded.
    pub is_optimal: Option<bool>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            card_id: None,
            merchant_id: None,
            reward_points: None,
            card_reward_points: None,
            company_reward_points: None,
            is_optimal: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The amount and date are set up front; every other field is optional and
/// defaults to unset.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent. Must be positive.
    pub amount: f64,
    /// When the purchase happened.
    pub date: OffsetDateTime,
    /// The ID of the card the purchase was made with.
    pub card_id: Option<CardId>,
    /// The ID of the merchant the purchase was made at.
    pub merchant_id: Option<MerchantId>,
    /// Total reward points, stored as given.
    pub reward_points: Option<f64>,
    /// Card-level reward points, stored as given.
    pub card_reward_points: Option<f64>,
    /// Company-level reward points, stored as given.
    pub company_reward_points: Option<f64>,
    /// Whether the purchase used the best available card, stored as given.
    pub is_optimal: Option<bool>,
}

impl TransactionBuilder {
    /// Set the card the purchase was made with.
    pub fn card_id(mut self, card_id: Option<CardId>) -> Self {
        self.card_id = card_id;
        self
    }

    /// Set the merchant the purchase was made at.
    pub fn merchant_id(mut self, merchant_id: Option<MerchantId>) -> Self {
        self.merchant_id = merchant_id;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// The amount is validated before any row is written.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or less,
/// - [Error::InvalidForeignKey] if `user_id`, the card, or the merchant does
///   not refer to a real record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount <= 0.0 {
        return Err(Error::NonPositiveAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO transactions
                (user_id, card_id, merchant_id, amount, date,
                 reward_points, card_reward_points, company_reward_points, is_optimal)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             RETURNING id, user_id, card_id, merchant_id, amount, date,
                 reward_points, card_reward_points, company_reward_points, is_optimal",
        )?
        .query_row(
            (
                user_id.as_i64(),
                builder.card_id,
                builder.merchant_id,
                builder.amount,
                builder.date,
                builder.reward_points,
                builder.card_reward_points,
                builder.company_reward_points,
                builder.is_optimal,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, user_id, card_id, merchant_id, amount, date,
                 reward_points, card_reward_points, company_reward_points, is_optimal
             FROM transactions WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve the transactions belonging to `user_id`, newest first.
///
/// Ties on equal timestamps break by descending ID so the order stays stable.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, card_id, merchant_id, amount, date,
                 reward_points, card_reward_points, company_reward_points, is_optimal
             FROM transactions WHERE user_id = ?1
             ORDER BY date DESC, id DESC",
        )?
        .query_map([user_id.as_i64()], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the transactions belonging to `user_id` whose timestamp falls in
/// the inclusive range `[start, end]`, newest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_user_in_range(
    user_id: UserID,
    start: OffsetDateTime,
    end: OffsetDateTime,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, card_id, merchant_id, amount, date,
                 reward_points, card_reward_points, company_reward_points, is_optimal
             FROM transactions WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY date DESC, id DESC",
        )?
        .query_map((user_id.as_i64(), start, end), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Create the transactions table in the database.
///
/// The table uses AUTOINCREMENT so that IDs stay monotonic across deletes.
/// Deleting a referenced card or merchant clears the reference instead of
/// dropping the purchase history.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                card_id INTEGER,
                merchant_id INTEGER,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                reward_points REAL,
                card_reward_points REAL,
                company_reward_points REAL,
                is_optimal INTEGER,
                FOREIGN KEY(user_id) REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(card_id) REFERENCES credit_cards(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(merchant_id) REFERENCES merchants(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);",
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        card_id: row.get(2)?,
        merchant_id: row.get(3)?,
        amount: row.get(4)?,
        date: row.get(5)?,
        reward_points: row.get(6)?,
        card_reward_points: row.get(7)?,
        company_reward_points: row.get(8)?,
        is_optimal: row.get(9)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        card::{CreditCard, create_credit_card},
        db::initialize,
        merchant::{MerchantName, create_merchant},
        user::{NewUser, User, UserID, create_user},
    };

    use super::{
        Transaction, create_transaction, get_transaction, get_transactions_by_user,
        get_transactions_by_user_in_range,
    };

    fn get_test_connection_and_user() -> (Connection, User) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let user = create_user(
            NewUser {
                username: "testuser".to_string(),
                password: "password123".to_string(),
                email: "user@example.com".to_string(),
            },
            &conn,
        )
        .unwrap();

        (conn, user)
    }

    #[test]
    fn create_then_get_round_trips() {
        let (conn, user) = get_test_connection_and_user();
        let card = create_credit_card(
            CreditCard::build("VISA", "1234", "12/26", 1.0),
            user.id,
            &conn,
        )
        .unwrap();
        let merchant = create_merchant(
            MerchantName::new_unchecked("Amazon"),
            None,
            Some("Online Shopping"),
            &conn,
        )
        .unwrap();

        let created = create_transaction(
            Transaction::build(42.5, datetime!(2026-08-01 12:00 UTC))
                .card_id(Some(card.id))
                .merchant_id(Some(merchant.id)),
            user.id,
            &conn,
        )
        .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.reward_points, None);
        assert_eq!(created.is_optimal, None);

        let fetched = get_transaction(created.id, &conn).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn create_fails_on_non_positive_amount() {
        let (conn, user) = get_test_connection_and_user();

        for amount in [0.0, -5.0] {
            let result = create_transaction(
                Transaction::build(amount, datetime!(2026-08-01 12:00 UTC)),
                user.id,
                &conn,
            );

            assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
        }

        assert_eq!(get_transactions_by_user(user.id, &conn).unwrap(), []);
    }

    #[test]
    fn create_fails_on_invalid_user() {
        let (conn, user) = get_test_connection_and_user();

        let result = create_transaction(
            Transaction::build(10.0, datetime!(2026-08-01 12:00 UTC)),
            UserID::new(user.id.as_i64() + 1),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidForeignKey));
    }

    #[test]
    fn create_fails_on_invalid_card() {
        let (conn, user) = get_test_connection_and_user();

        let result = create_transaction(
            Transaction::build(10.0, datetime!(2026-08-01 12:00 UTC)).card_id(Some(42)),
            user.id,
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidForeignKey));
    }

    #[test]
    fn transactions_are_listed_newest_first() {
        let (conn, user) = get_test_connection_and_user();

        let dates = [
            datetime!(2026-08-01 09:00 UTC),
            datetime!(2026-08-03 09:00 UTC),
            datetime!(2026-08-02 09:00 UTC),
        ];
        for (i, date) in dates.into_iter().enumerate() {
            create_transaction(Transaction::build((i + 1) as f64, date), user.id, &conn).unwrap();
        }

        let transactions = get_transactions_by_user(user.id, &conn).unwrap();

        assert_eq!(transactions.len(), 3);
        assert!(
            transactions
                .windows(2)
                .all(|pair| pair[0].date >= pair[1].date),
            "want newest first, got {:?}",
            transactions
                .iter()
                .map(|transaction| transaction.date)
                .collect::<Vec<_>>()
        );
        assert_eq!(transactions[0].date, datetime!(2026-08-03 09:00 UTC));
    }

    #[test]
    fn range_query_is_inclusive_and_newest_first() {
        let (conn, user) = get_test_connection_and_user();

        for day in 1i64..=5 {
            create_transaction(
                Transaction::build(
                    day as f64,
                    datetime!(2026-08-01 12:00 UTC) + time::Duration::days(day - 1),
                ),
                user.id,
                &conn,
            )
            .unwrap();
        }

        let start = datetime!(2026-08-02 12:00 UTC);
        let end = datetime!(2026-08-04 12:00 UTC);

        let transactions = get_transactions_by_user_in_range(user.id, start, end, &conn).unwrap();

        assert_eq!(transactions.len(), 3, "BETWEEN bounds are inclusive");
        assert_eq!(transactions[0].date, end);
        assert_eq!(transactions[2].date, start);
        assert!(
            transactions
                .iter()
                .all(|transaction| start <= transaction.date && transaction.date <= end)
        );
    }

    #[test]
    fn range_query_excludes_other_users() {
        let (conn, user) = get_test_connection_and_user();
        let other_user = create_user(
            NewUser {
                username: "otheruser".to_string(),
                password: "hunter2".to_string(),
                email: "other@example.com".to_string(),
            },
            &conn,
        )
        .unwrap();

        let date = datetime!(2026-08-02 12:00 UTC);
        create_transaction(Transaction::build(1.0, date), user.id, &conn).unwrap();
        create_transaction(Transaction::build(2.0, date), other_user.id, &conn).unwrap();

        let transactions = get_transactions_by_user_in_range(
            user.id,
            date - time::Duration::days(1),
            date + time::Duration::days(1),
            &conn,
        )
        .unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].user_id, user.id);
    }

    #[test]
    fn reward_fields_are_stored_verbatim() {
        let (conn, user) = get_test_connection_and_user();

        let mut builder = Transaction::build(100.0, datetime!(2026-08-01 12:00 UTC));
        builder.reward_points = Some(1.5);
        builder.card_reward_points = Some(1.0);
        builder.company_reward_points = Some(0.5);
        builder.is_optimal = Some(true);

        let transaction = create_transaction(builder, user.id, &conn).unwrap();

        let fetched = get_transaction(transaction.id, &conn).unwrap();
        assert_eq!(fetched.reward_points, Some(1.5));
        assert_eq!(fetched.card_reward_points, Some(1.0));
        assert_eq!(fetched.company_reward_points, Some(0.5));
        assert_eq!(fetched.is_optimal, Some(true));
    }
}
