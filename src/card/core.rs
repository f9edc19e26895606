//! Defines the core data model and database queries for credit cards.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CardId,
    user::{User, UserID},
};

// ============================================================================
// MODELS
// ============================================================================

/// A credit card registered by a user.
///
/// To create a new `CreditCard`, use [CreditCard::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    /// The ID of the credit card.
    pub id: CardId,
    /// The ID of the user that owns the card.
    pub user_id: UserID,
    /// The card network, e.g. "VISA" or "MasterCard".
    pub card_type: String,
    /// The last four digits printed on the card.
    pub last_four: String,
    /// The card's expiry, e.g. "12/26". Kept as text, as entered.
    pub expiry_date: String,
    /// The card's base reward rate, a positive per-purchase multiplier.
    pub base_reward_rate: f64,
    /// A display name the user gave the card.
    pub nickname: Option<String>,
    /// The institution that issued the card.
    pub issuer: Option<String>,
    /// A URL to the card art or issuer logo.
    pub logo_url: Option<String>,
}

impl CreditCard {
    /// Create a new credit card.
    ///
    /// Shortcut for [CardBuilder] for discoverability.
    pub fn build(
        card_type: &str,
        last_four: &str,
        expiry_date: &str,
        base_reward_rate: f64,
    ) -> CardBuilder {
        CardBuilder {
            card_type: card_type.to_owned(),
            last_four: last_four.to_owned(),
            expiry_date: expiry_date.to_owned(),
            base_reward_rate,
            nickname: None,
            issuer: None,
            logo_url: None,
        }
    }
}

/// A builder for creating [CreditCard] instances.
///
/// The required fields are set up front and validated when the card is
/// persisted; the display fields are optional.
#[derive(Debug, PartialEq, Clone)]
pub struct CardBuilder {
    /// The card network, e.g. "VISA". Must not be blank.
    pub card_type: String,
    /// The last four digits of the card. Must not be blank and must be at
    /// most four characters.
    pub last_four: String,
    /// The card's expiry as text, e.g. "12/26". Must not be blank.
    pub expiry_date: String,
    /// The card's base reward rate. Must be positive.
    pub base_reward_rate: f64,
    /// A display name for the card.
    pub nickname: Option<String>,
    /// The institution that issued the card.
    pub issuer: Option<String>,
    /// A URL to the card art or issuer logo.
    pub logo_url: Option<String>,
}

impl CardBuilder {
    /// Set the nickname for the card.
    pub fn nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_owned());
        self
    }

    /// Set the issuer for the card.
    pub fn issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_owned());
        self
    }

    /// Set the logo URL for the card.
    pub fn logo_url(mut self, logo_url: &str) -> Self {
        self.logo_url = Some(logo_url.to_owned());
        self
    }

    /// Check the declarative constraints on the card fields.
    ///
    /// # Errors
    /// Returns the first violated constraint, naming the offending field.
    fn validate(&self) -> Result<(), Error> {
        if self.card_type.trim().is_empty() {
            return Err(Error::EmptyField("cardType"));
        }

        if self.last_four.trim().is_empty() {
            return Err(Error::EmptyField("lastFour"));
        }

        if self.last_four.chars().count() > 4 {
            return Err(Error::InvalidLastFour(self.last_four.clone()));
        }

        if self.expiry_date.trim().is_empty() {
            return Err(Error::EmptyField("expiryDate"));
        }

        if self.base_reward_rate <= 0.0 {
            return Err(Error::NonPositiveRewardRate(self.base_reward_rate));
        }

        Ok(())
    }
}

/// A credit card serialized with its owning user embedded, the shape the
/// card API responds with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithUser {
    /// The ID of the credit card.
    pub id: CardId,
    /// The user that owns the card.
    pub user: User,
    /// The card network, e.g. "VISA".
    pub card_type: String,
    /// The last four digits printed on the card.
    pub last_four: String,
    /// The card's expiry as text.
    pub expiry_date: String,
    /// The card's base reward rate.
    pub base_reward_rate: f64,
    /// A display name the user gave the card.
    pub nickname: Option<String>,
    /// The institution that issued the card.
    pub issuer: Option<String>,
    /// A URL to the card art or issuer logo.
    pub logo_url: Option<String>,
}

impl CardWithUser {
    /// Combine a stored card with its owning user for serialization.
    pub fn new(card: CreditCard, user: User) -> Self {
        Self {
            id: card.id,
            user,
            card_type: card.card_type,
            last_four: card.last_four,
            expiry_date: card.expiry_date,
            base_reward_rate: card.base_reward_rate,
            nickname: card.nickname,
            issuer: card.issuer,
            logo_url: card.logo_url,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new credit card in the database from a builder.
///
/// The card's fields are validated before any row is written.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyField], [Error::InvalidLastFour], or
///   [Error::NonPositiveRewardRate] if a field constraint is violated,
/// - [Error::InvalidForeignKey] if `user_id` does not refer to a real user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_credit_card(
    builder: CardBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<CreditCard, Error> {
    builder.validate()?;

    let card = connection
        .prepare(
            "INSERT INTO credit_cards
                (user_id, card_type, last_four, expiry_date, base_reward_rate, nickname, issuer, logo_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, user_id, card_type, last_four, expiry_date, base_reward_rate, nickname, issuer, logo_url",
        )?
        .query_row(
            (
                user_id.as_i64(),
                builder.card_type,
                builder.last_four,
                builder.expiry_date,
                builder.base_reward_rate,
                builder.nickname,
                builder.issuer,
                builder.logo_url,
            ),
            map_credit_card_row,
        )?;

    Ok(card)
}

/// Retrieve a credit card from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid credit card,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_credit_card(id: CardId, connection: &Connection) -> Result<CreditCard, Error> {
    let card = connection
        .prepare(
            "SELECT id, user_id, card_type, last_four, expiry_date, base_reward_rate, nickname, issuer, logo_url
             FROM credit_cards WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_credit_card_row)?;

    Ok(card)
}

/// Retrieve the credit cards owned by `user_id`, most recently created first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_credit_cards_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CreditCard>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, card_type, last_four, expiry_date, base_reward_rate, nickname, issuer, logo_url
             FROM credit_cards WHERE user_id = :user_id ORDER BY id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_credit_card_row)?
        .map(|maybe_card| maybe_card.map_err(|error| error.into()))
        .collect()
}

/// The number of rows removed by a delete.
pub type RowsAffected = usize;

/// Delete a credit card by ID.
///
/// Deleting an ID that does not exist is not an error; the returned count is
/// zero in that case. No ownership check is performed.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_credit_card(id: CardId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM credit_cards WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the credit cards table in the database.
///
/// The table uses AUTOINCREMENT so that IDs stay monotonic across deletes and
/// "most recently created" remains equivalent to "highest ID".
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_credit_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS credit_cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                card_type TEXT NOT NULL,
                last_four TEXT NOT NULL,
                expiry_date TEXT NOT NULL,
                base_reward_rate REAL NOT NULL,
                nickname TEXT,
                issuer TEXT,
                logo_url TEXT,
                FOREIGN KEY(user_id) REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [CreditCard].
pub fn map_credit_card_row(row: &Row) -> Result<CreditCard, rusqlite::Error> {
    Ok(CreditCard {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        card_type: row.get(2)?,
        last_four: row.get(3)?,
        expiry_date: row.get(4)?,
        base_reward_rate: row.get(5)?,
        nickname: row.get(6)?,
        issuer: row.get(7)?,
        logo_url: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
