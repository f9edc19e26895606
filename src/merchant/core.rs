//! Defines the core data model and database queries for merchants.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::MerchantId};

/// A validated, non-empty merchant name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct MerchantName(String);

impl MerchantName {
    /// Create a merchant name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyField] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyField("name"))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a merchant name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for MerchantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MerchantName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MerchantName::new(s)
    }
}

impl Display for MerchantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A merchant that transactions can reference (e.g. 'Amazon').
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// The ID of the merchant.
    pub id: MerchantId,
    /// The merchant's display name.
    pub name: MerchantName,
    /// A URL to the merchant's logo.
    pub logo_url: Option<String>,
    /// A free-form category, e.g. "Online Shopping".
    pub category: Option<String>,
}

/// Create a merchant and return it with its generated ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_merchant(
    name: MerchantName,
    logo_url: Option<&str>,
    category: Option<&str>,
    connection: &Connection,
) -> Result<Merchant, Error> {
    connection.execute(
        "INSERT INTO merchants (name, logo_url, category) VALUES (?1, ?2, ?3);",
        (name.as_ref(), logo_url, category),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Merchant {
        id,
        name,
        logo_url: logo_url.map(str::to_owned),
        category: category.map(str::to_owned),
    })
}

/// Retrieve a single merchant by ID.
///
/// # Errors
/// This function will return a [Error::NotFound] if `merchant_id` does not
/// refer to a valid merchant, or [Error::SqlError] for any other SQL error.
pub fn get_merchant(merchant_id: MerchantId, connection: &Connection) -> Result<Merchant, Error> {
    connection
        .prepare("SELECT id, name, logo_url, category FROM merchants WHERE id = :id;")?
        .query_row(&[(":id", &merchant_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all merchants ordered alphabetically by name.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_merchants(connection: &Connection) -> Result<Vec<Merchant>, Error> {
    connection
        .prepare("SELECT id, name, logo_url, category FROM merchants ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_merchant| maybe_merchant.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the merchants whose name contains `text`, ignoring case.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_merchants_by_name(text: &str, connection: &Connection) -> Result<Vec<Merchant>, Error> {
    connection
        .prepare(
            "SELECT id, name, logo_url, category FROM merchants
             WHERE name LIKE '%' || :text || '%' COLLATE NOCASE
             ORDER BY name ASC;",
        )?
        .query_map(&[(":text", &text)], map_row)?
        .map(|maybe_merchant| maybe_merchant.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the merchants whose category exactly matches `category`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_merchants_by_category(
    category: &str,
    connection: &Connection,
) -> Result<Vec<Merchant>, Error> {
    connection
        .prepare(
            "SELECT id, name, logo_url, category FROM merchants
             WHERE category = :category ORDER BY name ASC;",
        )?
        .query_map(&[(":category", &category)], map_row)?
        .map(|maybe_merchant| maybe_merchant.map_err(|error| error.into()))
        .collect()
}

/// Initialize the merchants table and indexes.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_merchant_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS merchants (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            logo_url TEXT,
            category TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_merchants_name ON merchants(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Merchant, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Merchant {
        id: row.get(0)?,
        name: MerchantName::new_unchecked(&raw_name),
        logo_url: row.get(2)?,
        category: row.get(3)?,
    })
}
