//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// Database identifier for a credit card.
pub type CardId = i64;
/// Database identifier for a merchant.
pub type MerchantId = i64;
/// Database identifier for a transaction.
pub type TransactionId = i64;
