//! The database tables for categories and transactions.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// The category columns in table order, for use in `SELECT` and `RETURNING` clauses.
pub const CATEGORY_COLUMNS: &str = "id, name, description, created_at";

/// The transaction columns in table order, for use in `SELECT` and `RETURNING` clauses.
pub const TRANSACTION_COLUMNS: &str = "id, amount, description, date, category_id, created_at";

/// Create the category table and its indexes if they do not exist.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

/// Create the transaction table and its indexes if they do not exist.
///
/// Deleting a category sets `category_id` to `NULL` for its transactions.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            description TEXT,
            date TEXT NOT NULL,
            category_id INTEGER,
            created_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date_category
            ON \"transaction\"(date, category_id);",
    )?;

    Ok(())
}

/// Create all of the tables for the application.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Must be set outside of a transaction, SQLite ignores it otherwise.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
