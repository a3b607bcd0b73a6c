//! Database operations for transactions.

use rusqlite::Connection;

use crate::{
    Error,
    category::CategoryId,
    fields::now,
    transaction::{
        NewTransaction, Transaction, TransactionId, TransactionUpdate, TransactionWithCategory,
        mapper::{into_transaction_with_category, map_transaction_row, read_transaction_row},
        query,
    },
};

/// Retrieve a page of transactions with their categories, most recent first.
///
/// If `category_id` is given, only transactions in that category are returned.
pub fn list_transactions(
    limit: i64,
    offset: i64,
    category_id: Option<CategoryId>,
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    let rows = query::list_transactions(limit, offset, category_id)
        .query_all(connection, read_transaction_row)?;

    Ok(rows.into_iter().map(into_transaction_with_category).collect())
}

/// Retrieve a transaction with its category, or `None` if it does not exist.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Option<TransactionWithCategory>, Error> {
    let row = query::get_transaction(transaction_id)
        .query_optional(connection, read_transaction_row)?;

    Ok(row.map(into_transaction_with_category))
}

/// Create a transaction and return it with its generated ID and creation time.
///
/// # Errors
/// Returns [Error::InvalidCategory] if `category_id` does not refer to a category.
pub fn create_transaction(
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    query::create_transaction(new_transaction, now())?
        .query_one(connection, map_transaction_row)
        .map_err(|error| with_category_id(error, new_transaction.category_id))
}

/// Update the fields set in `update` and return the updated transaction, or `None` if the
/// transaction does not exist.
///
/// # Errors
/// Returns [Error::InvalidCategory] if the new `category_id` does not refer to a category.
pub fn update_transaction(
    transaction_id: TransactionId,
    update: &TransactionUpdate,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    query::update_transaction(transaction_id, update)?
        .query_optional(connection, map_transaction_row)
        .map_err(|error| with_category_id(error, update.category_id.flatten()))
}

/// Delete a transaction by ID. Returns whether a transaction was deleted.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<bool, Error> {
    let rows_affected = query::delete_transaction(transaction_id).execute(connection)?;

    Ok(rows_affected > 0)
}

fn with_category_id(error: Error, category_id: Option<CategoryId>) -> Error {
    match error {
        Error::InvalidCategory(None) => Error::InvalidCategory(category_id),
        error => error,
    }
}
