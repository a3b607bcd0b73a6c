//! Statements for reading and writing transactions.
//!
//! Reads join each transaction with its category so uncategorized transactions are kept.
//! See [crate::transaction::db] for running these statements.

use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    fields::format_timestamp,
    schema::TRANSACTION_COLUMNS,
    statement::Statement,
    transaction::{NewTransaction, TransactionId, TransactionUpdate},
};

/// The transaction columns followed by the joined category's name and description.
const JOINED_COLUMNS: &str = "\"transaction\".id, \"transaction\".amount, \
    \"transaction\".description, \"transaction\".date, \"transaction\".category_id, \
    \"transaction\".created_at, category.name AS category_name, \
    category.description AS category_description";

const JOINED_FROM: &str =
    "FROM \"transaction\" LEFT OUTER JOIN category ON \"transaction\".category_id = category.id";

/// Select a page of transactions, most recent first, optionally only those in `category_id`.
pub fn list_transactions(limit: i64, offset: i64, category_id: Option<CategoryId>) -> Statement {
    let mut statement = Statement::new(format!("SELECT {JOINED_COLUMNS} {JOINED_FROM}"));

    if let Some(category_id) = category_id {
        statement = statement
            .push_sql(" WHERE \"transaction\".category_id = ?")
            .bind(category_id);
    }

    // Sort by ID as well to keep the order stable for transactions on the same date.
    statement
        .push_sql(" ORDER BY \"transaction\".date DESC, \"transaction\".id DESC LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
}

/// Select the transaction with `transaction_id`.
pub fn get_transaction(transaction_id: TransactionId) -> Statement {
    Statement::new(format!(
        "SELECT {JOINED_COLUMNS} {JOINED_FROM} WHERE \"transaction\".id = ?"
    ))
    .bind(transaction_id)
}

/// Insert `new_transaction` and return the inserted row.
///
/// A transaction without a date is dated `created_at`.
///
/// # Errors
/// Returns [Error::InvalidDate] if either timestamp cannot be stored.
pub fn create_transaction(
    new_transaction: &NewTransaction,
    created_at: OffsetDateTime,
) -> Result<Statement, Error> {
    let statement = Statement::new(format!(
        "INSERT INTO \"transaction\" (amount, description, date, category_id, created_at) \
        VALUES (?, ?, ?, ?, ?) RETURNING {TRANSACTION_COLUMNS}"
    ))
    .bind(new_transaction.amount.as_f64())
    .bind(new_transaction.description.clone())
    .bind(format_timestamp(new_transaction.date.unwrap_or(created_at))?)
    .bind(new_transaction.category_id)
    .bind(format_timestamp(created_at)?);

    Ok(statement)
}

/// Update the fields set in `update` on the transaction with `transaction_id` and return
/// the updated row.
///
/// # Errors
/// Returns [Error::InvalidDate] if the new date cannot be stored.
pub fn update_transaction(
    transaction_id: TransactionId,
    update: &TransactionUpdate,
) -> Result<Statement, Error> {
    let mut assignments = Vec::new();
    let mut statement = Statement::new("");

    if let Some(amount) = update.amount {
        assignments.push("amount = ?");
        statement = statement.bind(amount.as_f64());
    }

    if let Some(description) = &update.description {
        assignments.push("description = ?");
        statement = statement.bind(description.clone());
    }

    if let Some(date) = update.date {
        assignments.push("date = ?");
        statement = statement.bind(format_timestamp(date)?);
    }

    if let Some(category_id) = update.category_id {
        assignments.push("category_id = ?");
        statement = statement.bind(category_id);
    }

    if assignments.is_empty() {
        assignments.push("id = id");
    }

    let statement = statement
        .push_sql(&format!(
            "UPDATE \"transaction\" SET {} WHERE id = ? RETURNING {TRANSACTION_COLUMNS}",
            assignments.join(", ")
        ))
        .bind(transaction_id);

    Ok(statement)
}

/// Delete the transaction with `transaction_id`.
pub fn delete_transaction(transaction_id: TransactionId) -> Statement {
    Statement::new("DELETE FROM \"transaction\" WHERE id = ?").bind(transaction_id)
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;
    use time::macros::datetime;

    use crate::transaction::{Amount, NewTransaction, TransactionUpdate};

    use super::{
        create_transaction, delete_transaction, get_transaction, list_transactions,
        update_transaction,
    };

    #[test]
    fn list_without_filter_has_no_where_clause() {
        let statement = list_transactions(100, 0, None);

        assert!(!statement.sql.contains("WHERE"));
        assert!(statement.sql.contains("LEFT OUTER JOIN category"));
        assert!(statement.sql.ends_with(
            "ORDER BY \"transaction\".date DESC, \"transaction\".id DESC LIMIT ? OFFSET ?"
        ));
        assert_eq!(statement.params, vec![Value::Integer(100), Value::Integer(0)]);
    }

    #[test]
    fn list_with_filter_binds_category_first() {
        let statement = list_transactions(10, 5, Some(3));

        assert!(statement.sql.contains("WHERE \"transaction\".category_id = ?"));
        assert_eq!(
            statement.params,
            vec![Value::Integer(3), Value::Integer(10), Value::Integer(5)]
        );
    }

    #[test]
    fn category_zero_is_a_filter() {
        let statement = list_transactions(10, 0, Some(0));

        assert!(statement.sql.contains("WHERE"));
    }

    #[test]
    fn get_transaction_binds_id() {
        let statement = get_transaction(4);

        assert!(statement.sql.ends_with("WHERE \"transaction\".id = ?"));
        assert_eq!(statement.params, vec![Value::Integer(4)]);
    }

    #[test]
    fn create_defaults_date_to_created_at() {
        let new_transaction = NewTransaction {
            amount: Amount::new(-12.5).unwrap(),
            description: None,
            date: None,
            category_id: Some(1),
        };

        let statement =
            create_transaction(&new_transaction, datetime!(2024-01-01 9:00 UTC)).unwrap();

        assert_eq!(
            statement.params,
            vec![
                Value::Real(-12.5),
                Value::Null,
                Value::Text("2024-01-01T09:00:00Z".to_owned()),
                Value::Integer(1),
                Value::Text("2024-01-01T09:00:00Z".to_owned()),
            ]
        );
    }

    #[test]
    fn update_can_clear_category() {
        let update = TransactionUpdate {
            category_id: Some(None),
            ..Default::default()
        };

        let statement = update_transaction(8, &update).unwrap();

        assert!(
            statement
                .sql
                .starts_with("UPDATE \"transaction\" SET category_id = ? WHERE id = ?")
        );
        assert_eq!(statement.params, vec![Value::Null, Value::Integer(8)]);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let statement = update_transaction(8, &TransactionUpdate::default()).unwrap();

        assert!(statement.sql.contains("SET id = id WHERE id = ?"));
    }

    #[test]
    fn delete_binds_id() {
        let statement = delete_transaction(2);

        assert_eq!(statement.sql, "DELETE FROM \"transaction\" WHERE id = ?");
        assert_eq!(statement.params, vec![Value::Integer(2)]);
    }
}
