//! Conversion from joined transaction rows to [TransactionWithCategory].
//!
//! Reading the columns from a [Row] is kept apart from building the nested category so the
//! latter can be tested with hand-made rows.

use rusqlite::Row;

use crate::{
    category::{Category, CategoryName},
    fields::read_timestamp,
    transaction::{Transaction, TransactionWithCategory},
};

/// The category columns from the outer join in a transaction query.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinedCategory {
    /// The join matched a category.
    Present {
        name: String,
        description: Option<String>,
    },
    /// The transaction is uncategorized.
    Absent,
}

impl JoinedCategory {
    /// A category is present only if the joined name is present and non-empty.
    pub fn from_columns(name: Option<String>, description: Option<String>) -> Self {
        match name {
            Some(name) if !name.is_empty() => JoinedCategory::Present { name, description },
            _ => JoinedCategory::Absent,
        }
    }
}

/// One row of a transaction query joined with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub category: JoinedCategory,
}

/// Map a row with the columns in [crate::schema::TRANSACTION_COLUMNS] to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: read_timestamp(row, 3)?,
        category_id: row.get(4)?,
        created_at: read_timestamp(row, 5)?,
    })
}

/// Read the transaction columns followed by the joined category name and description.
pub fn read_transaction_row(row: &Row) -> Result<TransactionRow, rusqlite::Error> {
    let transaction = map_transaction_row(row)?;
    let category = JoinedCategory::from_columns(row.get(6)?, row.get(7)?);

    Ok(TransactionRow {
        transaction,
        category,
    })
}

/// Nest the joined category, if any, inside the transaction.
///
/// The nested category takes its ID from the transaction's `category_id` and its
/// `created_at` from the transaction, since the category's own creation time is not
/// part of the join.
pub fn into_transaction_with_category(row: TransactionRow) -> TransactionWithCategory {
    let TransactionRow {
        transaction,
        category,
    } = row;

    let category = match (category, transaction.category_id) {
        (JoinedCategory::Present { name, description }, Some(category_id)) => Some(Category {
            id: category_id,
            name: CategoryName::new_unchecked(&name),
            description,
            created_at: transaction.created_at,
        }),
        _ => None,
    };

    TransactionWithCategory {
        transaction,
        category,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::Transaction;

    use super::{JoinedCategory, TransactionRow, into_transaction_with_category};

    fn transaction(category_id: Option<i64>) -> Transaction {
        Transaction {
            id: 10,
            amount: -42.0,
            description: Some("Weekly shop".to_owned()),
            date: datetime!(2024-02-01 0:00 UTC),
            category_id,
            created_at: datetime!(2024-02-02 8:30 UTC),
        }
    }

    #[test]
    fn nests_present_category() {
        let row = TransactionRow {
            transaction: transaction(Some(3)),
            category: JoinedCategory::from_columns(
                Some("Groceries".to_owned()),
                Some("Food shopping".to_owned()),
            ),
        };

        let got = into_transaction_with_category(row);

        let category = got.category.expect("want nested category");
        assert_eq!(category.id, 3);
        assert_eq!(category.name.as_ref(), "Groceries");
        assert_eq!(category.description, Some("Food shopping".to_owned()));
        assert_eq!(category.created_at, got.transaction.created_at);
        assert_eq!(got.transaction, transaction(Some(3)));
    }

    #[test]
    fn missing_name_means_no_category() {
        let row = TransactionRow {
            transaction: transaction(None),
            category: JoinedCategory::from_columns(None, None),
        };

        let got = into_transaction_with_category(row);

        assert_eq!(got.category, None);
    }

    #[test]
    fn empty_name_means_no_category() {
        assert_eq!(
            JoinedCategory::from_columns(Some(String::new()), Some("ignored".to_owned())),
            JoinedCategory::Absent
        );

        let got = into_transaction_with_category(TransactionRow {
            transaction: transaction(Some(3)),
            category: JoinedCategory::Absent,
        });

        assert_eq!(got.category, None);
    }
}
