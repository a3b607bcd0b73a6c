//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryId},
    fields::{deserialize_optional_timestamp, deserialize_some, non_empty, parse_timestamp},
};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// A non-zero amount of money.
///
/// Positive values are income, negative values are spending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::ZeroAmount] if `amount` is zero.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount == 0.0 {
            Err(Error::ZeroAmount)
        } else {
            Ok(Self(amount))
        }
    }

    /// The amount as a plain number.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent (negative) or earned (positive).
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction along with a summary of its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The category of the transaction.
    ///
    /// `created_at` holds the transaction's creation time, not the category's.
    pub category: Option<Category>,
}

/// The data needed to create a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent (negative) or earned (positive).
    pub amount: Amount,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
    /// When the transaction happened. Defaults to the time it is recorded.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date: Option<OffsetDateTime>,
    /// The category the transaction belongs to, if any.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// The fields to change on a transaction.
///
/// A field that is `None` is left unchanged. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category_id: Option<Option<CategoryId>>,
}

/// Form data for transaction creation and editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFormData {
    pub amount: String,
    pub description: Option<String>,
    pub date: String,
    pub category_id: Option<CategoryId>,
}

impl TransactionFormData {
    /// Validate the form and convert it into a [NewTransaction].
    ///
    /// # Errors
    /// Returns the message to show under the form if the amount is not a non-zero number
    /// or the date cannot be read.
    pub fn parse(&self) -> Result<NewTransaction, String> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| "Error: Amount must be a number".to_owned())?;
        let amount = Amount::new(amount).map_err(|error| format!("Error: {error}"))?;
        let date = parse_timestamp(&self.date).map_err(|error| format!("Error: {error}"))?;

        Ok(NewTransaction {
            amount,
            description: non_empty(self.description.clone()),
            date: Some(date),
            category_id: self.category_id,
        })
    }
}


#[cfg(test)]
mod new_transaction_tests {
    use time::macros::datetime;

    use crate::transaction::{NewTransaction, TransactionFormData, TransactionUpdate};

    #[test]
    fn deserializes_date_only_input() {
        let new_transaction: NewTransaction =
            serde_json::from_str(r#"{"amount": -12.5, "category_id": 1, "date": "2024-01-01"}"#)
                .unwrap();

        assert_eq!(new_transaction.amount.as_f64(), -12.5);
        assert_eq!(new_transaction.date, Some(datetime!(2024-01-01 0:00 UTC)));
        assert_eq!(new_transaction.category_id, Some(1));
        assert_eq!(new_transaction.description, None);
    }

    #[test]
    fn date_is_optional() {
        let new_transaction: NewTransaction = serde_json::from_str(r#"{"amount": 3}"#).unwrap();

        assert_eq!(new_transaction.date, None);
    }

    #[test]
    fn null_category_clears_it() {
        let update: TransactionUpdate = serde_json::from_str(r#"{"category_id": null}"#).unwrap();

        assert_eq!(update.category_id, Some(None));
        assert_eq!(update.amount, None);
    }

    #[test]
    fn form_rejects_zero_amount() {
        let form = TransactionFormData {
            amount: "0".to_owned(),
            description: None,
            date: "2024-01-01".to_owned(),
            category_id: None,
        };

        assert_eq!(form.parse(), Err("Error: Amount cannot be zero".to_owned()));
    }

    #[test]
    fn form_rejects_non_numeric_amount() {
        let form = TransactionFormData {
            amount: "twelve".to_owned(),
            description: None,
            date: "2024-01-01".to_owned(),
            category_id: None,
        };

        assert_eq!(form.parse(), Err("Error: Amount must be a number".to_owned()));
    }

    #[test]
    fn form_parses_valid_input() {
        let form = TransactionFormData {
            amount: "-12.50".to_owned(),
            description: Some("Lunch".to_owned()),
            date: "2024-01-01".to_owned(),
            category_id: Some(2),
        };

        let new_transaction = form.parse().unwrap();

        assert_eq!(new_transaction.amount.as_f64(), -12.5);
        assert_eq!(new_transaction.description, Some("Lunch".to_owned()));
        assert_eq!(new_transaction.date, Some(datetime!(2024-01-01 0:00 UTC)));
        assert_eq!(new_transaction.category_id, Some(2));
    }
}
