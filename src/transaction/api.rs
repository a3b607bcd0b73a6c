//! JSON endpoints for transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::CategoryId,
    error::ApiError,
    fields::DEFAULT_LIMIT,
    session::run_in_session,
    transaction::{
        NewTransaction, Transaction, TransactionId, TransactionUpdate, TransactionWithCategory,
        create_transaction, delete_transaction, get_transaction, list_transactions,
        update_transaction,
    },
};

/// The state needed for the transaction JSON endpoints.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Only list transactions in this category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// The response body for a successful deletion.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteTransactionResponse {
    pub message: String,
}

/// List transactions with their categories, most recent first.
pub async fn list_transactions_api(
    State(state): State<TransactionApiState>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<Vec<TransactionWithCategory>>, ApiError> {
    let transactions = run_in_session(&state.db_connection, |connection| {
        list_transactions(params.limit, params.offset, params.category_id, connection)
    })?;

    Ok(Json(transactions))
}

/// Get a single transaction with its category.
pub async fn get_transaction_api(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionWithCategory>, ApiError> {
    run_in_session(&state.db_connection, |connection| {
        get_transaction(transaction_id, connection)?
            .ok_or(Error::TransactionNotFound(transaction_id))
    })
    .map(Json)
    .map_err(ApiError)
}

/// Create a transaction.
pub async fn create_transaction_api(
    State(state): State<TransactionApiState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = run_in_session(&state.db_connection, |connection| {
        create_transaction(&new_transaction, connection)
    })
    .inspect_err(|error| tracing::error!("Could not create transaction: {error}"))?;

    Ok(Json(transaction))
}

/// Update the fields given in the request body on a transaction.
pub async fn update_transaction_api(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, ApiError> {
    run_in_session(&state.db_connection, |connection| {
        update_transaction(transaction_id, &update, connection)?
            .ok_or(Error::TransactionNotFound(transaction_id))
    })
    .map(Json)
    .map_err(ApiError)
}

/// Delete a transaction.
pub async fn delete_transaction_api(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<DeleteTransactionResponse>, ApiError> {
    let deleted = run_in_session(&state.db_connection, |connection| {
        delete_transaction(transaction_id, connection)
    })?;

    if !deleted {
        return Err(Error::TransactionNotFound(transaction_id).into());
    }

    Ok(Json(DeleteTransactionResponse {
        message: "Transaction deleted successfully".to_owned(),
    }))
}
