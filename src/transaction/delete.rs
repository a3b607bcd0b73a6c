//! Transaction deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    session::run_in_session,
    transaction::{TransactionId, delete_transaction},
};

/// The state needed for deleting a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle transaction deletion. Redirects to the transactions page, or returns an error alert.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionEndpointState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let result = run_in_session(&state.db_connection, |connection| {
        delete_transaction(transaction_id, connection)
    });

    match result {
        Ok(true) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::NO_CONTENT,
        )
            .into_response(),
        Ok(false) => Error::TransactionNotFound(transaction_id).into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
