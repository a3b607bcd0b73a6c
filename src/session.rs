//! One unit of work per request against the shared database connection.

use std::sync::Mutex;

use rusqlite::Connection;

use crate::Error;

/// Run `work` inside a single SQL transaction on the shared connection.
///
/// The transaction is committed if `work` returns `Ok` and rolled back otherwise.
/// Rollback also happens if `work` panics, since the transaction is dropped without
/// being committed. The connection lock is released on every exit path.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the connection lock is poisoned, otherwise
/// whatever error `work` or the commit produced.
pub fn run_in_session<T, F>(db_connection: &Mutex<Connection>, work: F) -> Result<T, Error>
where
    F: FnOnce(&Connection) -> Result<T, Error>,
{
    let connection = db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transaction = connection.unchecked_transaction()?;

    match work(&transaction) {
        Ok(value) => {
            transaction.commit()?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = transaction.rollback() {
                tracing::error!("could not roll back transaction: {rollback_error}");
            }

            Err(error)
        }
    }
}
