//! A web app for tracking personal spending and income.
//!
//! Transactions are grouped into categories. The same data is served as HTML pages driven by
//! HTMX and as a JSON API, both backed by a single SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod config;
mod dashboard;
mod endpoints;
mod error;
mod fields;
mod health;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod schema;
mod session;
mod statement;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryName, NewCategory, create_category};
pub use config::Config;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use schema::initialize;
pub use transaction::{Amount, NewTransaction, Transaction, create_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
