//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryId, delete_category},
    endpoints,
    session::run_in_session,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle category deletion. Redirects to the categories page, or returns an error alert.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryEndpointState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    let result = run_in_session(&state.db_connection, |connection| {
        delete_category(category_id, connection)
    });

    match result {
        Ok(true) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::NO_CONTENT,
        )
            .into_response(),
        Ok(false) => Error::CategoryNotFound(category_id).into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
