//! Defines the app level error type and conversions to rendered HTML pages, alerts and JSON.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    alert::Alert, category::CategoryId, internal_server_error::InternalServerError,
    not_found::NotFoundError, transaction::TransactionId,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// No category exists with the given ID.
    #[error("category {0} could not be found")]
    CategoryNotFound(CategoryId),

    /// No transaction exists with the given ID.
    #[error("transaction {0} could not be found")]
    TransactionNotFound(TransactionId),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A transaction amount of zero was given.
    ///
    /// A transaction must either spend or earn money, so zero is meaningless.
    #[error("Amount cannot be zero")]
    ZeroAmount,

    /// The date string could not be parsed as a date or date-time.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The category ID used for a transaction did not match a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// A category with the same name already exists in the database.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategoryName(String::new())
            }
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Error::InvalidCategory(None)
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::CategoryNotFound(_) | Error::TransactionNotFound(_) => {
                NotFoundError.into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// The status code to report for this error to an API or HTMX client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::CategoryNotFound(_) | Error::TransactionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Error::EmptyCategoryName
            | Error::ZeroAmount
            | Error::InvalidDate(_)
            | Error::InvalidCategory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::DuplicateCategoryName(_) => StatusCode::CONFLICT,
            Error::DatabaseLockError | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as an alert fragment for HTMX requests.
    pub(crate) fn into_alert_response(self) -> Response {
        let status_code = self.status_code();

        let alert = match self {
            Error::CategoryNotFound(_) => Alert::Error {
                message: "Could not find category".to_owned(),
                details: "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted."
                    .to_owned(),
            },
            Error::TransactionNotFound(_) => Alert::Error {
                message: "Could not find transaction".to_owned(),
                details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            },
            Error::InvalidCategory(category_id) => Alert::Error {
                message: "Invalid category".to_owned(),
                details: match category_id {
                    Some(id) => format!("Could not find a category with the ID {id}."),
                    None => "The selected category does not exist.".to_owned(),
                },
            },
            Error::DuplicateCategoryName(name) => Alert::Error {
                message: "Duplicate category name".to_owned(),
                details: format!(
                    "The category \"{name}\" already exists. \
                    Choose a different name, or edit the existing category."
                ),
            },
            error @ (Error::EmptyCategoryName | Error::ZeroAmount | Error::InvalidDate(_)) => {
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: error.to_string(),
                }
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

/// An [Error] returned from a JSON endpoint.
///
/// Renders as `{"detail": "..."}` with the status code from [Error::status_code].
#[derive(Debug, PartialEq)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

#[derive(Serialize)]
struct ApiErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();

        let detail = match self.0 {
            Error::NotFound => "Not found".to_owned(),
            Error::CategoryNotFound(_) => "Category not found".to_owned(),
            Error::TransactionNotFound(_) => "Transaction not found".to_owned(),
            Error::DatabaseLockError | Error::SqlError(_) => {
                tracing::error!("An unexpected error occurred: {}", self.0);
                "Internal server error".to_owned()
            }
            error => error.to_string(),
        };

        (status_code, Json(ApiErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        Error,
        error::ApiError,
        test_utils::{get_header, parse_json},
    };

    #[test]
    fn maps_no_rows_to_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn maps_unique_category_name_violation() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "CREATE TABLE category (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
                INSERT INTO category (name) VALUES ('Food');",
            )
            .unwrap();

        let error = connection
            .execute("INSERT INTO category (name) VALUES ('Food')", ())
            .map_err(Error::from)
            .unwrap_err();

        assert!(
            matches!(error, Error::DuplicateCategoryName(_)),
            "want duplicate category name error, got {error:?}"
        );
    }

    #[tokio::test]
    async fn api_error_reports_not_found_detail() {
        let response = ApiError(Error::CategoryNotFound(3)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(get_header(&response, "content-type"), "application/json");
        let body = parse_json(response).await;
        assert_eq!(body["detail"], "Category not found");
    }

    #[tokio::test]
    async fn api_error_hides_sql_details() {
        let response =
            ApiError(Error::SqlError(rusqlite::Error::InvalidQuery)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_json(response).await;
        assert_eq!(body["detail"], "Internal server error");
    }

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(
            Error::ZeroAmount.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::EmptyCategoryName.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::DuplicateCategoryName("Food".to_owned()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
