//! Defines the page and route handler for when a resource could not be found.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 404 page.
pub struct NotFoundError;

impl NotFoundError {
    pub fn into_html(self) -> Html<String> {
        Html(
            error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the home page.",
            )
            .into_string(),
        )
    }
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

/// The fallback route handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
