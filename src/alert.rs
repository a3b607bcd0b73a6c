//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments and swapped into the `#alert-container`
//! element of the page shell by HTMX.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An operation failed.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm rounded-lg text-red-800 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html! {
            div
                class=(container_style)
                role="alert"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }

                button
                    type="button"
                    class="mt-2 underline"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "Dismiss"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        alert::Alert,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn renders_message_and_details() {
        let alert = Alert::Error {
            message: "Could not find category".to_owned(),
            details: "Try again".to_owned(),
        };

        let response = alert.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs, vec!["Could not find category", "Try again"]);
    }
}
