//! Transaction creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, list_all_categories},
    endpoints,
    fields::{format_datetime_input, now},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    session::run_in_session,
    transaction::{TransactionFormData, create_transaction},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for recording a new transaction.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    let categories = run_in_session(&state.db_connection, list_all_categories)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(new_transaction_view(&categories, &state.app_name).into_response())
}

/// Handle transaction creation form submission.
///
/// Redirects to the transactions page on success. Invalid input re-renders the form with an
/// error message.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionEndpointState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let new_transaction = match form.parse() {
        Ok(new_transaction) => new_transaction,
        Err(error_message) => {
            let categories = match run_in_session(&state.db_connection, list_all_categories) {
                Ok(categories) => categories,
                Err(error) => return error.into_alert_response(),
            };

            return new_transaction_form_view(&form, &categories, &error_message).into_response();
        }
    };

    match run_in_session(&state.db_connection, |connection| {
        create_transaction(&new_transaction, connection)
    }) {
        Ok(transaction) => {
            tracing::info!("Created transaction {}", transaction.id);

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::NO_CONTENT,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");

            error.into_alert_response()
        }
    }
}

fn new_transaction_view(categories: &[Category], app_name: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, app_name).into_html();
    let form = new_transaction_form_view(
        &TransactionFormData {
            amount: String::new(),
            description: None,
            date: format_datetime_input(now()),
            category_id: None,
        },
        categories,
        "",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="w-full mb-4 text-xl font-bold" { "Record Transaction" }

            (form)
        }
    };

    base("Record Transaction", &content)
}

fn new_transaction_form_view(
    form: &TransactionFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_VIEW)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (transaction_form_fields(form, categories))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Transaction" }
        }
    }
}

/// The inputs shared by the create and edit transaction forms.
pub(super) fn transaction_form_fields(
    form: &TransactionFormData,
    categories: &[Category],
) -> Markup {
    html! {
        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                id="amount"
                type="number"
                name="amount"
                step="0.01"
                placeholder="-12.50"
                value=(form.amount)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);

            small class="block mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "Use a negative amount for spending and a positive amount for income."
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date (UTC)" }

            input
                id="date"
                type="datetime-local"
                name="date"
                step="1"
                value=(form.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                id="description"
                type="text"
                name="description"
                placeholder="Optional description"
                value=(form.description.as_deref().unwrap_or_default())
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category_id" name="category_id" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[form.category_id.is_none()] { "Uncategorized" }

                @for category in categories {
                    option
                        value=(category.id)
                        selected[form.category_id == Some(category.id)]
                    {
                        (category.name)
                    }
                }
            }
        }
    }
}
