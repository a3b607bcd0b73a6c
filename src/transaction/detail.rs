//! Transaction detail page and the endpoint for editing a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
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
    fields::format_datetime_input,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, form_error_message,
        format_currency,
    },
    navigation::NavBar,
    session::run_in_session,
    transaction::{
        TransactionFormData, TransactionId, TransactionUpdate, TransactionWithCategory,
        create::transaction_form_fields, get_transaction, update_transaction,
    },
};

/// The state needed for the transaction detail page.
#[derive(Debug, Clone)]
pub struct TransactionPageState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the detail page for a transaction, including a form for editing it.
pub async fn get_transaction_page(
    State(state): State<TransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let (transaction, categories) = run_in_session(&state.db_connection, |connection| {
        let transaction = get_transaction(transaction_id, connection)?
            .ok_or(Error::TransactionNotFound(transaction_id))?;
        let categories = list_all_categories(connection)?;

        Ok((transaction, categories))
    })
    .inspect_err(|error| {
        tracing::error!("Failed to retrieve transaction {transaction_id}: {error}")
    })?;

    Ok(transaction_view(&transaction, &categories, &state.app_name).into_response())
}

/// Handle the transaction edit form submission.
///
/// Every field is replaced with the submitted value. Redirects to the transactions page on
/// success.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionEndpointState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let parsed = match form.parse() {
        Ok(parsed) => parsed,
        Err(error_message) => {
            return match run_in_session(&state.db_connection, list_all_categories) {
                Ok(categories) => {
                    edit_transaction_form_view(transaction_id, &form, &categories, &error_message)
                        .into_response()
                }
                Err(error) => error.into_alert_response(),
            };
        }
    };

    let update = TransactionUpdate {
        amount: Some(parsed.amount),
        description: Some(parsed.description),
        date: parsed.date,
        category_id: Some(parsed.category_id),
    };

    let result = run_in_session(&state.db_connection, |connection| {
        update_transaction(transaction_id, &update, connection)?
            .ok_or(Error::TransactionNotFound(transaction_id))
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::NO_CONTENT,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");

            error.into_alert_response()
        }
    }
}

fn transaction_view(
    with_category: &TransactionWithCategory,
    categories: &[Category],
    app_name: &str,
) -> Markup {
    let transaction = &with_category.transaction;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, app_name).into_html();
    let transaction_url = endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
    let form = edit_transaction_form_view(
        transaction.id,
        &TransactionFormData {
            amount: transaction.amount.to_string(),
            description: transaction.description.clone(),
            date: format_datetime_input(transaction.date),
            category_id: transaction.category_id,
        },
        categories,
        "",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            header class="w-full mb-4 space-y-1"
            {
                h1 class="text-xl font-bold"
                {
                    (format_currency(transaction.amount))
                    @if let Some(category) = &with_category.category {
                        " in " (category.name)
                    }
                }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Recorded " (transaction.created_at.date())
                }
            }

            (form)

            button
                type="button"
                hx-delete=(transaction_url)
                hx-confirm="Are you sure you want to delete this transaction?"
                hx-target-error="#alert-container"
                class={ "mt-6 " (BUTTON_DELETE_STYLE) }
            {
                "Delete Transaction"
            }
        }
    };

    base(&format!("Transaction #{}", transaction.id), &content)
}

fn edit_transaction_form_view(
    transaction_id: TransactionId,
    form: &TransactionFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let transaction_url = endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, transaction_id);

    html! {
        form
            hx-put=(transaction_url)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (transaction_form_fields(form, categories))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
        }
    }
}
