//! Transactions listing page with a category filter.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, list_all_categories},
    endpoints,
    fields::DEFAULT_LIMIT,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    session::run_in_session,
    transaction::{TransactionWithCategory, list_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The category filter for the transactions page.
///
/// An empty `category_id`, as sent by the "All categories" option, shows every transaction.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub category_id: Option<CategoryId>,
}

/// Render the most recent transactions, optionally only those in one category.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Response, Error> {
    let (transactions, categories) = run_in_session(&state.db_connection, |connection| {
        let transactions = list_transactions(DEFAULT_LIMIT, 0, filter.category_id, connection)?;
        let categories = list_all_categories(connection)?;

        Ok((transactions, categories))
    })
    .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    Ok(transactions_view(
        &transactions,
        &categories,
        filter.category_id,
        &state.app_name,
    )
    .into_response())
}

fn category_filter_view(categories: &[Category], selected: Option<CategoryId>) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex items-end gap-2"
        {
            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category_id"
                    name="category_id"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected.is_none()] { "All categories" }

                    @for category in categories {
                        option
                            value=(category.id)
                            selected[selected == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            noscript
            {
                button type="submit" class=(LINK_STYLE) { "Filter" }
            }
        }
    }
}

/// The date, description, amount and category cells for a transaction table row.
pub(crate) fn transaction_cells_view(with_category: &TransactionWithCategory) -> Markup {
    let transaction = &with_category.transaction;
    let transaction_url = endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
    let amount_style = if transaction.amount < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        td class=(TABLE_CELL_STYLE)
        {
            time datetime=(transaction.date.date()) { (transaction.date.date()) }
        }

        td class=(TABLE_CELL_STYLE)
        {
            a href=(transaction_url) class=(LINK_STYLE)
            {
                (transaction.description.as_deref().unwrap_or("No description"))
            }
        }

        td class={ (TABLE_CELL_STYLE) " " (amount_style) }
        {
            (format_currency(transaction.amount))
        }

        td class=(TABLE_CELL_STYLE)
        {
            @match &with_category.category {
                Some(category) => {
                    a
                        href=(endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category.id))
                        class=(CATEGORY_BADGE_STYLE)
                    {
                        (category.name)
                    }
                }
                None => {
                    span class="text-gray-400" { "Uncategorized" }
                }
            }
        }
    }
}

fn transactions_view(
    transactions: &[TransactionWithCategory],
    categories: &[Category],
    selected_category: Option<CategoryId>,
    app_name: &str,
) -> Markup {
    let new_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, app_name).into_html();

    let actions = |with_category: &TransactionWithCategory| {
        let transaction_url =
            endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, with_category.transaction.id);

        html! {
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(transaction_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(transaction_url)
                        hx-confirm="Are you sure you want to delete this transaction?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    (category_filter_view(categories, selected_category))

                    a href=(new_transaction_route) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }
                }

                section class="dark:bg-gray-800 w-full"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for with_category in transactions {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    (transaction_cells_view(with_category))
                                    (actions(with_category))
                                }
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions found. "
                                        a href=(new_transaction_route) class=(LINK_STYLE)
                                        {
                                            "Record a transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &content)
}
