//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryWithCount, list_categories_with_counts},
    dashboard::{
        aggregation::{DashboardStats, compute_dashboard_stats},
        cards::stats_cards_view,
    },
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, link, pluralize,
    },
    navigation::NavBar,
    session::run_in_session,
    transaction::{TransactionWithCategory, list_transactions, transaction_cells_view},
};

/// How many of the latest transactions the dashboard shows and summarizes.
pub const RECENT_TRANSACTION_LIMIT: i64 = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with the recent transactions, the categories and summary totals.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let (recent_transactions, categories) =
        run_in_session(&state.db_connection, |connection| {
            let recent_transactions =
                list_transactions(RECENT_TRANSACTION_LIMIT, 0, None, connection)?;
            let categories = list_categories_with_counts(connection)?;

            Ok((recent_transactions, categories))
        })
        .inspect_err(|error| tracing::error!("Could not load dashboard data: {error}"))?;

    let stats = compute_dashboard_stats(&recent_transactions, &categories);

    Ok(dashboard_view(&recent_transactions, &categories, &stats, &state.app_name).into_response())
}

fn recent_transactions_view(transactions: &[TransactionWithCategory]) -> Markup {
    html! {
        section class="w-full" aria-labelledby="recent-heading"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 id="recent-heading" class="text-xl font-semibold" { "Recent Transactions" }

                (link(endpoints::TRANSACTIONS_VIEW, "View all"))
            }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Record your first transaction"))
                }
            } @else {
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
                        }
                    }

                    tbody
                    {
                        @for with_category in transactions {
                            tr class=(TABLE_ROW_STYLE) { (transaction_cells_view(with_category)) }
                        }
                    }
                }
            }
        }
    }
}

fn categories_view(categories: &[CategoryWithCount]) -> Markup {
    html! {
        section class="w-full" aria-labelledby="categories-heading"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 id="categories-heading" class="text-xl font-semibold" { "Categories" }

                (link(endpoints::CATEGORIES_VIEW, "Manage"))
            }

            @if categories.is_empty() {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "No categories yet. "
                    (link(endpoints::NEW_CATEGORY_VIEW, "Create a category"))
                }
            } @else {
                ul class="flex flex-wrap gap-2"
                {
                    @for with_count in categories {
                        @let category = &with_count.category;
                        @let count = with_count.transaction_count;
                        li
                        {
                            a
                                href=(format!(
                                    "{}?category_id={}",
                                    endpoints::TRANSACTIONS_VIEW,
                                    category.id
                                ))
                                class=(CATEGORY_BADGE_STYLE)
                                title=(format!(
                                    "{count} {}",
                                    pluralize(count, "transaction", "transactions")
                                ))
                            {
                                (category.name) " (" (count) ")"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn dashboard_view(
    recent_transactions: &[TransactionWithCategory],
    categories: &[CategoryWithCount],
    stats: &DashboardStats,
    app_name: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT, app_name).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="space-y-8 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-2xl font-bold" { "Dashboard" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Record Transaction"
                    }
                }

                (stats_cards_view(stats, recent_transactions.len()))
                (recent_transactions_view(recent_transactions))
                (categories_view(categories))
            }
        }
    };

    base("Dashboard", &content)
}
