//! Categories listing page.

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
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, pluralize,
    },
    navigation::NavBar,
    session::run_in_session,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the categories listing page with transaction counts.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let categories = run_in_session(&state.db_connection, list_categories_with_counts)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&categories, &state.app_name).into_response())
}

fn categories_view(categories: &[CategoryWithCount], app_name: &str) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW, app_name).into_html();

    let table_row = |with_count: &CategoryWithCount| {
        let category = &with_count.category;
        let category_url = endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category.id);
        let count = with_count.transaction_count;
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? Its {count} {} will become uncategorized.",
            category.name,
            pluralize(count, "transaction", "transactions")
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(category_url) class=(CATEGORY_BADGE_STYLE)
                    {
                        (category.name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (category.description.as_deref().unwrap_or_default())
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (count) " " (pluralize(count, "transaction", "transactions"))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(category_url) class=(LINK_STYLE) { "Edit" }

                        button
                            type="button"
                            hx-delete=(category_url)
                            hx-confirm=(confirm_message)
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE)
                    {
                        "Create Category"
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Transactions" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for with_count in categories {
                                (table_row(with_count))
                            }

                            @if categories.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. "
                                        a href=(new_category_route) class=(LINK_STYLE)
                                        {
                                            "Create your first category"
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

    base("Categories", &content)
}

#[cfg(test)]
mod categories_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::{CategoryName, NewCategory, create_category},
        schema::initialize,
        test_utils::{assert_content_type, assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::{CategoriesPageState, get_categories_page};

    fn get_test_state() -> CategoriesPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CategoriesPageState {
            app_name: "Test".to_owned(),
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn lists_categories_with_counts() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let food = create_category(
                &NewCategory {
                    name: CategoryName::new_unchecked("Food"),
                    description: Some("Groceries".to_owned()),
                },
                &connection,
            )
            .unwrap();
            create_category(
                &NewCategory {
                    name: CategoryName::new_unchecked("Rent"),
                    description: None,
                },
                &connection,
            )
            .unwrap();
            connection
                .execute(
                    "INSERT INTO \"transaction\" (amount, date, category_id, created_at)
                    VALUES (-5.0, '2024-01-01T00:00:00Z', ?1, '2024-01-01T00:00:00Z')",
                    [food.id],
                )
                .unwrap();
        }

        let response = get_categories_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .take(3)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                vec!["Food", "Groceries", "1 transaction"],
                vec!["Rent", "", "0 transactions"],
            ]
        );
    }

    #[tokio::test]
    async fn shows_prompt_when_empty() {
        let state = get_test_state();

        let response = get_categories_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let cell = html
            .select(&Selector::parse("tbody td").unwrap())
            .next()
            .expect("No table cell found");
        assert!(
            cell.text()
                .collect::<String>()
                .contains("No categories created yet.")
        );
    }
}
