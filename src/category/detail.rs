//! Category detail page and the endpoint for editing a category.

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
    category::{
        Category, CategoryFormData, CategoryId, CategoryName, CategoryUpdate,
        create::category_form_fields, get_category, update_category,
    },
    endpoints,
    fields::non_empty,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, form_error_message,
        link,
    },
    navigation::NavBar,
    session::run_in_session,
};

/// The state needed for the category detail page.
#[derive(Debug, Clone)]
pub struct CategoryPageState {
    pub app_name: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the detail page for a category, including a form for editing it.
pub async fn get_category_page(
    State(state): State<CategoryPageState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    let category = run_in_session(&state.db_connection, |connection| {
        get_category(category_id, connection)
    })
    .inspect_err(|error| tracing::error!("Failed to retrieve category {category_id}: {error}"))?
    .ok_or(Error::CategoryNotFound(category_id))?;

    Ok(category_view(&category, &state.app_name).into_response())
}

/// Handle the category edit form submission.
///
/// Redirects to the categories page on success.
pub async fn update_category_endpoint(
    State(state): State<UpdateCategoryEndpointState>,
    Path(category_id): Path<CategoryId>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return edit_category_form_view(category_id, &form, &format!("Error: {error}"))
                .into_response();
        }
    };

    let update = CategoryUpdate {
        name: Some(name),
        description: Some(non_empty(form.description)),
    };

    let result = run_in_session(&state.db_connection, |connection| {
        update_category(category_id, &update, connection)?
            .ok_or(Error::CategoryNotFound(category_id))
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::NO_CONTENT,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update category {category_id}: {error}");

            error.into_alert_response()
        }
    }
}

fn category_view(category: &Category, app_name: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW, app_name).into_html();
    let category_url = endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category.id);
    let transactions_url = format!(
        "{}?category_id={}",
        endpoints::TRANSACTIONS_VIEW,
        category.id
    );
    let form = edit_category_form_view(
        category.id,
        &CategoryFormData {
            name: category.name.to_string(),
            description: category.description.clone(),
        },
        "",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            header class="w-full mb-4 space-y-1"
            {
                h1 class="text-xl font-bold" { (category.name) }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Created " (category.created_at.date())
                }

                p { (link(&transactions_url, "View transactions")) }
            }

            (form)

            button
                type="button"
                hx-delete=(category_url)
                hx-confirm="Are you sure you want to delete this category?"
                hx-target-error="#alert-container"
                class={ "mt-6 " (BUTTON_DELETE_STYLE) }
            {
                "Delete Category"
            }
        }
    };

    base(&format!("Category: {}", category.name), &content)
}

fn edit_category_form_view(
    category_id: CategoryId,
    form: &CategoryFormData,
    error_message: &str,
) -> Markup {
    let category_url = endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category_id);

    html! {
        form
            hx-put=(category_url)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (category_form_fields(&form.name, form.description.as_deref().unwrap_or_default()))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
        }
    }
}
