//! Category creation page and endpoint.

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
    AppState, endpoints,
    category::{CategoryFormData, CategoryName, NewCategory, create_category},
    fields::non_empty,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    session::run_in_session,
};

/// The state needed for the category creation page.
#[derive(Debug, Clone)]
pub struct NewCategoryPageState {
    pub app_name: String,
}

impl FromRef<AppState> for NewCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            app_name: state.app_name.clone(),
        }
    }
}

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page(State(state): State<NewCategoryPageState>) -> Response {
    new_category_view(&state.app_name).into_response()
}

/// Handle category creation form submission.
///
/// Redirects to the categories page on success.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let new_category = NewCategory {
        name,
        description: non_empty(form.description),
    };

    match run_in_session(&state.db_connection, |connection| {
        create_category(&new_category, connection)
    }) {
        Ok(category) => {
            tracing::info!("Created category {} \"{}\"", category.id, category.name);

            (
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::NO_CONTENT,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not create category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view(app_name: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW, app_name).into_html();
    let form = new_category_form_view(
        &CategoryFormData {
            name: String::new(),
            description: None,
        },
        "",
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="w-full mb-4 text-xl font-bold" { "Create Category" }

            (form)
        }
    };

    base("Create Category", &content)
}

fn new_category_form_view(form: &CategoryFormData, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::CATEGORIES_VIEW)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (category_form_fields(&form.name, form.description.as_deref().unwrap_or_default()))

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}

/// The name and description inputs shared by the create and edit forms.
pub(super) fn category_form_fields(name: &str, description: &str) -> Markup {
    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                id="name"
                type="text"
                name="name"
                placeholder="Category Name"
                value=(name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            textarea
                id="description"
                name="description"
                rows="3"
                placeholder="Optional description"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (description)
            }
        }
    }
}
