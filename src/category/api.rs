//! JSON endpoints for categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    category::{
        Category, CategoryId, CategoryUpdate, CategoryWithCount, NewCategory, create_category,
        delete_category, get_category, list_categories, list_categories_with_counts,
        update_category,
    },
    error::ApiError,
    fields::DEFAULT_LIMIT,
    session::run_in_session,
};

/// The state needed for the category JSON endpoints.
#[derive(Debug, Clone)]
pub struct CategoryApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The `limit` and `offset` query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct CategoryListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// The response body for a successful deletion.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteCategoryResponse {
    pub message: String,
}

/// List categories ordered by name.
pub async fn list_categories_api(
    State(state): State<CategoryApiState>,
    Query(params): Query<CategoryListParams>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = run_in_session(&state.db_connection, |connection| {
        list_categories(params.limit, params.offset, connection)
    })?;

    Ok(Json(categories))
}

/// List every category with its transaction count.
pub async fn list_categories_with_counts_api(
    State(state): State<CategoryApiState>,
) -> Result<Json<Vec<CategoryWithCount>>, ApiError> {
    let categories = run_in_session(&state.db_connection, list_categories_with_counts)?;

    Ok(Json(categories))
}

/// Get a single category.
pub async fn get_category_api(
    State(state): State<CategoryApiState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Category>, ApiError> {
    run_in_session(&state.db_connection, |connection| {
        get_category(category_id, connection)?.ok_or(Error::CategoryNotFound(category_id))
    })
    .map(Json)
    .map_err(ApiError)
}

/// Create a category.
pub async fn create_category_api(
    State(state): State<CategoryApiState>,
    Json(new_category): Json<NewCategory>,
) -> Result<Json<Category>, ApiError> {
    let category = run_in_session(&state.db_connection, |connection| {
        create_category(&new_category, connection)
    })
    .inspect_err(|error| tracing::error!("Could not create category: {error}"))?;

    Ok(Json(category))
}

/// Update the fields given in the request body on a category.
pub async fn update_category_api(
    State(state): State<CategoryApiState>,
    Path(category_id): Path<CategoryId>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    run_in_session(&state.db_connection, |connection| {
        update_category(category_id, &update, connection)?
            .ok_or(Error::CategoryNotFound(category_id))
    })
    .map(Json)
    .map_err(ApiError)
}

/// Delete a category.
pub async fn delete_category_api(
    State(state): State<CategoryApiState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<DeleteCategoryResponse>, ApiError> {
    let deleted = run_in_session(&state.db_connection, |connection| {
        delete_category(category_id, connection)
    })?;

    if !deleted {
        return Err(Error::CategoryNotFound(category_id).into());
    }

    Ok(Json(DeleteCategoryResponse {
        message: "Category deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod category_api_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, CategoryUpdate, NewCategory, create_category},
        error::ApiError,
        schema::initialize,
    };

    use super::{
        CategoryApiState, CategoryListParams, DeleteCategoryResponse, create_category_api,
        delete_category_api, get_category_api, list_categories_api,
        list_categories_with_counts_api, update_category_api,
    };

    fn get_test_state() -> CategoryApiState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CategoryApiState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_category() {
        let state = get_test_state();

        let Json(created) = create_category_api(State(state.clone()), Json(new_category("Food")))
            .await
            .unwrap();
        let Json(fetched) = get_category_api(State(state), Path(created.id))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let state = get_test_state();

        let result = get_category_api(State(state), Path(42)).await;

        let error = result.unwrap_err();
        assert_eq!(error, ApiError(Error::CategoryNotFound(42)));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let state = get_test_state();
        let Json(original) = create_category_api(State(state.clone()), Json(new_category("Food")))
            .await
            .unwrap();

        let result = create_category_api(State(state.clone()), Json(new_category("Food"))).await;

        assert_eq!(
            result.unwrap_err(),
            ApiError(Error::DuplicateCategoryName("Food".to_owned()))
        );
        let Json(stored) = get_category_api(State(state), Path(original.id)).await.unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for name in ["A", "B", "C"] {
                create_category(&new_category(name), &connection).unwrap();
            }
        }

        let Json(categories) = list_categories_api(
            State(state),
            Query(CategoryListParams {
                limit: 2,
                offset: 0,
            }),
        )
        .await
        .unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name.as_ref(), "A");
    }

    #[tokio::test]
    async fn with_counts_includes_empty_categories() {
        let state = get_test_state();
        let Json(food) = create_category_api(State(state.clone()), Json(new_category("Food")))
            .await
            .unwrap();

        let Json(categories) = list_categories_with_counts_api(State(state)).await.unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category, food);
        assert_eq!(categories[0].transaction_count, 0);
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let state = get_test_state();

        let result = update_category_api(
            State(state),
            Path(7),
            Json(CategoryUpdate {
                name: Some(CategoryName::new_unchecked("Rent")),
                description: None,
            }),
        )
        .await;

        assert_eq!(result.unwrap_err(), ApiError(Error::CategoryNotFound(7)));
    }

    #[tokio::test]
    async fn delete_returns_message_then_not_found() {
        let state = get_test_state();
        let Json(category) = create_category_api(State(state.clone()), Json(new_category("Food")))
            .await
            .unwrap();

        let Json(response) = delete_category_api(State(state.clone()), Path(category.id))
            .await
            .unwrap();
        let second_delete = delete_category_api(State(state), Path(category.id)).await;

        assert_eq!(
            response,
            DeleteCategoryResponse {
                message: "Category deleted successfully".to_owned()
            }
        );
        assert_eq!(
            second_delete.unwrap_err(),
            ApiError(Error::CategoryNotFound(category.id))
        );
    }
}
