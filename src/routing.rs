//! Application router configuration for the HTML pages, the JSON API and static files.

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_api, create_category_endpoint, delete_category_api,
        delete_category_endpoint, get_categories_page, get_category_api, get_category_page,
        get_new_category_page, list_categories_api, list_categories_with_counts_api,
        update_category_api, update_category_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    health::get_health,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_api, create_transaction_endpoint, delete_transaction_api,
        delete_transaction_endpoint, get_new_transaction_page, get_transaction_api,
        get_transaction_page, get_transactions_page, list_transactions_api,
        update_transaction_api, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Files under `static_dir` are served from [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(
            endpoints::CATEGORIES_VIEW,
            get(get_categories_page).post(create_category_endpoint),
        )
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(
            endpoints::CATEGORY_VIEW,
            get(get_category_page)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::TRANSACTION_VIEW,
            get(get_transaction_page)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        );

    let api_routes = Router::new()
        .route(
            endpoints::CATEGORIES_API,
            get(list_categories_api).post(create_category_api),
        )
        .route(
            endpoints::CATEGORIES_WITH_COUNTS_API,
            get(list_categories_with_counts_api),
        )
        .route(
            endpoints::CATEGORY_API,
            get(get_category_api)
                .put(update_category_api)
                .delete(delete_category_api),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_api).get(list_transactions_api),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_api)
                .put(update_transaction_api)
                .delete(delete_transaction_api),
        );

    page_routes
        .merge(api_routes)
        .route(endpoints::HEALTH, get(get_health))
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::path::Path;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, config::Config, endpoints};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, &Config::default())
            .expect("Could not create app state");
        let app = build_router(state, Path::new("static"));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert!(response.text().contains("Dashboard"));
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let server = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn missing_category_is_json_not_found() {
        let server = get_test_server();

        let response = server
            .get(&endpoints::format_endpoint(endpoints::CATEGORY_API, 42))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"detail": "Category not found"}));
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_json_not_found() {
        let server = get_test_server();

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::TRANSACTION_API, 42))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"detail": "Transaction not found"}));
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_by_the_api() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"amount": 0, "date": "2024-01-01"}))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn out_of_range_dates_are_rejected_by_the_api() {
        let server = get_test_server();

        for date in ["-0001-01-01", "10000-01-01"] {
            let response = server
                .post(endpoints::TRANSACTIONS_API)
                .json(&json!({"amount": 1, "date": date}))
                .await;

            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        }

        let list: Value = server.get(endpoints::TRANSACTIONS_API).await.json();
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn duplicate_category_is_a_conflict() {
        let server = get_test_server();
        server
            .post(endpoints::CATEGORIES_API)
            .json(&json!({"name": "Food"}))
            .await
            .assert_status_ok();

        let response = server
            .post(endpoints::CATEGORIES_API)
            .json(&json!({"name": "Food"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        response.assert_json(&json!({"detail": "the category \"Food\" already exists"}));
    }

    #[tokio::test]
    async fn create_and_filter_transactions_by_category() {
        let server = get_test_server();

        let food = server
            .post(endpoints::CATEGORIES_API)
            .json(&json!({"name": "Food"}))
            .await
            .json::<Value>();
        let food_id = food["id"].as_i64().expect("category ID should be an integer");
        assert!(food_id > 0);

        let transaction = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"amount": -12.50, "category_id": food_id, "date": "2024-01-01"}))
            .await
            .json::<Value>();
        assert_eq!(transaction["amount"], json!(-12.5));
        assert_eq!(transaction["date"], json!("2024-01-01T00:00:00Z"));

        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"amount": 250.0, "date": "2024-01-02"}))
            .await
            .assert_status_ok();

        let transactions = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("category_id", food_id)
            .await
            .json::<Vec<Value>>();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["amount"], json!(-12.5));
        assert_eq!(transactions[0]["category"]["name"], json!("Food"));
        assert_eq!(transactions[0]["category"]["id"], json!(food_id));

        let all_transactions = server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .json::<Vec<Value>>();
        assert_eq!(all_transactions.len(), 2);
        assert_eq!(all_transactions[0]["category"], Value::Null);

        let counts = server
            .get(endpoints::CATEGORIES_WITH_COUNTS_API)
            .await
            .json::<Vec<Value>>();
        assert_eq!(counts[0]["name"], json!("Food"));
        assert_eq!(counts[0]["transaction_count"], json!(1));
    }

    #[tokio::test]
    async fn category_form_redirects_to_list() {
        let server = get_test_server();

        let response = server
            .post(endpoints::CATEGORIES_VIEW)
            .form(&[("name", "Food"), ("description", "")])
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(response.header("hx-redirect"), endpoints::CATEGORIES_VIEW);
        let categories_page = server.get(endpoints::CATEGORIES_VIEW).await.text();
        assert!(categories_page.contains("Food"));
    }

    #[tokio::test]
    async fn transaction_form_accepts_empty_category() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_VIEW)
            .form(&[
                ("amount", "-4.20"),
                ("description", "Coffee"),
                ("date", "2024-03-01"),
                ("category_id", ""),
            ])
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(response.header("hx-redirect"), endpoints::TRANSACTIONS_VIEW);
        let transactions = server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .json::<Vec<Value>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["category_id"], Value::Null);
    }

    #[tokio::test]
    async fn transactions_page_accepts_empty_filter() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("category_id", "")
            .await;

        response.assert_status_ok();
    }
}
