//! The endpoint URIs for the HTML pages and the JSON API.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The dashboard page.
pub const ROOT: &str = "/";
/// The liveness check.
pub const HEALTH: &str = "/health";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The page listing all categories. Also accepts form submissions for creating a category.
pub const CATEGORIES_VIEW: &str = "/categories/";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The detail page for a category. Also accepts edit form submissions and deletions.
pub const CATEGORY_VIEW: &str = "/categories/{category_id}";
/// The page listing transactions. Also accepts form submissions for creating a transaction.
pub const TRANSACTIONS_VIEW: &str = "/transactions/";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The detail page for a transaction. Also accepts edit form submissions and deletions.
pub const TRANSACTION_VIEW: &str = "/transactions/{transaction_id}";

/// The JSON collection of categories.
pub const CATEGORIES_API: &str = "/api/categories/";
/// The JSON collection of categories with their transaction counts.
pub const CATEGORIES_WITH_COUNTS_API: &str = "/api/categories/with-counts/";
/// A single category as JSON.
pub const CATEGORY_API: &str = "/api/categories/{category_id}";
/// The JSON collection of transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions/";
/// A single transaction as JSON.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
