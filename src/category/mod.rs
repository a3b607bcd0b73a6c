//! Categories for grouping transactions: domain types, queries, data access, and the JSON and
//! HTML endpoints.

mod api;
mod create;
mod db;
mod delete;
mod detail;
mod domain;
mod list;
pub mod query;

pub use api::{
    create_category_api, delete_category_api, get_category_api, list_categories_api,
    list_categories_with_counts_api, update_category_api,
};
pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, delete_category, get_category, list_all_categories, list_categories,
    list_categories_with_counts, update_category,
};
pub use delete::delete_category_endpoint;
pub use detail::{get_category_page, update_category_endpoint};
pub use domain::{
    Category, CategoryFormData, CategoryId, CategoryName, CategoryUpdate, CategoryWithCount,
    NewCategory,
};
pub use list::get_categories_page;
