//! Dashboard module
//!
//! Shows the latest transactions, the categories with their transaction counts and a
//! summary of spending and income.

mod aggregation;
mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
