//! Transactions: domain types, queries, row mapping, data access, and the JSON and HTML
//! endpoints.

mod api;
mod create;
mod db;
mod delete;
mod detail;
mod domain;
mod list;
pub mod mapper;
pub mod query;

pub use api::{
    create_transaction_api, delete_transaction_api, get_transaction_api, list_transactions_api,
    update_transaction_api,
};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use db::{
    create_transaction, delete_transaction, get_transaction, list_transactions,
    update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use detail::{get_transaction_page, update_transaction_endpoint};
pub use domain::{
    Amount, NewTransaction, Transaction, TransactionFormData, TransactionId, TransactionUpdate,
    TransactionWithCategory,
};
pub(crate) use list::transaction_cells_view;
pub use list::get_transactions_page;
