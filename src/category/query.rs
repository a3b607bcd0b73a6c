//! Statements for reading and writing categories.
//!
//! These functions only build [Statement]s, see [crate::category::db] for running them.

use time::OffsetDateTime;

use crate::{
    Error,
    category::{CategoryId, CategoryUpdate, NewCategory},
    fields::format_timestamp,
    schema::CATEGORY_COLUMNS,
    statement::Statement,
};

/// Select a page of categories ordered by name.
pub fn list_categories(limit: i64, offset: i64) -> Statement {
    Statement::new(format!(
        "SELECT {CATEGORY_COLUMNS} FROM category ORDER BY name ASC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
}

/// Select every category ordered by name.
pub fn list_all_categories() -> Statement {
    Statement::new(format!("SELECT {CATEGORY_COLUMNS} FROM category ORDER BY name ASC"))
}

/// Select the category with `category_id`.
pub fn get_category(category_id: CategoryId) -> Statement {
    Statement::new(format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = ?"))
        .bind(category_id)
}

/// Select every category along with the number of transactions in it, ordered by name.
///
/// Categories without transactions have a count of zero.
pub fn list_categories_with_counts() -> Statement {
    Statement::new(
        "SELECT category.id, category.name, category.description, category.created_at, \
            COALESCE(counts.transaction_count, 0) AS transaction_count \
        FROM category \
        LEFT OUTER JOIN (\
            SELECT category_id, COUNT(id) AS transaction_count \
            FROM \"transaction\" \
            GROUP BY category_id\
        ) AS counts ON category.id = counts.category_id \
        ORDER BY category.name ASC",
    )
}

/// Insert `new_category` and return the inserted row.
///
/// # Errors
/// Returns [Error::InvalidDate] if `created_at` cannot be stored.
pub fn create_category(
    new_category: &NewCategory,
    created_at: OffsetDateTime,
) -> Result<Statement, Error> {
    let statement = Statement::new(format!(
        "INSERT INTO category (name, description, created_at) VALUES (?, ?, ?) \
        RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(new_category.name.as_ref().to_owned())
    .bind(new_category.description.clone())
    .bind(format_timestamp(created_at)?);

    Ok(statement)
}

/// Update the fields set in `update` on the category with `category_id` and return the
/// updated row.
///
/// An empty update still returns the row, so callers can tell whether the category exists.
pub fn update_category(category_id: CategoryId, update: &CategoryUpdate) -> Statement {
    let mut assignments = Vec::new();
    let mut statement = Statement::new("");

    if let Some(name) = &update.name {
        assignments.push("name = ?");
        statement = statement.bind(name.as_ref().to_owned());
    }

    if let Some(description) = &update.description {
        assignments.push("description = ?");
        statement = statement.bind(description.clone());
    }

    if assignments.is_empty() {
        assignments.push("id = id");
    }

    statement
        .push_sql(&format!(
            "UPDATE category SET {} WHERE id = ? RETURNING {CATEGORY_COLUMNS}",
            assignments.join(", ")
        ))
        .bind(category_id)
}

/// Delete the category with `category_id`.
pub fn delete_category(category_id: CategoryId) -> Statement {
    Statement::new("DELETE FROM category WHERE id = ?").bind(category_id)
}
