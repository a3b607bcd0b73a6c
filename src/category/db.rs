//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{
        Category, CategoryId, CategoryName, CategoryUpdate, CategoryWithCount, NewCategory, query,
    },
    fields::{now, read_timestamp},
};

/// Retrieve a page of categories ordered by name.
pub fn list_categories(
    limit: i64,
    offset: i64,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    query::list_categories(limit, offset).query_all(connection, map_category_row)
}

/// Retrieve every category ordered by name, for filling category selects.
pub fn list_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    query::list_all_categories().query_all(connection, map_category_row)
}

/// Retrieve a single category by ID, or `None` if it does not exist.
pub fn get_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    query::get_category(category_id).query_optional(connection, map_category_row)
}

/// Retrieve every category with the number of transactions in it, ordered by name.
pub fn list_categories_with_counts(
    connection: &Connection,
) -> Result<Vec<CategoryWithCount>, Error> {
    query::list_categories_with_counts().query_all(connection, |row| {
        Ok(CategoryWithCount {
            category: map_category_row(row)?,
            transaction_count: row.get(4)?,
        })
    })
}

/// Create a category and return it with its generated ID and creation time.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if a category with the same name exists.
pub fn create_category(
    new_category: &NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    query::create_category(new_category, now())?
        .query_one(connection, map_category_row)
        .map_err(|error| with_duplicate_name(error, &new_category.name))
}

/// Update the fields set in `update` and return the updated category, or `None` if the
/// category does not exist.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if the new name belongs to another category.
pub fn update_category(
    category_id: CategoryId,
    update: &CategoryUpdate,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    let result =
        query::update_category(category_id, update).query_optional(connection, map_category_row);

    match &update.name {
        Some(name) => result.map_err(|error| with_duplicate_name(error, name)),
        None => result,
    }
}

/// Delete a category by ID. Returns whether a category was deleted.
///
/// Transactions in the category become uncategorized.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected = query::delete_category(category_id).execute(connection)?;

    Ok(rows_affected > 0)
}

fn with_duplicate_name(error: Error, name: &CategoryName) -> Error {
    match error {
        Error::DuplicateCategoryName(_) => Error::DuplicateCategoryName(name.to_string()),
        error => error,
    }
}

/// Map a row with the columns in [crate::schema::CATEGORY_COLUMNS] to a [Category].
pub(crate) fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let description = row.get(2)?;
    let created_at = read_timestamp(row, 3)?;

    Ok(Category {
        id,
        name,
        description,
        created_at,
    })
}
