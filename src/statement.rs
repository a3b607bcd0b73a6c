//! SQL statements as plain values, and the functions that run them against a connection.
//!
//! The query builders in [crate::category] and [crate::transaction] only ever produce a
//! [Statement]. Nothing touches the database until one of the methods on [Statement] is
//! called with a connection, which keeps statement construction testable without SQLite.

use rusqlite::{Connection, OptionalExtension, Row, params_from_iter, types::Value};

use crate::Error;

/// A SQL statement together with the values bound to its positional `?` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The SQL text with `?` placeholders.
    pub sql: String,
    /// The values for each placeholder, in order.
    pub params: Vec<Value>,
}

impl Statement {
    /// Create a statement with no bound parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append `fragment` to the SQL text.
    pub fn push_sql(mut self, fragment: &str) -> Self {
        self.sql.push_str(fragment);
        self
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Run the statement and map every result row.
    pub fn query_all<T, F>(&self, connection: &Connection, map_row: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        connection
            .prepare(&self.sql)?
            .query_map(params_from_iter(self.params.iter()), map_row)?
            .map(|maybe_row| maybe_row.map_err(Error::from))
            .collect()
    }

    /// Run the statement and map the first result row, if there is one.
    pub fn query_optional<T, F>(
        &self,
        connection: &Connection,
        map_row: F,
    ) -> Result<Option<T>, Error>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        connection
            .prepare(&self.sql)?
            .query_row(params_from_iter(self.params.iter()), map_row)
            .optional()
            .map_err(Error::from)
    }

    /// Run the statement and map exactly one result row.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the statement produced no rows.
    pub fn query_one<T, F>(&self, connection: &Connection, map_row: F) -> Result<T, Error>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        connection
            .prepare(&self.sql)?
            .query_row(params_from_iter(self.params.iter()), map_row)
            .map_err(Error::from)
    }

    /// Run the statement and return the number of rows it changed.
    pub fn execute(&self, connection: &Connection) -> Result<usize, Error> {
        connection
            .execute(&self.sql, params_from_iter(self.params.iter()))
            .map_err(Error::from)
    }
}
