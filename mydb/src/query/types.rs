//! Query types.
//!
//! - `Query` - a validated `select ... from ... where ... = ...` statement
//! - `Selection` - which columns the statement projects
//! - `QueryResult` - the projected records a statement matched
//! - `QueryError` - why a statement was rejected

use std::fmt;

/// Columns projected by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// `select *`: every column, in record order.
    All,
    /// `select <column>`: a single named column.
    Column(String),
}

/// A validated equality query against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub selection: Selection,
    pub table: String,
    pub where_column: String,
    pub value: String,
}

/// One matched record, projected to `(column, field)` pairs.
pub type QueryRow = Vec<(String, String)>;

/// Records matched by a query, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub rows: Vec<QueryRow>,
}

impl QueryResult {
    /// Whether the query matched nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Renders one `column: field` line per projected field, or `Not found...`.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Not found...");
        }
        let mut first = true;
        for (column, field) in self.rows.iter().flatten() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{column}: {field}")?;
            first = false;
        }
        Ok(())
    }
}

/// Reasons a statement is rejected before it touches the table.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The statement does not start with `select`.
    UnknownQuery,
    /// The selected column is neither `*` nor a column of the table.
    InvalidSelectColumn,
    /// A keyword is missing or misplaced, or the statement ends early.
    InvalidSyntax,
    /// The `from` clause names another table.
    InvalidTableName,
    /// The `where` column is not a column of the table.
    InvalidWhereColumn,
    /// Tokens follow the compared value.
    TooLong,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UnknownQuery => "Unknown query, ignored...",
            Self::InvalidSelectColumn => "Invalid select column, ignored...",
            Self::InvalidSyntax => "Invalid select query, ignored...",
            Self::InvalidTableName => "Invalid table name, ignored...",
            Self::InvalidWhereColumn => "Invalid where column, ignored...",
            Self::TooLong => "Query too long, ignored...",
        };
        f.write_str(message)
    }
}

impl std::error::Error for QueryError {}
