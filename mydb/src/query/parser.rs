//! Statement parser.
//!
//! Accepts exactly one statement shape, with tokens separated by single
//! spaces:
//!
//! ```text
//! select <column|*> from <table> where <column> = <value>
//! ```
//!
//! Tokens are checked left to right and the first failing check decides
//! the [`QueryError`].

use super::types::{Query, QueryError, Selection};
use crate::table::TableMeta;

/// Parse `line` as a query against `table` described by `meta`.
pub fn parse(line: &str, table: &str, meta: &TableMeta) -> Result<Query, QueryError> {
    let mut tokens = line.split(' ');

    if tokens.next() != Some("select") {
        return Err(QueryError::UnknownQuery);
    }

    let selection = match tokens.next().ok_or(QueryError::InvalidSyntax)? {
        "*" => Selection::All,
        column if meta.has_column(column) => Selection::Column(column.to_owned()),
        _ => return Err(QueryError::InvalidSelectColumn),
    };

    expect_keyword(tokens.next(), "from")?;

    let from = tokens.next().ok_or(QueryError::InvalidSyntax)?;
    if from != table {
        return Err(QueryError::InvalidTableName);
    }

    expect_keyword(tokens.next(), "where")?;

    let where_column = tokens.next().ok_or(QueryError::InvalidSyntax)?;
    if !meta.has_column(where_column) {
        return Err(QueryError::InvalidWhereColumn);
    }

    expect_keyword(tokens.next(), "=")?;

    let value = tokens.next().ok_or(QueryError::InvalidSyntax)?;

    if tokens.next().is_some() {
        return Err(QueryError::TooLong);
    }

    Ok(Query {
        selection,
        table: from.to_owned(),
        where_column: where_column.to_owned(),
        value: value.to_owned(),
    })
}

fn expect_keyword(token: Option<&str>, keyword: &str) -> Result<(), QueryError> {
    if token == Some(keyword) {
        Ok(())
    } else {
        Err(QueryError::InvalidSyntax)
    }
}
