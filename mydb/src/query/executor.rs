//! Query execution.
//!
//! Equality on an indexed column is answered by one tree search and one
//! record read. Any other column falls back to a linear scan of the data
//! file, which may match several records.

use super::types::{Query, QueryResult, QueryRow, Selection};
use crate::database::Database;
use crate::table::TableError;

/// Executes parsed queries against a database.
pub struct QueryExecutor<'a> {
    database: &'a mut Database,
}

impl<'a> QueryExecutor<'a> {
    /// Create a new executor over `database`.
    pub const fn new(database: &'a mut Database) -> Self {
        Self { database }
    }

    /// Run `query` and return the projected records it matched.
    pub fn execute(&mut self, query: &Query) -> Result<QueryResult, TableError> {
        let meta = self.database.table().meta();
        let Some(where_column) = meta.column_index(&query.where_column) else {
            return Ok(QueryResult::default());
        };
        let columns: Vec<String> = meta.columns.iter().map(|c| c.name.clone()).collect();

        let offsets = self.matching_offsets(query, where_column)?;

        let mut result = QueryResult::default();
        let records = self.database.table_mut().records_mut();
        for offset in offsets {
            let fields = records.read_record(offset)?;
            result.rows.push(project(&query.selection, &columns, fields));
        }
        Ok(result)
    }

    /// Offsets of the records whose `where_column` equals the query value.
    fn matching_offsets(&mut self, query: &Query, where_column: usize) -> Result<Vec<u64>, TableError> {
        let indexed = self
            .database
            .index_for(&query.where_column)
            .map(|index| index.lookup(&query.value));

        if let Some(hit) = indexed {
            tracing::debug!(
                "index lookup {} = {}: {}",
                query.where_column,
                query.value,
                if hit.is_some() { "hit" } else { "miss" }
            );
            return Ok(hit.into_iter().collect());
        }

        self.database
            .table_mut()
            .records_mut()
            .scan_equal(where_column, &query.value)
    }
}

fn project(selection: &Selection, columns: &[String], fields: Vec<String>) -> QueryRow {
    let pairs = columns.iter().cloned().zip(fields);
    match selection {
        Selection::All => pairs.collect(),
        Selection::Column(name) => pairs.filter(|(column, _)| column == name).collect(),
    }
}
