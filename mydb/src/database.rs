//! An opened table together with its in-memory column indexes.
//!
//! Every column flagged as indexed in the meta file gets one [`AvlTree`]
//! mapping the column's value to the byte offset of the record holding it.
//! The trees are built from a single pass over the data file when the
//! database is loaded and are discarded when it is dropped.
//!
//! # Invariants
//!
//! - There is exactly one [`ColumnIndex`] per indexed column, in record order.
//! - Each tree holds one entry per distinct value of its column; when a
//!   value repeats, the entry points at the first record holding it.

use std::path::Path;

use crate::index::AvlTree;
use crate::table::{Table, TableError};

/// The index over one column.
pub struct ColumnIndex {
    /// Position of the column within a record.
    pub column: usize,
    /// Column name.
    pub name: String,
    tree: AvlTree<String, u64>,
}

impl ColumnIndex {
    /// Offset of the first record whose column equals `value`.
    #[must_use]
    pub fn lookup(&self, value: &str) -> Option<u64> {
        self.tree.search(value).copied()
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &AvlTree<String, u64> {
        &self.tree
    }
}

/// Size and height of one column index, for the startup report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub column: String,
    pub size: usize,
    pub height: i32,
}

/// A table with its column indexes built.
pub struct Database {
    table: Table,
    indexes: Vec<ColumnIndex>,
}

impl Database {
    /// Open the table `name` in `directory` and build its indexes.
    pub fn open(directory: &Path, name: &str) -> Result<Self, TableError> {
        Self::build(Table::open(directory, name)?)
    }

    /// Build the indexes of an already opened table.
    ///
    /// Each record is read once and its indexed fields are inserted into
    /// the matching trees.
    pub fn build(mut table: Table) -> Result<Self, TableError> {
        let mut indexes: Vec<ColumnIndex> = table
            .meta()
            .indexed_columns()
            .map(|(column, info)| ColumnIndex {
                column,
                name: info.name.clone(),
                tree: AvlTree::new(),
            })
            .collect();

        if !indexes.is_empty() {
            let records = table.records_mut();
            for offset in records.offsets() {
                let mut fields = records.read_record(offset)?;
                for index in &mut indexes {
                    let key = std::mem::take(&mut fields[index.column]);
                    index.tree.insert(key, offset);
                }
            }
        }

        for index in &indexes {
            tracing::info!(
                "built index on {}.{}: {} keys, height {}",
                table.name(),
                index.name,
                index.tree.size(),
                index.tree.height()
            );
        }

        Ok(Self { table, indexes })
    }

    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Mutable access to the underlying table, for record reads.
    #[allow(clippy::missing_const_for_fn)] // mutable references can't be const
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// The index over `column`, if that column is indexed.
    #[must_use]
    pub fn index_for(&self, column: &str) -> Option<&ColumnIndex> {
        self.indexes.iter().find(|index| index.name == column)
    }

    /// All column indexes, in record order.
    #[must_use]
    pub fn indexes(&self) -> &[ColumnIndex] {
        &self.indexes
    }

    /// Size and height of every index.
    #[must_use]
    pub fn index_stats(&self) -> Vec<IndexStats> {
        self.indexes
            .iter()
            .map(|index| IndexStats {
                column: index.name.clone(),
                size: index.tree.size(),
                height: index.tree.height(),
            })
            .collect()
    }
}
