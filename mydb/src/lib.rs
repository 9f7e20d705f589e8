// Life of a query:
// 1. Table name comes in (prompt or MYDB_TABLE)
// 2. Load `<table>.meta`, open `<table>.data`
// 3. One pass over the records builds an AVL tree per indexed column
// 4. For each input line:
//     - Parse and validate against the table's columns
//     - Indexed where column: one tree search, one record read
//     - Otherwise: linear scan of the data file
//     - Print the projected fields
//
// System components:
//  - AVL index (index)
//  - Flat-file table storage (table)
//  - Query parser and executor (query)
//  - Shell session (shell)

pub mod config;
pub mod database;
pub mod index;
pub mod query;
pub mod shell;
pub mod simulation;
pub mod table;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use database::Database;
pub use index::AvlTree;
pub use shell::Session;
