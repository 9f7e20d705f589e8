//! End-to-end tests at the shell line level.
//!
//! Each test file covers a specific scenario: a table is written to a
//! temporary directory, loaded through [`Session`](crate::shell::Session),
//! and driven with the same lines a user would type.

#![cfg(test)]

mod helpers;

mod test_index_report;
mod test_indexed_lookup;
mod test_invalid_queries;
mod test_linear_lookup;
mod test_open_errors;
mod test_shell_script;
