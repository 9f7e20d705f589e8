//! Query interpreter for the single-table `select` statement.
//!
//! # Usage
//!
//! ```ignore
//! use mydb::database::Database;
//! use mydb::query::{QueryExecutor, parse};
//!
//! let mut database = Database::open(directory, "students")?;
//! let query = parse(
//!     "select * from students where netid = aturing",
//!     "students",
//!     database.table().meta(),
//! )?;
//!
//! let result = QueryExecutor::new(&mut database).execute(&query)?;
//! println!("{result}");
//! ```

mod executor;
mod parser;
mod types;

pub use executor::QueryExecutor;
pub use parser::parse;
pub use types::{Query, QueryError, QueryResult, QueryRow, Selection};
