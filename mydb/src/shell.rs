//! Interactive query shell.
//!
//! A [`Session`] owns one loaded [`Database`] and answers one input line at
//! a time. [`run`] drives a session over any reader and writer so the binary
//! can use stdin/stdout and tests can use in-memory buffers.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::database::Database;
use crate::query::{QueryExecutor, parse};
use crate::table::TableError;

/// Prompt printed before every query.
pub const QUERY_PROMPT: &str = "Enter query> ";

/// Input line that ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// What the shell should do after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print this text and keep reading.
    Reply(String),
    /// Stop reading input.
    Exit,
}

/// One open table answering queries.
pub struct Session {
    database: Database,
}

impl Session {
    /// Wrap an already loaded database.
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open the table `name` in `directory` and build its indexes.
    pub fn open(directory: &Path, name: &str) -> Result<Self, TableError> {
        Database::open(directory, name).map(Self::new)
    }

    /// The loaded database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// The startup report: size and height of every column index.
    #[must_use]
    pub fn index_report(&self) -> String {
        let mut report = String::new();
        for stats in self.database.index_stats() {
            let _ = writeln!(report, "Index column: {}", stats.column);
            let _ = writeln!(report, "\tTree size: {}", stats.size);
            let _ = writeln!(report, "\tTree height: {}", stats.height);
        }
        report
    }

    /// Answer one line of input.
    ///
    /// Rejected statements are replied to with their message. Only I/O
    /// failures while reading records are returned as errors.
    pub fn handle_line(&mut self, line: &str) -> Result<LineOutcome, TableError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line == EXIT_COMMAND {
            return Ok(LineOutcome::Exit);
        }

        let table = self.database.table();
        let query = match parse(line, table.name(), table.meta()) {
            Ok(query) => query,
            Err(rejection) => {
                tracing::debug!("rejected query '{line}': {rejection:?}");
                return Ok(LineOutcome::Reply(rejection.to_string()));
            }
        };

        let result = QueryExecutor::new(&mut self.database).execute(&query)?;
        Ok(LineOutcome::Reply(result.to_string()))
    }
}

/// The line shown on stdout when a table cannot be loaded.
#[must_use]
pub fn load_failure_message(error: &TableError) -> String {
    match error {
        TableError::Open { path, .. } => {
            format!("**Error: couldn't open data file '{}'.", path.display())
        }
        other => format!("**Error: {other}."),
    }
}

/// Read queries from `input` until `exit` or end of input, writing prompts
/// and replies to `output`.
///
/// Lines are read as bytes; invalid UTF-8 is replaced rather than ending
/// the session. A record read failure is logged and the loop continues with
/// the next query.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        write!(output, "\n{QUERY_PROMPT}")?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        match session.handle_line(&line) {
            Ok(LineOutcome::Exit) => return Ok(()),
            Ok(LineOutcome::Reply(reply)) => writeln!(output, "{reply}")?,
            Err(e) => tracing::error!("query failed: {e}"),
        }
    }
}
