//! Common helpers for end-to-end tests.

use tempfile::TempDir;

use crate::shell::{self, LineOutcome, Session};
use crate::table::TableError;
use crate::testing::{fixed_width, write_file, write_students};

/// A table in a temporary directory with a session open on it.
///
/// The directory is removed when the value is dropped.
pub struct TestTable {
    pub session: Session,
    _dir: TempDir,
}

impl TestTable {
    /// The `students` fixture table.
    #[must_use]
    pub fn students() -> Self {
        let dir = new_dir();
        write_students(dir.path());
        Self::open(dir, "students")
    }

    /// A custom table from its meta text and rows.
    #[must_use]
    pub fn with_rows(name: &str, meta: &str, record_size: usize, rows: &[Vec<String>]) -> Self {
        let dir = new_dir();
        write_file(dir.path(), &format!("{name}.meta"), meta);
        let data: String = rows
            .iter()
            .map(|row| {
                let fields: Vec<&str> = row.iter().map(String::as_str).collect();
                fixed_width(&fields, record_size)
            })
            .collect();
        write_file(dir.path(), &format!("{name}.data"), &data);
        Self::open(dir, name)
    }

    fn open(dir: TempDir, name: &str) -> Self {
        #[allow(clippy::expect_used)]
        let session = Session::open(dir.path(), name).expect("Failed to open test table");
        Self { session, _dir: dir }
    }

    /// Send one line and return the reply text.
    #[allow(clippy::expect_used)]
    pub fn send(&mut self, line: &str) -> String {
        match self.session.handle_line(line).expect("Query should not fail on I/O") {
            LineOutcome::Reply(reply) => reply,
            LineOutcome::Exit => panic!("Expected a reply to '{line}', got exit"),
        }
    }

    /// Feed `script` through the shell loop and return everything it printed.
    #[allow(clippy::expect_used)]
    pub fn run_script(&mut self, script: &str) -> String {
        let mut output = Vec::new();
        shell::run(&mut self.session, script.as_bytes(), &mut output).expect("Shell I/O");
        String::from_utf8(output).expect("Shell output should be UTF-8")
    }
}

/// Open `name` in a directory holding only the given files.
pub fn open_with_files(name: &str, files: &[(&str, &str)]) -> Result<Session, TableError> {
    let dir = new_dir();
    for (file, contents) in files {
        write_file(dir.path(), file, contents);
    }
    Session::open(dir.path(), name)
}

#[allow(clippy::expect_used)]
fn new_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}
