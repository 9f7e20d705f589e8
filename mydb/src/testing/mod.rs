//! Fixtures shared by unit and end-to-end tests.

use std::path::{Path, PathBuf};

/// Record width of the `students` fixture table.
pub const STUDENTS_RECORD_SIZE: usize = 40;

/// Meta-data of the `students` fixture: `uin` and `netid` are indexed.
pub const STUDENTS_META: &str = "40 5\nuin 1\nnetid 1\nfirstname 0\nlastname 0\nyear 0\n";

/// Records of the `students` fixture, in file order.
///
/// `uin` 120 appears twice; the index keeps the first record.
pub const STUDENTS: [[&str; 5]; 6] = [
    ["410", "ghopper", "Grace", "Hopper", "2024"],
    ["120", "aturing", "Alan", "Turing", "2023"],
    ["305", "alovelace", "Ada", "Lovelace", "2024"],
    ["222", "edijkstra", "Edsger", "Dijkstra", "2025"],
    ["518", "bliskov", "Barbara", "Liskov", "2023"],
    ["120", "dknuth", "Donald", "Knuth", "2026"],
];

/// Render one fixed-width record: fields joined by spaces, padded with
/// spaces, terminated by a newline so the line is exactly `width` bytes.
pub fn fixed_width(fields: &[&str], width: usize) -> String {
    let line = fields.join(" ");
    assert!(line.len() < width, "record '{line}' does not fit in {width} bytes");
    format!("{line:<pad$}\n", pad = width - 1)
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    #[allow(clippy::expect_used)]
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

/// Write the `students` table (`students.meta`, `students.data`) into `dir`.
pub fn write_students(dir: &Path) {
    write_file(dir, "students.meta", STUDENTS_META);
    let data: String = STUDENTS
        .iter()
        .map(|row| fixed_width(row, STUDENTS_RECORD_SIZE))
        .collect();
    write_file(dir, "students.data", &data);
}
