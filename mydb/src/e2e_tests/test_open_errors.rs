//! Test failures while loading a table.

use crate::e2e_tests::helpers::*;
use crate::table::{MetaError, TableError};

#[test]
fn test_missing_meta_file() {
    let Err(error) = open_with_files("students", &[]) else {
        panic!("expected an error");
    };

    assert!(matches!(error, TableError::Open { ref path, .. } if path.ends_with("students.meta")));
    assert!(error.to_string().starts_with("couldn't open file '"));
}

#[test]
fn test_missing_data_file() {
    let Err(error) = open_with_files("t", &[("t.meta", "8 1\nid 1\n")]) else {
        panic!("expected an error");
    };

    assert!(matches!(error, TableError::Open { ref path, .. } if path.ends_with("t.data")));
}

#[test]
fn test_invalid_index_flag() {
    let Err(error) = open_with_files("t", &[("t.meta", "8 1\nid 2\n"), ("t.data", "")]) else {
        panic!("expected an error");
    };

    assert!(matches!(
        error,
        TableError::Meta {
            source: MetaError::InvalidFlag { .. },
            ..
        }
    ));
}

#[test]
fn test_record_with_missing_fields() {
    // Second record has one field but the table declares two columns.
    let data = "1 a   \n2     \n";
    let Err(error) = open_with_files("t", &[("t.meta", "7 2\nid 1\nname 0\n"), ("t.data", data)])
    else {
        panic!("expected an error");
    };

    assert!(matches!(
        error,
        TableError::ShortRecord {
            offset: 7,
            expected: 2,
            found: 1
        }
    ));
}
