//! Test the index report printed after a table is loaded.

use crate::e2e_tests::helpers::*;

fn sorted_rows(count: usize) -> Vec<Vec<String>> {
    (10..10 + count)
        .map(|id| vec![id.to_string(), format!("n{id}")])
        .collect()
}

#[test]
fn test_students_report() {
    let test = TestTable::students();

    assert_eq!(
        test.session.index_report(),
        "Index column: uin\n\tTree size: 5\n\tTree height: 2\n\
         Index column: netid\n\tTree size: 6\n\tTree height: 2\n"
    );
}

#[test]
fn test_sorted_column_builds_a_perfect_tree() {
    let test = TestTable::with_rows("seq", "8 2\nid 1\nname 0\n", 8, &sorted_rows(15));

    assert_eq!(
        test.session.index_report(),
        "Index column: id\n\tTree size: 15\n\tTree height: 3\n"
    );
}

#[test]
fn test_no_indexed_columns() {
    let mut test = TestTable::with_rows("plain", "8 2\nid 0\nname 0\n", 8, &sorted_rows(3));

    assert_eq!(test.session.index_report(), "");
    assert_eq!(test.send("select name from plain where id = 11"), "name: n11");
}

#[test]
fn test_index_trees_hold_valid_avl_trees() {
    let test = TestTable::with_rows("seq", "8 2\nid 1\nname 1\n", 8, &sorted_rows(40));

    for index in test.session.database().indexes() {
        assert!(index.tree().check_invariants().is_ok(), "{}", index.name);
        assert_eq!(index.tree().size(), 40);
    }
}

#[test]
fn test_empty_table() {
    let mut test = TestTable::with_rows("empty", "8 2\nid 1\nname 0\n", 8, &[]);

    assert_eq!(
        test.session.index_report(),
        "Index column: id\n\tTree size: 0\n\tTree height: -1\n"
    );
    assert_eq!(test.send("select * from empty where id = 10"), "Not found...");
}
