//! Test equality lookups on indexed columns.

use crate::e2e_tests::helpers::*;

#[test]
fn test_lookup_by_uin() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select lastname from students where uin = 410"),
        "lastname: Hopper"
    );
    assert_eq!(
        test.send("select year from students where uin = 518"),
        "year: 2023"
    );
}

#[test]
fn test_lookup_by_netid_select_all() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select * from students where netid = alovelace"),
        "uin: 305\nnetid: alovelace\nfirstname: Ada\nlastname: Lovelace\nyear: 2024"
    );
}

#[test]
fn test_duplicate_value_returns_first_record() {
    let mut test = TestTable::students();

    // Both Turing and Knuth have uin 120; the index points at the first.
    assert_eq!(
        test.send("select * from students where uin = 120"),
        "uin: 120\nnetid: aturing\nfirstname: Alan\nlastname: Turing\nyear: 2023"
    );
}

#[test]
fn test_indexed_miss() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select * from students where uin = 121"),
        "Not found..."
    );
    assert_eq!(
        test.send("select uin from students where netid = ghost"),
        "Not found..."
    );
}

#[test]
fn test_every_record_is_reachable_through_its_index() {
    let mut test = TestTable::students();

    for (netid, uin) in [
        ("ghopper", "410"),
        ("aturing", "120"),
        ("alovelace", "305"),
        ("edijkstra", "222"),
        ("bliskov", "518"),
        ("dknuth", "120"),
    ] {
        assert_eq!(
            test.send(&format!("select uin from students where netid = {netid}")),
            format!("uin: {uin}")
        );
    }
}
