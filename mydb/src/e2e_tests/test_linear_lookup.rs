//! Test equality lookups on columns without an index.

use crate::e2e_tests::helpers::*;

#[test]
fn test_scan_returns_every_match_in_file_order() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select netid from students where year = 2023"),
        "netid: aturing\nnetid: bliskov"
    );
}

#[test]
fn test_scan_select_all() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select * from students where year = 2024"),
        "uin: 410\nnetid: ghopper\nfirstname: Grace\nlastname: Hopper\nyear: 2024\n\
         uin: 305\nnetid: alovelace\nfirstname: Ada\nlastname: Lovelace\nyear: 2024"
    );
}

#[test]
fn test_scan_single_match() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select uin from students where lastname = Knuth"),
        "uin: 120"
    );
}

#[test]
fn test_scan_miss() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select * from students where firstname = Linus"),
        "Not found..."
    );
}

#[test]
fn test_scan_is_case_sensitive() {
    let mut test = TestTable::students();

    assert_eq!(
        test.send("select * from students where lastname = hopper"),
        "Not found..."
    );
}
