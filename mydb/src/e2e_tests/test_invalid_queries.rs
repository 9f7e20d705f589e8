//! Test that malformed statements are rejected with the right message.

use crate::e2e_tests::helpers::*;

#[test]
fn test_rejection_messages() {
    let mut test = TestTable::students();

    for (line, expected) in [
        ("update students set year = 1", "Unknown query, ignored..."),
        ("", "Unknown query, ignored..."),
        ("select gpa from students where uin = 1", "Invalid select column, ignored..."),
        ("select * into students where uin = 1", "Invalid select query, ignored..."),
        ("select * from faculty where uin = 1", "Invalid table name, ignored..."),
        ("select * from students having uin = 1", "Invalid select query, ignored..."),
        ("select * from students where gpa = 1", "Invalid where column, ignored..."),
        ("select * from students where uin < 1", "Invalid select query, ignored..."),
        ("select * from students where uin = 1 limit 1", "Query too long, ignored..."),
        ("select * from students where", "Invalid select query, ignored..."),
    ] {
        assert_eq!(test.send(line), expected, "line: {line:?}");
    }
}

#[test]
fn test_session_survives_rejections() {
    let mut test = TestTable::students();

    assert_eq!(test.send("drop table students"), "Unknown query, ignored...");
    assert_eq!(
        test.send("select firstname from students where netid = bliskov"),
        "firstname: Barbara"
    );
}
