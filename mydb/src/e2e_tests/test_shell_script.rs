//! Test a whole interactive session through the shell loop.

use crate::e2e_tests::helpers::*;

#[test]
fn test_script_until_exit() {
    let mut test = TestTable::students();

    let output = test.run_script(
        "select firstname from students where uin = 222\n\
         select * from nowhere where uin = 1\n\
         select uin from students where year = 2026\n\
         exit\n\
         select * from students where uin = 410\n",
    );

    assert_eq!(
        output,
        "\nEnter query> firstname: Edsger\n\
         \nEnter query> Invalid table name, ignored...\n\
         \nEnter query> uin: 120\n\
         \nEnter query> "
    );
}

#[test]
fn test_script_until_end_of_input() {
    let mut test = TestTable::students();

    let output = test.run_script("select netid from students where uin = 410\r\n");

    assert_eq!(output, "\nEnter query> netid: ghopper\n\nEnter query> \n");
}

#[test]
fn test_exit_must_match_exactly() {
    let mut test = TestTable::students();

    let output = test.run_script("EXIT\nexit now\nexit\n");

    assert_eq!(
        output,
        "\nEnter query> Unknown query, ignored...\
         \n\nEnter query> Unknown query, ignored...\
         \n\nEnter query> "
    );
}
