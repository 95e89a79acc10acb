//! Tests for INSERT INTO, DROP, and PRINT parsing.

mod common;
use common::*;

use quartz_sql_core::Plan;

#[test]
fn insert_collects_raw_lexemes() {
    let plan = parse("insert into t values 1, 2.5, 'a b'");
    assert_eq!(
        plan,
        Plan::InsertInto {
            table: String::from("t"),
            values: vec![
                String::from("1"),
                String::from("2.5"),
                String::from("'a b'"),
            ],
        }
    );
}

#[test]
fn insert_single_value_needs_no_separator() {
    let plan = parse("insert into t values -7");
    assert_eq!(
        plan,
        Plan::InsertInto {
            table: String::from("t"),
            values: vec![String::from("-7")],
        }
    );
}

#[test]
fn insert_errors() {
    // Missing `into`.
    let _ = parse_err("insert t values 1");
    // Missing table name.
    let _ = parse_err("insert into values 1");
    // Missing `values`.
    let _ = parse_err("insert into t 1, 2");
    // Missing value after a comma.
    let _ = parse_err("insert into t values 1,");
    // A separator where a value belongs.
    let _ = parse_err("insert into t values 1, , 2");
    // No values at all.
    let _ = parse_err("insert into t values");
}

#[test]
fn drop_and_print_take_exactly_one_name() {
    assert_eq!(
        parse("drop t"),
        Plan::DropTable {
            table: String::from("t")
        }
    );
    assert_eq!(
        parse("print t"),
        Plan::PrintTable {
            table: String::from("t")
        }
    );

    let _ = parse_err("drop");
    let _ = parse_err("print");
    let _ = parse_err("drop t extra");
    let _ = parse_err("print t extra");
    let _ = parse_err("drop into");
    let _ = parse_err("print create");
}
