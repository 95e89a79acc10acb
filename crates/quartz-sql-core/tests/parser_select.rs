//! Tests for SELECT parsing and the WHERE postfix translation.

mod common;
use common::*;

#[test]
fn select_star_leaves_the_columns_list_empty() {
    let query = parse_select("select * from t");
    assert!(query.columns.is_empty());
    assert_eq!(query.tables, vec![String::from("t")]);
    assert!(query.condition.is_empty());
}

#[test]
fn select_lists_columns_and_tables_in_order() {
    let query = parse_select("select c1, c2, c3 from t1, t2");
    assert_eq!(
        query.columns,
        vec![String::from("c1"), String::from("c2"), String::from("c3")]
    );
    assert_eq!(query.tables, vec![String::from("t1"), String::from("t2")]);
}

#[test]
fn where_translates_to_postfix() {
    assert_eq!(postfix("select c1 from t where c1 > 1 and c1 < 4"), "c1 1 > c1 4 < and");
}

#[test]
fn where_respects_arithmetic_precedence() {
    assert_eq!(
        postfix("select c1 from t where c1 + 1 * 2 > 3"),
        "c1 1 2 * + 3 >"
    );
}

#[test]
fn where_chains_logical_operators_left_to_right() {
    assert_eq!(
        postfix("select c1 from t where c1 > 1 and c1 < 4 or c1 = 9"),
        "c1 1 > c1 4 < and c1 9 = or"
    );
}

#[test]
fn postfix_has_the_same_length_as_the_infix_run() {
    let query = parse_select("select c1 from t where c1 + 1 > 2 and c2 = 'x'");
    // 9 infix tokens after `where` become 9 postfix items.
    assert_eq!(query.condition.len(), 9);
}

#[test]
fn missing_where_means_an_empty_condition() {
    let query = parse_select("select c1 from t");
    assert!(query.condition.is_empty());
}

#[test]
fn select_errors() {
    // Nothing after `select`.
    let _ = parse_err("select");
    // Missing FROM.
    let _ = parse_err("select c1, c2");
    // Missing table list.
    let _ = parse_err("select c1 from");
    // Missing column after a comma.
    let _ = parse_err("select c1, from t");
    // Reserved word as column name.
    let _ = parse_err("select table from t");
    // Garbage where `where` belongs.
    let _ = parse_err("select c1 from t garbage");
    // Empty WHERE clause.
    let _ = parse_err("select c1 from t where");
    // A separator inside the condition.
    let _ = parse_err("select c1 from t where ( c1 > 1 )");
}
