#![allow(dead_code)]

use quartz_sql_core::{parse_query, Plan, SelectQuery, SyntaxError};

pub fn parse(query: &str) -> Plan {
    parse_query(query).unwrap_or_else(|e| panic!("failed to parse: {query}\nerror: {e}"))
}

pub fn parse_err(query: &str) -> SyntaxError {
    parse_query(query).expect_err(&format!("expected a syntax error for: {query}"))
}

pub fn parse_select(query: &str) -> SelectQuery {
    match parse(query) {
        Plan::Select(select) => select,
        other => panic!("expected a SELECT plan, got {other:?}"),
    }
}

/// Renders a SELECT's postfix condition as space-joined lexemes.
pub fn postfix(query: &str) -> String {
    parse_select(query)
        .condition
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
