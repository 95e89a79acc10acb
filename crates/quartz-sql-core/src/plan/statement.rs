//! Executable query plans.
//!
//! The parser lowers each statement directly into the flat data the
//! database dispatcher consumes, rather than into a nested syntax tree.

use std::fmt;

use crate::lexer::Operator;

use super::ColumnDef;

/// One element of a postfix WHERE condition, still unresolved: a literal
/// is either a column name or a value, which only binding against a
/// concrete table can decide.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionItem {
    /// An unresolved lexeme (column name or value literal).
    Literal(String),
    /// A binary operator.
    Operator(Operator),
}

impl fmt::Display for ConditionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Operator(op) => f.write_str(op.as_str()),
        }
    }
}

/// The lowered form of a SELECT (also embedded in CREATE TABLE AS).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// Requested column names; empty means `*`.
    pub columns: Vec<String>,
    /// FROM tables, in source order.
    pub tables: Vec<String>,
    /// Postfix WHERE condition; empty means no WHERE clause.
    pub condition: Vec<ConditionItem>,
}

/// A parsed statement, ready for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// `create table NAME (c1 t1, …)`
    CreateTable {
        /// Table to create.
        table: String,
        /// Column definitions in source order.
        columns: Vec<ColumnDef>,
    },
    /// `create table NAME as select …`
    CreateTableAs {
        /// Table to create.
        table: String,
        /// The SELECT whose result is installed.
        query: SelectQuery,
    },
    /// `drop NAME`
    DropTable {
        /// Table to drop.
        table: String,
    },
    /// `print NAME`
    PrintTable {
        /// Table to print.
        table: String,
    },
    /// `insert into NAME values v1, …`
    InsertInto {
        /// Target table.
        table: String,
        /// Raw value lexemes, parsed against column types at execution.
        values: Vec<String>,
    },
    /// `select … from … [where …]`
    Select(SelectQuery),
}
