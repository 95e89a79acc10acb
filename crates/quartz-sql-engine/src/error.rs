//! Error types for the relational engine.

use quartz_sql_core::{ColumnType, Operator, SyntaxError};
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Any failure a statement can produce past the lexer and parser, plus a
/// transparent wrapper for the front end so the REPL handles one type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A lexer or parser rejection.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// CREATE named a table that already exists.
    #[error("a table named {0} already exists in memory")]
    DuplicateTable(String),

    /// A statement named a table that does not exist.
    #[error("a table named {0} doesn't exist in memory")]
    UnknownTable(String),

    /// A query named a column that no scoped table provides.
    #[error("a column named {0} doesn't exist inside the specified tables list")]
    UnknownColumn(String),

    /// CREATE TABLE repeated a column name.
    #[error("column {0} is defined twice in the column list")]
    DuplicateColumn(String),

    /// A query requested the same column name twice.
    #[error("you can't have two columns with the same name in a query ({0})")]
    DuplicateQueryColumn(String),

    /// INSERT supplied more values than the table has columns.
    #[error("there are too many values in the values list")]
    TooManyValues,

    /// INSERT supplied fewer values than the table has columns.
    #[error("there are not enough values in the values list")]
    TooFewValues,

    /// An INSERT value did not parse as its column's declared type.
    #[error("value number {position} isn't of type {expected}")]
    ValueType {
        /// Zero-based position in the values list.
        position: usize,
        /// The declared column type.
        expected: ColumnType,
    },

    /// An operator was applied to operands with different type tags.
    #[error("operands of {op} belong to different types ({lhs} and {rhs})")]
    OperandMismatch {
        /// The operator being applied.
        op: Operator,
        /// Type tag of the left operand.
        lhs: &'static str,
        /// Type tag of the right operand.
        rhs: &'static str,
    },

    /// An operator has no definition for this operand type.
    #[error("operator {op} is not defined for {operand} values")]
    UndefinedOperator {
        /// The operator being applied.
        op: Operator,
        /// The shared type tag of the operands.
        operand: &'static str,
    },

    /// Integer division by zero (the float case yields NaN instead).
    #[error("integer division by zero")]
    DivisionByZero,

    /// Integer arithmetic left the i64 range.
    #[error("integer arithmetic overflowed")]
    IntegerOverflow,

    /// A condition term is neither a scoped column nor a parseable literal.
    #[error("condition term {0} is neither a column in scope nor a literal")]
    UnknownConditionTerm(String),

    /// Postfix evaluation ran out of operands for an operator.
    #[error("operator {0} in the condition is missing an operand")]
    MissingOperand(Operator),

    /// The condition left anything other than a single boolean on the stack.
    #[error("the condition did not reduce to a single boolean")]
    NonBooleanCondition,

    /// A reorder vector whose length differs from the column count.
    #[error("a new position must be given for every column ({expected} expected, {got} given)")]
    ReorderLength {
        /// The table's column count.
        expected: usize,
        /// Length of the supplied order.
        got: usize,
    },

    /// A reorder position that is out of range or repeated.
    #[error("reorder position {0} is out of range or repeated")]
    ReorderIndex(usize),
}
