//! Syntax errors shared by the lexer and the parser.

use thiserror::Error;

use crate::lexer::Span;

/// Result type alias for front-end operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// A lexer or parser rejection.
///
/// Every variant renders to a human-readable message naming the statement
/// being parsed and, where it applies, the failing entry number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// A string literal was opened but never closed.
    #[error("unterminated string literal starting at byte {}", .0.start)]
    UnterminatedString(Span),

    /// The query contained no tokens at all.
    #[error("empty query")]
    EmptyQuery,

    /// The first token was not a command.
    #[error("expected a command at the start of the query, found {found}")]
    ExpectedCommand {
        /// What the first token was instead.
        found: String,
    },

    /// A command that the lexer recognizes but the engine does not run.
    #[error("the {0} command is recognized but not supported")]
    UnsupportedCommand(crate::lexer::Command),

    /// A specific token was required and something else was found.
    #[error("{statement}: expected {expected}, found {found}")]
    Expected {
        /// Statement being parsed (e.g. `CREATE TABLE`).
        statement: &'static str,
        /// What the grammar required at this point.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// The token stream ended while the grammar required more input.
    #[error("{statement}: unexpected end of query, expected {expected}")]
    UnexpectedEnd {
        /// Statement being parsed.
        statement: &'static str,
        /// What the grammar required at this point.
        expected: String,
    },

    /// A reserved word appeared where a table or column name is required.
    #[error("{statement}: reserved word {found} can't be used as a name")]
    ReservedName {
        /// Statement being parsed.
        statement: &'static str,
        /// The reserved word that was found.
        found: String,
    },

    /// A name did not match `[A-Za-z][A-Za-z0-9_]*`.
    #[error("{statement}: {name} contains forbidden characters")]
    InvalidIdentifier {
        /// Statement being parsed.
        statement: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Tokens remained after the statement grammar completed.
    #[error("{statement}: statement doesn't end after {found}")]
    TrailingTokens {
        /// Statement being parsed.
        statement: &'static str,
        /// First leftover token.
        found: String,
    },

    /// A WHERE clause with no tokens after `where`.
    #[error("WHERE clause is empty")]
    EmptyCondition,

    /// A WHERE clause token that is neither a literal nor an operator.
    #[error("WHERE clause: expected a literal or an operator, found {found}")]
    ConditionToken {
        /// What was found instead.
        found: String,
    },
}
