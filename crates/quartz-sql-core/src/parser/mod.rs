//! Quartz SQL parser
//!
//! A hand-written recursive descent parser over the lexer's token
//! sequence. Each statement is lowered straight into the flat [`Plan`]
//! the database dispatcher executes; WHERE expressions are translated to
//! postfix with a bracket-free shunting-yard pass.
//!
//! # Grammar
//!
//! ```text
//! query       := 'create' create_tail
//!              | 'drop'   name
//!              | 'insert' 'into' name 'values' value_list
//!              | 'print'  name
//!              | 'select' select_tail
//! create_tail := 'table' name ( '(' col_defs ')'
//!                             | 'as' 'select' select_tail )
//! col_defs    := name TYPE (',' name TYPE)*
//! value_list  := LITERAL (',' LITERAL)*
//! select_tail := ('*' | name (',' name)*) 'from' name (',' name)*
//!                [ 'where' expr ]
//! expr        := infix run of LITERALs and OPERATORs, no brackets
//! ```
//!
//! Names match `[A-Za-z][A-Za-z0-9_]*`; reserved words are excluded by
//! construction since the lexer never classifies them as literals.
//!
//! [`Plan`]: crate::plan::Plan

mod core;
mod postfix;

pub use self::core::{parse_query, Parser};
pub use self::postfix::{infix_to_postfix, precedence};
