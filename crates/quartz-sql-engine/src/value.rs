//! Scalar values and the typed operator table.
//!
//! A [`Value`] carries its runtime tag; every binary operation dispatches
//! on the tag pair and rejects pairs the dialect leaves undefined.
//! Booleans exist only transiently, as the results of comparison and
//! logical operators inside condition evaluation; they are never stored
//! in a table.

use std::fmt;

use once_cell::sync::Lazy;
use quartz_sql_core::{ColumnType, Operator};
use regex::Regex;

use crate::error::{EngineError, Result};

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("int pattern is valid"));
static FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*\.\d*$").expect("float pattern is valid"));
static STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'.*'$").expect("string pattern is valid"));

/// A typed scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float; NaN marks the result of float division by zero.
    Float(f64),
    /// Character string, stored without the enclosing quotes.
    Str(String),
    /// Comparison/logical result; only lives on the evaluation stack.
    Bool(bool),
}

impl Value {
    /// Parses a raw lexeme against a declared column type.
    ///
    /// Returns `None` when the lexeme does not match the type's shape:
    /// ints need `-?\d+`, floats need a dot with at least one digit on
    /// some side of it, strings need enclosing single quotes.
    #[must_use]
    pub fn parse(lexeme: &str, column_type: ColumnType) -> Option<Self> {
        match column_type {
            ColumnType::Int => {
                if INT_RE.is_match(lexeme) {
                    lexeme.parse().ok().map(Self::Int)
                } else {
                    None
                }
            }
            ColumnType::Float => {
                let has_digit = lexeme.chars().any(|c| c.is_ascii_digit());
                if has_digit && FLOAT_RE.is_match(lexeme) {
                    lexeme.parse().ok().map(Self::Float)
                } else {
                    None
                }
            }
            ColumnType::String => {
                if STRING_RE.is_match(lexeme) {
                    Some(Self::Str(String::from(&lexeme[1..lexeme.len() - 1])))
                } else {
                    None
                }
            }
        }
    }

    /// The lowercase tag name, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
        }
    }

    /// Applies a binary operator with `self` as the left operand.
    ///
    /// # Errors
    ///
    /// Fails on mismatched tags, on operators the operand type does not
    /// define, on integer division by zero, and on i64 overflow.
    pub fn apply(&self, op: Operator, rhs: &Self) -> Result<Self> {
        match op {
            Operator::Plus | Operator::Minus | Operator::Star | Operator::Slash => {
                self.arithmetic(op, rhs)
            }
            Operator::Lt
            | Operator::LtEq
            | Operator::Gt
            | Operator::GtEq
            | Operator::Eq
            | Operator::NotEq => self.compare(op, rhs),
            Operator::And | Operator::Or => self.logical(op, rhs),
        }
    }

    fn arithmetic(&self, op: Operator, rhs: &Self) -> Result<Self> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                let result = match op {
                    Operator::Plus => a.checked_add(*b),
                    Operator::Minus => a.checked_sub(*b),
                    Operator::Star => a.checked_mul(*b),
                    Operator::Slash if *b == 0 => return Err(EngineError::DivisionByZero),
                    Operator::Slash => a.checked_div(*b),
                    _ => return Err(self.unsupported(op, rhs)),
                };
                result.map(Self::Int).ok_or(EngineError::IntegerOverflow)
            }
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() || b.is_nan() {
                    return Ok(Self::Float(f64::NAN));
                }
                let result = match op {
                    Operator::Plus => a + b,
                    Operator::Minus => a - b,
                    Operator::Star => a * b,
                    Operator::Slash if *b == 0.0 => f64::NAN,
                    Operator::Slash => a / b,
                    _ => return Err(self.unsupported(op, rhs)),
                };
                Ok(Self::Float(result))
            }
            (Self::Str(a), Self::Str(b)) if op == Operator::Plus => {
                Ok(Self::Str(format!("{a}{b}")))
            }
            _ => Err(self.unsupported(op, rhs)),
        }
    }

    fn compare(&self, op: Operator, rhs: &Self) -> Result<Self> {
        let outcome = match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => compare_with(op, a, b),
            // Any comparison against NaN is false, != included.
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() || b.is_nan() {
                    Some(false)
                } else {
                    compare_with(op, a, b)
                }
            }
            (Self::Str(a), Self::Str(b)) => compare_with(op, a, b),
            _ => None,
        };
        outcome
            .map(Self::Bool)
            .ok_or_else(|| self.unsupported(op, rhs))
    }

    fn logical(&self, op: Operator, rhs: &Self) -> Result<Self> {
        match (self, rhs) {
            (Self::Bool(a), Self::Bool(b)) => {
                let result = match op {
                    Operator::And => *a && *b,
                    Operator::Or => *a || *b,
                    _ => return Err(self.unsupported(op, rhs)),
                };
                Ok(Self::Bool(result))
            }
            _ => Err(self.unsupported(op, rhs)),
        }
    }

    fn unsupported(&self, op: Operator, rhs: &Self) -> EngineError {
        if std::mem::discriminant(self) == std::mem::discriminant(rhs) {
            EngineError::UndefinedOperator {
                op,
                operand: self.type_name(),
            }
        } else {
            EngineError::OperandMismatch {
                op,
                lhs: self.type_name(),
                rhs: rhs.type_name(),
            }
        }
    }
}

fn compare_with<T: PartialOrd + ?Sized>(op: Operator, a: &T, b: &T) -> Option<bool> {
    match op {
        Operator::Lt => Some(a < b),
        Operator::LtEq => Some(a <= b),
        Operator::Gt => Some(a > b),
        Operator::GtEq => Some(a >= b),
        Operator::Eq => Some(a == b),
        Operator::NotEq => Some(a != b),
        _ => None,
    }
}

impl fmt::Display for Value {
    /// Canonical rendering: ints in decimal, floats always with a
    /// fractional part (`2.0`, `0.3`, `NaN`), strings re-quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => {
                if x.is_nan() {
                    f.write_str("NaN")
                } else if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
