//! Binding and evaluation of postfix WHERE conditions.

use quartz_sql_core::{ColumnType, ConditionItem, Operator};

use crate::error::{EngineError, Result};
use crate::row::Row;
use crate::table::Table;
use crate::value::Value;

/// One element of a condition bound against a concrete table.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundItem {
    /// A column reference, resolved to its index in the table.
    Column(usize),
    /// A constant, already parsed into a typed value.
    Literal(Value),
    /// A binary operator.
    Operator(Operator),
}

/// Resolves the raw condition terms against a table: known column names
/// become indices, everything else must parse as a literal — float first
/// (its dot-requiring shape must win over int), then int, then string.
///
/// # Errors
///
/// Fails on a term that is neither a scoped column nor a literal.
pub fn bind(table: &Table, condition: &[ConditionItem]) -> Result<Vec<BoundItem>> {
    condition
        .iter()
        .map(|item| match item {
            ConditionItem::Operator(op) => Ok(BoundItem::Operator(*op)),
            ConditionItem::Literal(lexeme) => {
                if let Some(index) = table.index_of(lexeme) {
                    Ok(BoundItem::Column(index))
                } else {
                    Value::parse(lexeme, ColumnType::Float)
                        .or_else(|| Value::parse(lexeme, ColumnType::Int))
                        .or_else(|| Value::parse(lexeme, ColumnType::String))
                        .map(BoundItem::Literal)
                        .ok_or_else(|| EngineError::UnknownConditionTerm(lexeme.clone()))
                }
            }
        })
        .collect()
}

/// Evaluates a bound postfix condition against one row.
///
/// Operands push onto a value stack; each operator pops its right operand
/// first, then its left. A single boolean must remain at the end.
///
/// # Errors
///
/// Fails on operand-stack underflow, on typed-operation failures, and
/// when the final stack is not exactly one boolean.
pub fn verify(row: &Row, condition: &[BoundItem]) -> Result<bool> {
    let mut stack: Vec<Value> = Vec::new();

    for item in condition {
        match item {
            BoundItem::Column(index) => stack.push(row[*index].clone()),
            BoundItem::Literal(value) => stack.push(value.clone()),
            BoundItem::Operator(op) => {
                let rhs = stack.pop().ok_or(EngineError::MissingOperand(*op))?;
                let lhs = stack.pop().ok_or(EngineError::MissingOperand(*op))?;
                stack.push(lhs.apply(*op, &rhs)?);
            }
        }
    }

    let result = stack.pop();
    if !stack.is_empty() {
        return Err(EngineError::NonBooleanCondition);
    }
    match result {
        Some(Value::Bool(outcome)) => Ok(outcome),
        _ => Err(EngineError::NonBooleanCondition),
    }
}
