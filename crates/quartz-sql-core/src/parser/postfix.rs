//! Operator precedence and infix-to-postfix translation for WHERE clauses.
//!
//! The dialect has no parentheses in expressions, so the shunting-yard
//! loop degenerates to: literals go straight to the output, and an
//! incoming operator first pops every stacked operator of
//! greater-or-equal precedence (all operators are left-associative).

use crate::error::{Result, SyntaxError};
use crate::lexer::{Operator, Token, TokenKind};
use crate::plan::ConditionItem;

/// Returns the binding strength of an operator (higher binds tighter).
#[must_use]
pub const fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Plus | Operator::Minus | Operator::Star | Operator::Slash => 2,
        Operator::Lt
        | Operator::LtEq
        | Operator::Gt
        | Operator::GtEq
        | Operator::Eq
        | Operator::NotEq => 1,
        Operator::And | Operator::Or => 0,
    }
}

/// Translates an infix WHERE token run into a postfix condition.
///
/// # Errors
///
/// Fails on an empty run and on any token that is neither a literal nor
/// an operator.
pub fn infix_to_postfix(tokens: &[Token]) -> Result<Vec<ConditionItem>> {
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyCondition);
    }

    let mut operators: Vec<Operator> = Vec::new();
    let mut postfix = Vec::with_capacity(tokens.len());

    for token in tokens {
        match &token.kind {
            TokenKind::Literal(lexeme) => postfix.push(ConditionItem::Literal(lexeme.clone())),
            TokenKind::Operator(op) => {
                while let Some(&top) = operators.last() {
                    if precedence(top) < precedence(*op) {
                        break;
                    }
                    operators.pop();
                    postfix.push(ConditionItem::Operator(top));
                }
                operators.push(*op);
            }
            other => {
                return Err(SyntaxError::ConditionToken {
                    found: other.to_string(),
                })
            }
        }
    }

    while let Some(op) = operators.pop() {
        postfix.push(ConditionItem::Operator(op));
    }

    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn postfix_of(infix: &str) -> String {
        let tokens = Lexer::new(infix).tokenize().expect("lexing should succeed");
        let items = infix_to_postfix(&tokens).expect("translation should succeed");
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_precedence_ordering() {
        // Arithmetic binds tighter than comparison, comparison tighter
        // than the logical connectives.
        assert!(precedence(Operator::Star) > precedence(Operator::Lt));
        assert!(precedence(Operator::Lt) > precedence(Operator::And));
        assert_eq!(precedence(Operator::And), precedence(Operator::Or));
        assert_eq!(precedence(Operator::Plus), precedence(Operator::Slash));
    }

    #[test]
    fn test_mixed_precedence_translation() {
        assert_eq!(postfix_of("c1 > 1 and c1 < 4"), "c1 1 > c1 4 < and");
    }

    #[test]
    fn test_arithmetic_inside_comparison() {
        assert_eq!(postfix_of("c1 + 1 > c2 * 2"), "c1 1 + c2 2 * >");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix_of("1 - 2 - 3"), "1 2 - 3 -");
        assert_eq!(postfix_of("8 / 4 / 2"), "8 4 / 2 /");
    }

    #[test]
    fn test_length_is_preserved() {
        let tokens = Lexer::new("c1 > 1 and c2 <= 3 or c3 = 'x'")
            .tokenize()
            .expect("lexing should succeed");
        let items = infix_to_postfix(&tokens).expect("translation should succeed");
        assert_eq!(items.len(), tokens.len());
    }

    #[test]
    fn test_empty_condition() {
        assert_eq!(infix_to_postfix(&[]), Err(SyntaxError::EmptyCondition));
    }

    #[test]
    fn test_rejects_non_expression_tokens() {
        let tokens = Lexer::new("c1 > ( 1")
            .tokenize()
            .expect("lexing should succeed");
        assert_eq!(
            infix_to_postfix(&tokens),
            Err(SyntaxError::ConditionToken {
                found: String::from("(")
            })
        );
    }
}
