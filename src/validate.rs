use std::iter;

use crate::error::{ErrorKind, ExpressionError, Result};
use crate::expression::{strip_whitespace, tokenize, Token};
use crate::operator::OperatorRegistry;

/// Checks that `expression` can be evaluated under `registry`.
///
/// Three checks run in order and the first failure is returned:
/// bracket closure, symbol adjacency and precedence clarity.
pub fn validate(expression: &str, registry: &OperatorRegistry) -> Result<()> {
    validate_tokens(&tokenize(&strip_whitespace(expression)), registry)
}

pub(crate) fn validate_tokens(tokens: &[Token], registry: &OperatorRegistry) -> Result<()> {
    check_brackets(tokens)?;
    check_adjacency(tokens, registry)?;
    check_precedence(tokens, registry)
}

fn check_brackets(tokens: &[Token]) -> Result<()> {
    let mut depth: usize = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ExpressionError::new(
                        ErrorKind::UnbalancedBrackets,
                        format!("closing bracket at position {i} has no opening bracket"),
                    )
                })?;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ExpressionError::new(
            ErrorKind::UnbalancedBrackets,
            format!("{depth} bracket(s) left open"),
        ));
    }

    Ok(())
}

fn check_adjacency(tokens: &[Token], registry: &OperatorRegistry) -> Result<()> {
    let stripped: Vec<Token> = tokens.iter().copied().filter(|t| !t.is_bracket()).collect();

    let is_op = |t: Option<&Token>| matches!(t, Some(Token::Symbol(c)) if registry.is_operator(*c));

    if !stripped.iter().any(|t| t.is_var() || is_op(Some(t))) {
        return Err(ExpressionError::new(
            ErrorKind::EmptyExpression,
            "expression contains no variables or operators",
        ));
    }

    let illegal = |i: usize, what: &str| {
        ExpressionError::new(
            ErrorKind::IllegalAdjacency,
            format!("{what} (at symbol {i} after removing brackets)"),
        )
    };

    for (i, token) in stripped.iter().enumerate() {
        let prev = i.checked_sub(1).and_then(|p| stripped.get(p));
        let next = stripped.get(i + 1);

        match token {
            Token::Symbol(c) if registry.is_operator(*c) => {
                if !matches!(prev, Some(Token::Var(_))) {
                    return Err(illegal(i, &format!("operator {c:?} must follow a variable")));
                }
                if next.is_none() {
                    return Err(illegal(i, &format!("operator {c:?} has no right operand")));
                }
            }
            Token::Symbol(c) => {
                return Err(illegal(i, &format!("{c:?} is not a variable or operator")));
            }
            Token::Var(v) => {
                if !(prev.is_none() || matches!(prev, Some(Token::Not)) || is_op(prev)) {
                    return Err(illegal(
                        i,
                        &format!("variable {v:?} must follow an operator or negation"),
                    ));
                }
            }
            Token::Not => {
                if !matches!(next, Some(Token::Var(_))) {
                    return Err(illegal(i, "negation must be followed by a variable"));
                }
                if !(prev.is_none() || is_op(prev)) {
                    return Err(illegal(i, "negation must follow an operator"));
                }
            }
            Token::OpenParen | Token::CloseParen => {}
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanItem {
    Operand,
    Operator,
}

fn check_precedence(tokens: &[Token], registry: &OperatorRegistry) -> Result<()> {
    // the root frame collects the implicit outer bracket pair
    let mut stack: Vec<Vec<SpanItem>> = vec![Vec::new()];

    let wrapped = iter::once(&Token::OpenParen)
        .chain(tokens)
        .chain(iter::once(&Token::CloseParen));

    for token in wrapped {
        match token {
            Token::OpenParen => stack.push(Vec::new()),
            Token::CloseParen => {
                let span = stack.pop().unwrap_or_default();

                let well_formed = matches!(
                    span.as_slice(),
                    [SpanItem::Operand]
                        | [SpanItem::Operand, SpanItem::Operator, SpanItem::Operand]
                );

                if !well_formed {
                    return Err(ExpressionError::new(
                        ErrorKind::AmbiguousPrecedence,
                        format!(
                            "bracketed span has {} operand(s)/operator(s); expected a single operand or exactly one operation",
                            span.len()
                        ),
                    ));
                }

                if let Some(parent) = stack.last_mut() {
                    parent.push(SpanItem::Operand);
                }
            }
            Token::Var(_) => {
                if let Some(current) = stack.last_mut() {
                    current.push(SpanItem::Operand);
                }
            }
            Token::Symbol(c) if registry.is_operator(*c) => {
                if let Some(current) = stack.last_mut() {
                    current.push(SpanItem::Operator);
                }
            }
            Token::Not | Token::Symbol(_) => {}
        }
    }

    Ok(())
}
