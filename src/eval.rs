use crate::error::{ErrorKind, ExpressionError, Result};
use crate::expression::{Expression, Token};
use crate::operator::OperatorRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Token(Token),
    Bit(bool),
}

/// Evaluates a validated expression for one assignment.
///
/// `inputs[i]` is the value of `order[i]`. Brackets are collapsed innermost
/// first: every closing bracket reduces the span back to its opening bracket
/// into a single bit, which then takes the place of the whole span. The
/// expression is implicitly wrapped in one outer bracket pair.
pub fn evaluate(
    expression: &Expression,
    order: &[char],
    inputs: &[bool],
    registry: &OperatorRegistry,
) -> Result<bool> {
    let mut stack: Vec<Item> = vec![Item::Token(Token::OpenParen)];

    let closed = expression
        .tokens()
        .iter()
        .copied()
        .chain(std::iter::once(Token::CloseParen));

    for token in closed {
        if token != Token::CloseParen {
            stack.push(Item::Token(token));
            continue;
        }

        let open = stack
            .iter()
            .rposition(|item| *item == Item::Token(Token::OpenParen))
            .ok_or_else(|| {
                ExpressionError::new(ErrorKind::UnbalancedBrackets, "unmatched closing bracket")
            })?;

        let bit = reduce_span(&stack[open + 1..], order, inputs, registry)?;
        stack.truncate(open);
        stack.push(Item::Bit(bit));
    }

    match stack.as_slice() {
        [Item::Bit(bit)] => Ok(*bit),
        _ => Err(ExpressionError::new(
            ErrorKind::AmbiguousPrecedence,
            format!("expression {expression} did not reduce to a single value"),
        )),
    }
}

/// Reduces the contents of one bracket pair to a single bit.
///
/// Operands are resolved in encounter order and negated when directly preceded
/// by `!`; the first operator found combines the first two operands.
fn reduce_span(
    span: &[Item],
    order: &[char],
    inputs: &[bool],
    registry: &OperatorRegistry,
) -> Result<bool> {
    let mut operands: Vec<bool> = Vec::with_capacity(2);
    let mut operator = None;

    for (i, item) in span.iter().enumerate() {
        let value = match item {
            Item::Bit(bit) => *bit,
            Item::Token(Token::Var(v)) => lookup(*v, order, inputs)?,
            Item::Token(Token::Symbol(c)) => {
                if operator.is_none() {
                    operator = Some(registry.lookup(*c)?);
                }
                continue;
            }
            Item::Token(_) => continue,
        };

        let negated = i > 0 && span[i - 1] == Item::Token(Token::Not);
        operands.push(value ^ negated);
    }

    log::trace!("reduce {operands:?} with {operator:?}");

    match (operator, operands.as_slice()) {
        (None, [single]) => Ok(*single),
        (Some(op), [left, right]) => Ok(op.apply(*left, *right)),
        _ => Err(ExpressionError::new(
            ErrorKind::AmbiguousPrecedence,
            format!(
                "span with {} operand(s) and {} operator cannot be reduced",
                operands.len(),
                if operator.is_some() { "an" } else { "no" }
            ),
        )),
    }
}

fn lookup(var: char, order: &[char], inputs: &[bool]) -> Result<bool> {
    order
        .iter()
        .position(|v| *v == var)
        .and_then(|i| inputs.get(i).copied())
        .ok_or_else(|| {
            ExpressionError::new(
                ErrorKind::InvalidOrdering,
                format!("variable {var} has no input bit"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eval(expr: &str, inputs: &[bool]) -> bool {
        let registry = OperatorRegistry::new();
        let expression = Expression::parse(expr, &registry).unwrap();
        let order = expression.variables();
        evaluate(&expression, &order, inputs, &registry).unwrap()
    }

    #[test]
    fn single_variable() {
        assert!(eval("A", &[true]));
        assert!(!eval("A", &[false]));
        assert!(eval("!A", &[false]));
        assert!(eval("((A))", &[true]));
    }

    #[test]
    fn negated_subexpression() {
        assert!(eval("!(A+B)", &[false, false]));
        assert!(!eval("!(A+B)", &[false, true]));
        assert!(eval("!(A.B).C", &[true, false, true]));
    }

    #[test]
    fn nested_spans_collapse_innermost_first() {
        // A+(B.(C^D))
        assert!(!eval("A+(B.(C^D))", &[false, true, true, true]));
        assert!(eval("A+(B.(C^D))", &[false, true, true, false]));
        assert!(eval("A+(B.(C^D))", &[true, false, false, false]));
    }

    #[test]
    fn repeated_variables_share_one_input() {
        assert!(!eval("A.!A", &[true]));
        assert!(eval("A+!A", &[false]));
    }

    #[test]
    fn missing_input_is_an_error() {
        let registry = OperatorRegistry::new();
        let expression = Expression::parse("A.B", &registry).unwrap();

        assert_eq!(
            evaluate(&expression, &['A'], &[true], &registry)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidOrdering
        );
    }
}
