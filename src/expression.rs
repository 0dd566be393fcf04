use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;
use crate::operator::OperatorRegistry;
use crate::validate;

lazy_static! {
    static ref TOKENIZER: Regex =
        Regex::new(r"(?P<open>\()|(?P<close>\))|(?P<not>!)|(?P<var>[A-Z])|(?P<symbol>\S)")
            .expect("tokenizer pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    OpenParen,
    CloseParen,
    Not,
    Var(char),
    /// Any other character; only meaningful if it is a registered operator.
    Symbol(char),
}

impl Token {
    pub const fn is_var(&self) -> bool {
        matches!(self, Self::Var(_))
    }

    pub const fn is_bracket(&self) -> bool {
        matches!(self, Self::OpenParen | Self::CloseParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::Not => write!(f, "!"),
            Self::Var(c) | Self::Symbol(c) => write!(f, "{c}"),
        }
    }
}

/// Removes every whitespace character from a raw expression.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn tokenize(src: &str) -> Vec<Token> {
    TOKENIZER
        .captures_iter(src)
        .filter_map(|c| {
            if c.name("open").is_some() {
                Some(Token::OpenParen)
            } else if c.name("close").is_some() {
                Some(Token::CloseParen)
            } else if c.name("not").is_some() {
                Some(Token::Not)
            } else if let Some(var) = c.name("var") {
                var.as_str().chars().next().map(Token::Var)
            } else {
                c.name("symbol")
                    .and_then(|s| s.as_str().chars().next())
                    .map(Token::Symbol)
            }
        })
        .collect()
}

/// A validated expression: its whitespace-free source text and token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
    tokens: Vec<Token>,
}

impl Expression {
    /// Strips whitespace, tokenizes and validates `raw` against `registry`.
    pub fn parse(raw: &str, registry: &OperatorRegistry) -> Result<Self> {
        let source = strip_whitespace(raw);
        let tokens = tokenize(&source);

        validate::validate_tokens(&tokens, registry)?;

        Ok(Self { source, tokens })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Distinct variables in first-occurrence order.
    pub fn variables(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Var(v) => Some(*v),
                _ => None,
            })
            .unique()
            .collect()
    }

    pub fn contains_symbol(&self, symbol: char) -> bool {
        self.source.contains(symbol)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_classifies_characters() {
        assert_eq!(
            tokenize("!(A.b)"),
            vec![
                Token::Not,
                Token::OpenParen,
                Token::Var('A'),
                Token::Symbol('.'),
                Token::Symbol('b'),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn parse_strips_whitespace() {
        let registry = OperatorRegistry::new();
        let expr = Expression::parse(" ( A . B ) + C\t", &registry).unwrap();

        assert_eq!(expr.as_str(), "(A.B)+C");
        assert_eq!(expr.to_string(), "(A.B)+C");
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let registry = OperatorRegistry::new();
        let expr = Expression::parse("(C.A)+(A^B)", &registry).unwrap();

        assert_eq!(expr.variables(), vec!['C', 'A', 'B']);
    }
}
