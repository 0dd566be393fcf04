use std::fmt;

/// The closed set of failures an expression, an operator binding or an
/// ordering can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnbalancedBrackets,
    EmptyExpression,
    IllegalAdjacency,
    AmbiguousPrecedence,
    UnknownOperator,
    InvalidOperator,
    InvalidOrdering,
    /// No unused single-letter variable remains for renaming during a merge.
    AlphabetExhausted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::UnbalancedBrackets => "unbalanced brackets",
            Self::EmptyExpression => "empty expression",
            Self::IllegalAdjacency => "illegal adjacency",
            Self::AmbiguousPrecedence => "ambiguous precedence",
            Self::UnknownOperator => "unknown operator",
            Self::InvalidOperator => "invalid operator",
            Self::InvalidOrdering => "invalid ordering",
            Self::AlphabetExhausted => "alphabet exhausted",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ExpressionError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ExpressionError {}

pub type Result<T> = std::result::Result<T, ExpressionError>;
