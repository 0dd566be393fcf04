use std::fmt::{self, Display};
use std::str::FromStr;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{ErrorKind, ExpressionError, Result};

/// The unary negation symbol. It is fixed and can never be rebound.
pub const NEGATION: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Xor,
}

impl Operator {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::And, Self::Or, Self::Xor]
    }

    fn matches(&self, s: &str) -> bool {
        match self {
            Self::And => matches!(s, "and" | "And" | "AND"),
            Self::Or => matches!(s, "or" | "Or" | "OR"),
            Self::Xor => matches!(s, "xor" | "Xor" | "XOR"),
        }
    }

    /// Applies the operator to its two operands, left operand first.
    pub const fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left & right,
            Self::Or => left | right,
            Self::Xor => left ^ right,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
        })
    }
}

impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as boolean operator"))
            .copied()
    }
}

/// Symbol table of the binary operators understood by a single truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorRegistry {
    bindings: FxHashMap<char, Operator>,
    // registration order, used to pick the primary symbol of an operator
    order: Vec<char>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        for (symbol, op) in [
            ('.', Operator::And),
            ('+', Operator::Or),
            ('^', Operator::Xor),
            ('&', Operator::And),
            ('|', Operator::Or),
            ('#', Operator::Xor),
        ] {
            registry.bindings.insert(symbol, op);
            registry.order.push(symbol);
        }

        registry
    }
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry without any bindings.
    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, symbol: &str, op: Operator) -> Result<()> {
        let symbol = self.free_symbol(symbol)?;

        log::debug!("register operator {symbol:?} as {op}");

        self.bindings.insert(symbol, op);
        self.order.push(symbol);
        Ok(())
    }

    /// Moves the binding of `old` over to `new`.
    pub fn rename(&mut self, old: char, new: &str) -> Result<()> {
        let op = self.lookup(old)?;
        let new = self.free_symbol(new)?;

        log::debug!("rename operator {old:?} ({op}) to {new:?}");

        self.bindings.remove(&old);
        self.bindings.insert(new, op);
        if let Some(slot) = self.order.iter_mut().find(|s| **s == old) {
            *slot = new;
        }
        Ok(())
    }

    pub fn lookup(&self, symbol: char) -> Result<Operator> {
        self.bindings.get(&symbol).copied().ok_or_else(|| {
            ExpressionError::new(
                ErrorKind::UnknownOperator,
                format!("{symbol:?} is not a registered operator"),
            )
        })
    }

    pub fn is_operator(&self, symbol: char) -> bool {
        self.bindings.contains_key(&symbol)
    }

    /// The earliest registered symbol that is still bound to `op`.
    pub fn symbol_for(&self, op: Operator) -> Option<char> {
        self.order
            .iter()
            .copied()
            .find(|s| self.bindings.get(s) == Some(&op))
    }

    fn free_symbol(&self, symbol: &str) -> Result<char> {
        let Some((symbol,)) = symbol.chars().collect_tuple() else {
            return Err(ExpressionError::new(
                ErrorKind::InvalidOperator,
                format!("operator {symbol:?} must be exactly one character"),
            ));
        };

        if symbol.is_alphabetic()
            || symbol.is_ascii_digit()
            || symbol.is_whitespace()
            || matches!(symbol, '(' | ')' | NEGATION)
        {
            return Err(ExpressionError::new(
                ErrorKind::InvalidOperator,
                format!("{symbol:?} is reserved and cannot be an operator"),
            ));
        }

        if self.is_operator(symbol) {
            return Err(ExpressionError::new(
                ErrorKind::InvalidOperator,
                format!("{symbol:?} is already bound to {}", self.bindings[&symbol]),
            ));
        }

        Ok(symbol)
    }
}
