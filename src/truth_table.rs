use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of looking up a single row of a truth table.
///
/// A lookup yields [`True`] or [`False`] for a well-formed input bit string.
/// When the bit string has the wrong length or contains anything other than
/// `0` and `1`, the lookup yields [`Invalid`] instead of failing.
///
/// [`Invalid`]: TruthTableEntry::Invalid
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
pub enum TruthTableEntry {
    /// The expression evaluates to 1 for this row
    True,
    /// The expression evaluates to 0 for this row
    False,
    /// The requested input does not name a row of the table
    Invalid,
}

impl TruthTableEntry {
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Invalid => None,
        }
    }
}

impl From<bool> for TruthTableEntry {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "1",
            Self::False => "0",
            Self::Invalid => "?",
        })
    }
}
