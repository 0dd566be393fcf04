#![warn(clippy::disallowed_types)]

pub use error::{ErrorKind, ExpressionError};
pub use operator::{Operator, OperatorRegistry, NEGATION};
pub use table::{Row, TruthTable};
pub use truth_table::TruthTableEntry;
pub use validate::validate;

pub mod error;
pub mod eval;
pub mod expression;
pub mod merge;
pub mod operator;
pub mod table;
pub mod table_io;
pub mod validate;

mod truth_table;
