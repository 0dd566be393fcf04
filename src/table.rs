use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{ErrorKind, ExpressionError, Result};
use crate::eval::evaluate;
use crate::expression::Expression;
use crate::operator::{Operator, OperatorRegistry, NEGATION};
use crate::truth_table::TruthTableEntry;

/// One row of a truth table: the input bits in ordering order and the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub inputs: Vec<bool>,
    pub output: bool,
}

/// The complete truth table of a single expression.
///
/// Output `i` is the value of the expression when the variables, in the
/// current ordering, are bound to the big-endian bits of `i`. Every mutation
/// either installs a fully recomputed state or leaves the table untouched.
#[derive(Clone)]
pub struct TruthTable {
    expression: Expression,
    // first-occurrence order of the expression's variables
    natural_order: Vec<char>,
    ordering: Option<Vec<char>>,
    aliases: FxHashMap<char, String>,
    outputs: Vec<bool>,
    operators: OperatorRegistry,
}

/// Big-endian bits of `index`, `width` bits wide.
pub fn row_bits(index: usize, width: usize) -> Vec<bool> {
    (0..width).rev().map(|bit| (index >> bit) & 1 == 1).collect()
}

fn compute_outputs(
    expression: &Expression,
    order: &[char],
    operators: &OperatorRegistry,
) -> Result<Vec<bool>> {
    let width = order.len();

    (0..1usize << width)
        .map(|i| evaluate(expression, order, &row_bits(i, width), operators))
        .collect()
}

fn identity_aliases(variables: &[char]) -> FxHashMap<char, String> {
    variables.iter().map(|v| (*v, v.to_string())).collect()
}

impl TruthTable {
    pub fn new(expression: &str) -> Result<Self> {
        Self::with_operators(expression, OperatorRegistry::new())
    }

    /// Builds a table whose expression is parsed with a custom operator registry.
    pub fn with_operators(expression: &str, operators: OperatorRegistry) -> Result<Self> {
        let expression = Expression::parse(expression, &operators)?;
        let natural_order = expression.variables();
        let outputs = compute_outputs(&expression, &natural_order, &operators)?;

        log::debug!(
            "new table for {expression} over {} variable(s)",
            natural_order.len()
        );

        Ok(Self {
            aliases: identity_aliases(&natural_order),
            expression,
            natural_order,
            ordering: None,
            outputs,
            operators,
        })
    }

    /// Replaces the expression, resetting aliases and any explicit ordering.
    pub fn set_expression(&mut self, expression: &str) -> Result<()> {
        let expression = Expression::parse(expression, &self.operators)?;
        let natural_order = expression.variables();
        let outputs = compute_outputs(&expression, &natural_order, &self.operators)?;

        log::debug!("set expression {} -> {expression}", self.expression);

        self.aliases = identity_aliases(&natural_order);
        self.expression = expression;
        self.natural_order = natural_order;
        self.ordering = None;
        self.outputs = outputs;
        Ok(())
    }

    pub fn expression(&self) -> &str {
        self.expression.as_str()
    }

    /// Variables in the current bit-position order.
    pub fn variables(&self) -> &[char] {
        self.ordering.as_deref().unwrap_or(self.natural_order.as_slice())
    }

    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    pub fn num_rows(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_tautology(&self) -> bool {
        self.outputs.iter().all(|o| *o)
    }

    pub fn is_contradiction(&self) -> bool {
        self.outputs.iter().all(|o| !*o)
    }

    /// Looks up the output for a string of `0`/`1` bits, one per variable.
    pub fn get_output(&self, inputs: &str) -> TruthTableEntry {
        if inputs.chars().count() != self.variables().len()
            || !inputs.chars().all(|c| matches!(c, '0' | '1'))
        {
            return TruthTableEntry::Invalid;
        }

        let index = inputs
            .chars()
            .fold(0usize, |acc, c| (acc << 1) | usize::from(c == '1'));

        self.outputs
            .get(index)
            .copied()
            .map_or(TruthTableEntry::Invalid, TruthTableEntry::from)
    }

    pub fn get_row(&self, index: usize) -> Option<Row> {
        self.outputs.get(index).map(|output| Row {
            index,
            inputs: row_bits(index, self.variables().len()),
            output: *output,
        })
    }

    /// Rows in `range`, clamped to the size of the table.
    pub fn rows(&self, range: Range<usize>) -> impl Iterator<Item = Row> + '_ {
        let end = range.end.min(self.num_rows());
        (range.start..end).filter_map(move |i| self.get_row(i))
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = Row> + '_ {
        self.rows(0..self.num_rows())
    }

    pub fn alias(&self, variable: char) -> Option<&str> {
        self.aliases.get(&variable).map(String::as_str)
    }

    /// Display labels of the variables, in the current ordering.
    pub fn aliases(&self) -> Vec<(char, &str)> {
        self.variables()
            .iter()
            .map(|v| (*v, self.alias(*v).unwrap_or_default()))
            .collect()
    }

    /// Sets the display label of `variable`; unknown variables are ignored.
    pub fn set_alias(&mut self, variable: char, label: &str) {
        if let Some(slot) = self.aliases.get_mut(&variable) {
            *slot = label.to_string();
        }
    }

    pub fn clear_aliases(&mut self) {
        self.aliases = identity_aliases(&self.natural_order);
    }

    /// Reassigns bit positions; `order` must be a permutation of the variables.
    pub fn set_ordering(&mut self, order: &[char]) -> Result<()> {
        let is_permutation = order.len() == self.natural_order.len()
            && order.iter().sorted().eq(self.natural_order.iter().sorted());

        if !is_permutation {
            return Err(ExpressionError::new(
                ErrorKind::InvalidOrdering,
                format!(
                    "[{}] is not a permutation of [{}]",
                    order.iter().join(", "),
                    self.natural_order.iter().join(", ")
                ),
            ));
        }

        let outputs = compute_outputs(&self.expression, order, &self.operators)?;

        log::debug!("reorder {} as [{}]", self.expression, order.iter().join(", "));

        self.ordering = Some(order.to_vec());
        self.outputs = outputs;
        Ok(())
    }

    /// Restores first-occurrence order and recomputes the outputs.
    pub fn clear_ordering(&mut self) -> Result<()> {
        if self.ordering.is_none() {
            return Ok(());
        }

        self.outputs = compute_outputs(&self.expression, &self.natural_order, &self.operators)?;
        self.ordering = None;
        Ok(())
    }

    pub fn add_operator(&mut self, symbol: &str, op: Operator) -> Result<()> {
        self.operators.register(symbol, op)
    }

    /// Moves an operator binding to a new symbol. Rejected while the current
    /// expression still uses `old`.
    pub fn rename_operator(&mut self, old: char, new: &str) -> Result<()> {
        if self.operators.is_operator(old) && self.expression.contains_symbol(old) {
            return Err(ExpressionError::new(
                ErrorKind::InvalidOperator,
                format!("{old:?} is used by {}", self.expression),
            ));
        }

        self.operators.rename(old, new)
    }

    /// Canonical OR-of-ANDs form built from the true rows, in row order.
    ///
    /// Returns an empty string when no row is true. Fails with
    /// `UnknownOperator` when the registry has no symbol for a conjunction or
    /// disjunction the form needs.
    pub fn sum_of_products(&self) -> Result<String> {
        let true_rows: Vec<Row> = self.rows_iter().filter(|row| row.output).collect();

        let and = self.symbol_if_needed(
            Operator::And,
            !true_rows.is_empty() && self.variables().len() > 1,
        )?;
        let or = self.symbol_if_needed(Operator::Or, true_rows.len() > 1)?;

        let products: Vec<String> = true_rows
            .into_iter()
            .map(|row| {
                let literals: Vec<String> = self
                    .variables()
                    .iter()
                    .zip(row.inputs)
                    .map(|(v, bit)| {
                        if bit {
                            v.to_string()
                        } else {
                            format!("{NEGATION}{v}")
                        }
                    })
                    .collect();

                format!("({})", chain(&literals, and))
            })
            .collect();

        Ok(chain(&products, or))
    }

    // the placeholder symbol is never emitted when `needed` is false
    fn symbol_if_needed(&self, op: Operator, needed: bool) -> Result<char> {
        match self.operators.symbol_for(op) {
            Some(symbol) => Ok(symbol),
            None if !needed => Ok(' '),
            None => Err(ExpressionError::new(
                ErrorKind::UnknownOperator,
                format!("no symbol is registered for {op}"),
            )),
        }
    }
}

/// Joins `items` with `symbol`, bracketing from the right so that every
/// binary operation is explicitly parenthesized.
fn chain(items: &[String], symbol: char) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [left, right] => format!("{left}{symbol}{right}"),
        [first, rest @ ..] => format!("{first}{symbol}({})", chain(rest, symbol)),
    }
}

impl PartialEq for TruthTable {
    fn eq(&self, other: &Self) -> bool {
        self.outputs == other.outputs
    }
}

impl Eq for TruthTable {}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TruthTable")
            .field("expression", &self.expression.as_str())
            .field("variables", &self.variables())
            .field("aliases", &self.aliases())
            .field(
                "outputs",
                &self.outputs.iter().map(|o| u8::from(*o)).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FromStr for TruthTable {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
