use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ErrorKind, ExpressionError, Result};
use crate::table::TruthTable;

/// Assigns a fresh letter to every variable of `theirs` that also occurs in
/// `ours`, in the order the collisions appear in `theirs`.
///
/// Fresh letters are taken alphabetically from those used by neither side.
pub fn rename_collisions(ours: &[char], theirs: &[char]) -> Result<FxHashMap<char, char>> {
    let mut used: FxHashSet<char> = ours.iter().chain(theirs).copied().collect();
    let mut renaming = FxHashMap::default();

    for var in theirs.iter().filter(|v| ours.contains(v)) {
        if renaming.contains_key(var) {
            continue;
        }

        let fresh = ('A'..='Z').find(|c| !used.contains(c)).ok_or_else(|| {
            ExpressionError::new(
                ErrorKind::AlphabetExhausted,
                format!("no unused letter left to rename {var}"),
            )
        })?;

        used.insert(fresh);
        renaming.insert(*var, fresh);
    }

    Ok(renaming)
}

impl TruthTable {
    /// Builds `(self)operator(other)`.
    ///
    /// With `distinct`, variables of `other` that collide with ours are renamed
    /// first; otherwise they are unified with ours.
    pub fn merging(&self, other: &TruthTable, operator: char, distinct: bool) -> Result<String> {
        self.operators().lookup(operator)?;

        let theirs = if distinct {
            let ours: Vec<char> = self.expression().chars().filter(char::is_ascii_uppercase).collect();
            let vars: Vec<char> = other.expression().chars().filter(char::is_ascii_uppercase).collect();
            let renaming = rename_collisions(&ours, &vars)?;

            other
                .expression()
                .chars()
                .map(|c| renaming.get(&c).copied().unwrap_or(c))
                .collect()
        } else {
            other.expression().to_string()
        };

        Ok(format!("({}){operator}({theirs})", self.expression()))
    }

    /// Replaces our expression with the composite of [`TruthTable::merging`].
    pub fn merge(&mut self, other: &TruthTable, operator: char, distinct: bool) -> Result<()> {
        let composite = self.merging(other, operator, distinct)?;

        log::debug!("merge into {composite}");

        self.set_expression(&composite)
    }

    /// Like [`TruthTable::merge`], but returns a new table using a copy of our
    /// operators.
    pub fn merged(&self, other: &TruthTable, operator: char, distinct: bool) -> Result<TruthTable> {
        let composite = self.merging(other, operator, distinct)?;

        TruthTable::with_operators(&composite, self.operators().clone())
    }
}
