use std::fmt;
use std::io::Write;

use itertools::Itertools;

use crate::table::TruthTable;
use crate::truth_table::TruthTableEntry;

/// Column title of the output column.
pub const OUTPUT_LABEL: &str = "X";

fn bit(value: bool) -> TruthTableEntry {
    TruthTableEntry::from(value)
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.aliases();
        let widths: Vec<usize> = labels.iter().map(|(_, l)| l.chars().count().max(1)).collect();

        write!(
            f,
            "{} | {OUTPUT_LABEL}",
            labels
                .iter()
                .zip(&widths)
                .map(|((_, label), &w)| format!("{label:<w$}"))
                .join(" ")
        )?;

        for row in self.rows_iter() {
            write!(
                f,
                "\n{} | {}",
                row.inputs
                    .iter()
                    .zip(&widths)
                    .map(|(input, &w)| format!("{:<w$}", bit(*input)))
                    .join(" "),
                bit(row.output)
            )?;
        }

        Ok(())
    }
}

impl TruthTable {
    /// Writes a header record of labels followed by one record per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(
            self.aliases()
                .iter()
                .map(|(_, label)| *label)
                .chain(std::iter::once(OUTPUT_LABEL)),
        )?;

        for row in self.rows_iter() {
            csv_writer.write_record(
                row.inputs
                    .iter()
                    .chain(std::iter::once(&row.output))
                    .map(|b| bit(*b).to_string()),
            )?;
        }

        csv_writer.flush()?;

        Ok(())
    }
}
