use anyhow::Context;
use clap::Parser;
use rstt::{Operator, OperatorRegistry, TruthTable};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// Fully parenthesized expression over single-letter variables, e.g. "(A.B)+!C"
    expression: String,

    #[clap(long, value_parser, value_name = "VARS")]
    /// Bit-position order of the variables, e.g. "CBA"
    order: Option<String>,

    #[clap(short, long, value_parser, value_name = "VAR=LABEL")]
    /// Display label of a variable (may be repeated)
    alias: Vec<String>,

    #[clap(long, value_parser, value_name = "SYMBOL=OP")]
    /// Register an extra operator symbol for and, or or xor (may be repeated)
    operator: Vec<String>,

    #[clap(short, long, value_parser, value_name = "EXPRESSION")]
    /// Merge a second expression into the first
    merge: Option<String>,

    #[clap(long, value_parser, value_name = "SYMBOL", default_value = "+", requires = "merge")]
    /// Operator linking the merged expressions
    link: char,

    #[clap(long, requires = "merge")]
    /// Rename variables of the merged expression that collide with the first one
    distinct: bool,

    #[clap(short, long, value_parser, value_name = "BITS")]
    /// Print the output for these input bits only (may be repeated)
    query: Vec<String>,

    #[clap(short, long)]
    /// Print the sum-of-products form instead of the table
    sop: bool,

    #[clap(long)]
    /// Output the table as csv
    csv: bool,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse_from(argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    let mut operators = OperatorRegistry::new();
    for binding in &args.operator {
        let (symbol, op) = binding
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected SYMBOL=OP, got {binding}"))?;
        operators.register(symbol, op.parse::<Operator>()?)?;
    }

    let mut table = TruthTable::with_operators(&args.expression, operators.clone())
        .with_context(|| format!("invalid expression {}", args.expression))?;

    if let Some(other) = &args.merge {
        let other = TruthTable::with_operators(other, operators)
            .with_context(|| format!("invalid merge expression {other}"))?;
        table.merge(&other, args.link, args.distinct)?;
    }

    if let Some(order) = &args.order {
        let order: Vec<char> = order
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        table.set_ordering(&order)?;
    }

    for alias in &args.alias {
        let (var, label) = alias
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected VAR=LABEL, got {alias}"))?;
        let mut chars = var.chars();
        match (chars.next(), chars.next()) {
            (Some(v), None) => table.set_alias(v, label),
            _ => Err(anyhow::anyhow!("{var} is not a single-letter variable"))?,
        }
    }

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    if !args.query.is_empty() {
        for bits in &args.query {
            writeln!(writer, "{bits} | {}", table.get_output(bits))?;
        }
    } else if args.sop {
        writeln!(writer, "{}", table.sum_of_products()?)?;
    } else if args.csv {
        table.write_csv(&mut writer)?;
    } else {
        writeln!(writer, "{table}")?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}
