use pretty_assertions::assert_eq;
use rstt::{ErrorKind, Operator, TruthTable, TruthTableEntry};

fn outputs(expr: &str) -> Vec<u8> {
    TruthTable::new(expr)
        .unwrap()
        .outputs()
        .iter()
        .map(|o| u8::from(*o))
        .collect()
}

#[test]
fn test_basic_tables() {
    assert_eq!(outputs("A"), vec![0, 1]);
    assert_eq!(outputs("!A"), vec![1, 0]);
    assert_eq!(outputs("A.B"), vec![0, 0, 0, 1]);
    assert_eq!(outputs("A+B"), vec![0, 1, 1, 1]);
    assert_eq!(outputs("A^B"), vec![0, 1, 1, 0]);
    assert_eq!(outputs("A&B"), outputs("A.B"));
    assert_eq!(outputs("A|B"), outputs("A+B"));
    assert_eq!(outputs("A#B"), outputs("A^B"));
    assert_eq!(outputs("(A.B)+C"), vec![0, 1, 0, 1, 0, 1, 1, 1]);
    assert_eq!(outputs("A.(B+C)"), vec![0, 0, 0, 0, 0, 1, 1, 1]);
}

#[test]
fn test_output_lookup() {
    let table: TruthTable = "A.B".parse().unwrap();

    assert_eq!(table.variables(), &['A', 'B']);
    assert_eq!(table.get_output("01"), TruthTableEntry::False);
    assert_eq!(table.get_output("11"), TruthTableEntry::True);
    assert_eq!(table.get_output("0"), TruthTableEntry::Invalid);
    assert_eq!(table.get_output("11").as_bool(), Some(true));
    assert_eq!(table.get_output("10").as_bool(), Some(false));
    assert_eq!(table.get_output("1x").as_bool(), None);
}

#[test]
fn test_rejected_expressions() {
    let cases = [
        ("A.", ErrorKind::IllegalAdjacency),
        ("A.(B+C", ErrorKind::UnbalancedBrackets),
        ("A!.B", ErrorKind::IllegalAdjacency),
        ("A.B+C", ErrorKind::AmbiguousPrecedence),
        ("", ErrorKind::EmptyExpression),
    ];

    for (expr, kind) in cases {
        assert_eq!(TruthTable::new(expr).unwrap_err().kind(), kind, "{expr}");
    }
}

#[test]
fn test_equivalent_expressions_are_equal() {
    let a = TruthTable::new("!A.!B").unwrap();
    let b = TruthTable::new("!(A+B)").unwrap();
    let c = TruthTable::new("!(B+A)").unwrap();

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
    assert_eq!(outputs("!A.!B"), vec![1, 0, 0, 0]);
}

#[test]
fn test_ordering_round_trip() {
    let mut table = TruthTable::new("(A.!B)+(C^A)").unwrap();
    let original = table.outputs().to_vec();

    let identity = table.variables().to_vec();
    table.set_ordering(&identity).unwrap();
    assert_eq!(table.outputs(), original.as_slice());

    table.set_ordering(&['C', 'A', 'B']).unwrap();
    assert_ne!(table.outputs(), original.as_slice());

    table.clear_ordering().unwrap();
    assert_eq!(table.outputs(), original.as_slice());
}

#[test]
fn test_sum_of_products_round_trip() {
    for expr in ["A.B", "A^(B+!C)", "!(A.B).(C^D)", "(A+!B)^(!C.(D+A))"] {
        let table = TruthTable::new(expr).unwrap();
        let sop = TruthTable::new(&table.sum_of_products().unwrap()).unwrap();

        assert_eq!(sop.variables(), table.variables(), "{expr}");
        assert_eq!(sop, table, "{expr}");
    }
}

#[test]
fn test_merge_distinct_counts_variables() {
    let mut left = TruthTable::new("A.(B+C)").unwrap();
    let right = TruthTable::new("!A^D").unwrap();

    let expected = left.variables().len() + right.variables().len();
    left.merge(&right, '.', true).unwrap();

    assert_eq!(left.variables().len(), expected);
    assert_eq!(left.num_rows(), 1 << expected);
}

#[test]
fn test_custom_operator_per_table() {
    let mut custom = TruthTable::new("A").unwrap();
    custom.add_operator("*", Operator::And).unwrap();
    custom.set_expression("A*B").unwrap();

    assert_eq!(custom, TruthTable::new("A.B").unwrap());
    assert_eq!(
        TruthTable::new("A*B").unwrap_err().kind(),
        ErrorKind::IllegalAdjacency
    );
}
