use crate::paths::PropertyPath;
use rdf_paths_model::NamedNode;
use std::fmt;

/// Where a sub-path is rendered relative to its parent.
#[derive(Clone, Copy)]
enum Operand {
    SequenceLhs,
    SequenceRhs,
    Alternative,
    Inverse,
    Cardinality,
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(predicate) => write!(f, "{predicate}"),
            Self::Sequence(lhs, rhs) => {
                write_operand(f, lhs, Operand::SequenceLhs)?;
                f.write_str("/")?;
                write_operand(f, rhs, Operand::SequenceRhs)
            }
            Self::Alternative(lhs, rhs) => {
                write_operand(f, lhs, Operand::Alternative)?;
                f.write_str("|")?;
                write_operand(f, rhs, Operand::Alternative)
            }
            Self::Inverse(inner) => {
                f.write_str("^")?;
                write_operand(f, inner, Operand::Inverse)
            }
            Self::NegatedSet { forward, inverse } => write_negated_set(f, forward, inverse),
            Self::Cardinality(inner, cardinality) => {
                write_operand(f, inner, Operand::Cardinality)?;
                write!(f, "{cardinality}")
            }
        }
    }
}

/// Writes `path` and wraps it in parentheses if the grammar would otherwise bind it differently
/// at the given position.
fn write_operand(f: &mut fmt::Formatter<'_>, path: &PropertyPath, operand: Operand) -> fmt::Result {
    let parenthesize = match path {
        PropertyPath::Property(_) | PropertyPath::NegatedSet { .. } => false,
        PropertyPath::Alternative(..) => true,
        PropertyPath::Sequence(..) => !matches!(operand, Operand::SequenceLhs),
        PropertyPath::Inverse(_) => matches!(operand, Operand::Inverse | Operand::Cardinality),
        PropertyPath::Cardinality(..) => matches!(operand, Operand::Cardinality),
    };

    if parenthesize {
        write!(f, "({path})")
    } else {
        write!(f, "{path}")
    }
}

fn write_negated_set(
    f: &mut fmt::Formatter<'_>,
    forward: &[NamedNode],
    inverse: &[NamedNode],
) -> fmt::Result {
    let members = forward
        .iter()
        .map(ToString::to_string)
        .chain(inverse.iter().map(|p| format!("^{p}")))
        .collect::<Vec<_>>();

    match members.as_slice() {
        [single] => write!(f, "!{single}"),
        members => write!(f, "!({})", members.join("|")),
    }
}
