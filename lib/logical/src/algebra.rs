use crate::paths::PropertyPath;
use crate::patterns::{BgpPattern, PatternItem};
use rdf_paths_model::{NamedNode, Variable};
use std::fmt;

/// A query plan over a graph.
///
/// The path compiler produces `Bgp`, `Union`, `Distinct` and the four path operators. `Join` and
/// `Project` are only created by the SPARQL front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Algebra {
    /// A conjunction of triple and path patterns that are joined in the given order.
    Bgp(Vec<BgpPattern>),
    /// The concatenation of the solutions of both inputs.
    Union(Box<Algebra>, Box<Algebra>),
    /// Removes duplicate solutions.
    Distinct(Box<Algebra>),
    /// The join of both inputs.
    Join(Box<Algebra>, Box<Algebra>),
    /// Restricts the solutions of the input to the given variables.
    Project(Box<Algebra>, Vec<Variable>),
    /// Relates every node to itself.
    ZeroLengthPath {
        subject: PatternItem,
        object: PatternItem,
    },
    /// Any number of repetitions of `path`, evaluated by traversing the graph.
    ZeroOrMorePath {
        subject: PatternItem,
        object: PatternItem,
        path: PropertyPath,
    },
    /// At least one repetition of `path`, evaluated by traversing the graph.
    OneOrMorePath {
        subject: PatternItem,
        object: PatternItem,
        path: PropertyPath,
    },
    /// A single edge whose predicate is not one of `properties`.
    ///
    /// A reversed operator originates from the inverse members of a negated set. Its subject and
    /// object are already swapped, so it is evaluated like a forward one.
    NegatedPropertySet {
        subject: PatternItem,
        object: PatternItem,
        properties: Vec<NamedNode>,
        reversed: bool,
    },
}

impl Algebra {
    pub fn union(lhs: Self, rhs: Self) -> Self {
        Self::Union(Box::new(lhs), Box::new(rhs))
    }

    pub fn distinct(inner: Self) -> Self {
        Self::Distinct(Box::new(inner))
    }

    pub fn join(lhs: Self, rhs: Self) -> Self {
        Self::Join(Box::new(lhs), Box::new(rhs))
    }

    pub fn project(inner: Self, variables: Vec<Variable>) -> Self {
        Self::Project(Box::new(inner), variables)
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        match self {
            Self::Bgp(patterns) => {
                f.write_str("Bgp:")?;
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" .")?;
                    }
                    write!(f, " {pattern}")?;
                }
                Ok(())
            }
            Self::Union(lhs, rhs) => {
                f.write_str("Union")?;
                fmt_children(f, depth, [lhs.as_ref(), rhs.as_ref()])
            }
            Self::Join(lhs, rhs) => {
                f.write_str("Join")?;
                fmt_children(f, depth, [lhs.as_ref(), rhs.as_ref()])
            }
            Self::Distinct(inner) => {
                f.write_str("Distinct")?;
                fmt_children(f, depth, [inner.as_ref()])
            }
            Self::Project(inner, variables) => {
                f.write_str("Project:")?;
                for variable in variables {
                    write!(f, " {variable}")?;
                }
                fmt_children(f, depth, [inner.as_ref()])
            }
            Self::ZeroLengthPath { subject, object } => {
                write!(f, "ZeroLengthPath: {subject} {object}")
            }
            Self::ZeroOrMorePath {
                subject,
                object,
                path,
            } => write!(f, "ZeroOrMorePath: {subject} ({path})* {object}"),
            Self::OneOrMorePath {
                subject,
                object,
                path,
            } => write!(f, "OneOrMorePath: {subject} ({path})+ {object}"),
            Self::NegatedPropertySet {
                subject,
                object,
                properties,
                reversed,
            } => {
                f.write_str("NegatedPropertySet:")?;
                if *reversed {
                    f.write_str(" reversed")?;
                }
                write!(f, " {subject} !(")?;
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{property}")?;
                }
                write!(f, ") {object}")
            }
        }
    }
}

/// Writes each child on its own line, one level deeper than its parent.
fn fmt_children<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    depth: usize,
    children: [&Algebra; N],
) -> fmt::Result {
    for child in children {
        writeln!(f)?;
        child.fmt_indented(f, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
