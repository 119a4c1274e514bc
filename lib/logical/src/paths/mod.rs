mod cardinality;
mod conversion;
mod parser;
mod render;

pub use cardinality::{Cardinality, MaxCardinality};
pub use parser::{PathParser, PathSyntaxError};

use rdf_paths_model::NamedNode;

/// A SPARQL property path expression.
///
/// Paths are immutable values. Compiling or evaluating a path only ever borrows it, so the same
/// expression can be shared by the algebra it is lowered to and by the evaluator that walks it at
/// runtime.
///
/// The textual form of a path (see [PathParser] and the [Display](std::fmt::Display)
/// implementation) follows the SPARQL 1.1 property path grammar extended with the `{n}`, `{n,}`,
/// `{,m}` and `{n,m}` cardinality forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    /// A single edge with the given predicate.
    Property(NamedNode),
    /// The `lhs` path followed by the `rhs` path (`lhs/rhs`).
    Sequence(Box<PropertyPath>, Box<PropertyPath>),
    /// Either the `lhs` path or the `rhs` path (`lhs|rhs`).
    Alternative(Box<PropertyPath>, Box<PropertyPath>),
    /// The inner path traversed from its object to its subject (`^path`).
    Inverse(Box<PropertyPath>),
    /// Any single edge whose predicate is not listed. Forward edges are tested against `forward`
    /// and inverse edges against `inverse`.
    NegatedSet {
        forward: Vec<NamedNode>,
        inverse: Vec<NamedNode>,
    },
    /// The inner path repeated according to the [Cardinality].
    Cardinality(Box<PropertyPath>, Cardinality),
}

impl PropertyPath {
    pub fn property(predicate: impl Into<NamedNode>) -> Self {
        Self::Property(predicate.into())
    }

    pub fn sequence(lhs: Self, rhs: Self) -> Self {
        Self::Sequence(Box::new(lhs), Box::new(rhs))
    }

    pub fn alternative(lhs: Self, rhs: Self) -> Self {
        Self::Alternative(Box::new(lhs), Box::new(rhs))
    }

    pub fn inverse(inner: Self) -> Self {
        Self::Inverse(Box::new(inner))
    }

    /// Creates a negated property set. Duplicate predicates are removed while keeping the order in
    /// which they were first given.
    pub fn negated_set(forward: Vec<NamedNode>, inverse: Vec<NamedNode>) -> Self {
        Self::NegatedSet {
            forward: dedup(forward),
            inverse: dedup(inverse),
        }
    }

    pub fn with_cardinality(inner: Self, cardinality: Cardinality) -> Self {
        Self::Cardinality(Box::new(inner), cardinality)
    }

    pub fn zero_or_more(inner: Self) -> Self {
        Self::with_cardinality(inner, Cardinality::ZeroOrMore)
    }

    pub fn one_or_more(inner: Self) -> Self {
        Self::with_cardinality(inner, Cardinality::OneOrMore)
    }

    pub fn zero_or_one(inner: Self) -> Self {
        Self::with_cardinality(inner, Cardinality::ZeroOrOne)
    }

    pub fn fixed(inner: Self, n: u32) -> Self {
        Self::with_cardinality(inner, Cardinality::Fixed(n))
    }

    pub fn n_or_more(inner: Self, n: u32) -> Self {
        Self::with_cardinality(inner, Cardinality::NOrMore(n))
    }

    pub fn zero_to_n(inner: Self, n: u32) -> Self {
        Self::with_cardinality(inner, Cardinality::ZeroToN(n))
    }

    pub fn n_to_m(inner: Self, n: u32, m: u32) -> Self {
        Self::with_cardinality(inner, Cardinality::NToM(n, m))
    }

    /// Returns `true` if the path may match without traversing any edge.
    pub fn permits_zero_length(&self) -> bool {
        match self {
            Self::Property(_) | Self::NegatedSet { .. } => false,
            Self::Sequence(lhs, rhs) => lhs.permits_zero_length() && rhs.permits_zero_length(),
            Self::Alternative(lhs, rhs) => lhs.permits_zero_length() || rhs.permits_zero_length(),
            Self::Inverse(inner) => inner.permits_zero_length(),
            Self::Cardinality(inner, cardinality) => {
                cardinality.min_cardinality() == 0 || inner.permits_zero_length()
            }
        }
    }
}

impl From<NamedNode> for PropertyPath {
    fn from(predicate: NamedNode) -> Self {
        Self::Property(predicate)
    }
}

fn dedup(properties: Vec<NamedNode>) -> Vec<NamedNode> {
    let mut result: Vec<NamedNode> = Vec::new();
    for property in properties {
        if !result.contains(&property) {
            result.push(property);
        }
    }
    result
}
