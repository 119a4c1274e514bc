use std::fmt;

/// How often the inner path of [PropertyPath::Cardinality](crate::paths::PropertyPath) must be
/// traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly `n` times (`{n}`).
    Fixed(u32),
    /// Any number of times (`*`).
    ZeroOrMore,
    /// At most once (`?`).
    ZeroOrOne,
    /// At least once (`+`).
    OneOrMore,
    /// At least `n` times (`{n,}`).
    NOrMore(u32),
    /// At most `n` times (`{,n}`).
    ZeroToN(u32),
    /// Between `n` and `m` times, both inclusive (`{n,m}`).
    NToM(u32, u32),
}

/// The upper bound of a [Cardinality].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaxCardinality {
    Bounded(u32),
    Unbounded,
}

impl Cardinality {
    pub fn min_cardinality(self) -> u32 {
        match self {
            Self::ZeroOrMore | Self::ZeroOrOne | Self::ZeroToN(_) => 0,
            Self::OneOrMore => 1,
            Self::Fixed(n) | Self::NOrMore(n) | Self::NToM(n, _) => n,
        }
    }

    pub fn max_cardinality(self) -> MaxCardinality {
        match self {
            Self::ZeroOrMore | Self::OneOrMore | Self::NOrMore(_) => MaxCardinality::Unbounded,
            Self::ZeroOrOne => MaxCardinality::Bounded(1),
            Self::Fixed(n) | Self::ZeroToN(n) | Self::NToM(_, n) => MaxCardinality::Bounded(n),
        }
    }

    /// Returns `true` if `count` repetitions satisfy this cardinality.
    pub fn admits(self, count: u32) -> bool {
        count >= self.min_cardinality()
            && match self.max_cardinality() {
                MaxCardinality::Bounded(max) => count <= max,
                MaxCardinality::Unbounded => true,
            }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{{{n}}}"),
            Self::ZeroOrMore => f.write_str("*"),
            Self::ZeroOrOne => f.write_str("?"),
            Self::OneOrMore => f.write_str("+"),
            Self::NOrMore(n) => write!(f, "{{{n},}}"),
            Self::ZeroToN(n) => write!(f, "{{,{n}}}"),
            Self::NToM(n, m) => write!(f, "{{{n},{m}}}"),
        }
    }
}
