mod item;

pub use item::{is_temporary_variable, PatternItem, VariableBindings};

use crate::paths::PropertyPath;
use crate::PathCompileError;
use rdf_paths_model::NamedNode;
use spargebra::term::NamedNodePattern;
use std::fmt;

/// A triple pattern with a fixed predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: PatternItem,
    pub predicate: NamedNode,
    pub object: PatternItem,
}

/// A path pattern whose path is lowered by the evaluator when it is executed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    pub subject: PatternItem,
    pub path: PropertyPath,
    pub object: PatternItem,
}

/// An element of a basic graph pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BgpPattern {
    Triple(TriplePattern),
    Path(PathPattern),
}

impl BgpPattern {
    pub fn triple(subject: PatternItem, predicate: NamedNode, object: PatternItem) -> Self {
        Self::Triple(TriplePattern {
            subject,
            predicate,
            object,
        })
    }

    pub fn path(subject: PatternItem, path: PropertyPath, object: PatternItem) -> Self {
        Self::Path(PathPattern {
            subject,
            path,
            object,
        })
    }
}

impl TryFrom<&spargebra::term::TriplePattern> for TriplePattern {
    type Error = PathCompileError;

    fn try_from(pattern: &spargebra::term::TriplePattern) -> Result<Self, Self::Error> {
        let predicate = match &pattern.predicate {
            NamedNodePattern::NamedNode(node) => node.clone(),
            NamedNodePattern::Variable(variable) => {
                return Err(PathCompileError::Unsupported(format!(
                    "variable predicate {variable}"
                )))
            }
        };
        Ok(Self {
            subject: PatternItem::try_from(&pattern.subject)?,
            predicate,
            object: PatternItem::try_from(&pattern.object)?,
        })
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.path, self.object)
    }
}

impl fmt::Display for BgpPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triple(pattern) => write!(f, "{pattern}"),
            Self::Path(pattern) => write!(f, "{pattern}"),
        }
    }
}
