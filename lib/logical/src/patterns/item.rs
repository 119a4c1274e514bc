use crate::PathCompileError;
use rdf_paths_model::{Term, TermRef, Variable};
use spargebra::term::TermPattern;
use std::fmt;

/// The prefix of the variables that the path compiler introduces. Generated names also contain a
/// `.`, which the SPARQL variable grammar does not allow, so they never clash with user variables.
const TEMPORARY_VARIABLE_PREFIX: &str = "_path";

/// Read access to the bindings that flow into a pattern.
pub trait VariableBindings {
    /// Returns `true` if at least one solution binds `variable`.
    fn is_bound(&self, variable: &Variable) -> bool;

    /// Returns `true` if some solution binds `variable` to `term`.
    fn is_bound_to(&self, variable: &Variable, term: TermRef<'_>) -> bool;
}

/// The subject or object position of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternItem {
    Variable(Variable),
    Term(Term),
}

impl PatternItem {
    /// Creates the `id`-th temporary variable of the given naming scope.
    ///
    /// The outermost compilation uses no scope. Path patterns that are lowered on demand during
    /// evaluation use a fresh scope each, which keeps their variables apart from the ones of the
    /// enclosing compilation.
    pub fn temporary(scope: Option<u32>, id: u32) -> Self {
        let name = match scope {
            None => format!("{TEMPORARY_VARIABLE_PREFIX}.{id}"),
            Some(scope) => format!("{TEMPORARY_VARIABLE_PREFIX}{scope}.{id}"),
        };
        Self::Variable(Variable::new_unchecked(name))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Term(_) => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Variable(_) => None,
            Self::Term(term) => Some(term),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Term(_))
    }

    /// Returns `true` if this is a variable generated by the path compiler.
    pub fn is_temporary(&self) -> bool {
        self.as_variable().is_some_and(is_temporary_variable)
    }

    /// Returns `true` if `candidate` may be placed at this position, given the `bindings`.
    ///
    /// Fixed terms only accept themselves. Unbound variables accept every term, and bound variables
    /// accept the terms they are bound to.
    pub fn accepts(&self, bindings: &impl VariableBindings, candidate: TermRef<'_>) -> bool {
        match self {
            Self::Term(term) => term.as_ref() == candidate,
            Self::Variable(variable) => {
                !bindings.is_bound(variable) || bindings.is_bound_to(variable, candidate)
            }
        }
    }

    /// Returns `true` if this is a fixed term or a variable with at least one binding.
    pub fn is_bound(&self, bindings: &impl VariableBindings) -> bool {
        match self {
            Self::Term(_) => true,
            Self::Variable(variable) => bindings.is_bound(variable),
        }
    }
}

/// Returns `true` if `variable` was generated by the path compiler.
pub fn is_temporary_variable(variable: &Variable) -> bool {
    variable
        .as_str()
        .strip_prefix(TEMPORARY_VARIABLE_PREFIX)
        .is_some_and(|rest| rest.contains('.'))
}

impl From<Variable> for PatternItem {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Term> for PatternItem {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl TryFrom<&TermPattern> for PatternItem {
    type Error = PathCompileError;

    /// Blank nodes of a query act as variables that cannot be projected. They are mapped to
    /// variables named `_:id`, which no user variable can be named.
    fn try_from(pattern: &TermPattern) -> Result<Self, Self::Error> {
        match pattern {
            TermPattern::Variable(variable) => Ok(Self::Variable(variable.clone())),
            TermPattern::NamedNode(node) => Ok(Self::Term(node.clone().into())),
            TermPattern::Literal(literal) => Ok(Self::Term(literal.clone().into())),
            TermPattern::BlankNode(node) => Ok(Self::Variable(Variable::new_unchecked(format!(
                "_:{}",
                node.as_str()
            )))),
            #[allow(unreachable_patterns, reason = "Depends on the rdf-star feature of spargebra")]
            _ => Err(PathCompileError::Unsupported(format!(
                "the term pattern {pattern}"
            ))),
        }
    }
}

impl fmt::Display for PatternItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::Term(term) => write!(f, "{term}"),
        }
    }
}
