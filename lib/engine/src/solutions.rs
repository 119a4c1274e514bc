use itertools::Itertools;
use rdf_paths_logical::patterns::VariableBindings;
use rdf_paths_model::{Term, TermRef, Variable};
use rustc_hash::FxHashSet;
use std::fmt;

/// A set of variable bindings.
///
/// The bindings are kept sorted by variable name, so two solutions with the same bindings are equal
/// regardless of the order in which the bindings were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    bindings: Vec<(Variable, Term)>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.position(variable)
            .ok()
            .map(|position| &self.bindings[position].1)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> + '_ {
        self.bindings.iter().map(|(variable, term)| (variable, term))
    }

    /// Returns a solution that additionally binds `variable` to `term`.
    ///
    /// Returns `None` if the variable is already bound to another term.
    pub fn bind(&self, variable: &Variable, term: &Term) -> Option<Self> {
        match self.position(variable) {
            Ok(position) => (&self.bindings[position].1 == term).then(|| self.clone()),
            Err(position) => {
                let mut bindings = self.bindings.clone();
                bindings.insert(position, (variable.clone(), term.clone()));
                Some(Self { bindings })
            }
        }
    }

    /// Returns the union of both solutions if they agree on every shared variable.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let mut result = self.clone();
        for (variable, term) in &other.bindings {
            result = result.bind(variable, term)?;
        }
        Some(result)
    }

    /// Removes all bindings for which `predicate` returns `false`.
    #[must_use]
    pub fn retain(mut self, predicate: impl Fn(&Variable) -> bool) -> Self {
        self.bindings.retain(|(variable, _)| predicate(variable));
        self
    }

    fn position(&self, variable: &Variable) -> Result<usize, usize> {
        self.bindings
            .binary_search_by(|(candidate, _)| candidate.as_str().cmp(variable.as_str()))
    }
}

impl FromIterator<(Variable, Term)> for Solution {
    /// Collects the bindings into a solution. Later bindings of a variable are ignored.
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        let mut solution = Solution::new();
        for (variable, term) in iter {
            if let Err(position) = solution.position(&variable) {
                solution.bindings.insert(position, (variable, term));
            }
        }
        solution
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.bindings
                .iter()
                .map(|(variable, term)| format!("{variable} -> {term}"))
                .join(", ")
        )
    }
}

/// An ordered bag of solutions. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multiset {
    solutions: Vec<Solution>,
}

impl Multiset {
    /// The multiset without any solution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The multiset with a single solution that binds nothing. Joining with it is a no-op.
    pub fn identity() -> Self {
        Self {
            solutions: vec![Solution::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Returns every variable that is bound by at least one solution, in order of appearance.
    pub fn variables(&self) -> Vec<Variable> {
        self.solutions
            .iter()
            .flat_map(|solution| solution.iter().map(|(variable, _)| variable.clone()))
            .unique()
            .collect()
    }

    /// Returns the distinct terms bound to `variable`, in order of appearance.
    pub fn distinct_values(&self, variable: &Variable) -> Vec<Term> {
        self.solutions
            .iter()
            .filter_map(|solution| solution.get(variable))
            .unique()
            .cloned()
            .collect()
    }

    /// Joins the solutions of both multisets that are compatible.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        self.solutions
            .iter()
            .cartesian_product(other.solutions.iter())
            .filter_map(|(lhs, rhs)| lhs.merge(rhs))
            .collect()
    }

    /// Removes duplicate solutions, keeping the first occurrence.
    #[must_use]
    pub fn distinct(self) -> Self {
        let mut seen = FxHashSet::default();
        self.solutions
            .into_iter()
            .filter(|solution| seen.insert(solution.clone()))
            .collect()
    }

    /// Restricts every solution to the given variables.
    #[must_use]
    pub fn project(self, variables: &[Variable]) -> Self {
        self.retain_variables(|variable| variables.contains(variable))
    }

    /// Removes every binding of a variable for which `predicate` returns `false`.
    #[must_use]
    pub fn retain_variables(self, predicate: impl Fn(&Variable) -> bool) -> Self {
        self.solutions
            .into_iter()
            .map(|solution| solution.retain(&predicate))
            .collect()
    }
}

impl VariableBindings for Multiset {
    fn is_bound(&self, variable: &Variable) -> bool {
        self.solutions
            .iter()
            .any(|solution| solution.get(variable).is_some())
    }

    fn is_bound_to(&self, variable: &Variable, term: TermRef<'_>) -> bool {
        self.solutions
            .iter()
            .any(|solution| solution.get(variable).is_some_and(|t| t.as_ref() == term))
    }
}

impl FromIterator<Solution> for Multiset {
    fn from_iter<T: IntoIterator<Item = Solution>>(iter: T) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Multiset {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'set> IntoIterator for &'set Multiset {
    type Item = &'set Solution;
    type IntoIter = std::slice::Iter<'set, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
