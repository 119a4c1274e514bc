use crate::options::Deadline;
use crate::paths::PotentialPath;
use crate::solutions::Multiset;
use crate::QueryEvaluationError;
use rdf_paths_logical::patterns::{PatternItem, VariableBindings};
use rdf_paths_model::{NamedNode, Term, TermRef, Triple, Variable};
use rdf_paths_storage::TripleLookup;
use rustc_hash::{FxHashMap, FxHashSet};

/// Signals whether the evaluation of a path must go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalOutcome {
    Continue,
    /// A path between the fixed start and end has been found. Nothing else can change the result.
    FoundMatch,
}

/// The edges that a single step of a path may follow.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EdgeLabel<'path> {
    /// Edges with this predicate.
    Is(&'path NamedNode),
    /// Edges whose predicate is not in the list.
    NotIn(&'path [NamedNode]),
}

impl EdgeLabel<'_> {
    fn matches(self, triple: &Triple) -> bool {
        match self {
            Self::Is(predicate) => &triple.predicate == predicate,
            Self::NotIn(excluded) => !excluded.contains(&triple.predicate),
        }
    }
}

/// The state of evaluating one unbounded path operator.
///
/// The context holds the frontier of candidate paths and the paths that have been completed. Path
/// nodes move the frontier forward one step at a time. The flags describe where the currently
/// evaluated node is located in the path:
///
/// - `is_first` is set until the first step has seeded the frontier.
/// - `is_last` is set while evaluating the node that ends the path. This node classifies the
///   candidates into complete and partial ones.
/// - `is_reversed` is set while the graph is traversed from objects to subjects.
/// - `permits_new_paths` is set when a zero-length prefix with an unbound start has been skipped.
///   The next step then also starts new paths at every node it can leave.
pub struct PathEvaluationContext<'eval> {
    lookup: &'eval dyn TripleLookup,
    start: PatternItem,
    end: PatternItem,
    /// The values of the bound start and end variables.
    bound_values: FxHashMap<Variable, FxHashSet<Term>>,
    paths: FxHashSet<PotentialPath>,
    completed: FxHashSet<PotentialPath>,
    deadline: Option<Deadline>,
    pub(crate) is_first: bool,
    pub(crate) is_last: bool,
    pub(crate) is_reversed: bool,
    pub(crate) permits_new_paths: bool,
    can_abort_early: bool,
}

impl<'eval> PathEvaluationContext<'eval> {
    /// Creates a context for paths from `start` to `end`. The variables of both items are looked
    /// up in `bindings`.
    pub fn new(
        lookup: &'eval dyn TripleLookup,
        bindings: &Multiset,
        start: PatternItem,
        end: PatternItem,
    ) -> Self {
        let bound_values = [&start, &end]
            .into_iter()
            .filter_map(PatternItem::as_variable)
            .filter(|variable| bindings.is_bound(variable))
            .map(|variable| {
                let values = bindings.distinct_values(variable).into_iter().collect();
                (variable.clone(), values)
            })
            .collect();
        let can_abort_early = start.is_fixed() && end.is_fixed();

        Self {
            lookup,
            start,
            end,
            bound_values,
            paths: FxHashSet::default(),
            completed: FxHashSet::default(),
            deadline: None,
            is_first: true,
            is_last: true,
            is_reversed: false,
            permits_new_paths: false,
            can_abort_early,
        }
    }

    pub(crate) fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn start(&self) -> &PatternItem {
        &self.start
    }

    pub fn end(&self) -> &PatternItem {
        &self.end
    }

    /// Returns `true` if both endpoints are fixed terms, so a single complete path answers the
    /// whole evaluation.
    pub fn can_abort_early(&self) -> bool {
        self.can_abort_early
    }

    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    /// The candidates that are still being explored.
    pub fn paths(&self) -> &FxHashSet<PotentialPath> {
        &self.paths
    }

    pub fn completed_paths(&self) -> &FxHashSet<PotentialPath> {
        &self.completed
    }

    pub(crate) fn take_paths(&mut self) -> FxHashSet<PotentialPath> {
        std::mem::take(&mut self.paths)
    }

    pub(crate) fn set_paths(&mut self, paths: FxHashSet<PotentialPath>) {
        self.paths = paths;
    }

    pub(crate) fn into_completed_paths(self) -> FxHashSet<PotentialPath> {
        self.completed
    }

    /// Records a path that satisfies the whole operator without being explored.
    pub(crate) fn add_completed(&mut self, mut path: PotentialPath) {
        path.mark_complete();
        self.completed.insert(path);
    }

    pub(crate) fn check_deadline(&self) -> Result<(), QueryEvaluationError> {
        match self.deadline {
            Some(deadline) => deadline.check(),
            None => Ok(()),
        }
    }

    /// Returns every term the start may take, or `None` if the start is an unbound variable.
    pub(crate) fn start_values(&self) -> Option<Vec<Term>> {
        match &self.start {
            PatternItem::Term(term) => Some(vec![term.clone()]),
            PatternItem::Variable(variable) => self
                .bound_values
                .get(variable)
                .map(|values| values.iter().cloned().collect()),
        }
    }

    /// Seeds the frontier with the first edge of every path.
    pub(crate) fn seed(&mut self, label: EdgeLabel<'_>) -> Result<(), QueryEvaluationError> {
        let mut paths = FxHashSet::default();
        match self.start_values() {
            Some(values) => {
                for value in values {
                    for next in self.neighbours(&value, label)? {
                        paths.insert(PotentialPath::zero_length(value.clone()).extend(next));
                    }
                }
            }
            None => {
                for (from, to) in self.edges(label)? {
                    paths.insert(PotentialPath::zero_length(from).extend(to));
                }
            }
        }
        self.paths = paths;
        Ok(())
    }

    /// Seeds the frontier with zero-length paths at every possible start.
    pub(crate) fn seed_zero_length(&mut self) -> Result<(), QueryEvaluationError> {
        let values = match self.start_values() {
            Some(values) => values,
            None => self.lookup.nodes()?.collect(),
        };
        self.paths = values.into_iter().map(PotentialPath::zero_length).collect();
        Ok(())
    }

    /// Moves every candidate that is not a dead end forward by one edge.
    pub(crate) fn extend(&mut self, label: EdgeLabel<'_>) -> Result<(), QueryEvaluationError> {
        if self.permits_new_paths {
            self.permits_new_paths = false;
            for (from, _) in self.edges(label)? {
                self.paths.insert(PotentialPath::zero_length(from));
            }
        }

        let mut extended = FxHashSet::default();
        for path in self.paths.iter().filter(|path| !path.is_dead_end()) {
            for next in self.neighbours(path.current(), label)? {
                extended.insert(path.extend(next));
            }
        }
        self.paths = extended;
        Ok(())
    }

    /// Classifies every alive candidate into complete or partial, depending on whether it ends in
    /// a node that the end accepts.
    ///
    /// Zero-length paths that are still pending through `permits_new_paths` are added at every node
    /// of the graph first.
    pub(crate) fn finalize(&mut self) -> Result<(), QueryEvaluationError> {
        if self.permits_new_paths {
            self.permits_new_paths = false;
            for node in self.lookup.nodes()? {
                self.paths.insert(PotentialPath::zero_length(node));
            }
        }

        let mut classified = FxHashSet::default();
        for mut path in std::mem::take(&mut self.paths) {
            if path.is_alive() {
                if self.end.accepts(self, path.current().as_ref()) {
                    path.mark_complete();
                    self.completed.insert(path.clone());
                } else {
                    path.mark_partial();
                }
            }
            classified.insert(path);
        }
        self.paths = classified;
        Ok(())
    }

    /// Checks whether a completed path already connects the fixed start and end.
    pub(crate) fn check_abort(&self) -> EvalOutcome {
        let found = self.can_abort_early
            && self.completed.iter().any(|path| {
                self.start.accepts(self, path.start().as_ref())
                    && self.end.accepts(self, path.current().as_ref())
            });
        if found {
            EvalOutcome::FoundMatch
        } else {
            EvalOutcome::Continue
        }
    }

    /// Returns the nodes reachable from `node` over a single edge in the current direction.
    fn neighbours(
        &self,
        node: &Term,
        label: EdgeLabel<'_>,
    ) -> Result<Vec<Term>, QueryEvaluationError> {
        let node = node.as_ref();
        let triples = match (label, self.is_reversed) {
            (EdgeLabel::Is(predicate), false) => {
                self.lookup.triples_with_subject_predicate(node, predicate.as_ref())?
            }
            (EdgeLabel::Is(predicate), true) => {
                self.lookup.triples_with_predicate_object(predicate.as_ref(), node)?
            }
            (EdgeLabel::NotIn(_), false) => self.lookup.triples_with_subject(node)?,
            (EdgeLabel::NotIn(_), true) => self.lookup.triples_with_object(node)?,
        };
        Ok(triples
            .filter(|triple| label.matches(triple))
            .map(|triple| self.orient(triple).1)
            .collect())
    }

    /// Returns every edge with a matching label as `(from, to)` in the current direction.
    fn edges(&self, label: EdgeLabel<'_>) -> Result<Vec<(Term, Term)>, QueryEvaluationError> {
        let triples = match label {
            EdgeLabel::Is(predicate) => self.lookup.triples_with_predicate(predicate.as_ref())?,
            EdgeLabel::NotIn(_) => self.lookup.triples()?,
        };
        Ok(triples
            .filter(|triple| label.matches(triple))
            .map(|triple| self.orient(triple))
            .collect())
    }

    fn orient(&self, triple: Triple) -> (Term, Term) {
        let subject = Term::from(triple.subject);
        if self.is_reversed {
            (triple.object, subject)
        } else {
            (subject, triple.object)
        }
    }
}

impl VariableBindings for PathEvaluationContext<'_> {
    fn is_bound(&self, variable: &Variable) -> bool {
        self.bound_values.contains_key(variable)
    }

    fn is_bound_to(&self, variable: &Variable, term: TermRef<'_>) -> bool {
        self.bound_values
            .get(variable)
            .is_some_and(|values| values.contains(&term.into_owned()))
    }
}
