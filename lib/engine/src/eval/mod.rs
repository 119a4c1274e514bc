//! Evaluation of [Algebra] against a [TripleLookup].
//!
//! The evaluator is correlated: every operator receives the solutions produced so far and extends
//! them. This allows path operators to start their traversal at the values that earlier patterns
//! have already bound.

mod patterns;

use crate::options::Deadline;
use crate::paths::{join_with_input, UnboundedPathEvaluator};
use crate::solutions::{Multiset, Solution};
use crate::{EvaluationOptions, QueryEvaluationError};
use rdf_paths_logical::paths::PropertyPath;
use rdf_paths_logical::patterns::{is_temporary_variable, BgpPattern, PathPattern, PatternItem};
use rdf_paths_logical::{Algebra, PathTransformContext};
use rdf_paths_storage::TripleLookup;
use tracing::{debug, trace};

/// Evaluates `subject path object` and returns one solution per match.
///
/// The solutions bind the variables among `subject` and `object`. Variables introduced while
/// lowering the path are removed.
///
/// ```
/// use rdf_paths_engine::{evaluate_path, EvaluationOptions};
/// use rdf_paths_logical::paths::PropertyPath;
/// use rdf_paths_logical::patterns::PatternItem;
/// use rdf_paths_model::{NamedNode, Triple, Variable};
/// use rdf_paths_storage::memory::MemoryGraph;
///
/// let a = NamedNode::new("http://example.com/a")?;
/// let b = NamedNode::new("http://example.com/b")?;
/// let knows = NamedNode::new("http://example.com/knows")?;
/// let graph = MemoryGraph::from_iter([Triple::new(a.clone(), knows.clone(), b)]);
///
/// let solutions = evaluate_path(
///     &graph,
///     &PatternItem::Term(a.into()),
///     &PropertyPath::zero_or_more(knows.into()),
///     &PatternItem::Variable(Variable::new("o")?),
///     &EvaluationOptions::default(),
/// )?;
/// assert_eq!(solutions.len(), 2);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
///
/// # Errors
///
/// Fails if the path cannot be lowered, the storage fails or a limit of `options` is exceeded.
pub fn evaluate_path(
    lookup: &dyn TripleLookup,
    subject: &PatternItem,
    path: &PropertyPath,
    object: &PatternItem,
    options: &EvaluationOptions,
) -> Result<Multiset, QueryEvaluationError> {
    let mut context = PathTransformContext::new(subject.clone(), object.clone());
    let algebra = path.to_algebra(&mut context)?;
    AlgebraEvaluator::new(lookup, options).evaluate(&algebra)
}

/// Evaluates [Algebra] trees.
///
/// A single evaluator shares one deadline between all the trees it evaluates.
pub struct AlgebraEvaluator<'eval> {
    lookup: &'eval dyn TripleLookup,
    options: EvaluationOptions,
    deadline: Option<Deadline>,
    /// The naming scope of the next path pattern that is lowered during evaluation.
    next_scope: u32,
}

impl<'eval> AlgebraEvaluator<'eval> {
    /// Creates a new evaluator. The timeout of `options` starts running now.
    pub fn new(lookup: &'eval dyn TripleLookup, options: &EvaluationOptions) -> Self {
        Self {
            lookup,
            options: options.clone(),
            deadline: options.deadline(),
            next_scope: 0,
        }
    }

    /// Evaluates `algebra` and removes the variables that were introduced by the path compiler.
    ///
    /// # Errors
    ///
    /// Fails if the storage fails, a path pattern cannot be lowered or a limit is exceeded.
    pub fn evaluate(&mut self, algebra: &Algebra) -> Result<Multiset, QueryEvaluationError> {
        let solutions = self.evaluate_with(algebra, Multiset::identity())?;
        Ok(solutions.retain_variables(|variable| !is_temporary_variable(variable)))
    }

    /// Evaluates `algebra` for the solutions in `input`. The result contains only solutions that
    /// extend a solution of `input`.
    ///
    /// # Errors
    ///
    /// Fails if the storage fails, a path pattern cannot be lowered or a limit is exceeded.
    pub fn evaluate_with(
        &mut self,
        algebra: &Algebra,
        input: Multiset,
    ) -> Result<Multiset, QueryEvaluationError> {
        self.check_deadline()?;
        match algebra {
            Algebra::Bgp(bgp) => {
                trace!(patterns = bgp.len(), "Evaluating basic graph pattern");
                bgp.iter().try_fold(input, |solutions, pattern| {
                    self.evaluate_pattern(pattern, solutions)
                })
            }
            Algebra::Union(lhs, rhs) => {
                let mut solutions = self.evaluate_with(lhs, input.clone())?;
                for solution in self.evaluate_with(rhs, input)? {
                    solutions.push(solution);
                }
                Ok(solutions)
            }
            Algebra::Distinct(inner) => Ok(self.evaluate_with(inner, input)?.distinct()),
            Algebra::Join(lhs, rhs) => {
                let solutions = self.evaluate_with(lhs, input)?;
                self.evaluate_with(rhs, solutions)
            }
            Algebra::Project(inner, variables) => {
                // Variables that are projected away must not leak into the inner evaluation.
                let inner_input = input.clone().project(variables).distinct();
                let projected = self.evaluate_with(inner, inner_input)?.project(variables);
                Ok(input.join(&projected))
            }
            Algebra::ZeroLengthPath { subject, object } => {
                patterns::evaluate_zero_length(self.lookup, subject, object, &input)
            }
            Algebra::ZeroOrMorePath {
                subject,
                object,
                path,
            } => self.evaluate_unbounded(subject, path, object, &input, true),
            Algebra::OneOrMorePath {
                subject,
                object,
                path,
            } => self.evaluate_unbounded(subject, path, object, &input, false),
            Algebra::NegatedPropertySet {
                subject,
                object,
                properties,
                // Lowering has already swapped the endpoints of a reversed set.
                ..
            } => patterns::evaluate_negated_property_set(
                self.lookup,
                subject,
                object,
                properties,
                &input,
            ),
        }
    }

    fn evaluate_pattern(
        &mut self,
        pattern: &BgpPattern,
        input: Multiset,
    ) -> Result<Multiset, QueryEvaluationError> {
        self.check_deadline()?;
        if input.is_empty() {
            return Ok(input);
        }
        match pattern {
            BgpPattern::Triple(pattern) => patterns::evaluate_triple(self.lookup, pattern, &input),
            BgpPattern::Path(pattern) => self.evaluate_path_pattern(pattern, input),
        }
    }

    /// Lowers the path of `pattern` in a fresh naming scope and evaluates the result.
    fn evaluate_path_pattern(
        &mut self,
        pattern: &PathPattern,
        input: Multiset,
    ) -> Result<Multiset, QueryEvaluationError> {
        let scope = self.next_scope;
        self.next_scope = match scope.checked_add(1) {
            Some(next) => next,
            None => return QueryEvaluationError::internal("Path scopes exhausted".to_owned()),
        };

        let mut context = PathTransformContext::new(pattern.subject.clone(), pattern.object.clone())
            .with_scope(scope);
        let algebra = pattern.path.to_algebra(&mut context)?;
        trace!(%pattern, scope, "Lowered path pattern");
        self.evaluate_with(&algebra, input)
    }

    /// Evaluates an unbounded path once per group of input solutions that bind the same endpoints.
    ///
    /// A traversal seeds from the values of a bound start, so solutions that leave the start unbound
    /// need a traversal of their own.
    fn evaluate_unbounded(
        &self,
        subject: &PatternItem,
        path: &PropertyPath,
        object: &PatternItem,
        input: &Multiset,
        allow_zero_length: bool,
    ) -> Result<Multiset, QueryEvaluationError> {
        let evaluator =
            UnboundedPathEvaluator::new(self.lookup, &self.options).with_deadline(self.deadline);
        let mut output = Multiset::empty();
        for group in group_by_bound_endpoints(subject, object, input) {
            let report = evaluator.evaluate(&group, subject, path, object, allow_zero_length)?;
            debug!(
                solutions = group.len(),
                paths = report.paths.len(),
                rounds = report.rounds,
                dead_ends = report.dead_ends,
                aborted_early = report.aborted_early,
                "Evaluated unbounded path"
            );
            for solution in join_with_input(&report, subject, object, &group) {
                output.push(solution);
            }
        }
        Ok(output)
    }

    fn check_deadline(&self) -> Result<(), QueryEvaluationError> {
        match self.deadline {
            Some(deadline) => deadline.check(),
            None => Ok(()),
        }
    }
}

/// Splits `input` by whether each solution binds `subject` and `object`. Fixed terms are always
/// bound. Empty groups are dropped and the order of the solutions within a group is kept.
fn group_by_bound_endpoints(
    subject: &PatternItem,
    object: &PatternItem,
    input: &Multiset,
) -> Vec<Multiset> {
    let binds = |item: &PatternItem, solution: &Solution| match item {
        PatternItem::Variable(variable) => solution.get(variable).is_some(),
        PatternItem::Term(_) => true,
    };
    let mut groups: [Multiset; 4] = Default::default();
    for solution in input {
        let index = usize::from(binds(subject, solution)) * 2 + usize::from(binds(object, solution));
        groups[index].push(solution.clone());
    }
    groups
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect()
}
