use crate::options::Deadline;
use crate::paths::{step, EvalOutcome, PathEvaluationContext, PotentialPath};
use crate::solutions::{Multiset, Solution};
use crate::{EvaluationOptions, QueryEvaluationError};
use rdf_paths_logical::patterns::PatternItem;
use rdf_paths_logical::paths::PropertyPath;
use rdf_paths_model::Term;
use rdf_paths_storage::TripleLookup;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// The result of evaluating an unbounded path operator.
#[derive(Debug, Clone)]
pub struct PathEvaluationReport {
    /// The completed paths. Their `start` is the node the traversal started at, so for a reversed
    /// evaluation it is the object of the pattern.
    pub paths: Vec<PotentialPath>,
    /// Whether the graph was traversed from the object to the subject.
    pub reversed: bool,
    /// The number of expansion rounds.
    pub rounds: usize,
    /// Whether the evaluation stopped as soon as the fixed start and end were connected.
    pub aborted_early: bool,
    /// The number of candidates that reached an already explored `(start, current)` pair and were
    /// marked as dead ends.
    pub dead_ends: usize,
}

impl PathEvaluationReport {
    /// Returns the `(subject, object)` pairs connected by the completed paths.
    pub fn pairs(&self) -> impl Iterator<Item = (&Term, &Term)> + '_ {
        self.paths.iter().map(|path| {
            if self.reversed {
                (path.current(), path.start())
            } else {
                (path.start(), path.current())
            }
        })
    }
}

/// Evaluates `subject path+ object` (or `path*` if `allow_zero_length` is set) by expanding the
/// frontier of candidate paths one application of `path` per round.
///
/// An endpoint variable counts as bound if any solution of the bindings binds it. Callers that
/// mix solutions with and without a binding must evaluate them separately.
pub struct UnboundedPathEvaluator<'eval> {
    lookup: &'eval dyn TripleLookup,
    max_rounds: Option<usize>,
    deadline: Option<Deadline>,
}

impl<'eval> UnboundedPathEvaluator<'eval> {
    pub fn new(lookup: &'eval dyn TripleLookup, options: &EvaluationOptions) -> Self {
        Self {
            lookup,
            max_rounds: options.max_rounds(),
            deadline: options.deadline(),
        }
    }

    pub(crate) fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs the traversal and returns the completed paths.
    ///
    /// # Errors
    ///
    /// Fails if the storage fails, the deadline passes or the round limit is exceeded.
    pub fn evaluate(
        &self,
        bindings: &Multiset,
        subject: &PatternItem,
        path: &PropertyPath,
        object: &PatternItem,
        allow_zero_length: bool,
    ) -> Result<PathEvaluationReport, QueryEvaluationError> {
        let reversed = !subject.is_bound(bindings) && object.is_bound(bindings);
        let (start, end) = if reversed {
            (object.clone(), subject.clone())
        } else {
            (subject.clone(), object.clone())
        };
        debug!(%subject, %path, %object, reversed, "Evaluating unbounded path");

        let mut context = PathEvaluationContext::new(self.lookup, bindings, start, end)
            .with_deadline(self.deadline);
        context.is_reversed = reversed;

        let mut report = PathEvaluationReport {
            paths: Vec::new(),
            reversed,
            rounds: 0,
            aborted_early: false,
            dead_ends: 0,
        };

        if allow_zero_length {
            context.seed_zero_length()?;
            for path in context.take_paths() {
                if context.end().accepts(&context, path.current().as_ref()) {
                    context.add_completed(path);
                }
            }
            if context.check_abort() == EvalOutcome::FoundMatch {
                debug!("Zero-length path connects start and end");
                report.aborted_early = true;
                report.paths = context.into_completed_paths().into_iter().collect();
                return Ok(report);
            }
        }

        let mut seen = FxHashSet::default();
        context.is_first = true;
        loop {
            context.check_deadline()?;
            if let Some(max_rounds) = self.max_rounds {
                if report.rounds >= max_rounds {
                    return Err(QueryEvaluationError::PathLimitExceeded(max_rounds));
                }
            }

            context.is_last = true;
            let outcome = step::evaluate(path, &mut context)?;
            report.rounds += 1;
            if outcome == EvalOutcome::FoundMatch {
                debug!(rounds = report.rounds, "Path connects start and end, aborting early");
                report.aborted_early = true;
                break;
            }

            let (frontier, dead_ends) = prune_seen(context.take_paths(), &mut seen);
            report.dead_ends += dead_ends;
            trace!(
                round = report.rounds,
                frontier = frontier.len(),
                dead_ends,
                completed = context.completed_paths().len(),
                "Finished expansion round"
            );
            if frontier.iter().all(PotentialPath::is_dead_end) && !context.permits_new_paths {
                break;
            }
            context.set_paths(frontier);
        }

        report.paths = context.into_completed_paths().into_iter().collect();
        debug!(
            rounds = report.rounds,
            paths = report.paths.len(),
            "Finished unbounded path"
        );
        Ok(report)
    }
}

/// Marks every candidate whose `(start, current)` pair has been reached in an earlier round as a
/// dead end and remembers the others. Returns the frontier and the number of new dead ends.
///
/// Dead ends stay in the frontier, so later steps still see them but never extend them.
fn prune_seen(
    paths: FxHashSet<PotentialPath>,
    seen: &mut FxHashSet<(Term, Term)>,
) -> (FxHashSet<PotentialPath>, usize) {
    let mut dead_ends = 0;
    let frontier = paths
        .into_iter()
        .map(|mut path| {
            let is_new = seen.insert((path.start().clone(), path.current().clone()));
            if !is_new && !path.is_dead_end() {
                path.mark_dead_end();
                dead_ends += 1;
            }
            path
        })
        .collect();
    (frontier, dead_ends)
}

/// Turns the completed paths into solutions for `subject` and `object` and joins them with
/// `input`.
pub(crate) fn join_with_input(
    report: &PathEvaluationReport,
    subject: &PatternItem,
    object: &PatternItem,
    input: &Multiset,
) -> Multiset {
    let solutions = report
        .pairs()
        .filter_map(|(s, o)| bind_endpoints(subject, s, object, o))
        .collect::<Multiset>()
        .distinct();
    input.join(&solutions)
}

fn bind_endpoints(
    subject: &PatternItem,
    subject_value: &Term,
    object: &PatternItem,
    object_value: &Term,
) -> Option<Solution> {
    let mut solution = Solution::new();
    for (item, value) in [(subject, subject_value), (object, object_value)] {
        solution = match item {
            PatternItem::Variable(variable) => solution.bind(variable, value)?,
            PatternItem::Term(term) if term == value => solution,
            PatternItem::Term(_) => return None,
        };
    }
    Some(solution)
}
