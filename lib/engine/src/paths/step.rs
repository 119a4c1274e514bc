use crate::paths::context::EdgeLabel;
use crate::paths::{EvalOutcome, PathEvaluationContext, PotentialPath};
use crate::QueryEvaluationError;
use rdf_paths_logical::paths::{Cardinality, MaxCardinality, PropertyPath};
use rdf_paths_model::NamedNode;
use rustc_hash::FxHashSet;

type StepResult = Result<EvalOutcome, QueryEvaluationError>;

/// Moves the frontier of `context` across one application of `path`.
///
/// The first step of a path seeds the frontier, every later step extends it. The step that holds
/// `is_last` classifies the candidates and may report [EvalOutcome::FoundMatch].
pub fn evaluate(path: &PropertyPath, context: &mut PathEvaluationContext<'_>) -> StepResult {
    match path {
        PropertyPath::Property(predicate) => evaluate_edge(context, EdgeLabel::Is(predicate)),
        PropertyPath::Sequence(lhs, rhs) => evaluate_sequence(context, lhs, rhs),
        PropertyPath::Alternative(lhs, rhs) => {
            evaluate_either(context, |c| evaluate(lhs, c), |c| evaluate(rhs, c))
        }
        PropertyPath::Inverse(inner) => evaluate_inverse(context, |c| evaluate(inner, c)),
        PropertyPath::NegatedSet { forward, inverse } => {
            evaluate_negated_set(context, forward, inverse)
        }
        PropertyPath::Cardinality(inner, cardinality) => {
            evaluate_cardinality(context, inner, *cardinality)
        }
    }
}

/// Follows a single edge.
fn evaluate_edge(context: &mut PathEvaluationContext<'_>, label: EdgeLabel<'_>) -> StepResult {
    if context.is_first {
        context.is_first = false;
        context.seed(label)?;
    } else {
        context.extend(label)?;
    }
    finish_step(context)
}

/// Evaluates `lhs` and then `rhs`. The order is swapped while the traversal is reversed.
fn evaluate_sequence(
    context: &mut PathEvaluationContext<'_>,
    lhs: &PropertyPath,
    rhs: &PropertyPath,
) -> StepResult {
    let (first, second) = if context.is_reversed {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    };

    let is_last = context.is_last;
    context.is_last = false;
    let outcome = evaluate(first, context);
    context.is_last = is_last;
    if outcome? == EvalOutcome::FoundMatch {
        return Ok(EvalOutcome::FoundMatch);
    }
    evaluate(second, context)
}

fn evaluate_inverse(
    context: &mut PathEvaluationContext<'_>,
    inner: impl FnOnce(&mut PathEvaluationContext<'_>) -> StepResult,
) -> StepResult {
    context.is_reversed = !context.is_reversed;
    let outcome = inner(context);
    context.is_reversed = !context.is_reversed;
    outcome
}

/// Evaluates both branches on the same frontier and merges their results.
fn evaluate_either(
    context: &mut PathEvaluationContext<'_>,
    lhs: impl FnOnce(&mut PathEvaluationContext<'_>) -> StepResult,
    rhs: impl FnOnce(&mut PathEvaluationContext<'_>) -> StepResult,
) -> StepResult {
    let paths = context.paths().clone();
    let is_first = context.is_first;
    let permits_new_paths = context.permits_new_paths;

    if lhs(context)? == EvalOutcome::FoundMatch {
        return Ok(EvalOutcome::FoundMatch);
    }
    let lhs_paths = context.take_paths();
    let lhs_is_first = context.is_first;
    let lhs_permits_new_paths = context.permits_new_paths;

    context.set_paths(paths);
    context.is_first = is_first;
    context.permits_new_paths = permits_new_paths;
    let outcome = rhs(context)?;

    let mut merged = context.take_paths();
    merged.extend(lhs_paths);
    context.set_paths(merged);
    context.is_first &= lhs_is_first;
    context.permits_new_paths |= lhs_permits_new_paths;
    Ok(outcome)
}

fn evaluate_negated_set(
    context: &mut PathEvaluationContext<'_>,
    forward: &[NamedNode],
    inverse: &[NamedNode],
) -> StepResult {
    match (forward.is_empty(), inverse.is_empty()) {
        (true, false) => evaluate_negated_inverse(context, inverse),
        (false, false) => evaluate_either(
            context,
            |c| evaluate_edge(c, EdgeLabel::NotIn(forward)),
            |c| evaluate_negated_inverse(c, inverse),
        ),
        // A set without members follows every forward edge.
        (_, true) => evaluate_edge(context, EdgeLabel::NotIn(forward)),
    }
}

fn evaluate_negated_inverse(
    context: &mut PathEvaluationContext<'_>,
    excluded: &[NamedNode],
) -> StepResult {
    evaluate_inverse(context, |c| evaluate_edge(c, EdgeLabel::NotIn(excluded)))
}

/// Applies `inner` as often as `cardinality` allows.
///
/// The frontier afterwards contains the candidates of every admissible number of applications.
/// Unbounded cardinalities are iterated until no new `(start, current)` pair shows up.
fn evaluate_cardinality(
    context: &mut PathEvaluationContext<'_>,
    inner: &PropertyPath,
    cardinality: Cardinality,
) -> StepResult {
    let is_last = context.is_last;
    context.is_last = false;

    let min = cardinality.min_cardinality();
    // Set if zero-length paths at every node are still pending. The edges inside consume the flag,
    // but the operator as a whole still admits them.
    let mut pending_zero_length = false;
    if min == 0 {
        apply_zero_length(context, is_last)?;
        pending_zero_length = context.permits_new_paths;
    } else {
        for _ in 0..min {
            evaluate(inner, context)?;
        }
    }

    let mut accumulated = context.paths().clone();
    let mut latest = accumulated.clone();
    let mut count = min;
    loop {
        let admits_more = match cardinality.max_cardinality() {
            MaxCardinality::Bounded(max) => count < max,
            MaxCardinality::Unbounded => true,
        };
        if !admits_more {
            break;
        }
        context.check_deadline()?;

        context.set_paths(latest);
        evaluate(inner, context)?;
        count += 1;

        latest = context
            .take_paths()
            .into_iter()
            .filter(|path| !accumulated.contains(path))
            .collect::<FxHashSet<PotentialPath>>();
        if latest.is_empty() {
            break;
        }
        accumulated.extend(latest.iter().cloned());
    }

    context.set_paths(accumulated);
    context.permits_new_paths |= pending_zero_length;
    context.is_last = is_last;
    finish_step(context)
}

/// Applies the zero-length path.
///
/// With an unbound start that is not last, the zero-length paths are not materialized. Instead the
/// next edge starts new paths at every node it can leave, and [PathEvaluationContext::finalize]
/// adds the zero-length paths that are still pending.
fn apply_zero_length(
    context: &mut PathEvaluationContext<'_>,
    is_last: bool,
) -> Result<(), QueryEvaluationError> {
    if !context.is_first {
        return Ok(());
    }
    context.is_first = false;

    if context.start_values().is_none() && !is_last {
        context.permits_new_paths = true;
        return Ok(());
    }
    context.seed_zero_length()
}

/// Finalizes the frontier if this step ends the path.
fn finish_step(context: &mut PathEvaluationContext<'_>) -> StepResult {
    if !context.is_last {
        return Ok(EvalOutcome::Continue);
    }
    context.finalize()?;
    Ok(context.check_abort())
}
