use crate::solutions::{Multiset, Solution};
use crate::QueryEvaluationError;
use rdf_paths_logical::patterns::{PatternItem, TriplePattern};
use rdf_paths_model::{NamedNode, Term, Triple};
use rdf_paths_storage::TripleLookup;

/// Matches `pattern` against the graph once for every solution of `input`.
pub(super) fn evaluate_triple(
    lookup: &dyn TripleLookup,
    pattern: &TriplePattern,
    input: &Multiset,
) -> Result<Multiset, QueryEvaluationError> {
    let predicate = pattern.predicate.as_ref();
    let mut output = Multiset::empty();
    for solution in input {
        let subject = resolve(&pattern.subject, solution);
        let object = resolve(&pattern.object, solution);
        let triples = match (subject, object) {
            (Some(subject), _) => {
                lookup.triples_with_subject_predicate(subject.as_ref(), predicate)?
            }
            (None, Some(object)) => {
                lookup.triples_with_predicate_object(predicate, object.as_ref())?
            }
            (None, None) => lookup.triples_with_predicate(predicate)?,
        };
        extend_with_triples(&mut output, solution, triples, &pattern.subject, &pattern.object);
    }
    Ok(output)
}

/// Relates every node to itself.
///
/// If neither endpoint can be resolved, every node of the graph is related to itself.
pub(super) fn evaluate_zero_length(
    lookup: &dyn TripleLookup,
    subject: &PatternItem,
    object: &PatternItem,
    input: &Multiset,
) -> Result<Multiset, QueryEvaluationError> {
    let mut output = Multiset::empty();
    for solution in input {
        let node = resolve(subject, solution).or_else(|| resolve(object, solution));
        let nodes: Vec<Term> = match node {
            Some(node) => vec![node.clone()],
            None => lookup.nodes()?.collect(),
        };
        for node in &nodes {
            if let Some(extended) = bind_item(solution, subject, node)
                .and_then(|extended| bind_item(&extended, object, node))
            {
                output.push(extended);
            }
        }
    }
    Ok(output)
}

/// Matches a single edge whose predicate is not one of `excluded`.
pub(super) fn evaluate_negated_property_set(
    lookup: &dyn TripleLookup,
    subject: &PatternItem,
    object: &PatternItem,
    excluded: &[NamedNode],
    input: &Multiset,
) -> Result<Multiset, QueryEvaluationError> {
    let mut output = Multiset::empty();
    for solution in input {
        let triples = match (resolve(subject, solution), resolve(object, solution)) {
            (Some(subject), _) => lookup.triples_with_subject(subject.as_ref())?,
            (None, Some(object)) => lookup.triples_with_object(object.as_ref())?,
            (None, None) => lookup.triples()?,
        };
        let triples = triples.filter(|triple| !excluded.contains(&triple.predicate));
        extend_with_triples(&mut output, solution, triples, subject, object);
    }
    Ok(output)
}

/// Pushes one extension of `solution` for every triple whose endpoints fit `subject` and
/// `object`.
fn extend_with_triples(
    output: &mut Multiset,
    solution: &Solution,
    triples: impl Iterator<Item = Triple>,
    subject: &PatternItem,
    object: &PatternItem,
) {
    for triple in triples {
        let triple_subject = Term::from(triple.subject);
        let extended = bind_item(solution, subject, &triple_subject)
            .and_then(|extended| bind_item(&extended, object, &triple.object));
        if let Some(extended) = extended {
            output.push(extended);
        }
    }
}

/// Returns the term that `item` stands for in `solution`, if any.
fn resolve<'a>(item: &'a PatternItem, solution: &'a Solution) -> Option<&'a Term> {
    match item {
        PatternItem::Term(term) => Some(term),
        PatternItem::Variable(variable) => solution.get(variable),
    }
}

fn bind_item(solution: &Solution, item: &PatternItem, value: &Term) -> Option<Solution> {
    match item {
        PatternItem::Variable(variable) => solution.bind(variable, value),
        PatternItem::Term(term) => (term == value).then(|| solution.clone()),
    }
}
