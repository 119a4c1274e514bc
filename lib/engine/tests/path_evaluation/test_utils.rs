use itertools::Itertools;
use rdf_paths_engine::solutions::Multiset;
use rdf_paths_engine::{evaluate_path, EvaluationOptions, QueryEvaluationError};
use rdf_paths_logical::paths::{PathParser, PropertyPath};
use rdf_paths_logical::patterns::PatternItem;
use rdf_paths_model::{NamedNode, Triple, Variable};
use rdf_paths_storage::memory::MemoryGraph;

pub fn ex(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex/{name}"))
}

pub fn var(name: &str) -> PatternItem {
    Variable::new_unchecked(name).into()
}

pub fn iri(name: &str) -> PatternItem {
    PatternItem::Term(ex(name).into())
}

/// Creates a graph from `(subject, predicate, object)` local names.
pub fn graph(triples: &[(&str, &str, &str)]) -> MemoryGraph {
    triples
        .iter()
        .map(|(s, p, o)| Triple::new(ex(s), ex(p), ex(o)))
        .collect()
}

pub fn parse(path: &str) -> PropertyPath {
    PathParser::new()
        .with_prefix("ex", "http://ex/")
        .unwrap()
        .parse(path)
        .unwrap()
}

pub fn evaluate(
    graph: &MemoryGraph,
    subject: PatternItem,
    path: &str,
    object: PatternItem,
) -> Result<Multiset, QueryEvaluationError> {
    evaluate_with_options(graph, subject, path, object, &EvaluationOptions::default())
}

pub fn evaluate_with_options(
    graph: &MemoryGraph,
    subject: PatternItem,
    path: &str,
    object: PatternItem,
    options: &EvaluationOptions,
) -> Result<Multiset, QueryEvaluationError> {
    evaluate_path(graph, &subject, &parse(path), &object, options)
}

/// Renders the solutions as sorted lines, so snapshots do not depend on the evaluation order.
pub fn render(solutions: &Multiset) -> String {
    solutions
        .iter()
        .map(ToString::to_string)
        .sorted()
        .join("\n")
}
