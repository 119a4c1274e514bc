use crate::test_utils::{evaluate, graph, iri, parse, render, var};
use rdf_paths_engine::paths::UnboundedPathEvaluator;
use rdf_paths_engine::solutions::Multiset;
use rdf_paths_engine::{EvaluationOptions, QueryEvaluationError};

#[test]
fn test_zero_or_one_includes_start() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows?", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>}
    {?o -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_zero_or_one_is_deduplicated() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "a")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows?", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @"{?o -> <http://ex/a>}");
    Ok(())
}

#[test]
fn test_one_or_more_excludes_start() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "c")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/b>}
    {?o -> <http://ex/c>}
    ");
    Ok(())
}

#[test]
fn test_zero_or_more_includes_start() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "c")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows*", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>}
    {?o -> <http://ex/b>}
    {?o -> <http://ex/c>}
    ");
    Ok(())
}

#[test]
fn test_fixed_endpoints_abort_early() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("a", "knows", "b"),
        ("b", "knows", "c"),
        ("c", "knows", "d"),
        ("d", "knows", "e"),
    ]);
    let evaluator = UnboundedPathEvaluator::new(&graph, &EvaluationOptions::default());
    let report = evaluator.evaluate(
        &Multiset::identity(),
        &iri("a"),
        &parse("ex:knows"),
        &iri("c"),
        false,
    )?;

    assert!(report.aborted_early);
    assert_eq!(report.rounds, 2);
    assert!(!report.reversed);
    assert_eq!(report.paths.len(), 1);

    let solutions = evaluate(&graph, iri("a"), "ex:knows+", iri("c"))?;
    insta::assert_snapshot!(render(&solutions), @"{}");
    Ok(())
}

#[test]
fn test_fixed_endpoints_without_connection() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("c", "knows", "b")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows+", iri("c"))?;
    assert!(solutions.is_empty());
    Ok(())
}

#[test]
fn test_negated_set_skips_excluded_predicate() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "p1", "y"), ("x", "p2", "z")]);
    let solutions = evaluate(&graph, iri("x"), "!ex:p1", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @"{?o -> <http://ex/z>}");
    Ok(())
}
