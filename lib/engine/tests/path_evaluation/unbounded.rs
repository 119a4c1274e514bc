use crate::test_utils::{evaluate, graph, iri, parse, render, var};
use rdf_paths_engine::paths::UnboundedPathEvaluator;
use rdf_paths_engine::solutions::Multiset;
use rdf_paths_engine::{EvaluationOptions, QueryEvaluationError};

#[test]
fn test_unbound_subject_is_evaluated_reversed() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "c")]);
    let report = UnboundedPathEvaluator::new(&graph, &EvaluationOptions::default()).evaluate(
        &Multiset::identity(),
        &var("s"),
        &parse("ex:knows"),
        &iri("c"),
        false,
    )?;
    assert!(report.reversed);

    let solutions = evaluate(&graph, var("s"), "ex:knows+", iri("c"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?s -> <http://ex/a>}
    {?s -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_cycles_terminate() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "a")]);
    let solutions = evaluate(&graph, iri("a"), "ex:knows+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>}
    {?o -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_both_endpoints_unbound() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "c")]);
    let solutions = evaluate(&graph, var("s"), "ex:knows+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/b>, ?s -> <http://ex/a>}
    {?o -> <http://ex/c>, ?s -> <http://ex/a>}
    {?o -> <http://ex/c>, ?s -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_same_variable_on_both_ends() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "a"), ("b", "knows", "c")]);
    let solutions = evaluate(&graph, var("x"), "ex:knows+", var("x"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?x -> <http://ex/a>}
    {?x -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_sequence_under_star() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("x", "a", "y"),
        ("y", "b", "z"),
        ("z", "a", "w"),
        ("w", "b", "v"),
    ]);
    let solutions = evaluate(&graph, iri("x"), "(ex:a/ex:b)*", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/v>}
    {?o -> <http://ex/x>}
    {?o -> <http://ex/z>}
    ");
    Ok(())
}

#[test]
fn test_alternative_under_plus() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "a", "y"), ("y", "b", "z"), ("z", "c", "w")]);
    let solutions = evaluate(&graph, iri("x"), "(ex:a|ex:b)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/y>}
    {?o -> <http://ex/z>}
    ");
    Ok(())
}

#[test]
fn test_inverse_under_plus() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "parent", "b"), ("b", "parent", "c")]);
    let solutions = evaluate(&graph, iri("c"), "(^ex:parent)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>}
    {?o -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_fixed_repetition_under_plus() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("x", "a", "y"),
        ("y", "a", "z"),
        ("z", "a", "w"),
        ("w", "a", "v"),
    ]);
    let solutions = evaluate(&graph, iri("x"), "(ex:a{2})+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/v>}
    {?o -> <http://ex/z>}
    ");
    Ok(())
}

#[test]
fn test_zero_length_prefix_with_unbound_start() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "a", "y"), ("y", "b", "z"), ("w", "b", "v")]);
    let solutions = evaluate(&graph, var("s"), "(ex:a*/ex:b)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/v>, ?s -> <http://ex/w>}
    {?o -> <http://ex/z>, ?s -> <http://ex/x>}
    {?o -> <http://ex/z>, ?s -> <http://ex/y>}
    ");
    Ok(())
}

#[test]
fn test_negated_set_under_plus() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "q", "y"), ("y", "p", "z"), ("y", "q", "w")]);
    let solutions = evaluate(&graph, iri("x"), "(!ex:p)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/w>}
    {?o -> <http://ex/y>}
    ");
    Ok(())
}

#[test]
fn test_optional_steps_under_plus_keep_zero_length() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "p", "b")]);
    let solutions = evaluate(&graph, var("s"), "(ex:p?/ex:q?)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>, ?s -> <http://ex/a>}
    {?o -> <http://ex/b>, ?s -> <http://ex/a>}
    {?o -> <http://ex/b>, ?s -> <http://ex/b>}
    ");

    // Every match of the inner path is also a match of its repetition.
    let once = evaluate(&graph, var("s"), "ex:p?/ex:q?", var("o"))?;
    assert_eq!(render(&once), render(&solutions));

    let solutions = evaluate(&graph, var("s"), "(ex:p?)+", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>, ?s -> <http://ex/a>}
    {?o -> <http://ex/b>, ?s -> <http://ex/a>}
    {?o -> <http://ex/b>, ?s -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_revisited_pairs_become_dead_ends() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "a")]);
    let report = UnboundedPathEvaluator::new(&graph, &EvaluationOptions::default()).evaluate(
        &Multiset::identity(),
        &var("s"),
        &parse("ex:knows"),
        &var("o"),
        false,
    )?;

    // The third round only reaches `(a, b)` and `(b, a)` again.
    assert_eq!(report.rounds, 3);
    assert_eq!(report.dead_ends, 2);
    assert_eq!(report.paths.len(), 4);
    assert!(report.paths.iter().all(|path| !path.is_dead_end()));
    Ok(())
}
