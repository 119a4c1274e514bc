use crate::test_utils::{evaluate, ex, graph, iri, parse, render, var};
use rdf_paths_engine::{AlgebraEvaluator, EvaluationOptions, QueryEvaluationError};
use rdf_paths_logical::patterns::BgpPattern;
use rdf_paths_logical::Algebra;
use rdf_paths_model::{NamedNodeRef, StorageError, Term, TermRef, Variable};
use rdf_paths_storage::{TripleIter, TripleLookup};

#[test]
fn test_zero_length_binds_object_to_subject() -> Result<(), QueryEvaluationError> {
    // The subject does not need to occur in the graph.
    let graph = graph(&[("a", "knows", "b")]);
    let solutions = evaluate(&graph, iri("x"), "ex:knows{0}", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @"{?o -> <http://ex/x>}");

    let solutions = evaluate(&graph, var("s"), "ex:knows{0}", iri("x"))?;
    insta::assert_snapshot!(render(&solutions), @"{?s -> <http://ex/x>}");
    Ok(())
}

#[test]
fn test_zero_length_with_unbound_endpoints() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b")]);
    let solutions = evaluate(&graph, var("s"), "ex:knows{0}", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/a>, ?s -> <http://ex/a>}
    {?o -> <http://ex/b>, ?s -> <http://ex/b>}
    ");
    Ok(())
}

#[test]
fn test_zero_length_with_different_fixed_endpoints() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b")]);
    assert!(evaluate(&graph, iri("a"), "ex:knows{0}", iri("b"))?.is_empty());
    assert_eq!(evaluate(&graph, iri("a"), "ex:knows{0}", iri("a"))?.len(), 1);
    Ok(())
}

#[test]
fn test_temporaries_are_removed() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "a", "y"), ("y", "b", "z")]);
    let solutions = evaluate(&graph, iri("x"), "ex:a/ex:b", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @"{?o -> <http://ex/z>}");
    Ok(())
}

#[test]
fn test_path_pattern_in_sequence() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("x", "a", "y"),
        ("y", "a", "y2"),
        ("y2", "b", "z"),
        ("y", "b", "q"),
    ]);
    let solutions = evaluate(&graph, iri("x"), "ex:a+/ex:b", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/q>}
    {?o -> <http://ex/z>}
    ");
    Ok(())
}

#[test]
fn test_bounded_repetitions() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("x", "a", "y"), ("y", "a", "z"), ("z", "a", "w")]);

    let solutions = evaluate(&graph, iri("x"), "ex:a{1,2}", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/y>}
    {?o -> <http://ex/z>}
    ");

    let solutions = evaluate(&graph, iri("x"), "ex:a{2,}", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/w>}
    {?o -> <http://ex/z>}
    ");
    Ok(())
}

#[test]
fn test_inverse_negated_set() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "p", "x"), ("b", "q", "x"), ("x", "q", "c")]);
    let solutions = evaluate(&graph, iri("x"), "!^ex:p", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @"{?o -> <http://ex/b>}");

    let solutions = evaluate(&graph, iri("x"), "!(ex:p|^ex:p)", var("o"))?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/b>}
    {?o -> <http://ex/c>}
    ");
    Ok(())
}

#[test]
fn test_join_passes_bindings_to_path() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("alice", "type", "Person"),
        ("alice", "knows", "bob"),
        ("bob", "knows", "carol"),
        ("dave", "knows", "erin"),
    ]);
    let algebra = Algebra::project(
        Algebra::join(
            Algebra::Bgp(vec![BgpPattern::triple(
                var("p"),
                ex("type"),
                iri("Person"),
            )]),
            Algebra::Bgp(vec![BgpPattern::path(
                var("p"),
                parse("ex:knows+"),
                var("f"),
            )]),
        ),
        vec![Variable::new_unchecked("f")],
    );

    let solutions =
        AlgebraEvaluator::new(&graph, &EvaluationOptions::default()).evaluate(&algebra)?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?f -> <http://ex/bob>}
    {?f -> <http://ex/carol>}
    ");
    Ok(())
}

#[test]
fn test_path_after_union_with_partially_bound_start() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[
        ("a", "t", "X"),
        ("w", "u", "Y"),
        ("a", "knows", "b"),
        ("c", "knows", "d"),
    ]);
    // Only the left branch binds `?s`, so the right branch must start at every node.
    let algebra = Algebra::join(
        Algebra::union(
            Algebra::Bgp(vec![BgpPattern::triple(var("s"), ex("t"), iri("X"))]),
            Algebra::Bgp(vec![BgpPattern::triple(var("z"), ex("u"), iri("Y"))]),
        ),
        Algebra::Bgp(vec![BgpPattern::path(
            var("s"),
            parse("ex:knows+"),
            var("o"),
        )]),
    );

    let solutions =
        AlgebraEvaluator::new(&graph, &EvaluationOptions::default()).evaluate(&algebra)?;
    insta::assert_snapshot!(render(&solutions), @r"
    {?o -> <http://ex/b>, ?s -> <http://ex/a>, ?z -> <http://ex/w>}
    {?o -> <http://ex/b>, ?s -> <http://ex/a>}
    {?o -> <http://ex/d>, ?s -> <http://ex/c>, ?z -> <http://ex/w>}
    ");
    Ok(())
}

#[test]
fn test_storage_errors_are_propagated() {
    let result = evaluate_on(&FailingLookup, "ex:knows+");
    assert!(matches!(result, Err(QueryEvaluationError::Storage(_))));

    let result = evaluate_on(&FailingLookup, "ex:knows");
    assert!(matches!(result, Err(QueryEvaluationError::Storage(_))));
}

fn evaluate_on(
    lookup: &dyn TripleLookup,
    path: &str,
) -> Result<rdf_paths_engine::solutions::Multiset, QueryEvaluationError> {
    rdf_paths_engine::evaluate_path(
        lookup,
        &iri("a"),
        &parse(path),
        &var("o"),
        &EvaluationOptions::default(),
    )
}

struct FailingLookup;

impl FailingLookup {
    fn fail<T>() -> Result<T, StorageError> {
        Err(StorageError::other("storage is unavailable"))
    }
}

impl TripleLookup for FailingLookup {
    fn triples_with_subject_predicate(
        &self,
        _subject: TermRef<'_>,
        _predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn triples_with_predicate_object(
        &self,
        _predicate: NamedNodeRef<'_>,
        _object: TermRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn triples_with_predicate(
        &self,
        _predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn triples_with_subject(&self, _subject: TermRef<'_>) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn triples_with_object(&self, _object: TermRef<'_>) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn triples(&self) -> Result<TripleIter<'_>, StorageError> {
        Self::fail()
    }

    fn nodes(&self) -> Result<Box<dyn Iterator<Item = Term> + '_>, StorageError> {
        Self::fail()
    }
}
