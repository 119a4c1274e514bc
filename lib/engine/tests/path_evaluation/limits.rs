use crate::test_utils::{evaluate_with_options, graph, iri, var};
use rdf_paths_engine::{EvaluationOptions, QueryEvaluationError};
use std::time::Duration;

#[test]
fn test_expired_timeout() {
    let graph = graph(&[("a", "knows", "b")]);
    let options = EvaluationOptions::default().with_timeout(Duration::ZERO);
    let result = evaluate_with_options(&graph, iri("a"), "ex:knows*", var("o"), &options);
    assert!(matches!(result, Err(QueryEvaluationError::Timeout(_))));
}

#[test]
fn test_round_limit() -> Result<(), QueryEvaluationError> {
    let graph = graph(&[("a", "knows", "b"), ("b", "knows", "c"), ("c", "knows", "d")]);

    let options = EvaluationOptions::default().with_max_rounds(2);
    let result = evaluate_with_options(&graph, iri("a"), "ex:knows+", var("o"), &options);
    assert!(matches!(
        result,
        Err(QueryEvaluationError::PathLimitExceeded(2))
    ));

    // Three rounds reach `d`, the fourth one finds nothing new.
    let options = EvaluationOptions::default().with_max_rounds(4);
    let solutions = evaluate_with_options(&graph, iri("a"), "ex:knows+", var("o"), &options)?;
    assert_eq!(solutions.len(), 3);
    Ok(())
}
