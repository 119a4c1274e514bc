//! A SPARQL `SELECT` front end for the property path engine.
//!
//! Only the parts of SPARQL that the path engine can answer are supported: basic graph patterns,
//! property paths, joins, unions, projections and `DISTINCT`/`REDUCED`. Every other construct
//! fails with [QueryEvaluationError::NotImplemented].

mod rewriter;

pub use rewriter::GraphPatternRewriter;

use crate::error::QueryError;
use rdf_paths_engine::solutions::{Multiset, Solution};
use rdf_paths_engine::QueryEvaluationError;
use rdf_paths_logical::Algebra;
use rdf_paths_model::Variable;
use spargebra::Query;

/// Parses a SPARQL `SELECT` query and translates it into [Algebra].
///
/// ```
/// use rdf_paths::sparql::parse_query;
///
/// let algebra = parse_query(
///     "SELECT ?class WHERE { <http://example.com/Student> <http://example.com/sub>* ?class }",
/// )?;
/// assert_eq!(
///     algebra.to_string(),
///     "Project: ?class\n  Bgp: <http://example.com/Student> <http://example.com/sub>* ?class"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
///
/// # Errors
///
/// Fails if the query is not valid SPARQL or uses an unsupported construct.
pub fn parse_query(query: &str) -> Result<Algebra, QueryError> {
    match Query::parse(query, None)? {
        Query::Select {
            dataset, pattern, ..
        } => {
            if dataset.is_some() {
                return Err(QueryEvaluationError::NotImplemented(
                    "FROM and FROM NAMED clauses".to_owned(),
                )
                .into());
            }
            Ok(GraphPatternRewriter::new().rewrite(&pattern)?)
        }
        _ => Err(QueryEvaluationError::NotImplemented(
            "queries other than SELECT".to_owned(),
        )
        .into()),
    }
}

/// The solutions of a `SELECT` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySolutions {
    variables: Vec<Variable>,
    solutions: Multiset,
}

impl QuerySolutions {
    /// Creates the result of evaluating `algebra`. The variables are the projected ones if
    /// `algebra` is a projection, and the bound ones otherwise.
    pub fn new(algebra: &Algebra, solutions: Multiset) -> Self {
        let variables = match projected_variables(algebra) {
            Some(variables) => variables.to_vec(),
            None => solutions.variables(),
        };
        Self {
            variables,
            solutions,
        }
    }

    /// The variables of the result, in the order of the `SELECT` clause.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solution> + '_ {
        self.solutions.iter()
    }

    pub fn into_multiset(self) -> Multiset {
        self.solutions
    }
}

fn projected_variables(algebra: &Algebra) -> Option<&[Variable]> {
    match algebra {
        Algebra::Project(_, variables) => Some(variables),
        Algebra::Distinct(inner) => projected_variables(inner),
        _ => None,
    }
}
