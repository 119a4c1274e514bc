use rdf_paths_engine::QueryEvaluationError;
use rdf_paths_logical::paths::PropertyPath;
use rdf_paths_logical::patterns::{BgpPattern, PatternItem, TriplePattern};
use rdf_paths_logical::Algebra;
use spargebra::algebra::{GraphPattern, PropertyPathExpression};
use spargebra::term::{TermPattern, TriplePattern as SparqlTriplePattern};
use tracing::debug;

/// Translates a [GraphPattern] into [Algebra].
///
/// Property paths are kept as path patterns. The evaluator lowers each of them when it is
/// reached, so every path gets its own temporary variables.
#[derive(Debug, Default)]
pub struct GraphPatternRewriter {
    /// The number of path patterns that have been translated.
    paths: usize,
}

impl GraphPatternRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of path patterns the rewriter has produced so far.
    pub fn path_count(&self) -> usize {
        self.paths
    }

    /// Translates `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [QueryEvaluationError::NotImplemented] for every pattern other than basic graph
    /// patterns, paths, joins, unions, projections, `DISTINCT` and `REDUCED`.
    pub fn rewrite(&mut self, pattern: &GraphPattern) -> Result<Algebra, QueryEvaluationError> {
        let algebra = self.rewrite_graph_pattern(pattern)?;
        debug!(paths = self.paths, "Translated graph pattern");
        Ok(algebra)
    }

    fn rewrite_graph_pattern(
        &mut self,
        pattern: &GraphPattern,
    ) -> Result<Algebra, QueryEvaluationError> {
        match pattern {
            GraphPattern::Bgp { patterns } => rewrite_bgp(patterns),
            GraphPattern::Path {
                subject,
                path,
                object,
            } => self.rewrite_path(subject, path, object),
            GraphPattern::Join { left, right } => Ok(Algebra::join(
                self.rewrite_graph_pattern(left)?,
                self.rewrite_graph_pattern(right)?,
            )),
            GraphPattern::Union { left, right } => Ok(Algebra::union(
                self.rewrite_graph_pattern(left)?,
                self.rewrite_graph_pattern(right)?,
            )),
            GraphPattern::Project { inner, variables } => Ok(Algebra::project(
                self.rewrite_graph_pattern(inner)?,
                variables.clone(),
            )),
            // Removing every duplicate is a valid way of reducing them.
            GraphPattern::Distinct { inner } | GraphPattern::Reduced { inner } => {
                Ok(Algebra::distinct(self.rewrite_graph_pattern(inner)?))
            }
            pattern => Err(QueryEvaluationError::NotImplemented(format!(
                "graph pattern {pattern}"
            ))),
        }
    }

    fn rewrite_path(
        &mut self,
        subject: &TermPattern,
        path: &PropertyPathExpression,
        object: &TermPattern,
    ) -> Result<Algebra, QueryEvaluationError> {
        self.paths += 1;
        let subject = PatternItem::try_from(subject)?;
        let object = PatternItem::try_from(object)?;
        Ok(Algebra::Bgp(vec![BgpPattern::path(
            subject,
            PropertyPath::from(path),
            object,
        )]))
    }
}

fn rewrite_bgp(patterns: &[SparqlTriplePattern]) -> Result<Algebra, QueryEvaluationError> {
    let patterns = patterns
        .iter()
        .map(|pattern| TriplePattern::try_from(pattern).map(BgpPattern::Triple))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Algebra::Bgp(patterns))
}
