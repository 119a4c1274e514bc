//! API to query an in-memory RDF graph with property paths.
//!
//! The entry point of the module is the [`Store`] struct.
//!
//! Usage example:
//! ```
//! use rdf_paths::model::*;
//! use rdf_paths::store::Store;
//!
//! let mut store = Store::new();
//!
//! // insertion
//! let a = NamedNode::new("http://example.com/a")?;
//! let b = NamedNode::new("http://example.com/b")?;
//! let knows = NamedNode::new("http://example.com/knows")?;
//! store.insert(Triple::new(a.clone(), knows.clone(), b.clone()));
//!
//! // SPARQL query
//! let solutions = store.query(
//!     "SELECT ?o WHERE { <http://example.com/a> <http://example.com/knows>+ ?o }",
//! )?;
//! let o = Variable::new("o")?;
//! assert_eq!(solutions.iter().next().and_then(|s| s.get(&o)), Some(&b.into()));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::{LoaderError, QueryError};
use crate::sparql::{parse_query, QuerySolutions};
use oxrdfio::{RdfFormat, RdfParser};
use rdf_paths_engine::solutions::Multiset;
use rdf_paths_engine::{AlgebraEvaluator, EvaluationOptions, QueryEvaluationError};
use rdf_paths_logical::paths::PropertyPath;
use rdf_paths_logical::patterns::PatternItem;
use rdf_paths_logical::PathTransformContext;
use rdf_paths_model::Triple;
use rdf_paths_storage::memory::MemoryGraph;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// An in-memory RDF graph that answers property paths and SPARQL `SELECT` queries.
///
/// All evaluations use the [EvaluationOptions] of the store.
#[derive(Debug, Default)]
pub struct Store {
    graph: MemoryGraph,
    options: EvaluationOptions,
}

impl Store {
    /// Creates an empty [Store] with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the evaluation options of this store.
    #[must_use]
    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    /// Returns the graph of the store.
    pub fn graph(&self) -> &MemoryGraph {
        &self.graph
    }

    /// Returns the number of triples in the store.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.contains(triple)
    }

    /// Adds a triple to the store. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.graph.insert(triple)
    }

    /// Removes a triple from the store. Returns `false` if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.graph.remove(triple)
    }

    /// Adds all the triples of `triples` to the store.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.graph.extend(triples);
    }

    /// Loads an RDF file into the store and returns the number of triples that were read.
    ///
    /// The store holds a single graph. The graph names of quads are dropped and blank nodes are
    /// renamed, so loading two files never merges their blank nodes.
    ///
    /// Usage example:
    /// ```
    /// use oxrdfio::RdfFormat;
    /// use rdf_paths::store::Store;
    ///
    /// let mut store = Store::new();
    /// let file = "<http://example.com/a> <http://example.com/p> <http://example.com/b> .";
    /// store.load_from_reader(RdfFormat::NTriples, file.as_bytes())?;
    /// assert_eq!(store.len(), 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the content is not valid in the format of `parser`.
    pub fn load_from_reader(
        &mut self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<usize, LoaderError> {
        let triples = parser
            .into()
            .rename_blank_nodes()
            .for_reader(reader)
            .map(|quad| quad.map(Triple::from))
            .collect::<Result<Vec<_>, _>>()?;
        let count = triples.len();
        self.graph.extend(triples);
        debug!(triples = count, total = self.graph.len(), "Loaded triples");
        Ok(count)
    }

    /// Loads the RDF file at `path`. If `format` is not given, it is derived from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or parsed, or if its format is unknown.
    pub fn load_from_path(
        &mut self,
        path: &Path,
        format: Option<RdfFormat>,
    ) -> Result<usize, LoaderError> {
        let format = match format {
            Some(format) => format,
            None => path
                .extension()
                .and_then(|extension| extension.to_str())
                .and_then(RdfFormat::from_extension)
                .ok_or_else(|| LoaderError::UnknownFormat(path.to_owned()))?,
        };
        let file = File::open(path).map_err(|error| LoaderError::Io {
            path: path.to_owned(),
            error,
        })?;
        self.load_from_reader(format, BufReader::new(file))
    }

    /// Evaluates `subject path object` against the store.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be lowered or a limit of the options is exceeded.
    pub fn evaluate_path(
        &self,
        subject: &PatternItem,
        path: &PropertyPath,
        object: &PatternItem,
    ) -> Result<Multiset, QueryEvaluationError> {
        let mut context = PathTransformContext::new(subject.clone(), object.clone());
        let algebra = path.to_algebra(&mut context)?;
        AlgebraEvaluator::new(&self.graph, &self.options).evaluate(&algebra)
    }

    /// Executes a SPARQL `SELECT` query. [parse_query] returns the algebra that is evaluated.
    ///
    /// # Errors
    ///
    /// Fails if the query is invalid, uses an unsupported construct or its evaluation fails.
    pub fn query(&self, query: &str) -> Result<QuerySolutions, QueryError> {
        let algebra = parse_query(query)?;
        let solutions = AlgebraEvaluator::new(&self.graph, &self.options).evaluate(&algebra)?;
        Ok(QuerySolutions::new(&algebra, solutions))
    }
}
