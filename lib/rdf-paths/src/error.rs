use oxrdfio::RdfParseError;
use rdf_paths_engine::QueryEvaluationError;
use rdf_paths_logical::PathCompileError;
use spargebra::SparqlSyntaxError;
use std::io;
use std::path::PathBuf;

/// An error raised while loading a file into a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An error raised while reading the file.
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
    /// The file could not be opened.
    #[error("Unable to open {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// The RDF format could not be derived from the file extension.
    #[error("Unable to guess the RDF format of {}", .0.display())]
    UnknownFormat(PathBuf),
}

impl From<LoaderError> for io::Error {
    #[inline]
    fn from(error: LoaderError) -> Self {
        match error {
            LoaderError::Parsing(error) => error.into(),
            LoaderError::Io { error, .. } => error,
            LoaderError::UnknownFormat(_) => {
                Self::new(io::ErrorKind::InvalidInput, error.to_string())
            }
        }
    }
}

/// An error raised while answering a SPARQL query.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    /// An error in SPARQL parsing.
    #[error(transparent)]
    Parsing(#[from] SparqlSyntaxError),
    /// An error while translating or evaluating the query.
    #[error(transparent)]
    Evaluation(#[from] QueryEvaluationError),
}

impl From<PathCompileError> for QueryError {
    fn from(error: PathCompileError) -> Self {
        Self::Evaluation(error.into())
    }
}
