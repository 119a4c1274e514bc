use rdf_paths_logical::PathCompileError;
use rdf_paths_model::StorageError;
use std::time::Duration;

/// An error raised while evaluating algebra.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// An error from the storage.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// An error while lowering a path pattern.
    #[error(transparent)]
    Compile(#[from] PathCompileError),
    /// The evaluation did not finish within the configured timeout.
    #[error("The evaluation did not finish within {0:?}")]
    Timeout(Duration),
    /// An unbounded path needed more rounds than allowed.
    #[error("The evaluation of a path exceeded the limit of {0} rounds")]
    PathLimitExceeded(usize),
    #[error("A feature has not yet been implemented: {0}")]
    NotImplemented(String),
    #[error("An internal error that likely indicates towards a bug in the path engine: {0}")]
    InternalError(String),
}

impl QueryEvaluationError {
    pub fn internal<T>(cause: String) -> Result<T, Self> {
        Err(QueryEvaluationError::InternalError(cause))
    }
}
