use std::error::Error;
use std::io;

/// An error related to graph storage operations (reads, writes...).
///
/// The path engine never recovers from a storage error. Errors raised by a lookup are handed to
/// the caller of the query unchanged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The storage does not support a kind of term that was given to it.
    #[error("The storage does not support the term {0}")]
    UnsupportedTerm(String),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl StorageError {
    /// Wraps an arbitrary error raised by a storage implementation.
    pub fn other(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Other(error.into())
    }
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::UnsupportedTerm(_) => {
                Self::new(io::ErrorKind::InvalidInput, error.to_string())
            }
            StorageError::Other(error) => Self::other(error),
        }
    }
}
