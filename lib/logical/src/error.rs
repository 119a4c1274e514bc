/// An error raised while lowering a property path into algebra.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PathCompileError {
    /// A transformation finished without producing a single pattern. This is an internal
    /// consistency failure of the path compiler and never caused by user input.
    #[error("The path transformation did not produce any patterns")]
    NoPatterns,
    /// The path or pattern uses a construct that has no counterpart in this engine.
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}
