mod algebra;
mod error;
pub mod paths;
pub mod patterns;
mod transform;

pub use algebra::Algebra;
pub use error::PathCompileError;
pub use transform::PathTransformContext;
