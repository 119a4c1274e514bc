mod error;
mod eval;
mod options;
pub mod paths;
pub mod solutions;

pub use error::QueryEvaluationError;
pub use eval::{evaluate_path, AlgebraEvaluator};
pub use options::EvaluationOptions;
