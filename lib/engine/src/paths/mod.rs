//! Evaluation of unbounded property paths.
//!
//! An unbounded path is evaluated by repeatedly moving a frontier of [PotentialPath]s across the
//! graph until no new `(start, current)` pair is reached. Every node of the path (edges,
//! sequences, alternatives, ...) moves the frontier by one application.

mod context;
mod driver;
mod potential;
mod step;

pub use context::{EvalOutcome, PathEvaluationContext};
pub(crate) use driver::join_with_input;
pub use driver::{PathEvaluationReport, UnboundedPathEvaluator};
pub use potential::PotentialPath;
pub use step::evaluate;
