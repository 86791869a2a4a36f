//! Planner loop and its result types.

mod syclop;
mod types;

pub use syclop::Syclop;
pub use types::{ProblemDefinition, SolveFailure, SolveResult, SolveStatus};
