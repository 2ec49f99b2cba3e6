//! Engine errors.
//!
//! The engine never raises for ordinary infeasibility — infeasible
//! inputs produce results whose violation counts say so, and
//! cancellation returns the best-so-far. Errors are reserved for inputs
//! the engine cannot meaningfully run against.

use thiserror::Error;

/// Errors raised to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The snapshot has no courses, so there is nothing to schedule.
    #[error("input snapshot has no courses to schedule")]
    EmptyCourses,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
