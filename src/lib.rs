//! Evolutionary scheduling engine for weekly university timetables.
//!
//! Given a catalog of courses, a faculty pool, rooms, and a discrete
//! weekly slot grid, the engine searches for an assignment of every
//! required session to a (day, slot, faculty, room) tuple that
//! satisfies hard feasibility constraints and optimizes soft
//! preferences.
//!
//! # Modules
//!
//! - **`models`**: Input entities — `Course`, `Section`, `Faculty`,
//!   `Room`, `TimeSlot`, `ConstraintRule` — and the `Snapshot` bundle
//! - **`feasibility`**: Pure predicates shared by search and auditing
//! - **`ga`**: Chromosome encoding, random construction, genetic
//!   operators, and the evolutionary driver
//! - **`fitness`**: The weighted-penalty evaluator used inside the loop
//! - **`validation`**: Post-hoc constraint auditing and the conflict
//!   fast pass
//! - **`progress`**: The cooperative progress-sink seam
//!
//! # Design
//!
//! Infeasibility is data, not an error: a snapshot with no qualified
//! faculty for some course still runs, and the missing genes surface as
//! hard violations in the result. Only nonsensical configuration and an
//! empty course catalog are rejected. Runs are reproducible under a
//! fixed seed.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

pub mod error;
pub mod feasibility;
pub mod fitness;
pub mod ga;
pub mod models;
pub mod progress;
pub mod validation;

pub use error::EngineError;
pub use fitness::{FitnessEvaluator, FitnessReport, PenaltyWeights, ViolationKind};
pub use ga::{
    CancelToken, Chromosome, EngineConfig, EngineResult, Gene, TimetableEngine,
};
pub use models::Snapshot;
pub use validation::{detect_conflicts, validate, ScheduleConflict, ValidationReport};
