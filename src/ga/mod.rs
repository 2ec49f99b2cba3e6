//! Evolutionary search for timetables.
//!
//! # Encoding
//!
//! A chromosome is a bag of [`Gene`] records, one per session
//! requirement: (course, section, session type) → (day, slot, faculty,
//! room). There is no positional meaning; construction order is only a
//! convention that keeps crossover identity-aligned.
//!
//! # Quick Start
//!
//! ```no_run
//! use timetable_engine::ga::{CancelToken, EngineConfig, TimetableEngine};
//! use timetable_engine::models::Snapshot;
//! use timetable_engine::progress::NullSink;
//!
//! # fn snapshot() -> Snapshot { unimplemented!() }
//! let snapshot: Snapshot = snapshot();
//! let engine = TimetableEngine::new(EngineConfig::default().with_seed(42))?;
//! let result = engine.run(&snapshot, &mut NullSink, &CancelToken::new())?;
//! println!("fitness {} after {} generations", result.fitness, result.history.len());
//! # Ok::<(), timetable_engine::EngineError>(())
//! ```
//!
//! # Search Loop
//!
//! 1. Construct `population_size` random chromosomes.
//! 2. Score every chromosome (parallel; evaluation is pure).
//! 3. Track the best-so-far (strict improvement, deep copy).
//! 4. Append a history record; notify the sink every 10th generation.
//! 5. Stop when the best is feasible and above the acceptance
//!    threshold, the budget runs out, or the caller cancels.
//! 6. Otherwise breed the next generation: elites unchanged, the rest
//!    by tournament selection, single-point crossover, and one of three
//!    equally likely mutations (time, faculty, room).
//!
//! # Submodules
//!
//! - [`construction`]: random chromosome construction and preflight
//! - [`operators`]: selection, crossover, and mutation

mod chromosome;
pub mod construction;
mod driver;
pub mod operators;

pub use chromosome::{Chromosome, Gene};
pub use construction::{preflight, InfeasibilityReport, InfeasibleRequirement};
pub use driver::{
    CancelToken, EngineConfig, EngineResult, GenerationRecord, TerminationReason, TimetableEngine,
};
