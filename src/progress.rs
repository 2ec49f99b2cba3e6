//! Progress observation.
//!
//! The driver reports generation-level statistics through a minimal
//! observer seam. Delivery is cooperative: the driver blocks on the
//! sink call, so a storage-backed sink can persist atomically between
//! generations without racing the search.
//!
//! Updates arrive in monotonically increasing generation order, and the
//! reported best fitness never decreases.

use serde::{Deserialize, Serialize};

/// Generation-level statistics handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current generation (0-based).
    pub generation: u32,
    /// Configured generation cap.
    pub max_generations: u32,
    /// Progress through the generation budget, 0-100.
    pub percent_complete: f64,
    /// Best-so-far fitness.
    pub best_fitness: f64,
    /// Mean fitness of the current population.
    pub mean_fitness: f64,
    /// Hard violations of the best-so-far chromosome.
    pub best_hard_violations: u32,
}

/// Observer of generation-level progress.
///
/// Any `FnMut(&ProgressUpdate)` closure is a sink.
pub trait ProgressSink {
    /// Receives one update. The driver waits for this call to return
    /// before continuing.
    fn on_progress(&mut self, update: &ProgressUpdate);
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_progress(&mut self, _update: &ProgressUpdate) {}
}

impl<F: FnMut(&ProgressUpdate)> ProgressSink for F {
    fn on_progress(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        let mut sink = |update: &ProgressUpdate| seen.push(update.generation);

        let update = ProgressUpdate {
            generation: 10,
            max_generations: 100,
            percent_complete: 10.0,
            best_fitness: 800.0,
            mean_fitness: 500.0,
            best_hard_violations: 1,
        };
        sink.on_progress(&update);
        drop(sink);
        assert_eq!(seen, vec![10]);
    }

    #[test]
    fn test_null_sink_accepts_updates() {
        let mut sink = NullSink;
        sink.on_progress(&ProgressUpdate {
            generation: 0,
            max_generations: 1,
            percent_complete: 0.0,
            best_fitness: 0.0,
            mean_fitness: 0.0,
            best_hard_violations: 0,
        });
    }
}
