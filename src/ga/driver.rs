//! Evolutionary driver.
//!
//! Runs one full search: initialize a population of random
//! chromosomes, score them, then iterate selection, crossover,
//! mutation, and elitism until the best chromosome is feasible and good
//! enough, the generation budget runs out, or the caller cancels.
//!
//! # Determinism
//! The driver owns a seedable generator threaded through construction
//! and mutation. Fitness evaluation is pure, so scoring the population
//! in parallel does not disturb reproducibility: a fixed seed and fixed
//! inputs produce identical results.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::construction::build_chromosome;
use super::operators::{
    mutate_faculty, mutate_room, mutate_time_slot, single_point_crossover, tournament_select,
};
use super::Chromosome;
use crate::error::EngineError;
use crate::fitness::{FitnessEvaluator, PenaltyWeights, ViolationKind};
use crate::models::Snapshot;
use crate::progress::{ProgressSink, ProgressUpdate};

/// Best fitness above which a feasible schedule is accepted early.
const CONVERGENCE_FITNESS: f64 = 950.0;

/// Generations between progress notifications.
const PROGRESS_INTERVAL: u32 = 10;

/// Search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chromosomes per generation.
    pub population_size: usize,
    /// Generation budget.
    pub max_generations: u32,
    /// Probability a fresh offspring is mutated.
    pub mutation_rate: f64,
    /// Probability an offspring is produced by crossover rather than
    /// cloning.
    pub crossover_rate: f64,
    /// Chromosomes promoted unchanged each generation.
    pub elitism_count: usize,
    /// Sample size of tournament selection.
    pub tournament_size: usize,
    /// Penalty table used by the fitness evaluator.
    pub weights: PenaltyWeights,
    /// Seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elitism_count: 5,
            tournament_size: 5,
            weights: PenaltyWeights::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elitism_count(mut self, count: usize) -> Self {
        self.elitism_count = count;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the penalty table.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects nonsensical parameter values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.population_size == 0 {
            return Err(EngineError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(EngineError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EngineError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EngineError::InvalidConfig(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        if self.elitism_count > self.population_size {
            return Err(EngineError::InvalidConfig(
                "elitism_count cannot exceed population_size".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EngineError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// One row of the per-generation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index (0-based).
    pub generation: u32,
    /// Best-so-far fitness.
    pub best_fitness: f64,
    /// Mean fitness of the generation's population.
    pub mean_fitness: f64,
    /// Hard violations of the best-so-far chromosome.
    pub best_hard_violations: u32,
    /// Soft violations of the best-so-far chromosome.
    pub best_soft_violations: u32,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Best chromosome is feasible with fitness above the acceptance
    /// threshold.
    Converged,
    /// Generation budget exhausted.
    GenerationsExhausted,
    /// Caller cancelled; the result carries the best-so-far.
    Cancelled,
}

/// The outcome of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResult {
    /// Best chromosome found, with its cached evaluation.
    pub best: Chromosome,
    /// Best fitness.
    pub fitness: f64,
    /// Hard violations of the best chromosome.
    pub hard_violations: u32,
    /// Soft violations of the best chromosome.
    pub soft_violations: u32,
    /// Violation counts of the best chromosome, by kind.
    pub breakdown: BTreeMap<ViolationKind, u32>,
    /// Per-generation statistics.
    pub history: Vec<GenerationRecord>,
    /// Wall-clock duration of the run in seconds.
    pub elapsed_secs: f64,
    /// Why the run stopped.
    pub termination: TerminationReason,
}

impl EngineResult {
    /// Whether the run stopped on cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.termination == TerminationReason::Cancelled
    }
}

/// Cooperative cancellation flag.
///
/// Clones share the flag. The driver checks it once per generation
/// boundary and finishes cleanly with the best-so-far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }
}

/// The evolutionary search engine.
pub struct TimetableEngine {
    config: EngineConfig,
    evaluator: FitnessEvaluator,
}

impl TimetableEngine {
    /// Creates an engine, rejecting nonsensical configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let evaluator = FitnessEvaluator::new(config.weights.clone());
        Ok(Self { config, evaluator })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Executes one full run against a snapshot.
    ///
    /// Returns `Err` only when the snapshot has no courses; every other
    /// outcome — converged, exhausted, cancelled, structurally
    /// infeasible — is a result.
    pub fn run(
        &self,
        snapshot: &Snapshot,
        sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<EngineResult, EngineError> {
        if snapshot.courses().is_empty() {
            return Err(EngineError::EmptyCourses);
        }

        let started = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut population: Vec<Chromosome> = (0..self.config.population_size)
            .map(|_| build_chromosome(snapshot, &mut rng))
            .collect();
        let mut best: Option<Chromosome> = None;
        let mut history = Vec::new();
        let mut generation = 0u32;

        let termination = loop {
            self.evaluate_population(snapshot, &mut population);

            let gen_best = &population[fittest_index(&population)];
            if best.as_ref().map_or(true, |b| gen_best.fitness() > b.fitness()) {
                best = Some(gen_best.clone());
            }
            let best_ref = best.as_ref().unwrap_or(gen_best);

            let mean_fitness = population.iter().map(Chromosome::fitness).sum::<f64>()
                / population.len() as f64;
            history.push(GenerationRecord {
                generation,
                best_fitness: best_ref.fitness(),
                mean_fitness,
                best_hard_violations: best_ref.hard_violations(),
                best_soft_violations: best_ref.soft_violations(),
            });

            if generation % PROGRESS_INTERVAL == 0 {
                debug!(
                    generation,
                    best_fitness = best_ref.fitness(),
                    mean_fitness,
                    "generation milestone"
                );
                sink.on_progress(&ProgressUpdate {
                    generation,
                    max_generations: self.config.max_generations,
                    percent_complete: generation as f64 / self.config.max_generations as f64
                        * 100.0,
                    best_fitness: best_ref.fitness(),
                    mean_fitness,
                    best_hard_violations: best_ref.hard_violations(),
                });
            }

            if best_ref.hard_violations() == 0 && best_ref.fitness() > CONVERGENCE_FITNESS {
                break TerminationReason::Converged;
            }
            if generation + 1 >= self.config.max_generations {
                break TerminationReason::GenerationsExhausted;
            }
            if cancel.is_cancelled() {
                break TerminationReason::Cancelled;
            }

            population = self.evolve(&population, snapshot, &mut rng);
            generation += 1;
        };

        let best = best.unwrap_or_default();
        let elapsed_secs = started.elapsed().as_secs_f64();
        info!(
            ?termination,
            generations = generation + 1,
            fitness = best.fitness(),
            elapsed_secs,
            "run finished"
        );

        Ok(EngineResult {
            fitness: best.fitness(),
            hard_violations: best.hard_violations(),
            soft_violations: best.soft_violations(),
            breakdown: best
                .report()
                .map(|r| r.breakdown.clone())
                .unwrap_or_default(),
            best,
            history,
            elapsed_secs,
            termination,
        })
    }

    /// Scores every unscored chromosome, in parallel. Evaluation is
    /// pure, so parallelism cannot disturb determinism.
    fn evaluate_population(&self, snapshot: &Snapshot, population: &mut [Chromosome]) {
        population.par_iter_mut().for_each(|chromosome| {
            if !chromosome.is_evaluated() {
                let report = self.evaluator.evaluate(snapshot, chromosome);
                chromosome.set_report(report);
            }
        });
    }

    /// Builds the next generation: elites unchanged, the rest bred by
    /// tournament selection, crossover, and mutation.
    fn evolve<R: Rng + ?Sized>(
        &self,
        population: &[Chromosome],
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let mut ranked: Vec<&Chromosome> = population.iter().collect();
        ranked.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(Ordering::Equal)
        });

        let mut next = Vec::with_capacity(self.config.population_size);
        for elite in ranked.iter().take(self.config.elitism_count) {
            next.push((*elite).clone());
        }

        while next.len() < self.config.population_size {
            let parent1 = tournament_select(population, self.config.tournament_size, rng);
            let parent2 = tournament_select(population, self.config.tournament_size, rng);

            let mut child = if rng.random_bool(self.config.crossover_rate) {
                single_point_crossover(parent1, parent2, rng)
            } else {
                parent1.clone()
            };

            if rng.random_bool(self.config.mutation_rate) {
                match rng.random_range(0..3u8) {
                    0 => mutate_time_slot(&mut child, snapshot, rng),
                    1 => mutate_faculty(&mut child, snapshot, rng),
                    _ => mutate_room(&mut child, snapshot, rng),
                }
            }
            next.push(child);
        }
        next
    }
}

/// Index of the fittest chromosome, ties broken by position.
fn fittest_index(population: &[Chromosome]) -> usize {
    let mut best = 0;
    for (index, chromosome) in population.iter().enumerate().skip(1) {
        if chromosome.fitness() > population[best].fitness() {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Course, Faculty, Room, Section, TheorySpec, TimeSlot, Weekday,
    };
    use crate::progress::NullSink;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30))],
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .available_weekdays("09:00", "17:00")],
            vec![Room::classroom("R1", 40)],
            (1..=5)
                .flat_map(|n| {
                    [Weekday::Monday, Weekday::Tuesday].map(|day| {
                        TimeSlot::new(
                            day,
                            n,
                            format!("{:02}:00", 8 + n),
                            format!("{:02}:00", 9 + n),
                        )
                    })
                })
                .collect(),
            Vec::new(),
        )
    }

    fn engine(seed: u64) -> TimetableEngine {
        TimetableEngine::new(
            EngineConfig::default()
                .with_population_size(30)
                .with_max_generations(60)
                .with_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_mutation_rate(1.5)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_crossover_rate(-0.1)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_population_size(4)
            .with_elitism_count(5)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_tournament_size(0)
            .validate()
            .is_err());
        assert!(EngineConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_empty_courses_rejected() {
        let snapshot = Snapshot::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let result = engine(1).run(&snapshot, &mut NullSink, &CancelToken::new());
        assert_eq!(result.unwrap_err(), EngineError::EmptyCourses);
    }

    #[test]
    fn test_trivial_input_converges() {
        let result = engine(42)
            .run(&snapshot(), &mut NullSink, &CancelToken::new())
            .unwrap();

        assert_eq!(result.termination, TerminationReason::Converged);
        assert_eq!(result.fitness, 1000.0);
        assert_eq!(result.hard_violations, 0);
        assert_eq!(result.best.gene_count(), 2);
    }

    #[test]
    fn test_best_fitness_is_monotone() {
        let result = engine(7)
            .run(&snapshot(), &mut NullSink, &CancelToken::new())
            .unwrap();

        for pair in result.history.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
            assert_eq!(pair[1].generation, pair[0].generation + 1);
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = engine(99)
            .run(&snapshot(), &mut NullSink, &CancelToken::new())
            .unwrap();
        let b = engine(99)
            .run(&snapshot(), &mut NullSink, &CancelToken::new())
            .unwrap();

        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.history, b.history);
        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.termination, b.termination);
    }

    #[test]
    fn test_cancellation_returns_best_so_far() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let engine = TimetableEngine::new(
            EngineConfig::default()
                .with_population_size(10)
                .with_max_generations(50)
                .with_seed(3),
        )
        .unwrap();

        let result = engine
            .run(&infeasible_snapshot(), &mut NullSink, &cancel)
            .unwrap();
        assert!(result.is_cancelled());
        assert_eq!(result.history.len(), 1);
        assert!(result.best.is_evaluated());
    }

    fn infeasible_snapshot() -> Snapshot {
        // Two sessions, one slot: some clash is unavoidable
        Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30))],
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .available_weekdays("09:00", "17:00")],
            vec![Room::classroom("R1", 40)],
            vec![TimeSlot::new(Weekday::Monday, 1, "09:00", "10:00")],
            Vec::new(),
        )
    }

    #[test]
    fn test_exhaustion_on_infeasible_input() {
        let engine = TimetableEngine::new(
            EngineConfig::default()
                .with_population_size(10)
                .with_max_generations(15)
                .with_seed(11),
        )
        .unwrap();

        let result = engine
            .run(&infeasible_snapshot(), &mut NullSink, &CancelToken::new())
            .unwrap();
        assert_eq!(result.termination, TerminationReason::GenerationsExhausted);
        assert_eq!(result.history.len(), 15);
        assert!(result.hard_violations > 0);
        assert_eq!(result.fitness, 0.0);
    }

    #[test]
    fn test_progress_updates_every_tenth_generation() {
        let mut generations = Vec::new();
        let mut sink = |update: &ProgressUpdate| generations.push(update.generation);

        let engine = TimetableEngine::new(
            EngineConfig::default()
                .with_population_size(10)
                .with_max_generations(25)
                .with_seed(11),
        )
        .unwrap();
        engine
            .run(&infeasible_snapshot(), &mut sink, &CancelToken::new())
            .unwrap();

        assert_eq!(generations, vec![0, 10, 20]);
    }

    #[test]
    fn test_progress_best_is_monotone() {
        let mut best_seen = Vec::new();
        let mut sink = |update: &ProgressUpdate| best_seen.push(update.best_fitness);

        let engine = TimetableEngine::new(
            EngineConfig::default()
                .with_population_size(10)
                .with_max_generations(45)
                .with_seed(5),
        )
        .unwrap();
        engine
            .run(&infeasible_snapshot(), &mut sink, &CancelToken::new())
            .unwrap();

        for pair in best_seen.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}
