//! Bag-of-genes chromosome for timetabling.
//!
//! # Encoding
//!
//! A chromosome is a bag of genes with no positional meaning: each gene
//! is one class assignment (who teaches what to which section, when and
//! where). Construction emits genes in canonical requirement order, and
//! no operator reorders them, so a positional crossover cut aligns the
//! same (course, section, session) identity across parents.
//!
//! Evaluation results are cached on the chromosome and cleared by any
//! mutation, so elites promoted unchanged are never re-scored.

use serde::{Deserialize, Serialize};

use crate::fitness::FitnessReport;
use crate::models::{SessionType, Weekday};

/// One class assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    /// Course code.
    pub course_code: String,
    /// Section name.
    pub section: String,
    /// Theory or lab.
    pub session_type: SessionType,
    /// Assigned day.
    pub day: Weekday,
    /// Assigned slot number within the day.
    pub slot_number: u8,
    /// Assigned faculty id.
    pub faculty_id: String,
    /// Assigned room id.
    pub room_id: String,
    /// Teaching hours this gene occupies.
    pub duration_hours: u8,
    /// Contiguous slots the enclosing block must span (always ≥ 1).
    pub consecutive_slots: u8,
}

/// A complete candidate timetable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<Gene>,
    evaluation: Option<FitnessReport>,
}

impl Chromosome {
    /// Creates an unevaluated chromosome from a bag of genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            evaluation: None,
        }
    }

    /// The gene bag.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Mutable access to the gene bag. Clears the cached evaluation,
    /// since any edit may change the score.
    pub fn genes_mut(&mut self) -> &mut Vec<Gene> {
        self.evaluation = None;
        &mut self.genes
    }

    /// Number of genes.
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// The cached evaluation, if the chromosome has been scored.
    pub fn report(&self) -> Option<&FitnessReport> {
        self.evaluation.as_ref()
    }

    /// Caches an evaluation result.
    pub fn set_report(&mut self, report: FitnessReport) {
        self.evaluation = Some(report);
    }

    /// Whether the chromosome has been scored.
    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// Cached fitness. Unevaluated chromosomes sort below every scored
    /// one.
    pub fn fitness(&self) -> f64 {
        self.evaluation
            .as_ref()
            .map(|e| e.fitness)
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Cached hard-violation count. `u32::MAX` when unevaluated, so an
    /// unscored chromosome can never satisfy a termination check.
    pub fn hard_violations(&self) -> u32 {
        self.evaluation
            .as_ref()
            .map(|e| e.hard_violations)
            .unwrap_or(u32::MAX)
    }

    /// Cached soft-violation count. `u32::MAX` when unevaluated.
    pub fn soft_violations(&self) -> u32 {
        self.evaluation
            .as_ref()
            .map(|e| e.soft_violations)
            .unwrap_or(u32::MAX)
    }
}
