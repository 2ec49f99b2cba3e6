//! Genetic operators for timetabling.
//!
//! Selection, crossover, and the three gene mutations the driver picks
//! between. All operators take the random generator explicitly so runs
//! are reproducible under a fixed seed.
//!
//! Construction emits genes in canonical requirement order and no
//! operator reorders the bag, so the single-point cut inherits the same
//! (course, section, session) identity at every position from either
//! parent.

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::Chromosome;
use crate::models::Snapshot;

/// Tournament selection: samples `tournament_size` members uniformly
/// with replacement and returns the fittest, ties broken by encounter
/// order.
pub fn tournament_select<'a, R: Rng + ?Sized>(
    population: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Chromosome {
    debug_assert!(!population.is_empty());
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..tournament_size {
        let contender = &population[rng.random_range(0..population.len())];
        if contender.fitness() > best.fitness() {
            best = contender;
        }
    }
    best
}

/// Single-point crossover: a uniform random cut over the gene sequence,
/// left prefix from `parent1`, right suffix from `parent2`.
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Chromosome {
    let cut = rng.random_range(0..=parent1.gene_count().min(parent2.gene_count()));
    let mut genes = Vec::with_capacity(parent2.gene_count());
    genes.extend_from_slice(&parent1.genes()[..cut]);
    genes.extend_from_slice(&parent2.genes()[cut..]);
    Chromosome::new(genes)
}

/// Time mutation: moves a uniformly chosen gene to a uniformly chosen
/// active slot.
pub fn mutate_time_slot<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    snapshot: &Snapshot,
    rng: &mut R,
) {
    if chromosome.gene_count() == 0 {
        return;
    }
    let slots = snapshot.active_slots();
    let Some(&slot) = slots.choose(rng) else {
        return;
    };
    let index = rng.random_range(0..chromosome.gene_count());
    let gene = &mut chromosome.genes_mut()[index];
    gene.day = slot.day;
    gene.slot_number = slot.slot_number;
}

/// Faculty mutation: reassigns a uniformly chosen gene to a uniformly
/// chosen qualified faculty member, if any exists.
pub fn mutate_faculty<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    snapshot: &Snapshot,
    rng: &mut R,
) {
    if chromosome.gene_count() == 0 {
        return;
    }
    let index = rng.random_range(0..chromosome.gene_count());
    let course_code = chromosome.genes()[index].course_code.clone();
    let Some(course) = snapshot.course(&course_code) else {
        return;
    };
    let pool = snapshot.qualified_faculty(course);
    if let Some(&faculty) = pool.choose(rng) {
        chromosome.genes_mut()[index].faculty_id = faculty.id.clone();
    }
}

/// Room mutation: reassigns a uniformly chosen gene to a uniformly
/// chosen suitable room, if any exists.
pub fn mutate_room<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    snapshot: &Snapshot,
    rng: &mut R,
) {
    if chromosome.gene_count() == 0 {
        return;
    }
    let index = rng.random_range(0..chromosome.gene_count());
    let (course_code, session_type) = {
        let gene = &chromosome.genes()[index];
        (gene.course_code.clone(), gene.session_type)
    };
    let Some(course) = snapshot.course(&course_code) else {
        return;
    };
    let pool = snapshot.suitable_rooms(course, session_type);
    if let Some(&room) = pool.choose(rng) {
        chromosome.genes_mut()[index].room_id = room.id.clone();
    }
}
