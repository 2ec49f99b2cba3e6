//! Chromosome fitness evaluation.
//!
//! Scores a candidate timetable against the hard and soft constraint
//! set: start from a baseline of 1000, subtract a weighted penalty per
//! detected violation, floor at zero. The evaluator is the fast
//! approximation used inside the search loop; the constraint validator
//! in [`crate::validation`] is the authoritative post-hoc audit.
//!
//! Broken entity references never abort evaluation: an unknown faculty,
//! room, course, or slot counts as a detectable hard violation and the
//! scan continues.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::feasibility::faculty_available;
use crate::ga::{Chromosome, Gene};
use crate::models::{SectionKey, SessionType, Snapshot, Weekday};

/// Violation classification.
///
/// Serialized names double as the keys of the configurable weight
/// table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A faculty member holds two sessions in one slot.
    FacultyDoubleBooking,
    /// A room hosts two sessions in one slot.
    RoomDoubleBooking,
    /// A section attends two sessions in one slot.
    SectionDoubleBooking,
    /// A session falls outside its faculty's availability.
    FacultyUnavailable,
    /// A multi-slot lab block is missing a contiguous neighbor.
    LabContinuityBroken,
    /// Room capacity below the section head count.
    RoomCapacityExceeded,
    /// Weekly assigned hours above the faculty maximum.
    WorkloadOverMax,
    /// Weekly assigned hours below the faculty minimum.
    WorkloadUnderMin,
    /// Idle slots between a section's same-day classes.
    StudentGap,
    /// Idle slots between a faculty member's same-day classes.
    FacultyGap,
    /// Spread of assigned hours across faculty (per unit std-dev).
    WorkloadImbalance,
    /// Teaching runs longer than three back-to-back slots.
    ExcessiveConsecutiveHours,
    /// A session in a slot its faculty asked to avoid.
    PreferenceMismatch,
    /// A section's week front-loaded onto too few days.
    UnbalancedDailyDistribution,
    /// A session requirement with no covering gene.
    MissingSession,
    /// A gene referencing an entity absent from the snapshot.
    MissingReference,
}

impl ViolationKind {
    /// Whether a violation of this kind makes the schedule unusable.
    pub fn is_hard(self) -> bool {
        matches!(
            self,
            ViolationKind::FacultyDoubleBooking
                | ViolationKind::RoomDoubleBooking
                | ViolationKind::SectionDoubleBooking
                | ViolationKind::FacultyUnavailable
                | ViolationKind::LabContinuityBroken
                | ViolationKind::RoomCapacityExceeded
                | ViolationKind::MissingSession
                | ViolationKind::MissingReference
        )
    }
}

/// Penalty per single violation, by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub faculty_double_booking: f64,
    pub room_double_booking: f64,
    pub section_double_booking: f64,
    pub faculty_unavailable: f64,
    pub lab_continuity_broken: f64,
    pub room_capacity_exceeded: f64,
    pub workload_over_max: f64,
    pub workload_under_min: f64,
    pub student_gap: f64,
    pub faculty_gap: f64,
    pub workload_imbalance: f64,
    pub excessive_consecutive_hours: f64,
    pub preference_mismatch: f64,
    pub unbalanced_daily_distribution: f64,
    pub missing_session: f64,
    pub missing_reference: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            faculty_double_booking: 1000.0,
            room_double_booking: 1000.0,
            section_double_booking: 1000.0,
            faculty_unavailable: 900.0,
            lab_continuity_broken: 800.0,
            room_capacity_exceeded: 800.0,
            workload_over_max: 100.0,
            workload_under_min: 80.0,
            student_gap: 50.0,
            faculty_gap: 40.0,
            workload_imbalance: 60.0,
            excessive_consecutive_hours: 50.0,
            preference_mismatch: 30.0,
            unbalanced_daily_distribution: 40.0,
            missing_session: 1000.0,
            missing_reference: 1000.0,
        }
    }
}

impl PenaltyWeights {
    /// Penalty for one violation of `kind`.
    pub fn weight_for(&self, kind: ViolationKind) -> f64 {
        match kind {
            ViolationKind::FacultyDoubleBooking => self.faculty_double_booking,
            ViolationKind::RoomDoubleBooking => self.room_double_booking,
            ViolationKind::SectionDoubleBooking => self.section_double_booking,
            ViolationKind::FacultyUnavailable => self.faculty_unavailable,
            ViolationKind::LabContinuityBroken => self.lab_continuity_broken,
            ViolationKind::RoomCapacityExceeded => self.room_capacity_exceeded,
            ViolationKind::WorkloadOverMax => self.workload_over_max,
            ViolationKind::WorkloadUnderMin => self.workload_under_min,
            ViolationKind::StudentGap => self.student_gap,
            ViolationKind::FacultyGap => self.faculty_gap,
            ViolationKind::WorkloadImbalance => self.workload_imbalance,
            ViolationKind::ExcessiveConsecutiveHours => self.excessive_consecutive_hours,
            ViolationKind::PreferenceMismatch => self.preference_mismatch,
            ViolationKind::UnbalancedDailyDistribution => self.unbalanced_daily_distribution,
            ViolationKind::MissingSession => self.missing_session,
            ViolationKind::MissingReference => self.missing_reference,
        }
    }
}

/// Evaluation result for one chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    /// Scalar quality, `max(0, 1000 − Σ count × weight)`.
    pub fitness: f64,
    /// Total hard violations.
    pub hard_violations: u32,
    /// Total soft violations.
    pub soft_violations: u32,
    /// Violation counts by kind. Kinds with zero count are omitted.
    pub breakdown: BTreeMap<ViolationKind, u32>,
}

impl FitnessReport {
    /// The report of a violation-free chromosome.
    pub fn perfect() -> Self {
        Self {
            fitness: 1000.0,
            hard_violations: 0,
            soft_violations: 0,
            breakdown: BTreeMap::new(),
        }
    }
}

/// Scores chromosomes against an input snapshot.
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    weights: PenaltyWeights,
}

/// Baseline score before penalties.
const BASELINE: f64 = 1000.0;

/// Longest acceptable run of back-to-back teaching slots.
const MAX_CONSECUTIVE_SLOTS: u32 = 3;

impl FitnessEvaluator {
    /// Creates an evaluator with the given weight table.
    pub fn new(weights: PenaltyWeights) -> Self {
        Self { weights }
    }

    /// The active weight table.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Scores a chromosome.
    pub fn evaluate(&self, snapshot: &Snapshot, chromosome: &Chromosome) -> FitnessReport {
        let genes = chromosome.genes();
        let mut counts: BTreeMap<ViolationKind, u32> = BTreeMap::new();

        self.count_missing_sessions(snapshot, genes, &mut counts);
        self.count_missing_references(snapshot, genes, &mut counts);
        self.count_double_bookings(snapshot, genes, &mut counts);
        self.count_availability(snapshot, genes, &mut counts);
        self.count_continuity(genes, &mut counts);
        self.count_capacity(snapshot, genes, &mut counts);
        self.count_workload(snapshot, genes, &mut counts);
        self.count_gaps(snapshot, genes, &mut counts);
        self.count_imbalance(snapshot, genes, &mut counts);
        self.count_consecutive_runs(genes, &mut counts);
        self.count_preferences(snapshot, genes, &mut counts);
        self.count_daily_distribution(snapshot, genes, &mut counts);

        let mut penalty = 0.0;
        let mut hard = 0u32;
        let mut soft = 0u32;
        for (&kind, &count) in &counts {
            penalty += count as f64 * self.weights.weight_for(kind);
            if kind.is_hard() {
                hard += count;
            } else {
                soft += count;
            }
        }

        FitnessReport {
            fitness: (BASELINE - penalty).max(0.0),
            hard_violations: hard,
            soft_violations: soft,
            breakdown: counts,
        }
    }

    fn count_missing_sessions(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let expected = snapshot.session_requirement_count();
        if expected > genes.len() {
            add(counts, ViolationKind::MissingSession, (expected - genes.len()) as u32);
        }
    }

    fn count_missing_references(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        for gene in genes {
            let mut missing = 0u32;
            match snapshot.course(&gene.course_code) {
                Some(course) if course.section(&gene.section).is_some() => {}
                Some(_) => missing += 1,
                None => missing += 1,
            }
            if snapshot.faculty_member(&gene.faculty_id).is_none() {
                missing += 1;
            }
            if snapshot.room(&gene.room_id).is_none() {
                missing += 1;
            }
            if snapshot.slot(gene.day, gene.slot_number).is_none() {
                missing += 1;
            }
            add(counts, ViolationKind::MissingReference, missing);
        }
    }

    fn count_double_bookings(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let mut faculty_slots: HashMap<(&str, Weekday, u8), u32> = HashMap::new();
        let mut room_slots: HashMap<(&str, Weekday, u8), u32> = HashMap::new();
        let mut section_slots: HashMap<(SectionKey, Weekday, u8), u32> = HashMap::new();

        for gene in genes {
            *faculty_slots
                .entry((gene.faculty_id.as_str(), gene.day, gene.slot_number))
                .or_insert(0) += 1;
            *room_slots
                .entry((gene.room_id.as_str(), gene.day, gene.slot_number))
                .or_insert(0) += 1;
            if let Some(key) = snapshot.section_key(&gene.course_code, &gene.section) {
                *section_slots
                    .entry((key, gene.day, gene.slot_number))
                    .or_insert(0) += 1;
            }
        }

        add(counts, ViolationKind::FacultyDoubleBooking, duplicates(faculty_slots.values()));
        add(counts, ViolationKind::RoomDoubleBooking, duplicates(room_slots.values()));
        add(counts, ViolationKind::SectionDoubleBooking, duplicates(section_slots.values()));
    }

    fn count_availability(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let mut unavailable = 0u32;
        for gene in genes {
            let (Some(faculty), Some(slot)) = (
                snapshot.faculty_member(&gene.faculty_id),
                snapshot.slot(gene.day, gene.slot_number),
            ) else {
                continue;
            };

            // Sessions longer than one hour end at the last covered slot.
            let end = gene
                .slot_number
                .checked_add(gene.duration_hours - 1)
                .filter(|_| gene.duration_hours > 1)
                .and_then(|last| snapshot.slot(gene.day, last))
                .map(|s| s.end.as_str())
                .unwrap_or(slot.end.as_str());

            if !faculty_available(faculty, gene.day, &slot.start, end) {
                unavailable += 1;
            }
        }
        add(counts, ViolationKind::FacultyUnavailable, unavailable);
    }

    fn count_continuity(&self, genes: &[Gene], counts: &mut BTreeMap<ViolationKind, u32>) {
        let missing: u32 = continuity_breaks(genes).iter().map(|b| b.missing).sum();
        add(counts, ViolationKind::LabContinuityBroken, missing);
    }

    fn count_capacity(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let mut over = 0u32;
        for gene in genes {
            let (Some(section), Some(room)) = (
                snapshot.section(&gene.course_code, &gene.section),
                snapshot.room(&gene.room_id),
            ) else {
                continue;
            };
            if room.capacity < section.strength {
                over += 1;
            }
        }
        add(counts, ViolationKind::RoomCapacityExceeded, over);
    }

    fn count_workload(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let hours = assigned_hours(genes);
        let mut over = 0u32;
        let mut under = 0u32;
        for faculty in snapshot.faculty().iter().filter(|f| f.active) {
            let total = hours.get(faculty.id.as_str()).copied().unwrap_or(0);
            if total > faculty.max_hours_per_week as u32 {
                over += 1;
            }
            if total < faculty.min_hours_per_week as u32 {
                under += 1;
            }
        }
        add(counts, ViolationKind::WorkloadOverMax, over);
        add(counts, ViolationKind::WorkloadUnderMin, under);
    }

    fn count_gaps(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let mut section_days: HashMap<(SectionKey, Weekday), Vec<u8>> = HashMap::new();
        let mut faculty_days: HashMap<(&str, Weekday), Vec<u8>> = HashMap::new();
        for gene in genes {
            if let Some(key) = snapshot.section_key(&gene.course_code, &gene.section) {
                section_days
                    .entry((key, gene.day))
                    .or_default()
                    .push(gene.slot_number);
            }
            faculty_days
                .entry((gene.faculty_id.as_str(), gene.day))
                .or_default()
                .push(gene.slot_number);
        }

        let student: u32 = section_days.values_mut().map(|s| gap_sum(s)).sum();
        let faculty: u32 = faculty_days.values_mut().map(|s| gap_sum(s)).sum();
        add(counts, ViolationKind::StudentGap, student);
        add(counts, ViolationKind::FacultyGap, faculty);
    }

    fn count_imbalance(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let hours = assigned_hours(genes);
        let loads: Vec<f64> = snapshot
            .faculty()
            .iter()
            .filter(|f| f.active)
            .map(|f| hours.get(f.id.as_str()).copied().unwrap_or(0) as f64)
            .collect();
        if loads.len() < 2 {
            return;
        }

        let mean = loads.iter().sum::<f64>() / loads.len() as f64;
        let variance = loads.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / loads.len() as f64;
        add(counts, ViolationKind::WorkloadImbalance, variance.sqrt().floor() as u32);
    }

    fn count_consecutive_runs(&self, genes: &[Gene], counts: &mut BTreeMap<ViolationKind, u32>) {
        let mut faculty_days: HashMap<(&str, Weekday), Vec<u8>> = HashMap::new();
        for gene in genes {
            faculty_days
                .entry((gene.faculty_id.as_str(), gene.day))
                .or_default()
                .push(gene.slot_number);
        }

        let mut excess = 0u32;
        for slots in faculty_days.values_mut() {
            slots.sort_unstable();
            slots.dedup();

            let mut run = 1u32;
            for window in slots.windows(2) {
                if window[1] == window[0] + 1 {
                    run += 1;
                    if run > MAX_CONSECUTIVE_SLOTS {
                        excess += 1;
                    }
                } else {
                    run = 1;
                }
            }
        }
        add(counts, ViolationKind::ExcessiveConsecutiveHours, excess);
    }

    fn count_preferences(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let mut mismatches = 0u32;
        for gene in genes {
            if let Some(faculty) = snapshot.faculty_member(&gene.faculty_id) {
                if faculty.avoids(gene.day, gene.slot_number) {
                    mismatches += 1;
                }
            }
        }
        add(counts, ViolationKind::PreferenceMismatch, mismatches);
    }

    fn count_daily_distribution(
        &self,
        snapshot: &Snapshot,
        genes: &[Gene],
        counts: &mut BTreeMap<ViolationKind, u32>,
    ) {
        let days = snapshot.active_day_count().max(1) as u32;
        let mut per_section: HashMap<SectionKey, HashMap<Weekday, u32>> = HashMap::new();
        for gene in genes {
            if let Some(key) = snapshot.section_key(&gene.course_code, &gene.section) {
                *per_section.entry(key).or_default().entry(gene.day).or_insert(0) += 1;
            }
        }

        let mut unbalanced = 0u32;
        for day_counts in per_section.values() {
            let total: u32 = day_counts.values().sum();
            let ideal = total.div_ceil(days);
            unbalanced += day_counts.values().filter(|&&c| c > ideal + 1).count() as u32;
        }
        add(counts, ViolationKind::UnbalancedDailyDistribution, unbalanced);
    }
}

/// A continuity-block anchor with missing contiguous neighbors.
#[derive(Debug)]
pub(crate) struct ContinuityBreak<'a> {
    /// The block's first gene (no same-group gene in the previous slot).
    pub gene: &'a Gene,
    /// Neighbors missing from slot+1 .. slot+k−1.
    pub missing: u32,
}

/// Finds broken lab continuity blocks.
///
/// A lab gene declaring `consecutive_slots = k > 1` anchors its block
/// when no gene with the same (course, section, faculty, room, day)
/// occupies the previous slot. Each anchor must be followed by k−1
/// same-group genes in the next slots; every absent one is a break.
pub(crate) fn continuity_breaks(genes: &[Gene]) -> Vec<ContinuityBreak<'_>> {
    let occupied: HashSet<(&str, &str, &str, &str, Weekday, u8)> = genes
        .iter()
        .filter(|g| g.session_type == SessionType::Lab)
        .map(|g| {
            (
                g.course_code.as_str(),
                g.section.as_str(),
                g.faculty_id.as_str(),
                g.room_id.as_str(),
                g.day,
                g.slot_number,
            )
        })
        .collect();

    let mut breaks = Vec::new();
    for gene in genes {
        if gene.session_type != SessionType::Lab || gene.consecutive_slots <= 1 {
            continue;
        }
        let group = (
            gene.course_code.as_str(),
            gene.section.as_str(),
            gene.faculty_id.as_str(),
            gene.room_id.as_str(),
            gene.day,
        );
        let is_anchor = gene.slot_number == 0
            || !occupied.contains(&(
                group.0,
                group.1,
                group.2,
                group.3,
                group.4,
                gene.slot_number - 1,
            ));
        if !is_anchor {
            continue;
        }

        let missing = (1..gene.consecutive_slots)
            .filter(|&offset| {
                gene.slot_number
                    .checked_add(offset)
                    .map(|next| {
                        !occupied.contains(&(
                            group.0, group.1, group.2, group.3, group.4, next,
                        ))
                    })
                    .unwrap_or(true)
            })
            .count() as u32;
        if missing > 0 {
            breaks.push(ContinuityBreak { gene, missing });
        }
    }
    breaks
}

/// Total assigned hours per faculty id.
fn assigned_hours(genes: &[Gene]) -> HashMap<&str, u32> {
    let mut hours: HashMap<&str, u32> = HashMap::new();
    for gene in genes {
        *hours.entry(gene.faculty_id.as_str()).or_insert(0) += gene.duration_hours as u32;
    }
    hours
}

/// Sum of idle slots between consecutive occupied slots of one day.
///
/// Slots are deduplicated first: double bookings are scored separately
/// and must not produce negative gap terms.
fn gap_sum(slots: &mut Vec<u8>) -> u32 {
    slots.sort_unstable();
    slots.dedup();
    slots
        .windows(2)
        .map(|w| (w[1] - w[0]).saturating_sub(1) as u32)
        .sum()
}

/// Count of entries beyond the first on each key.
fn duplicates<'a>(key_counts: impl Iterator<Item = &'a u32>) -> u32 {
    key_counts.map(|&c| c.saturating_sub(1)).sum()
}

fn add(counts: &mut BTreeMap<ViolationKind, u32>, kind: ViolationKind, count: u32) {
    if count > 0 {
        *counts.entry(kind).or_insert(0) += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Course, Faculty, Room, Section, TheorySpec, TimeSlot,
    };

    fn base_snapshot() -> Snapshot {
        let courses = vec![Course::theory("CS101", TheorySpec::new(2, 1))
            .with_department("CSE")
            .with_semester(1)
            .with_section(Section::new("A", 30))];
        let faculty = vec![Faculty::new("F1")
            .qualified_for("CS101")
            .available_weekdays("09:00", "17:00")];
        let rooms = vec![Room::classroom("R1", 40)];
        let slots = (1..=5)
            .map(|n| {
                let start = format!("{:02}:00", 8 + n);
                let end = format!("{:02}:00", 9 + n);
                TimeSlot::new(Weekday::Monday, n, start, end)
            })
            .collect();
        Snapshot::new(courses, faculty, rooms, slots, Vec::new())
    }

    fn gene(slot: u8) -> Gene {
        Gene {
            course_code: "CS101".into(),
            section: "A".into(),
            session_type: SessionType::Theory,
            day: Weekday::Monday,
            slot_number: slot,
            faculty_id: "F1".into(),
            room_id: "R1".into(),
            duration_hours: 1,
            consecutive_slots: 1,
        }
    }

    fn lab_gene(slot: u8, span: u8) -> Gene {
        Gene {
            course_code: "CS101".into(),
            section: "A".into(),
            session_type: SessionType::Lab,
            day: Weekday::Monday,
            slot_number: slot,
            faculty_id: "F1".into(),
            room_id: "R1".into(),
            duration_hours: 1,
            consecutive_slots: span,
        }
    }

    #[test]
    fn test_clean_schedule_scores_baseline() {
        let snapshot = base_snapshot();
        let chromosome = Chromosome::new(vec![gene(1), gene(2)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);

        assert_eq!(report.fitness, 1000.0);
        assert_eq!(report.hard_violations, 0);
        assert_eq!(report.soft_violations, 0);
        assert!(report.breakdown.is_empty());
    }

    #[test]
    fn test_double_booking_counts_once_per_extra() {
        let snapshot = base_snapshot();
        // Three genes in the same slot: two extras per key
        let chromosome = Chromosome::new(vec![gene(1), gene(1), gene(1)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);

        assert_eq!(report.breakdown[&ViolationKind::FacultyDoubleBooking], 2);
        assert_eq!(report.breakdown[&ViolationKind::RoomDoubleBooking], 2);
        assert_eq!(report.breakdown[&ViolationKind::SectionDoubleBooking], 2);
        assert_eq!(report.fitness, 0.0);
    }

    #[test]
    fn test_availability_violation() {
        let mut snapshot = base_snapshot();
        // F1 only available Monday morning
        snapshot = Snapshot::new(
            snapshot.courses().to_vec(),
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .available(Weekday::Monday, "09:00", "11:00")],
            snapshot.rooms().to_vec(),
            snapshot.time_slots().to_vec(),
            Vec::new(),
        );

        // Slot 5 runs 13:00-14:00, outside the window
        let chromosome = Chromosome::new(vec![gene(1), gene(5)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::FacultyUnavailable], 1);
    }

    #[test]
    fn test_continuity_intact_block() {
        let genes = vec![lab_gene(2, 3), lab_gene(3, 3), lab_gene(4, 3)];
        assert!(continuity_breaks(&genes).is_empty());
    }

    #[test]
    fn test_continuity_missing_tail() {
        // Block of 3 with only the first two slots covered
        let genes = vec![lab_gene(2, 3), lab_gene(3, 3)];
        let breaks = continuity_breaks(&genes);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].missing, 1);
        assert_eq!(breaks[0].gene.slot_number, 2);
    }

    #[test]
    fn test_continuity_scattered_genes() {
        // Two isolated genes of a 2-slot block: each anchors and each
        // misses its successor
        let genes = vec![lab_gene(1, 2), lab_gene(4, 2)];
        let breaks = continuity_breaks(&genes);
        assert_eq!(breaks.len(), 2);
        assert!(breaks.iter().all(|b| b.missing == 1));
    }

    #[test]
    fn test_continuity_requires_same_room() {
        let mut second = lab_gene(3, 2);
        second.room_id = "R2".into();
        let genes = vec![lab_gene(2, 2), second];
        // Different rooms split the group: both anchor, both broken
        assert_eq!(continuity_breaks(&genes).len(), 2);
    }

    #[test]
    fn test_capacity_violation_per_session() {
        let snapshot = Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 60))],
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .available_weekdays("09:00", "17:00")],
            vec![Room::classroom("R1", 30)],
            base_snapshot().time_slots().to_vec(),
            Vec::new(),
        );

        let chromosome = Chromosome::new(vec![gene(1), gene(2)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::RoomCapacityExceeded], 2);
    }

    #[test]
    fn test_workload_bounds() {
        let snapshot = Snapshot::new(
            base_snapshot().courses().to_vec(),
            vec![
                Faculty::new("F1")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00")
                    .with_workload(0, 1),
                Faculty::new("F2")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00")
                    .with_workload(5, 20),
            ],
            base_snapshot().rooms().to_vec(),
            base_snapshot().time_slots().to_vec(),
            Vec::new(),
        );

        // F1 teaches 2h (max 1), F2 teaches nothing (min 5)
        let chromosome = Chromosome::new(vec![gene(1), gene(2)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::WorkloadOverMax], 1);
        assert_eq!(report.breakdown[&ViolationKind::WorkloadUnderMin], 1);
    }

    #[test]
    fn test_gap_sums() {
        let snapshot = base_snapshot();
        // Slots 1 and 4: gap of 2 for both the section and the faculty
        let chromosome = Chromosome::new(vec![gene(1), gene(4)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::StudentGap], 2);
        assert_eq!(report.breakdown[&ViolationKind::FacultyGap], 2);
    }

    #[test]
    fn test_consecutive_run_excess() {
        let snapshot = base_snapshot();
        // Five back-to-back slots: slots 4 and 5 exceed the cap of 3
        let chromosome =
            Chromosome::new(vec![gene(1), gene(2), gene(3), gene(4), gene(5)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(
            report.breakdown[&ViolationKind::ExcessiveConsecutiveHours],
            2
        );
    }

    #[test]
    fn test_preference_mismatch() {
        let snapshot = Snapshot::new(
            base_snapshot().courses().to_vec(),
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .available_weekdays("09:00", "17:00")
                .avoiding(Weekday::Monday, 1)],
            base_snapshot().rooms().to_vec(),
            base_snapshot().time_slots().to_vec(),
            Vec::new(),
        );

        let chromosome = Chromosome::new(vec![gene(1), gene(2)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::PreferenceMismatch], 1);
    }

    #[test]
    fn test_imbalance_floor_of_std_dev() {
        let snapshot = Snapshot::new(
            base_snapshot().courses().to_vec(),
            vec![
                Faculty::new("F1")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00"),
                Faculty::new("F2")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00"),
            ],
            base_snapshot().rooms().to_vec(),
            base_snapshot().time_slots().to_vec(),
            Vec::new(),
        );

        // F1 teaches 2h, F2 teaches 0h → loads (2, 0), std-dev 1.0
        let chromosome = Chromosome::new(vec![gene(1), gene(2)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::WorkloadImbalance], 1);
    }

    #[test]
    fn test_missing_reference_does_not_abort() {
        let snapshot = base_snapshot();
        let mut ghost = gene(1);
        ghost.faculty_id = "NOBODY".into();
        ghost.room_id = "NOWHERE".into();
        let chromosome = Chromosome::new(vec![ghost, gene(2)]);

        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::MissingReference], 2);
        // The healthy gene still scores normally: no other hard kinds
        assert_eq!(report.hard_violations, 2);
    }

    #[test]
    fn test_missing_sessions_counted() {
        let snapshot = base_snapshot();
        // CS101 needs two sessions; only one gene present
        let chromosome = Chromosome::new(vec![gene(1)]);
        let report = FitnessEvaluator::default().evaluate(&snapshot, &chromosome);
        assert_eq!(report.breakdown[&ViolationKind::MissingSession], 1);
    }

    #[test]
    fn test_fitness_round_trips_breakdown() {
        let snapshot = base_snapshot();
        let chromosome = Chromosome::new(vec![gene(1), gene(1), gene(4)]);
        let evaluator = FitnessEvaluator::default();
        let report = evaluator.evaluate(&snapshot, &chromosome);

        let recomputed: f64 = report
            .breakdown
            .iter()
            .map(|(&kind, &count)| count as f64 * evaluator.weights().weight_for(kind))
            .sum();
        assert_eq!(report.fitness, (1000.0 - recomputed).max(0.0));
    }

    #[test]
    fn test_custom_weights() {
        let snapshot = base_snapshot();
        let weights = PenaltyWeights {
            student_gap: 10.0,
            faculty_gap: 0.0,
            ..PenaltyWeights::default()
        };
        // Slots 1 and 3: one gap slot
        let chromosome = Chromosome::new(vec![gene(1), gene(3)]);
        let report = FitnessEvaluator::new(weights).evaluate(&snapshot, &chromosome);
        assert_eq!(report.fitness, 990.0);
    }
}
