//! Post-hoc schedule auditing.
//!
//! The validator checks a completed schedule against a configurable
//! constraint catalog and returns structured violation reports for UI
//! display. Each active rule dispatches to a category-specific checker;
//! results aggregate into hard and soft buckets preserving the rule's
//! name, category, and description.
//!
//! [`detect_conflicts`] is the fast pass used during schedule
//! persistence: it scans only the three duplicate-key clashes and emits
//! typed conflict records. Its output is a strict subset of the
//! validator's hard violations on the same input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::fitness::continuity_breaks;
use crate::ga::{Chromosome, Gene};
use crate::models::{
    ConstraintCategory, ConstraintKind, ConstraintRule, SectionKey, Snapshot, Weekday,
};

/// Largest acceptable idle gap between a section's same-day classes.
const MAX_SECTION_GAP: u8 = 2;

/// One detail record of a violation, for UI display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationDetail {
    /// Human-readable description of the occurrence.
    pub message: String,
    /// Entities involved (faculty ids, room ids, course codes, ...).
    pub entities: Vec<String>,
    /// Day of the occurrence, when slot-specific.
    pub day: Option<Weekday>,
    /// Slot of the occurrence, when slot-specific.
    pub slot_number: Option<u8>,
}

impl ViolationDetail {
    fn new(message: impl Into<String>, entities: Vec<String>) -> Self {
        Self {
            message: message.into(),
            entities,
            day: None,
            slot_number: None,
        }
    }

    fn at(mut self, day: Weekday, slot_number: u8) -> Self {
        self.day = Some(day);
        self.slot_number = Some(slot_number);
        self
    }
}

/// A violated constraint with its occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Name of the violated rule.
    pub constraint: String,
    /// Rule category.
    pub category: ConstraintCategory,
    /// Rule description.
    pub description: String,
    /// Number of occurrences.
    pub count: u32,
    /// Per-occurrence details.
    pub details: Vec<ViolationDetail>,
}

/// Aggregate counts of a validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total hard-violation occurrences.
    pub total_hard: u32,
    /// Total soft-violation occurrences.
    pub total_soft: u32,
    /// Occurrences by category.
    pub by_category: BTreeMap<ConstraintCategory, u32>,
}

/// The validator's full audit result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Violated hard rules.
    pub hard: Vec<ConstraintViolation>,
    /// Violated soft rules.
    pub soft: Vec<ConstraintViolation>,
    /// Aggregate counts.
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Whether no rule was violated.
    pub fn is_clean(&self) -> bool {
        self.hard.is_empty() && self.soft.is_empty()
    }
}

/// A checker's raw result before aggregation.
#[derive(Debug, Default)]
struct CheckOutcome {
    count: u32,
    details: Vec<ViolationDetail>,
}

impl CheckOutcome {
    fn clean() -> Self {
        Self::default()
    }

    fn record(&mut self, occurrences: u32, detail: ViolationDetail) {
        self.count += occurrences;
        self.details.push(detail);
    }
}

/// Audits a schedule against a constraint catalog.
pub fn validate(
    snapshot: &Snapshot,
    chromosome: &Chromosome,
    catalog: &[ConstraintRule],
) -> ValidationReport {
    let genes = chromosome.genes();
    let mut hard = Vec::new();
    let mut soft = Vec::new();
    let mut by_category: BTreeMap<ConstraintCategory, u32> = BTreeMap::new();
    let mut total_hard = 0u32;
    let mut total_soft = 0u32;

    for rule in catalog.iter().filter(|r| r.active) {
        let outcome = match rule.category {
            ConstraintCategory::FacultyWorkload => {
                check_faculty_workload(snapshot, genes, &rule.name)
            }
            ConstraintCategory::RoomAllocation => {
                check_room_allocation(snapshot, genes, &rule.name)
            }
            ConstraintCategory::StudentSection => {
                check_student_section(snapshot, genes, &rule.name)
            }
            ConstraintCategory::LabContinuity => check_lab_continuity(genes),
            ConstraintCategory::ElectiveGrouping => check_elective_grouping(snapshot, genes),
            // Reserved extension points
            ConstraintCategory::TimeSlot
            | ConstraintCategory::Preference
            | ConstraintCategory::InstitutionalPolicy => CheckOutcome::clean(),
        };

        if outcome.count == 0 {
            continue;
        }

        *by_category.entry(rule.category).or_insert(0) += outcome.count;
        let violation = ConstraintViolation {
            constraint: rule.name.clone(),
            category: rule.category,
            description: rule.description.clone(),
            count: outcome.count,
            details: outcome.details,
        };
        match rule.kind {
            ConstraintKind::Hard => {
                total_hard += violation.count;
                hard.push(violation);
            }
            ConstraintKind::Soft => {
                total_soft += violation.count;
                soft.push(violation);
            }
        }
    }

    ValidationReport {
        hard,
        soft,
        summary: ValidationSummary {
            total_hard,
            total_soft,
            by_category,
        },
    }
}

fn check_faculty_workload(snapshot: &Snapshot, genes: &[Gene], rule_name: &str) -> CheckOutcome {
    let mut outcome = CheckOutcome::clean();

    if rule_name.contains("Double Booking") || rule_name.contains("Conflict") {
        for ((faculty_id, day, slot), involved) in
            duplicate_keys(genes, |g| g.faculty_id.clone())
        {
            let courses = course_list(&involved);
            outcome.record(
                involved.len() as u32 - 1,
                ViolationDetail::new(
                    format!("Faculty {faculty_id} holds {} sessions in one slot", involved.len()),
                    std::iter::once(faculty_id).chain(courses).collect(),
                )
                .at(day, slot),
            );
        }
        return outcome;
    }

    let mut hours: HashMap<&str, u32> = HashMap::new();
    for gene in genes {
        *hours.entry(gene.faculty_id.as_str()).or_insert(0) += gene.duration_hours as u32;
    }

    for faculty in snapshot.faculty().iter().filter(|f| f.active) {
        let total = hours.get(faculty.id.as_str()).copied().unwrap_or(0);
        if rule_name.contains("Max") && total > faculty.max_hours_per_week as u32 {
            outcome.record(
                1,
                ViolationDetail::new(
                    format!(
                        "Faculty {} assigned {total}h, above the maximum of {}h",
                        faculty.id, faculty.max_hours_per_week
                    ),
                    vec![faculty.id.clone()],
                ),
            );
        } else if rule_name.contains("Min") && total < faculty.min_hours_per_week as u32 {
            outcome.record(
                1,
                ViolationDetail::new(
                    format!(
                        "Faculty {} assigned {total}h, below the minimum of {}h",
                        faculty.id, faculty.min_hours_per_week
                    ),
                    vec![faculty.id.clone()],
                ),
            );
        }
    }
    outcome
}

fn check_room_allocation(snapshot: &Snapshot, genes: &[Gene], rule_name: &str) -> CheckOutcome {
    let mut outcome = CheckOutcome::clean();

    if rule_name.contains("Double Booking") {
        for ((room_id, day, slot), involved) in duplicate_keys(genes, |g| g.room_id.clone()) {
            let courses = course_list(&involved);
            outcome.record(
                involved.len() as u32 - 1,
                ViolationDetail::new(
                    format!("Room {room_id} hosts {} sessions in one slot", involved.len()),
                    std::iter::once(room_id).chain(courses).collect(),
                )
                .at(day, slot),
            );
        }
    } else if rule_name.contains("Capacity") {
        for gene in genes {
            let (Some(section), Some(room)) = (
                snapshot.section(&gene.course_code, &gene.section),
                snapshot.room(&gene.room_id),
            ) else {
                continue;
            };
            if room.capacity < section.strength {
                outcome.record(
                    1,
                    ViolationDetail::new(
                        format!(
                            "Room {} seats {}, section {} {} has {} students",
                            room.id, room.capacity, gene.course_code, gene.section, section.strength
                        ),
                        vec![room.id.clone(), gene.course_code.clone()],
                    )
                    .at(gene.day, gene.slot_number),
                );
            }
        }
    }
    outcome
}

fn check_student_section(snapshot: &Snapshot, genes: &[Gene], rule_name: &str) -> CheckOutcome {
    let mut outcome = CheckOutcome::clean();

    if rule_name.contains("Conflict") {
        let mut keyed: HashMap<(SectionKey, Weekday, u8), Vec<&Gene>> = HashMap::new();
        for gene in genes {
            if let Some(key) = snapshot.section_key(&gene.course_code, &gene.section) {
                keyed.entry((key, gene.day, gene.slot_number)).or_default().push(gene);
            }
        }
        for ((key, day, slot), involved) in keyed {
            if involved.len() < 2 {
                continue;
            }
            let courses = course_list(&involved);
            outcome.record(
                involved.len() as u32 - 1,
                ViolationDetail::new(
                    format!(
                        "Section {} (sem {}, {}) attends {} sessions in one slot",
                        key.name,
                        key.semester,
                        key.department,
                        involved.len()
                    ),
                    courses,
                )
                .at(day, slot),
            );
        }
    } else if rule_name.contains("Gap") {
        let mut by_day: HashMap<(SectionKey, Weekday), Vec<u8>> = HashMap::new();
        for gene in genes {
            if let Some(key) = snapshot.section_key(&gene.course_code, &gene.section) {
                by_day.entry((key, gene.day)).or_default().push(gene.slot_number);
            }
        }
        for ((key, day), mut slots) in by_day {
            slots.sort_unstable();
            slots.dedup();
            for window in slots.windows(2) {
                let gap = window[1] - window[0] - 1;
                if gap > MAX_SECTION_GAP {
                    outcome.record(
                        1,
                        ViolationDetail::new(
                            format!(
                                "Section {} idles {gap} slots between classes",
                                key.name
                            ),
                            vec![key.name.clone()],
                        )
                        .at(day, window[0]),
                    );
                }
            }
        }
    }
    outcome
}

fn check_lab_continuity(genes: &[Gene]) -> CheckOutcome {
    let mut outcome = CheckOutcome::clean();
    for broken in continuity_breaks(genes) {
        outcome.record(
            broken.missing,
            ViolationDetail::new(
                format!(
                    "Lab {} section {} is missing {} of {} contiguous slots",
                    broken.gene.course_code,
                    broken.gene.section,
                    broken.missing,
                    broken.gene.consecutive_slots
                ),
                vec![broken.gene.course_code.clone(), broken.gene.room_id.clone()],
            )
            .at(broken.gene.day, broken.gene.slot_number),
        );
    }
    outcome
}

fn check_elective_grouping(snapshot: &Snapshot, genes: &[Gene]) -> CheckOutcome {
    let mut buckets: HashMap<(&str, Weekday, u8), Vec<&Gene>> = HashMap::new();
    for gene in genes {
        let Some(group) = snapshot
            .course(&gene.course_code)
            .and_then(|c| c.elective_group.as_deref())
        else {
            continue;
        };
        buckets.entry((group, gene.day, gene.slot_number)).or_default().push(gene);
    }

    let mut outcome = CheckOutcome::clean();
    for ((group, day, slot), involved) in buckets {
        if involved.len() < 2 {
            continue;
        }
        let courses = course_list(&involved);
        outcome.record(
            1,
            ViolationDetail::new(
                format!(
                    "Elective group {group} has {} overlapping courses",
                    courses.len()
                ),
                courses,
            )
            .at(day, slot),
        );
    }
    outcome
}

/// Groups genes by (entity, day, slot) and keeps keys hit twice or more.
fn duplicate_keys(
    genes: &[Gene],
    entity: impl Fn(&Gene) -> String,
) -> Vec<((String, Weekday, u8), Vec<&Gene>)> {
    let mut keyed: HashMap<(String, Weekday, u8), Vec<&Gene>> = HashMap::new();
    for gene in genes {
        keyed
            .entry((entity(gene), gene.day, gene.slot_number))
            .or_default()
            .push(gene);
    }
    keyed.into_iter().filter(|(_, v)| v.len() >= 2).collect()
}

/// Deduplicated course codes of the involved genes.
fn course_list(genes: &[&Gene]) -> Vec<String> {
    let mut codes: Vec<String> = genes.iter().map(|g| g.course_code.clone()).collect();
    codes.sort();
    codes.dedup();
    codes
}

// ======================== Conflict fast pass ========================

/// Classification of a duplicate-key clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Same faculty, same slot.
    FacultyDoubleBooking,
    /// Same room, same slot.
    RoomDoubleBooking,
    /// Same section of one course, same slot.
    SectionDoubleBooking,
}

impl ConflictKind {
    /// The validator category this conflict falls under.
    pub fn category(self) -> ConstraintCategory {
        match self {
            ConflictKind::FacultyDoubleBooking => ConstraintCategory::FacultyWorkload,
            ConflictKind::RoomDoubleBooking => ConstraintCategory::RoomAllocation,
            ConflictKind::SectionDoubleBooking => ConstraintCategory::StudentSection,
        }
    }
}

/// A typed clash found by the fast pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// Clash classification.
    pub kind: ConflictKind,
    /// Severity, 0-100 (all duplicate-key clashes rank high).
    pub severity: u8,
    /// The double-booked entity (faculty id, room id, or section label).
    pub entity: String,
    /// Day of the clash.
    pub day: Weekday,
    /// Slot of the clash.
    pub slot_number: u8,
    /// Courses involved.
    pub courses: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

/// Scans a chromosome for the three hard duplicate-key clashes.
///
/// Runs without the snapshot, so section identity falls back to
/// (course, section): clashes it reports are always real, and every one
/// maps to a validator violation of the same category.
pub fn detect_conflicts(chromosome: &Chromosome) -> Vec<ScheduleConflict> {
    let genes = chromosome.genes();
    let mut conflicts = Vec::new();

    for ((faculty_id, day, slot), involved) in duplicate_keys(genes, |g| g.faculty_id.clone()) {
        let courses = course_list(&involved);
        conflicts.push(ScheduleConflict {
            kind: ConflictKind::FacultyDoubleBooking,
            severity: 95,
            message: format!("Faculty {faculty_id} is double-booked"),
            entity: faculty_id,
            day,
            slot_number: slot,
            courses,
        });
    }

    for ((room_id, day, slot), involved) in duplicate_keys(genes, |g| g.room_id.clone()) {
        let courses = course_list(&involved);
        conflicts.push(ScheduleConflict {
            kind: ConflictKind::RoomDoubleBooking,
            severity: 90,
            message: format!("Room {room_id} is double-booked"),
            entity: room_id,
            day,
            slot_number: slot,
            courses,
        });
    }

    for ((label, day, slot), involved) in
        duplicate_keys(genes, |g| format!("{}/{}", g.course_code, g.section))
    {
        let courses = course_list(&involved);
        conflicts.push(ScheduleConflict {
            kind: ConflictKind::SectionDoubleBooking,
            severity: 95,
            message: format!("Section {label} is double-booked"),
            entity: label,
            day,
            slot_number: slot,
            courses,
        });
    }

    conflicts
}
