//! Random chromosome construction.
//!
//! Builds one type-correct chromosome by uniformly sampling a slot, a
//! qualified faculty member, and a suitable room for every session
//! requirement. Construction never repairs: it deliberately produces
//! initial infeasibility (clashes, broken continuity) and relies on the
//! evolutionary driver to improve.
//!
//! A requirement whose candidate sets are empty emits no gene; the
//! evaluator counts each missing gene as a hard violation. Callers that
//! want to catch this before a run use [`preflight`].

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::feasibility::faculty_qualified;
use crate::ga::{Chromosome, Gene};
use crate::models::{
    Course, Faculty, Section, SessionRequirement, SessionType, Snapshot,
};

/// A session requirement with an empty candidate set.
#[derive(Debug, Clone, Serialize)]
pub struct InfeasibleRequirement {
    /// Course code.
    pub course_code: String,
    /// Section name.
    pub section: String,
    /// Theory or lab.
    pub session_type: SessionType,
    /// No active, qualified faculty found.
    pub no_qualified_faculty: bool,
    /// No active, suitable room found.
    pub no_suitable_room: bool,
}

/// Structural infeasibility found before a run.
///
/// A run against such a snapshot still works — the missing genes
/// surface as hard violations in the result — but the caller may prefer
/// to abort and fix the inputs.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{} session requirement(s) have empty candidate sets", .requirements.len())]
pub struct InfeasibilityReport {
    /// Requirements with no candidates, one entry per
    /// (course, section, session type).
    pub requirements: Vec<InfeasibleRequirement>,
    /// The slot grid has no active slots at all.
    pub no_active_slots: bool,
}

/// Scans every session requirement for empty candidate sets.
pub fn preflight(snapshot: &Snapshot) -> Result<(), InfeasibilityReport> {
    let no_active_slots = snapshot.active_slots().is_empty();
    let mut requirements: Vec<InfeasibleRequirement> = Vec::new();

    for course in snapshot.courses() {
        for requirement in SessionRequirement::from_course(course) {
            let Some(section) = course.section(&requirement.section) else {
                continue;
            };
            // One entry per (course, section, session type)
            if requirements.iter().any(|r| {
                r.course_code == requirement.course_code
                    && r.section == requirement.section
                    && r.session_type == requirement.session_type
            }) {
                continue;
            }

            let no_faculty =
                pick_faculty_pool(snapshot, course, section, requirement.session_type).is_empty();
            let no_room = snapshot
                .suitable_rooms(course, requirement.session_type)
                .is_empty();
            if no_faculty || no_room {
                requirements.push(InfeasibleRequirement {
                    course_code: requirement.course_code.clone(),
                    section: requirement.section.clone(),
                    session_type: requirement.session_type,
                    no_qualified_faculty: no_faculty,
                    no_suitable_room: no_room,
                });
            }
        }
    }

    if requirements.is_empty() && !no_active_slots {
        Ok(())
    } else {
        Err(InfeasibilityReport {
            requirements,
            no_active_slots,
        })
    }
}

/// Builds one randomized chromosome from the snapshot.
///
/// Genes are emitted in canonical requirement order (catalog order),
/// which keeps positions aligned across every chromosome built from the
/// same snapshot.
pub fn build_chromosome<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> Chromosome {
    let slots = snapshot.active_slots();
    let mut genes = Vec::new();

    for course in snapshot.courses() {
        for requirement in SessionRequirement::from_course(course) {
            let Some(section) = course.section(&requirement.section) else {
                continue;
            };

            let Some(&slot) = slots.choose(rng) else {
                warn!(course = %course.code, "no active time slots; requirement skipped");
                continue;
            };

            let faculty_pool = pick_faculty_pool(snapshot, course, section, requirement.session_type);
            let Some(&faculty) = faculty_pool.choose(rng) else {
                warn!(
                    course = %course.code,
                    section = %section.name,
                    "no qualified faculty; requirement skipped"
                );
                continue;
            };

            let room_pool = snapshot.suitable_rooms(course, requirement.session_type);
            let Some(&room) = room_pool.choose(rng) else {
                warn!(
                    course = %course.code,
                    section = %section.name,
                    "no suitable room; requirement skipped"
                );
                continue;
            };

            genes.push(Gene {
                course_code: requirement.course_code,
                section: requirement.section,
                session_type: requirement.session_type,
                day: slot.day,
                slot_number: slot.slot_number,
                faculty_id: faculty.id.clone(),
                room_id: room.id.clone(),
                duration_hours: requirement.duration_hours,
                consecutive_slots: requirement.consecutive_slots,
            });
        }
    }

    Chromosome::new(genes)
}

/// Faculty candidates for one requirement.
///
/// A valid pre-assignment (active and qualified) pins the choice to a
/// single member; otherwise every qualified active member is a
/// candidate.
fn pick_faculty_pool<'a>(
    snapshot: &'a Snapshot,
    course: &Course,
    section: &Section,
    session_type: SessionType,
) -> Vec<&'a Faculty> {
    let preassigned = match session_type {
        SessionType::Theory => section.theory_faculty.as_deref(),
        SessionType::Lab => section.lab_faculty.as_deref(),
    };
    if let Some(faculty) = preassigned.and_then(|id| snapshot.faculty_member(id)) {
        if faculty_qualified(faculty, course) {
            return vec![faculty];
        }
    }
    snapshot.qualified_faculty(course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, Section, TheorySpec, TimeSlot, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn slots() -> Vec<TimeSlot> {
        (1..=5)
            .flat_map(|n| {
                [
                    TimeSlot::new(
                        Weekday::Monday,
                        n,
                        format!("{:02}:00", 8 + n),
                        format!("{:02}:00", 9 + n),
                    ),
                    TimeSlot::new(
                        Weekday::Tuesday,
                        n,
                        format!("{:02}:00", 8 + n),
                        format!("{:02}:00", 9 + n),
                    ),
                ]
            })
            .collect()
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30))],
            vec![
                Faculty::new("F1")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00"),
                Faculty::new("F2")
                    .qualified_for("CS101")
                    .available_weekdays("09:00", "17:00"),
            ],
            vec![Room::classroom("R1", 40)],
            slots(),
            Vec::new(),
        )
    }

    #[test]
    fn test_gene_count_matches_requirements() {
        let snapshot = snapshot();
        let mut rng = SmallRng::seed_from_u64(42);
        let chromosome = build_chromosome(&snapshot, &mut rng);

        let expected = SessionRequirement::from_catalog(snapshot.courses()).len();
        assert_eq!(chromosome.gene_count(), expected);
        assert!(chromosome
            .genes()
            .iter()
            .all(|g| g.consecutive_slots >= 1));
    }

    #[test]
    fn test_genes_are_type_correct() {
        let snapshot = snapshot();
        let mut rng = SmallRng::seed_from_u64(7);
        let chromosome = build_chromosome(&snapshot, &mut rng);

        for gene in chromosome.genes() {
            assert!(snapshot.slot(gene.day, gene.slot_number).is_some());
            assert!(["F1", "F2"].contains(&gene.faculty_id.as_str()));
            assert_eq!(gene.room_id, "R1");
        }
    }

    #[test]
    fn test_preassigned_faculty_pins_choice() {
        let snapshot = Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30).with_theory_faculty("F2"))],
            snapshot().faculty().to_vec(),
            snapshot().rooms().to_vec(),
            slots(),
            Vec::new(),
        );

        let mut rng = SmallRng::seed_from_u64(3);
        let chromosome = build_chromosome(&snapshot, &mut rng);
        assert!(chromosome.genes().iter().all(|g| g.faculty_id == "F2"));
    }

    #[test]
    fn test_inactive_only_faculty_emits_no_genes() {
        let snapshot = Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30))],
            vec![Faculty::new("F1")
                .qualified_for("CS101")
                .with_active(false)],
            vec![Room::classroom("R1", 40)],
            slots(),
            Vec::new(),
        );

        let mut rng = SmallRng::seed_from_u64(5);
        let chromosome = build_chromosome(&snapshot, &mut rng);
        assert_eq!(chromosome.gene_count(), 0);
    }

    #[test]
    fn test_preflight_accepts_feasible_input() {
        assert!(preflight(&snapshot()).is_ok());
    }

    #[test]
    fn test_preflight_reports_missing_candidates() {
        let snapshot = Snapshot::new(
            vec![Course::theory("CS101", TheorySpec::new(2, 1))
                .with_department("CSE")
                .with_semester(1)
                .with_section(Section::new("A", 30))],
            vec![Faculty::new("F1").qualified_for("CS999")],
            // A lab cannot host theory sessions
            vec![Room::lab("L1", 40)],
            slots(),
            Vec::new(),
        );

        let report = preflight(&snapshot).unwrap_err();
        assert_eq!(report.requirements.len(), 1);
        let entry = &report.requirements[0];
        assert!(entry.no_qualified_faculty);
        assert!(entry.no_suitable_room);
        assert!(!report.no_active_slots);
    }

    #[test]
    fn test_preflight_flags_empty_grid() {
        let snapshot = Snapshot::new(
            snapshot().courses().to_vec(),
            snapshot().faculty().to_vec(),
            snapshot().rooms().to_vec(),
            Vec::new(),
            Vec::new(),
        );
        let report = preflight(&snapshot).unwrap_err();
        assert!(report.no_active_slots);
    }
}
