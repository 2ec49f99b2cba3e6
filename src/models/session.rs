//! Session requirements.
//!
//! A session requirement is the smallest schedulable unit: one gene of
//! the chromosome covers exactly one requirement. Requirements are
//! derived from the catalog, never stored.
//!
//! # Derivation
//!
//! For each (course, section):
//! - theory: ⌈hours/duration⌉ requirements of `session_duration` hours.
//! - lab, no continuity: ⌈hours/duration⌉ requirements of
//!   `session_duration` hours.
//! - lab with continuity: each block decomposes into `session_duration`
//!   single-hour requirements sharing `consecutive_slots =
//!   session_duration`, so a feasible chromosome covers the block with
//!   a contiguous run of slots on one day.

use serde::{Deserialize, Serialize};

use super::Course;

/// Session classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Lecture session.
    Theory,
    /// Practical session.
    Lab,
}

/// One schedulable session of a (course, section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequirement {
    /// Course code.
    pub course_code: String,
    /// Section name.
    pub section: String,
    /// Theory or lab.
    pub session_type: SessionType,
    /// Teaching hours this session occupies.
    pub duration_hours: u8,
    /// Contiguous slots the enclosing block must span (1 when the
    /// session stands alone).
    pub consecutive_slots: u8,
}

impl SessionRequirement {
    /// Derives the requirement multiset for every section of a course.
    pub fn from_course(course: &Course) -> Vec<Self> {
        let mut requirements = Vec::new();

        for section in &course.sections {
            if let Some(theory) = &course.theory {
                let count = sessions_needed(theory.hours_per_week, theory.session_duration);
                for _ in 0..count {
                    requirements.push(Self {
                        course_code: course.code.clone(),
                        section: section.name.clone(),
                        session_type: SessionType::Theory,
                        duration_hours: theory.session_duration,
                        consecutive_slots: 1,
                    });
                }
            }

            if let Some(lab) = &course.lab {
                let blocks = sessions_needed(lab.hours_per_week, lab.session_duration);
                if lab.requires_continuity && lab.session_duration > 1 {
                    // Continuity blocks split into per-slot sessions so the
                    // evaluator can score each missing neighbor.
                    for _ in 0..blocks {
                        for _ in 0..lab.session_duration {
                            requirements.push(Self {
                                course_code: course.code.clone(),
                                section: section.name.clone(),
                                session_type: SessionType::Lab,
                                duration_hours: 1,
                                consecutive_slots: lab.session_duration,
                            });
                        }
                    }
                } else {
                    for _ in 0..blocks {
                        requirements.push(Self {
                            course_code: course.code.clone(),
                            section: section.name.clone(),
                            session_type: SessionType::Lab,
                            duration_hours: lab.session_duration,
                            consecutive_slots: 1,
                        });
                    }
                }
            }
        }

        requirements
    }

    /// Derives requirements for an entire catalog, in catalog order.
    ///
    /// The order is canonical: construction emits genes in this order,
    /// which keeps gene positions aligned across chromosomes built from
    /// the same snapshot.
    pub fn from_catalog(courses: &[Course]) -> Vec<Self> {
        courses.iter().flat_map(Self::from_course).collect()
    }
}

/// Number of sessions needed to cover `hours` at `duration` each.
#[inline]
fn sessions_needed(hours: u8, duration: u8) -> u8 {
    let duration = duration.max(1);
    hours.div_ceil(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabSpec, Section, TheorySpec};

    #[test]
    fn test_theory_requirements() {
        // 3h/week at 1h per session → 3 sessions
        let course = Course::theory("CS101", TheorySpec::new(3, 1))
            .with_section(Section::new("A", 60));
        let reqs = SessionRequirement::from_course(&course);

        assert_eq!(reqs.len(), 3);
        assert!(reqs.iter().all(|r| r.session_type == SessionType::Theory));
        assert!(reqs.iter().all(|r| r.duration_hours == 1));
        assert!(reqs.iter().all(|r| r.consecutive_slots == 1));
    }

    #[test]
    fn test_theory_ceiling() {
        // 3h/week at 2h per session → ⌈3/2⌉ = 2 sessions
        let course = Course::theory("CS102", TheorySpec::new(3, 2))
            .with_section(Section::new("A", 60));
        let reqs = SessionRequirement::from_course(&course);
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].duration_hours, 2);
    }

    #[test]
    fn test_continuous_lab_decomposes_per_slot() {
        // One 3h continuous block → three single-hour sessions, each
        // declaring the 3-slot span.
        let course = Course::lab("CS201", LabSpec::continuous(3, 3))
            .with_section(Section::new("A", 30));
        let reqs = SessionRequirement::from_course(&course);

        assert_eq!(reqs.len(), 3);
        assert!(reqs.iter().all(|r| r.session_type == SessionType::Lab));
        assert!(reqs.iter().all(|r| r.duration_hours == 1));
        assert!(reqs.iter().all(|r| r.consecutive_slots == 3));
    }

    #[test]
    fn test_plain_lab_keeps_block_duration() {
        let course = Course::lab("CS202", LabSpec::new(4, 2))
            .with_section(Section::new("A", 30));
        let reqs = SessionRequirement::from_course(&course);

        assert_eq!(reqs.len(), 2);
        assert!(reqs.iter().all(|r| r.duration_hours == 2));
        assert!(reqs.iter().all(|r| r.consecutive_slots == 1));
    }

    #[test]
    fn test_theory_lab_per_section() {
        let course = Course::theory_lab(
            "CS301",
            TheorySpec::new(2, 1),
            LabSpec::continuous(2, 2),
        )
        .with_section(Section::new("A", 60))
        .with_section(Section::new("B", 55));
        let reqs = SessionRequirement::from_course(&course);

        // Per section: 2 theory + 2 lab slots → 4; two sections → 8
        assert_eq!(reqs.len(), 8);
        let a_lab = reqs
            .iter()
            .filter(|r| r.section == "A" && r.session_type == SessionType::Lab)
            .count();
        assert_eq!(a_lab, 2);
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let courses = vec![
            Course::theory("CS101", TheorySpec::new(1, 1)).with_section(Section::new("A", 60)),
            Course::theory("CS102", TheorySpec::new(1, 1)).with_section(Section::new("A", 60)),
        ];
        let reqs = SessionRequirement::from_catalog(&courses);
        assert_eq!(reqs[0].course_code, "CS101");
        assert_eq!(reqs[1].course_code, "CS102");
    }
}
