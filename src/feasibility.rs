//! Feasibility predicates.
//!
//! Three pure checks shared by construction, mutation, and evaluation:
//! room suitability, faculty qualification, and faculty availability.
//! Each takes only the entities involved, so the same predicate serves
//! the search loop and post-hoc auditing.

use crate::models::{Course, Faculty, Room, RoomKind, SessionType, Weekday};

/// Whether a room can host a session of `course`.
///
/// Checks the active flag and the session-type rules: labs need a lab
/// room whose subtype matches the course's requirement (unless the
/// course accepts any lab); theory needs a classroom or seminar hall
/// satisfying the course's facility flags.
///
/// Capacity is not checked here: an undersized room stays assignable,
/// and the shortfall is scored as a capacity violation by the evaluator
/// and the validator.
pub fn room_suitable(room: &Room, course: &Course, session_type: SessionType) -> bool {
    if !room.active {
        return false;
    }

    match session_type {
        SessionType::Lab => {
            if room.kind != RoomKind::Lab {
                return false;
            }
            if course.lab_room.accepts_any_lab() {
                return true;
            }
            room.lab_kind == course.lab_room.lab_kind
        }
        SessionType::Theory => {
            if room.kind != RoomKind::Classroom && room.kind != RoomKind::SeminarHall {
                return false;
            }
            if course.theory_room.needs_projector && !room.has_projector {
                return false;
            }
            if course.theory_room.needs_computers && !room.has_computers {
                return false;
            }
            true
        }
    }
}

/// Whether a faculty member is active and qualified to teach a course.
pub fn faculty_qualified(faculty: &Faculty, course: &Course) -> bool {
    faculty.active && faculty.teaches(&course.code)
}

/// Whether a faculty member has an availability window on `day` that
/// fully contains [start, end].
///
/// Times are zero-padded "HH:MM" strings compared lexicographically.
pub fn faculty_available(faculty: &Faculty, day: Weekday, start: &str, end: &str) -> bool {
    faculty
        .windows_for(day)
        .iter()
        .any(|w| w.contains(start, end))
}
