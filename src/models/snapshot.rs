//! Input snapshot.
//!
//! A snapshot bundles the five input collections for one engine run and
//! is immutable for the run's duration. Index maps are built once at
//! construction so gene-reference lookups are O(1) array access instead
//! of linear scans over the catalog.

use std::collections::{HashMap, HashSet};

use super::{
    ConstraintRule, Course, Faculty, Room, Section, SessionRequirement, SessionType, TimeSlot,
    Weekday,
};
use crate::feasibility::{faculty_qualified, room_suitable};

/// Identity of a student group for conflict keys.
///
/// Sections of one cohort are the same students across every course
/// they take, so identity spans courses: (department, semester, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey {
    /// Owning department.
    pub department: String,
    /// Semester index.
    pub semester: u8,
    /// Section name.
    pub name: String,
}

/// The immutable input bundle for one engine run.
#[derive(Debug, Clone)]
pub struct Snapshot {
    courses: Vec<Course>,
    faculty: Vec<Faculty>,
    rooms: Vec<Room>,
    time_slots: Vec<TimeSlot>,
    constraints: Vec<ConstraintRule>,

    courses_by_code: HashMap<String, usize>,
    faculty_by_id: HashMap<String, usize>,
    rooms_by_id: HashMap<String, usize>,
    slots_by_key: HashMap<(Weekday, u8), usize>,
    active_slot_indices: Vec<usize>,
    session_requirement_count: usize,
}

impl Snapshot {
    /// Bundles the input collections and builds the lookup indices.
    pub fn new(
        courses: Vec<Course>,
        faculty: Vec<Faculty>,
        rooms: Vec<Room>,
        time_slots: Vec<TimeSlot>,
        constraints: Vec<ConstraintRule>,
    ) -> Self {
        let courses_by_code = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.clone(), i))
            .collect();
        let faculty_by_id = faculty
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        let rooms_by_id = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let slots_by_key = time_slots
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.day, s.slot_number), i))
            .collect();
        let active_slot_indices = time_slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, _)| i)
            .collect();
        let session_requirement_count = SessionRequirement::from_catalog(&courses).len();

        Self {
            courses,
            faculty,
            rooms,
            time_slots,
            constraints,
            courses_by_code,
            faculty_by_id,
            rooms_by_id,
            slots_by_key,
            active_slot_indices,
            session_requirement_count,
        }
    }

    /// All courses, in catalog order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All faculty members.
    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    /// All rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The full slot grid.
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// The constraint catalog shipped with the snapshot.
    pub fn constraints(&self) -> &[ConstraintRule] {
        &self.constraints
    }

    /// Looks up a course by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses_by_code.get(code).map(|&i| &self.courses[i])
    }

    /// Looks up a faculty member by id.
    pub fn faculty_member(&self, id: &str) -> Option<&Faculty> {
        self.faculty_by_id.get(id).map(|&i| &self.faculty[i])
    }

    /// Looks up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms_by_id.get(id).map(|&i| &self.rooms[i])
    }

    /// Looks up a slot by (day, slot number).
    pub fn slot(&self, day: Weekday, slot_number: u8) -> Option<&TimeSlot> {
        self.slots_by_key
            .get(&(day, slot_number))
            .map(|&i| &self.time_slots[i])
    }

    /// Active slots, in grid order.
    pub fn active_slots(&self) -> Vec<&TimeSlot> {
        self.active_slot_indices
            .iter()
            .map(|&i| &self.time_slots[i])
            .collect()
    }

    /// Total session requirements the catalog derives, computed once at
    /// construction. The evaluator compares gene counts against it.
    pub fn session_requirement_count(&self) -> usize {
        self.session_requirement_count
    }

    /// Number of distinct days carrying at least one active slot.
    pub fn active_day_count(&self) -> usize {
        let days: HashSet<Weekday> = self
            .active_slot_indices
            .iter()
            .map(|&i| self.time_slots[i].day)
            .collect();
        days.len()
    }

    /// Resolves a gene's (course, section) pair to the section record.
    pub fn section(&self, course_code: &str, section_name: &str) -> Option<&Section> {
        self.course(course_code)?.section(section_name)
    }

    /// Resolves a (course, section) pair to its cohort identity.
    pub fn section_key(&self, course_code: &str, section_name: &str) -> Option<SectionKey> {
        let course = self.course(course_code)?;
        course.section(section_name)?;
        Some(SectionKey {
            department: course.department.clone(),
            semester: course.semester,
            name: section_name.to_string(),
        })
    }

    /// Active faculty qualified to teach a course.
    pub fn qualified_faculty(&self, course: &Course) -> Vec<&Faculty> {
        self.faculty
            .iter()
            .filter(|f| faculty_qualified(f, course))
            .collect()
    }

    /// Active rooms able to host a session of a course.
    pub fn suitable_rooms(&self, course: &Course, session_type: SessionType) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| room_suitable(r, course, session_type))
            .collect()
    }
}
