//! Course and section models.
//!
//! A course describes what must be taught: weekly theory and lab hour
//! requirements, the sections that take it, and the room facilities its
//! sessions need. Sections nest inside their course the way student
//! groups nest inside a syllabus entry.

use serde::{Deserialize, Serialize};

/// A course in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g., "CS101").
    pub code: String,
    /// Human-readable title.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Semester index the course is taught in.
    pub semester: u8,
    /// Course classification.
    pub kind: CourseKind,
    /// Theory requirement, if any.
    pub theory: Option<TheorySpec>,
    /// Lab requirement, if any.
    pub lab: Option<LabSpec>,
    /// Student groups taking this course, in catalog order.
    pub sections: Vec<Section>,
    /// Elective group key. Courses sharing a key are alternatives a
    /// student picks between; `None` for core courses.
    pub elective_group: Option<String>,
    /// Room facilities required by theory sessions.
    pub theory_room: RoomRequirements,
    /// Room facilities required by lab sessions.
    pub lab_room: RoomRequirements,
}

/// Course type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseKind {
    /// Theory sessions only.
    Theory,
    /// Lab sessions only.
    Lab,
    /// Both theory and lab sessions.
    TheoryLab,
}

/// Weekly theory requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheorySpec {
    /// Theory hours per week.
    pub hours_per_week: u8,
    /// Hours per theory session.
    pub session_duration: u8,
}

/// Weekly lab requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSpec {
    /// Lab hours per week.
    pub hours_per_week: u8,
    /// Hours per lab block.
    pub session_duration: u8,
    /// Whether a lab block must occupy contiguous slots.
    pub requires_continuity: bool,
}

/// Facility predicates a session's room must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequirements {
    /// Room must have a projector.
    pub needs_projector: bool,
    /// Room must have workstations.
    pub needs_computers: bool,
    /// Required lab subtype. `None` or "general" matches any lab.
    pub lab_kind: Option<String>,
}

/// A student group taking a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section name (e.g., "A").
    pub name: String,
    /// Head count.
    pub strength: u32,
    /// Pre-assigned theory faculty, if the department fixed one.
    pub theory_faculty: Option<String>,
    /// Pre-assigned lab faculty, if the department fixed one.
    pub lab_faculty: Option<String>,
}

impl TheorySpec {
    /// Creates a theory spec.
    pub fn new(hours_per_week: u8, session_duration: u8) -> Self {
        Self {
            hours_per_week,
            session_duration: session_duration.max(1),
        }
    }
}

impl LabSpec {
    /// Creates a lab spec without a continuity requirement.
    pub fn new(hours_per_week: u8, session_duration: u8) -> Self {
        Self {
            hours_per_week,
            session_duration: session_duration.max(1),
            requires_continuity: false,
        }
    }

    /// Creates a lab spec whose blocks must occupy contiguous slots.
    pub fn continuous(hours_per_week: u8, session_duration: u8) -> Self {
        Self {
            hours_per_week,
            session_duration: session_duration.max(1),
            requires_continuity: true,
        }
    }
}

impl RoomRequirements {
    /// Requires a projector.
    pub fn with_projector(mut self) -> Self {
        self.needs_projector = true;
        self
    }

    /// Requires workstations.
    pub fn with_computers(mut self) -> Self {
        self.needs_computers = true;
        self
    }

    /// Requires a specific lab subtype.
    pub fn with_lab_kind(mut self, lab_kind: impl Into<String>) -> Self {
        self.lab_kind = Some(lab_kind.into());
        self
    }

    /// Whether the subtype requirement accepts any lab.
    pub fn accepts_any_lab(&self) -> bool {
        match self.lab_kind.as_deref() {
            None | Some("general") => true,
            Some(_) => false,
        }
    }
}

impl Section {
    /// Creates a section with the given head count.
    pub fn new(name: impl Into<String>, strength: u32) -> Self {
        Self {
            name: name.into(),
            strength: strength.max(1),
            theory_faculty: None,
            lab_faculty: None,
        }
    }

    /// Pre-assigns the theory faculty.
    pub fn with_theory_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.theory_faculty = Some(faculty_id.into());
        self
    }

    /// Pre-assigns the lab faculty.
    pub fn with_lab_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.lab_faculty = Some(faculty_id.into());
        self
    }
}

impl Course {
    fn empty(code: impl Into<String>, kind: CourseKind) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            department: String::new(),
            semester: 1,
            kind,
            theory: None,
            lab: None,
            sections: Vec::new(),
            elective_group: None,
            theory_room: RoomRequirements::default(),
            lab_room: RoomRequirements::default(),
        }
    }

    /// Creates a theory-only course.
    pub fn theory(code: impl Into<String>, spec: TheorySpec) -> Self {
        let mut course = Self::empty(code, CourseKind::Theory);
        course.theory = Some(spec);
        course
    }

    /// Creates a lab-only course.
    pub fn lab(code: impl Into<String>, spec: LabSpec) -> Self {
        let mut course = Self::empty(code, CourseKind::Lab);
        course.lab = Some(spec);
        course
    }

    /// Creates a course with both theory and lab components.
    pub fn theory_lab(code: impl Into<String>, theory: TheorySpec, lab: LabSpec) -> Self {
        let mut course = Self::empty(code, CourseKind::TheoryLab);
        course.theory = Some(theory);
        course.lab = Some(lab);
        course
    }

    /// Sets the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the semester index.
    pub fn with_semester(mut self, semester: u8) -> Self {
        self.semester = semester;
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Places the course in an elective group.
    pub fn with_elective_group(mut self, group: impl Into<String>) -> Self {
        self.elective_group = Some(group.into());
        self
    }

    /// Sets theory room requirements.
    pub fn with_theory_room(mut self, requirements: RoomRequirements) -> Self {
        self.theory_room = requirements;
        self
    }

    /// Sets lab room requirements.
    pub fn with_lab_room(mut self, requirements: RoomRequirements) -> Self {
        self.lab_room = requirements;
        self
    }

    /// Finds a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let course = Course::theory("CS101", TheorySpec::new(3, 1))
            .with_name("Programming Fundamentals")
            .with_department("CSE")
            .with_semester(1)
            .with_section(Section::new("A", 60))
            .with_section(Section::new("B", 55));

        assert_eq!(course.code, "CS101");
        assert_eq!(course.kind, CourseKind::Theory);
        assert_eq!(course.sections.len(), 2);
        assert_eq!(course.section("B").unwrap().strength, 55);
        assert!(course.section("C").is_none());
        assert!(course.lab.is_none());
    }

    #[test]
    fn test_theory_lab_course() {
        let course = Course::theory_lab(
            "CS201",
            TheorySpec::new(3, 1),
            LabSpec::continuous(2, 2),
        );
        assert_eq!(course.kind, CourseKind::TheoryLab);
        assert!(course.lab.unwrap().requires_continuity);
    }

    #[test]
    fn test_room_requirements() {
        let req = RoomRequirements::default()
            .with_projector()
            .with_lab_kind("computer");
        assert!(req.needs_projector);
        assert!(!req.accepts_any_lab());

        assert!(RoomRequirements::default().accepts_any_lab());
        let general = RoomRequirements::default().with_lab_kind("general");
        assert!(general.accepts_any_lab());
    }

    #[test]
    fn test_section_preassignment() {
        let section = Section::new("A", 40)
            .with_theory_faculty("F1")
            .with_lab_faculty("F2");
        assert_eq!(section.theory_faculty.as_deref(), Some("F1"));
        assert_eq!(section.lab_faculty.as_deref(), Some("F2"));
    }

    #[test]
    fn test_strength_floor() {
        // Head counts below one are meaningless
        assert_eq!(Section::new("A", 0).strength, 1);
    }
}
