//! Room model.
//!
//! Rooms are the physical resources of the timetable: classrooms,
//! laboratories, seminar halls, and auditoriums. Each room carries a
//! capacity, facility flags, and (for labs) an optional lab subtype.

use serde::{Deserialize, Serialize};

/// A room that can host class sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room classification.
    pub kind: RoomKind,
    /// Lab subtype ("computer", "physics", ...). `None` for non-labs
    /// and for general-purpose labs.
    pub lab_kind: Option<String>,
    /// Seating capacity.
    pub capacity: u32,
    /// Projector installed.
    pub has_projector: bool,
    /// Workstations installed.
    pub has_computers: bool,
    /// Smart board installed.
    pub has_smart_board: bool,
    /// Whether the room may receive assignments.
    pub active: bool,
}

/// Room type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Ordinary lecture room.
    Classroom,
    /// Laboratory (practical sessions).
    Lab,
    /// Seminar hall.
    SeminarHall,
    /// Large-capacity auditorium.
    Auditorium,
}

impl Room {
    /// Creates a new room of the given kind.
    pub fn new(id: impl Into<String>, kind: RoomKind, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            lab_kind: None,
            capacity,
            has_projector: false,
            has_computers: false,
            has_smart_board: false,
            active: true,
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomKind::Classroom, capacity)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomKind::Lab, capacity)
    }

    /// Creates a seminar hall.
    pub fn seminar_hall(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomKind::SeminarHall, capacity)
    }

    /// Creates an auditorium.
    pub fn auditorium(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomKind::Auditorium, capacity)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the lab subtype.
    pub fn with_lab_kind(mut self, lab_kind: impl Into<String>) -> Self {
        self.lab_kind = Some(lab_kind.into());
        self
    }

    /// Marks a projector as installed.
    pub fn with_projector(mut self) -> Self {
        self.has_projector = true;
        self
    }

    /// Marks workstations as installed.
    pub fn with_computers(mut self) -> Self {
        self.has_computers = true;
        self
    }

    /// Marks a smart board as installed.
    pub fn with_smart_board(mut self) -> Self {
        self.has_smart_board = true;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let room = Room::classroom("R101", 60)
            .with_name("Main Block 101")
            .with_projector()
            .with_smart_board();

        assert_eq!(room.id, "R101");
        assert_eq!(room.kind, RoomKind::Classroom);
        assert_eq!(room.capacity, 60);
        assert!(room.has_projector);
        assert!(room.has_smart_board);
        assert!(!room.has_computers);
        assert!(room.active);
    }

    #[test]
    fn test_lab_subtype() {
        let lab = Room::lab("L1", 30)
            .with_lab_kind("computer")
            .with_computers();

        assert_eq!(lab.kind, RoomKind::Lab);
        assert_eq!(lab.lab_kind.as_deref(), Some("computer"));
        assert!(lab.has_computers);
    }

    #[test]
    fn test_room_factories() {
        assert_eq!(Room::seminar_hall("S1", 80).kind, RoomKind::SeminarHall);
        assert_eq!(Room::auditorium("A1", 300).kind, RoomKind::Auditorium);
    }

    #[test]
    fn test_inactive_room() {
        let room = Room::classroom("R1", 40).with_active(false);
        assert!(!room.active);
    }
}
