//! Timetabling domain models.
//!
//! Provides the input entities the engine consumes and the derived
//! session requirements the chromosome covers.
//!
//! # Entity Map
//!
//! | Type | Role |
//! |------|------|
//! | `TimeSlot` | One cell of the weekly (day, slot) grid |
//! | `Room` | Physical resource with capacity and facilities |
//! | `Course` / `Section` | What must be taught, and to whom |
//! | `Faculty` | Who may teach, when, and how much |
//! | `SessionRequirement` | One schedulable unit, derived per run |
//! | `ConstraintRule` | Configurable audit rule for the validator |
//! | `Snapshot` | The immutable input bundle for one run |

mod constraint;
mod course;
mod faculty;
mod room;
mod session;
mod snapshot;
mod time_slot;

pub use constraint::{ConstraintCategory, ConstraintKind, ConstraintRule};
pub use course::{Course, CourseKind, LabSpec, RoomRequirements, Section, TheorySpec};
pub use faculty::{AvailabilityWindow, Faculty, FacultyPreferences};
pub use room::{Room, RoomKind};
pub use session::{SessionRequirement, SessionType};
pub use snapshot::{SectionKey, Snapshot};
pub use time_slot::{SlotKind, TimeSlot, Weekday};
