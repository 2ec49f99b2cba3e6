//! Faculty model.
//!
//! Faculty members carry qualifications (which courses they may teach),
//! per-day availability windows, weekly workload bounds, and scheduling
//! preferences.
//!
//! # Availability
//! Windows are "HH:MM" wall-clock ranges compared lexicographically,
//! matching the time slot model. A session fits a window when the
//! window fully contains the session's [start, end].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Weekday;

/// A faculty member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Home department.
    pub department: String,
    /// Course codes this member may teach.
    pub qualified_courses: Vec<String>,
    /// Availability windows per day. A missing day means unavailable.
    pub availability: HashMap<Weekday, Vec<AvailabilityWindow>>,
    /// Minimum teaching hours per week.
    pub min_hours_per_week: u8,
    /// Maximum teaching hours per week.
    pub max_hours_per_week: u8,
    /// Scheduling preferences.
    pub preferences: FacultyPreferences,
    /// Whether the member may receive assignments.
    pub active: bool,
}

/// A wall-clock availability range within one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Range start ("HH:MM", inclusive).
    pub start: String,
    /// Range end ("HH:MM", inclusive).
    pub end: String,
}

/// Soft scheduling preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyPreferences {
    /// Slots the member would like to teach in.
    pub preferred_slots: Vec<(Weekday, u8)>,
    /// Slots the member would like to avoid.
    pub avoid_slots: Vec<(Weekday, u8)>,
    /// Preferred cap on back-to-back teaching hours.
    pub max_consecutive_hours: u8,
}

impl Default for FacultyPreferences {
    fn default() -> Self {
        Self {
            preferred_slots: Vec::new(),
            avoid_slots: Vec::new(),
            max_consecutive_hours: 3,
        }
    }
}

impl AvailabilityWindow {
    /// Creates a window.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether this window fully contains [start, end].
    #[inline]
    pub fn contains(&self, start: &str, end: &str) -> bool {
        self.start.as_str() <= start && end <= self.end.as_str()
    }
}

impl Faculty {
    /// Creates a new faculty member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            qualified_courses: Vec::new(),
            availability: HashMap::new(),
            min_hours_per_week: 0,
            max_hours_per_week: 40,
            preferences: FacultyPreferences::default(),
            active: true,
        }
    }

    /// Sets the member's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the home department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a course the member may teach.
    pub fn qualified_for(mut self, course_code: impl Into<String>) -> Self {
        self.qualified_courses.push(course_code.into());
        self
    }

    /// Adds an availability window on a day.
    pub fn available(
        mut self,
        day: Weekday,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.availability
            .entry(day)
            .or_default()
            .push(AvailabilityWindow::new(start, end));
        self
    }

    /// Adds the same availability window on every weekday Mon-Fri.
    pub fn available_weekdays(self, start: &str, end: &str) -> Self {
        [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ]
        .into_iter()
        .fold(self, |f, day| f.available(day, start, end))
    }

    /// Sets weekly workload bounds.
    pub fn with_workload(mut self, min_hours: u8, max_hours: u8) -> Self {
        self.min_hours_per_week = min_hours;
        self.max_hours_per_week = max_hours;
        self
    }

    /// Marks a slot as preferred.
    pub fn preferring(mut self, day: Weekday, slot_number: u8) -> Self {
        self.preferences.preferred_slots.push((day, slot_number));
        self
    }

    /// Marks a slot to avoid.
    pub fn avoiding(mut self, day: Weekday, slot_number: u8) -> Self {
        self.preferences.avoid_slots.push((day, slot_number));
        self
    }

    /// Sets the preferred consecutive-hours cap.
    pub fn with_max_consecutive(mut self, hours: u8) -> Self {
        self.preferences.max_consecutive_hours = hours;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether the member may teach the given course.
    pub fn teaches(&self, course_code: &str) -> bool {
        self.qualified_courses.iter().any(|c| c == course_code)
    }

    /// Availability windows for a day. Empty when the day is off.
    pub fn windows_for(&self, day: Weekday) -> &[AvailabilityWindow] {
        self.availability.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the member wants to avoid a slot.
    pub fn avoids(&self, day: Weekday, slot_number: u8) -> bool {
        self.preferences
            .avoid_slots
            .iter()
            .any(|&(d, s)| d == day && s == slot_number)
    }
}
