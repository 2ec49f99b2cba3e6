//! Time slot grid model.
//!
//! The scheduling horizon is a discrete weekly grid: each slot is
//! identified by (day, slot number) and carries wall-clock boundaries.
//! Slots on the same day are totally ordered by slot number.
//!
//! # Time Model
//! Wall-clock times are "HH:MM" strings. Zero-padded 24-hour times
//! compare correctly under lexicographic ordering, which is the
//! comparison contract used throughout the crate.

use serde::{Deserialize, Serialize};

/// Day of the teaching week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All teaching days in week order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

/// Slot classification within a day.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Ordinary teaching period.
    #[default]
    Regular,
    /// Short break between periods.
    Break,
    /// Lunch period. Never part of a consecutive run.
    Lunch,
    /// Extended period (e.g., evening block).
    Extended,
}

/// One cell of the weekly grid.
///
/// Identified by `(day, slot_number)`; slot numbers are 1-based and
/// totally ordered within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day this slot belongs to.
    pub day: Weekday,
    /// Position within the day (1-based).
    pub slot_number: u8,
    /// Wall-clock start ("HH:MM").
    pub start: String,
    /// Wall-clock end ("HH:MM").
    pub end: String,
    /// Slot classification.
    pub kind: SlotKind,
    /// Whether the slot may receive assignments.
    pub active: bool,
}

impl TimeSlot {
    /// Creates a regular, active slot.
    pub fn new(
        day: Weekday,
        slot_number: u8,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            day,
            slot_number,
            start: start.into(),
            end: end.into(),
            kind: SlotKind::Regular,
            active: true,
        }
    }

    /// Sets the slot kind.
    pub fn with_kind(mut self, kind: SlotKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether this is a lunch slot.
    #[inline]
    pub fn is_lunch(&self) -> bool {
        self.kind == SlotKind::Lunch
    }

    /// Whether `other` immediately follows or precedes this slot.
    ///
    /// Consecutive means: same day, slot numbers differing by exactly
    /// one, and neither slot is a lunch slot.
    pub fn is_consecutive_with(&self, other: &Self) -> bool {
        self.day == other.day
            && self.slot_number.abs_diff(other.slot_number) == 1
            && !self.is_lunch()
            && !other.is_lunch()
    }
}
