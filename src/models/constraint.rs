//! Constraint catalog records.
//!
//! Constraint rules drive the post-hoc validator: each record names a
//! rule, classifies it (hard/soft, category), and carries an open
//! parameter dictionary for category-specific tuning. The catalog is
//! data — institutions enable, disable, and re-weight rules without
//! touching the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Constraint classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Must be satisfied (schedule unusable if violated).
    Hard,
    /// Should be satisfied (penalty if violated).
    #[default]
    Soft,
}

/// Validator dispatch category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintCategory {
    /// Workload bounds and faculty clashes.
    FacultyWorkload,
    /// Room clashes and capacity.
    RoomAllocation,
    /// Reserved extension point.
    TimeSlot,
    /// Section clashes and gaps.
    StudentSection,
    /// Contiguity of multi-slot lab blocks.
    LabContinuity,
    /// Overlap within an elective group.
    ElectiveGrouping,
    /// Reserved extension point.
    Preference,
    /// Reserved extension point.
    InstitutionalPolicy,
}

/// A configurable constraint record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintRule {
    /// Rule name. The validator dispatches on name substrings within a
    /// category (e.g., "Max" vs "Min" workload rules).
    pub name: String,
    /// Human-readable description for reports.
    pub description: String,
    /// Hard or soft.
    pub kind: ConstraintKind,
    /// Validator dispatch category.
    pub category: ConstraintCategory,
    /// Importance, 1-10.
    pub priority: u8,
    /// Display weight, 0-100.
    pub weight: u8,
    /// Whether the validator evaluates this rule.
    pub active: bool,
    /// Category-specific parameters.
    pub params: HashMap<String, Value>,
}

impl ConstraintRule {
    /// Creates an active rule with mid-range priority and weight.
    pub fn new(name: impl Into<String>, kind: ConstraintKind, category: ConstraintCategory) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            category,
            priority: 5,
            weight: 50,
            active: true,
            params: HashMap::new(),
        }
    }

    /// Creates a hard rule.
    pub fn hard(name: impl Into<String>, category: ConstraintCategory) -> Self {
        Self::new(name, ConstraintKind::Hard, category)
    }

    /// Creates a soft rule.
    pub fn soft(name: impl Into<String>, category: ConstraintCategory) -> Self {
        Self::new(name, ConstraintKind::Soft, category)
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority (clamped to 1-10).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 10);
        self
    }

    /// Sets the display weight (clamped to 0-100).
    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight.min(100);
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Adds a category-specific parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// The standard rule set most institutions start from.
    pub fn default_catalog() -> Vec<Self> {
        vec![
            Self::hard("Faculty Double Booking", ConstraintCategory::FacultyWorkload)
                .with_description("A faculty member cannot teach two sessions in the same slot")
                .with_priority(10)
                .with_weight(100),
            Self::soft("Faculty Max Hours", ConstraintCategory::FacultyWorkload)
                .with_description("Weekly assigned hours must not exceed the faculty maximum")
                .with_priority(7)
                .with_weight(60),
            Self::soft("Faculty Min Hours", ConstraintCategory::FacultyWorkload)
                .with_description("Weekly assigned hours should reach the faculty minimum")
                .with_priority(5)
                .with_weight(40),
            Self::hard("Room Double Booking", ConstraintCategory::RoomAllocation)
                .with_description("A room cannot host two sessions in the same slot")
                .with_priority(10)
                .with_weight(100),
            Self::hard("Room Capacity", ConstraintCategory::RoomAllocation)
                .with_description("Room capacity must cover the section head count")
                .with_priority(9)
                .with_weight(80),
            Self::hard("Section Conflict", ConstraintCategory::StudentSection)
                .with_description("A section cannot attend two sessions in the same slot")
                .with_priority(10)
                .with_weight(100),
            Self::soft("Section Gap Limit", ConstraintCategory::StudentSection)
                .with_description("Idle gaps between a section's classes should stay short")
                .with_priority(4)
                .with_weight(30),
            Self::hard("Lab Continuity", ConstraintCategory::LabContinuity)
                .with_description("Multi-hour lab blocks must occupy contiguous slots")
                .with_priority(8)
                .with_weight(80),
            Self::hard("Elective Group Overlap", ConstraintCategory::ElectiveGrouping)
                .with_description("Courses in one elective group cannot share a slot")
                .with_priority(8)
                .with_weight(70),
        ]
    }
}
