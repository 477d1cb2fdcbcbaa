//! Schedule (solution) model.
//!
//! A schedule holds one [`ScheduleEntry`] per `(day, slot, room)`
//! combination of the roster, each naming up to
//! [`MAX_INVIGILATORS`] teachers.
//!
//! # Serialized Form
//!
//! A schedule serializes as a bare JSON array of entries whose field names
//! are `Day`, `Slot`, `Room`, and `Teachers` (integer ids). Other tools read
//! this document directly, so the names are part of the format.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TeacherId;

/// Maximum number of invigilators assigned to one room.
pub const MAX_INVIGILATORS: usize = 2;

/// One room's invigilation assignment for a given day and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Exam day label.
    #[serde(rename = "Day")]
    pub day: String,
    /// Exam slot label.
    #[serde(rename = "Slot")]
    pub slot: String,
    /// Room label.
    #[serde(rename = "Room")]
    pub room: String,
    /// Assigned invigilators (0..=2), in draw order.
    #[serde(rename = "Teachers")]
    pub teachers: Vec<TeacherId>,
}

/// A complete invigilation schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Entries in generation order (days, then slots, then rooms).
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleEntry {
    /// Creates an entry with no teachers.
    pub fn new(day: impl Into<String>, slot: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            slot: slot.into(),
            room: room.into(),
            teachers: Vec::new(),
        }
    }

    /// Sets the assigned teachers.
    pub fn with_teachers(mut self, teachers: Vec<TeacherId>) -> Self {
        self.teachers = teachers;
        self
    }

    /// Whether this entry shares `(day, slot)` with another.
    #[inline]
    pub fn same_period(&self, other: &ScheduleEntry) -> bool {
        self.day == other.day && self.slot == other.slot
    }

    /// Whether the given teacher invigilates this entry.
    #[inline]
    pub fn has_teacher(&self, id: TeacherId) -> bool {
        self.teachers.contains(&id)
    }

    /// Whether fewer than [`MAX_INVIGILATORS`] teachers are assigned.
    #[inline]
    pub fn is_understaffed(&self) -> bool {
        self.teachers.len() < MAX_INVIGILATORS
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    /// Entries invigilated by a teacher, in schedule order.
    pub fn entries_for_teacher(&self, id: TeacherId) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.has_teacher(id)).collect()
    }

    /// Entries scheduled on a given day and slot.
    pub fn entries_at(&self, day: &str, slot: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.day == day && e.slot == slot)
            .collect()
    }

    /// Teachers used anywhere in a given day and slot.
    pub fn teachers_used_at(&self, day: &str, slot: &str) -> HashSet<TeacherId> {
        self.entries_at(day, slot)
            .into_iter()
            .flat_map(|e| e.teachers.iter().copied())
            .collect()
    }

    /// The entry for a `(day, slot, room)` combination.
    pub fn entry_at(&self, day: &str, slot: &str, room: &str) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.day == day && e.slot == slot && e.room == room)
    }

    /// Number of entries with fewer than two invigilators.
    pub fn understaffed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_understaffed()).count()
    }
}

impl FromIterator<ScheduleEntry> for Schedule {
    fn from_iter<I: IntoIterator<Item = ScheduleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
