//! Roster (problem input) model.
//!
//! The roster bundles the four ordered input lists an external loader
//! supplies: teachers, rooms, exam days, and exam slots. It is the explicit
//! session state handed by reference to the generator and the annealer.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "teachers": [{ "id": 1, "name": "A" }, { "id": 2, "name": "B" }],
//!   "rooms": ["R1", "R2"],
//!   "days": ["2024-06-10"],
//!   "slots": ["Morning (07:30 - 09:30)"],
//!   "annealing": { "max_iterations": 2000 }
//! }
//! ```
//!
//! `annealing` is optional; omitted fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{Teacher, TeacherId};
use crate::error::{Error, Result};
use crate::sa::AnnealingConfig;

/// Input lists for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Available invigilators, in roster order.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Exam room labels.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Exam day labels.
    #[serde(default)]
    pub days: Vec<String>,
    /// Pre-formatted exam slot labels (see [`format_slot`]).
    #[serde(default)]
    pub slots: Vec<String>,
    /// Optional optimizer settings shipped with the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annealing: Option<AnnealingConfig>,
}

/// Formats an exam slot label from its period name and time window.
///
/// ```
/// use u_invigilate::models::format_slot;
///
/// assert_eq!(format_slot("Ca 1", "07:30", "09:30"), "Ca 1 (07:30 - 09:30)");
/// ```
pub fn format_slot(name: &str, start: &str, end: &str) -> String {
    format!("{name} ({start} - {end})")
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a roster document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, id: TeacherId, name: impl Into<String>) -> Self {
        self.teachers.push(Teacher::new(id, name));
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.rooms.push(room.into());
        self
    }

    /// Adds an exam day.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.days.push(day.into());
        self
    }

    /// Adds an exam slot.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slots.push(slot.into());
        self
    }

    /// Returns a copy of this roster restricted to an operator's day selection.
    ///
    /// Selected days need not appear in [`Roster::days`]; operators may pick
    /// any calendar date. An empty selection is an input error.
    pub fn for_days<S: AsRef<str>>(&self, selection: &[S]) -> Result<Self> {
        if selection.is_empty() {
            return Err(Error::EmptyDaySelection);
        }
        Ok(Self {
            days: selection.iter().map(|d| d.as_ref().to_string()).collect(),
            ..self.clone()
        })
    }

    /// Teacher ids in roster order.
    pub fn teacher_ids(&self) -> Vec<TeacherId> {
        self.teachers.iter().map(|t| t.id).collect()
    }

    /// Finds a teacher by id.
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Number of `(day, slot, room)` combinations a full schedule covers.
    pub fn combination_count(&self) -> usize {
        self.days.len() * self.slots.len() * self.rooms.len()
    }
}
