//! Teacher-scoped queries over a saved schedule document.
//!
//! A lookup loads a persisted schedule read-only and returns the entries a
//! teacher invigilates, in document order. Three outcomes are kept apart:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | Bad teacher id | `Err(MissingTeacherId \| InvalidTeacherId)` |
//! | Unreadable or malformed document | `Err(Read \| Parse)` |
//! | Valid query, nothing matches | `Ok(vec![])` |

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Schedule, ScheduleEntry, TeacherId};
use crate::persistence::load_schedule;

/// Parses an operator-typed teacher id.
///
/// ```
/// use u_invigilate::lookup::parse_teacher_id;
///
/// assert_eq!(parse_teacher_id(" 42 ").unwrap(), 42);
/// assert!(parse_teacher_id("").is_err());
/// assert!(parse_teacher_id("GV01").is_err());
/// ```
pub fn parse_teacher_id(raw: &str) -> Result<TeacherId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingTeacherId);
    }
    trimmed
        .parse()
        .map_err(|_| Error::InvalidTeacherId(trimmed.to_string()))
}

/// Read-only view of a loaded schedule document.
#[derive(Debug, Clone)]
pub struct TeacherLookup {
    schedule: Schedule,
}

impl TeacherLookup {
    /// Loads a schedule document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            schedule: load_schedule(path)?,
        })
    }

    /// Wraps an in-memory schedule.
    pub fn from_schedule(schedule: Schedule) -> Self {
        Self { schedule }
    }

    /// The loaded schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Entries whose teachers include `id`, in document order.
    pub fn entries_for(&self, id: TeacherId) -> Vec<&ScheduleEntry> {
        self.schedule.entries_for_teacher(id)
    }

    /// Parses `raw_id` and filters by it.
    pub fn query(&self, raw_id: &str) -> Result<Vec<&ScheduleEntry>> {
        let id = parse_teacher_id(raw_id)?;
        Ok(self.entries_for(id))
    }
}

/// Validates `raw_id`, loads the document at `path`, and filters it.
///
/// The id is checked before the document is touched.
pub fn lookup(path: impl AsRef<Path>, raw_id: &str) -> Result<Vec<ScheduleEntry>> {
    let id = parse_teacher_id(raw_id)?;
    let lookup = TeacherLookup::open(path)?;
    Ok(lookup.entries_for(id).into_iter().cloned().collect())
}

/// Day × slot grid listing the rooms of each cell.
///
/// Days and slots are unique labels sorted ascending; rooms keep entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    /// Row labels.
    pub days: Vec<String>,
    /// Column labels.
    pub slots: Vec<String>,
    cells: HashMap<(String, String), Vec<String>>,
}

impl Timetable {
    /// Builds the grid from a set of entries.
    pub fn by_day_slot<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleEntry>,
    {
        let mut days = BTreeSet::new();
        let mut slots = BTreeSet::new();
        let mut cells: HashMap<(String, String), Vec<String>> = HashMap::new();

        for entry in entries {
            days.insert(entry.day.clone());
            slots.insert(entry.slot.clone());
            cells
                .entry((entry.day.clone(), entry.slot.clone()))
                .or_default()
                .push(entry.room.clone());
        }

        Self {
            days: days.into_iter().collect(),
            slots: slots.into_iter().collect(),
            cells,
        }
    }

    /// Rooms in a cell; empty when nothing is scheduled there.
    pub fn rooms_at(&self, day: &str, slot: &str) -> &[String] {
        self.cells
            .get(&(day.to_string(), slot.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day \\ Slot")?;
        for slot in &self.slots {
            write!(f, " | {slot}")?;
        }
        writeln!(f)?;
        for day in &self.days {
            write!(f, "{day}")?;
            for slot in &self.slots {
                let rooms = self.rooms_at(day, slot);
                if rooms.is_empty() {
                    write!(f, " | -")?;
                } else {
                    write!(f, " | {}", rooms.join(", "))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
