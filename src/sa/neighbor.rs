//! Neighbor construction for the annealer.
//!
//! A neighbor differs from the current schedule in exactly one entry. The
//! move is computed against the current schedule without touching it, and
//! the neighbor is a fresh schedule with that one entry replaced, so a
//! rejected move leaves the current schedule intact.

use rand::Rng;

use crate::generator::draw_invigilators;
use crate::models::{Roster, Schedule, ScheduleEntry, TeacherId};

/// Replacement of one entry's teachers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    /// Index of the entry in the schedule.
    pub index: usize,
    /// New teachers for that entry (1..=2).
    pub teachers: Vec<TeacherId>,
}

impl Reassignment {
    /// Builds the neighbor schedule, leaving `schedule` untouched.
    pub fn apply_to(&self, schedule: &Schedule) -> Schedule {
        let mut neighbor = schedule.clone();
        let entry = &schedule.entries[self.index];
        neighbor.entries[self.index] = ScheduleEntry {
            teachers: self.teachers.clone(),
            ..entry.clone()
        };
        neighbor
    }
}

/// Proposes a random single-entry reassignment.
///
/// Picks one entry uniformly, gathers every teacher used in its
/// `(day, slot)` (its own teachers included), and draws up to two
/// replacements from the rest of the roster. Returns `None` if the
/// schedule is empty or no teacher is free in that period.
pub fn perturb<R: Rng>(
    roster: &Roster,
    schedule: &Schedule,
    rng: &mut R,
) -> Option<Reassignment> {
    if schedule.is_empty() {
        return None;
    }

    let index = rng.random_range(0..schedule.len());
    let selected = &schedule.entries[index];
    let used = schedule.teachers_used_at(&selected.day, &selected.slot);

    let available: Vec<TeacherId> = roster
        .teachers
        .iter()
        .map(|t| t.id)
        .filter(|id| !used.contains(id))
        .collect();
    if available.is_empty() {
        return None;
    }

    Some(Reassignment {
        index,
        teachers: draw_invigilators(&available, rng),
    })
}
