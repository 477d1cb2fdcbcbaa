//! Conflict-counting fitness.
//!
//! A conflict is the same teacher invigilating two rooms in one
//! `(day, slot)`. Entries are scanned in order; the first occurrence of a
//! teacher in a period is free and every later occurrence costs 1.
//!
//! Fitness is the negated penalty: `0` is conflict-free and more negative
//! is worse. Staffing levels (`0..=2` teachers per entry) are not scored.

use std::collections::{HashMap, HashSet};

use crate::models::{Schedule, TeacherId};

/// A penalized teacher occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Day of the double booking.
    pub day: String,
    /// Slot of the double booking.
    pub slot: String,
    /// Room holding the penalized (non-first) occurrence.
    pub room: String,
    /// The double-booked teacher.
    pub teacher_id: TeacherId,
}

/// Scores a schedule. Higher is better; never positive.
pub fn fitness(schedule: &Schedule) -> i64 {
    let mut penalty = 0i64;
    scan(schedule, |_, _| penalty += 1);
    -penalty
}

/// Lists every penalized occurrence, in the order [`fitness`] counts them.
///
/// `conflicts(s).len() as i64 == -fitness(s)` for every schedule.
pub fn conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let mut found = Vec::new();
    scan(schedule, |index, teacher_id| {
        let entry = &schedule.entries[index];
        found.push(Conflict {
            day: entry.day.clone(),
            slot: entry.slot.clone(),
            room: entry.room.clone(),
            teacher_id,
        });
    });
    found
}

/// Calls `on_conflict(entry_index, teacher_id)` for each repeated teacher.
fn scan<F: FnMut(usize, TeacherId)>(schedule: &Schedule, mut on_conflict: F) {
    let mut usage: HashMap<(&str, &str), HashSet<TeacherId>> = HashMap::new();

    for (index, entry) in schedule.entries.iter().enumerate() {
        let used = usage
            .entry((entry.day.as_str(), entry.slot.as_str()))
            .or_default();
        for &teacher in &entry.teachers {
            if !used.insert(teacher) {
                on_conflict(index, teacher);
            }
        }
    }
}
