//! Randomized greedy schedule construction.
//!
//! # Algorithm
//!
//! 1. Iterate days, then slots within each day, then rooms within each slot.
//! 2. For each room, collect the teachers not yet used in this `(day, slot)`.
//! 3. Draw up to two of them uniformly at random without replacement and
//!    mark them used.
//! 4. If no teacher is left, the room's entry stays empty.
//!
//! A `(day, slot)` with more than `2 × teachers` rooms therefore always ends
//! with understaffed entries; that is expected, not an error.
//!
//! # Complexity
//! O(d * s * r * t) for d days, s slots, r rooms, t teachers.

use rand::prelude::IndexedRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{Roster, Schedule, ScheduleEntry, TeacherId, MAX_INVIGILATORS};

/// Builds initial schedules by greedy random assignment.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_invigilate::generator::ScheduleGenerator;
/// use u_invigilate::models::Roster;
///
/// let roster = Roster::new()
///     .with_teacher(1, "A")
///     .with_teacher(2, "B")
///     .with_room("R1")
///     .with_day("Mon")
///     .with_slot("S1 (9-11)");
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let schedule = ScheduleGenerator::generate(&roster, &mut rng);
/// assert_eq!(schedule.len(), 1);
/// assert_eq!(schedule.entries[0].teachers.len(), 2);
/// ```
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Generates a schedule covering every `(day, slot, room)` exactly once.
    pub fn generate<R: Rng>(roster: &Roster, rng: &mut R) -> Schedule {
        let mut schedule = Schedule::new();
        let mut usage: HashMap<(&str, &str), HashSet<TeacherId>> = HashMap::new();

        for day in &roster.days {
            for slot in &roster.slots {
                let used = usage.entry((day.as_str(), slot.as_str())).or_default();
                for room in &roster.rooms {
                    let available: Vec<TeacherId> = roster
                        .teachers
                        .iter()
                        .map(|t| t.id)
                        .filter(|id| !used.contains(id))
                        .collect();

                    let assigned = draw_invigilators(&available, rng);
                    used.extend(assigned.iter().copied());

                    schedule.add_entry(ScheduleEntry::new(day, slot, room).with_teachers(assigned));
                }
            }
        }

        debug!(
            entries = schedule.len(),
            understaffed = schedule.understaffed_count(),
            "generated initial schedule"
        );
        schedule
    }
}

/// Draws up to [`MAX_INVIGILATORS`] distinct teachers from `candidates`.
///
/// Returns an empty list when `candidates` is empty.
pub fn draw_invigilators<R: Rng>(candidates: &[TeacherId], rng: &mut R) -> Vec<TeacherId> {
    let amount = MAX_INVIGILATORS.min(candidates.len());
    candidates.choose_multiple(rng, amount).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster(teachers: i64, rooms: usize) -> Roster {
        let mut r = Roster::new().with_day("Mon").with_slot("S1 (9-11)");
        for id in 1..=teachers {
            r = r.with_teacher(id, format!("T{id}"));
        }
        for i in 1..=rooms {
            r = r.with_room(format!("R{i}"));
        }
        r
    }

    #[test]
    fn test_two_teachers_one_room() {
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = ScheduleGenerator::generate(&roster(2, 1), &mut rng);

        assert_eq!(schedule.len(), 1);
        let entry = &schedule.entries[0];
        assert_eq!(entry.day, "Mon");
        assert_eq!(entry.slot, "S1 (9-11)");
        assert_eq!(entry.room, "R1");
        let mut teachers = entry.teachers.clone();
        teachers.sort();
        assert_eq!(teachers, vec![1, 2]);
    }

    #[test]
    fn test_one_teacher_two_rooms() {
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = ScheduleGenerator::generate(&roster(1, 2), &mut rng);

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.entries[0].teachers, vec![1]);
        assert!(schedule.entries[1].teachers.is_empty());
    }

    #[test]
    fn test_covers_every_combination_in_order() {
        let r = Roster::new()
            .with_teacher(1, "A")
            .with_teacher(2, "B")
            .with_teacher(3, "C")
            .with_room("R1")
            .with_room("R2")
            .with_day("Mon")
            .with_day("Tue")
            .with_slot("S1")
            .with_slot("S2");
        let mut rng = SmallRng::seed_from_u64(7);
        let schedule = ScheduleGenerator::generate(&r, &mut rng);

        let keys: Vec<(&str, &str, &str)> = schedule
            .iter()
            .map(|e| (e.day.as_str(), e.slot.as_str(), e.room.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Mon", "S1", "R1"),
                ("Mon", "S1", "R2"),
                ("Mon", "S2", "R1"),
                ("Mon", "S2", "R2"),
                ("Tue", "S1", "R1"),
                ("Tue", "S1", "R2"),
                ("Tue", "S2", "R1"),
                ("Tue", "S2", "R2"),
            ]
        );
    }

    #[test]
    fn test_no_teacher_reused_within_period() {
        let r = roster(5, 4);
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = ScheduleGenerator::generate(&r, &mut rng);

        let mut seen = HashSet::new();
        for entry in &schedule {
            assert!(entry.teachers.len() <= MAX_INVIGILATORS);
            for id in &entry.teachers {
                assert!(seen.insert(*id), "teacher {id} assigned twice");
            }
        }
        // 5 teachers over 4 rooms: 2 + 2 + 1 + 0
        assert_eq!(seen.len(), 5);
        assert_eq!(schedule.understaffed_count(), 2);
    }

    #[test]
    fn test_teachers_reused_across_periods() {
        let r = roster(2, 1).with_slot("S2 (13-15)");
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = ScheduleGenerator::generate(&r, &mut rng);

        assert_eq!(schedule.len(), 2);
        assert!(schedule.iter().all(|e| e.teachers.len() == 2));
    }

    #[test]
    fn test_empty_roster_lists() {
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = ScheduleGenerator::generate(&Roster::new(), &mut rng);
        assert!(schedule.is_empty());

        // Rooms and periods but no teachers: every entry is empty.
        let schedule = ScheduleGenerator::generate(&roster(0, 3), &mut rng);
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.understaffed_count(), 3);
    }

    #[test]
    fn test_draw_invigilators() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(draw_invigilators(&[], &mut rng).is_empty());
        assert_eq!(draw_invigilators(&[4], &mut rng), vec![4]);

        let drawn = draw_invigilators(&[1, 2, 3, 4], &mut rng);
        assert_eq!(drawn.len(), 2);
        assert_ne!(drawn[0], drawn[1]);
    }

    #[test]
    fn test_generation_is_reproducible_for_seed() {
        let r = roster(6, 3);
        let a = ScheduleGenerator::generate(&r, &mut SmallRng::seed_from_u64(9));
        let b = ScheduleGenerator::generate(&r, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
