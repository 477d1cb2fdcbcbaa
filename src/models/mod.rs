//! Invigilation domain models.
//!
//! Provides the input roster (teachers, rooms, days, slots) and the
//! schedule produced from it.
//!
//! # Domain Mappings
//!
//! | u-invigilate | Meaning |
//! |--------------|---------|
//! | Teacher | Invigilator with an integer id |
//! | Roster | Teachers, rooms, exam days, and exam slots for one run |
//! | ScheduleEntry | Invigilators of one room in one `(day, slot)` |
//! | Schedule | Every `(day, slot, room)` entry of a run |

mod roster;
mod schedule;
mod teacher;

pub use roster::{format_slot, Roster};
pub use schedule::{Schedule, ScheduleEntry, MAX_INVIGILATORS};
pub use teacher::{Teacher, TeacherId};
