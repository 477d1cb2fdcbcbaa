//! Exam invigilation scheduling.
//!
//! Assigns teachers to `(day, slot, room)` exam sittings, two per room when
//! enough teachers are free, and minimizes teacher double-booking with
//! simulated annealing.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `Roster`, `ScheduleEntry`, `Schedule`
//! - **`validation`**: Roster integrity checks (empty lists, duplicate IDs and labels)
//! - **`generator`**: Randomized greedy initial schedule
//! - **`fitness`**: Double-booking penalty and conflict report
//! - **`sa`**: Simulated annealing optimizer
//! - **`persistence`**: JSON schedule document storage
//! - **`lookup`**: Teacher-scoped queries over a saved document
//!
//! # Pipeline
//!
//! ```text
//! Roster → ScheduleGenerator → AnnealingRunner (perturb / fitness / accept) → ScheduleStore
//!                                                                              ↓
//!                                                                        TeacherLookup
//! ```
//!
//! All randomness flows through an explicit `rand::Rng`, so a seed fixes
//! the whole run.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod error;
pub mod fitness;
pub mod generator;
pub mod lookup;
pub mod models;
pub mod persistence;
pub mod sa;
pub mod validation;

pub use error::{Error, Result};
