//! Simulated Annealing (SA) over invigilation schedules.
//!
//! Starting from a generated schedule, each iteration reassigns one random
//! entry to teachers free in its period, scores the neighbor with
//! [`fitness`](crate::fitness::fitness), and accepts it by the Metropolis
//! criterion. Temperature decays geometrically after every iteration and
//! the loop always runs the full iteration budget.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod neighbor;
mod runner;

pub use config::AnnealingConfig;
pub use neighbor::{perturb, Reassignment};
pub use runner::{AnnealingResult, AnnealingRunner};
