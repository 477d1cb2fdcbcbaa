//! Annealing execution loop.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::AnnealingConfig;
use super::neighbor::perturb;
use crate::error::{Error, Result};
use crate::fitness::fitness;
use crate::generator::ScheduleGenerator;
use crate::models::{Roster, Schedule};
use crate::validation::validate_roster;

/// Iterations between fitness history samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// The best schedule found. Never worse than the initial schedule.
    pub schedule: Schedule,

    /// Fitness of `schedule`.
    pub fitness: i64,

    /// Fitness of the schedule the run started from.
    pub initial_fitness: i64,

    /// Fitness of the current (last accepted) schedule at termination.
    pub final_fitness: i64,

    /// Total number of iterations performed.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Best fitness sampled every 100 iterations. Non-decreasing.
    pub fitness_history: Vec<i64>,
}

/// Executes simulated annealing over invigilation schedules.
pub struct AnnealingRunner;

impl AnnealingRunner {
    /// Validates the roster, generates an initial schedule, and anneals it.
    ///
    /// The random source is seeded from `config.seed`, or from OS entropy
    /// when no seed is set.
    ///
    /// # Example
    ///
    /// ```
    /// use u_invigilate::models::Roster;
    /// use u_invigilate::sa::{AnnealingConfig, AnnealingRunner};
    ///
    /// let roster = Roster::new()
    ///     .with_teacher(1, "A")
    ///     .with_teacher(2, "B")
    ///     .with_teacher(3, "C")
    ///     .with_room("R1")
    ///     .with_room("R2")
    ///     .with_day("Mon")
    ///     .with_slot("S1 (9-11)");
    ///
    /// let config = AnnealingConfig::default().with_seed(42);
    /// let result = AnnealingRunner::optimize(&roster, &config).unwrap();
    /// assert_eq!(result.schedule.len(), 2);
    /// assert_eq!(result.fitness, 0);
    /// ```
    pub fn optimize(roster: &Roster, config: &AnnealingConfig) -> Result<AnnealingResult> {
        validate_roster(roster).map_err(Error::InvalidRoster)?;
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let initial = ScheduleGenerator::generate(roster, &mut rng);
        Self::run(roster, initial, config, &mut rng)
    }

    /// Anneals an existing schedule.
    ///
    /// Runs exactly `config.max_iterations` iterations of
    /// perturb → evaluate → accept/reject → cool. `config.seed` is ignored;
    /// all randomness comes from `rng`.
    pub fn run<R: Rng>(
        roster: &Roster,
        initial: Schedule,
        config: &AnnealingConfig,
        rng: &mut R,
    ) -> Result<AnnealingResult> {
        config.validate()?;

        let mut current = initial;
        let mut current_fitness = fitness(&current);
        let initial_fitness = current_fitness;
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = config.initial_temperature;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut fitness_history = vec![best_fitness];

        info!(
            entries = current.len(),
            fitness = initial_fitness,
            max_iterations = config.max_iterations,
            "annealing started"
        );

        for iteration in 1..=config.max_iterations {
            let neighbor = match perturb(roster, &current, rng) {
                Some(mv) => mv.apply_to(&current),
                None => current.clone(),
            };
            let neighbor_fitness = fitness(&neighbor);
            let delta = neighbor_fitness - current_fitness;

            // Metropolis acceptance criterion
            let accept = if delta > 0 {
                improving_moves += 1;
                true
            } else {
                rng.random::<f64>() < acceptance_probability(delta, temperature)
            };

            trace!(iteration, delta, temperature, accept, "annealing step");

            if accept {
                current = neighbor;
                current_fitness = neighbor_fitness;
                accepted_moves += 1;

                if current_fitness > best_fitness {
                    best = current.clone();
                    best_fitness = current_fitness;
                }
            }

            temperature *= config.cooling_rate;

            if iteration % HISTORY_INTERVAL == 0 {
                fitness_history.push(best_fitness);
            }
        }

        if fitness_history.last() != Some(&best_fitness) {
            fitness_history.push(best_fitness);
        }

        debug!(
            accepted_moves,
            improving_moves,
            final_temperature = temperature,
            final_fitness = current_fitness,
            "annealing statistics"
        );
        info!(
            initial_fitness,
            fitness = best_fitness,
            understaffed = best.understaffed_count(),
            "annealing finished"
        );

        Ok(AnnealingResult {
            schedule: best,
            fitness: best_fitness,
            initial_fitness,
            final_fitness: current_fitness,
            iterations: config.max_iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            fitness_history,
        })
    }
}

/// Probability of accepting a non-improving move (`delta <= 0`).
///
/// `exp(delta / T)`; at `T = 0` only neutral moves are accepted.
fn acceptance_probability(delta: i64, temperature: f64) -> f64 {
    if delta >= 0 {
        1.0
    } else if temperature > 0.0 {
        (delta as f64 / temperature).exp()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduleEntry, MAX_INVIGILATORS};
    use proptest::prelude::*;

    fn roster(teachers: i64, rooms: usize, slots: usize) -> Roster {
        let mut r = Roster::new().with_day("Mon");
        for id in 1..=teachers {
            r = r.with_teacher(id, format!("T{id}"));
        }
        for i in 1..=rooms {
            r = r.with_room(format!("R{i}"));
        }
        for i in 1..=slots {
            r = r.with_slot(format!("S{i}"));
        }
        r
    }

    fn crowded() -> Schedule {
        Schedule::from_iter([
            ScheduleEntry::new("Mon", "S1", "R1").with_teachers(vec![1, 2]),
            ScheduleEntry::new("Mon", "S1", "R2").with_teachers(vec![1, 2]),
        ])
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        let r = roster(4, 2, 1);
        let config = AnnealingConfig::default().with_max_iterations(0);
        let mut rng = SmallRng::seed_from_u64(42);

        let result = AnnealingRunner::run(&r, crowded(), &config, &mut rng).unwrap();

        assert_eq!(result.schedule, crowded());
        assert_eq!(result.fitness, -2);
        assert_eq!(result.initial_fitness, -2);
        assert_eq!(result.iterations, 0);
        assert!((result.final_temperature - 1000.0).abs() < 1e-10);
        assert_eq!(result.fitness_history, vec![-2]);
    }

    #[test]
    fn test_resolves_double_booking() {
        // Teachers 3 and 4 are free; any reassignment clears both conflicts.
        let r = roster(4, 2, 1);
        let config = AnnealingConfig::default().with_max_iterations(20);
        let mut rng = SmallRng::seed_from_u64(42);

        let result = AnnealingRunner::run(&r, crowded(), &config, &mut rng).unwrap();

        assert_eq!(result.initial_fitness, -2);
        assert_eq!(result.fitness, 0);
        assert_eq!(fitness(&result.schedule), 0);
        assert!(result.improving_moves >= 1);
    }

    #[test]
    fn test_runs_full_budget_even_when_optimal() {
        let r = roster(2, 1, 1);
        let config = AnnealingConfig::default()
            .with_max_iterations(250)
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.9);
        let mut rng = SmallRng::seed_from_u64(42);
        let initial = ScheduleGenerator::generate(&r, &mut rng);

        let result = AnnealingRunner::run(&r, initial, &config, &mut rng).unwrap();

        assert_eq!(result.iterations, 250);
        assert_eq!(result.fitness, 0);
        // No free teacher ever exists, so every step is a neutral no-op.
        assert_eq!(result.accepted_moves, 250);
        assert_eq!(result.improving_moves, 0);
        let expected = config.temperature_after(250);
        assert!((result.final_temperature - expected).abs() <= expected * 1e-9);
    }

    #[test]
    fn test_history_non_decreasing() {
        let r = roster(6, 4, 2);
        let config = AnnealingConfig::default()
            .with_max_iterations(1000)
            .with_seed(7);

        let result = AnnealingRunner::optimize(&r, &config).unwrap();

        assert!(result.fitness_history.len() >= 10);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness history should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.fitness_history.last(), Some(&result.fitness));
    }

    #[test]
    fn test_optimize_is_reproducible_for_seed() {
        let r = roster(5, 3, 2);
        let config = AnnealingConfig::default().with_seed(11).with_max_iterations(300);

        let a = AnnealingRunner::optimize(&r, &config).unwrap();
        let b = AnnealingRunner::optimize(&r, &config).unwrap();

        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_optimize_two_teachers_one_room() {
        let r = Roster::new()
            .with_teacher(1, "A")
            .with_teacher(2, "B")
            .with_room("R1")
            .with_day("Mon")
            .with_slot("S1 (9-11)");
        let config = AnnealingConfig::default().with_seed(42);

        let result = AnnealingRunner::optimize(&r, &config).unwrap();

        assert_eq!(result.schedule.len(), 1);
        let mut teachers = result.schedule.entries[0].teachers.clone();
        teachers.sort();
        assert_eq!(teachers, vec![1, 2]);
        assert_eq!(result.fitness, 0);
    }

    #[test]
    fn test_optimize_rejects_invalid_roster() {
        let r = roster(0, 1, 1);
        let err = AnnealingRunner::optimize(&r, &AnnealingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRoster(_)));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let r = roster(2, 1, 1);
        let config = AnnealingConfig::default().with_cooling_rate(2.0);
        let mut rng = SmallRng::seed_from_u64(42);
        let err = AnnealingRunner::run(&r, Schedule::new(), &config, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_acceptance_probability() {
        assert!((acceptance_probability(1, 10.0) - 1.0).abs() < 1e-12);
        assert!((acceptance_probability(0, 10.0) - 1.0).abs() < 1e-12);
        assert!((acceptance_probability(0, 0.0) - 1.0).abs() < 1e-12);
        assert!((acceptance_probability(-1, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(acceptance_probability(-1, 0.0), 0.0);
        // Cold temperatures become effectively greedy.
        assert!(acceptance_probability(-1, 1e-6) < 1e-100);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_never_worse_and_staffing_bounded(
            teachers in 0..8i64,
            rooms in 1..5usize,
            slots in 1..3usize,
            iterations in 0..200usize,
            seed in any::<u64>(),
        ) {
            let r = roster(teachers, rooms, slots);
            let config = AnnealingConfig::default().with_max_iterations(iterations);
            let mut rng = SmallRng::seed_from_u64(seed);
            let initial = ScheduleGenerator::generate(&r, &mut rng);
            let initial_fitness = fitness(&initial);

            let result = AnnealingRunner::run(&r, initial, &config, &mut rng).unwrap();

            prop_assert!(result.fitness >= initial_fitness);
            prop_assert!(result.fitness <= 0);
            prop_assert_eq!(result.schedule.len(), r.combination_count());
            prop_assert!(result
                .schedule
                .iter()
                .all(|e| e.teachers.len() <= MAX_INVIGILATORS));
            if iterations == 0 {
                prop_assert_eq!(result.fitness, initial_fitness);
            }
        }
    }
}
