//! Annealing configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the annealing optimizer.
///
/// Cooling is geometric: after every iteration `T ← cooling_rate × T`.
/// The run always performs exactly `max_iterations` iterations.
///
/// # Examples
///
/// ```
/// use u_invigilate::sa::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.99)
///     .with_max_iterations(5000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Multiplicative decay applied after each iteration, in `(0, 1]`.
    pub cooling_rate: f64,

    /// Number of perturbation steps. 0 returns the initial schedule.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            max_iterations: 1000,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }

    /// Temperature after `iterations` cooling steps.
    pub fn temperature_after(&self, iterations: usize) -> f64 {
        let exponent = i32::try_from(iterations).unwrap_or(i32::MAX);
        self.initial_temperature * self.cooling_rate.powi(exponent)
    }
}
