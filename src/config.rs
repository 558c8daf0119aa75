//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::formulation::MAX_SUBSET_LOCATIONS;

/// Subtour elimination scheme added on top of the assignment model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formulation {
    /// Dantzig-Fulkerson-Johnson subset bounds, 2ⁿ − n − 2 constraints.
    #[default]
    Dfj,
    /// Miller-Tucker-Zemlin ordering variables, (n − 1)(n − 2) constraints.
    Mtz,
}

/// Settings shared by every solve of a [`TspSolver`](crate::TspSolver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_exact_tsp::{Formulation, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_max_locations(12)
///     .with_time_limit(Duration::from_secs(5))
///     .with_formulation(Formulation::Mtz);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_locations(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    max_locations: usize,
    epsilon: f64,
    time_limit: Option<Duration>,
    max_nodes: usize,
    formulation: Formulation,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_locations: 15,
            epsilon: 1e-6,
            time_limit: None,
            max_nodes: 100_000,
            formulation: Formulation::Dfj,
        }
    }
}

impl SolverConfig {
    /// Sets the DFJ safety threshold.
    pub fn with_max_locations(mut self, max_locations: usize) -> Self {
        self.max_locations = max_locations;
        self
    }

    /// Sets the binary tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the default time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the branch-and-bound node budget.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Selects the subtour elimination scheme.
    pub fn with_formulation(mut self, formulation: Formulation) -> Self {
        self.formulation = formulation;
        self
    }

    /// DFJ safety threshold, capped at [`MAX_SUBSET_LOCATIONS`].
    pub fn max_locations(&self) -> usize {
        self.max_locations.min(MAX_SUBSET_LOCATIONS)
    }

    /// Binary tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Default time limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Branch-and-bound node budget.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Subtour elimination scheme.
    pub fn formulation(&self) -> Formulation {
        self.formulation
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSetting`] if `epsilon` is outside (0, 0.5) or
    /// `max_nodes` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon > 0.0 && self.epsilon < 0.5) {
            return Err(ConfigError::InvalidSetting(format!(
                "epsilon must lie in (0, 0.5), got {}",
                self.epsilon
            )));
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::InvalidSetting(
                "max_nodes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
