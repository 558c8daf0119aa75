//! Solve status and the result handed to rendering callers.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Coordinate, Location};

/// Outcome of a mixed-integer solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Global optimum certified.
    Optimal,
    /// Best assignment found before a limit hit; optimality not certified.
    Feasible,
    /// The model has no feasible assignment.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// A limit hit before any feasible assignment was found.
    TimedOut,
    /// The backend failed or returned an inconsistent result.
    Error,
}

impl SolveStatus {
    /// Returns `true` if the status carries a variable assignment.
    pub fn has_assignment(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Optimal => "optimal",
            Self::Feasible => "feasible",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::TimedOut => "timed-out",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Result of one solve request.
///
/// `tour` lists the visited locations in order (the tour closes back to the
/// first entry) and is empty unless `status` carries an assignment.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_exact_tsp::models::{Location, SolveStatus, TourResult};
///
/// let result = TourResult::unsolved(SolveStatus::TimedOut, Duration::from_millis(5), 0);
/// assert!(!result.is_solved());
/// assert!(result.tour.is_empty());
/// assert!(result.total_distance.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourResult {
    /// Solver outcome.
    pub status: SolveStatus,
    /// Locations in visiting order.
    pub tour: Vec<Location>,
    /// Total cost of the closed tour.
    pub total_distance: Option<f64>,
    /// Wall-clock time spent in the solve call.
    pub elapsed: Duration,
    /// Branch-and-bound nodes explored by the backend.
    pub nodes_explored: usize,
}

impl TourResult {
    /// Creates a result without a tour.
    pub fn unsolved(status: SolveStatus, elapsed: Duration, nodes_explored: usize) -> Self {
        Self {
            status,
            tour: Vec::new(),
            total_distance: None,
            elapsed,
            nodes_explored,
        }
    }

    /// Returns `true` if a tour is present.
    pub fn is_solved(&self) -> bool {
        self.status.has_assignment() && !self.tour.is_empty()
    }

    /// Location names in visiting order.
    pub fn names(&self) -> Vec<&str> {
        self.tour.iter().map(Location::name).collect()
    }

    /// Closed coordinate path for drawing the tour.
    ///
    /// Locations without a coordinate are skipped. The first coordinate is
    /// repeated at the end so the path closes.
    pub fn polyline(&self) -> Vec<Coordinate> {
        let mut path: Vec<Coordinate> = self
            .tour
            .iter()
            .filter_map(|l| l.coordinate().copied())
            .collect();
        if let Some(&first) = path.first() {
            path.push(first);
        }
        path
    }
}
