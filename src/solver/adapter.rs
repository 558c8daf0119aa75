//! Solver adapter contract and raw solution type.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::formulation::{Model, VariableId};
use crate::models::SolveStatus;

/// Shared flag for cancelling an in-flight solve from another thread.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::solver::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits observed by a solver adapter.
#[derive(Debug, Clone, Default)]
pub struct SolveLimits {
    time_limit: Option<Duration>,
    cancel: Option<CancelFlag>,
}

impl SolveLimits {
    /// No time limit, no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets an optional wall-clock limit.
    pub fn with_optional_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Wall-clock limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns `true` if the solve that began at `started` must stop.
    pub fn is_interrupted(&self, started: Instant) -> bool {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return true;
        }
        self.time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
    }
}

/// Raw output of a solver adapter.
///
/// Carries one value per model variable when the status is
/// [`Optimal`](SolveStatus::Optimal) or [`Feasible`](SolveStatus::Feasible),
/// and no assignment otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: SolveStatus,
    objective: Option<f64>,
    values: Vec<f64>,
    nodes_explored: usize,
}

impl Solution {
    /// A solution with an assignment.
    pub fn with_assignment(status: SolveStatus, objective: f64, values: Vec<f64>) -> Self {
        Self {
            status,
            objective: Some(objective),
            values,
            nodes_explored: 0,
        }
    }

    /// A solution without an assignment.
    pub fn without_assignment(status: SolveStatus) -> Self {
        Self {
            status,
            objective: None,
            values: Vec::new(),
            nodes_explored: 0,
        }
    }

    /// Records how many search nodes were explored.
    pub fn with_nodes_explored(mut self, nodes: usize) -> Self {
        self.nodes_explored = nodes;
        self
    }

    /// Solve status.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Objective value of the assignment.
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// All variable values, indexed by [`VariableId::index`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of one variable.
    pub fn value(&self, var: VariableId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Search nodes explored by the backend.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }
}

/// A mixed-integer solving capability.
///
/// `solve` blocks until the backend finishes, the time limit passes, or the
/// cancel flag is raised, and never panics on solver failure: every outcome
/// is reported through the returned [`Solution`]'s status.
///
/// # Thread Safety
///
/// Adapters hold configuration only; each call owns its model and search
/// state, so one adapter may serve concurrent solves.
pub trait SolverAdapter: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Solves the model within the given limits.
    fn solve(&self, model: &Model, limits: &SolveLimits) -> Solution;
}
