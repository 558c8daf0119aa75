//! Solve orchestration: validation, model construction, solving, decoding.

use std::borrow::Cow;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::config::{Formulation, SolverConfig};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError, ValidationError};
use crate::evaluation::TourReconstructor;
use crate::formulation::{ModelBuilder, MtzConstraintGenerator, SubtourConstraintGenerator};
use crate::models::{Location, TourResult};
use crate::solver::{BranchAndBoundSolver, CancelFlag, SolveLimits, SolverAdapter};

/// One solve request over a distance matrix.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::models::Location;
/// use u_exact_tsp::SolveRequest;
///
/// let dm = DistanceMatrix::from_data(Location::from_names(["A", "B", "C"]), vec![1.0; 9]).unwrap();
/// let request = SolveRequest::new(&dm)
///     .with_subset(["A", "C"])
///     .with_time_limit(Duration::from_secs(1));
/// assert_eq!(request.subset().unwrap(), ["A", "C"]);
/// ```
#[derive(Debug, Clone)]
pub struct SolveRequest<'a> {
    distances: &'a DistanceMatrix,
    subset: Option<Vec<String>>,
    time_limit: Option<Duration>,
    cancel: Option<CancelFlag>,
}

impl<'a> SolveRequest<'a> {
    /// Solve over every location of `distances`.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            subset: None,
            time_limit: None,
            cancel: None,
        }
    }

    /// Restricts the solve to the named locations.
    ///
    /// The first named location becomes the start of the tour.
    pub fn with_subset<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subset = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the configured time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Attaches a flag that interrupts the solver when raised.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Selected location names, if any.
    pub fn subset(&self) -> Option<&[String]> {
        self.subset.as_deref()
    }
}

/// Exact tour solver.
///
/// Each call to [`solve`](Self::solve) builds its own restricted matrix and
/// model, so one solver can serve concurrent requests from several threads.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::models::{Location, SolveStatus};
/// use u_exact_tsp::{SolveRequest, SolverConfig, TspSolver};
///
/// let dm = DistanceMatrix::from_rows(
///     Location::from_names(["A", "B", "C", "D"]),
///     vec![
///         vec![0.0, 2.0, 9.0, 10.0],
///         vec![2.0, 0.0, 6.0, 4.0],
///         vec![9.0, 6.0, 0.0, 3.0],
///         vec![10.0, 4.0, 3.0, 0.0],
///     ],
/// )
/// .unwrap();
///
/// let solver = TspSolver::new(SolverConfig::default());
/// let result = solver.solve(SolveRequest::new(&dm)).unwrap();
/// assert_eq!(result.status, SolveStatus::Optimal);
/// assert!((result.total_distance.unwrap() - 18.0).abs() < 1e-6);
/// assert_eq!(result.names()[0], "A");
/// ```
#[derive(Debug, Clone)]
pub struct TspSolver<S = BranchAndBoundSolver> {
    config: SolverConfig,
    adapter: S,
}

impl TspSolver {
    /// Creates a solver backed by [`BranchAndBoundSolver`].
    pub fn new(config: SolverConfig) -> Self {
        let adapter = BranchAndBoundSolver::new()
            .with_max_nodes(config.max_nodes())
            .with_integrality_tolerance(config.epsilon());
        Self { config, adapter }
    }
}

impl Default for TspSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<S: SolverAdapter> TspSolver<S> {
    /// Creates a solver backed by a custom adapter.
    pub fn with_adapter(config: SolverConfig, adapter: S) -> Self {
        Self { config, adapter }
    }

    /// Active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Backend adapter.
    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    /// Solves one request.
    ///
    /// Solver outcomes without a tour (infeasible, unbounded, timed out,
    /// backend error) come back as `Ok` with the matching status.
    ///
    /// # Errors
    ///
    /// - [`TspError::Config`] if the configuration is invalid
    /// - [`TspError::Validation`] if the subset cannot be resolved
    /// - [`TspError::ResourceLimit`] if the DFJ formulation is selected and
    ///   the instance exceeds `max_locations`; no model is built
    /// - [`TspError::Extraction`] if the assignment does not decode into a
    ///   single tour
    pub fn solve(&self, request: SolveRequest<'_>) -> Result<TourResult> {
        let started = Instant::now();
        self.config.validate()?;

        let distances: Cow<'_, DistanceMatrix> = match &request.subset {
            Some(names) => {
                let positions = resolve_subset(request.distances, names)?;
                Cow::Owned(request.distances.restrict(&positions)?)
            }
            None => Cow::Borrowed(request.distances),
        };
        let n = distances.size();
        let formulation = self.config.formulation();

        if formulation == Formulation::Dfj && n > self.config.max_locations() {
            warn!(
                "rejecting {n} locations: DFJ enumeration limit is {}",
                self.config.max_locations()
            );
            return Err(TspError::ResourceLimit {
                locations: n,
                limit: self.config.max_locations(),
            });
        }

        info!(
            "solving {n} locations with {formulation:?} via {}",
            self.adapter.name()
        );
        debug!(
            "cost table is {}",
            if distances.is_symmetric(self.config.epsilon()) {
                "symmetric"
            } else {
                "asymmetric"
            }
        );

        let mut model = ModelBuilder::new(&distances).build();
        match formulation {
            Formulation::Dfj => {
                let generator = SubtourConstraintGenerator::new(n).ok_or(TspError::ResourceLimit {
                    locations: n,
                    limit: self.config.max_locations(),
                })?;
                generator.apply(&mut model);
            }
            Formulation::Mtz => MtzConstraintGenerator::new(n).apply(&mut model),
        }
        debug!(
            "model: {} variables, {} constraints",
            model.num_variables(),
            model.num_constraints()
        );

        let mut limits = SolveLimits::none()
            .with_optional_time_limit(request.time_limit.or(self.config.time_limit()));
        if let Some(cancel) = request.cancel {
            limits = limits.with_cancel(cancel);
        }

        let solution = self.adapter.solve(&model, &limits);
        let status = solution.status();
        if !status.has_assignment() {
            let result = TourResult::unsolved(status, started.elapsed(), solution.nodes_explored());
            info!(
                "finished: status={status} elapsed={:.3}s nodes={}",
                result.elapsed.as_secs_f64(),
                result.nodes_explored
            );
            return Ok(result);
        }

        let tour = TourReconstructor::new(self.config.epsilon())
            .reconstruct(&model, &solution, &distances)
            .map_err(|e| {
                error!("{} returned an undecodable assignment: {e}", self.adapter.name());
                e
            })?;

        let locations = distances.locations();
        let result = TourResult {
            status,
            tour: tour.order().iter().map(|&p| locations[p].clone()).collect(),
            total_distance: Some(tour.total_distance()),
            elapsed: started.elapsed(),
            nodes_explored: solution.nodes_explored(),
        };
        info!(
            "finished: status={status} distance={:.6} elapsed={:.3}s nodes={}",
            tour.total_distance(),
            result.elapsed.as_secs_f64(),
            result.nodes_explored
        );
        Ok(result)
    }

    /// Validates a raw table and solves it.
    ///
    /// # Errors
    ///
    /// [`TspError::Config`] if the table is malformed, plus everything
    /// [`solve`](Self::solve) returns.
    pub fn solve_table(
        &self,
        locations: Vec<Location>,
        rows: Vec<Vec<f64>>,
        subset: Option<Vec<String>>,
        time_limit: Option<Duration>,
    ) -> Result<TourResult> {
        let distances = DistanceMatrix::from_rows(locations, rows)?;
        let mut request = SolveRequest::new(&distances);
        if let Some(names) = subset {
            request = request.with_subset(names);
        }
        if let Some(limit) = time_limit {
            request = request.with_time_limit(limit);
        }
        self.solve(request)
    }
}

/// Maps subset names to matrix positions, keeping the caller's order.
fn resolve_subset(distances: &DistanceMatrix, names: &[String]) -> std::result::Result<Vec<usize>, ValidationError> {
    if names.len() < 2 {
        return Err(ValidationError::TooSmall(names.len()));
    }
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::Duplicate(name.clone()));
            }
            distances
                .position_of(name)
                .ok_or_else(|| ValidationError::UnknownLocation(name.clone()))
        })
        .collect()
}
