//! Decodes a solver assignment into a closed tour.

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::ExtractionError;
use crate::formulation::Model;
use crate::models::Tour;
use crate::solver::Solution;

/// Turns the selected arc variables of a solution into a visiting order.
///
/// Every arc value must lie within `epsilon` of 0 or 1. The selected arcs
/// must give each location exactly one successor and one predecessor, and
/// following successors from position 0 must visit every location before
/// returning. The accumulated directed cost is checked against the solver
/// objective with a relative tolerance of `epsilon`.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::evaluation::TourReconstructor;
/// use u_exact_tsp::formulation::ModelBuilder;
/// use u_exact_tsp::models::{Location, SolveStatus};
/// use u_exact_tsp::solver::Solution;
///
/// let dm = DistanceMatrix::from_rows(
///     Location::from_names(["A", "B", "C"]),
///     vec![vec![0.0, 1.0, 2.0], vec![3.0, 0.0, 4.0], vec![5.0, 6.0, 0.0]],
/// )
/// .unwrap();
/// let model = ModelBuilder::new(&dm).build();
/// let mut values = vec![0.0; model.num_variables()];
/// for (from, to) in [(0, 2), (2, 1), (1, 0)] {
///     values[model.arc(from, to).unwrap().index()] = 1.0;
/// }
/// let solution = Solution::with_assignment(SolveStatus::Optimal, 11.0, values);
///
/// let tour = TourReconstructor::default().reconstruct(&model, &solution, &dm).unwrap();
/// assert_eq!(tour.order(), &[0, 2, 1]);
/// assert_eq!(tour.total_distance(), 11.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourReconstructor {
    epsilon: f64,
}

impl TourReconstructor {
    /// Creates a reconstructor with the given integrality tolerance.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Integrality and objective tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Extracts the tour encoded by `solution`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if `distances` and `model` differ in
    /// size, the status carries no assignment, or the assignment does not
    /// encode exactly one Hamiltonian cycle whose cost
    /// matches the objective.
    pub fn reconstruct(
        &self,
        model: &Model,
        solution: &Solution,
        distances: &DistanceMatrix,
    ) -> Result<Tour, ExtractionError> {
        if distances.size() != model.size() {
            return Err(ExtractionError::SizeMismatch {
                model: model.size(),
                matrix: distances.size(),
            });
        }
        if !solution.status().has_assignment() {
            return Err(ExtractionError::NoAssignment(solution.status()));
        }
        let values = solution.values();
        if values.len() != model.num_variables() {
            return Err(ExtractionError::AssignmentLength {
                expected: model.num_variables(),
                found: values.len(),
            });
        }

        let n = model.size();
        let mut successor = vec![None; n];
        let mut out_degree = vec![0usize; n];
        let mut in_degree = vec![0usize; n];

        for (from, to, id) in model.arcs() {
            let value = values[id.index()];
            if !value.is_finite() || (value > self.epsilon && value < 1.0 - self.epsilon) {
                return Err(ExtractionError::Fractional { from, to, value });
            }
            if value >= 1.0 - self.epsilon {
                successor[from] = Some(to);
                out_degree[from] += 1;
                in_degree[to] += 1;
            }
        }

        if let Some(location) = out_degree.iter().position(|&d| d != 1) {
            return Err(ExtractionError::OutDegree {
                location,
                count: out_degree[location],
            });
        }
        if let Some(location) = in_degree.iter().position(|&d| d != 1) {
            return Err(ExtractionError::InDegree {
                location,
                count: in_degree[location],
            });
        }

        let mut order = Vec::with_capacity(n);
        let mut total = 0.0;
        let mut current = 0;
        loop {
            order.push(current);
            let Some(next) = successor[current] else {
                return Err(ExtractionError::OutDegree {
                    location: current,
                    count: 0,
                });
            };
            total += distances.cost(current, next);
            if next == 0 {
                break;
            }
            if order.len() == n {
                // n arcs walked without closing; in-degrees rule this out
                return Err(ExtractionError::Subtour {
                    visited: order.len(),
                    expected: n,
                });
            }
            current = next;
        }
        if order.len() != n {
            return Err(ExtractionError::Subtour {
                visited: order.len(),
                expected: n,
            });
        }

        if log::log_enabled!(log::Level::Debug) {
            let arcs: Vec<String> = order
                .iter()
                .zip(order.iter().cycle().skip(1))
                .map(|(&from, &to)| format!("{}->{}", location_name(distances, from), location_name(distances, to)))
                .collect();
            debug!("selected arcs: {}", arcs.join(", "));
        }

        if let Some(objective) = solution.objective() {
            if (total - objective).abs() > self.epsilon * objective.abs().max(1.0) {
                return Err(ExtractionError::ObjectiveMismatch {
                    tour: total,
                    objective,
                });
            }
        }

        Ok(Tour::new(order, total))
    }
}

impl Default for TourReconstructor {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

fn location_name(distances: &DistanceMatrix, position: usize) -> &str {
    distances.location(position).map_or("?", |l| l.name())
}
