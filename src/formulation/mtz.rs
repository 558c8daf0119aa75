//! Miller–Tucker–Zemlin ordering constraints.
//!
//! A polynomial alternative to DFJ: every location except the root (0)
//! gets a continuous position u(i) ∈ [1, n − 1], and each arc between two
//! non-root locations forces the positions to increase along it:
//!
//! ```text
//! u(i) − u(j) + (n − 1) · x(i, j) ≤ n − 2      for i ≠ j, i, j ≥ 1
//! ```
//!
//! A cycle that avoids the root would need strictly increasing positions
//! all the way around, which is impossible. The relaxation is weaker than
//! DFJ, so branch-and-bound explores more nodes, but the model stays at
//! O(n²) constraints.
//!
//! # Reference
//!
//! Miller, C., Tucker, A., Zemlin, R. (1960). "Integer programming
//! formulation of traveling salesman problems", *Journal of the ACM* 7(4),
//! 326-329.

use super::model::Model;
use super::variable::{Constraint, ConstraintFamily, Relation, VariableId, VariableKey, VariableKind};

/// Adds MTZ ordering variables and constraints to a model.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::formulation::{ModelBuilder, MtzConstraintGenerator};
/// use u_exact_tsp::models::Location;
///
/// let dm = DistanceMatrix::from_data(
///     Location::from_names(["A", "B", "C"]),
///     vec![0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 2.0, 3.0, 0.0],
/// )
/// .unwrap();
/// let mut model = ModelBuilder::new(&dm).build();
/// MtzConstraintGenerator::new(3).apply(&mut model);
/// assert_eq!(model.num_variables(), 6 + 2);
/// assert_eq!(model.num_constraints(), 6 + 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MtzConstraintGenerator {
    size: usize,
}

impl MtzConstraintGenerator {
    /// Creates a generator for `size` locations.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Number of ordering constraints, (n − 1)(n − 2).
    pub fn constraint_count(&self) -> usize {
        let m = self.size.saturating_sub(1);
        m * m.saturating_sub(1)
    }

    /// Adds one order variable per non-root location and the ordering
    /// constraints between them.
    pub fn apply(self, model: &mut Model) {
        debug_assert_eq!(model.size(), self.size);
        let n = self.size;
        let span = (n - 1) as f64;

        let mut order: Vec<Option<VariableId>> = vec![None; n];
        for (location, slot) in order.iter_mut().enumerate().skip(1) {
            *slot = Some(model.push_variable(
                VariableKey::Order { location },
                VariableKind::Continuous {
                    lower: 1.0,
                    upper: span,
                },
                0.0,
            ));
        }

        for from in 1..n {
            for to in 1..n {
                if from == to {
                    continue;
                }
                let (Some(u_from), Some(u_to), Some(arc)) = (order[from], order[to], model.arc(from, to))
                else {
                    continue;
                };
                model.push_constraint(Constraint {
                    terms: vec![(u_from, 1.0), (u_to, -1.0), (arc, span)],
                    relation: Relation::Le,
                    rhs: span - 1.0,
                    family: ConstraintFamily::Ordering { from, to },
                });
            }
        }
    }
}
