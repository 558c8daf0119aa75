//! Assignment-problem core of the tour model.

use log::debug;

use super::model::Model;
use super::variable::{Constraint, ConstraintFamily, Relation, VariableKey, VariableKind};
use crate::distance::DistanceMatrix;

/// Builds arc variables, the cost objective, and degree constraints.
///
/// For n locations the model gets n(n − 1) binary arc variables x(i, j) with
/// objective Σ cost(i, j) · x(i, j), one out-degree equality
/// Σ_j x(i, j) = 1 per location and one in-degree equality Σ_i x(i, j) = 1
/// per location. On its own this is the assignment relaxation, which admits
/// disjoint subtours; add a subtour elimination family before solving.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::formulation::ModelBuilder;
/// use u_exact_tsp::models::Location;
///
/// let dm = DistanceMatrix::from_data(
///     Location::from_names(["A", "B", "C", "D"]),
///     vec![0.0; 16],
/// )
/// .unwrap();
/// let model = ModelBuilder::new(&dm).build();
/// assert_eq!(model.num_variables(), 12);
/// assert_eq!(model.num_constraints(), 8);
/// ```
pub struct ModelBuilder<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder over the given matrix.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Builds the assignment model.
    pub fn build(&self) -> Model {
        let n = self.distances.size();
        let mut model = Model::new(n);

        for from in 0..n {
            for to in 0..n {
                if from != to {
                    model.push_variable(
                        VariableKey::Arc { from, to },
                        VariableKind::Binary,
                        self.distances.cost(from, to),
                    );
                }
            }
        }

        for location in 0..n {
            let outgoing = (0..n)
                .filter(|&to| to != location)
                .filter_map(|to| model.arc(location, to))
                .map(|id| (id, 1.0))
                .collect();
            model.push_constraint(Constraint {
                terms: outgoing,
                relation: Relation::Eq,
                rhs: 1.0,
                family: ConstraintFamily::OutDegree(location),
            });
        }

        for location in 0..n {
            let incoming = (0..n)
                .filter(|&from| from != location)
                .filter_map(|from| model.arc(from, location))
                .map(|id| (id, 1.0))
                .collect();
            model.push_constraint(Constraint {
                terms: incoming,
                relation: Relation::Eq,
                rhs: 1.0,
                family: ConstraintFamily::InDegree(location),
            });
        }

        debug!(
            "assignment model: {} arc variables, {} degree constraints",
            model.num_variables(),
            model.stored_constraints().len()
        );
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn asymmetric() -> DistanceMatrix {
        DistanceMatrix::from_rows(
            Location::from_names(["A", "B", "C"]),
            vec![
                vec![0.0, 1.0, 2.0],
                vec![3.0, 0.0, 4.0],
                vec![5.0, 6.0, 0.0],
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_variable_count_and_costs() {
        let m = ModelBuilder::new(&asymmetric()).build();
        assert_eq!(m.num_variables(), 6);
        assert_eq!(m.num_arcs(), 6);
        let b_to_c = m.arc(1, 2).expect("arc");
        assert_eq!(m.variables()[b_to_c.index()].cost, 4.0);
        assert_eq!(
            m.variables()[b_to_c.index()].key,
            VariableKey::Arc { from: 1, to: 2 }
        );
        assert!(m.arc(1, 1).is_none());
        assert!(m.arc(0, 3).is_none());
    }

    #[test]
    fn test_degree_constraints() {
        let m = ModelBuilder::new(&asymmetric()).build();
        let cs = m.stored_constraints();
        assert_eq!(cs.len(), 6);
        for c in cs {
            assert_eq!(c.relation, Relation::Eq);
            assert_eq!(c.rhs, 1.0);
            assert_eq!(c.terms.len(), 2);
        }
        assert_eq!(cs[0].family, ConstraintFamily::OutDegree(0));
        assert_eq!(cs[3].family, ConstraintFamily::InDegree(0));
        assert!(m.subtour_generator().is_none());
    }

    #[test]
    fn test_objective_value() {
        let m = ModelBuilder::new(&asymmetric()).build();
        let mut values = vec![0.0; m.num_variables()];
        // A -> B -> C -> A = 1 + 4 + 5
        for (from, to) in [(0, 1), (1, 2), (2, 0)] {
            values[m.arc(from, to).expect("arc").index()] = 1.0;
        }
        assert!((m.objective_value(&values) - 10.0).abs() < 1e-10);
        assert!(m.constraints().all(|c| c.is_satisfied(&values, 1e-9)));
    }

    #[test]
    fn test_assignment_admits_subtours() {
        let dm = DistanceMatrix::from_data(Location::from_names(["A", "B", "C", "D"]), vec![1.0; 16])
            .expect("valid");
        let m = ModelBuilder::new(&dm).build();
        let mut values = vec![0.0; m.num_variables()];
        for (from, to) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
            values[m.arc(from, to).expect("arc").index()] = 1.0;
        }
        assert!(m.constraints().all(|c| c.is_satisfied(&values, 1e-9)));
    }

    #[test]
    fn test_arcs_iterator() {
        let m = ModelBuilder::new(&asymmetric()).build();
        let arcs: Vec<(usize, usize)> = m.arcs().map(|(f, t, _)| (f, t)).collect();
        assert_eq!(arcs, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
    }
}
