//! Depth-first branch-and-bound over the `minilp` LP solver.
//!
//! # Algorithm
//!
//! 1. Stream every model constraint into one LP and solve the relaxation.
//! 2. Pop a node; prune it if its LP bound cannot beat the incumbent.
//! 3. If every binary variable is integral, the node becomes the incumbent.
//! 4. Otherwise branch on the most fractional binary variable by fixing it
//!    to 0 and to 1 on copies of the node's LP (the 1-branch is explored
//!    first, which tends to reach a complete tour quickly).
//!
//! Limits (time, node budget, cancel flag) are checked before every node and
//! periodically while constraints are streamed. An interrupted search
//! reports its incumbent as `Feasible`, or `TimedOut` if it has none.

use std::time::Instant;

use log::{debug, error, info, warn};
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};

use super::adapter::{Solution, SolveLimits, SolverAdapter};
use crate::formulation::{Model, Relation};
use crate::models::SolveStatus;

const DEFAULT_MAX_NODES: usize = 100_000;
const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;
const LIMIT_CHECK_INTERVAL: usize = 1024;

/// Exact mixed-integer solver: LP relaxations from `minilp`, branching and
/// bounding done here.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::distance::DistanceMatrix;
/// use u_exact_tsp::formulation::{ModelBuilder, SubtourConstraintGenerator};
/// use u_exact_tsp::models::{Location, SolveStatus};
/// use u_exact_tsp::solver::{BranchAndBoundSolver, SolveLimits, SolverAdapter};
///
/// let dm = DistanceMatrix::from_rows(
///     Location::from_names(["A", "B", "C"]),
///     vec![
///         vec![0.0, 1.0, 4.0],
///         vec![2.0, 0.0, 1.0],
///         vec![1.0, 5.0, 0.0],
///     ],
/// )
/// .unwrap();
/// let mut model = ModelBuilder::new(&dm).build();
/// SubtourConstraintGenerator::new(3).unwrap().apply(&mut model);
///
/// let solution = BranchAndBoundSolver::new().solve(&model, &SolveLimits::none());
/// assert_eq!(solution.status(), SolveStatus::Optimal);
/// assert!((solution.objective().unwrap() - 3.0).abs() < 1e-6); // A -> B -> C -> A
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    max_nodes: usize,
    integrality_tolerance: f64,
}

struct Incumbent {
    objective: f64,
    values: Vec<f64>,
}

impl BranchAndBoundSolver {
    /// Creates a solver with a 100 000 node budget and 1e-6 integrality
    /// tolerance.
    pub fn new() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
        }
    }

    /// Sets the maximum number of search nodes.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the tolerance under which a binary value counts as integral.
    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.integrality_tolerance = tol;
        self
    }

    /// Maximum number of search nodes.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Builds the LP relaxation. Returns `None` if interrupted.
    fn translate(
        &self,
        model: &Model,
        limits: &SolveLimits,
        started: Instant,
    ) -> Option<(Problem, Vec<Variable>)> {
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<Variable> = model
            .variables()
            .iter()
            .map(|v| problem.add_var(v.cost, v.kind.bounds()))
            .collect();

        for (k, constraint) in model.constraints().enumerate() {
            if k % LIMIT_CHECK_INTERVAL == 0 && limits.is_interrupted(started) {
                return None;
            }
            let mut expr = LinearExpr::empty();
            for &(var, coeff) in &constraint.terms {
                expr.add(vars[var.index()], coeff);
            }
            problem.add_constraint(expr, comparison(constraint.relation), constraint.rhs);
        }
        Some((problem, vars))
    }

    /// The binary variable farthest from integrality, if any.
    fn branching_variable(&self, model: &Model, vars: &[Variable], node: &minilp::Solution) -> Option<Variable> {
        let mut best: Option<(Variable, f64)> = None;
        for (&var, decl) in vars.iter().zip(model.variables()) {
            if !decl.kind.is_integer() {
                continue;
            }
            let value = node[var];
            let frac = (value - value.round()).abs();
            if frac <= self.integrality_tolerance {
                continue;
            }
            if best.map_or(true, |(_, f)| frac > f) {
                best = Some((var, frac));
            }
        }
        best.map(|(var, _)| var)
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverAdapter for BranchAndBoundSolver {
    fn name(&self) -> &str {
        "minilp-branch-and-bound"
    }

    fn solve(&self, model: &Model, limits: &SolveLimits) -> Solution {
        let started = Instant::now();

        let Some((problem, vars)) = self.translate(model, limits, started) else {
            warn!("interrupted while streaming constraints");
            return Solution::without_assignment(SolveStatus::TimedOut);
        };
        debug!(
            "LP relaxation: {} variables, {} constraints",
            vars.len(),
            model.num_constraints()
        );

        let root = match problem.solve() {
            Ok(root) => root,
            Err(err) => {
                let status = lp_failure_status(&err);
                info!("LP relaxation {status}: {err}");
                return Solution::without_assignment(status);
            }
        };
        debug!("root bound {:.6}", root.objective());

        let mut stack = vec![root];
        let mut incumbent: Option<Incumbent> = None;
        let mut nodes = 0usize;
        let mut interrupted = false;

        while let Some(node) = stack.pop() {
            if nodes >= self.max_nodes || limits.is_interrupted(started) {
                interrupted = true;
                break;
            }
            nodes += 1;

            let bound = node.objective();
            if !bound.is_finite() {
                error!("LP returned non-finite bound {bound} at node {nodes}");
                return Solution::without_assignment(SolveStatus::Error).with_nodes_explored(nodes);
            }
            if let Some(best) = &incumbent {
                if bound >= best.objective - 1e-9 * best.objective.abs().max(1.0) {
                    continue;
                }
            }

            match self.branching_variable(model, &vars, &node) {
                None => {
                    debug!("incumbent {bound:.6} at node {nodes}");
                    let values = vars.iter().map(|&v| node[v]).collect();
                    incumbent = Some(Incumbent {
                        objective: bound,
                        values,
                    });
                }
                Some(var) => {
                    let down = node.clone().fix_var(var, 0.0);
                    let up = node.fix_var(var, 1.0);
                    if let Ok(child) = down {
                        stack.push(child);
                    }
                    if let Ok(child) = up {
                        stack.push(child);
                    }
                }
            }
        }

        if interrupted {
            warn!(
                "search stopped after {nodes} nodes ({:.3}s)",
                started.elapsed().as_secs_f64()
            );
        }

        let solution = match (incumbent, interrupted) {
            (Some(best), false) => Solution::with_assignment(SolveStatus::Optimal, best.objective, best.values),
            (Some(best), true) => Solution::with_assignment(SolveStatus::Feasible, best.objective, best.values),
            (None, false) => Solution::without_assignment(SolveStatus::Infeasible),
            (None, true) => Solution::without_assignment(SolveStatus::TimedOut),
        };
        info!(
            "branch-and-bound {}: nodes={nodes} objective={:?} elapsed={:.3}s",
            solution.status(),
            solution.objective(),
            started.elapsed().as_secs_f64()
        );
        solution.with_nodes_explored(nodes)
    }
}

fn comparison(relation: Relation) -> ComparisonOp {
    match relation {
        Relation::Eq => ComparisonOp::Eq,
        Relation::Le => ComparisonOp::Le,
        Relation::Ge => ComparisonOp::Ge,
    }
}

#[allow(unreachable_patterns)]
fn lp_failure_status(err: &minilp::Error) -> SolveStatus {
    match err {
        minilp::Error::Infeasible => SolveStatus::Infeasible,
        minilp::Error::Unbounded => SolveStatus::Unbounded,
        _ => SolveStatus::Error,
    }
}
