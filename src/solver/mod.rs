//! Mixed-integer solving behind an adapter trait.
//!
//! - [`SolverAdapter`] — Blocking `solve(model, limits) -> Solution` contract
//! - [`BranchAndBoundSolver`] — Exact backend: `minilp` LP relaxations plus
//!   depth-first branch-and-bound
//! - [`SolveLimits`] / [`CancelFlag`] — Time limit and cooperative cancellation

mod adapter;
mod branch_bound;

pub use adapter::{CancelFlag, Solution, SolveLimits, SolverAdapter};
pub use branch_bound::BranchAndBoundSolver;
