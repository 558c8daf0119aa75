//! # u-exact-tsp
//!
//! Exact travelling salesman solving for modestly sized instances: an integer
//! programming model with degree and subtour elimination constraints, solved
//! by branch-and-bound, decoded into a validated closed tour.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, Tour, TourResult, SolveStatus)
//! - [`distance`] — Validated, bounds-checked distance matrix with subset restriction
//! - [`formulation`] — Model construction (arc variables, degree constraints, DFJ and MTZ)
//! - [`solver`] — Solver adapter trait and the branch-and-bound backend
//! - [`evaluation`] — Tour reconstruction from solver assignments
//! - [`config`] — Solver configuration
//! - [`logging`] — `env_logger` setup
//!
//! ## Example
//!
//! ```
//! use u_exact_tsp::models::{Location, SolveStatus};
//! use u_exact_tsp::{SolverConfig, TspSolver};
//!
//! let solver = TspSolver::new(SolverConfig::default());
//! let result = solver
//!     .solve_table(
//!         Location::from_names(["A", "B", "C"]),
//!         vec![
//!             vec![0.0, 1.0, 4.0],
//!             vec![2.0, 0.0, 1.0],
//!             vec![1.0, 5.0, 0.0],
//!         ],
//!         None,
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert_eq!(result.names(), vec!["A", "B", "C"]);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod formulation;
pub mod logging;
pub mod models;
pub mod solver;
mod tsp;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::{Formulation, SolverConfig};
pub use error::{Result, TspError};
pub use tsp::{SolveRequest, TspSolver};
