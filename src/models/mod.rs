//! Domain model types for exact tour solving.
//!
//! Provides named locations with optional map coordinates, the ordered
//! cyclic tour produced by the optimizer, and the result record handed to
//! rendering callers.

mod location;
mod result;
mod tour;

pub use location::{Coordinate, Location};
pub use result::{SolveStatus, TourResult};
pub use tour::Tour;
