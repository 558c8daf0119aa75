//! Solution decoding.
//!
//! [`TourReconstructor`] turns a solver assignment into a [`Tour`](crate::models::Tour),
//! rejecting assignments that do not encode a single Hamiltonian cycle.

mod reconstructor;

pub use reconstructor::TourReconstructor;
