//! Distance matrices.
//!
//! Provides a dense, validated cost table keyed by location, with
//! restricted views for subset solves.

mod matrix;

pub use matrix::DistanceMatrix;
