//! Error types for table validation, subset selection, and tour extraction.
//!
//! Solver outcomes such as infeasibility or a time-out are not errors; they
//! are reported through [`SolveStatus`](crate::models::SolveStatus).

use thiserror::Error as ThisError;

use crate::models::SolveStatus;

/// Top-level error returned by the orchestrator and the public constructors.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum TspError {
    /// The distance table or solver configuration is malformed.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A location subset could not be resolved.
    #[error("invalid subset: {0}")]
    Validation(#[from] ValidationError),
    /// The instance is too large for subset enumeration.
    #[error(
        "{locations} locations exceed the subtour enumeration limit of {limit}; \
         raise max_locations or use the MTZ formulation"
    )]
    ResourceLimit {
        /// Instance size that was requested.
        locations: usize,
        /// Configured safety threshold.
        limit: usize,
    },
    /// A matrix lookup was out of range.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// The solver assignment did not decode into a single tour.
    #[error("tour extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Shorthand result type used across the crate.
pub type Result<T> = std::result::Result<T, TspError>;

/// Malformed distance tables and invalid solver settings.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ConfigError {
    /// The table has a different number of rows than locations.
    #[error("table has {rows} rows for {locations} locations")]
    SizeMismatch {
        /// Number of locations supplied.
        locations: usize,
        /// Number of rows in the table.
        rows: usize,
    },
    /// A flat table does not hold n² entries.
    #[error("flat table has {found} entries for {locations} locations, expected {expected}")]
    EntryCount {
        /// Number of locations supplied.
        locations: usize,
        /// Required entry count, n².
        expected: usize,
        /// Entries supplied.
        found: usize,
    },
    /// A row does not have one entry per location.
    #[error("row {row} has {found} entries, expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Required row length.
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// An off-diagonal cost is negative.
    #[error("cost from {from} to {to} is negative ({value})")]
    NegativeEntry {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// An off-diagonal cost is NaN or infinite.
    #[error("cost from {from} to {to} is not finite")]
    NonFiniteEntry {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
    },
    /// Two locations share a name.
    #[error("location name {0:?} appears more than once")]
    DuplicateName(String),
    /// A location's index does not match its position in the table.
    #[error("location {name:?} has index {index} but sits at position {position}")]
    IndexMismatch {
        /// Location name.
        name: String,
        /// Index carried by the location.
        index: usize,
        /// Position in the table.
        position: usize,
    },
    /// A tour needs at least two locations.
    #[error("at least 2 locations are required, got {0}")]
    TooFewLocations(usize),
    /// A solver setting is out of its valid range.
    #[error("{0}")]
    InvalidSetting(String),
}

/// Invalid subset selections.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    /// Fewer than two members were selected.
    #[error("a subset needs at least 2 locations, got {0}")]
    TooSmall(usize),
    /// The same member was selected twice.
    #[error("location {0:?} is selected more than once")]
    Duplicate(String),
    /// A member name is not part of the table.
    #[error("unknown location {0:?}")]
    UnknownLocation(String),
    /// A member index is outside the table.
    #[error("index {index} is out of range for {size} locations")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Table size.
        size: usize,
    },
}

/// Invalid matrix lookups.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum IndexError {
    /// One of the indices is outside the matrix.
    #[error("pair ({from}, {to}) is out of range for {size} locations")]
    OutOfRange {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// Matrix size.
        size: usize,
    },
    /// Self costs are not defined.
    #[error("no cost is defined from location {0} to itself")]
    SelfPair(usize),
}

/// Inconsistencies found while decoding a solver assignment into a tour.
///
/// These indicate a modeling or backend defect rather than bad user input.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ExtractionError {
    /// The solver returned a status that carries no assignment.
    #[error("status {0:?} carries no assignment")]
    NoAssignment(SolveStatus),
    /// The matrix and the model describe instances of different sizes.
    #[error("matrix has {matrix} locations but the model has {model}")]
    SizeMismatch {
        /// Locations in the model.
        model: usize,
        /// Locations in the matrix.
        matrix: usize,
    },
    /// The assignment does not cover the model's variables.
    #[error("assignment has {found} values for {expected} variables")]
    AssignmentLength {
        /// Variables in the model.
        expected: usize,
        /// Values in the assignment.
        found: usize,
    },
    /// An arc variable is neither near 0 nor near 1.
    #[error("arc ({from}, {to}) has fractional value {value}")]
    Fractional {
        /// Arc origin.
        from: usize,
        /// Arc destination.
        to: usize,
        /// Reported value.
        value: f64,
    },
    /// A location does not have exactly one selected outgoing arc.
    #[error("location {location} has {count} selected outgoing arcs")]
    OutDegree {
        /// Offending location.
        location: usize,
        /// Number of selected outgoing arcs.
        count: usize,
    },
    /// A location does not have exactly one selected incoming arc.
    #[error("location {location} has {count} selected incoming arcs")]
    InDegree {
        /// Offending location.
        location: usize,
        /// Number of selected incoming arcs.
        count: usize,
    },
    /// The successor walk closed before visiting every location.
    #[error("cycle closed after {visited} of {expected} locations")]
    Subtour {
        /// Locations visited before the walk returned to its start.
        visited: usize,
        /// Instance size.
        expected: usize,
    },
    /// The tour cost disagrees with the solver objective.
    #[error("tour cost {tour} differs from solver objective {objective}")]
    ObjectiveMismatch {
        /// Cost accumulated along the tour.
        tour: f64,
        /// Objective reported by the solver.
        objective: f64,
    },
}
