//! Integer programming formulation of the tour problem.
//!
//! - [`ModelBuilder`] — Arc variables, cost objective, degree constraints
//! - [`SubtourConstraintGenerator`] — DFJ subset bounds, streamed lazily, O(2ⁿ)
//! - [`MtzConstraintGenerator`] — MTZ ordering constraints, O(n²)
//! - [`Model`] — Variables and constraints handed to a solver adapter

mod builder;
mod model;
mod mtz;
mod subtour;
mod variable;

pub use builder::ModelBuilder;
pub use model::Model;
pub use mtz::MtzConstraintGenerator;
pub use subtour::{SubsetMasks, SubtourConstraintGenerator, MAX_SUBSET_LOCATIONS};
pub use variable::{
    Constraint, ConstraintFamily, DecisionVariable, Relation, VariableId, VariableKey, VariableKind,
};
