//! Decision variables and linear constraints.

use std::fmt;

/// Position of a variable in its [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) usize);

impl VariableId {
    /// Zero-based position in the model's variable list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural identity of a variable.
///
/// Arc variables are keyed by their ordered index pair, so decoding a
/// solution never depends on how location names are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableKey {
    /// Binary arc variable x(from, to).
    Arc {
        /// Origin position.
        from: usize,
        /// Destination position.
        to: usize,
    },
    /// Continuous visiting-order variable u(location) used by MTZ.
    Order {
        /// Location position.
        location: usize,
    },
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arc { from, to } => write!(f, "x({from},{to})"),
            Self::Order { location } => write!(f, "u({location})"),
        }
    }
}

/// Domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableKind {
    /// Integer in {0, 1}.
    Binary,
    /// Real within closed bounds.
    Continuous {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
}

impl VariableKind {
    /// Lower and upper bound.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Binary => (0.0, 1.0),
            Self::Continuous { lower, upper } => (lower, upper),
        }
    }

    /// Returns `true` for integer-constrained variables.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Binary)
    }
}

/// A variable with its objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionVariable {
    /// Structural identity.
    pub key: VariableKey,
    /// Domain.
    pub kind: VariableKind,
    /// Objective coefficient (minimized).
    pub cost: f64,
}

/// Comparison between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr == rhs`
    Eq,
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
}

/// Which part of the formulation a constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFamily {
    /// Exactly one selected arc leaves the location.
    OutDegree(usize),
    /// Exactly one selected arc enters the location.
    InDegree(usize),
    /// DFJ bound for the subset encoded as a bitmask.
    SubtourElimination(u64),
    /// MTZ ordering link between two non-root locations.
    Ordering {
        /// Origin position.
        from: usize,
        /// Destination position.
        to: usize,
    },
}

/// A linear constraint `Σ coeff · var  (relation)  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Non-zero terms.
    pub terms: Vec<(VariableId, f64)>,
    /// Comparison.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
    /// Origin of the constraint.
    pub family: ConstraintFamily,
}

impl Constraint {
    /// Evaluates the left-hand side under an assignment.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(v, c)| c * values[v.0]).sum()
    }

    /// Returns `true` if the assignment satisfies the constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= tol,
            Relation::Le => lhs <= self.rhs + tol,
            Relation::Ge => lhs >= self.rhs - tol,
        }
    }
}

/// Variable id of arc (from, to) in an `n`-location model.
///
/// Arc variables come first, row-major with the diagonal skipped.
pub(crate) fn arc_id(n: usize, from: usize, to: usize) -> VariableId {
    debug_assert!(from != to && from < n && to < n);
    let col = if to < from { to } else { to - 1 };
    VariableId(from * (n - 1) + col)
}
