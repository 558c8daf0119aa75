//! Dantzig–Fulkerson–Johnson subtour elimination.
//!
//! For every subset S of locations with 2 ≤ |S| ≤ n − 1:
//!
//! ```text
//! Σ_{i∈S, j∈S, i≠j} x(i, j) ≤ |S| − 1
//! ```
//!
//! A cycle confined to S needs |S| selected arcs inside S, which the bound
//! forbids, so only a single n-cycle satisfies the degree constraints and
//! every subset bound together.
//!
//! # Complexity
//!
//! 2ⁿ − n − 2 constraints. Subsets are enumerated as bitmasks over
//! `1..2ⁿ − 1`, filtered by population count, one constraint at a time; the
//! power set is never materialized. Beyond roughly 15–20 locations the
//! count becomes impractical, which is why the orchestrator guards the
//! instance size before a generator is created.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R., Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *Operations Research* 2(4),
//! 393-410.

use super::model::Model;
use super::variable::{arc_id, Constraint, ConstraintFamily, Relation};

/// Largest instance whose subsets fit in a `u64` bitmask.
pub const MAX_SUBSET_LOCATIONS: usize = 63;

/// Streams DFJ subset constraints for an instance of a fixed size.
///
/// # Examples
///
/// ```
/// use u_exact_tsp::formulation::SubtourConstraintGenerator;
///
/// let generator = SubtourConstraintGenerator::new(4).unwrap();
/// assert_eq!(generator.constraint_count(), 10); // 2^4 - 4 - 2
/// assert_eq!(generator.constraints().count(), 10);
///
/// // Two locations admit no proper subset of size >= 2.
/// let pair = SubtourConstraintGenerator::new(2).unwrap();
/// assert_eq!(pair.constraints().count(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtourConstraintGenerator {
    size: usize,
}

impl SubtourConstraintGenerator {
    /// Creates a generator for `size` locations.
    ///
    /// Returns `None` if `size < 2` or `size > MAX_SUBSET_LOCATIONS`.
    pub fn new(size: usize) -> Option<Self> {
        if !(2..=MAX_SUBSET_LOCATIONS).contains(&size) {
            return None;
        }
        Some(Self { size })
    }

    /// Instance size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of constraints the generator yields: 2ⁿ − n − 2.
    pub fn constraint_count(&self) -> u64 {
        (1u64 << self.size) - self.size as u64 - 2
    }

    /// Bitmasks of every subset with 2 ≤ |S| ≤ n − 1.
    pub fn subsets(&self) -> SubsetMasks {
        SubsetMasks::new(self.size)
    }

    /// The constraint for the subset encoded by `mask`.
    pub fn constraint_for(&self, mask: u64) -> Constraint {
        let members: Vec<usize> = (0..self.size).filter(|&i| mask & (1u64 << i) != 0).collect();
        let mut terms = Vec::with_capacity(members.len() * members.len().saturating_sub(1));
        for &from in &members {
            for &to in &members {
                if from != to {
                    terms.push((arc_id(self.size, from, to), 1.0));
                }
            }
        }
        Constraint {
            terms,
            relation: Relation::Le,
            rhs: members.len() as f64 - 1.0,
            family: ConstraintFamily::SubtourElimination(mask),
        }
    }

    /// Streams every subset constraint.
    pub fn constraints(&self) -> impl Iterator<Item = Constraint> {
        let generator = *self;
        self.subsets().map(move |mask| generator.constraint_for(mask))
    }

    /// Attaches the family to a model built for the same instance size.
    pub fn apply(self, model: &mut Model) {
        debug_assert_eq!(model.size(), self.size);
        model.attach_subtour(self);
    }
}

/// Iterator over subset bitmasks with population count in `[2, n − 1]`.
#[derive(Debug, Clone)]
pub struct SubsetMasks {
    next: u64,
    last: u64,
    min_members: u32,
    max_members: u32,
}

impl SubsetMasks {
    fn new(size: usize) -> Self {
        Self {
            next: 1,
            last: (1u64 << size) - 2,
            min_members: 2,
            max_members: size as u32 - 1,
        }
    }
}

impl Iterator for SubsetMasks {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.next <= self.last {
            let mask = self.next;
            self.next += 1;
            let members = mask.count_ones();
            if members >= self.min_members && members <= self.max_members {
                return Some(mask);
            }
        }
        None
    }
}
