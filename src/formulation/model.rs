//! Integer programming model for one tour instance.

use std::borrow::Cow;

use super::subtour::SubtourConstraintGenerator;
use super::variable::{arc_id, Constraint, DecisionVariable, VariableId, VariableKey, VariableKind};

/// Minimization model over arc variables x(i, j) plus optional auxiliary
/// variables.
///
/// Polynomial constraint families (degree, MTZ ordering) are stored. The
/// exponential DFJ family is attached as a generator and streamed on demand
/// by [`Model::constraints`], so it is never held in memory as a whole.
///
/// A model is built per solve and is not shared between solves.
#[derive(Debug, Clone)]
pub struct Model {
    size: usize,
    variables: Vec<DecisionVariable>,
    constraints: Vec<Constraint>,
    subtour: Option<SubtourConstraintGenerator>,
}

impl Model {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            variables: Vec::with_capacity(size * size.saturating_sub(1)),
            constraints: Vec::new(),
            subtour: None,
        }
    }

    pub(crate) fn push_variable(&mut self, key: VariableKey, kind: VariableKind, cost: f64) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(DecisionVariable { key, kind, cost });
        id
    }

    pub(crate) fn push_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn attach_subtour(&mut self, generator: SubtourConstraintGenerator) {
        self.subtour = Some(generator);
    }

    /// Number of locations in the instance.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All variables, indexed by [`VariableId::index`].
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of arc variables, n(n − 1).
    pub fn num_arcs(&self) -> usize {
        self.size * (self.size - 1)
    }

    /// Id of arc variable x(from, to).
    ///
    /// Returns `None` for self pairs and out-of-range positions.
    pub fn arc(&self, from: usize, to: usize) -> Option<VariableId> {
        if from == to || from >= self.size || to >= self.size {
            return None;
        }
        Some(arc_id(self.size, from, to))
    }

    /// Iterates arc variables as `(from, to, id)`.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, VariableId)> + '_ {
        self.variables[..self.num_arcs()]
            .iter()
            .enumerate()
            .filter_map(|(idx, var)| match var.key {
                VariableKey::Arc { from, to } => Some((from, to, VariableId(idx))),
                VariableKey::Order { .. } => None,
            })
    }

    /// The stored (non-generated) constraints.
    pub fn stored_constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The attached DFJ generator, if any.
    pub fn subtour_generator(&self) -> Option<&SubtourConstraintGenerator> {
        self.subtour.as_ref()
    }

    /// Every constraint of the model: stored ones first, then the generated
    /// DFJ family one subset at a time.
    pub fn constraints(&self) -> impl Iterator<Item = Cow<'_, Constraint>> + '_ {
        let generated = self
            .subtour
            .iter()
            .flat_map(SubtourConstraintGenerator::constraints);
        self.constraints
            .iter()
            .map(Cow::Borrowed)
            .chain(generated.map(Cow::Owned))
    }

    /// Total constraint count, including generated constraints.
    pub fn num_constraints(&self) -> u64 {
        let generated = self.subtour.as_ref().map_or(0, |g| g.constraint_count());
        self.constraints.len() as u64 + generated
    }

    /// Objective value of an assignment.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(var, &v)| var.cost * v)
            .sum()
    }
}
