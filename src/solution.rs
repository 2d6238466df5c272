//! Candidate solutions and their attribute storage.
//!
//! A [`Solution`] bundles real-coded decision variables, objective values
//! (minimization form), constraint magnitudes, and a small attribute store
//! used by algorithms to stash transient per-solution data. The two
//! attributes every ranking component relies on — Pareto rank and crowding
//! distance — are stored as typed fields with explicit accessors; everything
//! else goes through the open [`AttributeValue`] map.

use std::collections::HashMap;

use crate::EPS;

/// A value stored in a solution's open attribute map.
///
/// Algorithm-specific metadata that is not rank or crowding distance lives
/// here under a string key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    /// An integer attribute.
    Int(i64),
    /// A floating-point attribute.
    Float(f64),
    /// A text attribute.
    Text(String),
    /// A boolean attribute.
    Flag(bool),
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

/// A candidate solution to a multi-objective problem.
///
/// Objective and constraint vector lengths are fixed at construction and
/// never resized; values are updated through index setters. All objectives
/// are **minimized**: lower values are better. A solution is *feasible* when
/// its aggregate constraint violation (sum of absolute magnitudes) is within
/// [`EPS`](crate::EPS).
///
/// `Clone` produces a fully independent deep copy, including the attribute
/// map. Equality compares variables, objectives, and constraints; attributes
/// are deliberately excluded so that ranking metadata never affects
/// containment checks.
///
/// # Example
///
/// ```
/// use pareto_archive::Solution;
///
/// let mut solution = Solution::new(2, 2, 0);
/// solution.set_objectives(&[1.0, 3.0]);
/// solution.set_variable(0, 0.5);
///
/// assert_eq!(solution.objective(1), 3.0);
/// assert!(solution.is_feasible());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    variables: Vec<f64>,
    objectives: Vec<f64>,
    constraints: Vec<f64>,
    rank: Option<usize>,
    crowding: Option<f64>,
    attributes: HashMap<String, AttributeValue>,
}

impl Solution {
    /// Creates a zero-filled solution with the given vector lengths.
    pub fn new(num_variables: usize, num_objectives: usize, num_constraints: usize) -> Self {
        Self {
            variables: vec![0.0; num_variables],
            objectives: vec![0.0; num_objectives],
            constraints: vec![0.0; num_constraints],
            rank: None,
            crowding: None,
            attributes: HashMap::new(),
        }
    }

    /// Creates a variable-free, constraint-free solution from objective
    /// values. Convenient for tests and for callers that only rank points.
    pub fn from_objectives(objectives: impl Into<Vec<f64>>) -> Self {
        Self {
            variables: Vec::new(),
            objectives: objectives.into(),
            constraints: Vec::new(),
            rank: None,
            crowding: None,
            attributes: HashMap::new(),
        }
    }

    /// The decision variables.
    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    /// The objective values, in minimization form.
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// The constraint violation magnitudes.
    pub fn constraints(&self) -> &[f64] {
        &self.constraints
    }

    /// The number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// The number of objectives.
    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// The number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the value of the objective at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn objective(&self, index: usize) -> f64 {
        self.objectives[index]
    }

    /// Returns the value of the variable at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn variable(&self, index: usize) -> f64 {
        self.variables[index]
    }

    /// Returns the constraint magnitude at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn constraint(&self, index: usize) -> f64 {
        self.constraints[index]
    }

    /// Sets the variable at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_variable(&mut self, index: usize, value: f64) {
        self.variables[index] = value;
    }

    /// Sets the objective at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_objective(&mut self, index: usize, value: f64) {
        self.objectives[index] = value;
    }

    /// Sets all objective values at once. The slice length must match the
    /// length fixed at construction.
    ///
    /// # Panics
    /// Panics on a length mismatch.
    pub fn set_objectives(&mut self, values: &[f64]) {
        assert_eq!(
            values.len(),
            self.objectives.len(),
            "objective vector length is fixed at construction"
        );
        self.objectives.copy_from_slice(values);
    }

    /// Sets the constraint magnitude at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_constraint(&mut self, index: usize, value: f64) {
        self.constraints[index] = value;
    }

    /// The aggregate constraint violation: the sum of absolute constraint
    /// magnitudes.
    pub fn constraint_violation(&self) -> f64 {
        self.constraints.iter().map(|c| c.abs()).sum()
    }

    /// Whether this solution satisfies all constraints (aggregate violation
    /// within [`EPS`](crate::EPS)).
    pub fn is_feasible(&self) -> bool {
        self.constraint_violation() <= EPS
    }

    /// The Pareto rank assigned by non-dominated sorting, if any.
    /// Rank 0 is the non-dominated front.
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Assigns the Pareto rank.
    pub fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }

    /// The crowding distance assigned by non-dominated sorting, if any.
    pub fn crowding(&self) -> Option<f64> {
        self.crowding
    }

    /// Assigns the crowding distance.
    pub fn set_crowding(&mut self, crowding: f64) {
        self.crowding = Some(crowding);
    }

    /// Looks up an attribute in the open attribute map.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Stores an attribute in the open attribute map, replacing any previous
    /// value under the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Whether an attribute with the given name exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    /// Removes all open attributes and clears rank and crowding.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
        self.rank = None;
        self.crowding = None;
    }

    /// The Euclidean distance between two solutions in objective space.
    ///
    /// # Panics
    /// Panics if the objective vector lengths differ.
    pub fn objective_distance(&self, other: &Solution) -> f64 {
        assert_eq!(
            self.objectives.len(),
            other.objectives.len(),
            "objective vector length mismatch"
        );

        self.objectives
            .iter()
            .zip(other.objectives.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// The Euclidean distance between two solutions in decision-variable
    /// space.
    ///
    /// # Panics
    /// Panics if the variable vector lengths differ.
    pub fn variable_distance(&self, other: &Solution) -> f64 {
        assert_eq!(
            self.variables.len(),
            other.variables.len(),
            "variable vector length mismatch"
        );

        self.variables
            .iter()
            .zip(other.variables.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
            && self.objectives == other.objectives
            && self.constraints == other.constraints
    }
}

// ============================================================================
// Tests
// ============================================================================
