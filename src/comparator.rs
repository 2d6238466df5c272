//! Dominance relations.
//!
//! Two comparators are provided: [`ParetoDominance`], the standard
//! constraint-aware Pareto relation, and [`EpsilonBoxDominance`], which
//! discretizes objective space into boxes of width epsilon per objective and
//! compares box coordinates instead of raw points. Both are pure functions of
//! their inputs.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm:
//!   NSGA-II"
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multi-Objective Optimization"

use crate::error::Error;
use crate::solution::Solution;
use crate::EPS;

/// Outcome of comparing two solutions under a dominance relation.
///
/// The relation is read left-to-right: `Dominates` means the first solution
/// dominates the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dominance {
    /// The first solution dominates the second.
    Dominates,
    /// The first solution is dominated by the second.
    Dominated,
    /// Neither solution dominates the other.
    Nondominated,
}

impl Dominance {
    /// The same relation viewed from the other solution's side.
    pub fn reversed(self) -> Dominance {
        match self {
            Dominance::Dominates => Dominance::Dominated,
            Dominance::Dominated => Dominance::Dominates,
            Dominance::Nondominated => Dominance::Nondominated,
        }
    }
}

/// Constraint-aware Pareto dominance (minimization).
///
/// Constraint violations are resolved before objectives are consulted:
///
/// 1. A feasible solution dominates an infeasible one.
/// 2. Between two infeasible solutions, the one with strictly smaller
///    aggregate violation dominates; equal violations are nondominated.
/// 3. Between two feasible solutions, standard Pareto dominance applies:
///    no worse in every objective and strictly better in at least one, with
///    [`EPS`](crate::EPS) near-equality rather than exact float comparison.
///
/// # Example
///
/// ```
/// use pareto_archive::{Dominance, ParetoDominance, Solution};
///
/// let comparator = ParetoDominance;
/// let a = Solution::from_objectives([1.0, 1.0]);
/// let b = Solution::from_objectives([2.0, 1.0]);
///
/// assert_eq!(comparator.compare(&a, &b), Dominance::Dominates);
/// assert_eq!(comparator.compare(&b, &a), Dominance::Dominated);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoDominance;

impl ParetoDominance {
    /// Compares two solutions.
    ///
    /// # Panics
    /// Panics if the objective vector lengths differ.
    pub fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        assert_eq!(
            a.num_objectives(),
            b.num_objectives(),
            "objective vector length mismatch"
        );

        if let Some(dominance) = compare_constraints(a, b) {
            return dominance;
        }

        let mut a_better = false;
        let mut b_better = false;

        for (&va, &vb) in a.objectives().iter().zip(b.objectives().iter()) {
            if (va - vb).abs() <= EPS {
                continue;
            }

            if va < vb {
                a_better = true;
            } else {
                b_better = true;
            }

            if a_better && b_better {
                return Dominance::Nondominated;
            }
        }

        match (a_better, b_better) {
            (true, false) => Dominance::Dominates,
            (false, true) => Dominance::Dominated,
            _ => Dominance::Nondominated,
        }
    }
}

/// Resolves dominance on constraint violation alone, or `None` when both
/// solutions are feasible and the objectives must decide.
fn compare_constraints(a: &Solution, b: &Solution) -> Option<Dominance> {
    let va = a.constraint_violation();
    let vb = b.constraint_violation();
    let a_feasible = va <= EPS;
    let b_feasible = vb <= EPS;

    match (a_feasible, b_feasible) {
        (true, true) => None,
        (true, false) => Some(Dominance::Dominates),
        (false, true) => Some(Dominance::Dominated),
        (false, false) => {
            if (va - vb).abs() <= EPS {
                Some(Dominance::Nondominated)
            } else if va < vb {
                Some(Dominance::Dominates)
            } else {
                Some(Dominance::Dominated)
            }
        }
    }
}

/// Outcome of an epsilon-box comparison.
///
/// `same_box` is `true` when both solutions map to the same epsilon-box and
/// the winner was decided by the same-box tie-break rather than by box
/// dominance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxDominance {
    /// The first solution wins: its box dominates, or it sits closer to the
    /// shared box's lower corner.
    Dominates {
        /// Whether both solutions occupy the same epsilon-box.
        same_box: bool,
    },
    /// The second solution wins.
    Dominated {
        /// Whether both solutions occupy the same epsilon-box.
        same_box: bool,
    },
    /// The boxes are mutually nondominated.
    Nondominated,
}

/// Additive epsilon-box dominance (minimization).
///
/// Objective space is discretized into boxes: objective `i` of a point maps
/// to box coordinate `floor(value / epsilon_i)`. Box coordinates are compared
/// like objective vectors; when both points land in the same box, the point
/// with the smaller Euclidean distance to the box's lower corner wins (an
/// exact distance tie favors the second argument, i.e. the incumbent).
///
/// Constraint violations are resolved first, exactly as in
/// [`ParetoDominance`].
///
/// A solution with more objectives than defined epsilons reuses the last
/// epsilon for the extra objectives.
#[derive(Debug, Clone)]
pub struct EpsilonBoxDominance {
    epsilons: Vec<f64>,
}

impl EpsilonBoxDominance {
    /// Creates a comparator broadcasting a single epsilon to all objectives.
    pub fn new(epsilon: f64) -> Result<Self, Error> {
        Self::with_epsilons(vec![epsilon])
    }

    /// Creates a comparator with one epsilon per objective.
    pub fn with_epsilons(epsilons: Vec<f64>) -> Result<Self, Error> {
        if epsilons.is_empty() {
            return Err(Error::EmptyEpsilons);
        }
        for &epsilon in &epsilons {
            if !(epsilon > 0.0) {
                return Err(Error::NonPositiveEpsilon(epsilon));
            }
        }
        Ok(Self { epsilons })
    }

    /// The defined epsilon values.
    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    /// The epsilon used for the given objective; objectives past the defined
    /// values reuse the last one.
    pub fn epsilon(&self, objective: usize) -> f64 {
        self.epsilons[objective.min(self.epsilons.len() - 1)]
    }

    /// Compares two solutions under the epsilon-box relation.
    ///
    /// # Panics
    /// Panics if the objective vector lengths differ.
    pub fn compare(&self, a: &Solution, b: &Solution) -> BoxDominance {
        assert_eq!(
            a.num_objectives(),
            b.num_objectives(),
            "objective vector length mismatch"
        );

        match compare_constraints(a, b) {
            Some(Dominance::Dominates) => return BoxDominance::Dominates { same_box: false },
            Some(Dominance::Dominated) => return BoxDominance::Dominated { same_box: false },
            Some(Dominance::Nondominated) => return BoxDominance::Nondominated,
            None => {}
        }

        let mut a_better = false;
        let mut b_better = false;

        for i in 0..a.num_objectives() {
            let epsilon = self.epsilon(i);
            let box_a = (a.objective(i) / epsilon).floor();
            let box_b = (b.objective(i) / epsilon).floor();

            if box_a < box_b {
                a_better = true;
            } else if box_b < box_a {
                b_better = true;
            }

            if a_better && b_better {
                return BoxDominance::Nondominated;
            }
        }

        if a_better {
            BoxDominance::Dominates { same_box: false }
        } else if b_better {
            BoxDominance::Dominated { same_box: false }
        } else {
            // same box: the point closer to the box's lower corner wins
            let mut dist_a = 0.0;
            let mut dist_b = 0.0;

            for i in 0..a.num_objectives() {
                let epsilon = self.epsilon(i);
                let corner_a = (a.objective(i) / epsilon).floor() * epsilon;
                let corner_b = (b.objective(i) / epsilon).floor() * epsilon;

                dist_a += (a.objective(i) - corner_a).powi(2);
                dist_b += (b.objective(i) - corner_b).powi(2);
            }

            if dist_a < dist_b {
                BoxDominance::Dominates { same_box: true }
            } else {
                BoxDominance::Dominated { same_box: true }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
