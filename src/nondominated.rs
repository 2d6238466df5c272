//! The Pareto-nondominated population.
//!
//! [`NondominatedPopulation`] keeps every pair of contained solutions
//! mutually nondominated: inserting a candidate evicts everything it
//! dominates and is rejected when any resident dominates it. Duplicate
//! solutions are handled according to a configurable [`DuplicateMode`].

use crate::comparator::{Dominance, ParetoDominance};
use crate::population::{Cursor, Population};
use crate::solution::Solution;
use crate::EPS;

/// How duplicate solutions are handled on insertion.
///
/// Duplicates are detected by Euclidean distance below [`EPS`](crate::EPS)
/// in objective space (and, for
/// [`AllowDuplicateObjectives`](DuplicateMode::AllowDuplicateObjectives),
/// decision-variable space as well).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicateMode {
    /// Reject a candidate whose objective vector is already present,
    /// regardless of its decision variables. The default.
    #[default]
    NoDuplicateObjectives,
    /// Reject only candidates that duplicate both the decision variables and
    /// the objectives of a resident.
    AllowDuplicateObjectives,
    /// Never reject on duplication; only dominance filters candidates.
    AllowDuplicates,
}

/// A population whose members are pairwise mutually nondominated.
///
/// `add` is the sole mutation entry point used by algorithm drivers: it
/// returns `false` when the candidate is dominated (or rejected as a
/// duplicate), which is an ordinary algorithmic outcome, not an error.
///
/// # Example
///
/// ```
/// use pareto_archive::{NondominatedPopulation, Solution};
///
/// let mut archive = NondominatedPopulation::new();
/// assert!(archive.add(Solution::from_objectives([2.0, 2.0])));
/// assert!(archive.add(Solution::from_objectives([1.0, 3.0])));
///
/// // dominates (2,2), which is evicted
/// assert!(archive.add(Solution::from_objectives([1.5, 1.5])));
/// assert_eq!(archive.len(), 2);
///
/// // dominated by (1.5,1.5): rejected
/// assert!(!archive.add(Solution::from_objectives([3.0, 3.0])));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NondominatedPopulation {
    population: Population,
    comparator: ParetoDominance,
    duplicate_mode: DuplicateMode,
}

impl NondominatedPopulation {
    /// Creates an empty population with the default duplicate mode
    /// ([`DuplicateMode::NoDuplicateObjectives`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with the given duplicate mode.
    pub fn with_duplicate_mode(duplicate_mode: DuplicateMode) -> Self {
        Self {
            population: Population::new(),
            comparator: ParetoDominance,
            duplicate_mode,
        }
    }

    /// The configured duplicate mode.
    pub fn duplicate_mode(&self) -> DuplicateMode {
        self.duplicate_mode
    }

    /// Attempts to insert a candidate, maintaining pairwise nondominance.
    ///
    /// Residents dominated by the candidate are removed. Returns `false`
    /// when a resident dominates the candidate or the duplicate mode rejects
    /// it, leaving the population unchanged in the dominated case.
    pub fn add(&mut self, candidate: Solution) -> bool {
        let mut index = 0;

        while index < self.population.len() {
            match self.comparator.compare(&candidate, &self.population[index]) {
                Dominance::Dominates => {
                    self.population.remove(index);
                }
                Dominance::Dominated => return false,
                Dominance::Nondominated => {
                    if self.is_duplicate(&candidate, &self.population[index]) {
                        return false;
                    }
                    index += 1;
                }
            }
        }

        self.population.add(candidate);
        true
    }

    /// Inserts every solution from the iterator; returns the number
    /// accepted.
    pub fn add_all(&mut self, solutions: impl IntoIterator<Item = Solution>) -> usize {
        solutions
            .into_iter()
            .map(|solution| self.add(solution))
            .filter(|&accepted| accepted)
            .count()
    }

    fn is_duplicate(&self, candidate: &Solution, resident: &Solution) -> bool {
        match self.duplicate_mode {
            DuplicateMode::NoDuplicateObjectives => {
                candidate.objective_distance(resident) < EPS
            }
            DuplicateMode::AllowDuplicateObjectives => {
                candidate.objective_distance(resident) < EPS
                    && candidate.variable_distance(resident) < EPS
            }
            DuplicateMode::AllowDuplicates => false,
        }
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// The member at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.population.get(index)
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.population.iter()
    }

    /// Creates a fail-fast cursor over the members.
    pub fn cursor(&self) -> Cursor {
        self.population.cursor()
    }

    /// Whether a member equal to `solution` is present.
    pub fn contains(&self, solution: &Solution) -> bool {
        self.population.contains(solution)
    }

    /// Removes and returns the member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        self.population.remove(index)
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.population.clear();
    }

    /// Read access to the underlying population.
    pub fn as_population(&self) -> &Population {
        &self.population
    }
}

impl std::ops::Index<usize> for NondominatedPopulation {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.population[index]
    }
}

impl<'a> IntoIterator for &'a NondominatedPopulation {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn point(objectives: &[f64]) -> Solution {
        Solution::from_objectives(objectives.to_vec())
    }

    fn assert_pairwise_nondominated(population: &NondominatedPopulation) {
        let comparator = ParetoDominance;
        for a in population.iter() {
            for b in population.iter() {
                assert_eq!(comparator.compare(a, b), Dominance::Nondominated);
            }
        }
    }

    #[test]
    fn test_dominating_candidate_evicts_residents() {
        let mut archive = NondominatedPopulation::new();
        assert!(archive.add(point(&[2.0, 2.0])));
        assert!(archive.add(point(&[3.0, 1.0])));
        assert!(archive.add(point(&[1.0, 1.0])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].objectives(), &[1.0, 1.0]);
    }

    #[test]
    fn test_dominated_candidate_rejected_and_unchanged() {
        let mut archive = NondominatedPopulation::new();
        assert!(archive.add(point(&[1.0, 1.0])));

        let before: Vec<Vec<f64>> =
            archive.iter().map(|s| s.objectives().to_vec()).collect();
        assert!(!archive.add(point(&[2.0, 2.0])));
        let after: Vec<Vec<f64>> =
            archive.iter().map(|s| s.objectives().to_vec()).collect();

        assert_eq!(before, after);

        // rejection is idempotent
        assert!(!archive.add(point(&[2.0, 2.0])));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_nondominated_candidates_accumulate() {
        let mut archive = NondominatedPopulation::new();
        assert!(archive.add(point(&[1.0, 3.0])));
        assert!(archive.add(point(&[2.0, 2.0])));
        assert!(archive.add(point(&[3.0, 1.0])));

        assert_eq!(archive.len(), 3);
        assert_pairwise_nondominated(&archive);
    }

    #[test]
    fn test_no_duplicate_objectives_rejects_same_point() {
        // default mode: the same objective vector with different variables
        // is still rejected
        let mut archive = NondominatedPopulation::new();

        let mut first = Solution::new(1, 2, 0);
        first.set_objectives(&[1.0, 2.0]);
        first.set_variable(0, 0.25);

        let mut second = Solution::new(1, 2, 0);
        second.set_objectives(&[1.0, 2.0]);
        second.set_variable(0, 0.75);

        assert!(archive.add(first));
        assert!(!archive.add(second));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_allow_duplicate_objectives_keeps_distinct_variables() {
        let mut archive =
            NondominatedPopulation::with_duplicate_mode(DuplicateMode::AllowDuplicateObjectives);

        let mut first = Solution::new(1, 2, 0);
        first.set_objectives(&[1.0, 2.0]);
        first.set_variable(0, 0.25);

        let mut second = Solution::new(1, 2, 0);
        second.set_objectives(&[1.0, 2.0]);
        second.set_variable(0, 0.75);

        let mut exact_copy = Solution::new(1, 2, 0);
        exact_copy.set_objectives(&[1.0, 2.0]);
        exact_copy.set_variable(0, 0.25);

        assert!(archive.add(first));
        assert!(archive.add(second));
        assert!(!archive.add(exact_copy));
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_allow_duplicates_keeps_everything_nondominated() {
        let mut archive =
            NondominatedPopulation::with_duplicate_mode(DuplicateMode::AllowDuplicates);

        assert!(archive.add(point(&[1.0, 2.0])));
        assert!(archive.add(point(&[1.0, 2.0])));
        assert!(archive.add(point(&[1.0, 2.0])));
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_infeasible_resident_evicted_by_feasible_candidate() {
        let mut archive = NondominatedPopulation::new();

        let mut infeasible = Solution::new(0, 2, 1);
        infeasible.set_objectives(&[0.0, 0.0]);
        infeasible.set_constraint(0, 5.0);

        assert!(archive.add(infeasible));
        assert!(archive.add(point(&[9.0, 9.0])));

        assert_eq!(archive.len(), 1);
        assert!(archive[0].is_feasible());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn points() -> impl Strategy<Value = Vec<[f64; 2]>> {
            proptest::collection::vec(
                (0.0f64..10.0, 0.0f64..10.0).prop_map(|(a, b)| [a, b]),
                0..30,
            )
        }

        proptest! {
            #[test]
            fn invariant_holds_after_every_add(points in points()) {
                let mut archive = NondominatedPopulation::new();

                for p in points {
                    archive.add(Solution::from_objectives(p.to_vec()));
                    assert_pairwise_nondominated(&archive);
                }
            }

            #[test]
            fn rejected_dominated_candidate_changes_nothing(points in points()) {
                prop_assume!(!points.is_empty());
                let mut archive = NondominatedPopulation::new();
                for p in &points {
                    archive.add(Solution::from_objectives(p.to_vec()));
                }
                prop_assume!(!archive.is_empty());

                // strictly worse than an arbitrary resident in every objective
                let resident = archive[0].objectives().to_vec();
                let dominated =
                    Solution::from_objectives([resident[0] + 1.0, resident[1] + 1.0]);

                let size = archive.len();
                prop_assert!(!archive.add(dominated));
                prop_assert_eq!(archive.len(), size);
            }
        }
    }
}
