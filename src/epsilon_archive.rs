//! Bounded Pareto-front approximation via epsilon-box dominance.
//!
//! [`EpsilonBoxDominanceArchive`] discretizes objective space into boxes of
//! width epsilon per objective and keeps at most one solution per
//! nondominated box, which bounds the archive size on any bounded front. The
//! archive also tracks epsilon-progress: how many insertions were accepted,
//! and how many of those displaced an existing member.
//!
//! # References
//!
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multi-Objective Optimization"
//! - Hadka & Reed (2013), "Borg: An Auto-Adaptive Many-Objective
//!   Evolutionary Computing Framework"

use crate::comparator::{BoxDominance, EpsilonBoxDominance};
use crate::error::Error;
use crate::population::{Cursor, Population};
use crate::solution::Solution;

/// A nondominated archive under the epsilon-box relation.
///
/// Two monotone counters expose epsilon-progress:
/// [`improvements`](EpsilonBoxDominanceArchive::improvements) counts every
/// accepted insertion;
/// [`dominating_improvements`](EpsilonBoxDominanceArchive::dominating_improvements)
/// counts accepted insertions that evicted at least one resident.
/// `improvements >= dominating_improvements` holds at all times.
///
/// # Example
///
/// ```
/// use pareto_archive::{EpsilonBoxDominanceArchive, Solution};
///
/// let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();
///
/// assert!(archive.add(Solution::from_objectives([0.0, 0.0])));
/// assert!(!archive.add(Solution::from_objectives([1.0, 1.0])));
///
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.improvements(), 1);
/// assert_eq!(archive.dominating_improvements(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonBoxDominanceArchive {
    population: Population,
    comparator: EpsilonBoxDominance,
    improvements: u64,
    dominating_improvements: u64,
}

impl EpsilonBoxDominanceArchive {
    /// Creates an archive broadcasting a single epsilon to all objectives.
    ///
    /// Fails if `epsilon` is not strictly positive.
    pub fn new(epsilon: f64) -> Result<Self, Error> {
        Ok(Self::with_comparator(EpsilonBoxDominance::new(epsilon)?))
    }

    /// Creates an archive with one epsilon per objective.
    ///
    /// Fails if the vector is empty or any epsilon is not strictly positive.
    pub fn with_epsilons(epsilons: Vec<f64>) -> Result<Self, Error> {
        Ok(Self::with_comparator(EpsilonBoxDominance::with_epsilons(
            epsilons,
        )?))
    }

    /// Creates an archive from an existing comparator.
    pub fn with_comparator(comparator: EpsilonBoxDominance) -> Self {
        Self {
            population: Population::new(),
            comparator,
            improvements: 0,
            dominating_improvements: 0,
        }
    }

    /// The epsilon-box comparator used by this archive.
    pub fn comparator(&self) -> &EpsilonBoxDominance {
        &self.comparator
    }

    /// Attempts to insert a candidate.
    ///
    /// Residents whose box (or same-box position) is dominated by the
    /// candidate are evicted; the candidate is rejected when any resident
    /// dominates it under the epsilon-box relation. Counters update only on
    /// acceptance.
    pub fn add(&mut self, candidate: Solution) -> bool {
        let mut evicted = false;
        let mut index = 0;

        while index < self.population.len() {
            match self.comparator.compare(&candidate, &self.population[index]) {
                BoxDominance::Dominates { .. } => {
                    self.population.remove(index);
                    evicted = true;
                }
                BoxDominance::Dominated { .. } => return false,
                BoxDominance::Nondominated => index += 1,
            }
        }

        self.population.add(candidate);
        self.improvements += 1;
        if evicted {
            self.dominating_improvements += 1;
        }

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

    /// The number of accepted insertions so far. Monotone non-decreasing.
    pub fn improvements(&self) -> u64 {
        self.improvements
    }

    /// The number of accepted insertions that evicted at least one resident.
    /// Monotone non-decreasing and never greater than
    /// [`improvements`](EpsilonBoxDominanceArchive::improvements).
    pub fn dominating_improvements(&self) -> u64 {
        self.dominating_improvements
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Whether the archive is empty.
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

    /// Removes all members. The progress counters are retained.
    pub fn clear(&mut self) {
        self.population.clear();
    }

    /// Read access to the underlying population.
    pub fn as_population(&self) -> &Population {
        &self.population
    }
}

impl std::ops::Index<usize> for EpsilonBoxDominanceArchive {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.population[index]
    }
}

impl<'a> IntoIterator for &'a EpsilonBoxDominanceArchive {
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

    #[test]
    fn test_rejects_dominated_candidates() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();

        assert!(archive.add(point(&[0.0, 0.0])));
        assert!(!archive.add(point(&[1.0, 1.0])));
        assert!(!archive.add(point(&[1.0, 0.0])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.improvements(), 1);
        assert_eq!(archive.dominating_improvements(), 0);
        assert_eq!(archive[0].objectives(), &[0.0, 0.0]);
    }

    #[test]
    fn test_dominating_candidates_evict() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();

        assert!(archive.add(point(&[1.0, 1.0])));
        assert!(archive.add(point(&[1.0, 0.0])));
        assert!(archive.add(point(&[0.0, 0.0])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.improvements(), 3);
        assert_eq!(archive.dominating_improvements(), 2);
        assert_eq!(archive[0].objectives(), &[0.0, 0.0]);
    }

    #[test]
    fn test_nondominated_boxes_coexist() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();

        assert!(archive.add(point(&[1.0, 1.0])));
        assert!(archive.add(point(&[0.25, 0.75])));
        assert!(archive.add(point(&[0.75, 0.25])));

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.improvements(), 3);
        assert_eq!(archive.dominating_improvements(), 1);
    }

    #[test]
    fn test_same_box_replacement_counts_as_improvement() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();

        assert!(archive.add(point(&[1.0, 1.0])));
        // box (0,0) dominates box (2,2): eviction
        assert!(archive.add(point(&[0.4, 0.4])));
        // same box as (0.4,0.4), closer to its lower corner: eviction
        assert!(archive.add(point(&[0.3, 0.3])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.improvements(), 3);
        assert_eq!(archive.dominating_improvements(), 2);
        assert_eq!(archive[0].objectives(), &[0.3, 0.3]);
    }

    #[test]
    fn test_same_box_incumbent_survives_tradeoff() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.5).unwrap();

        assert!(archive.add(point(&[1.0, 1.0])));
        assert!(archive.add(point(&[0.24, 0.26])));
        // same box, equidistant trade-off but farther from the lower corner
        assert!(!archive.add(point(&[0.26, 0.24])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].objectives(), &[0.24, 0.26]);
    }

    #[test]
    fn test_per_objective_epsilons() {
        let mut archive =
            EpsilonBoxDominanceArchive::with_epsilons(vec![1.0, 0.1]).unwrap();

        // boxes (1,0) and (0,5): a trade-off across axes
        assert!(archive.add(point(&[1.5, 0.05])));
        assert!(archive.add(point(&[0.5, 0.55])));
        assert_eq!(archive.len(), 2);

        // box (0,3): same wide objective-0 box as (0.5,0.55) despite the
        // 0.4 gap, and a better objective-1 box, so that member is evicted
        assert!(archive.add(point(&[0.9, 0.35])));
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.dominating_improvements(), 1);
    }

    #[test]
    fn test_counter_monotonicity_over_sequence() {
        let mut archive = EpsilonBoxDominanceArchive::new(0.1).unwrap();

        let sequence = [
            [0.25, 0.25],
            [0.10, 0.10],
            [0.24, 0.24],
            [0.09, 0.50],
            [0.50, 0.50],
            [0.05, 0.05],
        ];

        let mut last_improvements = 0;
        let mut last_dominating = 0;

        for objectives in sequence {
            archive.add(point(&objectives));

            assert!(archive.improvements() >= last_improvements);
            assert!(archive.dominating_improvements() >= last_dominating);
            assert!(archive.improvements() >= archive.dominating_improvements());

            last_improvements = archive.improvements();
            last_dominating = archive.dominating_improvements();
        }
    }

    #[test]
    fn test_invalid_epsilon_fails_construction() {
        assert_eq!(
            EpsilonBoxDominanceArchive::new(0.0).unwrap_err(),
            Error::NonPositiveEpsilon(0.0)
        );
        assert_eq!(
            EpsilonBoxDominanceArchive::with_epsilons(vec![0.5, -0.5]).unwrap_err(),
            Error::NonPositiveEpsilon(-0.5)
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn points() -> impl Strategy<Value = Vec<[f64; 2]>> {
            proptest::collection::vec(
                (0.0f64..2.0, 0.0f64..2.0).prop_map(|(a, b)| [a, b]),
                0..40,
            )
        }

        proptest! {
            #[test]
            fn improvements_dominate_counter_ordering(points in points()) {
                let mut archive = EpsilonBoxDominanceArchive::new(0.25).unwrap();
                let mut accepted = 0u64;

                for p in points {
                    if archive.add(Solution::from_objectives(p.to_vec())) {
                        accepted += 1;
                    }
                    prop_assert!(archive.improvements() >= archive.dominating_improvements());
                }

                prop_assert_eq!(archive.improvements(), accepted);
            }

            #[test]
            fn one_member_per_occupied_box(points in points()) {
                let mut archive = EpsilonBoxDominanceArchive::new(0.25).unwrap();
                for p in points {
                    archive.add(Solution::from_objectives(p.to_vec()));
                }

                let boxes: Vec<Vec<i64>> = archive
                    .iter()
                    .map(|s| {
                        s.objectives()
                            .iter()
                            .enumerate()
                            .map(|(i, v)| (v / archive.comparator().epsilon(i)).floor() as i64)
                            .collect()
                    })
                    .collect();

                for (i, a) in boxes.iter().enumerate() {
                    for b in boxes.iter().skip(i + 1) {
                        prop_assert_ne!(a, b);
                    }
                }
            }
        }
    }
}
