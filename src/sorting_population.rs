//! Rank/crowding-aware population for generational replacement.
//!
//! [`NondominatedSortingPopulation`] keeps the `rank` and `crowding`
//! attributes of its members current by re-running
//! [`NondominatedSorting`](crate::NondominatedSorting) lazily after
//! structural changes, and offers two truncation strategies:
//!
//! - [`truncate`](NondominatedSortingPopulation::truncate): one stale
//!   crowding snapshot, one stable sort, drop the tail.
//! - [`prune`](NondominatedSortingPopulation::prune): remove the single
//!   worst member at a time, *recomputing* the affected front's crowding
//!   after each removal.
//!
//! The two produce different survivors whenever a front is only partially
//! discarded, because removing a member changes its neighbors' crowding.

use std::cmp::Ordering;

use log::debug;

use crate::population::Population;
use crate::solution::Solution;
use crate::sorting::NondominatedSorting;

/// Orders by rank ascending, then crowding descending; equal keys keep
/// insertion order under a stable sort.
fn rank_then_crowding(a: &Solution, b: &Solution) -> Ordering {
    let rank_a = a.rank().unwrap_or(usize::MAX);
    let rank_b = b.rank().unwrap_or(usize::MAX);

    rank_a.cmp(&rank_b).then_with(|| {
        let crowding_a = a.crowding().unwrap_or(0.0);
        let crowding_b = b.crowding().unwrap_or(0.0);
        crowding_b.partial_cmp(&crowding_a).unwrap_or(Ordering::Equal)
    })
}

/// Orders by crowding descending (most crowded last to be discarded).
fn crowding_descending(a: &Solution, b: &Solution) -> Ordering {
    let crowding_a = a.crowding().unwrap_or(0.0);
    let crowding_b = b.crowding().unwrap_or(0.0);
    crowding_b.partial_cmp(&crowding_a).unwrap_or(Ordering::Equal)
}

/// A population that maintains rank and crowding attributes for its members.
///
/// Structural mutations mark the population as modified; the next
/// rank/crowding-dependent operation re-runs non-dominated sorting first.
/// Every recomputation (bulk updates and the per-removal crowding refreshes
/// inside [`prune`](NondominatedSortingPopulation::prune)) increments the
/// observable [`update_count`](NondominatedSortingPopulation::update_count).
///
/// # Example
///
/// ```
/// use pareto_archive::{NondominatedSortingPopulation, Solution};
///
/// let mut population = NondominatedSortingPopulation::new();
/// population.add(Solution::from_objectives([0.0, 0.0]));
/// population.add(Solution::from_objectives([0.5, 0.5]));
/// population.add(Solution::from_objectives([1.0, 1.0]));
///
/// population.truncate(1);
/// assert_eq!(population.len(), 1);
/// assert_eq!(population.get(0).objectives(), &[0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortingPopulation {
    population: Population,
    sorting: NondominatedSorting,
    modified: bool,
    updates: u64,
}

impl NondominatedSortingPopulation {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// The number of rank/crowding recomputations performed so far.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Appends a member.
    pub fn add(&mut self, solution: Solution) {
        self.modified = true;
        self.population.add(solution);
    }

    /// Appends every solution from the iterator.
    pub fn add_all(&mut self, solutions: impl IntoIterator<Item = Solution>) {
        self.modified = true;
        self.population.add_all(solutions);
    }

    /// Removes and returns the member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        self.modified = true;
        self.population.remove(index)
    }

    /// Removes the first member equal to `solution`.
    pub fn remove_solution(&mut self, solution: &Solution) -> bool {
        self.modified = true;
        self.population.remove_solution(solution)
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.modified = true;
        self.population.clear();
    }

    /// The member at `index`, with rank and crowding attributes current.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&mut self, index: usize) -> &Solution {
        self.update_if_modified();
        &self.population[index]
    }

    /// Iterates over the members with rank and crowding attributes current.
    pub fn iter(&mut self) -> std::slice::Iter<'_, Solution> {
        self.update_if_modified();
        self.population.iter()
    }

    /// Recomputes rank and crowding for the entire current contents.
    ///
    /// Called automatically before rank/crowding-dependent operations;
    /// invoke manually after mutating contained solutions in place, since
    /// only structural changes are tracked.
    pub fn update(&mut self) {
        self.modified = false;
        self.updates += 1;
        self.sorting.evaluate(&mut self.population);
    }

    fn update_if_modified(&mut self) {
        if self.modified {
            self.update();
        }
    }

    /// Truncates to `size` members by rank ascending, then crowding
    /// descending, using a single crowding snapshot.
    pub fn truncate(&mut self, size: usize) {
        self.truncate_by(size, rank_then_crowding);
    }

    /// Truncates to `size` members using an explicit comparator over the
    /// rank/crowding-annotated solutions. The sort is stable: equal keys
    /// preserve relative insertion order.
    pub fn truncate_by<F>(&mut self, size: usize, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> Ordering,
    {
        self.update_if_modified();
        self.population.truncate_by(size, compare);
        self.modified = true;
        debug!("truncated population to {} members", self.population.len());
    }

    /// Prunes to `size` members, removing the worst member one at a time
    /// and recomputing the affected front's crowding after each removal.
    ///
    /// Whole fronts beyond the cut are dropped outright; only the front
    /// straddling the boundary is shrunk incrementally. Differs from
    /// [`truncate`](NondominatedSortingPopulation::truncate) whenever that
    /// front loses more than one member, because crowding distances shift
    /// as neighbors disappear.
    pub fn prune(&mut self, size: usize) {
        if size == 0 {
            self.clear();
            return;
        }
        if self.population.len() <= size {
            return;
        }

        self.update_if_modified();

        self.population
            .sort_by(|a, b| a.rank().unwrap_or(usize::MAX).cmp(&b.rank().unwrap_or(usize::MAX)));

        let boundary_rank = self.population[size - 1].rank().unwrap_or(usize::MAX);

        // drop fronts past the cut entirely; collect the boundary front in
        // insertion order so equal-crowding ties stay stable
        let mut front = Population::new();
        let mut index = 0;

        while index < self.population.len() {
            let rank = self.population[index].rank().unwrap_or(usize::MAX);

            if rank >= boundary_rank {
                let solution = self.population.remove(index);
                if rank == boundary_rank {
                    front.add(solution);
                }
            } else {
                index += 1;
            }
        }

        while self.population.len() + front.len() > size {
            self.sorting.update_crowding_distance(&mut front);
            self.updates += 1;
            front.truncate_by(front.len() - 1, crowding_descending);
        }

        debug!(
            "pruned boundary front of rank {} down to {} members",
            boundary_rank,
            front.len()
        );

        self.population.add_all(front);
        self.modified = true;
    }
}

// ============================================================================
// Tests
// ============================================================================
