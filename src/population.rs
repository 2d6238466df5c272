//! The ordered, index-addressable solution container.
//!
//! [`Population`] is the base collection every archive in this crate builds
//! on: insertion-ordered, non-unique, with O(1) positional access. Every
//! structural mutation bumps a generation counter; a detached [`Cursor`]
//! validates that counter on each step and fails deterministically when the
//! population was mutated underneath it.

use crate::error::Error;
use crate::solution::Solution;

/// An insertion-ordered collection of solutions.
///
/// Structural mutations (add, remove, clear, sort, truncate) increment the
/// [`modifications`](Population::modifications) counter. Mutating a contained
/// solution through [`get_mut`](Population::get_mut) or `IndexMut` does not —
/// the counter tracks the *shape* of the container, not its contents.
///
/// # Example
///
/// ```
/// use pareto_archive::{Population, Solution};
///
/// let mut population = Population::new();
/// population.add(Solution::from_objectives([1.0, 2.0]));
/// population.add(Solution::from_objectives([2.0, 1.0]));
///
/// assert_eq!(population.len(), 2);
/// assert_eq!(population[0].objective(0), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Population {
    solutions: Vec<Solution>,
    modifications: u64,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of solutions in this population.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether this population contains no solutions.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// The generation counter, incremented by every structural mutation.
    pub fn modifications(&self) -> u64 {
        self.modifications
    }

    /// Appends a solution.
    pub fn add(&mut self, solution: Solution) {
        self.modifications += 1;
        self.solutions.push(solution);
    }

    /// Appends every solution from the iterator, in order.
    pub fn add_all(&mut self, solutions: impl IntoIterator<Item = Solution>) {
        for solution in solutions {
            self.add(solution);
        }
    }

    /// Returns the solution at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    /// Returns a mutable reference to the solution at `index`, or `None` if
    /// out of range. Content mutation; does not bump the generation counter.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Solution> {
        self.solutions.get_mut(index)
    }

    /// Removes and returns the solution at `index`, shifting later
    /// solutions left.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        assert!(
            index < self.solutions.len(),
            "index {} out of bounds for population of size {}",
            index,
            self.solutions.len()
        );
        self.modifications += 1;
        self.solutions.remove(index)
    }

    /// Removes the first solution equal to `solution`. Returns `true` if one
    /// was removed.
    pub fn remove_solution(&mut self, solution: &Solution) -> bool {
        match self.solutions.iter().position(|s| s == solution) {
            Some(index) => {
                self.modifications += 1;
                self.solutions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the population contains a solution equal to `solution`.
    pub fn contains(&self, solution: &Solution) -> bool {
        self.solutions.iter().any(|s| s == solution)
    }

    /// The position of the first solution equal to `solution`, if any.
    pub fn position(&self, solution: &Solution) -> Option<usize> {
        self.solutions.iter().position(|s| s == solution)
    }

    /// Removes all solutions.
    pub fn clear(&mut self) {
        self.modifications += 1;
        self.solutions.clear();
    }

    /// Iterates over the solutions in insertion order.
    ///
    /// The iterator borrows the population, so structural mutation during
    /// iteration is rejected at compile time. Use a [`Cursor`] when iteration
    /// must be interleaved with code that may mutate the population.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Iterates mutably over the solutions. Content mutation; does not bump
    /// the generation counter.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Solution> {
        self.solutions.iter_mut()
    }

    /// Stable-sorts the solutions with the given comparator. Equal elements
    /// keep their relative insertion order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Solution, &Solution) -> std::cmp::Ordering,
    {
        self.modifications += 1;
        self.solutions.sort_by(|a, b| compare(a, b));
    }

    /// Stable-sorts with the given comparator, then discards everything
    /// beyond the first `size` solutions.
    pub fn truncate_by<F>(&mut self, size: usize, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> std::cmp::Ordering,
    {
        self.sort_by(compare);
        if self.solutions.len() > size {
            self.solutions.truncate(size);
        }
    }

    /// Creates a detached cursor positioned before the first solution.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            expected: self.modifications,
            index: 0,
        }
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.solutions[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Solution {
        &mut self.solutions[index]
    }
}

impl IntoIterator for Population {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Solution> for Population {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        let mut population = Population::new();
        population.add_all(iter);
        population
    }
}

/// A fail-fast cursor over a [`Population`].
///
/// A cursor holds no borrow; it records the population's generation counter
/// at creation and re-checks it on every step, so iteration can be
/// interleaved with other code. If the population was structurally mutated
/// since the cursor was created, the next step reports
/// [`Error::ConcurrentModification`] instead of silently reading shifted or
/// missing elements.
///
/// # Example
///
/// ```
/// use pareto_archive::{Population, Solution};
///
/// let mut population = Population::new();
/// population.add(Solution::from_objectives([1.0]));
///
/// let mut cursor = population.cursor();
/// assert!(cursor.next(&population).unwrap().is_some());
///
/// population.add(Solution::from_objectives([2.0]));
/// assert!(cursor.next(&population).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    expected: u64,
    index: usize,
}

impl Cursor {
    /// Advances to the next solution.
    ///
    /// Returns `Ok(None)` when the population is exhausted, or
    /// [`Error::ConcurrentModification`] if the population was structurally
    /// mutated after this cursor was created.
    pub fn next<'a>(&mut self, population: &'a Population) -> Result<Option<&'a Solution>, Error> {
        if self.expected != population.modifications() {
            return Err(Error::ConcurrentModification);
        }

        let solution = population.get(self.index);
        if solution.is_some() {
            self.index += 1;
        }
        Ok(solution)
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
    fn test_add_get_remove() {
        let mut population = Population::new();
        population.add(point(&[1.0, 2.0]));
        population.add(point(&[2.0, 1.0]));

        assert_eq!(population.len(), 2);
        assert_eq!(population[1].objective(0), 2.0);

        let removed = population.remove(0);
        assert_eq!(removed.objective(0), 1.0);
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut population = Population::new();
        population.add_all([point(&[3.0]), point(&[1.0]), point(&[2.0])]);

        let values: Vec<f64> = population.iter().map(|s| s.objective(0)).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_contains_and_remove_solution() {
        let mut population = Population::new();
        population.add(point(&[1.0]));
        population.add(point(&[2.0]));

        assert!(population.contains(&point(&[2.0])));
        assert!(population.remove_solution(&point(&[1.0])));
        assert!(!population.contains(&point(&[1.0])));
        assert!(!population.remove_solution(&point(&[9.0])));
    }

    #[test]
    fn test_modification_counter_structural_only() {
        let mut population = Population::new();
        let before = population.modifications();

        population.add(point(&[1.0]));
        assert_eq!(population.modifications(), before + 1);

        // content mutation does not count
        let counter = population.modifications();
        population.get_mut(0).unwrap().set_rank(0);
        population[0].num_objectives();
        assert_eq!(population.modifications(), counter);

        population.clear();
        assert_eq!(population.modifications(), counter + 1);
    }

    #[test]
    fn test_cursor_walks_all_solutions() {
        let mut population = Population::new();
        population.add_all([point(&[1.0]), point(&[2.0]), point(&[3.0])]);

        let mut cursor = population.cursor();
        let mut seen = Vec::new();
        while let Some(solution) = cursor.next(&population).unwrap() {
            seen.push(solution.objective(0));
        }
        assert_eq!(seen, vec![1.0, 2.0, 3.0]);

        // exhausted cursor keeps returning None
        assert!(cursor.next(&population).unwrap().is_none());
    }

    #[test]
    fn test_cursor_fails_fast_on_structural_mutation() {
        let mut population = Population::new();
        population.add_all([point(&[1.0]), point(&[2.0])]);

        let mut cursor = population.cursor();
        assert!(cursor.next(&population).unwrap().is_some());

        population.remove(0);
        assert_eq!(
            cursor.next(&population),
            Err(Error::ConcurrentModification)
        );
    }

    #[test]
    fn test_cursor_unaffected_by_content_mutation() {
        let mut population = Population::new();
        population.add_all([point(&[1.0]), point(&[2.0])]);

        let mut cursor = population.cursor();
        assert!(cursor.next(&population).unwrap().is_some());

        population.get_mut(1).unwrap().set_crowding(1.0);
        assert!(cursor.next(&population).unwrap().is_some());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_remove_out_of_bounds_panics() {
        let mut population = Population::new();
        population.remove(0);
    }

    #[test]
    fn test_truncate_by_is_stable() {
        let mut population = Population::new();
        // two pairs with equal keys; relative order must survive the sort
        let mut a = point(&[1.0]);
        a.set_attribute("id", 0i64);
        let mut b = point(&[1.0]);
        b.set_attribute("id", 1i64);
        population.add_all([point(&[2.0]), a, b]);

        population.truncate_by(2, |x, y| {
            x.objective(0).partial_cmp(&y.objective(0)).unwrap()
        });

        assert_eq!(population.len(), 2);
        assert_eq!(
            population[0].attribute("id"),
            Some(&crate::AttributeValue::Int(0))
        );
        assert_eq!(
            population[1].attribute("id"),
            Some(&crate::AttributeValue::Int(1))
        );
    }
}
