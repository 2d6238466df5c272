//! Capacity-bounded nondominated archive with adaptive grid density.
//!
//! [`AdaptiveGridArchive`] overlays a hyper-grid on the region of objective
//! space currently occupied by its members. Each objective axis is split
//! into `bisections` equal bins between the observed minimum and maximum,
//! and a per-cell density count steers eviction: when the archive exceeds
//! its capacity, a member of the most crowded cell is removed. The grid
//! adapts whenever the occupied bounding box changes.
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using
//!   the Pareto Archived Evolution Strategy"

use log::debug;
use rand::Rng;

use crate::comparator::{Dominance, ParetoDominance};
use crate::error::Error;
use crate::population::{Cursor, Population};
use crate::solution::Solution;

/// A nondominated archive bounded by capacity, with grid-density eviction.
///
/// Randomness enters only through the `rng` argument of
/// [`add`](AdaptiveGridArchive::add) and
/// [`pick_from_densest_cell`](AdaptiveGridArchive::pick_from_densest_cell),
/// so a seeded generator reproduces runs exactly.
///
/// # Example
///
/// ```
/// use pareto_archive::{AdaptiveGridArchive, Solution};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut archive = AdaptiveGridArchive::new(100, 2, 8).unwrap();
///
/// assert!(archive.add(Solution::from_objectives([0.0, 1.0]), &mut rng));
/// assert!(archive.add(Solution::from_objectives([1.0, 0.0]), &mut rng));
/// assert!(!archive.add(Solution::from_objectives([2.0, 2.0]), &mut rng));
///
/// assert_eq!(archive.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveGridArchive {
    population: Population,
    comparator: ParetoDominance,
    capacity: usize,
    num_objectives: usize,
    bisections: usize,
    minimum: Vec<f64>,
    maximum: Vec<f64>,
    density: Vec<u32>,
}

impl AdaptiveGridArchive {
    /// Creates an empty archive.
    ///
    /// The grid has `bisections.pow(num_objectives)` cells; construction
    /// fails with [`Error::GridOverflow`] when that count exceeds `i32::MAX`,
    /// with [`Error::InvalidBisections`] when `bisections` is zero, and with
    /// [`Error::NoObjectives`] when `num_objectives` is zero.
    pub fn new(capacity: usize, num_objectives: usize, bisections: usize) -> Result<Self, Error> {
        if bisections == 0 {
            return Err(Error::InvalidBisections(bisections));
        }
        if num_objectives == 0 {
            return Err(Error::NoObjectives);
        }

        let cells = (bisections as u64)
            .checked_pow(num_objectives as u32)
            .filter(|&cells| cells <= i32::MAX as u64)
            .ok_or(Error::GridOverflow {
                bisections,
                objectives: num_objectives,
            })?;

        Ok(Self {
            population: Population::new(),
            comparator: ParetoDominance,
            capacity,
            num_objectives,
            bisections,
            minimum: vec![f64::INFINITY; num_objectives],
            maximum: vec![f64::NEG_INFINITY; num_objectives],
            density: vec![0; cells as usize],
        })
    }

    /// The maximum number of members before density eviction kicks in.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of bins per objective axis.
    pub fn bisections(&self) -> usize {
        self.bisections
    }

    /// The number of objectives the grid spans.
    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    /// Per-cell member counts, indexed by flattened grid cell.
    pub fn density(&self) -> &[u32] {
        &self.density
    }

    /// The observed per-objective minimum of the members.
    pub fn minimum(&self) -> &[f64] {
        &self.minimum
    }

    /// The observed per-objective maximum of the members.
    pub fn maximum(&self) -> &[f64] {
        &self.maximum
    }

    /// Attempts to insert a candidate.
    ///
    /// Dominated residents are evicted first; the candidate is rejected when
    /// any resident dominates it. After a successful insertion the grid is
    /// re-adapted if the candidate falls outside the current bounding box,
    /// and if the archive is over capacity a member of the most crowded cell
    /// is removed at random.
    pub fn add<R: Rng>(&mut self, candidate: Solution, rng: &mut R) -> bool {
        let mut index = 0;

        while index < self.population.len() {
            match self.comparator.compare(&candidate, &self.population[index]) {
                Dominance::Dominates => {
                    self.remove(index);
                }
                Dominance::Dominated => return false,
                Dominance::Nondominated => index += 1,
            }
        }

        match self.find_index(&candidate) {
            Some(cell) => {
                self.population.add(candidate);
                self.density[cell] += 1;
            }
            None => {
                self.population.add(candidate);
                self.adapt_grid();
            }
        }

        while self.population.len() > self.capacity {
            if let Some(victim) = self.densest_member_index(rng) {
                self.remove(victim);
            }
        }

        true
    }

    /// The flattened grid cell containing `solution`, or `None` when the
    /// archive is empty or the solution lies outside the current bounding
    /// box.
    ///
    /// Bins are mapped least-significant-objective-first: objective 0
    /// contributes the lowest-order digit of the mixed-radix index. A value
    /// exactly on the upper bound lands in the top bin; a degenerate axis
    /// (zero range) maps everything to bin 0.
    pub fn find_index(&self, solution: &Solution) -> Option<usize> {
        let mut index = 0;
        let mut stride = 1;

        for i in 0..self.num_objectives {
            let value = solution.objective(i);
            if value < self.minimum[i] || value > self.maximum[i] {
                return None;
            }

            let range = self.maximum[i] - self.minimum[i];
            let bin = if range > 0.0 {
                let raw = ((value - self.minimum[i]) / range * self.bisections as f64) as usize;
                raw.min(self.bisections - 1)
            } else {
                0
            };

            index += bin * stride;
            stride *= self.bisections;
        }

        Some(index)
    }

    /// A uniformly random member of a most crowded cell, or `None` when the
    /// archive is empty. Ties between equally dense cells are broken
    /// uniformly at random.
    pub fn pick_from_densest_cell<R: Rng>(&self, rng: &mut R) -> Option<&Solution> {
        self.densest_member_index(rng)
            .map(|index| &self.population[index])
    }

    fn densest_member_index<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.population.is_empty() {
            return None;
        }

        let peak = *self.density.iter().max().unwrap_or(&0);
        let candidates: Vec<usize> = self
            .density
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == peak)
            .map(|(cell, _)| cell)
            .collect();
        let cell = candidates[rng.random_range(0..candidates.len())];

        let members: Vec<usize> = (0..self.population.len())
            .filter(|&i| self.find_index(&self.population[i]) == Some(cell))
            .collect();
        if members.is_empty() {
            return None;
        }

        Some(members[rng.random_range(0..members.len())])
    }

    /// Removes and returns the member at `index`, updating the density grid.
    /// The grid is re-adapted when the removed member sat on the bounding
    /// box, so the box stays tight around the survivors.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        if let Some(cell) = self.find_index(&self.population[index]) {
            self.density[cell] -= 1;
        }

        let removed = self.population.remove(index);

        let on_boundary = (0..self.num_objectives).any(|i| {
            removed.objective(i) == self.minimum[i] || removed.objective(i) == self.maximum[i]
        });
        if on_boundary {
            self.adapt_grid();
        }

        removed
    }

    /// Removes the first member equal to `solution`. Returns `true` if one
    /// was removed.
    pub fn remove_solution(&mut self, solution: &Solution) -> bool {
        match self.population.position(solution) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes all members and resets the grid.
    pub fn clear(&mut self) {
        self.population.clear();
        self.adapt_grid();
    }

    /// Recomputes the bounding box from the current members and recounts
    /// every cell density. An empty archive gets an inverted infinite box so
    /// the next insertion re-adapts.
    fn adapt_grid(&mut self) {
        for i in 0..self.num_objectives {
            self.minimum[i] = f64::INFINITY;
            self.maximum[i] = f64::NEG_INFINITY;
        }

        for solution in self.population.iter() {
            for i in 0..self.num_objectives {
                self.minimum[i] = self.minimum[i].min(solution.objective(i));
                self.maximum[i] = self.maximum[i].max(solution.objective(i));
            }
        }

        self.density.fill(0);
        for index in 0..self.population.len() {
            if let Some(cell) = self.find_index(&self.population[index]) {
                self.density[cell] += 1;
            }
        }

        debug!(
            "adapted grid over {} members, bounds {:?}..{:?}",
            self.population.len(),
            self.minimum,
            self.maximum
        );
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

    /// Read access to the underlying population.
    pub fn as_population(&self) -> &Population {
        &self.population
    }
}

impl std::ops::Index<usize> for AdaptiveGridArchive {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.population[index]
    }
}

impl<'a> IntoIterator for &'a AdaptiveGridArchive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
