//! Fast non-dominated sorting with crowding-distance assignment.
//!
//! Partitions a population into dominance ranks (fronts) and measures
//! within-front diversity, writing the results into each solution's `rank`
//! and `crowding` attributes. This is the workhorse behind generational
//! replacement in NSGA-II style algorithms.
//!
//! # Algorithm (Deb et al., 2002)
//!
//! 1. For each pair of solutions, determine dominance
//! 2. Solutions dominated by no other form front 0 (rank 0)
//! 3. Peel front 0, decrement domination counts, repeat for later fronts
//! 4. Within each front, assign crowding distances over the unique members
//!
//! # Complexity
//!
//! O(m·n²) dominance comparisons, O(m·n·log n) crowding per front, where
//! m = objectives and n = population size.

use log::trace;

use crate::comparator::{Dominance, ParetoDominance};
use crate::population::Population;
use crate::EPS;

/// Non-dominated sorting operator.
///
/// # Example
///
/// ```
/// use pareto_archive::{NondominatedSorting, Population, Solution};
///
/// let mut population = Population::new();
/// population.add(Solution::from_objectives([1.0, 5.0]));
/// population.add(Solution::from_objectives([5.0, 1.0]));
/// population.add(Solution::from_objectives([6.0, 6.0]));
///
/// NondominatedSorting::new().evaluate(&mut population);
///
/// assert_eq!(population[0].rank(), Some(0));
/// assert_eq!(population[1].rank(), Some(0));
/// assert_eq!(population[2].rank(), Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NondominatedSorting {
    comparator: ParetoDominance,
}

impl NondominatedSorting {
    /// Creates a sorting operator using Pareto dominance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `rank` and `crowding` to every solution in the population.
    ///
    /// Rank 0 is the non-dominated front. Crowding is front-local; within a
    /// front, duplicate solutions (objective distance below
    /// [`EPS`](crate::EPS)) are excluded from the crowding computation and
    /// receive a crowding distance of 0.0. An empty population is a no-op.
    pub fn evaluate(&self, population: &mut Population) {
        let n = population.len();
        if n == 0 {
            return;
        }

        // precompute pairwise dominance and duplicate relations
        let mut dominance = vec![Dominance::Nondominated; n * n];
        let mut duplicate = vec![false; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let flag = self.comparator.compare(&population[i], &population[j]);
                dominance[i * n + j] = flag;
                dominance[j * n + i] = flag.reversed();

                let is_duplicate = population[i].objective_distance(&population[j]) < EPS;
                duplicate[i * n + j] = is_duplicate;
                duplicate[j * n + i] = is_duplicate;
            }
        }

        let mut dominated_counts = vec![0usize; n];
        let mut dominates_list: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut current_front = Vec::new();

        for i in 0..n {
            for j in 0..n {
                match dominance[i * n + j] {
                    Dominance::Dominates => dominates_list[i].push(j),
                    Dominance::Dominated => dominated_counts[i] += 1,
                    Dominance::Nondominated => {}
                }
            }

            if dominated_counts[i] == 0 {
                current_front.push(i);
            }
        }

        let mut rank = 0;

        while !current_front.is_empty() {
            let mut next_front = Vec::new();
            let mut unique_members = Vec::new();

            for (position, &i) in current_front.iter().enumerate() {
                population[i].set_rank(rank);

                // restrict the crowding calculation to unique solutions
                let is_duplicate = current_front[..position]
                    .iter()
                    .any(|&j| duplicate[i * n + j]);

                if is_duplicate {
                    population[i].set_crowding(0.0);
                } else {
                    unique_members.push(i);
                }

                for &j in &dominates_list[i] {
                    dominated_counts[j] -= 1;
                    if dominated_counts[j] == 0 {
                        next_front.push(j);
                    }
                }
            }

            assign_crowding(population, &unique_members);

            rank += 1;
            current_front = next_front;
        }

        trace!("non-dominated sorting assigned {} fronts over {} solutions", rank, n);
    }

    /// Computes and assigns crowding distances for a population assumed to
    /// consist of a single front.
    pub fn update_crowding_distance(&self, front: &mut Population) {
        let members: Vec<usize> = (0..front.len()).collect();
        assign_crowding(front, &members);
    }
}

/// Crowding distance over the listed members (Deb et al., 2002).
///
/// Boundary members of each objective receive `+inf`; interior members
/// accumulate `(next - previous) / range` per objective. Fronts of fewer
/// than three members are all boundary. Zero-range objectives contribute
/// nothing, guarding the division.
fn assign_crowding(population: &mut Population, members: &[usize]) {
    let n = members.len();
    if n == 0 {
        return;
    }

    if n < 3 {
        for &i in members {
            population[i].set_crowding(f64::INFINITY);
        }
        return;
    }

    for &i in members {
        population[i].set_crowding(0.0);
    }

    let num_objectives = population[members[0]].num_objectives();

    for objective in 0..num_objectives {
        // stable sort keeps insertion order for equal objective values
        let mut order = members.to_vec();
        order.sort_by(|&a, &b| {
            population[a]
                .objective(objective)
                .partial_cmp(&population[b].objective(objective))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let min_value = population[order[0]].objective(objective);
        let max_value = population[order[n - 1]].objective(objective);
        let range = max_value - min_value;

        population[order[0]].set_crowding(f64::INFINITY);
        population[order[n - 1]].set_crowding(f64::INFINITY);

        if range > 0.0 {
            for j in 1..(n - 1) {
                let previous = population[order[j - 1]].objective(objective);
                let next = population[order[j + 1]].objective(objective);
                let accumulated = population[order[j]].crowding().unwrap_or(0.0);
                population[order[j]].set_crowding(accumulated + (next - previous) / range);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
