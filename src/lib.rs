//! Nondominated archives and Pareto ranking for multi-objective
//! optimization.
//!
//! Provides the population containers an evolutionary multi-objective
//! algorithm needs between variation and selection:
//!
//! - **[`Population`]**: Insertion-ordered, index-addressable base
//!   container with fail-fast [`Cursor`] iteration.
//! - **[`NondominatedPopulation`]**: Unbounded Pareto archive; inserting a
//!   candidate evicts dominated residents, with configurable duplicate
//!   handling.
//! - **[`NondominatedSortingPopulation`]**: Fast non-dominated sorting
//!   (Deb et al. 2002) with crowding distance, lazily recomputed, plus
//!   one-shot truncation and iterative pruning to a target size.
//! - **[`EpsilonBoxDominanceArchive`]**: Size-bounded archive under
//!   epsilon-box dominance (Laumanns et al. 2002) with epsilon-progress
//!   counters.
//! - **[`AdaptiveGridArchive`]**: Capacity-bounded archive with adaptive
//!   hyper-grid density eviction (Knowles & Corne 2000).
//!
//! All objectives are minimized. Constraint violations take precedence over
//! objective comparison: a feasible solution beats any infeasible one, and a
//! smaller aggregate violation beats a larger one.
//!
//! # Example
//!
//! ```
//! use pareto_archive::{NondominatedPopulation, Solution};
//!
//! let mut archive = NondominatedPopulation::new();
//! archive.add(Solution::from_objectives([1.0, 3.0]));
//! archive.add(Solution::from_objectives([3.0, 1.0]));
//! archive.add(Solution::from_objectives([2.0, 2.0]));
//!
//! // all three are mutually nondominated
//! assert_eq!(archive.len(), 3);
//! ```

pub mod comparator;
pub mod epsilon_archive;
pub mod error;
pub mod grid_archive;
pub mod nondominated;
pub mod population;
pub mod solution;
pub mod sorting;
pub mod sorting_population;

pub use comparator::{BoxDominance, Dominance, EpsilonBoxDominance, ParetoDominance};
pub use epsilon_archive::EpsilonBoxDominanceArchive;
pub use error::Error;
pub use grid_archive::AdaptiveGridArchive;
pub use nondominated::{DuplicateMode, NondominatedPopulation};
pub use population::{Cursor, Population};
pub use solution::{AttributeValue, Solution};
pub use sorting::NondominatedSorting;
pub use sorting_population::NondominatedSortingPopulation;

/// Absolute tolerance for floating-point comparisons.
///
/// Used for feasibility checks, duplicate detection, and near-equality of
/// objective values throughout the crate.
pub const EPS: f64 = 1e-10;
