//! Error types for the archive and population containers.
//!
//! Rejecting a candidate solution is *not* an error — `add` methods return
//! `false` for that. Errors cover precondition violations detected at
//! construction time and stale-cursor iteration; mixing solutions of
//! different shapes in one container is a programming bug and panics.

use thiserror::Error;

/// Errors raised by populations, archives, and comparators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An epsilon value was zero or negative.
    #[error("epsilon values must be positive, got {0}")]
    NonPositiveEpsilon(f64),

    /// An epsilon-box comparator was constructed with no epsilon values.
    #[error("at least one epsilon value is required")]
    EmptyEpsilons,

    /// The grid resolution per dimension was zero.
    #[error("bisections must be at least 1, got {0}")]
    InvalidBisections(usize),

    /// A grid archive was constructed for a problem with no objectives.
    #[error("number of objectives must be at least 1")]
    NoObjectives,

    /// `bisections^number_of_objectives` does not fit a 32-bit signed count.
    #[error("grid of {bisections}^{objectives} cells exceeds the 32-bit cell limit")]
    GridOverflow {
        /// Requested divisions per dimension.
        bisections: usize,
        /// Number of objectives (grid dimensions).
        objectives: usize,
    },

    /// A cursor observed a structural mutation made after its creation.
    #[error("concurrent modification detected during iteration")]
    ConcurrentModification,
}
