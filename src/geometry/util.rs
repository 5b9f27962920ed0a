//! Geometric utility functions.
//!
//! Circumcircle computation used by the Bowyer-Watson builder, and point
//! generators used by tests and benchmarks.

use thiserror::Error;

pub mod circumcircle;
pub mod point_generation;

pub use circumcircle::*;
pub use point_generation::*;

/// Errors that can occur while generating point sets.
///
/// # Examples
///
/// ```rust
/// use triangulator::geometry::util::RandomPointGenerationError;
///
/// let err = RandomPointGenerationError::InvalidPointCount { n_points: 0 };
/// assert!(err.to_string().contains("0"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RandomPointGenerationError {
    /// The coordinate range is empty or inverted.
    #[error("Invalid coordinate range: min ({min}) must be less than max ({max})")]
    InvalidRange {
        /// Lower bound, formatted.
        min: String,
        /// Upper bound, formatted.
        max: String,
    },
    /// The requested number of points cannot be produced.
    #[error("Invalid point count: {n_points}")]
    InvalidPointCount {
        /// The requested count.
        n_points: usize,
    },
}
