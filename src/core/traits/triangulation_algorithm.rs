//! The seam between the triangulation service and a Delaunay builder.
//!
//! [`TriangulationAlgorithm`] turns an ordered point set into index triples.
//! [`BowyerWatson`](crate::core::algorithms::bowyer_watson::BowyerWatson) is
//! the production implementation; tests plug in fault-injecting builders to
//! exercise the service's internal-failure path.

use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while building a triangulation.
///
/// The service treats every variant as an opaque internal failure; the
/// variants exist for logging and tests.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::traits::TriangulationError;
///
/// let err = TriangulationError::InsufficientVertices { count: 2 };
/// assert!(err.to_string().contains("at least 3"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// Fewer than three points were supplied.
    #[error("Insufficient vertices: {count} given, at least 3 required")]
    InsufficientVertices {
        /// Number of points supplied.
        count: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate in point {index}")]
    NonFiniteCoordinate {
        /// Position of the offending point in the input.
        index: usize,
    },
    /// The working vertex indices (input plus super-triangle) do not fit `u32`.
    #[error("Too many points to index with u32: {count}")]
    IndexOverflow {
        /// Number of points supplied.
        count: usize,
    },
    /// A point repeats an earlier one and duplicates are not being skipped.
    #[error("Point {index} duplicates point {first}")]
    DuplicatePoint {
        /// Position of the repeated point in the input.
        index: usize,
        /// Position of its first occurrence.
        first: usize,
    },
    /// An inserted point lies in no working triangle, so it could not be connected.
    #[error("Point {index} lies in no triangle; cavity is empty")]
    EmptyCavity {
        /// Position of the offending point in the input.
        index: usize,
    },
    /// A triangle the inserted point must stay connected to hides part of the
    /// cavity boundary from it, so no star-shaped cavity exists.
    #[error("Cavity of point {index} is not star-shaped")]
    CavityNotStarShaped {
        /// Position of the offending point in the input.
        index: usize,
    },
    /// Every triangle touched the super-triangle; nothing is left to return.
    #[error("Triangulation produced no triangles")]
    NoTriangles,
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters accumulated by a builder across [`TriangulationAlgorithm::triangulate`] calls.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::traits::InsertionStatistics;
///
/// let mut stats = InsertionStatistics::new();
/// stats.record_insertion(3, 1);
/// stats.record_duplicate();
/// assert_eq!(stats.points_processed(), 2);
/// assert_eq!(stats.triangles_created, 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionStatistics {
    /// Points connected into the triangulation.
    pub points_inserted: usize,
    /// Points skipped because they equal an earlier point.
    pub duplicates_skipped: usize,
    /// Triangles created while filling cavities.
    pub triangles_created: usize,
    /// Triangles removed as bad.
    pub triangles_removed: usize,
}

impl InsertionStatistics {
    /// Creates zeroed statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points_inserted: 0,
            duplicates_skipped: 0,
            triangles_created: 0,
            triangles_removed: 0,
        }
    }

    /// Records one successful point insertion.
    #[inline]
    pub const fn record_insertion(&mut self, created: usize, removed: usize) {
        self.points_inserted += 1;
        self.triangles_created += created;
        self.triangles_removed += removed;
    }

    /// Records one skipped duplicate point.
    #[inline]
    pub const fn record_duplicate(&mut self) {
        self.duplicates_skipped += 1;
    }

    /// Points seen so far, inserted or skipped.
    #[must_use]
    pub const fn points_processed(&self) -> usize {
        self.points_inserted + self.duplicates_skipped
    }

    /// Zeroes every counter.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// A Delaunay builder over an ordered 2-D point set.
///
/// Implementations return triangles whose indices refer to positions in
/// `points`. Failures are returned as values; an implementation must not
/// panic on input data.
pub trait TriangulationAlgorithm {
    /// Triangulate `points`.
    ///
    /// # Errors
    ///
    /// Returns a [`TriangulationError`] when no valid triangulation could be
    /// produced.
    fn triangulate(&mut self, points: &[Point<f32>]) -> Result<Vec<Triangle>, TriangulationError>;

    /// Statistics accumulated since construction or the last [`reset`](Self::reset).
    fn statistics(&self) -> InsertionStatistics {
        InsertionStatistics::default()
    }

    /// Reset accumulated state for reuse.
    fn reset(&mut self) {}
}

impl<A: TriangulationAlgorithm + ?Sized> TriangulationAlgorithm for Box<A> {
    fn triangulate(&mut self, points: &[Point<f32>]) -> Result<Vec<Triangle>, TriangulationError> {
        (**self).triangulate(points)
    }

    fn statistics(&self) -> InsertionStatistics {
        (**self).statistics()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
