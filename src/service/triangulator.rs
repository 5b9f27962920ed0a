//! The triangulation service.
//!
//! [`Triangulator::triangulate`] is the only operation with a request/response
//! contract. Each step short-circuits into a terminal [`Response`]:
//!
//! | Step | Failure | Status |
//! |---|---|---|
//! | fetch from the [`PointSetManager`] | manager unreachable | 503 |
//! | | manager reports not found | 404 |
//! | | manager reports any other error | propagated unchanged |
//! | | 200 reply without payload | 503 |
//! | decode the PointSet binary | too short / inconsistent size | 400 |
//! | count check | fewer than 3 points | 400 |
//! | finiteness check | NaN or infinite coordinate | 400 |
//! | segment check | all points collinear with the first two | 400 |
//! | build | builder error | 500 |
//! | encode triangles and points | count overflow | 500 |
//!
//! No error value crosses the service boundary; callers only see [`Response`].

use crate::core::algorithms::bowyer_watson::BowyerWatson;
use crate::core::codec::{CodecError, decode_point_set, encode_point_set, encode_triangle_set};
use crate::core::traits::triangulation_algorithm::{TriangulationAlgorithm, TriangulationError};
use crate::geometry::point::Point;
use crate::geometry::predicates::all_collinear;
use crate::service::response::{Response, Status};
use crate::service::storage::{PointSetManager, StorageError, StorageReply};
use thiserror::Error;

// =============================================================================
// ERROR CLASSIFICATION
// =============================================================================

/// Why a triangulation request failed.
///
/// Internal to the request pipeline: [`Triangulator::triangulate`] converts it
/// into a [`Response`] with [`TriangulatorError::status`] and the display
/// message.
///
/// # Examples
///
/// ```rust
/// use triangulator::service::response::{Response, Status};
/// use triangulator::service::triangulator::TriangulatorError;
///
/// let response = Response::from(TriangulatorError::Segment);
/// assert_eq!(response.status(), Status::BadRequest);
/// assert_eq!(response.error(), Some("The pointSet points form a segment"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulatorError {
    /// The manager could not be reached.
    #[error("Service unavailable: communication with PointSetManager failed")]
    Storage(#[from] StorageError),
    /// The manager answered 200 without a PointSet.
    #[error("Service unavailable: malformed reply from PointSetManager")]
    MalformedReply,
    /// The manager reported that nothing is stored under the identifier.
    #[error("PointSet not found (as reported by the PointSetManager)")]
    NotFound,
    /// The manager reported another error, passed through unchanged.
    #[error("{message}")]
    Rejected {
        /// Status reported by the manager.
        status: Status,
        /// Message reported by the manager.
        message: String,
    },
    /// The PointSet binary is malformed.
    #[error(transparent)]
    Decode(#[from] CodecError),
    /// Fewer than three points.
    #[error("Not enough points to triangulate")]
    NotEnoughPoints {
        /// Number of decoded points.
        count: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("PointSet contains a non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Position of the offending point.
        index: usize,
    },
    /// Every point is collinear with the first two.
    #[error("The pointSet points form a segment")]
    Segment,
    /// The builder failed.
    #[error("Internal triangulation failure")]
    Triangulation(#[from] TriangulationError),
    /// The result could not be encoded.
    #[error("Internal triangulation failure")]
    Encode(#[source] CodecError),
}

impl TriangulatorError {
    /// Status class reported for this error.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Storage(_) | Self::MalformedReply => Status::Unavailable,
            Self::NotFound => Status::NotFound,
            Self::Rejected { status, .. } => *status,
            Self::Decode(_)
            | Self::NotEnoughPoints { .. }
            | Self::NonFiniteCoordinate { .. }
            | Self::Segment => Status::BadRequest,
            Self::Triangulation(_) | Self::Encode(_) => Status::Internal,
        }
    }
}

impl From<TriangulatorError> for Response {
    fn from(err: TriangulatorError) -> Self {
        Self::failure(err.status(), err.to_string())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Returns `true` if every point is collinear with the first two.
///
/// Uses the exact-zero cross product test in `f64`. Point sets with fewer
/// than three points count as segments.
///
/// # Examples
///
/// ```rust
/// use triangulator::geometry::point::Point;
/// use triangulator::service::triangulator::is_segment;
///
/// let line = [[0.0f32, 0.0], [1.0, 2.0], [2.0, 4.0]].map(Point::new);
/// assert!(is_segment(&line));
///
/// let triangle = [[0.0f32, 0.0], [1.0, 0.0], [0.0, 1.0]].map(Point::new);
/// assert!(!is_segment(&triangle));
/// ```
#[must_use]
pub fn is_segment(points: &[Point<f32>]) -> bool {
    let wide: Vec<Point<f64>> = points.iter().copied().map(Point::from).collect();
    all_collinear(&wide)
}

/// Checks that `points` can be handed to a builder.
///
/// # Errors
///
/// * [`TriangulatorError::NotEnoughPoints`] for fewer than three points
/// * [`TriangulatorError::NonFiniteCoordinate`] for the first NaN or infinite coordinate
/// * [`TriangulatorError::Segment`] if all points are collinear
pub fn validate_point_set(points: &[Point<f32>]) -> Result<(), TriangulatorError> {
    if points.len() < 3 {
        return Err(TriangulatorError::NotEnoughPoints {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(TriangulatorError::NonFiniteCoordinate { index });
    }
    if is_segment(points) {
        return Err(TriangulatorError::Segment);
    }
    Ok(())
}

// =============================================================================
// SERVICE
// =============================================================================

/// Triangulates stored point sets on request.
///
/// Holds no per-request state: every call fetches, validates, builds and
/// encodes from scratch. Use one `Triangulator` per thread; the manager can
/// be shared (for example through an `Arc`).
///
/// # Examples
///
/// ```rust
/// use triangulator::core::codec::{decode_triangle_set, encode_point_set};
/// use triangulator::geometry::point::Point;
/// use triangulator::service::response::Status;
/// use triangulator::service::storage::InMemoryPointSetManager;
/// use triangulator::service::triangulator::Triangulator;
///
/// let manager = InMemoryPointSetManager::new();
/// let points = [[0.0f32, 0.0], [1.0, 0.0], [0.0, 1.0]].map(Point::new);
/// let id = manager
///     .register_point_set(encode_point_set(&points).unwrap())
///     .unwrap();
///
/// let mut triangulator = Triangulator::new(&manager);
/// let response = triangulator.triangulate(&id.to_string());
/// assert_eq!(response.status(), Status::Ok);
///
/// let triangles = decode_triangle_set(response.triangles().unwrap()).unwrap();
/// assert_eq!(triangles.len(), 1);
///
/// let missing = triangulator.triangulate("not-a-uuid");
/// assert_eq!(missing.status(), Status::BadRequest);
/// ```
#[derive(Debug)]
pub struct Triangulator<M, A = BowyerWatson> {
    manager: M,
    algorithm: A,
}

impl<M: PointSetManager> Triangulator<M> {
    /// Creates a service using the default Bowyer-Watson builder.
    #[must_use]
    pub fn new(manager: M) -> Self {
        Self::with_algorithm(manager, BowyerWatson::new())
    }
}

impl<M, A> Triangulator<M, A>
where
    M: PointSetManager,
    A: TriangulationAlgorithm,
{
    /// Creates a service with a specific builder.
    #[must_use]
    pub const fn with_algorithm(manager: M, algorithm: A) -> Self {
        Self { manager, algorithm }
    }

    /// The storage collaborator.
    #[must_use]
    pub const fn manager(&self) -> &M {
        &self.manager
    }

    /// The builder.
    #[must_use]
    pub const fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Triangulate the point set stored under `id`.
    ///
    /// Always returns a terminal [`Response`]; see the module documentation
    /// for the status mapping.
    pub fn triangulate(&mut self, id: &str) -> Response {
        match self.run(id) {
            Ok(response) => response,
            Err(err) => {
                let cause = std::error::Error::source(&err).map(ToString::to_string);
                tracing::warn!(
                    id,
                    status = err.status().code(),
                    error = %err,
                    cause = cause.as_deref().unwrap_or("none"),
                    "triangulation request failed"
                );
                err.into()
            }
        }
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, TriangulatorError> {
        match self.manager.get_point_set(id)? {
            StorageReply::PointSet(bytes) => Ok(bytes),
            StorageReply::Error {
                status: Status::NotFound,
                ..
            } => Err(TriangulatorError::NotFound),
            StorageReply::Error {
                status: Status::Ok, ..
            } => Err(TriangulatorError::MalformedReply),
            StorageReply::Error { status, message } => {
                Err(TriangulatorError::Rejected { status, message })
            }
        }
    }

    fn run(&mut self, id: &str) -> Result<Response, TriangulatorError> {
        let bytes = self.fetch(id)?;
        tracing::debug!(id, bytes = bytes.len(), "fetched point set");

        let points = decode_point_set(&bytes)?;
        validate_point_set(&points)?;

        let triangles = self.algorithm.triangulate(&points)?;
        tracing::debug!(
            id,
            points = points.len(),
            triangles = triangles.len(),
            "triangulated point set"
        );

        let triangles = encode_triangle_set(&triangles).map_err(TriangulatorError::Encode)?;
        let point_set = encode_point_set(&points).map_err(TriangulatorError::Encode)?;
        Ok(Response::success(triangles, point_set))
    }
}
