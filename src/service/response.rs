//! Status classes and the structured response returned by the service.

use std::fmt;

// =============================================================================
// STATUS
// =============================================================================

/// Status class of a response, modelled on HTTP status codes.
///
/// # Examples
///
/// ```rust
/// use triangulator::service::response::Status;
///
/// assert_eq!(Status::NotFound.code(), 404);
/// assert_eq!(Status::Unavailable.code(), 503);
/// assert_eq!(Status::BadRequest.to_string(), "400 Bad Request");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    /// 200: the request succeeded.
    Ok,
    /// 400: malformed identifier, malformed binary or degenerate point set.
    BadRequest,
    /// 404: the identifier is well formed but nothing is stored under it.
    NotFound,
    /// 500: the builder or encoder failed on well-formed input.
    Internal,
    /// 503: storage reported itself unavailable, or could not be reached.
    Unavailable,
}

impl Status {
    /// Numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
            Self::Unavailable => 503,
        }
    }

    /// Canonical reason phrase.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Internal => "Internal Server Error",
            Self::Unavailable => "Service Unavailable",
        }
    }

    /// Returns `true` for [`Status::Ok`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Outcome of one triangulation request.
///
/// Either both payloads are present (success) or only an error message; a
/// partial result cannot be represented.
///
/// # Examples
///
/// ```rust
/// use triangulator::service::response::{Response, Status};
///
/// let response = Response::failure(Status::NotFound, "gone");
/// assert_eq!(response.status().code(), 404);
/// assert_eq!(response.error(), Some("gone"));
/// assert!(response.triangles().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Status 200 with the encoded TriangleSet and the echoed PointSet.
    Success {
        /// TriangleSet binary.
        triangles: Vec<u8>,
        /// PointSet binary the triangle indices refer to.
        point_set: Vec<u8>,
    },
    /// A non-success status with a human-readable message.
    Failure {
        /// Status class.
        status: Status,
        /// Error message.
        error: String,
    },
}

impl Response {
    /// Builds a success response.
    #[must_use]
    pub const fn success(triangles: Vec<u8>, point_set: Vec<u8>) -> Self {
        Self::Success {
            triangles,
            point_set,
        }
    }

    /// Builds a failure response.
    #[must_use]
    pub fn failure(status: Status, error: impl Into<String>) -> Self {
        Self::Failure {
            status,
            error: error.into(),
        }
    }

    /// Status class of this response.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Success { .. } => Status::Ok,
            Self::Failure { status, .. } => *status,
        }
    }

    /// Returns `true` for a success response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error message, if this is a failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// TriangleSet binary, if this is a success.
    #[must_use]
    pub fn triangles(&self) -> Option<&[u8]> {
        match self {
            Self::Success { triangles, .. } => Some(triangles),
            Self::Failure { .. } => None,
        }
    }

    /// PointSet binary, if this is a success.
    #[must_use]
    pub fn point_set(&self) -> Option<&[u8]> {
        match self {
            Self::Success { point_set, .. } => Some(point_set),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let codes = [
            Status::Ok,
            Status::BadRequest,
            Status::NotFound,
            Status::Internal,
            Status::Unavailable,
        ]
        .map(Status::code);
        assert_eq!(codes, [200, 400, 404, 500, 503]);
        assert!(Status::Ok.is_success());
        assert!(!Status::Internal.is_success());
        assert_eq!(Status::Unavailable.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn success_carries_both_payloads() {
        let response = Response::success(vec![0, 0, 0, 0], vec![0, 0, 0, 0]);
        assert_eq!(response.status(), Status::Ok);
        assert!(response.is_success());
        assert_eq!(response.triangles(), Some(&[0u8, 0, 0, 0][..]));
        assert_eq!(response.point_set(), Some(&[0u8, 0, 0, 0][..]));
        assert_eq!(response.error(), None);
    }

    #[test]
    fn failure_carries_only_the_message() {
        let response = Response::failure(Status::Internal, String::from("boom"));
        assert_eq!(response.status(), Status::Internal);
        assert!(!response.is_success());
        assert_eq!(response.error(), Some("boom"));
        assert_eq!(response.point_set(), None);
    }
}
