//! The PointSet storage seam.
//!
//! The triangulation service never persists anything itself: it asks a
//! [`PointSetManager`] for the raw PointSet binary stored under an identifier.
//! A manager either *answers* (a [`StorageReply`], which may itself be an
//! error the manager reports) or *fails to answer* (a [`StorageError`]). The
//! service maps those two situations to different responses.
//!
//! [`InMemoryPointSetManager`] is a complete in-process implementation of the
//! storage contract: identifier validation, format check on registration and
//! an availability switch for exercising the unavailable path.

use crate::core::codec::{CodecError, decode_point_set};
use crate::core::collections::FastHashMap;
use crate::core::util::uuid::{make_uuid, parse_point_set_id};
use crate::service::response::Status;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use uuid::Uuid;

/// Message of the 400 reply for an identifier that is not a valid PointSetID.
pub const INVALID_ID_MESSAGE: &str = "Bad request, e.g., invalid PointSetID format.";

/// Message of the 503 reply when the storage layer is down.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str =
    "The PointSet storage layer (database) is unavailable.";

/// Message of the 404 reply for an unknown identifier.
pub const NOT_FOUND_MESSAGE: &str = "PointSet ID not found";

// =============================================================================
// REPLIES AND ERRORS
// =============================================================================

/// An answer from a [`PointSetManager`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageReply {
    /// Status 200 with the stored PointSet binary, unmodified.
    PointSet(Vec<u8>),
    /// A status the manager reports instead of a payload.
    Error {
        /// Reported status.
        status: Status,
        /// Reported message.
        message: String,
    },
}

impl StorageReply {
    /// The standard 404 reply.
    #[must_use]
    pub fn not_found() -> Self {
        Self::error(Status::NotFound, NOT_FOUND_MESSAGE)
    }

    /// The standard 400 reply for a malformed identifier.
    #[must_use]
    pub fn bad_request() -> Self {
        Self::error(Status::BadRequest, INVALID_ID_MESSAGE)
    }

    /// The standard 503 reply for an unavailable storage layer.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::error(Status::Unavailable, STORAGE_UNAVAILABLE_MESSAGE)
    }

    /// An arbitrary error reply.
    #[must_use]
    pub fn error(status: Status, message: impl Into<String>) -> Self {
        Self::Error {
            status,
            message: message.into(),
        }
    }

    /// Status carried by this reply.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::PointSet(_) => Status::Ok,
            Self::Error { status, .. } => *status,
        }
    }
}

/// The manager could not be reached or did not answer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// No answer arrived in time.
    #[error("PointSetManager call timed out")]
    Timeout,
    /// The call failed before an answer was produced.
    #[error("PointSetManager transport failure: {message}")]
    Transport {
        /// Transport diagnostic.
        message: String,
    },
}

/// Errors returned when registering a PointSet.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// The bytes are not a valid PointSet binary.
    #[error("Invalid binary format")]
    InvalidFormat {
        /// Codec diagnostic.
        #[source]
        source: CodecError,
    },
    /// The storage layer is down.
    #[error("The PointSet storage layer (database) is unavailable.")]
    Unavailable,
}

impl RegistrationError {
    /// Status class of this error.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::InvalidFormat { .. } => Status::BadRequest,
            Self::Unavailable => Status::Unavailable,
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Retrieves raw PointSet binaries by identifier.
///
/// Identifier syntax is the manager's concern: a malformed identifier is an
/// answered [`StorageReply::Error`] with status 400, not a [`StorageError`].
pub trait PointSetManager {
    /// Fetch the PointSet binary stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the manager cannot be reached.
    fn get_point_set(&self, id: &str) -> Result<StorageReply, StorageError>;
}

impl<T: PointSetManager + ?Sized> PointSetManager for &T {
    fn get_point_set(&self, id: &str) -> Result<StorageReply, StorageError> {
        (**self).get_point_set(id)
    }
}

impl<T: PointSetManager + ?Sized> PointSetManager for Box<T> {
    fn get_point_set(&self, id: &str) -> Result<StorageReply, StorageError> {
        (**self).get_point_set(id)
    }
}

impl<T: PointSetManager + ?Sized> PointSetManager for Arc<T> {
    fn get_point_set(&self, id: &str) -> Result<StorageReply, StorageError> {
        (**self).get_point_set(id)
    }
}

// =============================================================================
// IN-MEMORY MANAGER
// =============================================================================

/// A [`PointSetManager`] keeping PointSet binaries in process memory.
///
/// Safe to share between threads (wrap it in an [`Arc`]); reads and writes
/// go through an [`RwLock`].
///
/// # Examples
///
/// ```rust
/// use triangulator::service::response::Status;
/// use triangulator::service::storage::{InMemoryPointSetManager, PointSetManager, StorageReply};
///
/// let manager = InMemoryPointSetManager::new();
/// let bytes = vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
/// let id = manager.register_point_set(bytes.clone()).unwrap();
///
/// assert_eq!(
///     manager.get_point_set(&id.to_string()),
///     Ok(StorageReply::PointSet(bytes))
/// );
///
/// manager.set_available(false);
/// assert_eq!(
///     manager.get_point_set(&id.to_string()).unwrap().status(),
///     Status::Unavailable
/// );
/// ```
#[derive(Debug)]
pub struct InMemoryPointSetManager {
    point_sets: RwLock<FastHashMap<Uuid, Vec<u8>>>,
    available: AtomicBool,
}

impl InMemoryPointSetManager {
    /// Creates an empty, available manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            point_sets: RwLock::new(FastHashMap::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Stores a PointSet binary under a fresh identifier.
    ///
    /// # Errors
    ///
    /// * [`RegistrationError::InvalidFormat`] if `bytes` is not a PointSet binary
    /// * [`RegistrationError::Unavailable`] if the manager is switched off
    pub fn register_point_set(&self, bytes: Vec<u8>) -> Result<Uuid, RegistrationError> {
        decode_point_set(&bytes).map_err(|source| RegistrationError::InvalidFormat { source })?;
        if !self.is_available() {
            return Err(RegistrationError::Unavailable);
        }

        let id = make_uuid();
        self.point_sets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, bytes);
        tracing::debug!(%id, "registered point set");
        Ok(id)
    }

    /// Switches the simulated storage layer on or off.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether the simulated storage layer is up.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of stored point sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.point_sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPointSetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PointSetManager for InMemoryPointSetManager {
    fn get_point_set(&self, id: &str) -> Result<StorageReply, StorageError> {
        let Ok(id) = parse_point_set_id(id) else {
            return Ok(StorageReply::bad_request());
        };
        if !self.is_available() {
            return Ok(StorageReply::unavailable());
        }

        let point_sets = self
            .point_sets
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(point_sets
            .get(&id)
            .map_or_else(StorageReply::not_found, |bytes| {
                StorageReply::PointSet(bytes.clone())
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::encode_point_set;
    use crate::geometry::point::Point;

    fn three_points() -> Vec<u8> {
        encode_point_set(&[
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn register_then_get_returns_identical_bytes() {
        let manager = InMemoryPointSetManager::default();
        assert!(manager.is_empty());

        let bytes = three_points();
        let id = manager.register_point_set(bytes.clone()).unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.get_point_set(&id.to_string()),
            Ok(StorageReply::PointSet(bytes))
        );
    }

    #[test]
    fn register_rejects_malformed_binaries() {
        let manager = InMemoryPointSetManager::new();
        let err = manager.register_point_set(vec![0, 0, 0, 2, 1]).unwrap_err();
        assert_eq!(err.status(), Status::BadRequest);
        assert_eq!(err.to_string(), "Invalid binary format");
        assert!(matches!(
            err,
            RegistrationError::InvalidFormat {
                source: CodecError::InconsistentSize { .. }
            }
        ));
        assert!(manager.is_empty());
    }

    #[test]
    fn format_is_checked_before_availability() {
        let manager = InMemoryPointSetManager::new();
        manager.set_available(false);
        assert!(matches!(
            manager.register_point_set(vec![1]),
            Err(RegistrationError::InvalidFormat { .. })
        ));
        assert_eq!(
            manager.register_point_set(three_points()),
            Err(RegistrationError::Unavailable)
        );
    }

    #[test]
    fn get_validates_id_before_availability() {
        let manager = InMemoryPointSetManager::new();
        manager.set_available(false);
        assert_eq!(
            manager.get_point_set("not-a-uuid"),
            Ok(StorageReply::bad_request())
        );
        assert_eq!(
            manager.get_point_set(&make_uuid().to_string()),
            Ok(StorageReply::unavailable())
        );

        manager.set_available(true);
        assert!(manager.is_available());
        assert_eq!(
            manager.get_point_set(&make_uuid().to_string()),
            Ok(StorageReply::not_found())
        );
    }

    #[test]
    fn well_formed_nil_and_non_v4_ids_are_not_found() {
        let manager = InMemoryPointSetManager::new();
        manager.register_point_set(three_points()).unwrap();
        for id in [
            "00000000-0000-0000-0000-000000000000",
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        ] {
            assert_eq!(manager.get_point_set(id).unwrap().status(), Status::NotFound);
        }
    }

    #[test]
    fn shared_managers_forward() {
        let manager = Arc::new(InMemoryPointSetManager::new());
        let id = manager.register_point_set(three_points()).unwrap();

        let by_ref: &InMemoryPointSetManager = &manager;
        let boxed: Box<dyn PointSetManager> = Box::new(Arc::clone(&manager));
        assert_eq!(
            PointSetManager::get_point_set(&by_ref, &id.to_string()),
            boxed.get_point_set(&id.to_string())
        );
    }

    #[test]
    fn reply_constructors_use_standard_messages() {
        assert_eq!(
            StorageReply::not_found(),
            StorageReply::Error {
                status: Status::NotFound,
                message: NOT_FOUND_MESSAGE.to_owned()
            }
        );
        assert_eq!(StorageReply::unavailable().status(), Status::Unavailable);
        assert_eq!(StorageReply::PointSet(Vec::new()).status(), Status::Ok);
        assert_eq!(
            StorageError::Transport {
                message: "connection reset".into()
            }
            .to_string(),
            "PointSetManager transport failure: connection reset"
        );
    }
}
