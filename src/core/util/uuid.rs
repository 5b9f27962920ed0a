//! Point set identifiers.
//!
//! Stored point sets are keyed by version 4 UUIDs. The storage side generates
//! them with [`make_uuid`] and parses incoming identifier text with
//! [`parse_point_set_id`] before any lookup. Parsing checks syntax only: a
//! well-formed UUID of any version simply names no stored point set.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while parsing a point set identifier.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::util::{UuidValidationError, parse_point_set_id};
///
/// let err = parse_point_set_id("123").unwrap_err();
/// assert!(matches!(err, UuidValidationError::Malformed { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UuidValidationError {
    /// The identifier text is not a UUID at all.
    #[error("Malformed UUID {text:?}: {reason}")]
    Malformed {
        /// The rejected identifier text.
        text: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Generates a fresh version 4 [`Uuid`].
///
/// # Example
///
/// ```
/// use triangulator::core::util::make_uuid;
/// let uuid = make_uuid();
/// assert_eq!(uuid.get_version_num(), 4);
/// ```
#[must_use]
pub fn make_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Parses point set identifier text into a [`Uuid`].
///
/// Accepts the textual forms the `uuid` crate parses (hyphenated, simple,
/// braced, URN). The nil UUID and other versions parse like any other.
///
/// # Errors
///
/// Returns `UuidValidationError::Malformed` if `text` does not parse as a UUID.
///
/// # Examples
///
/// ```
/// use triangulator::core::util::{UuidValidationError, make_uuid, parse_point_set_id};
///
/// let id = make_uuid();
/// assert_eq!(parse_point_set_id(&id.to_string()), Ok(id));
/// assert!(matches!(
///     parse_point_set_id("not-a-uuid"),
///     Err(UuidValidationError::Malformed { .. })
/// ));
/// ```
pub fn parse_point_set_id(text: &str) -> Result<Uuid, UuidValidationError> {
    Uuid::parse_str(text).map_err(|e| UuidValidationError::Malformed {
        text: text.to_owned(),
        reason: e.to_string(),
    })
}
