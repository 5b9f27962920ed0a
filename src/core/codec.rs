//! Binary wire format for point sets and triangle sets.
//!
//! Both formats are a big-endian `u32` element count followed by fixed-size
//! records:
//!
//! | Format      | Record                                   | Total length  |
//! |-------------|------------------------------------------|---------------|
//! | PointSet    | `x: f32 BE`, `y: f32 BE` (8 bytes)       | `4 + 8·N`     |
//! | TriangleSet | `a, b, c: u32 BE` (12 bytes)             | `4 + 12·M`    |
//!
//! Decoding is strict: the total length must match the count exactly; any
//! deviation is an error, never a warning. Encoding copies raw bit patterns,
//! so `decode_point_set(encode_point_set(p))` reproduces `p` bit for bit
//! (NaN payloads included).
//!
//! # Examples
//!
//! ```rust
//! use triangulator::core::codec::{decode_point_set, encode_point_set};
//! use triangulator::geometry::point::Point;
//!
//! let points = vec![Point::new([0.0f32, 0.0]), Point::new([1.0, 0.0])];
//! let bytes = encode_point_set(&points).unwrap();
//! assert_eq!(bytes.len(), 4 + 8 * 2);
//! assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
//! assert_eq!(decode_point_set(&bytes).unwrap(), points);
//! ```

use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use thiserror::Error;

/// Length of the big-endian `u32` count prefix.
pub const COUNT_PREFIX_LEN: usize = 4;

/// Length of one encoded point (two big-endian `f32`).
pub const POINT_RECORD_LEN: usize = 8;

/// Length of one encoded triangle (three big-endian `u32`).
pub const TRIANGLE_RECORD_LEN: usize = 12;

/// An ordered point set as carried on the wire.
pub type PointSet = Vec<Point<f32>>;

/// An ordered triangle set as carried on the wire.
pub type TriangleSet = Vec<Triangle>;

/// Errors produced by the binary codec.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::codec::{CodecError, decode_point_set};
///
/// assert_eq!(
///     decode_point_set(&[0x00, 0x01]),
///     Err(CodecError::TooShort { len: 2 })
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer than [`COUNT_PREFIX_LEN`] bytes: the element count cannot be read.
    #[error("Binary too short: cannot read N")]
    TooShort {
        /// Number of bytes supplied.
        len: usize,
    },
    /// The total length does not equal `4 + record_len · count`.
    #[error("Inconsistent size: expected {expected} bytes, got {actual}")]
    InconsistentSize {
        /// Length implied by the count prefix.
        expected: u64,
        /// Length actually supplied.
        actual: usize,
    },
    /// The element count does not fit the `u32` count prefix.
    #[error("Cannot encode {count} elements: count exceeds u32::MAX")]
    CountOverflow {
        /// Number of elements that was to be encoded.
        count: usize,
    },
}

/// Exact encoded length of a point set with `count` points.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::codec::point_set_len;
///
/// assert_eq!(point_set_len(3), 28);
/// assert_eq!(point_set_len(u32::MAX), 4 + 8 * u64::from(u32::MAX));
/// ```
#[inline]
#[must_use]
pub const fn point_set_len(count: u32) -> u64 {
    encoded_len(count, POINT_RECORD_LEN)
}

/// Exact encoded length of a triangle set with `count` triangles.
#[inline]
#[must_use]
pub const fn triangle_set_len(count: u32) -> u64 {
    encoded_len(count, TRIANGLE_RECORD_LEN)
}

const fn encoded_len(count: u32, record_len: usize) -> u64 {
    COUNT_PREFIX_LEN as u64 + record_len as u64 * count as u64
}

#[inline]
fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Validates the count prefix against the total length and returns the records.
fn records(bytes: &[u8], record_len: usize) -> Result<&[u8], CodecError> {
    if bytes.len() < COUNT_PREFIX_LEN {
        return Err(CodecError::TooShort { len: bytes.len() });
    }
    let (prefix, body) = bytes.split_at(COUNT_PREFIX_LEN);
    let expected = encoded_len(be_u32(prefix), record_len);
    if expected != bytes.len() as u64 {
        return Err(CodecError::InconsistentSize {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(body)
}

fn count_prefix(count: usize) -> Result<[u8; COUNT_PREFIX_LEN], CodecError> {
    u32::try_from(count)
        .map(u32::to_be_bytes)
        .map_err(|_| CodecError::CountOverflow { count })
}

/// Decode a PointSet binary into its points, preserving order.
///
/// # Errors
///
/// * [`CodecError::TooShort`] if fewer than 4 bytes are supplied
/// * [`CodecError::InconsistentSize`] if the length is not exactly `4 + 8·N`
///
/// # Examples
///
/// ```rust
/// use triangulator::core::codec::{CodecError, decode_point_set};
/// use triangulator::geometry::point::Point;
///
/// let bytes = [
///     0x00, 0x00, 0x00, 0x01, // N = 1
///     0x3f, 0x80, 0x00, 0x00, // x = 1.0
///     0x40, 0x00, 0x00, 0x00, // y = 2.0
/// ];
/// assert_eq!(decode_point_set(&bytes).unwrap(), vec![Point::new([1.0, 2.0])]);
///
/// // N = 2 but only one point supplied.
/// assert_eq!(
///     decode_point_set(&[0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0]),
///     Err(CodecError::InconsistentSize { expected: 20, actual: 12 })
/// );
/// ```
pub fn decode_point_set(bytes: &[u8]) -> Result<PointSet, CodecError> {
    let body = records(bytes, POINT_RECORD_LEN)?;
    Ok(body
        .chunks_exact(POINT_RECORD_LEN)
        .map(|record| {
            let (x, y) = record.split_at(4);
            Point::new([f32::from_bits(be_u32(x)), f32::from_bits(be_u32(y))])
        })
        .collect())
}

/// Encode points as a PointSet binary.
///
/// # Errors
///
/// * [`CodecError::CountOverflow`] if there are more than `u32::MAX` points
pub fn encode_point_set(points: &[Point<f32>]) -> Result<Vec<u8>, CodecError> {
    let prefix = count_prefix(points.len())?;
    let mut bytes = Vec::with_capacity(COUNT_PREFIX_LEN + POINT_RECORD_LEN * points.len());
    bytes.extend_from_slice(&prefix);
    for point in points {
        bytes.extend_from_slice(&point.x().to_bits().to_be_bytes());
        bytes.extend_from_slice(&point.y().to_bits().to_be_bytes());
    }
    Ok(bytes)
}

/// Decode a TriangleSet binary. Index order within each triangle is kept.
///
/// # Errors
///
/// * [`CodecError::TooShort`] if fewer than 4 bytes are supplied
/// * [`CodecError::InconsistentSize`] if the length is not exactly `4 + 12·M`
pub fn decode_triangle_set(bytes: &[u8]) -> Result<TriangleSet, CodecError> {
    let body = records(bytes, TRIANGLE_RECORD_LEN)?;
    Ok(body
        .chunks_exact(TRIANGLE_RECORD_LEN)
        .map(|record| {
            Triangle::new(
                be_u32(&record[0..4]),
                be_u32(&record[4..8]),
                be_u32(&record[8..12]),
            )
        })
        .collect())
}

/// Encode triangles as a TriangleSet binary, indices in stored order.
///
/// # Errors
///
/// * [`CodecError::CountOverflow`] if there are more than `u32::MAX` triangles
///
/// # Examples
///
/// ```rust
/// use triangulator::core::codec::encode_triangle_set;
/// use triangulator::core::triangle::Triangle;
///
/// let bytes = encode_triangle_set(&[Triangle::new(2, 0, 1)]).unwrap();
/// assert_eq!(bytes, [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
pub fn encode_triangle_set(triangles: &[Triangle]) -> Result<Vec<u8>, CodecError> {
    let prefix = count_prefix(triangles.len())?;
    let mut bytes = Vec::with_capacity(COUNT_PREFIX_LEN + TRIANGLE_RECORD_LEN * triangles.len());
    bytes.extend_from_slice(&prefix);
    for triangle in triangles {
        for index in triangle.vertices() {
            bytes.extend_from_slice(&index.to_be_bytes());
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three points (0,0), (1,0), (0,1), as a storage service would hand them out.
    const UNIT_TRIANGLE: [u8; 28] = [
        0x00, 0x00, 0x00, 0x03, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x3f, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, 0x3f, 0x80, 0x00, 0x00,
    ];

    // =============================================================================
    // POINT SETS
    // =============================================================================

    #[test]
    fn decode_known_binary() {
        let points = decode_point_set(&UNIT_TRIANGLE).unwrap();
        assert_eq!(
            points,
            vec![
                Point::new([0.0, 0.0]),
                Point::new([1.0, 0.0]),
                Point::new([0.0, 1.0]),
            ]
        );
        assert_eq!(encode_point_set(&points).unwrap(), UNIT_TRIANGLE);
    }

    #[test]
    fn decode_rejects_short_input() {
        for len in 0..COUNT_PREFIX_LEN {
            let bytes = vec![0u8; len];
            assert_eq!(decode_point_set(&bytes), Err(CodecError::TooShort { len }));
        }
        assert_eq!(
            CodecError::TooShort { len: 2 }.to_string(),
            "Binary too short: cannot read N"
        );
    }

    #[test]
    fn decode_rejects_trailing_and_missing_bytes() {
        let mut long = UNIT_TRIANGLE.to_vec();
        long.push(0);
        assert_eq!(
            decode_point_set(&long),
            Err(CodecError::InconsistentSize {
                expected: 28,
                actual: 29
            })
        );

        let short = &UNIT_TRIANGLE[..27];
        let err = decode_point_set(short).unwrap_err();
        assert_eq!(err.to_string(), "Inconsistent size: expected 28 bytes, got 27");
    }

    #[test]
    fn decode_huge_count_does_not_overflow() {
        let bytes = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        assert_eq!(
            decode_point_set(&bytes),
            Err(CodecError::InconsistentSize {
                expected: point_set_len(u32::MAX),
                actual: 8
            })
        );
    }

    #[test]
    fn empty_point_set_is_valid() {
        assert_eq!(decode_point_set(&[0, 0, 0, 0]), Ok(Vec::new()));
        assert_eq!(encode_point_set(&[]).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn special_floats_survive_bit_exact() {
        let nan = f32::from_bits(0x7fc0_1234);
        let points = vec![
            Point::new([nan, f32::INFINITY]),
            Point::new([-0.0, f32::MIN_POSITIVE]),
        ];
        let bytes = encode_point_set(&points).unwrap();
        let back = decode_point_set(&bytes).unwrap();
        assert_eq!(back[0].x().to_bits(), 0x7fc0_1234);
        assert_eq!(back[0].y(), f32::INFINITY);
        assert_eq!(back[1].x().to_bits(), (-0.0f32).to_bits());
        assert_eq!(back[1].y(), f32::MIN_POSITIVE);
    }

    // =============================================================================
    // TRIANGLE SETS
    // =============================================================================

    #[test]
    fn triangle_set_roundtrip_keeps_index_order() {
        let triangles = vec![Triangle::new(0, 1, 2), Triangle::new(3, 1, 0)];
        let bytes = encode_triangle_set(&triangles).unwrap();
        assert_eq!(bytes.len() as u64, triangle_set_len(2));
        assert_eq!(&bytes[16..20], &[0, 0, 0, 3]);
        assert_eq!(decode_triangle_set(&bytes).unwrap(), triangles);
    }

    #[test]
    fn triangle_set_decode_validates_length() {
        assert_eq!(
            decode_triangle_set(&[0, 0, 1]),
            Err(CodecError::TooShort { len: 3 })
        );
        assert_eq!(
            decode_triangle_set(&[0, 0, 0, 1, 0, 0, 0, 0]),
            Err(CodecError::InconsistentSize {
                expected: 16,
                actual: 8
            })
        );
    }
}
