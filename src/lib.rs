//! # triangulator
//!
//! A 2-D Delaunay triangulation service. Point sets are fetched from a
//! storage collaborator as compact big-endian binaries, validated,
//! triangulated with the [Bowyer-Watson algorithm] and returned as index
//! triples in a matching binary format.
//!
//! [Bowyer-Watson algorithm]: https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm
//!
//! # Features
//!
//! - Strict binary codec for point sets and triangle sets
//! - Bowyer-Watson construction with cached circumcircles and an explicit edge counter
//!   for cavity boundaries
//! - A request pipeline that maps every failure to a 400/404/500/503 response
//! - A storage seam ([`service::storage::PointSetManager`]) with an in-memory implementation
//! - Generic `f32`/`f64` points serializable with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use triangulator::prelude::*;
//!
//! let points = vec![
//!     Point::new([0.0f32, 0.0]),
//!     Point::new([4.0, 0.0]),
//!     Point::new([4.0, 3.0]),
//!     Point::new([0.0, 3.0]),
//!     Point::new([2.0, 1.0]),
//! ];
//!
//! let manager = InMemoryPointSetManager::new();
//! let id = manager
//!     .register_point_set(encode_point_set(&points).unwrap())
//!     .unwrap();
//!
//! let mut triangulator = Triangulator::new(&manager);
//! let response = triangulator.triangulate(&id.to_string());
//! assert_eq!(response.status(), Status::Ok);
//!
//! let triangles = decode_triangle_set(response.triangles().unwrap()).unwrap();
//! assert_eq!(triangles.len(), 4);
//! assert!(triangles.iter().all(|t| t.max_vertex() < 5));
//! ```
//!
//! # Wire Formats
//!
//! | Binary | Layout |
//! |---|---|
//! | PointSet | `[N: u32 BE][N × (x: f32 BE, y: f32 BE)]`, exactly `4 + 8·N` bytes |
//! | TriangleSet | `[M: u32 BE][M × (a, b, c: u32 BE)]`, exactly `4 + 12·M` bytes |
//!
//! Triangle indices refer to positions in the accompanying PointSet.
//!
//! # Error Responses
//!
//! | Status | Cause |
//! |---|---|
//! | 400 | malformed identifier (reported by storage), malformed binary, fewer than 3 points, non-finite coordinate, all points collinear |
//! | 404 | storage has nothing under the identifier |
//! | 500 | the builder or encoder failed |
//! | 503 | storage reports itself unavailable, or cannot be reached |
//!
//! # Using the Builder Directly
//!
//! ```rust
//! use triangulator::prelude::*;
//!
//! let points = generate_random_points_seeded::<f32>(100, (-10.0, 10.0), 42).unwrap();
//! let mut algorithm = BowyerWatson::new();
//! let triangles = algorithm.triangulate(&points).unwrap();
//!
//! assert!(!triangles.is_empty());
//! assert_eq!(algorithm.statistics().points_inserted, 100);
//! ```

#![allow(clippy::multiple_crate_versions)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Triangulation data types, the binary codec and the Delaunay builder.
pub mod core {
    /// Triangulation algorithms
    pub mod algorithms {
        /// Bowyer-Watson Delaunay builder
        pub mod bowyer_watson;
        pub use bowyer_watson::*;
    }
    pub mod codec;
    pub mod collections;
    pub mod edge;
    pub mod triangle;
    pub mod util;
    /// Traits for pluggable triangulation algorithms
    pub mod traits {
        pub mod triangulation_algorithm;
        pub use triangulation_algorithm::*;
    }
    pub use codec::*;
    pub use edge::*;
    pub use traits::*;
    pub use triangle::*;
    pub use util::*;
}

/// Points, geometric predicates and circumcircles.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    pub mod util;
    /// Traits for coordinate scalar types
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
    pub use util::*;
}

/// The triangulation service and its storage seam.
pub mod service {
    pub mod response;
    pub mod storage;
    pub mod triangulator;
    pub use response::*;
    pub use storage::*;
    pub use triangulator::*;
}

/// A prelude module that re-exports commonly used types.
pub mod prelude {
    pub use crate::core::{
        algorithms::bowyer_watson::*, codec::*, edge::*, traits::triangulation_algorithm::*,
        triangle::*, util::*,
    };

    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
    };

    pub use crate::geometry::{point::*, predicates::*, traits::coordinate::*, util::*};

    pub use crate::service::{response::*, storage::*, triangulator::*};
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================
