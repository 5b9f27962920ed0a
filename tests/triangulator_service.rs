//! End-to-end scenarios for the triangulation service.
//!
//! Each scenario stores a PointSet (or scripts a storage reply), runs
//! `Triangulator::triangulate` and checks the status, the message and, on
//! success, both payloads.

use approx::assert_relative_eq;
use std::sync::{Arc, Once};
use std::thread;
use triangulator::prelude::*;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// TEST DOUBLES
// =============================================================================

/// Hands out fixed bytes for every id, without validating them.
struct RawBytes(Vec<u8>);

impl PointSetManager for RawBytes {
    fn get_point_set(&self, _id: &str) -> Result<StorageReply, StorageError> {
        Ok(StorageReply::PointSet(self.0.clone()))
    }
}

/// Never answers.
struct Unreachable;

impl PointSetManager for Unreachable {
    fn get_point_set(&self, _id: &str) -> Result<StorageReply, StorageError> {
        Err(StorageError::Transport {
            message: "connection refused".to_owned(),
        })
    }
}

/// A builder that always fails, to exercise the internal-failure path.
struct BrokenBuilder;

impl TriangulationAlgorithm for BrokenBuilder {
    fn triangulate(&mut self, points: &[Point<f32>]) -> Result<Vec<Triangle>, TriangulationError> {
        Err(TriangulationError::EmptyCavity {
            index: points.len() - 1,
        })
    }
}

fn encode(coords: &[[f32; 2]]) -> Vec<u8> {
    let points: Vec<Point<f32>> = coords.iter().copied().map(Point::new).collect();
    encode_point_set(&points).unwrap()
}

fn run(coords: &[[f32; 2]]) -> Response {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let id = manager.register_point_set(encode(coords)).unwrap();
    Triangulator::new(&manager).triangulate(&id.to_string())
}

// =============================================================================
// REJECTED POINT SETS
// =============================================================================

macro_rules! rejected_point_set {
    ($name:ident, $coords:expr, $message:expr) => {
        pastey::paste! {
            #[test]
            fn [<rejects_ $name>]() {
                let response = run(&$coords);
                assert_eq!(response.status(), Status::BadRequest);
                assert_eq!(response.error(), Some($message));
                assert!(response.triangles().is_none());
                assert!(response.point_set().is_none());
            }
        }
    };
}

rejected_point_set!(empty_point_set, [] as [[f32; 2]; 0], "Not enough points to triangulate");
rejected_point_set!(single_point, [[1.0, 2.0]], "Not enough points to triangulate");
rejected_point_set!(two_points, [[0.0, 0.0], [1.0, 1.0]], "Not enough points to triangulate");
rejected_point_set!(
    horizontal_segment,
    [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [-5.0, 0.0]],
    "The pointSet points form a segment"
);
rejected_point_set!(
    diagonal_segment,
    [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [10.0, 10.0]],
    "The pointSet points form a segment"
);
rejected_point_set!(
    vertical_segment,
    [[4.0, -1.0], [4.0, 0.0], [4.0, 7.5]],
    "The pointSet points form a segment"
);
rejected_point_set!(
    nan_coordinate,
    [[0.0, 0.0], [1.0, 0.0], [f32::NAN, 1.0]],
    "PointSet contains a non-finite coordinate at index 2"
);
rejected_point_set!(
    infinite_coordinate,
    [[0.0, f32::NEG_INFINITY], [1.0, 0.0], [0.0, 1.0]],
    "PointSet contains a non-finite coordinate at index 0"
);

// =============================================================================
// MALFORMED BINARIES
// =============================================================================

macro_rules! malformed_binary {
    ($name:ident, $bytes:expr, $message:expr) => {
        pastey::paste! {
            #[test]
            fn [<malformed_binary_ $name>]() {
                init_tracing();
                let response = Triangulator::new(RawBytes($bytes.to_vec())).triangulate("id");
                assert_eq!(response.status(), Status::BadRequest);
                assert_eq!(response.error(), Some($message));
            }
        }
    };
}

malformed_binary!(empty, [0u8; 0], "Binary too short: cannot read N");
malformed_binary!(two_bytes, [0x00u8, 0x01], "Binary too short: cannot read N");
malformed_binary!(
    missing_point,
    [0u8, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0],
    "Inconsistent size: expected 20 bytes, got 12"
);
malformed_binary!(
    trailing_byte,
    [0u8, 0, 0, 0, 9],
    "Inconsistent size: expected 4 bytes, got 5"
);
malformed_binary!(
    huge_count,
    [0xffu8, 0xff, 0xff, 0xff],
    "Inconsistent size: expected 34359738364 bytes, got 4"
);

// =============================================================================
// STORAGE FAILURES
// =============================================================================

#[test]
fn unreachable_storage_is_communication_failure() {
    init_tracing();
    let response = Triangulator::new(Unreachable).triangulate("any");
    assert_eq!(response.status(), Status::Unavailable);
    assert_eq!(
        response.error(),
        Some("Service unavailable: communication with PointSetManager failed")
    );
}

#[test]
fn storage_reported_unavailability_keeps_its_message() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let id = manager
        .register_point_set(encode(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]))
        .unwrap();
    manager.set_available(false);

    let response = Triangulator::new(&manager).triangulate(&id.to_string());
    assert_eq!(response.status(), Status::Unavailable);
    assert_eq!(
        response.error(),
        Some("The PointSet storage layer (database) is unavailable.")
    );
    assert_ne!(
        response.error(),
        Triangulator::new(Unreachable).triangulate("any").error()
    );
}

#[test]
fn unknown_id_is_not_found() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let response = Triangulator::new(&manager).triangulate(&make_uuid().to_string());
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(
        response.error(),
        Some("PointSet not found (as reported by the PointSetManager)")
    );
}

#[test]
fn well_formed_non_v4_id_is_not_found() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let mut triangulator = Triangulator::new(&manager);
    for id in [
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        "00000000-0000-0000-0000-000000000000",
    ] {
        let response = triangulator.triangulate(id);
        assert_eq!(response.status(), Status::NotFound, "{id}");
    }
}

#[test]
fn invalid_id_is_propagated_from_storage() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let response = Triangulator::new(&manager).triangulate("pointset_segment");
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(
        response.error(),
        Some("Bad request, e.g., invalid PointSetID format.")
    );
}

#[test]
fn builder_failure_is_internal() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let id = manager
        .register_point_set(encode(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]))
        .unwrap();
    let response = Triangulator::with_algorithm(&manager, BrokenBuilder).triangulate(&id.to_string());
    assert_eq!(
        response,
        Response::failure(Status::Internal, "Internal triangulation failure")
    );
}

// =============================================================================
// SUCCESSFUL TRIANGULATIONS
// =============================================================================

#[test]
fn unit_triangle_yields_one_triangle() {
    let coords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    let response = run(&coords);
    assert_eq!(response.status(), Status::Ok);

    let triangles = decode_triangle_set(response.triangles().unwrap()).unwrap();
    assert_eq!(triangles.len(), 1);
    assert_eq!(triangles[0].normalized(), Triangle::new(0, 1, 2));
    assert_eq!(response.point_set(), Some(encode(&coords).as_slice()));
}

#[test]
fn echoed_points_match_input() {
    let points = generate_random_points_seeded::<f32>(64, (-1000.0, 1000.0), 314).unwrap();
    let coords: Vec<[f32; 2]> = points.iter().map(|p| *p.coords()).collect();
    let response = run(&coords);

    let echoed = decode_point_set(response.point_set().unwrap()).unwrap();
    assert_eq!(echoed.len(), points.len());
    for (a, b) in echoed.iter().zip(&points) {
        assert_relative_eq!(a.x(), b.x(), epsilon = 1e-6);
        assert_relative_eq!(a.y(), b.y(), epsilon = 1e-6);
    }
}

#[test]
fn returned_triangles_are_valid_for_returned_points() {
    let points = generate_random_points_seeded::<f32>(200, (0.0, 50.0), 8).unwrap();
    let coords: Vec<[f32; 2]> = points.iter().map(|p| *p.coords()).collect();
    let response = run(&coords);
    assert!(response.is_success());

    let echoed = decode_point_set(response.point_set().unwrap()).unwrap();
    let triangles = decode_triangle_set(response.triangles().unwrap()).unwrap();
    assert!(!triangles.is_empty());
    for t in &triangles {
        let [a, b, c] = t.vertices().map(|i| {
            assert!((i as usize) < echoed.len(), "index {i} out of range");
            Point::<f64>::from(echoed[i as usize])
        });
        assert!(triangle_area(&a, &b, &c) > 0.0, "degenerate triangle {t:?}");
    }
}

#[test]
fn duplicate_points_are_tolerated() {
    let response = run(&[
        [0.0, 0.0],
        [2.0, 0.0],
        [0.0, 2.0],
        [2.0, 0.0],
        [2.0, 2.0],
        [0.0, 0.0],
    ]);
    assert_eq!(response.status(), Status::Ok);
    let triangles = decode_triangle_set(response.triangles().unwrap()).unwrap();
    assert_eq!(triangles.len(), 2);
    assert!(triangles.iter().all(|t| !t.contains_vertex(3) && !t.contains_vertex(5)));
}

#[test]
fn repeated_requests_are_identical() {
    init_tracing();
    let manager = InMemoryPointSetManager::new();
    let points = generate_random_points_seeded::<f32>(40, (-5.0, 5.0), 77).unwrap();
    let id = manager
        .register_point_set(encode_point_set(&points).unwrap())
        .unwrap()
        .to_string();

    let mut triangulator = Triangulator::new(&manager);
    let first = triangulator.triangulate(&id);
    let second = triangulator.triangulate(&id);
    assert_eq!(first.status(), Status::Ok);
    assert_eq!(first, second);
}

#[test]
fn concurrent_requests_share_one_manager() {
    init_tracing();
    let manager = Arc::new(InMemoryPointSetManager::new());
    let ids: Vec<String> = (0..4)
        .map(|seed| {
            let points = generate_random_points_seeded::<f32>(30, (0.0, 1.0), seed).unwrap();
            manager
                .register_point_set(encode_point_set(&points).unwrap())
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(manager.len(), 4);

    let expected: Vec<Response> = ids
        .iter()
        .map(|id| Triangulator::new(Arc::clone(&manager)).triangulate(id))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                let manager = Arc::clone(&manager);
                scope.spawn(move || Triangulator::new(manager).triangulate(id))
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
