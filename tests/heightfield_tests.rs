use bevy::math::{Vec2, Vec3};
use bevy_elevation_map::{ElevationMapError, ElevationSamples, HeightField, barycentric_height};

const EPS: f32 = 1e-5;

/// 4×4 grid, resolution 1, every sample at z = 2.0.
fn plane_at_two() -> HeightField {
    let samples = ElevationSamples::filled(4, 4, 0.5);
    HeightField::from_normalized(&samples, 0.0, 4.0, 1.0).expect("valid grid")
}

/// 4×4 grid, resolution 2, irregular world heights around cell (1, 1).
fn irregular_field() -> HeightField {
    let samples = ElevationSamples::from_fn(4, 4, |col, row| match (col, row) {
        (1, 1) => 1.0,
        (1, 2) => 3.0,
        (2, 1) => 2.0,
        (2, 2) => 7.0,
        _ => 0.0,
    });
    HeightField::from_world_heights(samples, 2.0).expect("valid grid")
}

/// Heights rise one unit per column along +X.
fn x_ramp(cols: usize, rows: usize) -> HeightField {
    let samples = ElevationSamples::from_fn(cols, rows, |col, _| col as f32);
    HeightField::from_world_heights(samples, 1.0).expect("valid grid")
}

#[test]
fn bounds_are_centered_on_origin() {
    let field = HeightField::from_world_heights(ElevationSamples::filled(6, 4, 0.0), 0.5)
        .expect("valid grid");
    assert_eq!(field.x_min(), -1.5);
    assert_eq!(field.x_max(), 1.5);
    assert_eq!(field.y_min(), -1.0);
    assert_eq!(field.y_max(), 1.0);
}

#[test]
fn rescales_normalized_samples_into_range() {
    let samples = ElevationSamples::from_fn(3, 3, |col, _| col as f32 * 0.5);
    let field = HeightField::from_normalized(&samples, -2.0, 6.0, 1.0).unwrap();
    assert_eq!(field.sample(0, 1), -2.0);
    assert_eq!(field.sample(1, 1), 2.0);
    assert_eq!(field.sample(2, 1), 6.0);
}

#[test]
fn constant_plane_center_query() {
    let field = plane_at_two();
    let z = field.query(0.0, 0.0).expect("grid center is queryable");
    assert!((z - 2.0).abs() < EPS, "expected 2.0, got {z}");
}

#[test]
fn constant_plane_is_flat_everywhere_inside() {
    let field = plane_at_two();
    for &(x, y) in &[(-0.9, -0.9), (0.3, -0.7), (-0.2, 0.8), (0.99, 0.99)] {
        let z = field.query(x, y).expect("interior point");
        assert!((z - 2.0).abs() < EPS, "({x}, {y}) gave {z}");
    }
}

#[test]
fn outer_edge_is_not_queryable() {
    let field = plane_at_two();
    // x_min = -2.0, so x = -1.5 falls in column cx = 0.
    assert_eq!(field.query(-1.5, 0.0), None);
    assert_eq!(field.query(field.x_min(), 0.0), None);
}

#[test]
fn outermost_ring_is_never_queryable() {
    let field = HeightField::from_world_heights(ElevationSamples::filled(6, 5, 1.0), 1.0).unwrap();
    let cell_center = |c: usize, min: f64| min + c as f64 + 0.5;

    for cx in 0..field.cols() {
        for cy in 0..field.rows() {
            let on_ring = cx == 0 || cy == 0 || cx == field.cols() - 1 || cy == field.rows() - 1;
            let x = cell_center(cx, field.x_min());
            let y = cell_center(cy, field.y_min());
            assert_eq!(
                field.query(x, y).is_none(),
                on_ring,
                "cell ({cx}, {cy}) ring={on_ring}"
            );
        }
    }
}

#[test]
fn points_beyond_the_grid_are_not_queryable() {
    let field = plane_at_two();
    assert_eq!(field.query(100.0, 0.0), None);
    assert_eq!(field.query(0.0, -100.0), None);
    assert!(!field.contains(-3.0, -3.0));
}

#[test]
fn innermost_valid_corner_is_queryable() {
    let field = plane_at_two();
    let x = field.x_min() + field.resolution();
    let y = field.y_min() + field.resolution();
    assert!(field.contains(x, y));
    assert!(field.query(x, y).is_some());
}

#[test]
fn non_finite_coordinates_are_not_queryable() {
    let field = plane_at_two();
    assert_eq!(field.query(f64::NAN, 0.0), None);
    assert_eq!(field.query(0.0, f64::INFINITY), None);
}

#[test]
fn upper_triangle_matches_hand_computed_value() {
    let field = irregular_field();
    // Cell (1, 1) spans x ∈ [-2, 0), y ∈ [-2, 0). Local (0.4, 1.2): ly >= lx.
    // z = z00 + lx/res * (z11 - z01) + ly/res * (z01 - z00) = 1 + 0.2*4 + 0.6*2
    let z = field.query(-1.6, -0.8).unwrap();
    assert!((z - 3.0).abs() < EPS, "got {z}");
}

#[test]
fn lower_triangle_matches_hand_computed_value() {
    let field = irregular_field();
    // Local (1.0, 0.2): ly < lx.
    // z = z00 + lx/res * (z10 - z00) + ly/res * (z11 - z10) = 1 + 0.5*1 + 0.1*5
    let z = field.query(-1.0, -1.8).unwrap();
    assert!((z - 2.0).abs() < EPS, "got {z}");
}

#[test]
fn grid_vertices_return_their_sample() {
    let field = irregular_field();
    let z = field.query(-2.0, -2.0).unwrap();
    assert!((z - 1.0).abs() < EPS, "got {z}");
}

#[test]
fn triangles_agree_along_the_diagonal() {
    let field = irregular_field();
    // On lx == ly both planes reduce to z00 + t * (z11 - z00).
    let on = field.query(-1.0, -1.0).unwrap();
    let expected = 1.0 + 0.5 * (7.0 - 1.0);
    assert!((on - expected).abs() < EPS, "got {on}");
}

/// Heights follow both cell offsets `(lx, ly)`. Evaluating the triangle at
/// `(ly, ly)` would make these two points, which differ only in x, collide.
#[test]
fn interpolation_uses_x_offset_within_cell() {
    let field = x_ramp(5, 5);
    // x_min = y_min = -2.5; cell (1, 1) starts at (-1.5, -1.5).
    let a = field.query(-1.4, -1.45).unwrap();
    let b = field.query(-1.1, -1.45).unwrap();
    assert!((a - 1.1).abs() < EPS, "got {a}");
    assert!((b - 1.4).abs() < EPS, "got {b}");
}

#[test]
fn repeated_queries_are_identical() {
    let field = irregular_field();
    let first = field.query(-0.37, -1.21).unwrap();
    for _ in 0..10 {
        assert_eq!(field.query(-0.37, -1.21).unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn degenerate_range_is_rejected() {
    let samples = ElevationSamples::filled(4, 4, 0.25);
    for z in [0.0, -3.5, 1.0, 1e6] {
        let err = HeightField::from_normalized(&samples, z, z, 1.0).unwrap_err();
        assert!(
            matches!(err, ElevationMapError::DegenerateRange { .. }),
            "min=max={z} gave {err:?}"
        );
    }
}

#[test]
fn flat_zero_range_is_a_configuration_error() {
    let samples = ElevationSamples::filled(4, 4, 0.0);
    let err = HeightField::from_normalized(&samples, 0.0, 0.0, 1.0).unwrap_err();
    assert!(matches!(err, ElevationMapError::DegenerateRange { .. }));
}

#[test]
fn non_positive_resolution_is_rejected() {
    for res in [0.0, -1.0, f64::NAN] {
        let err = HeightField::from_world_heights(ElevationSamples::filled(3, 3, 0.0), res)
            .unwrap_err();
        assert!(matches!(err, ElevationMapError::InvalidResolution(_)));
    }
}

#[test]
fn grid_smaller_than_two_by_two_is_rejected() {
    let err = HeightField::from_world_heights(ElevationSamples::filled(1, 5, 0.0), 1.0)
        .unwrap_err();
    assert!(matches!(err, ElevationMapError::GridTooSmall { cols: 1, rows: 5 }));
}

#[test]
fn sample_count_must_match_dimensions() {
    let err = ElevationSamples::new(3, 3, vec![0.0; 8]).unwrap_err();
    assert!(matches!(
        err,
        ElevationMapError::SampleCountMismatch {
            expected: 9,
            actual: 8
        }
    ));
}

#[test]
fn barycentric_weights_reproduce_vertices() {
    let p1 = Vec3::new(0.0, 0.0, 1.0);
    let p2 = Vec3::new(2.0, 0.0, 5.0);
    let p3 = Vec3::new(0.0, 2.0, -3.0);
    assert!((barycentric_height(p1, p2, p3, Vec2::new(0.0, 0.0)) - 1.0).abs() < EPS);
    assert!((barycentric_height(p1, p2, p3, Vec2::new(2.0, 0.0)) - 5.0).abs() < EPS);
    assert!((barycentric_height(p1, p2, p3, Vec2::new(0.0, 2.0)) + 3.0).abs() < EPS);
}

#[test]
#[should_panic(expected = "degenerate interpolation triangle")]
fn degenerate_triangle_panics() {
    let p1 = Vec3::new(0.0, 0.0, 1.0);
    let p2 = Vec3::new(1.0, 1.0, 2.0);
    let p3 = Vec3::new(2.0, 2.0, 3.0);
    barycentric_height(p1, p2, p3, Vec2::new(0.5, 0.5));
}

#[test]
fn non_finite_world_heights_are_rejected() {
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let samples = ElevationSamples::from_fn(4, 3, |col, row| {
            if (col, row) == (2, 1) { bad } else { 0.0 }
        });
        let err = HeightField::from_world_heights(samples, 1.0).unwrap_err();
        assert!(
            matches!(err, ElevationMapError::NonFiniteElevation { col: 2, row: 1 }),
            "{bad} gave {err:?}"
        );
    }
}

#[test]
fn non_finite_normalized_samples_are_rejected() {
    let samples = ElevationSamples::from_fn(3, 3, |col, _| if col == 0 { f32::NAN } else { 0.5 });
    let err = HeightField::from_normalized(&samples, 0.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, ElevationMapError::NonFiniteElevation { col: 0, row: 0 }));
}
