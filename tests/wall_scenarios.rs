// End-to-end layouts over generated walls

use pin_layout::grid::{layer_candidate_count, synthesize_grid};
use pin_layout::*;

fn straight_host() -> HostSurface {
    HostSurface::new(
        LineSegment::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(10.0, 0.0, 0.0)),
        Vector3D::new(0.0, 1.0, 0.0),
    )
}

fn vertical_at(x: f64, y: f64, z: f64) -> LinearElement {
    LinearElement::straight(Point3D::new(x, y, z), Point3D::new(x, y, z + 1.0))
}

/// Two layers of vertical bars on both faces plus horizontal bars at 1, 2 and 3
fn reinforced_wall(openings: &[Opening]) -> WallModel {
    let spacing: Vec<Vector3D> = (0..5).map(|i| Vector3D::new(2.0 * i as f64, 0.0, 0.0)).collect();
    let levels: Vec<Vector3D> = (0..3).map(|i| Vector3D::new(0.0, 0.0, i as f64)).collect();

    let bars = vec![
        LinearElement::straight(Point3D::new(1.0, 0.08, 0.0), Point3D::new(1.0, 0.08, 4.0))
            .with_positions(spacing.clone()),
        LinearElement::straight(Point3D::new(1.0, -0.08, 0.0), Point3D::new(1.0, -0.08, 4.0))
            .with_positions(spacing),
        LinearElement::straight(Point3D::new(0.0, 0.06, 1.0), Point3D::new(10.0, 0.06, 1.0))
            .with_positions(levels.clone()),
        LinearElement::straight(Point3D::new(10.0, -0.06, 1.0), Point3D::new(0.0, -0.06, 1.0))
            .with_positions(levels),
        // Tie across the thickness: neither vertical nor horizontal
        LinearElement::straight(Point3D::new(5.0, -0.1, 2.0), Point3D::new(5.0, 0.1, 2.0)),
    ];

    WallModel::slab(straight_host(), 0.2, 4.0, openings, bars).unwrap()
}

#[test]
fn test_single_pair_scenario() {
    let bars = vec![
        vertical_at(2.0, 0.0, 0.0),
        vertical_at(2.0, 0.0, 3.0),
        LinearElement::straight(Point3D::new(0.0, 0.05, 1.0), Point3D::new(10.0, 0.05, 1.0))
            .with_positions(vec![Vector3D::zeros(), Vector3D::new(0.0, 0.0, 3.0)]),
    ];
    let wall = WallModel::slab(straight_host(), 0.2, 5.0, &[], bars).unwrap();

    let outcome = PinLayout::default().run_with(&wall.host, &wall).unwrap();

    assert_eq!(outcome.report.midpoints, 1);
    assert_eq!(outcome.report.layers, 2);
    // Layer 0 takes the only midpoint, layer 1 has no odd midpoint
    assert_eq!(outcome.report.candidates, 1);
    assert_eq!(outcome.points.len(), 1);
    assert!((outcome.points[0] - Point3D::new(2.0, 0.0, 1.0)).norm() < 1e-12);
}

#[test]
fn test_staggered_layout_on_solid_wall() {
    let wall = reinforced_wall(&[]);
    let outcome = PinLayout::default().run_with(&wall.host, &wall).unwrap();
    let report = &outcome.report;

    assert_eq!(report.vertical, 2);
    assert_eq!(report.horizontal, 2);
    assert_eq!(report.unclassified, 1);
    assert_eq!(report.midpoints, 5);
    assert_eq!(report.layers, 3);
    assert_eq!(
        report.candidates,
        (0..3).map(|k| layer_candidate_count(5, k)).sum::<usize>()
    );
    assert_eq!(report.retained, report.candidates);

    let first_layer: Vec<f64> = outcome.points.iter().filter(|p| p.z == 1.0).map(|p| p.x).collect();
    let second_layer: Vec<f64> = outcome.points.iter().filter(|p| p.z == 2.0).map(|p| p.x).collect();
    assert_eq!(first_layer, vec![1.0, 5.0, 9.0]);
    assert_eq!(second_layer, vec![3.0, 7.0]);
}

#[test]
fn test_opening_removes_covered_candidates() {
    // Opening around x = 5 between heights 0.5 and 2.5
    let wall = reinforced_wall(&[Opening::new(4.0, 6.0, 0.5, 2.5)]);
    let outcome = PinLayout::default().run_with(&wall.host, &wall).unwrap();

    assert!(outcome.report.retained < outcome.report.candidates);
    assert!(!outcome
        .points
        .iter()
        .any(|p| (p.x - 5.0).abs() < 1e-9 && p.z > 0.5 && p.z < 2.5));
    // Layer 3 is above the opening and keeps its pin at x = 5
    assert!(outcome
        .points
        .iter()
        .any(|p| (p.x - 5.0).abs() < 1e-9 && p.z == 3.0));
}

#[test]
fn test_backoff_does_not_change_outcome() {
    let wall = reinforced_wall(&[Opening::new(4.0, 6.0, 0.5, 2.5)]);
    let expected = PinLayout::default().insertion_points(&wall.host, &wall).unwrap();

    for ray_backoff in [0.0, 0.5, 50.0] {
        let config = PlacementConfig {
            ray_backoff,
            ..PlacementConfig::default()
        };
        let points = PinLayout::new(config).insertion_points(&wall.host, &wall).unwrap();
        assert_eq!(points, expected);
    }
}

#[test]
fn test_opening_covering_every_candidate() {
    let bars = vec![
        vertical_at(2.0, 0.08, 0.0),
        vertical_at(2.0, -0.08, 0.0),
        LinearElement::straight(Point3D::new(0.0, 0.06, 1.0), Point3D::new(10.0, 0.06, 1.0)),
    ];
    let openings = [Opening::new(1.0, 3.0, 0.5, 1.5)];
    let wall = WallModel::slab(straight_host(), 0.2, 3.0, &openings, bars).unwrap();

    let points = PinLayout::default().insertion_points(&wall.host, &wall).unwrap();
    assert!(points.is_empty());
}

#[test]
fn test_no_vertical_bars_gives_empty_grid() {
    let bars = vec![LinearElement::straight(
        Point3D::new(0.0, 0.06, 1.0),
        Point3D::new(10.0, 0.06, 1.0),
    )];
    let wall = WallModel::slab(straight_host(), 0.2, 3.0, &[], bars).unwrap();

    let outcome = PinLayout::default().run_with(&wall.host, &wall).unwrap();
    assert_eq!(outcome.report.midpoints, 0);
    assert_eq!(outcome.report.layers, 1);
    assert!(outcome.points.is_empty());
    assert!(synthesize_grid(&[], &[1.0, 2.0]).is_empty());
}

#[test]
fn test_skewed_wall() {
    // Wall along (3, 4) with its normal in plan
    let along = Vector3D::new(0.6, 0.8, 0.0);
    let normal = Vector3D::new(-0.8, 0.6, 0.0);
    let host = HostSurface::new(
        LineSegment::new(Point3D::origin(), Point3D::new(6.0, 8.0, 0.0)),
        normal,
    );

    let station = Point3D::origin() + along * 4.0;
    let front = station + normal * 0.08;
    let back = station - normal * 0.08;
    let bars = vec![
        LinearElement::straight(front, front + Vector3D::new(0.0, 0.0, 3.0)),
        LinearElement::straight(back, back + Vector3D::new(0.0, 0.0, 3.0)),
        LinearElement::straight(
            Point3D::new(0.0, 0.0, 1.5) + normal * 0.06,
            Point3D::new(6.0, 8.0, 1.5) + normal * 0.06,
        ),
    ];
    let wall = WallModel::slab(host, 0.2, 3.0, &[], bars).unwrap();

    let outcome = PinLayout::default().run_with(&wall.host, &wall).unwrap();
    assert_eq!(outcome.report.vertical, 2);
    assert_eq!(outcome.report.horizontal, 1);
    assert_eq!(outcome.points.len(), 1);
    assert!((outcome.points[0] - Point3D::new(2.4, 3.2, 1.5)).norm() < 1e-9);
}

#[test]
fn test_placements_carry_template_offset() {
    let wall = reinforced_wall(&[]);
    let config = PlacementConfig {
        template_offset: Vector3D::new(-0.1, -0.05, 0.2),
        ..PlacementConfig::default()
    };
    let layout = PinLayout::new(config);

    let points = layout.insertion_points(&wall.host, &wall).unwrap();
    let placements = layout.placements(&wall.host, &wall).unwrap();

    assert_eq!(points.len(), placements.len());
    for (point, placement) in points.iter().zip(&placements) {
        assert_eq!(placement.insertion_point, *point);
        assert!((placement.origin - (*point + Vector3D::new(-0.1, -0.05, 0.2))).norm() < 1e-12);
        assert_eq!(placement.x_axis, Vector3D::new(0.0, 1.0, 0.0));
    }
}
