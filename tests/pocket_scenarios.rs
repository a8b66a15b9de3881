#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use tenonkit::operations::{add, offset, OffsetDirection};
use tenonkit::{plan_pocket, GeometryError, Point2, Polygon, Rotation, TenonProblem};

fn pocket() -> Polygon {
    Polygon::from_points(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
}

fn centre_tenon() -> Polygon {
    Polygon::from_points(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)])
}

#[test]
fn square_shrinks_by_the_cutter_radius() {
    let result = offset(&pocket(), 1.0, OffsetDirection::Shrink).unwrap();
    assert_eq!(result.len(), 1);
    let expected = Polygon::from_points(&[(1.0, 1.0), (1.0, 9.0), (9.0, 9.0), (9.0, 1.0)]);
    let shrunk = &result[0];
    assert_eq!(shrunk.len(), 4);
    for p in expected.points() {
        let found = shrunk.points().iter().any(|q| (q.coords - p.coords).norm() < 1e-9);
        assert!(found, "missing corner {p:?}");
    }
}

#[test]
fn centre_tenon_expands_around_the_cutter() {
    let plan = plan_pocket(&pocket(), &[centre_tenon()], 1.0, 0.0, 0.0, false).unwrap();
    assert_eq!(plan.final_pass.len(), 1);
    let region = &plan.final_pass[0];
    assert!(region.boundary.is_clockwise());
    assert_relative_eq!(region.boundary.area(), 64.0, epsilon = 1e-9);

    assert_eq!(region.tenons.len(), 1);
    let tenon = &region.tenons[0];
    assert!(!tenon.is_clockwise());
    let bb = tenon.bounding_box().unwrap();
    assert_relative_eq!(bb.min.x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(bb.min.y, 3.0, epsilon = 1e-9);
    assert_relative_eq!(bb.max.x, 7.0, epsilon = 1e-9);
    assert_relative_eq!(bb.max.y, 7.0, epsilon = 1e-9);
}

#[test]
fn oversized_cutter_is_rejected() {
    let err = plan_pocket(&pocket(), &[centre_tenon()], 3.0, 0.0, 0.0, false).unwrap_err();
    assert!(matches!(
        err,
        GeometryError::UnsafeTenonGeometry {
            problem: TenonProblem::TenonLargerThanPocket,
            ..
        }
    ));
    assert!(!err.is_fatal());
}

#[test]
fn overlapping_unit_squares_add_to_a_hexagon() {
    let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    let b = Polygon::from_points(&[(0.5, 0.5), (0.5, 1.5), (1.5, 1.5), (1.5, 0.5)]);
    let result = add(&a, &b, &tenonkit::Tolerances::default()).unwrap();
    assert_eq!(result.len(), 1);
    let (outer, holes) = &result[0];
    assert!(holes.is_empty());
    // Eight corners: each square keeps three, plus the two crossings.
    assert_eq!(outer.len(), 8);
    assert_relative_eq!(outer.area(), 1.75, epsilon = 1e-9);
}

#[test]
fn unit_squares_sharing_an_edge_add_to_a_hexagon() {
    let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    let b = Polygon::from_points(&[(0.5, 0.0), (0.5, 0.5), (1.5, 0.5), (1.5, 0.0)]);
    let result = add(&a, &b, &tenonkit::Tolerances::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].1.is_empty());
    assert_eq!(result[0].0.len(), 6);
}

#[test]
fn negative_cutter_radius_is_rejected() {
    let err = offset(&pocket(), -1.0, OffsetDirection::Shrink).unwrap_err();
    assert_eq!(
        err,
        GeometryError::InvalidDistance {
            distance: -1.0,
            at: Point2::new(0.0, 0.0)
        }
    );
    let err = plan_pocket(&pocket(), &[], -1.0, 0.0, 0.0, false).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidDistance { .. }));
}

#[test]
fn circle_shrunk_past_its_radius_is_degenerate() {
    let circle = Polygon::circle(Point2::new(0.0, 0.0), 5.0, Rotation::Clockwise);
    let err = offset(&circle, 6.0, OffsetDirection::Shrink).unwrap_err();
    assert!(matches!(err, GeometryError::DegenerateOffset { .. }));
}

#[test]
fn circle_shrinks_to_a_concentric_circle() {
    let circle = Polygon::circle(Point2::new(0.0, 0.0), 5.0, Rotation::Clockwise);
    let result = offset(&circle, 2.0, OffsetDirection::Shrink).unwrap();
    assert_eq!(result.len(), 1);
    let bb = result[0].bounding_box().unwrap();
    assert_relative_eq!(bb.width(), 6.0, epsilon = 1e-9);
    assert_relative_eq!(bb.center().x, 0.0, epsilon = 1e-9);
}

#[test]
fn tenon_crossing_the_wall_notches_the_pocket() {
    let notch = Polygon::from_points(&[(8.0, 4.0), (8.0, 6.0), (12.0, 6.0), (12.0, 4.0)]);
    let plan = plan_pocket(&pocket(), &[notch], 0.5, 0.0, 0.0, false).unwrap();
    assert_eq!(plan.final_pass.len(), 1);
    let region = &plan.final_pass[0];
    assert!(region.tenons.is_empty());
    let bb = region.boundary.bounding_box().unwrap();
    assert_relative_eq!(bb.max.x, 9.5, epsilon = 1e-9);
    assert!(region.boundary.area() < 81.0 - 2.0);
}

#[test]
fn nested_tenons_are_reported() {
    let outer = Polygon::from_points(&[(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0)]);
    let err = plan_pocket(&pocket(), &[outer, centre_tenon()], 0.5, 0.0, 0.0, false).unwrap_err();
    assert!(matches!(
        err,
        GeometryError::UnsafeTenonGeometry {
            problem: TenonProblem::NestedTenon,
            ..
        }
    ));
}
