use crate::geometry::Polygon;
use crate::math::intersect_2d::{intersect, Intersection};
use crate::math::{Point2, Tolerances};

/// Points where the boundaries of two polygons meet.
///
/// Returns `None` when the boundaries share a stretch of positive length.
#[must_use]
pub fn contact_points(a: &Polygon, b: &Polygon, tol: &Tolerances) -> Option<Vec<Point2>> {
    let segs_b = b.segments();
    let mut points: Vec<Point2> = Vec::new();
    for sa in a.segments() {
        let bb = sa.bounding_box();
        for sb in segs_b.iter().filter(|s| s.bounding_box().overlaps(&bb, tol)) {
            match intersect(&sa, sb, tol) {
                Intersection::None => {}
                Intersection::Overlap => return None,
                Intersection::Points(hits) => {
                    for hit in hits {
                        if !points.iter().any(|p| tol.points_close(p, &hit)) {
                            points.push(hit);
                        }
                    }
                }
            }
        }
    }
    Some(points)
}

/// Returns `true` if the boundaries of the two polygons meet anywhere.
#[must_use]
pub fn boundaries_touch(a: &Polygon, b: &Polygon, tol: &Tolerances) -> bool {
    !matches!(contact_points(a, b, tol), Some(points) if points.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn squares_touching_at_a_corner() {
        let tol = Tolerances::default();
        let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let b = Polygon::from_points(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]);
        assert_eq!(contact_points(&a, &b, &tol).unwrap(), vec![Point2::new(1.0, 1.0)]);
        assert!(boundaries_touch(&a, &b, &tol));
    }

    #[test]
    fn shared_edge_is_reported_as_overlap() {
        let tol = Tolerances::default();
        let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let b = Polygon::from_points(&[(1.0, 0.0), (1.0, 1.0), (2.0, 1.0), (2.0, 0.0)]);
        assert!(contact_points(&a, &b, &tol).is_none());
        let far = Polygon::from_points(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0)]);
        assert!(!boundaries_touch(&a, &far, &tol));
    }
}
