use tracing::warn;

use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::{Point2, Tolerances};
use crate::operations::cleanup::clean_segments;
use crate::operations::query::{contact_points, point_in_polygon, Containment};

/// An outer clockwise boundary with its counter-clockwise holes.
pub type PolygonWithHoles = (Polygon, Vec<Polygon>);

/// Groups traced loops into outers and holes.
///
/// Clockwise loops are outers. Each counter-clockwise loop becomes a hole of
/// the smallest outer containing it; a hole touching that outer at a single
/// point is spliced into the outer instead. Holes with no outer are dropped.
///
/// # Errors
///
/// Propagates `GeometryError::StuckIteration` from point classification.
pub fn assemble(loops: Vec<Polygon>, tol: &Tolerances) -> Result<Vec<PolygonWithHoles>> {
    let (mut outers, holes): (Vec<Polygon>, Vec<Polygon>) =
        loops.into_iter().partition(Polygon::is_clockwise);
    outers.sort_by(|a, b| a.area().total_cmp(&b.area()));
    let mut result: Vec<PolygonWithHoles> = outers.into_iter().map(|o| (o, Vec::new())).collect();

    for hole in holes {
        let mut owner = None;
        for (k, (outer, _)) in result.iter().enumerate() {
            if encloses(outer, &hole, tol)? {
                owner = Some(k);
                break;
            }
        }
        let Some(k) = owner else {
            warn!(
                x = hole.first_point().x,
                y = hole.first_point().y,
                "dropping hole outside every outer boundary"
            );
            continue;
        };
        let (outer, outer_holes) = &mut result[k];
        match contact_points(outer, &hole, tol) {
            Some(points) if points.len() == 1 => {
                *outer = splice(outer, &hole, points[0], tol)?;
            }
            _ => outer_holes.push(hole),
        }
    }
    Ok(result)
}

/// Returns `true` if `outer` contains `inner`, judged by the first point of
/// `inner`'s boundary that is not on `outer`'s.
fn encloses(outer: &Polygon, inner: &Polygon, tol: &Tolerances) -> Result<bool> {
    for seg in inner.segments() {
        match point_in_polygon(&seg.midpoint(), outer, tol)? {
            Containment::OnBoundary => {}
            Containment::Inside => return Ok(true),
            Containment::Outside => return Ok(false),
        }
    }
    Ok(false)
}

/// Joins a hole to its outer at the single point `at` where they touch.
///
/// The outer is walked up to `at`, then the whole hole, then the rest of the
/// outer, giving one loop that visits `at` twice.
fn splice(outer: &Polygon, hole: &Polygon, at: Point2, tol: &Tolerances) -> Result<Polygon> {
    let outer_segs = rotate_to_start_at(&outer.segments(), at, tol);
    let hole_segs = rotate_to_start_at(&hole.segments(), at, tol);
    let joined: Vec<Segment> = hole_segs.into_iter().chain(outer_segs).collect();
    Ok(Polygon::from_segments(&clean_segments(&joined, tol)?))
}

/// Rotates a closed chain so that it starts at `at`, cutting the segment
/// through `at` if needed.
fn rotate_to_start_at(segments: &[Segment], at: Point2, tol: &Tolerances) -> Vec<Segment> {
    let split: Vec<Segment> = segments
        .iter()
        .flat_map(|seg| {
            if seg.contains_point_strictly(&at, tol) {
                seg.split_at(&[at], tol)
            } else {
                vec![*seg]
            }
        })
        .collect();
    let start = split
        .iter()
        .position(|seg| tol.points_close(&seg.start(), &at))
        .unwrap_or(0);
    split[start..].iter().chain(&split[..start]).copied().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_points(&[
            (x0, y0),
            (x0, y0 + size),
            (x0 + size, y0 + size),
            (x0 + size, y0),
        ])
    }

    #[test]
    fn holes_go_to_the_smallest_enclosing_outer() {
        let tol = Tolerances::default();
        let loops = vec![
            square(0.0, 0.0, 10.0),
            square(20.0, 0.0, 10.0),
            square(22.0, 2.0, 2.0).reversed(),
        ];
        let result = assemble(loops, &tol).unwrap();
        assert_eq!(result.len(), 2);
        let with_hole: Vec<_> = result.iter().filter(|(_, h)| !h.is_empty()).collect();
        assert_eq!(with_hole.len(), 1);
        assert!(with_hole[0].0.bounding_box().unwrap().min.x > 19.0);
    }

    #[test]
    fn hole_touching_outer_is_spliced() {
        let tol = Tolerances::default();
        let outer = square(0.0, 0.0, 4.0);
        // Diamond touching the left wall at (0, 2).
        let hole = Polygon::from_points(&[(0.0, 2.0), (1.0, 3.0), (2.0, 2.0), (1.0, 1.0)]).reversed();
        let expected_area = outer.area() - hole.area();
        let result = assemble(vec![outer, hole], &tol).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].1.is_empty());
        let spliced = &result[0].0;
        assert!(spliced.is_clockwise());
        assert!((spliced.area() - expected_area).abs() < 1e-9);
        // Outer corners, the touching point twice and the other three
        // diamond corners.
        assert_eq!(spliced.len(), 9);
    }

    #[test]
    fn rotation_only_cuts_the_segment_through_the_point() {
        let tol = Tolerances::default();
        let segments = square(0.0, 0.0, 4.0).segments();
        let rotated = rotate_to_start_at(&segments, Point2::new(0.0, 2.0), &tol);
        assert_eq!(rotated.len(), 5);
        assert_eq!(rotated[0].start(), Point2::new(0.0, 2.0));
        assert_eq!(rotated[4].end(), Point2::new(0.0, 2.0));
    }
}
