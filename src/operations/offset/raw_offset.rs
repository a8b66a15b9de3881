use crate::error::{GeometryError, Result};
use crate::geometry::{Rotation, Segment};
use crate::math::angle_2d::cross_2d;
use crate::math::{Point2, Tolerances};

/// Builds the raw offset chain of a closed segment loop.
///
/// Every segment is moved `left` to its left (negative values move right).
/// Consecutive offsets are joined at each original vertex:
/// - where the loop turns away from the offset side, by an arc of radius
///   `|left|` around the vertex,
/// - where it turns towards it, by two lines through the vertex,
/// - across collapsed arcs, by lines through the skipped original vertices.
///
/// The connectors that do not belong to the result lie closer than `|left|`
/// to the original and are removed by the distance filter.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateOffset` if every segment collapses.
pub fn build(segments: &[Segment], left: f64, tol: &Tolerances) -> Result<Vec<Segment>> {
    let offsets: Vec<Option<Segment>> = segments.iter().map(|s| s.offset(left, tol)).collect();
    let alive: Vec<usize> = (0..segments.len())
        .filter(|&i| offsets[i].is_some())
        .collect();
    if alive.is_empty() {
        let at = segments.first().map_or_else(Point2::origin, Segment::start);
        return Err(GeometryError::DegenerateOffset {
            distance: left.abs(),
            at,
        });
    }

    let n = segments.len();
    let mut raw = Vec::with_capacity(alive.len() * 3);
    for (k, &i) in alive.iter().enumerate() {
        let j = alive[(k + 1) % alive.len()];
        let (Some(prev), Some(next)) = (offsets[i], offsets[j]) else {
            continue;
        };
        raw.push(prev);

        let a = prev.end();
        let b = next.start();
        let skipped = (j + n - i - 1) % n;
        if skipped > 0 {
            if !tol.points_close(&a, &b) {
                let mut path = vec![a];
                let mut idx = i;
                loop {
                    path.push(segments[idx].end());
                    idx = (idx + 1) % n;
                    if idx == j {
                        break;
                    }
                }
                path.push(b);
                push_polyline(&mut raw, &path, tol);
            }
            continue;
        }

        if tol.points_close(&a, &b) {
            continue;
        }
        let vertex = segments[i].end();
        let t_in = segments[i].end_tangent();
        let t_out = segments[j].start_tangent();
        let cross = cross_2d(&t_in, &t_out);
        let reversal = tol.negligible(cross, 1.0) && t_in.dot(&t_out) < 0.0;
        if reversal || cross * left.signum() < 0.0 {
            let rotation = if left < 0.0 {
                Rotation::CounterClockwise
            } else {
                Rotation::Clockwise
            };
            raw.push(Segment::arc(a, b, vertex, rotation));
        } else {
            push_polyline(&mut raw, &[a, vertex, b], tol);
        }
    }
    Ok(raw)
}

fn push_polyline(raw: &mut Vec<Segment>, path: &[Point2], tol: &Tolerances) {
    for pair in path.windows(2) {
        let seg = Segment::line(pair[0], pair[1]);
        if !seg.is_degenerate(tol) {
            raw.push(seg);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use approx::assert_relative_eq;

    fn square_cw() -> Vec<Segment> {
        Polygon::from_points(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).segments()
    }

    #[test]
    fn outward_corners_get_arcs() {
        let tol = Tolerances::default();
        let raw = build(&square_cw(), 1.0, &tol).unwrap();
        assert_eq!(raw.len(), 8);
        let arcs: Vec<_> = raw.iter().filter(|s| s.is_arc()).collect();
        assert_eq!(arcs.len(), 4);
        for arc in arcs {
            assert_relative_eq!(arc.radius().unwrap(), 1.0, epsilon = 1e-9);
            assert!(matches!(
                arc,
                Segment::Arc {
                    rotation: Rotation::Clockwise,
                    ..
                }
            ));
        }
    }

    #[test]
    fn inward_corners_route_through_the_vertex() {
        let tol = Tolerances::default();
        let raw = build(&square_cw(), -1.0, &tol).unwrap();
        assert_eq!(raw.len(), 12);
        assert!(raw.iter().all(|s| !s.is_arc()));
        assert!(raw
            .iter()
            .any(|s| tol.points_close(&s.end(), &Point2::new(0.0, 10.0))));
    }

    #[test]
    fn collapsed_circle_is_degenerate() {
        let tol = Tolerances::default();
        let circle = Polygon::circle(Point2::new(0.0, 0.0), 1.0, Rotation::Clockwise);
        let semis = crate::operations::cleanup::clean_segments(&circle.segments(), &tol).unwrap();
        let err = build(&semis, -2.0, &tol).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateOffset { .. }));
    }
}
