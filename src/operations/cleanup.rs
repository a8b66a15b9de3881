use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::angle_2d::cross_2d;
use crate::math::Tolerances;

use super::iteration::IterationGuard;

/// Normalizes a polygon's segment list.
///
/// Drops zero-length lines and zero-radius arcs, turns full-circle arcs into
/// two semicircles, merges collinear lines and co-circular arcs, and splits
/// arcs sweeping more than half a turn. The traced shape is unchanged.
///
/// # Errors
///
/// Returns `GeometryError::StuckIteration` if merging fails to settle.
pub fn cleanup(polygon: &Polygon, tol: &Tolerances) -> Result<Polygon> {
    let segments = clean_segments(&polygon.segments(), tol)?;
    Ok(Polygon::from_segments(&segments))
}

/// Segment-level form of [`cleanup`] for chains that are already closed.
///
/// # Errors
///
/// Returns `GeometryError::StuckIteration` if merging fails to settle.
pub fn clean_segments(segments: &[Segment], tol: &Tolerances) -> Result<Vec<Segment>> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        expand_segment(seg, tol, &mut out);
    }

    let mut guard = IterationGuard::for_items("cleanup merge", out.len());
    let mut i = 0;
    while out.len() > 2 && i < out.len() {
        let j = (i + 1) % out.len();
        if let Some(merged) = merge(&out[i], &out[j], tol) {
            guard.tick(merged.start())?;
            out[i] = merged;
            out.remove(j);
            // Removing index 0 shifts the merged segment down by one.
            if j < i {
                i -= 1;
            }
            // The merged segment may now merge with its predecessor.
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    Ok(out)
}

fn expand_segment(seg: &Segment, tol: &Tolerances, out: &mut Vec<Segment>) {
    if seg.is_degenerate(tol) {
        return;
    }
    let Segment::Arc { center, .. } = *seg else {
        out.push(*seg);
        return;
    };
    if tol.points_close(&seg.start(), &seg.end()) {
        let start = seg.start();
        let antipode = center + (center - start);
        out.push(seg.with_ends(start, antipode));
        out.push(seg.with_ends(antipode, start));
        return;
    }
    let sweep = seg.sweep();
    if sweep > PI && !tol.angles_close(sweep, PI) {
        let mid = seg.midpoint();
        out.push(seg.with_ends(seg.start(), mid));
        out.push(seg.with_ends(mid, seg.end()));
        return;
    }
    out.push(*seg);
}

/// Joins two consecutive segments that continue the same line or circle.
fn merge(a: &Segment, b: &Segment, tol: &Tolerances) -> Option<Segment> {
    match (a, b) {
        (Segment::Line { .. }, Segment::Line { .. }) => {
            let ta = a.end_tangent();
            let tb = b.start_tangent();
            let straight = tol.negligible(cross_2d(&ta, &tb), 1.0) && ta.dot(&tb) > 0.0;
            let merged = Segment::line(a.start(), b.end());
            (straight && !merged.is_degenerate(tol)).then_some(merged)
        }
        (
            Segment::Arc {
                center: ca,
                rotation: ra,
                ..
            },
            Segment::Arc {
                center: cb,
                rotation: rb,
                ..
            },
        ) => {
            let (r_a, r_b) = (a.radius()?, b.radius()?);
            let scale = a.magnitude().max(b.magnitude());
            let co_circular =
                ra == rb && tol.points_close(ca, cb) && tol.negligible(r_a - r_b, scale);
            let sweep = a.sweep() + b.sweep();
            let fits = sweep < PI || tol.angles_close(sweep, PI);
            (co_circular && fits).then(|| a.with_ends(a.start(), b.end()))
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Endpoint, Rotation};
    use crate::math::Point2;
    use approx::assert_relative_eq;

    #[test]
    fn full_circle_becomes_two_semicircles() {
        let tol = Tolerances::default();
        let circle = Polygon::circle(Point2::new(0.0, 0.0), 2.0, Rotation::Clockwise);
        let cleaned = cleanup(&circle, &tol).unwrap();
        let segs = cleaned.segments();
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(Segment::is_arc));
        assert_relative_eq!(segs[0].sweep(), PI, epsilon = 1e-9);
        assert_relative_eq!(cleaned.signed_area(), circle.signed_area(), epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_and_duplicates_are_removed() {
        let tol = Tolerances::default();
        let poly = Polygon::from_points(&[
            (0.0, 0.0),
            (0.0, 5.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ]);
        let cleaned = cleanup(&poly, &tol).unwrap();
        assert_eq!(cleaned.len(), 4);
        assert_relative_eq!(cleaned.signed_area(), -100.0);
    }

    #[test]
    fn quarter_arcs_merge_up_to_half_a_turn() {
        let tol = Tolerances::default();
        let poly = Polygon::new(vec![
            Endpoint::straight(1.0, 0.0),
            Endpoint::arc(0.0, 1.0, 0.0, 0.0, Rotation::CounterClockwise),
            Endpoint::arc(-1.0, 0.0, 0.0, 0.0, Rotation::CounterClockwise),
        ]);
        let cleaned = cleanup(&poly, &tol).unwrap();
        let segs = cleaned.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs.iter().filter(|s| s.is_arc()).count(), 1);
    }

    #[test]
    fn large_arcs_are_split() {
        let tol = Tolerances::default();
        // Three-quarter circle closed by a chord.
        let poly = Polygon::new(vec![
            Endpoint::straight(1.0, 0.0),
            Endpoint::arc(0.0, -1.0, 0.0, 0.0, Rotation::CounterClockwise),
        ]);
        let cleaned = cleanup(&poly, &tol).unwrap();
        let arcs: Vec<_> = cleaned.segments().into_iter().filter(Segment::is_arc).collect();
        assert_eq!(arcs.len(), 2);
        for arc in &arcs {
            assert_relative_eq!(arc.sweep(), 0.75 * PI, epsilon = 1e-9);
        }
        assert_relative_eq!(cleaned.signed_area(), poly.signed_area(), epsilon = 1e-9);
    }
}
