use std::cmp::Ordering;

use super::angle_2d::cross_2d;
use super::{Point2, Tolerances, Vector2};
use crate::geometry::Segment;

/// Result of intersecting two segments.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection {
    None,
    /// Isolated contact points, sorted and free of duplicates.
    Points(Vec<Point2>),
    /// The segments share a stretch of positive length.
    Overlap,
}

impl Intersection {
    /// Contact points; empty for `None` and `Overlap`.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        match self {
            Self::Points(points) => points,
            Self::None | Self::Overlap => &[],
        }
    }

    #[must_use]
    pub fn is_overlap(&self) -> bool {
        matches!(self, Self::Overlap)
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Intersects two segments.
///
/// The result does not depend on argument order. Points within tolerance of
/// an endpoint of either segment are reported as exactly that endpoint, so
/// loops that meet at a vertex agree on the shared coordinate.
#[must_use]
pub fn intersect(a: &Segment, b: &Segment, tol: &Tolerances) -> Intersection {
    let (a, b) = if compare_segments(b, a) == Ordering::Less {
        (b, a)
    } else {
        (a, b)
    };
    let eps = tol.linear(a.magnitude().max(b.magnitude()));

    let crossings = match (a, b) {
        (Segment::Line { .. }, Segment::Line { .. }) => line_line(a, b, eps),
        (Segment::Line { .. }, Segment::Arc { .. }) => Some(line_arc(a, b, eps)),
        (Segment::Arc { .. }, Segment::Line { .. }) => Some(line_arc(b, a, eps)),
        (Segment::Arc { .. }, Segment::Arc { .. }) => arc_arc(a, b, eps, tol),
    };
    let Some(crossings) = crossings else {
        return Intersection::Overlap;
    };

    let mut points: Vec<Point2> = crossings
        .into_iter()
        .filter(|p| a.distance_to(p) <= eps && b.distance_to(p) <= eps)
        .collect();

    // Endpoints touching the other segment are found even when the curve
    // equations are ill-conditioned near them.
    for (seg, other) in [(a, b), (b, a)] {
        for p in [seg.start(), seg.end()] {
            if other.distance_to(&p) <= eps {
                points.push(p);
            }
        }
    }

    let ends = [a.start(), a.end(), b.start(), b.end()];
    for p in &mut points {
        let q = *p;
        let nearest = ends
            .iter()
            .copied()
            .filter(|e| (e - q).norm() <= eps)
            .min_by(|x, y| (x - q).norm().total_cmp(&(y - q).norm()));
        if let Some(end) = nearest {
            *p = end;
        }
    }
    points.sort_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));
    points.dedup_by(|p, q| (*p - *q).norm() <= eps);

    if points.is_empty() {
        Intersection::None
    } else {
        Intersection::Points(points)
    }
}

/// Total order on segments, used to put arguments in a canonical order.
fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    let key = |s: &Segment| -> [f64; 7] {
        let (kind, center) = match s {
            Segment::Line { .. } => (0.0, Point2::origin()),
            Segment::Arc {
                center, rotation, ..
            } => (1.0 + f64::from(rotation.cw_flag()), *center),
        };
        let (p, q) = (s.start(), s.end());
        [kind, p.x, p.y, q.x, q.y, center.x, center.y]
    };
    key(a)
        .iter()
        .zip(key(b).iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Candidate points where two lines meet, or `None` when they overlap.
fn line_line(a: &Segment, b: &Segment, eps: f64) -> Option<Vec<Point2>> {
    let (p, q) = (a.start(), b.start());
    let r = a.end() - p;
    let s = b.end() - q;
    let (r_len, s_len) = (r.norm(), s.norm());
    if r_len <= eps || s_len <= eps {
        return Some(Vec::new());
    }
    let dir = r / r_len;

    let off_line = |x: Point2| cross_2d(&dir, &(x - p)).abs();
    if off_line(q) <= eps && off_line(b.end()) <= eps {
        let u0 = (q - p).dot(&dir);
        let u1 = (b.end() - p).dot(&dir);
        let lo = u0.min(u1).max(0.0);
        let hi = u0.max(u1).min(r_len);
        if hi - lo > eps {
            return None;
        }
        if hi - lo >= -eps {
            return Some(vec![p + dir * lo]);
        }
        return Some(Vec::new());
    }

    let denom = cross_2d(&r, &s);
    if denom.abs() <= f64::EPSILON * r_len * s_len {
        return Some(Vec::new());
    }
    let qp = q - p;
    let t = cross_2d(&qp, &s) / denom;
    let u = cross_2d(&qp, &r) / denom;
    let (et, eu) = (eps / r_len, eps / s_len);
    if (-et..=1.0 + et).contains(&t) && (-eu..=1.0 + eu).contains(&u) {
        Some(vec![p + r * t.clamp(0.0, 1.0)])
    } else {
        Some(Vec::new())
    }
}

/// Candidate points where a line meets the full circle of an arc.
fn line_arc(line: &Segment, arc: &Segment, eps: f64) -> Vec<Point2> {
    let (Some(center), Some(radius)) = (arc_center(arc), arc.radius()) else {
        return Vec::new();
    };
    let p = line.start();
    let d = line.end() - p;
    let len_sq = d.norm_squared();
    if len_sq <= eps * eps {
        return Vec::new();
    }
    let f = p - center;
    let foot_t = -f.dot(&d) / len_sq;
    let foot = p + d * foot_t;
    let h = (foot - center).norm();

    if (h - radius).abs() <= eps {
        return vec![foot];
    }
    if h > radius {
        return Vec::new();
    }
    let half_chord = (radius * radius - h * h).max(0.0).sqrt();
    let along = d / len_sq.sqrt() * half_chord;
    vec![foot - along, foot + along]
}

/// Candidate points where the circles of two arcs meet, or `None` when the
/// arcs run along each other.
fn arc_arc(a: &Segment, b: &Segment, eps: f64, tol: &Tolerances) -> Option<Vec<Point2>> {
    let (Some(c1), Some(r1), Some(c2), Some(r2)) =
        (arc_center(a), a.radius(), arc_center(b), b.radius())
    else {
        return Some(Vec::new());
    };
    let dv = c2 - c1;
    let dist = dv.norm();

    if dist <= eps {
        if (r1 - r2).abs() > eps {
            return Some(Vec::new());
        }
        let shares_stretch = |x: &Segment, y: &Segment| {
            [x.start(), x.end(), x.midpoint()]
                .iter()
                .any(|p| y.contains_point_strictly(p, tol))
        };
        if shares_stretch(a, b) || shares_stretch(b, a) {
            return None;
        }
        return Some(Vec::new());
    }
    if dist > r1 + r2 + eps || dist < (r1 - r2).abs() - eps {
        return Some(Vec::new());
    }

    let along = (dist * dist + r1 * r1 - r2 * r2) / (2.0 * dist);
    let h = (r1 * r1 - along * along).max(0.0).sqrt();
    let base = c1 + dv * (along / dist);
    if h <= eps {
        return Some(vec![base]);
    }
    let perp = Vector2::new(-dv.y, dv.x) / dist * h;
    Some(vec![base + perp, base - perp])
}

fn arc_center(seg: &Segment) -> Option<Point2> {
    match seg {
        Segment::Arc { center, .. } => Some(*center),
        Segment::Line { .. } => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;
    use approx::assert_relative_eq;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::line(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    fn arc(start: (f64, f64), end: (f64, f64), center: (f64, f64), rotation: Rotation) -> Segment {
        Segment::arc(
            Point2::new(start.0, start.1),
            Point2::new(end.0, end.1),
            Point2::new(center.0, center.1),
            rotation,
        )
    }

    #[test]
    fn crossing_lines() {
        let tol = Tolerances::default();
        let hit = intersect(&line(0.0, 0.0, 2.0, 2.0), &line(0.0, 2.0, 2.0, 0.0), &tol);
        assert_eq!(hit, Intersection::Points(vec![Point2::new(1.0, 1.0)]));
    }

    #[test]
    fn lines_meeting_at_a_vertex_report_the_exact_vertex() {
        let tol = Tolerances::default();
        let hit = intersect(&line(0.0, 0.0, 1.0, 0.0), &line(1.0, 0.0, 1.0, 1.0), &tol);
        assert_eq!(hit.points(), &[Point2::new(1.0, 0.0)]);
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        let tol = Tolerances::default();
        let hit = intersect(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 1.0, 1.0), &tol);
        assert!(hit.is_none());
    }

    #[test]
    fn collinear_lines_overlap_or_touch() {
        let tol = Tolerances::default();
        let a = line(0.0, 0.0, 2.0, 0.0);
        assert!(intersect(&a, &line(1.0, 0.0, 3.0, 0.0), &tol).is_overlap());
        assert!(intersect(&a, &line(3.0, 0.0, 1.0, 0.0), &tol).is_overlap());
        assert_eq!(
            intersect(&a, &line(2.0, 0.0, 3.0, 0.0), &tol).points(),
            &[Point2::new(2.0, 0.0)]
        );
        assert!(intersect(&a, &line(2.5, 0.0, 3.0, 0.0), &tol).is_none());
    }

    #[test]
    fn line_through_circle() {
        let tol = Tolerances::default();
        let semicircle = arc((1.0, 0.0), (-1.0, 0.0), (0.0, 0.0), Rotation::CounterClockwise);
        let hit = intersect(&line(0.0, -2.0, 0.0, 2.0), &semicircle, &tol);
        let points = hit.points();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn tangent_line_touches_once() {
        let tol = Tolerances::default();
        let semicircle = arc((1.0, 0.0), (-1.0, 0.0), (0.0, 0.0), Rotation::CounterClockwise);
        let hit = intersect(&line(-2.0, 1.0, 2.0, 1.0), &semicircle, &tol);
        assert_eq!(hit.points().len(), 1);
        assert_relative_eq!(hit.points()[0].x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn crossing_circles() {
        let tol = Tolerances::default();
        let a = arc((1.0, 0.0), (-1.0, 0.0), (0.0, 0.0), Rotation::CounterClockwise);
        let b = arc((2.0, 0.0), (0.0, 0.0), (1.0, 0.0), Rotation::CounterClockwise);
        let hit = intersect(&a, &b, &tol);
        assert_eq!(hit.points().len(), 1);
        assert_relative_eq!(hit.points()[0].x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(hit.points()[0].y, 0.75_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn co_circular_arcs_overlap_only_when_sharing_a_stretch() {
        let tol = Tolerances::default();
        let upper = arc((1.0, 0.0), (-1.0, 0.0), (0.0, 0.0), Rotation::CounterClockwise);
        let lower = arc((-1.0, 0.0), (1.0, 0.0), (0.0, 0.0), Rotation::CounterClockwise);
        let quarter = arc((0.0, 1.0), (1.0, 0.0), (0.0, 0.0), Rotation::Clockwise);
        assert!(intersect(&upper, &quarter, &tol).is_overlap());
        assert_eq!(intersect(&upper, &lower, &tol).points().len(), 2);
    }

    #[test]
    fn argument_order_does_not_matter() {
        let tol = Tolerances::default();
        let a = arc((3.0, 0.0), (0.0, 3.0), (0.0, 0.0), Rotation::CounterClockwise);
        let b = line(0.3, 0.1, 3.1, 2.9);
        assert_eq!(intersect(&a, &b, &tol), intersect(&b, &a, &tol));
    }
}
