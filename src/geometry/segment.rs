use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::math::angle_2d::{clockwise_angle, polar_angle};
use crate::math::{Point2, Tolerances, Vector2, Vector3};

use super::bounding_box::BoundingBox;
use super::endpoint::{Endpoint, Rotation};

/// One edge of a polygon: a straight line or a circular arc.
///
/// Arcs never store a sweep; it is derived from the endpoints, the center and
/// the rotation. An arc whose endpoints are identical is a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        start: Point2,
        end: Point2,
    },
    Arc {
        start: Point2,
        end: Point2,
        center: Point2,
        rotation: Rotation,
    },
}

impl Segment {
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self::Line { start, end }
    }

    #[must_use]
    pub fn arc(start: Point2, end: Point2, center: Point2, rotation: Rotation) -> Self {
        Self::Arc {
            start,
            end,
            center,
            rotation,
        }
    }

    /// Builds the segment that runs from `start`'s point to `end`.
    #[must_use]
    pub fn between(start: &Endpoint, end: &Endpoint) -> Self {
        let from = start.point();
        match *end {
            Endpoint::Straight { point } => Self::line(from, point),
            Endpoint::Arc {
                point,
                center,
                rotation,
            } => Self::arc(from, point, center, rotation),
        }
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Line { start, .. } | Self::Arc { start, .. } => *start,
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line { end, .. } | Self::Arc { end, .. } => *end,
        }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }

    /// The endpoint record that stores this segment in a polygon.
    #[must_use]
    pub fn end_endpoint(&self) -> Endpoint {
        match *self {
            Self::Line { end, .. } => Endpoint::Straight { point: end },
            Self::Arc {
                end,
                center,
                rotation,
                ..
            } => Endpoint::Arc {
                point: end,
                center,
                rotation,
            },
        }
    }

    /// The same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { start, end } => Self::line(end, start),
            Self::Arc {
                start,
                end,
                center,
                rotation,
            } => Self::arc(end, start, center, rotation.opposite()),
        }
    }

    /// Returns a copy with new start and end points and the same curve data.
    #[must_use]
    pub fn with_ends(&self, start: Point2, end: Point2) -> Self {
        match *self {
            Self::Line { .. } => Self::line(start, end),
            Self::Arc {
                center, rotation, ..
            } => Self::arc(start, end, center, rotation),
        }
    }

    /// Arc radius averaged over both stored endpoints, `None` for lines.
    ///
    /// Averaging absorbs the small disagreement between the two stored radii.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self {
            Self::Line { .. } => None,
            Self::Arc {
                start, end, center, ..
            } => Some(((start - center).norm() + (end - center).norm()) * 0.5),
        }
    }

    /// Unsigned sweep angle in `(0, TAU]` for arcs, `0` for lines.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        match self {
            Self::Line { .. } => 0.0,
            Self::Arc { end, .. } => {
                let raw = self.angular_offset(end);
                if raw <= f64::EPSILON {
                    TAU
                } else {
                    raw
                }
            }
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line { start, end } => (end - start).norm(),
            Self::Arc { .. } => self.radius().unwrap_or(0.0) * self.sweep(),
        }
    }

    /// Signed curvature: positive when the segment bends left.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        match self {
            Self::Line { .. } => 0.0,
            Self::Arc { rotation, .. } => {
                let r = self.radius().unwrap_or(0.0);
                if r > 0.0 {
                    rotation.sign() / r
                } else {
                    0.0
                }
            }
        }
    }

    /// Unit tangent leaving the start point.
    #[must_use]
    pub fn start_tangent(&self) -> Vector2 {
        match self {
            Self::Line { start, end } => unit_or_zero(end - start),
            Self::Arc {
                start,
                center,
                rotation,
                ..
            } => arc_tangent(start, center, *rotation),
        }
    }

    /// Unit tangent arriving at the end point.
    #[must_use]
    pub fn end_tangent(&self) -> Vector2 {
        match self {
            Self::Line { start, end } => unit_or_zero(end - start),
            Self::Arc {
                end,
                center,
                rotation,
                ..
            } => arc_tangent(end, center, *rotation),
        }
    }

    /// Exit vector `(dx, dy, curvature)` at the start point.
    ///
    /// Two segments leaving a point in the same direction are ordered by the
    /// curvature component.
    #[must_use]
    pub fn exit_vector(&self) -> Vector3 {
        let t = self.start_tangent();
        Vector3::new(t.x, t.y, self.curvature())
    }

    /// Angle swept from the start of the arc to `p`, in travel direction.
    fn angular_offset(&self, p: &Point2) -> f64 {
        match self {
            Self::Line { .. } => 0.0,
            Self::Arc {
                start,
                center,
                rotation,
                ..
            } => {
                let from = start - center;
                let to = p - center;
                match rotation {
                    Rotation::Clockwise => clockwise_angle(&from, &to),
                    Rotation::CounterClockwise => clockwise_angle(&to, &from),
                }
            }
        }
    }

    /// Position along the segment used to order split points: the line
    /// parameter for lines, the swept angle for arcs.
    #[must_use]
    pub fn parameter_of(&self, p: &Point2) -> f64 {
        match self {
            Self::Line { start, end } => {
                let d = end - start;
                let len_sq = d.norm_squared();
                if len_sq == 0.0 {
                    0.0
                } else {
                    (p - start).dot(&d) / len_sq
                }
            }
            Self::Arc { .. } => self.angular_offset(p),
        }
    }

    /// Point at fraction `t` in `[0, 1]` of the segment.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }
        match self {
            Self::Line { start, end } => start + (end - start) * t,
            Self::Arc {
                start,
                center,
                rotation,
                ..
            } => {
                let r = self.radius().unwrap_or(0.0);
                let angle = polar_angle(&(start - center)) + rotation.sign() * self.sweep() * t;
                center + Vector2::new(angle.cos(), angle.sin()) * r
            }
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.point_at(0.5)
    }

    /// Returns `true` if `p` lies on the segment within tolerance.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, tol: &Tolerances) -> bool {
        if tol.points_close(p, &self.start()) || tol.points_close(p, &self.end()) {
            return true;
        }
        let scale = self.magnitude().max(p.coords.amax());
        match self {
            Self::Line { .. } => self.distance_to(p) <= tol.linear(scale),
            Self::Arc { center, .. } => {
                let r = self.radius().unwrap_or(0.0);
                if r <= 0.0 || ((p - center).norm() - r).abs() > tol.linear(scale.max(r)) {
                    return false;
                }
                self.angular_offset(p) <= self.sweep() + tol.linear(scale.max(r)) / r
            }
        }
    }

    /// Returns `true` if `p` lies on the segment but not at either end.
    #[must_use]
    pub fn contains_point_strictly(&self, p: &Point2, tol: &Tolerances) -> bool {
        !tol.points_close(p, &self.start())
            && !tol.points_close(p, &self.end())
            && self.contains_point(p, tol)
    }

    /// Shortest distance from `p` to the segment.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        match self {
            Self::Line { start, end } => {
                let d = end - start;
                let len_sq = d.norm_squared();
                if len_sq == 0.0 {
                    return (p - start).norm();
                }
                let t = ((p - start).dot(&d) / len_sq).clamp(0.0, 1.0);
                (p - (start + d * t)).norm()
            }
            Self::Arc {
                start, end, center, ..
            } => {
                let r = self.radius().unwrap_or(0.0);
                if self.angular_offset(p) <= self.sweep() {
                    ((p - center).norm() - r).abs()
                } else {
                    (p - start).norm().min((p - end).norm())
                }
            }
        }
    }

    /// Largest absolute coordinate involved, used as a tolerance scale.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let ends = self.start().coords.amax().max(self.end().coords.amax());
        match self {
            Self::Line { .. } => ends,
            Self::Arc { center, .. } => ends.max(center.coords.amax()),
        }
    }

    /// Zero-length lines and zero-radius arcs.
    #[must_use]
    pub fn is_degenerate(&self, tol: &Tolerances) -> bool {
        match self {
            Self::Line { start, end } => tol.points_close(start, end),
            Self::Arc { .. } => {
                tol.negligible(self.radius().unwrap_or(0.0), self.magnitude())
            }
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::from_point(self.start());
        bb.include(&self.end());
        if let Self::Arc { center, .. } = self {
            let r = self.radius().unwrap_or(0.0);
            let sweep = self.sweep();
            for angle in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
                let extreme = center + Vector2::new(f64::cos(angle), f64::sin(angle)) * r;
                if self.angular_offset(&extreme) <= sweep {
                    bb.include(&extreme);
                }
            }
        }
        bb
    }

    /// Cuts the segment at the given points, which must lie on it.
    ///
    /// Points at either end are ignored. The rest are ordered along the
    /// segment and near-duplicates collapse, so the pieces chain exactly
    /// from `start` to `end`.
    #[must_use]
    pub fn split_at(&self, points: &[Point2], tol: &Tolerances) -> Vec<Segment> {
        let mut cuts: Vec<(f64, Point2)> = points
            .iter()
            .filter(|p| !tol.points_close(p, &self.start()) && !tol.points_close(p, &self.end()))
            .map(|p| (self.parameter_of(p), *p))
            .collect();
        if cuts.is_empty() {
            return vec![*self];
        }
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        cuts.dedup_by(|b, a| tol.points_close(&a.1, &b.1));

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut from = self.start();
        for (_, p) in cuts {
            pieces.push(self.with_ends(from, p));
            from = p;
        }
        pieces.push(self.with_ends(from, self.end()));
        pieces
    }

    /// The parallel segment at signed distance `left` (positive to the left
    /// of travel).
    ///
    /// Returns `None` when an arc's radius shrinks to zero or below.
    #[must_use]
    pub fn offset(&self, left: f64, tol: &Tolerances) -> Option<Segment> {
        match *self {
            Self::Line { start, end } => {
                let dir = unit_or_zero(end - start);
                let normal = Vector2::new(-dir.y, dir.x) * left;
                Some(Self::line(start + normal, end + normal))
            }
            Self::Arc {
                start,
                end,
                center,
                rotation,
            } => {
                let r = self.radius().unwrap_or(0.0);
                // The center lies to the left of a counter-clockwise arc.
                let new_r = r - rotation.sign() * left;
                if new_r <= tol.linear(r) {
                    return None;
                }
                let move_to = |p: Point2| center + unit_or_zero(p - center) * new_r;
                Some(Self::arc(move_to(start), move_to(end), center, rotation))
            }
        }
    }
}

fn unit_or_zero(v: Vector2) -> Vector2 {
    v.try_normalize(0.0).unwrap_or_else(Vector2::zeros)
}

fn arc_tangent(p: &Point2, center: &Point2, rotation: Rotation) -> Vector2 {
    let u = unit_or_zero(p - center);
    match rotation {
        Rotation::CounterClockwise => Vector2::new(-u.y, u.x),
        Rotation::Clockwise => Vector2::new(u.y, -u.x),
    }
}
