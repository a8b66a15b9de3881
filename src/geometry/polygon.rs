use crate::error::{GeometryError, Result};
use crate::math::normal_3d::{max_plane_deviation, plane_normal};
use crate::math::{Point2, Point3, Tolerances, Vector2};

use super::bounding_box::BoundingBox;
use super::endpoint::{Endpoint, Rotation};
use super::segment::Segment;

/// A closed loop of line and arc segments, stored as its endpoints.
///
/// Endpoint `i` closes segment `i`, which starts at endpoint `i - 1`; the
/// first segment starts at the last endpoint. Polygons are plain values:
/// every operation returns a new polygon.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    endpoints: Vec<Endpoint>,
}

impl Polygon {
    #[must_use]
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Creates a straight-edged polygon from `(x, y)` pairs.
    #[must_use]
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(x, y)| Endpoint::straight(x, y))
                .collect(),
        )
    }

    /// A full circle in the two-point encoding: a plain point followed by an
    /// arc endpoint at the same position.
    #[must_use]
    pub fn circle(center: Point2, radius: f64, rotation: Rotation) -> Self {
        let p = center + Vector2::new(radius, 0.0);
        Self::new(vec![
            Endpoint::Straight { point: p },
            Endpoint::Arc {
                point: p,
                center,
                rotation,
            },
        ])
    }

    /// Rebuilds a polygon from a closed chain of segments.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self::new(segments.iter().map(Segment::end_endpoint).collect())
    }

    /// Creates a straight-edged polygon from a loop of mesh vertices.
    ///
    /// The loop must be planar and parallel to the XY plane; Z is dropped.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPolygon` if the loop has no area, is not
    /// planar, or is tilted out of the XY plane.
    pub fn from_mesh_loop(points: &[Point3], tol: &Tolerances) -> Result<Self> {
        let at = points
            .first()
            .map_or_else(Point2::origin, |p| Point2::new(p.x, p.y));
        let normal = plane_normal(points)
            .ok_or_else(|| GeometryError::invalid("mesh loop encloses no area", at))?;
        if !tol.close(normal.z.abs(), 1.0) {
            return Err(GeometryError::invalid(
                "mesh loop is not parallel to the XY plane",
                at,
            ));
        }
        let scale = points
            .iter()
            .map(|p| p.coords.amax())
            .fold(0.0, f64::max);
        if !tol.negligible(max_plane_deviation(points, &normal), scale) {
            return Err(GeometryError::invalid("mesh loop is not planar", at));
        }
        Ok(Self::new(
            points.iter().map(|p| Endpoint::straight(p.x, p.y)).collect(),
        ))
    }

    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// The endpoint positions, without arc data.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.endpoints.iter().map(Endpoint::point).collect()
    }

    /// First stored point, used to locate errors.
    #[must_use]
    pub fn first_point(&self) -> Point2 {
        self.endpoints
            .first()
            .map_or_else(Point2::origin, Endpoint::point)
    }

    /// The segments of the loop in order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.endpoints.len();
        (0..n)
            .map(|i| Segment::between(&self.endpoints[(i + n - 1) % n], &self.endpoints[i]))
            .collect()
    }

    /// Signed area, positive for counter-clockwise loops.
    ///
    /// Each arc adds the circular segment between its chord and the curve.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.segments()
            .iter()
            .map(|seg| {
                let s = seg.start();
                let e = seg.end();
                let chord = 0.5 * (s.x * e.y - e.x * s.y);
                match seg {
                    Segment::Line { .. } => chord,
                    Segment::Arc { rotation, .. } => {
                        let r = seg.radius().unwrap_or(0.0);
                        let theta = seg.sweep();
                        chord + rotation.sign() * 0.5 * r * r * (theta - theta.sin())
                    }
                }
            })
            .sum()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Traversal sense of the loop.
    #[must_use]
    pub fn winding(&self) -> Rotation {
        if self.signed_area() < 0.0 {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.winding() == Rotation::Clockwise
    }

    /// The same loop traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let segments: Vec<Segment> = self.segments().iter().rev().map(Segment::reversed).collect();
        Self::from_segments(&segments)
    }

    /// Returns the loop wound in the requested direction.
    #[must_use]
    pub fn oriented(&self, winding: Rotation) -> Self {
        if self.winding() == winding {
            self.clone()
        } else {
            self.reversed()
        }
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.segments().iter().map(Segment::length).sum()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.segments()
            .iter()
            .map(Segment::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Flattens the loop to points, approximating arcs by chords that deviate
    /// at most `tolerance` from the curve.
    #[must_use]
    pub fn to_points(&self, tolerance: f64) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.endpoints.len() * 2);
        for seg in self.segments() {
            if let Some(r) = seg.radius() {
                let n_sub = arc_subdivision_count(r, seg.sweep(), tolerance);
                for j in 1..n_sub {
                    points.push(seg.point_at(f64::from(j) / f64::from(n_sub)));
                }
            }
            points.push(seg.end());
        }
        points
    }
}

/// Number of chords needed to stay within `tolerance` of an arc.
fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // sagitta = r * (1 - cos(theta / 2))
    let max_angle = if tolerance >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}
