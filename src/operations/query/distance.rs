use crate::geometry::Polygon;
use crate::math::Point2;

/// Shortest distance from `point` to the boundary of `polygon`.
#[must_use]
pub fn distance_to_polygon(point: &Point2, polygon: &Polygon) -> f64 {
    polygon
        .segments()
        .iter()
        .map(|seg| seg.distance_to(point))
        .fold(f64::INFINITY, f64::min)
}
