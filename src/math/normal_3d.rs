use super::{Point3, Vector3};

/// Unit normal of a planar 3D loop using Newell's method.
///
/// The normal follows the right-hand rule for the loop order. Returns `None`
/// for loops with fewer than three points or zero enclosed area.
#[must_use]
pub fn plane_normal(points: &[Point3]) -> Option<Vector3> {
    if points.len() < 3 {
        return None;
    }
    let mut normal = Vector3::zeros();
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal.try_normalize(f64::EPSILON)
}

/// Largest distance of any point from the plane through `points[0]` with
/// the given unit normal.
#[must_use]
pub fn max_plane_deviation(points: &[Point3], normal: &Vector3) -> f64 {
    let Some(origin) = points.first() else {
        return 0.0;
    };
    points
        .iter()
        .map(|p| (p - origin).dot(normal).abs())
        .fold(0.0, f64::max)
}
