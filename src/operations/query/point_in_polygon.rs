use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::intersect_2d::{intersect, Intersection};
use crate::math::{Point2, Tolerances};
use crate::operations::iteration::IterationGuard;

/// Where a point lies relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Outside,
    OnBoundary,
}

const RAY_SEED: u64 = 0x7e40_4b17;
const MAX_RAYS: usize = 100;
const GRAZING_COSINE: f64 = 1e-6;

/// Classifies `point` against `polygon` by crossing parity.
///
/// A ray is cast from a random spot below the polygon to the point. Rays that
/// pass through a vertex, run along an edge or graze an arc are discarded and
/// a new one is drawn. The generator is seeded, so results are reproducible.
///
/// # Errors
///
/// Returns `GeometryError::StuckIteration` if no reliable ray is found.
pub fn point_in_polygon(point: &Point2, polygon: &Polygon, tol: &Tolerances) -> Result<Containment> {
    let segments: Vec<Segment> = polygon
        .segments()
        .into_iter()
        .filter(|s| !s.is_degenerate(tol))
        .collect();
    if segments.iter().any(|s| s.contains_point(point, tol)) {
        return Ok(Containment::OnBoundary);
    }
    let Some(bb) = polygon.bounding_box() else {
        return Ok(Containment::Outside);
    };
    if !bb.contains(point, tol) {
        return Ok(Containment::Outside);
    }

    let (w, h) = (bb.width(), bb.height());
    let mut rng = StdRng::seed_from_u64(RAY_SEED);
    let mut guard = IterationGuard::new("point-in-polygon ray", MAX_RAYS);
    loop {
        guard.tick(*point)?;
        let origin = Point2::new(
            rng.gen_range((bb.min.x - w * 0.5)..=(bb.max.x + w * 0.5)),
            bb.min.y - (h + 1.0),
        );
        let ray = Segment::line(origin, *point);
        if let Some(crossings) = count_crossings(&ray, &segments, tol) {
            return Ok(if crossings % 2 == 1 {
                Containment::Inside
            } else {
                Containment::Outside
            });
        }
        tracing::trace!(x = origin.x, y = origin.y, "discarding unreliable ray");
    }
}

/// Counts boundary crossings along `ray`, or `None` if the ray touches the
/// boundary in a way parity cannot resolve.
fn count_crossings(ray: &Segment, segments: &[Segment], tol: &Tolerances) -> Option<usize> {
    let dir = ray.start_tangent();
    let mut count = 0;
    for seg in segments {
        let hits = match intersect(ray, seg, tol) {
            Intersection::Overlap => return None,
            Intersection::None => continue,
            Intersection::Points(hits) => hits,
        };
        for hit in &hits {
            if tol.points_close(hit, &seg.start()) || tol.points_close(hit, &seg.end()) {
                return None;
            }
            if let Segment::Arc { center, .. } = seg {
                let radial = (hit - center).try_normalize(0.0)?;
                if radial.dot(&dir).abs() <= GRAZING_COSINE {
                    return None;
                }
            }
        }
        count += hits.len();
    }
    Some(count)
}

/// Convenience wrapper: `true` only for points strictly inside.
///
/// # Errors
///
/// Returns `GeometryError::StuckIteration` if no reliable ray is found.
pub fn is_inside(point: &Point2, polygon: &Polygon, tol: &Tolerances) -> Result<bool> {
    Ok(point_in_polygon(point, polygon, tol)? == Containment::Inside)
}
