use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::Tolerances;
use crate::operations::query::{distance_to_polygon, point_in_polygon, Containment};

use super::OffsetDirection;

/// Keeps the pieces of a cut raw offset that belong to the true offset.
///
/// A piece survives when its midpoint is at least `distance` away from the
/// original boundary and lies on the requested side of it: inside for a
/// shrink, outside for an expansion.
///
/// # Errors
///
/// Propagates `GeometryError::StuckIteration` from point classification.
pub fn apply(
    pieces: &[Segment],
    original: &Polygon,
    distance: f64,
    direction: OffsetDirection,
    tol: &Tolerances,
) -> Result<Vec<Segment>> {
    let scale = original
        .bounding_box()
        .map_or(distance, |bb| bb.magnitude().max(distance));
    let threshold = distance - tol.linear(scale);
    let wanted = match direction {
        OffsetDirection::Shrink => Containment::Inside,
        OffsetDirection::Expand => Containment::Outside,
    };

    let mut kept = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let mid = piece.midpoint();
        if distance_to_polygon(&mid, original) < threshold {
            continue;
        }
        if point_in_polygon(&mid, original, tol)? == wanted {
            kept.push(*piece);
        }
    }
    Ok(kept)
}
