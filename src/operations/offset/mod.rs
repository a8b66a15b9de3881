mod filter;
mod raw_offset;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::{Polygon, Rotation};
use crate::math::Tolerances;
use crate::operations::cleanup::{clean_segments, cleanup};
use crate::operations::cut::{cancel_opposing, self_cut};
use crate::operations::query::boundaries_touch;
use crate::operations::trace::{trace_loops, TraversalBias};

/// Which way a polygon is offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDirection {
    /// Move the boundary inwards; the input must be wound clockwise.
    Shrink,
    /// Move the boundary outwards; any winding is accepted.
    Expand,
}

/// Offsets a closed line/arc polygon by a fixed distance.
///
/// Uses the slice-and-filter approach: every segment is moved, the gaps are
/// joined, the raw chain is cut at its self-intersections, and only the
/// pieces at the full distance on the correct side survive. The survivors are
/// chained back into loops.
///
/// Shrinking returns the clockwise loops the pocket splits into, largest
/// first. Expanding returns the clockwise outer loop followed by any
/// counter-clockwise islands the expansion encloses.
#[derive(Debug)]
pub struct PolygonOffset {
    polygon: Polygon,
    distance: f64,
    direction: OffsetDirection,
    tolerances: Tolerances,
}

impl PolygonOffset {
    #[must_use]
    pub fn new(polygon: Polygon, distance: f64, direction: OffsetDirection) -> Self {
        Self {
            polygon,
            distance,
            direction,
            tolerances: Tolerances::default(),
        }
    }

    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `GeometryError::NotClockwise` when shrinking a counter-clockwise
    ///   polygon.
    /// - `GeometryError::InvalidDistance` for a negative or non-finite
    ///   distance.
    /// - `GeometryError::DegenerateOffset` when the offset leaves nothing.
    /// - `GeometryError::StuckIteration` if loop chaining does not finish.
    #[instrument(level = "debug", skip(self), fields(distance = self.distance, direction = ?self.direction))]
    pub fn execute(&self) -> Result<Vec<Polygon>> {
        let tol = &self.tolerances;
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(GeometryError::InvalidDistance {
                distance: self.distance,
                at: self.polygon.first_point(),
            });
        }
        let cleaned = cleanup(&self.polygon, tol)?;
        let original = match self.direction {
            OffsetDirection::Shrink => {
                if !cleaned.is_clockwise() {
                    return Err(GeometryError::NotClockwise {
                        at: cleaned.first_point(),
                    });
                }
                cleaned
            }
            OffsetDirection::Expand => cleaned.oriented(Rotation::Clockwise),
        };
        if self.distance <= 0.0 {
            return Ok(vec![original]);
        }

        let left = match self.direction {
            OffsetDirection::Shrink => -self.distance,
            OffsetDirection::Expand => self.distance,
        };
        let raw = raw_offset::build(&original.segments(), left, tol)?;
        let pieces = self_cut(&raw, tol);
        let kept = filter::apply(&pieces, &original, self.distance, self.direction, tol)?;
        let kept = cancel_opposing(kept, tol);
        debug!(raw = raw.len(), pieces = pieces.len(), kept = kept.len(), "filtered offset pieces");

        let bias = match self.direction {
            OffsetDirection::Shrink => TraversalBias::Rightmost,
            OffsetDirection::Expand => TraversalBias::Leftmost,
        };
        let mut loops = Vec::new();
        for chain in trace_loops(&kept, bias, tol)? {
            let segments = clean_segments(&chain, tol)?;
            let poly = Polygon::from_segments(&segments);
            if segments.len() >= 2 && !tol.negligible(poly.area(), poly.perimeter()) {
                loops.push(poly);
            }
        }

        let degenerate = || GeometryError::DegenerateOffset {
            distance: self.distance,
            at: original
                .bounding_box()
                .map_or_else(|| original.first_point(), |bb| bb.center()),
        };
        match self.direction {
            OffsetDirection::Shrink => {
                let traced = loops.len();
                let mut result: Vec<Polygon> =
                    loops.into_iter().filter(Polygon::is_clockwise).collect();
                if result.len() < traced {
                    debug!(dropped = traced - result.len(), "discarded counter-clockwise loops");
                }
                if result.is_empty() {
                    return Err(degenerate());
                }
                result.sort_by(by_area_descending);
                Ok(result)
            }
            OffsetDirection::Expand => {
                let (mut outers, islands): (Vec<Polygon>, Vec<Polygon>) =
                    loops.into_iter().partition(Polygon::is_clockwise);
                outers.sort_by(by_area_descending);
                let Some(outer) = outers.into_iter().next() else {
                    return Err(degenerate());
                };
                let islands: Vec<Polygon> = islands
                    .into_iter()
                    .filter(|island| !boundaries_touch(island, &outer, tol))
                    .collect();
                Ok(std::iter::once(outer).chain(islands).collect())
            }
        }
    }
}

fn by_area_descending(a: &Polygon, b: &Polygon) -> Ordering {
    b.area().total_cmp(&a.area())
}

/// Offsets `polygon` with default tolerances. See [`PolygonOffset`].
///
/// # Errors
///
/// See [`PolygonOffset::execute`].
pub fn offset(polygon: &Polygon, distance: f64, direction: OffsetDirection) -> Result<Vec<Polygon>> {
    PolygonOffset::new(polygon.clone(), distance, direction).execute()
}
