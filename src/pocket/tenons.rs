use tracing::{debug, warn};

use crate::error::{GeometryError, Result, TenonProblem};
use crate::geometry::{Polygon, Rotation};
use crate::math::Tolerances;
use crate::operations::boolean::{add, relation, subtract, Relation};
use crate::operations::iteration::IterationGuard;

/// Joins tenons that overlap each other into single tenons.
///
/// Every tenon is returned clockwise. Identical tenons collapse into one.
///
/// # Errors
///
/// `UnsafeTenonGeometry` with [`TenonProblem::NestedTenon`] when one tenon
/// contains another, or when joining two tenons encloses pocket area.
pub fn merge(tenons: &[Polygon], tol: &Tolerances) -> Result<Vec<Polygon>> {
    let mut merged: Vec<Polygon> = Vec::with_capacity(tenons.len());
    let mut guard = IterationGuard::for_items("tenon merge", tenons.len() * tenons.len());

    for tenon in tenons {
        let mut current = tenon.oriented(Rotation::Clockwise);
        let mut k = 0;
        while k < merged.len() {
            guard.tick(current.first_point())?;
            match relation(&merged[k], &current, tol)? {
                Relation::Disjoint => k += 1,
                Relation::Same => break,
                Relation::BInsideA | Relation::AInsideB => {
                    return Err(GeometryError::unsafe_tenon(
                        TenonProblem::NestedTenon,
                        current.first_point(),
                    ));
                }
                Relation::Crossing { at } => {
                    let mut joined = add(&merged[k], &current, tol)?;
                    if joined.len() != 1 {
                        // Touching at single points only; nothing to join.
                        k += 1;
                        continue;
                    }
                    let (outer, holes) = joined.remove(0);
                    if let Some(hole) = holes.first() {
                        return Err(GeometryError::unsafe_tenon(
                            TenonProblem::NestedTenon,
                            hole.first_point(),
                        ));
                    }
                    debug!(x = at.x, y = at.y, "joined overlapping tenons");
                    merged.remove(k);
                    current = outer;
                    k = 0;
                }
            }
        }
        if k == merged.len() {
            merged.push(current);
        }
    }
    Ok(merged)
}

/// Tenons sorted against the pocket boundary.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    /// Clockwise pocket regions left after notching out crossing tenons.
    pub regions: Vec<Polygon>,
    /// Clockwise tenons lying strictly inside one of the regions.
    pub islands: Vec<Polygon>,
}

/// Sorts merged tenons into islands and notches.
///
/// Tenons inside the boundary become islands, tenons crossing it are cut
/// out of it (which may split the pocket) and tenons outside it are
/// ignored.
///
/// # Errors
///
/// `UnsafeTenonGeometry` with [`TenonProblem::TenonLargerThanPocket`] when a
/// tenon covers a whole region.
pub fn place(boundary: &Polygon, tenons: &[Polygon], tol: &Tolerances) -> Result<Placement> {
    let mut placement = Placement {
        regions: vec![boundary.clone()],
        islands: Vec::new(),
    };

    for tenon in tenons {
        let mut notched = Vec::with_capacity(placement.regions.len());
        let mut inside = false;
        let mut touched = false;
        for region in std::mem::take(&mut placement.regions) {
            match relation(&region, tenon, tol)? {
                Relation::Disjoint => notched.push(region),
                Relation::BInsideA => {
                    inside = true;
                    notched.push(region);
                }
                Relation::AInsideB | Relation::Same => {
                    return Err(GeometryError::unsafe_tenon(
                        TenonProblem::TenonLargerThanPocket,
                        region
                            .bounding_box()
                            .map_or_else(|| region.first_point(), |bb| bb.center()),
                    ));
                }
                Relation::Crossing { at } => {
                    touched = true;
                    debug!(x = at.x, y = at.y, "tenon crosses the pocket wall; notching");
                    for (outer, holes) in subtract(&region, tenon, tol)? {
                        // A hole left by the notch is material the cutter
                        // must go around, like any other island.
                        placement
                            .islands
                            .extend(holes.iter().map(|h| h.oriented(Rotation::Clockwise)));
                        notched.push(outer);
                    }
                }
            }
        }
        placement.regions = notched;
        if inside && !touched {
            placement.islands.push(tenon.clone());
        } else if !inside && !touched {
            let at = tenon.first_point();
            warn!(x = at.x, y = at.y, "ignoring tenon outside the pocket");
        }
    }
    Ok(placement)
}
