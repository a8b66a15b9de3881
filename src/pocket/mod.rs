mod config;
mod tenons;

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result, TenonProblem};
use crate::geometry::{Endpoint, Polygon, Rotation};
use crate::math::Tolerances;
use crate::operations::boolean::{relation, Relation};
use crate::operations::offset::{OffsetDirection, PolygonOffset};
use crate::operations::query::validate;

pub use config::PocketConfig;

/// Which side of the cutter meets the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutDirection {
    /// Cutter rotation and feed agree at the wall: walls are followed
    /// counter-clockwise and tenons clockwise.
    Climb,
    /// Walls clockwise, tenons counter-clockwise.
    Conventional,
}

/// One connected area the cutter centre may move in.
#[derive(Debug, Clone, PartialEq)]
pub struct PocketRegion {
    /// Outer limit of the cutter centre, clockwise.
    pub boundary: Polygon,
    /// Expanded tenons the cutter centre must stay out of, counter-clockwise.
    pub tenons: Vec<Polygon>,
}

impl PocketRegion {
    /// Endpoint lists of the wall followed by each tenon, wound for `direction`.
    #[must_use]
    pub fn toolpath_loops(&self, direction: CutDirection) -> Vec<Vec<Endpoint>> {
        let (wall, tenon) = match direction {
            CutDirection::Climb => (Rotation::CounterClockwise, Rotation::Clockwise),
            CutDirection::Conventional => (Rotation::Clockwise, Rotation::CounterClockwise),
        };
        std::iter::once(self.boundary.oriented(wall))
            .chain(self.tenons.iter().map(|t| t.oriented(tenon)))
            .map(|p| p.endpoints().to_vec())
            .collect()
    }
}

/// The regions of every pass of a pocketing job.
///
/// `finish_pass` and `trim_pass` are empty unless finishing was requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PocketPlan {
    /// Offset by the cutter radius: the pocket as it will finally be cut.
    pub final_pass: Vec<PocketRegion>,
    /// Offset by the cutter radius plus the finish allowance.
    pub finish_pass: Vec<PocketRegion>,
    /// Offset by the cutter radius plus the finish and trim allowances.
    pub trim_pass: Vec<PocketRegion>,
}

impl PocketPlan {
    /// Passes in machining order, innermost boundary first. Empty passes are
    /// skipped.
    pub fn passes(&self) -> impl Iterator<Item = &[PocketRegion]> {
        [&self.trim_pass, &self.finish_pass, &self.final_pass]
            .into_iter()
            .filter(|pass| !pass.is_empty())
            .map(Vec::as_slice)
    }
}

/// Plans a pocket with the given cutter and allowances.
///
/// # Errors
///
/// See [`plan`].
pub fn plan_pocket(
    boundary: &Polygon,
    tenons: &[Polygon],
    cutter_radius: f64,
    finish_amount: f64,
    trim_amount: f64,
    finishing: bool,
) -> Result<PocketPlan> {
    let config = PocketConfig::new(cutter_radius)
        .with_finish(finish_amount)
        .with_trim(trim_amount)
        .with_finishing(finishing);
    plan(boundary, tenons, &config)
}

/// Plans a pocket.
///
/// The boundary may be wound either way. Tenons overlapping each other are
/// joined, tenons crossing the boundary are notched out of it and tenons
/// outside it are ignored. For every pass the boundary is shrunk and the
/// remaining tenons are expanded by the pass distance.
///
/// # Errors
///
/// - `InvalidPolygon` for a malformed boundary or tenon.
/// - `InvalidDistance` for a negative or non-finite radius or allowance.
/// - `DegenerateOffset` when a pass distance erases a pocket region.
/// - `UnsafeTenonGeometry` when the configuration cannot be machined:
///   nested tenons, expanded tenons meeting each other or the shrunk wall,
///   or a tenon covering a whole region.
#[instrument(level = "debug", skip_all, fields(cutter_radius = config.cutter_radius))]
pub fn plan(boundary: &Polygon, tenons: &[Polygon], config: &PocketConfig) -> Result<PocketPlan> {
    let tol = &config.tolerances;
    config.check(boundary.first_point())?;
    validate(boundary, tol)?;
    for tenon in tenons {
        validate(tenon, tol)?;
    }

    let boundary = boundary.oriented(Rotation::Clockwise);
    let merged = tenons::merge(tenons, tol)?;
    let placement = tenons::place(&boundary, &merged, tol)?;
    debug!(
        regions = placement.regions.len(),
        islands = placement.islands.len(),
        "placed tenons"
    );

    let mut passes = config
        .pass_distances()
        .into_iter()
        .map(|d| plan_pass(&placement, d, tol))
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    Ok(PocketPlan {
        final_pass: passes.next().unwrap_or_default(),
        finish_pass: passes.next().unwrap_or_default(),
        trim_pass: passes.next().unwrap_or_default(),
    })
}

fn plan_pass(
    placement: &tenons::Placement,
    distance: f64,
    tol: &Tolerances,
) -> Result<Vec<PocketRegion>> {
    let mut regions = Vec::new();
    for region in &placement.regions {
        let shrunk = PolygonOffset::new(region.clone(), distance, OffsetDirection::Shrink)
            .with_tolerances(*tol)
            .execute()?;
        regions.extend(shrunk.into_iter().map(|boundary| PocketRegion {
            boundary,
            tenons: Vec::new(),
        }));
    }

    let mut expanded = Vec::with_capacity(placement.islands.len());
    for island in &placement.islands {
        let loops = PolygonOffset::new(island.clone(), distance, OffsetDirection::Expand)
            .with_tolerances(*tol)
            .execute()?;
        if let Some(enclosed) = loops.get(1) {
            return Err(GeometryError::unsafe_tenon(
                TenonProblem::NestedTenon,
                enclosed.first_point(),
            ));
        }
        if let Some(outer) = loops.into_iter().next() {
            expanded.push(outer);
        }
    }

    for (i, a) in expanded.iter().enumerate() {
        for b in &expanded[i + 1..] {
            let at = match relation(a, b, tol)? {
                Relation::Disjoint => continue,
                Relation::Crossing { at } => at,
                Relation::Same | Relation::AInsideB | Relation::BInsideA => b.first_point(),
            };
            return Err(GeometryError::unsafe_tenon(TenonProblem::TenonsOverlap, at));
        }
    }

    for tenon in expanded {
        for region in &mut regions {
            match relation(&region.boundary, &tenon, tol)? {
                Relation::Disjoint => {}
                Relation::BInsideA => {
                    region.tenons.push(tenon.oriented(Rotation::CounterClockwise));
                    break;
                }
                Relation::Crossing { at } => {
                    return Err(GeometryError::unsafe_tenon(TenonProblem::CutterTooLarge, at));
                }
                Relation::AInsideB | Relation::Same => {
                    let at = region
                        .boundary
                        .bounding_box()
                        .map_or_else(|| region.boundary.first_point(), |bb| bb.center());
                    return Err(GeometryError::unsafe_tenon(
                        TenonProblem::TenonLargerThanPocket,
                        at,
                    ));
                }
            }
        }
    }
    debug!(distance, regions = regions.len(), "planned pass");
    Ok(regions)
}
