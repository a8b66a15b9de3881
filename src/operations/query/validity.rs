use crate::error::{GeometryError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::intersect_2d::{intersect, Intersection};
use crate::math::Tolerances;
use crate::operations::cleanup::clean_segments;

/// Checks that a polygon is a simple closed loop the kernel can work with.
#[derive(Debug)]
pub struct IsValid<'a> {
    polygon: &'a Polygon,
    tolerances: Tolerances,
}

impl<'a> IsValid<'a> {
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            tolerances: Tolerances::default(),
        }
    }

    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Runs every check and reports the first failure.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPolygon` located at the offending
    /// coordinate when:
    /// - the polygon has fewer than two points or no area,
    /// - an arc's endpoints lie at different distances from its center,
    /// - two consecutive points coincide (other than in the two-point circle),
    /// - adjacent segments meet anywhere but their shared point,
    /// - non-adjacent segments touch.
    pub fn execute(&self) -> Result<()> {
        let tol = &self.tolerances;
        let polygon = self.polygon;
        if polygon.len() < 2 {
            return Err(GeometryError::invalid(
                "polygon needs at least two points",
                polygon.first_point(),
            ));
        }

        for seg in polygon.segments() {
            if let Segment::Arc { start, end, center, .. } = seg {
                let (r0, r1) = ((start - center).norm(), (end - center).norm());
                if !tol.negligible(r0 - r1, seg.magnitude()) {
                    return Err(GeometryError::invalid(
                        "arc endpoints are not equidistant from the center",
                        end,
                    ));
                }
            }
        }

        if !is_circle(polygon, tol) {
            let points = polygon.points();
            let n = points.len();
            for i in 0..n {
                if tol.points_close(&points[(i + n - 1) % n], &points[i]) {
                    return Err(GeometryError::invalid("consecutive duplicate points", points[i]));
                }
            }
        }

        let segments = clean_segments(&polygon.segments(), tol)?;
        check_adjacent(&segments, tol)?;
        check_non_adjacent(&segments, tol)?;
        if segments.len() < 2 || tol.negligible(polygon.area(), polygon.perimeter()) {
            return Err(GeometryError::invalid(
                "polygon encloses no area",
                polygon.first_point(),
            ));
        }
        Ok(())
    }
}

/// Validates `polygon` with the given tolerances.
///
/// # Errors
///
/// See [`IsValid::execute`].
pub fn validate(polygon: &Polygon, tol: &Tolerances) -> Result<()> {
    IsValid::new(polygon).with_tolerances(*tol).execute()
}

fn is_circle(polygon: &Polygon, tol: &Tolerances) -> bool {
    let ends = polygon.endpoints();
    ends.len() == 2 && ends[1].is_arc() && tol.points_close(&ends[0].point(), &ends[1].point())
}

fn check_adjacent(segments: &[Segment], tol: &Tolerances) -> Result<()> {
    let n = segments.len();
    for i in 0..n {
        let a = &segments[i];
        let b = &segments[(i + 1) % n];
        match intersect(a, b, tol) {
            Intersection::Overlap => {
                return Err(GeometryError::invalid("segments double back", a.end()));
            }
            Intersection::Points(points) => {
                let stray = points.iter().find(|p| {
                    !tol.points_close(p, &a.end()) && !(n == 2 && tol.points_close(p, &a.start()))
                });
                if let Some(p) = stray {
                    return Err(GeometryError::invalid("adjacent segments cross", *p));
                }
            }
            Intersection::None => {}
        }
    }
    Ok(())
}

fn check_non_adjacent(segments: &[Segment], tol: &Tolerances) -> Result<()> {
    let n = segments.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = (&segments[i], &segments[j]);
            if !a.bounding_box().overlaps(&b.bounding_box(), tol) {
                continue;
            }
            match intersect(a, b, tol) {
                Intersection::None => {}
                Intersection::Overlap => {
                    return Err(GeometryError::invalid("segments overlap", a.start()));
                }
                Intersection::Points(points) => {
                    return Err(GeometryError::invalid("segments cross", points[0]));
                }
            }
        }
    }
    Ok(())
}
