use crate::error::Result;
use crate::geometry::Polygon;
use crate::math::{Point2, Tolerances};
use crate::operations::cleanup::cleanup;
use crate::operations::query::{contact_points, Containment};

use super::classify::{split_and_classify, ClassCounts};

/// How two closed polygons sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation {
    /// The boundaries coincide.
    Same,
    /// `b` lies strictly inside `a`.
    BInsideA,
    /// `a` lies strictly inside `b`.
    AInsideB,
    /// Neither touches nor contains the other.
    Disjoint,
    /// The boundaries cross or touch; `at` is a point they share.
    Crossing { at: Point2 },
}

/// Determines how `a` and `b` relate. Winding is ignored.
///
/// # Errors
///
/// Propagates `GeometryError::StuckIteration` from point classification.
pub fn relation(a: &Polygon, b: &Polygon, tol: &Tolerances) -> Result<Relation> {
    let a = cleanup(a, tol)?;
    let b = cleanup(b, tol)?;
    let (pieces_a, pieces_b) = split_and_classify(&a, &b, tol)?;
    let ca = ClassCounts::of(&pieces_a);
    let cb = ClassCounts::of(&pieces_b);

    if ca.inside + ca.outside + cb.inside + cb.outside == 0 {
        return Ok(Relation::Same);
    }

    let contacts = contact_points(&a, &b, tol).unwrap_or_default();
    if ca.on == 0 && cb.on == 0 && contacts.is_empty() {
        if cb.inside > 0 && cb.outside == 0 {
            return Ok(Relation::BInsideA);
        }
        if ca.inside > 0 && ca.outside == 0 {
            return Ok(Relation::AInsideB);
        }
        if ca.inside == 0 && cb.inside == 0 {
            return Ok(Relation::Disjoint);
        }
    }

    let at = contacts
        .first()
        .copied()
        .or_else(|| {
            pieces_a
                .iter()
                .find(|p| p.class == Containment::OnBoundary)
                .map(|p| p.segment.midpoint())
        })
        .unwrap_or_else(|| a.first_point());
    Ok(Relation::Crossing { at })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_points(&[
            (x0, y0),
            (x0, y0 + size),
            (x0 + size, y0 + size),
            (x0 + size, y0),
        ])
    }

    #[test]
    fn recognises_every_relation() {
        let tol = Tolerances::default();
        let big = square(0.0, 0.0, 10.0);
        let small = square(2.0, 2.0, 2.0);
        let far = square(20.0, 20.0, 2.0);
        let straddling = square(8.0, 8.0, 4.0);

        assert_eq!(relation(&big, &big, &tol).unwrap(), Relation::Same);
        assert_eq!(relation(&big, &big.reversed(), &tol).unwrap(), Relation::Same);
        assert_eq!(relation(&big, &small, &tol).unwrap(), Relation::BInsideA);
        assert_eq!(relation(&small, &big, &tol).unwrap(), Relation::AInsideB);
        assert_eq!(relation(&big, &far, &tol).unwrap(), Relation::Disjoint);
        assert!(matches!(
            relation(&big, &straddling, &tol).unwrap(),
            Relation::Crossing { .. }
        ));
    }

    #[test]
    fn touching_counts_as_crossing() {
        let tol = Tolerances::default();
        let big = square(0.0, 0.0, 10.0);
        let corner = square(0.0, 0.0, 2.0);
        let outside_touch = square(10.0, 10.0, 1.0);
        assert!(matches!(
            relation(&big, &corner, &tol).unwrap(),
            Relation::Crossing { .. }
        ));
        assert_eq!(
            relation(&big, &outside_touch, &tol).unwrap(),
            Relation::Crossing {
                at: Point2::new(10.0, 10.0)
            }
        );
    }

    #[test]
    fn circle_inside_square() {
        let tol = Tolerances::default();
        let big = square(0.0, 0.0, 10.0);
        let circle = Polygon::circle(Point2::new(5.0, 5.0), 1.0, Rotation::CounterClockwise);
        assert_eq!(relation(&big, &circle, &tol).unwrap(), Relation::BInsideA);
    }
}
