use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::Tolerances;
use crate::operations::cut::mutual_cut;
use crate::operations::query::{point_in_polygon, Containment};

/// A piece of one operand, located against the other operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedPiece {
    pub segment: Segment,
    pub class: Containment,
}

/// Cuts both boundaries where they meet and classifies every piece by its
/// midpoint against the other polygon.
///
/// # Errors
///
/// Propagates `GeometryError::StuckIteration` from point classification.
pub fn split_and_classify(
    a: &Polygon,
    b: &Polygon,
    tol: &Tolerances,
) -> Result<(Vec<ClassifiedPiece>, Vec<ClassifiedPiece>)> {
    let (pieces_a, pieces_b) = mutual_cut(&a.segments(), &b.segments(), tol);
    Ok((
        classify_all(&pieces_a, b, tol)?,
        classify_all(&pieces_b, a, tol)?,
    ))
}

fn classify_all(
    pieces: &[Segment],
    other: &Polygon,
    tol: &Tolerances,
) -> Result<Vec<ClassifiedPiece>> {
    pieces
        .iter()
        .map(|segment| {
            Ok(ClassifiedPiece {
                segment: *segment,
                class: point_in_polygon(&segment.midpoint(), other, tol)?,
            })
        })
        .collect()
}

/// Piece counts per class, used to recognise how two polygons relate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub inside: usize,
    pub outside: usize,
    pub on: usize,
}

impl ClassCounts {
    #[must_use]
    pub fn of(pieces: &[ClassifiedPiece]) -> Self {
        pieces.iter().fold(Self::default(), |mut counts, piece| {
            match piece.class {
                Containment::Inside => counts.inside += 1,
                Containment::Outside => counts.outside += 1,
                Containment::OnBoundary => counts.on += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_squares() {
        let tol = Tolerances::default();
        let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]);
        let b = Polygon::from_points(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]);
        let (pa, pb) = split_and_classify(&a, &b, &tol).unwrap();
        let (ca, cb) = (ClassCounts::of(&pa), ClassCounts::of(&pb));
        assert_eq!(ca, ClassCounts { inside: 2, outside: 4, on: 0 });
        assert_eq!(cb, ClassCounts { inside: 2, outside: 4, on: 0 });
    }
}
