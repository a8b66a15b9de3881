mod classify;
mod holes;
mod relation;
mod select;

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::{Polygon, Rotation};
use crate::math::Tolerances;
use crate::operations::cleanup::{clean_segments, cleanup};
use crate::operations::cut::cancel_opposing;
use crate::operations::trace::{trace_loops, TraversalBias};

pub use holes::PolygonWithHoles;
pub use relation::{relation, Relation};
pub use select::{should_keep_piece, BooleanOp, KeepDecision, Source};

use classify::split_and_classify;

/// Adds polygon `b` to the clockwise polygon `a`.
///
/// A clockwise `b` is united with `a`; a counter-clockwise `b` is cut out of
/// it. The result is a list of clockwise outers, each with its
/// counter-clockwise holes.
#[derive(Debug)]
pub struct Add {
    a: Polygon,
    b: Polygon,
    tolerances: Tolerances,
}

impl Add {
    #[must_use]
    pub fn new(a: Polygon, b: Polygon) -> Self {
        Self {
            a,
            b,
            tolerances: Tolerances::default(),
        }
    }

    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotClockwise` if `a` is counter-clockwise, or
    /// `GeometryError::StuckIteration` if loop chaining does not finish.
    #[instrument(level = "debug", skip_all)]
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        let tol = &self.tolerances;
        let a = cleanup(&self.a, tol)?;
        if !a.is_clockwise() {
            return Err(GeometryError::NotClockwise {
                at: a.first_point(),
            });
        }
        let b = cleanup(&self.b, tol)?;
        let (op, b) = if b.is_clockwise() {
            (BooleanOp::Union, b)
        } else {
            (BooleanOp::Difference, b.reversed())
        };

        let rel = relation(&a, &b, tol)?;
        debug!(?op, ?rel, "combining polygons");
        let result = match (op, rel) {
            (BooleanOp::Union, Relation::Same | Relation::BInsideA) => vec![(a, Vec::new())],
            (BooleanOp::Union, Relation::AInsideB) => vec![(b, Vec::new())],
            (BooleanOp::Union, Relation::Disjoint) => vec![(a, Vec::new()), (b, Vec::new())],
            (BooleanOp::Difference, Relation::Same | Relation::AInsideB) => Vec::new(),
            (BooleanOp::Difference, Relation::BInsideA) => {
                vec![(a, vec![b.oriented(Rotation::CounterClockwise)])]
            }
            (BooleanOp::Difference, Relation::Disjoint) => vec![(a, Vec::new())],
            (_, Relation::Crossing { .. }) => combine(&a, &b, op, tol)?,
        };
        Ok(result)
    }
}

/// Cuts polygon `b` out of the clockwise polygon `a`, whatever `b`'s
/// winding. Equivalent to adding the counter-clockwise form of `b`.
#[derive(Debug)]
pub struct Subtract {
    a: Polygon,
    b: Polygon,
    tolerances: Tolerances,
}

impl Subtract {
    #[must_use]
    pub fn new(a: Polygon, b: Polygon) -> Self {
        Self {
            a,
            b,
            tolerances: Tolerances::default(),
        }
    }

    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Executes the subtraction.
    ///
    /// # Errors
    ///
    /// See [`Add::execute`].
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        Add::new(
            self.a.clone(),
            self.b.oriented(Rotation::CounterClockwise),
        )
        .with_tolerances(self.tolerances)
        .execute()
    }
}

/// Adds `b` to `a`. See [`Add`].
///
/// # Errors
///
/// See [`Add::execute`].
pub fn add(a: &Polygon, b: &Polygon, tol: &Tolerances) -> Result<Vec<PolygonWithHoles>> {
    Add::new(a.clone(), b.clone()).with_tolerances(*tol).execute()
}

/// Cuts `b` out of `a`. See [`Subtract`].
///
/// # Errors
///
/// See [`Add::execute`].
pub fn subtract(a: &Polygon, b: &Polygon, tol: &Tolerances) -> Result<Vec<PolygonWithHoles>> {
    Subtract::new(a.clone(), b.clone())
        .with_tolerances(*tol)
        .execute()
}

/// General case: both operands are clockwise and their boundaries meet.
fn combine(
    a: &Polygon,
    b: &Polygon,
    op: BooleanOp,
    tol: &Tolerances,
) -> Result<Vec<PolygonWithHoles>> {
    let (pieces_a, pieces_b) = split_and_classify(a, b, tol)?;
    let mut kept = Vec::with_capacity(pieces_a.len() + pieces_b.len());
    let tagged = pieces_a
        .iter()
        .map(|p| (Source::A, p))
        .chain(pieces_b.iter().map(|p| (Source::B, p)));
    for (source, piece) in tagged {
        match should_keep_piece(source, piece.class, op) {
            KeepDecision::Keep => kept.push(piece.segment),
            KeepDecision::KeepFlipped => kept.push(piece.segment.reversed()),
            KeepDecision::Discard => {}
        }
    }
    let kept = cancel_opposing(kept, tol);

    let mut loops = Vec::new();
    for chain in trace_loops(&kept, TraversalBias::Rightmost, tol)? {
        let segments = clean_segments(&chain, tol)?;
        let poly = Polygon::from_segments(&segments);
        if segments.len() >= 2 && !tol.negligible(poly.area(), poly.perimeter()) {
            loops.push(poly);
        }
    }
    debug!(kept = kept.len(), loops = loops.len(), "traced boolean result");
    holes::assemble(loops, tol)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_points(&[
            (x0, y0),
            (x0, y0 + size),
            (x0 + size, y0 + size),
            (x0 + size, y0),
        ])
    }

    fn total_area(result: &[PolygonWithHoles]) -> f64 {
        result
            .iter()
            .map(|(outer, holes)| outer.area() - holes.iter().map(Polygon::area).sum::<f64>())
            .sum()
    }

    #[test]
    fn union_of_overlapping_squares() {
        let tol = Tolerances::default();
        let result = add(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0), &tol).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].1.is_empty());
        assert_eq!(result[0].0.len(), 8);
        assert_relative_eq!(total_area(&result), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn difference_of_overlapping_squares() {
        let tol = Tolerances::default();
        let result = subtract(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0), &tol).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.len(), 6);
        assert!(result[0].0.is_clockwise());
        assert_relative_eq!(total_area(&result), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn counter_clockwise_b_means_difference() {
        let tol = Tolerances::default();
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert_eq!(
            add(&a, &b.reversed(), &tol).unwrap(),
            subtract(&a, &b, &tol).unwrap()
        );
    }

    #[test]
    fn shortcuts() {
        let tol = Tolerances::default();
        let big = square(0.0, 0.0, 10.0);
        let small = square(2.0, 2.0, 2.0);
        let far = square(20.0, 0.0, 1.0);

        assert_eq!(add(&big, &small, &tol).unwrap(), vec![(big.clone(), vec![])]);
        assert_eq!(add(&small, &big, &tol).unwrap(), vec![(big.clone(), vec![])]);
        assert_eq!(add(&big, &far, &tol).unwrap().len(), 2);
        assert!(subtract(&big, &big, &tol).unwrap().is_empty());
        assert!(subtract(&small, &big, &tol).unwrap().is_empty());

        let with_hole = subtract(&big, &small, &tol).unwrap();
        assert_eq!(with_hole.len(), 1);
        assert_eq!(with_hole[0].1.len(), 1);
        assert!(!with_hole[0].1[0].is_clockwise());
    }

    #[test]
    fn union_sharing_part_of_an_edge() {
        let tol = Tolerances::default();
        let a = Polygon::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let b = Polygon::from_points(&[(0.5, 0.0), (0.5, 0.5), (1.5, 0.5), (1.5, 0.0)]);
        let result = add(&a, &b, &tol).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.len(), 6);
        assert_relative_eq!(total_area(&result), 1.25, epsilon = 1e-9);
    }

    #[test]
    fn union_closing_a_ring_leaves_a_hole() {
        let tol = Tolerances::default();
        // A "C" opening to the right, closed by a bar.
        let c_shape = Polygon::from_points(&[
            (0.0, 0.0),
            (0.0, 6.0),
            (6.0, 6.0),
            (6.0, 4.0),
            (2.0, 4.0),
            (2.0, 2.0),
            (6.0, 2.0),
            (6.0, 0.0),
        ]);
        let bar = square(5.0, 0.0, 6.0);
        let result = add(&c_shape, &bar, &tol).unwrap();
        assert_eq!(result.len(), 1);
        let (outer, holes) = &result[0];
        assert_eq!(holes.len(), 1);
        assert_relative_eq!(holes[0].area(), 6.0, epsilon = 1e-9);
        assert_relative_eq!(outer.area(), 66.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_circle_difference() {
        let tol = Tolerances::default();
        let a = square(0.0, 0.0, 4.0);
        let bite = Polygon::circle(Point2::new(4.0, 2.0), 1.0, Rotation::Clockwise);
        let result = subtract(&a, &bite, &tol).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(
            total_area(&result),
            16.0 - std::f64::consts::PI / 2.0,
            epsilon = 1e-9
        );
    }
}
