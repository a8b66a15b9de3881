use crate::geometry::Segment;
use crate::math::intersect_2d::{intersect, Intersection};
use crate::math::{Point2, Tolerances};

/// Points where `seg` must be cut so that it no longer crosses `other`.
///
/// For overlapping segments these are the ends of `other` that lie on `seg`,
/// so that shared stretches become whole pieces.
fn cut_points(seg: &Segment, other: &Segment, tol: &Tolerances) -> Vec<Point2> {
    if !seg.bounding_box().overlaps(&other.bounding_box(), tol) {
        return Vec::new();
    }
    match intersect(seg, other, tol) {
        Intersection::None => Vec::new(),
        Intersection::Points(points) => points,
        Intersection::Overlap => [other.start(), other.end()]
            .into_iter()
            .filter(|p| seg.contains_point(p, tol))
            .collect(),
    }
}

/// Splits a chain at every point where two of its segments meet.
///
/// The returned pieces only touch each other at their ends.
#[must_use]
pub fn self_cut(segments: &[Segment], tol: &Tolerances) -> Vec<Segment> {
    let n = segments.len();
    let mut cuts: Vec<Vec<Point2>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            let on_i = cut_points(&segments[i], &segments[j], tol);
            let on_j = cut_points(&segments[j], &segments[i], tol);
            cuts[i].extend(on_i);
            cuts[j].extend(on_j);
        }
    }
    segments
        .iter()
        .zip(&cuts)
        .flat_map(|(seg, points)| seg.split_at(points, tol))
        .filter(|piece| !piece.is_degenerate(tol))
        .collect()
}

/// Splits two chains at every point where a segment of one meets a segment of
/// the other.
#[must_use]
pub fn mutual_cut(
    a: &[Segment],
    b: &[Segment],
    tol: &Tolerances,
) -> (Vec<Segment>, Vec<Segment>) {
    let mut cuts_a: Vec<Vec<Point2>> = vec![Vec::new(); a.len()];
    let mut cuts_b: Vec<Vec<Point2>> = vec![Vec::new(); b.len()];
    for (i, sa) in a.iter().enumerate() {
        for (j, sb) in b.iter().enumerate() {
            cuts_a[i].extend(cut_points(sa, sb, tol));
            cuts_b[j].extend(cut_points(sb, sa, tol));
        }
    }
    let split = |segments: &[Segment], cuts: &[Vec<Point2>]| -> Vec<Segment> {
        segments
            .iter()
            .zip(cuts)
            .flat_map(|(seg, points)| seg.split_at(points, tol))
            .filter(|piece| !piece.is_degenerate(tol))
            .collect()
    };
    (split(a, &cuts_a), split(b, &cuts_b))
}

/// Returns `true` if the two pieces trace the same curve in the same
/// direction.
#[must_use]
pub fn same_piece(a: &Segment, b: &Segment, tol: &Tolerances) -> bool {
    tol.points_close(&a.start(), &b.start())
        && tol.points_close(&a.end(), &b.end())
        && tol.points_close(&a.midpoint(), &b.midpoint())
}

/// Returns `true` if the two pieces trace the same curve in opposite
/// directions.
#[must_use]
pub fn opposing_pieces(a: &Segment, b: &Segment, tol: &Tolerances) -> bool {
    same_piece(a, &b.reversed(), tol)
}

/// Removes pairs of pieces that cancel each other out and collapses
/// duplicates running the same way.
#[must_use]
pub fn cancel_opposing(pieces: Vec<Segment>, tol: &Tolerances) -> Vec<Segment> {
    let mut alive = vec![true; pieces.len()];
    for i in 0..pieces.len() {
        if !alive[i] {
            continue;
        }
        for j in (i + 1)..pieces.len() {
            if !alive[j] {
                continue;
            }
            if same_piece(&pieces[i], &pieces[j], tol) {
                alive[j] = false;
            } else if opposing_pieces(&pieces[i], &pieces[j], tol) {
                alive[i] = false;
                alive[j] = false;
                break;
            }
        }
    }
    pieces
        .into_iter()
        .zip(alive)
        .filter_map(|(piece, keep)| keep.then_some(piece))
        .collect()
}
