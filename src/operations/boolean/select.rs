use crate::operations::query::Containment;

/// The boolean operation being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
}

/// Which operand a piece came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    A,
    B,
}

/// Decision about whether to keep a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Decides whether a piece ends up in the result.
///
/// Both operands are clockwise. Pieces on the shared boundary are kept here;
/// pairs that then run in opposite directions cancel out afterwards.
///
/// | Piece  | vs other    | Union   | Difference (A-B) |
/// |--------|-------------|---------|------------------|
/// | from A | outside B   | keep    | keep             |
/// | from A | inside B    | discard | discard          |
/// | from A | on boundary | keep    | keep             |
/// | from B | outside A   | keep    | discard          |
/// | from B | inside A    | discard | keep (flip)      |
/// | from B | on boundary | keep    | keep (flip)      |
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_piece(source: Source, class: Containment, op: BooleanOp) -> KeepDecision {
    match (source, class, op) {
        (Source::A, Containment::Outside, _) => KeepDecision::Keep,
        (Source::A, Containment::Inside, _) => KeepDecision::Discard,
        (Source::A, Containment::OnBoundary, _) => KeepDecision::Keep,

        (Source::B, Containment::Outside, BooleanOp::Union) => KeepDecision::Keep,
        (Source::B, Containment::Outside, BooleanOp::Difference) => KeepDecision::Discard,
        (Source::B, Containment::Inside, BooleanOp::Union) => KeepDecision::Discard,
        (Source::B, Containment::Inside, BooleanOp::Difference) => KeepDecision::KeepFlipped,
        (Source::B, Containment::OnBoundary, BooleanOp::Union) => KeepDecision::Keep,
        (Source::B, Containment::OnBoundary, BooleanOp::Difference) => KeepDecision::KeepFlipped,
    }
}
