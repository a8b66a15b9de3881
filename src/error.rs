use std::fmt;

use thiserror::Error;

use crate::math::Point2;

/// The user-facing reason a tenon configuration cannot be machined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenonProblem {
    /// The cutter cannot pass between a tenon and the pocket wall.
    CutterTooLarge,
    /// Two tenons come closer than the cutter diameter.
    TenonsOverlap,
    /// A tenon covers the whole remaining pocket.
    TenonLargerThanPocket,
    /// A tenon contains another tenon, or tenons enclose pocket area the
    /// cutter cannot reach.
    NestedTenon,
}

impl fmt::Display for TenonProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CutterTooLarge => "cutter radius too large",
            Self::TenonsOverlap => "tenons overlap",
            Self::TenonLargerThanPocket => "tenon larger than pocket",
            Self::NestedTenon => "tenon encloses another tenon or unreachable pocket area",
        };
        f.write_str(text)
    }
}

/// Errors raised by the geometry kernel.
///
/// Every variant carries the coordinate the front end should mark on the
/// canvas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid polygon at ({}, {}): {reason}", .at.x, .at.y)]
    InvalidPolygon { reason: String, at: Point2 },

    #[error("polygon must be wound clockwise (starting at ({}, {}))", .at.x, .at.y)]
    NotClockwise { at: Point2 },

    #[error("offset of {distance} destroys the shape near ({}, {})", .at.x, .at.y)]
    DegenerateOffset { distance: f64, at: Point2 },

    #[error("distance {distance} must be finite and not negative (shape at ({}, {}))", .at.x, .at.y)]
    InvalidDistance { distance: f64, at: Point2 },

    #[error("{problem} near ({}, {})", .at.x, .at.y)]
    UnsafeTenonGeometry { problem: TenonProblem, at: Point2 },

    #[error("{operation} exceeded {limit} iterations near ({}, {})", .at.x, .at.y)]
    StuckIteration {
        operation: &'static str,
        limit: usize,
        at: Point2,
    },
}

impl GeometryError {
    /// Creates an [`GeometryError::InvalidPolygon`] error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>, at: Point2) -> Self {
        Self::InvalidPolygon {
            reason: reason.into(),
            at,
        }
    }

    /// Creates an [`GeometryError::UnsafeTenonGeometry`] error.
    #[must_use]
    pub fn unsafe_tenon(problem: TenonProblem, at: Point2) -> Self {
        Self::UnsafeTenonGeometry { problem, at }
    }

    /// The coordinate associated with this error.
    #[must_use]
    pub fn location(&self) -> Point2 {
        match self {
            Self::InvalidPolygon { at, .. }
            | Self::NotClockwise { at }
            | Self::DegenerateOffset { at, .. }
            | Self::InvalidDistance { at, .. }
            | Self::UnsafeTenonGeometry { at, .. }
            | Self::StuckIteration { at, .. } => *at,
        }
    }

    /// Returns `true` when the error signals a broken algorithmic invariant
    /// and the whole run should stop, not just the current operation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StuckIteration { .. })
    }
}

/// Convenience type alias for results using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
