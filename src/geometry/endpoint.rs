use crate::math::Point2;

/// Sense of rotation of an arc or of a closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Decodes the front end's `+1` (clockwise) / `-1` (counter-clockwise) flag.
    #[must_use]
    pub fn from_cw_flag(flag: i8) -> Option<Self> {
        match flag {
            1 => Some(Self::Clockwise),
            -1 => Some(Self::CounterClockwise),
            _ => None,
        }
    }

    /// Encodes back to the front end's flag.
    #[must_use]
    pub fn cw_flag(self) -> i8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }

    /// Mathematical sign: `+1` counter-clockwise, `-1` clockwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// The end of a polygon segment.
///
/// The segment ending at an endpoint starts at the previous endpoint of the
/// loop, so a polygon is fully described by its endpoints. Arc data lives on
/// the destination point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// The segment ending here is a straight line.
    Straight { point: Point2 },
    /// The segment ending here is a circular arc around `center`.
    Arc {
        point: Point2,
        center: Point2,
        rotation: Rotation,
    },
}

impl Endpoint {
    #[must_use]
    pub fn straight(x: f64, y: f64) -> Self {
        Self::Straight {
            point: Point2::new(x, y),
        }
    }

    #[must_use]
    pub fn arc(x: f64, y: f64, cx: f64, cy: f64, rotation: Rotation) -> Self {
        Self::Arc {
            point: Point2::new(x, y),
            center: Point2::new(cx, cy),
            rotation,
        }
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        match self {
            Self::Straight { point } | Self::Arc { point, .. } => *point,
        }
    }

    #[must_use]
    pub fn center(&self) -> Option<Point2> {
        match self {
            Self::Straight { .. } => None,
            Self::Arc { center, .. } => Some(*center),
        }
    }

    #[must_use]
    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Self::Straight { .. } => None,
            Self::Arc { rotation, .. } => Some(*rotation),
        }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cw_flag_round_trips() {
        assert_eq!(Rotation::from_cw_flag(1), Some(Rotation::Clockwise));
        assert_eq!(Rotation::from_cw_flag(-1), Some(Rotation::CounterClockwise));
        assert_eq!(Rotation::from_cw_flag(0), None);
        assert_eq!(Rotation::Clockwise.cw_flag(), 1);
    }

    #[test]
    fn arc_endpoint_exposes_center() {
        let e = Endpoint::arc(1.0, 0.0, 0.0, 0.0, Rotation::Clockwise);
        assert_eq!(e.center(), Some(Point2::origin()));
        assert_eq!(e.rotation(), Some(Rotation::Clockwise));
        assert!(Endpoint::straight(1.0, 2.0).center().is_none());
    }
}
