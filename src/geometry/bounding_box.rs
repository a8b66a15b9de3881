use crate::math::{Point2, Tolerances};

/// Axis-aligned bounding box in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    /// Box around a single point.
    #[must_use]
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Grows the box to include `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest absolute coordinate in the box, used as a tolerance scale.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.min.coords.amax().max(self.max.coords.amax())
    }

    /// Returns `true` if `p` lies inside or on the box, with tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: &Tolerances) -> bool {
        let eps = tol.linear(self.magnitude());
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    /// Returns `true` if the boxes overlap or touch, with tolerance.
    #[must_use]
    pub fn overlaps(&self, other: &Self, tol: &Tolerances) -> bool {
        let eps = tol.linear(self.magnitude().max(other.magnitude()));
        self.min.x <= other.max.x + eps
            && other.min.x <= self.max.x + eps
            && self.min.y <= other.max.y + eps
            && other.min.y <= self.max.y + eps
    }
}
