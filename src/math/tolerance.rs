/// Tolerances used by every geometric comparison in the kernel.
///
/// Comparisons follow `isclose` semantics: two values are equal when their
/// difference is below `max(relative * magnitude, absolute)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-9,
        }
    }
}

impl Tolerances {
    /// Creates tolerances with explicit relative and absolute parts.
    #[must_use]
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    /// Tolerance-aware float equality.
    #[must_use]
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.linear(a.abs().max(b.abs()))
    }

    /// Allowed absolute error for a quantity of the given magnitude.
    #[must_use]
    pub fn linear(&self, scale: f64) -> f64 {
        self.absolute.max(self.relative * scale.abs())
    }

    /// Returns `true` when `value` is zero relative to `scale`.
    #[must_use]
    pub fn negligible(&self, value: f64, scale: f64) -> bool {
        value.abs() <= self.linear(scale)
    }

    /// Point equality: the distance between the points is negligible relative
    /// to their coordinates.
    #[must_use]
    pub fn points_close(&self, a: &super::Point2, b: &super::Point2) -> bool {
        let scale = a.coords.amax().max(b.coords.amax());
        (a - b).norm() <= self.linear(scale)
    }

    /// Angle equality in radians.
    #[must_use]
    pub fn angles_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute.max(self.relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn close_uses_relative_part_for_large_values() {
        let tol = Tolerances::default();
        assert!(tol.close(100_000.0, 100_000.5));
        assert!(!tol.close(1.0, 1.001));
    }

    #[test]
    fn close_falls_back_to_absolute_near_zero() {
        let tol = Tolerances::default();
        assert!(tol.close(0.0, 1e-10));
        assert!(!tol.close(0.0, 1e-8));
    }

    #[test]
    fn points_close_scales_with_coordinates() {
        let tol = Tolerances::default();
        assert!(tol.points_close(&Point2::new(10.0, 10.0), &Point2::new(10.00001, 10.0)));
        assert!(!tol.points_close(&Point2::new(10.0, 10.0), &Point2::new(10.001, 10.0)));
    }

    #[test]
    fn tightened_tolerances_reject_noise() {
        let tol = Tolerances::new(1e-12, 1e-15);
        assert!(!tol.points_close(&Point2::new(10.0, 10.0), &Point2::new(10.00001, 10.0)));
    }
}
