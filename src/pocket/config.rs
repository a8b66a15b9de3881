use crate::error::{GeometryError, Result};
use crate::math::{Point2, Tolerances};

/// Cutter and allowance settings for planning a pocket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PocketConfig {
    pub cutter_radius: f64,
    /// Stock left on every wall for the finishing pass.
    pub finish_amount: f64,
    /// Extra stock removed beyond the finish allowance by the trim pass.
    pub trim_amount: f64,
    /// Plan the finish and trim passes as well as the final one.
    pub finishing: bool,
    pub tolerances: Tolerances,
}

impl PocketConfig {
    #[must_use]
    pub fn new(cutter_radius: f64) -> Self {
        Self {
            cutter_radius,
            finish_amount: 0.0,
            trim_amount: 0.0,
            finishing: false,
            tolerances: Tolerances::default(),
        }
    }

    /// Sets the finish allowance and turns finishing on.
    #[must_use]
    pub fn with_finish(mut self, amount: f64) -> Self {
        self.finish_amount = amount;
        self.finishing = true;
        self
    }

    #[must_use]
    pub fn with_trim(mut self, amount: f64) -> Self {
        self.trim_amount = amount;
        self
    }

    #[must_use]
    pub fn with_finishing(mut self, finishing: bool) -> Self {
        self.finishing = finishing;
        self
    }

    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Checks that the cutter radius and allowances are usable distances.
    ///
    /// # Errors
    ///
    /// `GeometryError::InvalidDistance` located at `at` for the first
    /// negative or non-finite value.
    pub fn check(&self, at: Point2) -> Result<()> {
        for distance in [self.cutter_radius, self.finish_amount, self.trim_amount] {
            if !distance.is_finite() || distance < 0.0 {
                return Err(GeometryError::InvalidDistance { distance, at });
            }
        }
        Ok(())
    }

    /// Offset distances of the final, finish and trim passes. The last two
    /// are only planned when finishing is on.
    #[must_use]
    pub fn pass_distances(&self) -> Vec<f64> {
        let final_pass = self.cutter_radius;
        if self.finishing {
            let finish = final_pass + self.finish_amount;
            vec![final_pass, finish, finish + self.trim_amount]
        } else {
            vec![final_pass]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pass_distances_grow_outwards() {
        let config = PocketConfig::new(1.0).with_finish(0.25).with_trim(0.5);
        assert_eq!(config.pass_distances(), vec![1.0, 1.25, 1.75]);
        assert_eq!(PocketConfig::new(1.0).pass_distances(), vec![1.0]);
        assert_eq!(
            PocketConfig::new(1.0)
                .with_finish(0.25)
                .with_finishing(false)
                .pass_distances(),
            vec![1.0]
        );
    }

    #[test]
    fn negative_or_infinite_settings_are_rejected() {
        let at = Point2::new(1.0, 2.0);
        assert!(PocketConfig::new(1.0).with_finish(0.5).check(at).is_ok());
        let err = PocketConfig::new(-1.0).check(at).unwrap_err();
        assert_eq!(err, GeometryError::InvalidDistance { distance: -1.0, at });
        assert!(PocketConfig::new(1.0).with_trim(f64::INFINITY).check(at).is_err());
        assert!(PocketConfig::new(f64::NAN).check(at).is_err());
    }
}
