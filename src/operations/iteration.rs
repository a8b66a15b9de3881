use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Upper bound on the number of steps a loop-driven algorithm may take.
///
/// Every loop whose termination depends on geometry ticks a guard; running
/// past the ceiling means an invariant broke, and the run stops with
/// [`GeometryError::StuckIteration`] instead of spinning.
#[derive(Debug)]
pub struct IterationGuard {
    operation: &'static str,
    limit: usize,
    count: usize,
}

impl IterationGuard {
    #[must_use]
    pub fn new(operation: &'static str, limit: usize) -> Self {
        Self {
            operation,
            limit,
            count: 0,
        }
    }

    /// A guard sized for work proportional to `items`.
    #[must_use]
    pub fn for_items(operation: &'static str, items: usize) -> Self {
        Self::new(operation, items.saturating_mul(4).saturating_add(16))
    }

    /// Records one step.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::StuckIteration` located at `at` once the limit
    /// is exceeded.
    pub fn tick(&mut self, at: Point2) -> Result<()> {
        self.count += 1;
        if self.count > self.limit {
            tracing::error!(
                operation = self.operation,
                limit = self.limit,
                "iteration limit exceeded"
            );
            return Err(GeometryError::StuckIteration {
                operation: self.operation,
                limit: self.limit,
                at,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_limit() {
        let mut guard = IterationGuard::new("test loop", 2);
        assert!(guard.tick(Point2::origin()).is_ok());
        assert!(guard.tick(Point2::origin()).is_ok());
        let err = guard.tick(Point2::new(3.0, 4.0)).unwrap_err();
        assert_eq!(err.location(), Point2::new(3.0, 4.0));
        assert!(err.is_fatal());
        assert_eq!(guard.count(), 3);
    }
}
