//! Extrapolator that does not extend the domain.

use super::anchor::Anchor;
use crate::fitting::traits::{BuildingDirection, ExtrapolationStrategy, Extrapolator, Fitter};
use crate::types::CurveError;

/// Leaves the curve undefined beyond the anchored boundary.
///
/// Its domain collapses to the boundary point itself, so the curve bounds
/// coincide with the interior fitter's bounds and any query outside them
/// fails with [`CurveError::OutOfDomain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoExtrapolation {
    direction: BuildingDirection,
}

impl NoExtrapolation {
    /// No extrapolation on the given side.
    pub const fn new(direction: BuildingDirection) -> Self {
        Self { direction }
    }

    /// Left side, anchored at the first grid point.
    pub const fn left() -> Self {
        Self::new(BuildingDirection::FromFirstGridPoint)
    }

    /// Right side, anchored at the last grid point.
    pub const fn right() -> Self {
        Self::new(BuildingDirection::FromLastGridPoint)
    }
}

impl ExtrapolationStrategy for NoExtrapolation {
    fn name(&self) -> &str {
        "None"
    }

    fn long_name(&self) -> &str {
        "No extrapolation"
    }

    fn direction(&self) -> BuildingDirection {
        self.direction
    }

    fn create(&self) -> Box<dyn Extrapolator> {
        Box::new(NoExtrapolator {
            strategy: *self,
            anchor: Anchor::new(self.direction),
        })
    }
}

/// Extrapolator produced by [`NoExtrapolation`].
#[derive(Debug, Clone)]
pub struct NoExtrapolator {
    strategy: NoExtrapolation,
    anchor: Anchor,
}

impl NoExtrapolator {
    fn checked(&self, x: f64) -> Result<(), CurveError> {
        self.anchor.ensure_operable(self.strategy.name())?;
        Anchor::check(x, self.anchor.bound, self.anchor.bound)
    }
}

impl Extrapolator for NoExtrapolator {
    fn strategy(&self) -> &dyn ExtrapolationStrategy {
        &self.strategy
    }

    fn is_operable(&self) -> bool {
        self.anchor.operable
    }

    fn lower_bound(&self) -> f64 {
        self.anchor.bound
    }

    fn upper_bound(&self) -> f64 {
        self.anchor.bound
    }

    fn update(&mut self, interior: &dyn Fitter) -> Result<(), CurveError> {
        self.anchor.update(interior, false)
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Ok(self.anchor.value)
    }

    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Err(CurveError::NotDifferentiable(
            "no extrapolation defines no derivative".to_string(),
        ))
    }

    fn integral(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        self.checked(a)?;
        self.checked(b)?;
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{FittingStrategy, LinearInterpolation};
    use crate::types::{ChangeState, StridedSlice};

    #[test]
    fn test_domain_collapses_to_boundary() {
        let mut fitter = LinearInterpolation.create();
        fitter
            .update(
                StridedSlice::contiguous(&[0.0, 1.0]),
                StridedSlice::contiguous(&[5.0, 6.0]),
                ChangeState::BothChanged,
            )
            .unwrap();

        let mut left = NoExtrapolation::left().create();
        left.update(fitter.as_ref()).unwrap();
        assert_eq!(left.lower_bound(), 0.0);
        assert_eq!(left.upper_bound(), 0.0);
        assert_eq!(left.value(0.0).unwrap(), 5.0);
        assert_eq!(left.integral(0.0, 0.0).unwrap(), 0.0);

        let err = left.value(-0.5).unwrap_err();
        assert_eq!(err, CurveError::out_of_domain(-0.5, 0.0, 0.0));
    }

    #[test]
    fn test_name_is_shared_by_both_sides() {
        assert_eq!(NoExtrapolation::left().name(), "None");
        assert_eq!(NoExtrapolation::right().name(), "None");
        assert_ne!(NoExtrapolation::left(), NoExtrapolation::right());
    }
}
