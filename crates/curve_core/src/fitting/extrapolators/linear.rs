//! Extrapolation along the boundary tangent.

use super::anchor::Anchor;
use crate::fitting::traits::{BuildingDirection, ExtrapolationStrategy, Extrapolator, Fitter};
use crate::types::CurveError;

/// Continues the curve along the tangent at the anchored boundary.
///
/// Needs the interior derivative, so it only combines with differentiable
/// fitting strategies; the pairing is checked when the curve is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinearExtrapolation {
    direction: BuildingDirection,
}

impl LinearExtrapolation {
    /// Linear extrapolation on the given side.
    pub const fn new(direction: BuildingDirection) -> Self {
        Self { direction }
    }

    /// Left tail, anchored at the first grid point.
    pub const fn left() -> Self {
        Self::new(BuildingDirection::FromFirstGridPoint)
    }

    /// Right tail, anchored at the last grid point.
    pub const fn right() -> Self {
        Self::new(BuildingDirection::FromLastGridPoint)
    }
}

impl ExtrapolationStrategy for LinearExtrapolation {
    fn name(&self) -> &str {
        "Linear"
    }

    fn long_name(&self) -> &str {
        "Linear extrapolation along the boundary derivative"
    }

    fn direction(&self) -> BuildingDirection {
        self.direction
    }

    fn requires_differentiable_interior(&self) -> bool {
        true
    }

    fn create(&self) -> Box<dyn Extrapolator> {
        Box::new(LinearExtrapolator {
            strategy: *self,
            anchor: Anchor::new(self.direction),
        })
    }
}

/// Extrapolator produced by [`LinearExtrapolation`].
#[derive(Debug, Clone)]
pub struct LinearExtrapolator {
    strategy: LinearExtrapolation,
    anchor: Anchor,
}

impl LinearExtrapolator {
    fn checked(&self, x: f64) -> Result<(), CurveError> {
        self.anchor.ensure_operable(self.strategy.name())?;
        Anchor::check(x, self.lower_bound(), self.upper_bound())
    }
}

impl Extrapolator for LinearExtrapolator {
    fn strategy(&self) -> &dyn ExtrapolationStrategy {
        &self.strategy
    }

    fn is_operable(&self) -> bool {
        self.anchor.operable
    }

    fn lower_bound(&self) -> f64 {
        self.anchor.half_line().0
    }

    fn upper_bound(&self) -> f64 {
        self.anchor.half_line().1
    }

    fn update(&mut self, interior: &dyn Fitter) -> Result<(), CurveError> {
        self.anchor.update(interior, true)
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Ok(self.anchor.value + self.anchor.slope * (x - self.anchor.bound))
    }

    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Ok(self.anchor.slope)
    }

    fn integral(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        self.checked(a)?;
        self.checked(b)?;
        let Anchor {
            bound, value, slope, ..
        } = self.anchor;
        let da = a - bound;
        let db = b - bound;
        Ok(value * (b - a) + 0.5 * slope * (db * db - da * da))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{FittingStrategy, LinearInterpolation, PiecewiseConstantInterpolation};
    use crate::types::{ChangeState, StridedSlice};
    use approx::assert_relative_eq;

    fn interior(strategy: &dyn FittingStrategy) -> Box<dyn Fitter> {
        let mut fitter = strategy.create();
        fitter
            .update(
                StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
                StridedSlice::contiguous(&[1.0, 3.0, 4.0]),
                ChangeState::BothChanged,
            )
            .unwrap();
        fitter
    }

    #[test]
    fn test_tangent_continuation() {
        let fitter = interior(&LinearInterpolation);

        let mut left = LinearExtrapolation::left().create();
        left.update(fitter.as_ref()).unwrap();
        // Slope 2 on the first cell
        assert_relative_eq!(left.value(-1.0).unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(left.derivative(-3.0).unwrap(), 2.0, epsilon = 1e-12);

        let mut right = LinearExtrapolation::right().create();
        right.update(fitter.as_ref()).unwrap();
        // Slope 1 on the last cell
        assert_relative_eq!(right.value(4.0).unwrap(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_integral_matches_trapezoid() {
        let fitter = interior(&LinearInterpolation);
        let mut right = LinearExtrapolation::right().create();
        right.update(fitter.as_ref()).unwrap();
        // f(3) = 5, f(5) = 7
        assert_relative_eq!(right.integral(3.0, 5.0).unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_differentiable_interior() {
        let fitter = interior(&PiecewiseConstantInterpolation);
        let mut left = LinearExtrapolation::left().create();
        assert!(matches!(
            left.update(fitter.as_ref()),
            Err(CurveError::NotDifferentiable(_))
        ));
        assert!(!left.is_operable());
    }

    #[test]
    fn test_declares_requirement() {
        assert!(LinearExtrapolation::right().requires_differentiable_interior());
    }
}
