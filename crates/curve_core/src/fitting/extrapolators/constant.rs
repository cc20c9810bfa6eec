//! Flat extrapolation at the boundary value.

use super::anchor::Anchor;
use crate::fitting::traits::{BuildingDirection, ExtrapolationStrategy, Extrapolator, Fitter};
use crate::types::CurveError;

/// Continues the curve with the interior value at the anchored boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstantExtrapolation {
    direction: BuildingDirection,
}

impl ConstantExtrapolation {
    /// Constant extrapolation on the given side.
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

impl ExtrapolationStrategy for ConstantExtrapolation {
    fn name(&self) -> &str {
        "Constant"
    }

    fn long_name(&self) -> &str {
        "Constant extrapolation of the boundary value"
    }

    fn direction(&self) -> BuildingDirection {
        self.direction
    }

    fn create(&self) -> Box<dyn Extrapolator> {
        Box::new(ConstantExtrapolator {
            strategy: *self,
            anchor: Anchor::new(self.direction),
        })
    }
}

/// Extrapolator produced by [`ConstantExtrapolation`].
#[derive(Debug, Clone)]
pub struct ConstantExtrapolator {
    strategy: ConstantExtrapolation,
    anchor: Anchor,
}

impl ConstantExtrapolator {
    fn checked(&self, x: f64) -> Result<(), CurveError> {
        self.anchor.ensure_operable(self.strategy.name())?;
        Anchor::check(x, self.lower_bound(), self.upper_bound())
    }
}

impl Extrapolator for ConstantExtrapolator {
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
        self.anchor.update(interior, false)
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Ok(self.anchor.value)
    }

    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.checked(x)?;
        Ok(0.0)
    }

    fn integral(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        self.checked(a)?;
        self.checked(b)?;
        Ok(self.anchor.value * (b - a))
    }
}
