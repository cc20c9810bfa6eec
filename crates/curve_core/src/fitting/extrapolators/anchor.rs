//! Boundary data an extrapolator reads from the interior fitter.

use crate::fitting::traits::{BuildingDirection, Fitter};
use crate::types::CurveError;

/// Boundary argument, value and (optionally) slope of the interior fit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Anchor {
    pub(crate) direction: BuildingDirection,
    pub(crate) bound: f64,
    pub(crate) value: f64,
    pub(crate) slope: f64,
    pub(crate) operable: bool,
}

impl Anchor {
    pub(crate) fn new(direction: BuildingDirection) -> Self {
        Self {
            direction,
            bound: f64::NAN,
            value: f64::NAN,
            slope: 0.0,
            operable: false,
        }
    }

    /// Re-read the boundary from an updated interior fitter.
    ///
    /// With `with_slope` the interior must expose a derivative.
    pub(crate) fn update(
        &mut self,
        interior: &dyn Fitter,
        with_slope: bool,
    ) -> Result<(), CurveError> {
        self.operable = false;
        if !interior.is_operable() {
            return Err(CurveError::NotOperable(format!(
                "interior {} fitter must be updated before its extrapolators",
                interior.strategy().name()
            )));
        }

        let bound = match self.direction {
            BuildingDirection::FromFirstGridPoint => interior.lower_bound(),
            BuildingDirection::FromLastGridPoint => interior.upper_bound(),
        };
        if !bound.is_finite() {
            return Err(CurveError::Configuration(format!(
                "{} fitter has an unbounded domain and cannot be extrapolated",
                interior.strategy().name()
            )));
        }
        let value = interior.value(bound)?;
        let slope = if with_slope {
            interior
                .as_differentiable()
                .ok_or_else(|| {
                    CurveError::NotDifferentiable(format!(
                        "{} fitter provides no derivative",
                        interior.strategy().name()
                    ))
                })?
                .derivative(bound)?
        } else {
            0.0
        };

        self.bound = bound;
        self.value = value;
        self.slope = slope;
        self.operable = true;
        Ok(())
    }

    /// Half-line on the outside of the anchored boundary.
    pub(crate) fn half_line(&self) -> (f64, f64) {
        match self.direction {
            BuildingDirection::FromFirstGridPoint => (f64::NEG_INFINITY, self.bound),
            BuildingDirection::FromLastGridPoint => (self.bound, f64::INFINITY),
        }
    }

    pub(crate) fn ensure_operable(&self, name: &str) -> Result<(), CurveError> {
        if self.operable {
            Ok(())
        } else {
            Err(CurveError::NotOperable(format!(
                "{} extrapolation ({}) has no successful update",
                name, self.direction
            )))
        }
    }

    /// Reject `x` outside `[lower, upper]`.
    pub(crate) fn check(x: f64, lower: f64, upper: f64) -> Result<(), CurveError> {
        if x >= lower && x <= upper {
            Ok(())
        } else {
            Err(CurveError::out_of_domain(x, lower, upper))
        }
    }
}
