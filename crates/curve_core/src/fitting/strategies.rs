//! Validated strategy bundle a curve is built from.

use crate::fitting::traits::{
    BuildingDirection, ExtrapolationStrategy, Extrapolator, Fitter, FittingStrategy, StrategyKind,
};
use crate::types::CurveError;
use std::sync::Arc;

/// Interior strategy plus its left and right extrapolation strategies.
///
/// Construction is the only place where strategy combinations are checked;
/// a bundle that exists is always consistent:
///
/// - interpolations carry a `FromFirstGridPoint` extrapolation on the left
///   and a `FromLastGridPoint` extrapolation on the right
/// - extrapolations that need a derivative only sit next to a differentiable
///   interpolation
/// - parametrizations carry no extrapolation at all
///
/// # Example
///
/// ```
/// use curve_core::fitting::{ConstantExtrapolation, CurveStrategies, LinearInterpolation};
/// use std::sync::Arc;
///
/// let strategies = CurveStrategies::new(
///     Arc::new(LinearInterpolation),
///     Arc::new(ConstantExtrapolation::left()),
///     Arc::new(ConstantExtrapolation::right()),
/// )
/// .unwrap();
/// assert!(!strategies.is_parametrized());
///
/// // Sides swapped: rejected up front
/// assert!(CurveStrategies::new(
///     Arc::new(LinearInterpolation),
///     Arc::new(ConstantExtrapolation::right()),
///     Arc::new(ConstantExtrapolation::left()),
/// )
/// .is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CurveStrategies {
    fitting: Arc<dyn FittingStrategy>,
    tails: Option<Tails>,
}

#[derive(Debug, Clone)]
struct Tails {
    left: Arc<dyn ExtrapolationStrategy>,
    right: Arc<dyn ExtrapolationStrategy>,
}

impl CurveStrategies {
    /// Bundle an interpolation with its two extrapolations.
    ///
    /// # Errors
    ///
    /// * `CurveError::Configuration` - `interpolation` is a parametrization,
    ///   an extrapolation sits on the wrong side, or an extrapolation needs a
    ///   derivative the interpolation does not provide
    pub fn new(
        interpolation: Arc<dyn FittingStrategy>,
        left: Arc<dyn ExtrapolationStrategy>,
        right: Arc<dyn ExtrapolationStrategy>,
    ) -> Result<Self, CurveError> {
        if interpolation.kind() != StrategyKind::Interpolation {
            return Err(CurveError::Configuration(format!(
                "{} is a parametrization and takes no extrapolation",
                interpolation.name()
            )));
        }
        Self::check_side(
            interpolation.as_ref(),
            left.as_ref(),
            BuildingDirection::FromFirstGridPoint,
            "left",
        )?;
        Self::check_side(
            interpolation.as_ref(),
            right.as_ref(),
            BuildingDirection::FromLastGridPoint,
            "right",
        )?;

        Ok(Self {
            fitting: interpolation,
            tails: Some(Tails { left, right }),
        })
    }

    /// Bundle a parametrization, defined on the whole real line.
    ///
    /// # Errors
    ///
    /// * `CurveError::Configuration` - `parametrization` is an interpolation
    pub fn parametrized(parametrization: Arc<dyn FittingStrategy>) -> Result<Self, CurveError> {
        if parametrization.kind() != StrategyKind::Parametrization {
            return Err(CurveError::Configuration(format!(
                "{} is an interpolation and needs left and right extrapolation",
                parametrization.name()
            )));
        }
        Ok(Self {
            fitting: parametrization,
            tails: None,
        })
    }

    fn check_side(
        interpolation: &dyn FittingStrategy,
        extrapolation: &dyn ExtrapolationStrategy,
        expected: BuildingDirection,
        side: &str,
    ) -> Result<(), CurveError> {
        if extrapolation.direction() != expected {
            return Err(CurveError::Configuration(format!(
                "{} extrapolation must be built {}, got {} built {}",
                side,
                expected,
                extrapolation.name(),
                extrapolation.direction()
            )));
        }
        if extrapolation.requires_differentiable_interior() && !interpolation.is_differentiable() {
            return Err(CurveError::Configuration(format!(
                "{} extrapolation {} requires a differentiable interpolation, {} is not",
                side,
                extrapolation.name(),
                interpolation.name()
            )));
        }
        Ok(())
    }

    /// Interior interpolation or parametrization.
    #[inline]
    pub fn fitting(&self) -> &dyn FittingStrategy {
        self.fitting.as_ref()
    }

    /// Shared handle to the interior strategy.
    #[inline]
    pub fn fitting_arc(&self) -> Arc<dyn FittingStrategy> {
        Arc::clone(&self.fitting)
    }

    /// Left extrapolation, `None` for a parametrization.
    pub fn left_extrapolation(&self) -> Option<&dyn ExtrapolationStrategy> {
        self.tails.as_ref().map(|t| t.left.as_ref())
    }

    /// Right extrapolation, `None` for a parametrization.
    pub fn right_extrapolation(&self) -> Option<&dyn ExtrapolationStrategy> {
        self.tails.as_ref().map(|t| t.right.as_ref())
    }

    /// Returns true for a parametrization bundle.
    #[inline]
    pub fn is_parametrized(&self) -> bool {
        self.tails.is_none()
    }

    /// Minimum number of grid points the interior strategy needs.
    #[inline]
    pub fn minimal_required_grid_points(&self) -> usize {
        self.fitting.minimal_required_grid_points()
    }

    /// Fresh interior fitter.
    pub fn create_fitter(&self) -> Box<dyn Fitter> {
        self.fitting.create()
    }

    /// Fresh left and right extrapolators, `None` for a parametrization.
    pub fn create_extrapolators(&self) -> Option<(Box<dyn Extrapolator>, Box<dyn Extrapolator>)> {
        self.tails
            .as_ref()
            .map(|t| (t.left.create(), t.right.create()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{
        ConstantExtrapolation, LinearExtrapolation, LinearInterpolation, NoExtrapolation,
        PiecewiseConstantInterpolation, PolynomialLeastSquares,
    };

    #[test]
    fn test_valid_interpolation_bundle() {
        let strategies = CurveStrategies::new(
            Arc::new(LinearInterpolation),
            Arc::new(LinearExtrapolation::left()),
            Arc::new(NoExtrapolation::right()),
        )
        .unwrap();
        assert_eq!(strategies.fitting().name(), "Linear");
        assert_eq!(strategies.left_extrapolation().map(|e| e.name()), Some("Linear"));
        assert_eq!(strategies.right_extrapolation().map(|e| e.name()), Some("None"));
        assert_eq!(strategies.minimal_required_grid_points(), 2);
        assert!(strategies.create_extrapolators().is_some());
    }

    #[test]
    fn test_wrong_direction_rejected() {
        let err = CurveStrategies::new(
            Arc::new(LinearInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(ConstantExtrapolation::left()),
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::Configuration(msg) if msg.starts_with("right")));
    }

    #[test]
    fn test_linear_extrapolation_needs_derivative() {
        let result = CurveStrategies::new(
            Arc::new(PiecewiseConstantInterpolation),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(LinearExtrapolation::right()),
        );
        assert!(matches!(result, Err(CurveError::Configuration(_))));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        assert!(CurveStrategies::new(
            Arc::new(PolynomialLeastSquares::new(2)),
            Arc::new(ConstantExtrapolation::left()),
            Arc::new(ConstantExtrapolation::right()),
        )
        .is_err());
        assert!(CurveStrategies::parametrized(Arc::new(LinearInterpolation)).is_err());

        let strategies =
            CurveStrategies::parametrized(Arc::new(PolynomialLeastSquares::new(2))).unwrap();
        assert!(strategies.is_parametrized());
        assert!(strategies.left_extrapolation().is_none());
        assert!(strategies.create_extrapolators().is_none());
    }
}
