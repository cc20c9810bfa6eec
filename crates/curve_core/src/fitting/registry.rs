//! Name-based strategy factory.
//!
//! Lookups are case-insensitive. Strategies are returned as shared handles
//! ready to be placed in a [`CurveStrategies`](crate::fitting::CurveStrategies).

use crate::fitting::extrapolators::{ConstantExtrapolation, LinearExtrapolation, NoExtrapolation};
use crate::fitting::interpolators::{
    LinearInterpolation, LogLinearInterpolation, NaturalCubicSplineInterpolation,
    PiecewiseConstantInterpolation,
};
use crate::fitting::parametrizations::PolynomialLeastSquares;
use crate::fitting::traits::{BuildingDirection, ExtrapolationStrategy, FittingStrategy};
use crate::types::CurveError;
use std::sync::Arc;

/// Names accepted by [`interpolation_by_name`].
pub const INTERPOLATION_NAMES: &[&str] =
    &["Linear", "LogLinear", "PiecewiseConstant", "NaturalCubicSpline"];

/// Names accepted by [`parametrization_by_name`].
pub const PARAMETRIZATION_NAMES: &[&str] = &["PolynomialLeastSquares"];

/// Names accepted by [`extrapolation_by_name`].
pub const EXTRAPOLATION_NAMES: &[&str] = &["Constant", "Linear", "None"];

fn unknown(kind: &str, name: &str, known: &[&str]) -> CurveError {
    CurveError::Configuration(format!(
        "unknown {} '{}', expected one of: {}",
        kind,
        name,
        known.join(", ")
    ))
}

/// Look up an interpolation strategy.
///
/// # Errors
///
/// * `CurveError::Configuration` - unknown name
///
/// # Example
///
/// ```
/// use curve_core::fitting::registry::interpolation_by_name;
///
/// let strategy = interpolation_by_name("loglinear").unwrap();
/// assert_eq!(strategy.name(), "LogLinear");
/// ```
pub fn interpolation_by_name(name: &str) -> Result<Arc<dyn FittingStrategy>, CurveError> {
    let strategy: Arc<dyn FittingStrategy> = match name.to_ascii_lowercase().as_str() {
        "linear" => Arc::new(LinearInterpolation),
        "loglinear" => Arc::new(LogLinearInterpolation),
        "piecewiseconstant" => Arc::new(PiecewiseConstantInterpolation),
        "naturalcubicspline" => Arc::new(NaturalCubicSplineInterpolation),
        _ => return Err(unknown("interpolation", name, INTERPOLATION_NAMES)),
    };
    Ok(strategy)
}

/// Look up a parametrization strategy of the given degree.
///
/// # Errors
///
/// * `CurveError::Configuration` - unknown name
pub fn parametrization_by_name(
    name: &str,
    degree: usize,
) -> Result<Arc<dyn FittingStrategy>, CurveError> {
    match name.to_ascii_lowercase().as_str() {
        "polynomialleastsquares" => Ok(Arc::new(PolynomialLeastSquares::new(degree))),
        _ => Err(unknown("parametrization", name, PARAMETRIZATION_NAMES)),
    }
}

/// Look up an extrapolation strategy for one side of a curve.
///
/// # Errors
///
/// * `CurveError::Configuration` - unknown name
pub fn extrapolation_by_name(
    name: &str,
    direction: BuildingDirection,
) -> Result<Arc<dyn ExtrapolationStrategy>, CurveError> {
    let strategy: Arc<dyn ExtrapolationStrategy> = match name.to_ascii_lowercase().as_str() {
        "constant" => Arc::new(ConstantExtrapolation::new(direction)),
        "linear" => Arc::new(LinearExtrapolation::new(direction)),
        "none" => Arc::new(NoExtrapolation::new(direction)),
        _ => return Err(unknown("extrapolation", name, EXTRAPOLATION_NAMES)),
    };
    Ok(strategy)
}
