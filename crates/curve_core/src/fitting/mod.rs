//! Fitting strategies and the fitters they produce.
//!
//! This module provides:
//! - `traits`: [`FittingStrategy`], [`Fitter`], [`DifferentiableFitter`],
//!   [`ExtrapolationStrategy`], [`Extrapolator`] and the locality helpers
//! - `interpolators`: piecewise schemes for the interior region
//! - `parametrizations`: global closed-form fits
//! - `extrapolators`: tails anchored at the first or last grid point
//! - `strategies`: [`CurveStrategies`], the validated bundle a curve is built from
//! - `registry`: lookup of strategies by name
//! - `annotated`: [`AnnotatedStrategy`], a shared strategy with a changeable note

mod grid_data;

pub mod annotated;
pub mod extrapolators;
pub mod interpolators;
pub mod parametrizations;
pub mod registry;
pub mod strategies;
pub mod traits;

pub use annotated::AnnotatedStrategy;
pub use extrapolators::{
    ConstantExtrapolation, ConstantExtrapolator, LinearExtrapolation, LinearExtrapolator,
    NoExtrapolation, NoExtrapolator,
};
pub use interpolators::{
    LinearFitter, LinearInterpolation, LogLinearFitter, LogLinearInterpolation,
    NaturalCubicSplineFitter, NaturalCubicSplineInterpolation, PiecewiseConstantFitter,
    PiecewiseConstantInterpolation,
};
pub use parametrizations::{PolynomialLeastSquares, PolynomialLeastSquaresFitter};
pub use strategies::CurveStrategies;
pub use traits::{
    global_localness_levels, local_localness_levels, BuildingDirection, DifferentiableFitter,
    ExtrapolationStrategy, Extrapolator, Fitter, FittingQuality, FittingStrategy, StrategyKind,
};
