//! Interpolation strategies.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolation`]: Piecewise linear, local, exact
//! - [`LogLinearInterpolation`]: Linear on `ln(y)`, local, exact, positive values
//! - [`PiecewiseConstantInterpolation`]: Step function, local, exact, not differentiable
//! - [`NaturalCubicSplineInterpolation`]: C² natural spline, global, exact
//!
//! Each strategy creates a matching fitter; all fitters deep-copy the grid
//! points they are updated with.

mod cubic_spline;
mod linear;
mod log_linear;
mod piecewise_constant;

pub use cubic_spline::{NaturalCubicSplineFitter, NaturalCubicSplineInterpolation};
pub use linear::{LinearFitter, LinearInterpolation};
pub use log_linear::{LogLinearFitter, LogLinearInterpolation};
pub use piecewise_constant::{PiecewiseConstantFitter, PiecewiseConstantInterpolation};
