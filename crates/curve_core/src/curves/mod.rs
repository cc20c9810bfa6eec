//! Grid point curves.
//!
//! This module provides:
//! - [`GridCurve`]: operations common to all curves
//! - [`GridPointCurve`]: mutable curve with lazy refitting
//! - [`ReadOnlyCurveView`]: immutable curve over borrowed labels, optionally
//!   sharing its interior fitter with other views
//!
//! Both route evaluation to the left extrapolator, the interior fitter or
//! the right extrapolator depending on where the query point falls.

mod grid_point_curve;
mod labels;
mod read_only;
mod routing;
mod traits;

pub use grid_point_curve::GridPointCurve;
pub use read_only::{ReadOnlyCurveView, ViewLabels};
pub use traits::GridCurve;
