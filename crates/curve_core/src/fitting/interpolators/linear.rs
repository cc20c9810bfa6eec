//! Piecewise linear interpolation.

use crate::fitting::grid_data::GridData;
use crate::fitting::traits::{
    local_localness_levels, DifferentiableFitter, Fitter, FittingQuality, FittingStrategy,
    StrategyKind,
};
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Piecewise linear interpolation strategy.
///
/// Local (a change at grid point `i` affects cells `i - 1` and `i` only),
/// exact and differentiable inside each cell. At least 2 grid points.
///
/// # Example
///
/// ```
/// use curve_core::fitting::{Fitter, FittingStrategy, LinearInterpolation};
/// use curve_core::types::{ChangeState, StridedSlice};
///
/// let mut fitter = LinearInterpolation.create();
/// fitter
///     .update(
///         StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
///         StridedSlice::contiguous(&[0.0, 2.0, 4.0]),
///         ChangeState::BothChanged,
///     )
///     .unwrap();
/// assert!((fitter.value(0.5).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearInterpolation;

impl FittingStrategy for LinearInterpolation {
    fn name(&self) -> &str {
        "Linear"
    }

    fn long_name(&self) -> &str {
        "Piecewise linear interpolation"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Interpolation
    }

    fn minimal_required_grid_points(&self) -> usize {
        2
    }

    fn quality(&self) -> FittingQuality {
        FittingQuality::Exact
    }

    fn is_local_approach(&self) -> bool {
        true
    }

    fn is_differentiable(&self) -> bool {
        true
    }

    fn left_localness_level(&self, index: usize, count: usize) -> usize {
        local_localness_levels(index, count, 1).0
    }

    fn right_localness_level(&self, index: usize, count: usize) -> usize {
        local_localness_levels(index, count, 1).1
    }

    fn create(&self) -> Box<dyn Fitter> {
        Box::new(LinearFitter::default())
    }
}

/// Fitter produced by [`LinearInterpolation`].
#[derive(Debug, Clone, Default)]
pub struct LinearFitter {
    strategy: LinearInterpolation,
    grid: GridData,
}

impl LinearFitter {
    /// Slope of cell `i`.
    #[inline]
    fn slope(&self, i: usize) -> f64 {
        let xs = self.grid.arguments();
        let ys = self.grid.values();
        (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
    }

    /// Linear function of cell `i` evaluated at `x`.
    #[inline]
    fn cell_value(&self, i: usize, x: f64) -> f64 {
        let xs = self.grid.arguments();
        let ys = self.grid.values();
        ys[i] + self.slope(i) * (x - xs[i])
    }
}

impl Fitter for LinearFitter {
    fn strategy(&self) -> &dyn FittingStrategy {
        &self.strategy
    }

    fn is_operable(&self) -> bool {
        self.grid.is_operable()
    }

    fn lower_bound(&self) -> f64 {
        self.grid.first_argument()
    }

    fn upper_bound(&self) -> f64 {
        self.grid.last_argument()
    }

    fn arguments(&self) -> &[f64] {
        self.grid.arguments()
    }

    fn values(&self) -> &[f64] {
        self.grid.values()
    }

    fn update(
        &mut self,
        arguments: StridedSlice<'_>,
        values: StridedSlice<'_>,
        state: ChangeState,
    ) -> Result<(), CurveError> {
        self.grid.invalidate();
        let staged = self.grid.stage(
            arguments,
            values,
            state,
            self.strategy.minimal_required_grid_points(),
        )?;
        self.grid.commit(staged);
        Ok(())
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let i = self.grid.cell(x)?;
        Ok(self.cell_value(i, x))
    }

    fn integral(&self, a: f64, b: f64, left_index: usize) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        self.grid.check_cell(left_index)?;
        // Trapezoid rule is exact for a linear function
        let fa = self.cell_value(left_index, a);
        let fb = self.cell_value(left_index, b);
        Ok(0.5 * (b - a) * (fa + fb))
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableFitter> {
        Some(self)
    }
}

impl DifferentiableFitter for LinearFitter {
    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let i = self.grid.cell(x)?;
        Ok(self.slope(i))
    }
}
