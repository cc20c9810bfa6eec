//! Log-linear interpolation.

use crate::fitting::grid_data::GridData;
use crate::fitting::traits::{
    local_localness_levels, DifferentiableFitter, Fitter, FittingQuality, FittingStrategy,
    StrategyKind,
};
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Below this log-slope magnitude the exponential integral uses its series limit.
const FLAT_LOG_SLOPE: f64 = 1e-12;

/// Log-linear interpolation strategy.
///
/// Interpolates `ln(y)` linearly, i.e. a constant growth rate per cell
/// (the discount-factor convention of a constant forward rate).
/// Requires strictly positive values and at least 2 grid points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogLinearInterpolation;

impl FittingStrategy for LogLinearInterpolation {
    fn name(&self) -> &str {
        "LogLinear"
    }

    fn long_name(&self) -> &str {
        "Linear interpolation of logarithmic values"
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
        Box::new(LogLinearFitter::default())
    }
}

/// Fitter produced by [`LogLinearInterpolation`].
#[derive(Debug, Clone, Default)]
pub struct LogLinearFitter {
    strategy: LogLinearInterpolation,
    grid: GridData,
    /// ln(y) at each grid point
    log_values: Vec<f64>,
}

impl LogLinearFitter {
    /// Slope of ln(y) in cell `i`.
    #[inline]
    fn log_slope(&self, i: usize) -> f64 {
        let xs = self.grid.arguments();
        (self.log_values[i + 1] - self.log_values[i]) / (xs[i + 1] - xs[i])
    }

    #[inline]
    fn cell_value(&self, i: usize, x: f64) -> f64 {
        let xs = self.grid.arguments();
        (self.log_values[i] + self.log_slope(i) * (x - xs[i])).exp()
    }
}

impl Fitter for LogLinearFitter {
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
        if let Some(index) = staged.values.iter().position(|&y| y <= 0.0) {
            return Err(CurveError::InvalidInput(format!(
                "log-linear interpolation needs positive values, got {} at index {}",
                staged.values[index], index
            )));
        }
        let log_values = staged.values.iter().map(|y| y.ln()).collect();
        self.grid.commit(staged);
        self.log_values = log_values;
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
        let slope = self.log_slope(left_index);
        let fa = self.cell_value(left_index, a);
        if slope.abs() < FLAT_LOG_SLOPE {
            return Ok(fa * (b - a));
        }
        let fb = self.cell_value(left_index, b);
        Ok((fb - fa) / slope)
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableFitter> {
        Some(self)
    }
}

impl DifferentiableFitter for LogLinearFitter {
    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let i = self.grid.cell(x)?;
        Ok(self.cell_value(i, x) * self.log_slope(i))
    }
}
