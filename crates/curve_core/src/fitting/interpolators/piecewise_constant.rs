//! Piecewise constant (step) interpolation.

use crate::fitting::grid_data::GridData;
use crate::fitting::traits::{
    local_localness_levels, Fitter, FittingQuality, FittingStrategy, StrategyKind,
};
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Piecewise constant interpolation strategy.
///
/// The value on `[x_i, x_{i+1})` is `y_i`; at the last knot it is `y_{n-1}`,
/// so every sample is reproduced exactly. A single grid point is enough.
///
/// The step function has no derivative at the knots, so fitters do not
/// expose [`crate::fitting::DifferentiableFitter`] and cannot be combined
/// with linear extrapolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PiecewiseConstantInterpolation;

impl FittingStrategy for PiecewiseConstantInterpolation {
    fn name(&self) -> &str {
        "PiecewiseConstant"
    }

    fn long_name(&self) -> &str {
        "Piecewise constant interpolation"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Interpolation
    }

    fn minimal_required_grid_points(&self) -> usize {
        1
    }

    fn quality(&self) -> FittingQuality {
        FittingQuality::Exact
    }

    fn is_local_approach(&self) -> bool {
        true
    }

    fn is_differentiable(&self) -> bool {
        false
    }

    fn left_localness_level(&self, index: usize, count: usize) -> usize {
        local_localness_levels(index, count, 1).0
    }

    fn right_localness_level(&self, index: usize, count: usize) -> usize {
        local_localness_levels(index, count, 1).1
    }

    fn create(&self) -> Box<dyn Fitter> {
        Box::new(PiecewiseConstantFitter::default())
    }
}

/// Fitter produced by [`PiecewiseConstantInterpolation`].
#[derive(Debug, Clone, Default)]
pub struct PiecewiseConstantFitter {
    strategy: PiecewiseConstantInterpolation,
    grid: GridData,
}

impl Fitter for PiecewiseConstantFitter {
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
        let ys = self.grid.values();
        if x == self.grid.last_argument() {
            return Ok(ys[ys.len() - 1]);
        }
        let i = self.grid.cell(x)?;
        Ok(ys[i])
    }

    fn integral(&self, a: f64, b: f64, left_index: usize) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        self.grid.check_cell(left_index)?;
        Ok(self.grid.values()[left_index] * (b - a))
    }
}
