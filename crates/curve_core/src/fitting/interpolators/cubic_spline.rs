//! Natural cubic spline interpolation.

use crate::fitting::grid_data::GridData;
use crate::fitting::traits::{
    DifferentiableFitter, Fitter, FittingQuality, FittingStrategy, StrategyKind,
};
use crate::math::linear_algebra::TridiagonalFactorization;
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Polynomial coefficients for a cubic spline segment.
///
/// Represents a cubic polynomial: `y = a + b*(x-xi) + c*(x-xi)² + d*(x-xi)³`
#[derive(Debug, Clone, Copy)]
struct SplineCoeffs {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl SplineCoeffs {
    #[inline]
    fn value(&self, t: f64) -> f64 {
        self.a + t * (self.b + t * (self.c + t * self.d))
    }

    #[inline]
    fn derivative(&self, t: f64) -> f64 {
        self.b + t * (2.0 * self.c + 3.0 * t * self.d)
    }

    /// Antiderivative vanishing at `t = 0`.
    #[inline]
    fn antiderivative(&self, t: f64) -> f64 {
        t * (self.a + t * (self.b / 2.0 + t * (self.c / 3.0 + t * self.d / 4.0)))
    }
}

/// Natural cubic spline strategy with C² continuity.
///
/// Zero second derivative at both ends. Global: every grid point influences
/// the whole curve, so both localness levels equal the grid point count.
/// At least 3 grid points.
///
/// The tridiagonal system for the second derivatives depends on the
/// arguments only; value-only updates reuse its factorisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalCubicSplineInterpolation;

impl FittingStrategy for NaturalCubicSplineInterpolation {
    fn name(&self) -> &str {
        "NaturalCubicSpline"
    }

    fn long_name(&self) -> &str {
        "Natural cubic spline interpolation"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Interpolation
    }

    fn minimal_required_grid_points(&self) -> usize {
        3
    }

    fn quality(&self) -> FittingQuality {
        FittingQuality::Exact
    }

    fn is_local_approach(&self) -> bool {
        false
    }

    fn is_differentiable(&self) -> bool {
        true
    }

    fn left_localness_level(&self, _index: usize, count: usize) -> usize {
        count
    }

    fn right_localness_level(&self, _index: usize, count: usize) -> usize {
        count
    }

    fn create(&self) -> Box<dyn Fitter> {
        Box::new(NaturalCubicSplineFitter::default())
    }
}

/// Fitter produced by [`NaturalCubicSplineInterpolation`].
#[derive(Debug, Clone, Default)]
pub struct NaturalCubicSplineFitter {
    strategy: NaturalCubicSplineInterpolation,
    grid: GridData,
    /// Factorised system for the interior second derivatives
    factorization: Option<TridiagonalFactorization<f64>>,
    /// Polynomial coefficients for each cell
    coeffs: Vec<SplineCoeffs>,
}

impl NaturalCubicSplineFitter {
    /// Factorise the interior equations
    /// `h[k-1]*M[k-1] + 2*(h[k-1]+h[k])*M[k] + h[k]*M[k+1] = rhs[k]`.
    fn factorize(h: &[f64]) -> Result<TridiagonalFactorization<f64>, CurveError> {
        let interior = h.len() - 1;
        let mut sub = Vec::with_capacity(interior);
        let mut diag = Vec::with_capacity(interior);
        let mut sup = Vec::with_capacity(interior);
        for j in 0..interior {
            sub.push(if j == 0 { 0.0 } else { h[j] });
            diag.push(2.0 * (h[j] + h[j + 1]));
            sup.push(if j + 1 < interior { h[j + 1] } else { 0.0 });
        }
        Ok(TridiagonalFactorization::factorize(&sub, &diag, &sup)?)
    }

    fn compute_coefficients(
        h: &[f64],
        ys: &[f64],
        factorization: &TridiagonalFactorization<f64>,
    ) -> Result<Vec<SplineCoeffs>, CurveError> {
        let n = ys.len();

        let rhs: Vec<f64> = (1..n - 1)
            .map(|k| 6.0 * ((ys[k + 1] - ys[k]) / h[k] - (ys[k] - ys[k - 1]) / h[k - 1]))
            .collect();
        let interior_m = factorization.solve(&rhs)?;

        // Natural boundary: M[0] = M[n-1] = 0
        let mut m = Vec::with_capacity(n);
        m.push(0.0);
        m.extend(interior_m);
        m.push(0.0);

        Ok((0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
                c: m[i] / 2.0,
                d: (m[i + 1] - m[i]) / (6.0 * h[i]),
            })
            .collect())
    }
}

impl Fitter for NaturalCubicSplineFitter {
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

        let xs = self.grid.staged_arguments(&staged);
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        let factorization = match (staged.arguments.is_some(), self.factorization.take()) {
            (false, Some(existing)) => existing,
            _ => Self::factorize(&h)?,
        };
        let coeffs = Self::compute_coefficients(&h, &staged.values, &factorization)?;

        self.grid.commit(staged);
        self.factorization = Some(factorization);
        self.coeffs = coeffs;
        Ok(())
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let i = self.grid.cell(x)?;
        Ok(self.coeffs[i].value(x - self.grid.arguments()[i]))
    }

    fn integral(&self, a: f64, b: f64, left_index: usize) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        self.grid.check_cell(left_index)?;
        let xi = self.grid.arguments()[left_index];
        let coeffs = &self.coeffs[left_index];
        Ok(coeffs.antiderivative(b - xi) - coeffs.antiderivative(a - xi))
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableFitter> {
        Some(self)
    }
}

impl DifferentiableFitter for NaturalCubicSplineFitter {
    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let i = self.grid.cell(x)?;
        Ok(self.coeffs[i].derivative(x - self.grid.arguments()[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fitted(xs: &[f64], ys: &[f64]) -> NaturalCubicSplineFitter {
        let mut fitter = NaturalCubicSplineFitter::default();
        fitter
            .update(
                StridedSlice::contiguous(xs),
                StridedSlice::contiguous(ys),
                ChangeState::BothChanged,
            )
            .unwrap();
        fitter
    }

    #[test]
    fn test_exact_at_knots() {
        let xs = [0.0, 1.0, 2.5, 3.0, 4.0];
        let ys = [1.0, -1.0, 2.0, 0.5, 3.0];
        let fitter = fitted(&xs, &ys);
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(fitter.value(x).unwrap(), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reproduces_linear_data() {
        // Natural spline through collinear points is the line itself
        let fitter = fitted(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]);
        assert_relative_eq!(fitter.value(1.7).unwrap(), 4.4, epsilon = 1e-12);
        assert_relative_eq!(fitter.derivative(0.2).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(fitter.integral_over(0.0, 3.0).unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_point_symmetric_case() {
        // Points (0,0), (1,1), (2,0): M1 = -3, spline on [0,1] is 1.5x - 0.5x³
        let fitter = fitted(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]);
        assert_relative_eq!(fitter.value(0.5).unwrap(), 0.6875, epsilon = 1e-12);
        assert_relative_eq!(fitter.value(1.5).unwrap(), 0.6875, epsilon = 1e-12);
        assert_relative_eq!(fitter.derivative(0.0).unwrap(), 1.5, epsilon = 1e-12);
        // integral over [0,1] of 1.5x - 0.5x³ = 0.75 - 0.125
        assert_relative_eq!(fitter.integral(0.0, 1.0, 0).unwrap(), 0.625, epsilon = 1e-12);
    }

    #[test]
    fn test_value_only_update_reuses_factorization() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let mut fitter = fitted(&xs, &[0.0, 1.0, 0.0, 1.0]);
        fitter
            .update(
                StridedSlice::contiguous(&xs),
                StridedSlice::contiguous(&[1.0, 3.0, 5.0, 7.0]),
                ChangeState::ValueChanged,
            )
            .unwrap();
        assert!(fitter.is_operable());
        assert_relative_eq!(fitter.value(1.5).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_requires_three_points() {
        let mut fitter = NaturalCubicSplineFitter::default();
        let result = fitter.update(
            StridedSlice::contiguous(&[0.0, 1.0]),
            StridedSlice::contiguous(&[0.0, 1.0]),
            ChangeState::BothChanged,
        );
        assert_eq!(result.unwrap_err(), CurveError::InsufficientData { got: 2, need: 3 });
    }

    #[test]
    fn test_global_localness() {
        let strategy = NaturalCubicSplineInterpolation;
        assert_eq!(strategy.left_localness_level(2, 7), 7);
        assert_eq!(strategy.right_localness_level(2, 7), 7);
        assert!(!strategy.is_local_approach());
    }
}
