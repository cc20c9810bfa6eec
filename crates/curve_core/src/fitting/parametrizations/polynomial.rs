//! Least-squares polynomial parametrization.

use crate::fitting::grid_data::GridData;
use crate::fitting::traits::{
    DifferentiableFitter, Fitter, FittingQuality, FittingStrategy, StrategyKind,
};
use crate::math::linear_algebra::CholeskyFactorization;
use crate::types::{ChangeState, CurveError, StridedSlice};

/// Polynomial of fixed degree fitted to the grid points by least squares.
///
/// The fit is global and defined on the whole real line, so a parametrized
/// curve needs no extrapolation. Quality is `Best`: with more than
/// `degree + 1` points the polynomial generally misses the samples.
///
/// # Example
///
/// ```
/// use curve_core::fitting::{Fitter, FittingStrategy, PolynomialLeastSquares};
/// use curve_core::types::{ChangeState, StridedSlice};
///
/// let mut fitter = PolynomialLeastSquares::new(1).create();
/// fitter
///     .update(
///         StridedSlice::contiguous(&[0.0, 1.0, 2.0]),
///         StridedSlice::contiguous(&[1.0, 3.0, 5.0]),
///         ChangeState::BothChanged,
///     )
///     .unwrap();
/// assert!((fitter.value(10.0).unwrap() - 21.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolynomialLeastSquares {
    degree: usize,
}

impl PolynomialLeastSquares {
    /// Create a parametrization of the given polynomial degree.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Polynomial degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Default for PolynomialLeastSquares {
    /// Straight line.
    fn default() -> Self {
        Self::new(1)
    }
}

impl FittingStrategy for PolynomialLeastSquares {
    fn name(&self) -> &str {
        "PolynomialLeastSquares"
    }

    fn long_name(&self) -> &str {
        "Least-squares polynomial parametrization"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Parametrization
    }

    fn minimal_required_grid_points(&self) -> usize {
        self.degree + 1
    }

    fn quality(&self) -> FittingQuality {
        FittingQuality::Best
    }

    fn is_local_approach(&self) -> bool {
        false
    }

    fn is_differentiable(&self) -> bool {
        true
    }

    fn create(&self) -> Box<dyn Fitter> {
        Box::new(PolynomialLeastSquaresFitter::new(*self))
    }
}

/// Fitter produced by [`PolynomialLeastSquares`].
///
/// Works in the scaled variable `t = (x - center) / scale` to keep the
/// normal equations well conditioned.
#[derive(Debug, Clone)]
pub struct PolynomialLeastSquaresFitter {
    strategy: PolynomialLeastSquares,
    grid: GridData,
    center: f64,
    scale: f64,
    /// Normal-equation factor, depends on the arguments only
    factorization: Option<CholeskyFactorization<f64>>,
    /// Coefficients in `t`, lowest order first
    coefficients: Vec<f64>,
}

impl PolynomialLeastSquaresFitter {
    fn new(strategy: PolynomialLeastSquares) -> Self {
        Self {
            strategy,
            grid: GridData::default(),
            center: 0.0,
            scale: 1.0,
            factorization: None,
            coefficients: Vec::new(),
        }
    }

    fn scaling(xs: &[f64]) -> (f64, f64) {
        let first = xs[0];
        let last = xs[xs.len() - 1];
        let half_range = 0.5 * (last - first);
        let scale = if half_range > 0.0 { half_range } else { 1.0 };
        (0.5 * (first + last), scale)
    }

    fn normal_matrix(ts: &[f64], size: usize) -> Vec<f64> {
        let mut matrix = vec![0.0; size * size];
        for &t in ts {
            let powers = powers(t, 2 * size - 1);
            for j in 0..size {
                for k in 0..size {
                    matrix[j * size + k] += powers[j + k];
                }
            }
        }
        matrix
    }

    #[inline]
    fn to_local(&self, x: f64) -> f64 {
        (x - self.center) / self.scale
    }

    /// Antiderivative in `t`, vanishing at `t = 0`.
    fn antiderivative(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (j, &c)| acc * t + c / (j + 1) as f64)
            * t
    }
}

/// `[1, t, t², ..., t^max_power]`
fn powers(t: f64, max_power: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(max_power + 1);
    let mut p = 1.0;
    for _ in 0..=max_power {
        result.push(p);
        p *= t;
    }
    result
}

impl Fitter for PolynomialLeastSquaresFitter {
    fn strategy(&self) -> &dyn FittingStrategy {
        &self.strategy
    }

    fn is_operable(&self) -> bool {
        self.grid.is_operable()
    }

    fn lower_bound(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn upper_bound(&self) -> f64 {
        f64::INFINITY
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

        let size = self.strategy.degree + 1;
        let xs = self.grid.staged_arguments(&staged);
        let (center, scale) = Self::scaling(xs);
        let ts: Vec<f64> = xs.iter().map(|&x| (x - center) / scale).collect();

        let factorization = match (staged.arguments.is_some(), self.factorization.take()) {
            (false, Some(existing)) => existing,
            _ => CholeskyFactorization::factorize(&Self::normal_matrix(&ts, size), size)?,
        };

        let mut rhs = vec![0.0; size];
        for (&t, &y) in ts.iter().zip(staged.values.iter()) {
            for (j, p) in powers(t, size - 1).into_iter().enumerate() {
                rhs[j] += y * p;
            }
        }
        let coefficients = factorization.solve(&rhs)?;

        self.grid.commit(staged);
        self.center = center;
        self.scale = scale;
        self.factorization = Some(factorization);
        self.coefficients = coefficients;
        Ok(())
    }

    fn value(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let t = self.to_local(x);
        Ok(self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c))
    }

    /// Closed form; `left_index` is irrelevant for a global function.
    fn integral(&self, a: f64, b: f64, _left_index: usize) -> Result<f64, CurveError> {
        self.integral_over(a, b)
    }

    fn integral_over(&self, a: f64, b: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        if a == b {
            return Ok(0.0);
        }
        let ta = self.to_local(a);
        let tb = self.to_local(b);
        Ok(self.scale * (self.antiderivative(tb) - self.antiderivative(ta)))
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableFitter> {
        Some(self)
    }
}

impl DifferentiableFitter for PolynomialLeastSquaresFitter {
    fn derivative(&self, x: f64) -> Result<f64, CurveError> {
        self.grid.ensure_operable(self.strategy.name())?;
        let t = self.to_local(x);
        let dp_dt = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (j, &c)| acc * t + j as f64 * c);
        Ok(dp_dt / self.scale)
    }
}
